//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

use crate::constants::{DEFAULT_CAPTION_FONT, DEFAULT_OUTPUT_DIR, DEFAULT_WORK_DIR};
use crate::genai::{DEFAULT_IMAGE_API_BASE, DEFAULT_TEXT_API_BASE};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "COMICCRAFTER_DEBUG")]
    /// Enable debug logging. Env: COMICCRAFTER_DEBUG
    pub debug: bool,

    #[clap(long, short, default_value = "9000", env = "COMICCRAFTER_PORT")]
    /// http listener port, defaults to `9000`.
    /// Env: COMICCRAFTER_PORT
    pub port: NonZeroU16,

    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "COMICCRAFTER_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: COMICCRAFTER_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "COMICCRAFTER_TEXT_API_KEY", hide_env_values = true)]
    /// Secret key for the hosted text model, usually set via `.env`.
    /// Env: COMICCRAFTER_TEXT_API_KEY
    pub text_api_key: Option<String>,

    #[clap(long, env = "COMICCRAFTER_IMAGE_API_KEY", hide_env_values = true)]
    /// Secret key for the hosted image model, usually set via `.env`.
    /// Env: COMICCRAFTER_IMAGE_API_KEY
    pub image_api_key: Option<String>,

    #[clap(long, default_value = "gpt-5.2", env = "COMICCRAFTER_TEXT_MODEL")]
    /// Text model used for the story and panel scripts.
    /// Env: COMICCRAFTER_TEXT_MODEL
    pub text_model: String,

    #[clap(long, default_value = "gpt-image-1.5", env = "COMICCRAFTER_IMAGE_MODEL")]
    /// Image model used to render the panels.
    /// Env: COMICCRAFTER_IMAGE_MODEL
    pub image_model: String,

    #[clap(long, default_value = DEFAULT_TEXT_API_BASE, env = "COMICCRAFTER_TEXT_API_BASE")]
    /// Base URL of the hosted text API.
    /// Env: COMICCRAFTER_TEXT_API_BASE
    pub text_api_base: String,

    #[clap(long, default_value = DEFAULT_IMAGE_API_BASE, env = "COMICCRAFTER_IMAGE_API_BASE")]
    /// Base URL of the hosted image API.
    /// Env: COMICCRAFTER_IMAGE_API_BASE
    pub image_api_base: String,

    #[clap(long, default_value = DEFAULT_OUTPUT_DIR, env = "COMICCRAFTER_OUTPUT_DIR")]
    /// Directory finished comics are written to.
    /// Env: COMICCRAFTER_OUTPUT_DIR
    pub output_dir: PathBuf,

    #[clap(long, default_value = DEFAULT_WORK_DIR, env = "COMICCRAFTER_WORK_DIR")]
    /// Directory per-panel intermediates are staged under.
    /// Env: COMICCRAFTER_WORK_DIR
    pub work_dir: PathBuf,

    #[clap(long, default_value = DEFAULT_CAPTION_FONT, env = "COMICCRAFTER_CAPTION_FONT")]
    /// Path to the TTF used for caption text.
    /// Env: COMICCRAFTER_CAPTION_FONT
    pub caption_font: PathBuf,
}
