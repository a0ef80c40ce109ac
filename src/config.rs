//! Config handling

use std::path::PathBuf;

use tracing::log::LevelFilter;

use crate::cli::CliOptions;
use crate::error::ComicError;

/// HTTP-stack modules that drown out pipeline progress at info level.
const NOISY_MODULES: &[&str] = &["h2", "hyper_util", "reqwest", "rustls", "tracing"];

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        for module in NOISY_MODULES.iter().copied() {
            logger = logger.with_module_level(module, LevelFilter::Warn);
        }
    }
    match logger.init() {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("Failed to initialize logger: {err}");
            Err(Box::new(std::io::Error::other(err)))
        }
    }
}

/// Validated runtime configuration shared by the web app and the
/// one-shot generator.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Secret key for the hosted text model.
    pub text_api_key: String,
    /// Secret key for the hosted image model.
    pub image_api_key: String,
    /// Text model name.
    pub text_model: String,
    /// Image model name.
    pub image_model: String,
    /// Base URL of the hosted text API.
    pub text_api_base: String,
    /// Base URL of the hosted image API.
    pub image_api_base: String,
    /// Directory finished comics are written to.
    pub output_dir: PathBuf,
    /// Directory per-panel intermediates are staged under.
    pub work_dir: PathBuf,
    /// Path to the TTF used for caption text.
    pub caption_font: PathBuf,
}

fn required_key(value: Option<String>, env_name: &str) -> Result<String, ComicError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ComicError::Config(format!(
            "{env_name} is not set, add it to your .env or environment"
        ))),
    }
}

impl AppConfig {
    /// Builds the runtime config from CLI options, failing on missing keys.
    pub fn from_cli(cli: CliOptions) -> Result<Self, ComicError> {
        Ok(Self {
            text_api_key: required_key(cli.text_api_key, "COMICCRAFTER_TEXT_API_KEY")?,
            image_api_key: required_key(cli.image_api_key, "COMICCRAFTER_IMAGE_API_KEY")?,
            text_model: cli.text_model,
            image_model: cli.image_model,
            text_api_base: cli.text_api_base.trim_end_matches('/').to_string(),
            image_api_base: cli.image_api_base.trim_end_matches('/').to_string(),
            output_dir: cli.output_dir,
            work_dir: cli.work_dir,
            caption_font: cli.caption_font,
        })
    }
}
