use anyhow::{Context, Result};
use clap::Parser;
use comiccrafter::config::{AppConfig, setup_logging};
use comiccrafter::constants::{DEFAULT_CAPTION_FONT, DEFAULT_OUTPUT_DIR, DEFAULT_WORK_DIR};
use comiccrafter::genai::{DEFAULT_IMAGE_API_BASE, DEFAULT_TEXT_API_BASE};
use comiccrafter::pipeline;
use comiccrafter::style::Style;
use std::path::PathBuf;

/// Generate a six-panel comic strip without the web UI.
///
/// Minimal UX:
///   comic_generator "a shy robot opens a bakery on the moon" anime
#[derive(Parser, Debug)]
#[command(name = "comic_generator")]
#[command(about = "Generate a six-panel comic strip from a short scenario")]
struct Args {
    /// Short scenario to turn into a comic
    scenario: String,

    /// Art style: Manga, Anime, American, or Belgian
    style: Option<String>,

    /// Secret key for the hosted text model
    #[arg(required = true, long, env = "COMICCRAFTER_TEXT_API_KEY", hide_env_values = true)]
    text_api_key: String,

    /// Secret key for the hosted image model
    #[arg(required = true, long, env = "COMICCRAFTER_IMAGE_API_KEY", hide_env_values = true)]
    image_api_key: String,

    /// Text model used for the story and panel scripts
    #[arg(long, default_value = "gpt-5.2")]
    text_model: String,

    /// Image model used to render the panels
    #[arg(long, default_value = "gpt-image-1.5")]
    image_model: String,

    /// Base URL of the hosted text API
    #[arg(long, default_value = DEFAULT_TEXT_API_BASE)]
    text_api_base: String,

    /// Base URL of the hosted image API
    #[arg(long, default_value = DEFAULT_IMAGE_API_BASE)]
    image_api_base: String,

    /// Directory the finished comic is written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, env = "COMICCRAFTER_OUTPUT_DIR")]
    out_dir: PathBuf,

    /// Directory per-panel intermediates are staged under
    #[arg(long, default_value = DEFAULT_WORK_DIR, env = "COMICCRAFTER_WORK_DIR")]
    work_dir: PathBuf,

    /// Path to the TTF used for caption text
    #[arg(long, default_value = DEFAULT_CAPTION_FONT, env = "COMICCRAFTER_CAPTION_FONT")]
    caption_font: PathBuf,

    /// Enable debug logging
    #[arg(long, env = "COMICCRAFTER_DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    let _ = setup_logging(args.debug);

    let style = match args.style.as_deref() {
        Some(input) => Style::parse(input).unwrap_or_else(|| {
            eprintln!("Invalid art style {input:?}, defaulting to Anime.");
            Style::Anime
        }),
        None => Style::Anime,
    };

    let config = AppConfig {
        text_api_key: args.text_api_key,
        image_api_key: args.image_api_key,
        text_model: args.text_model,
        image_model: args.image_model,
        text_api_base: args.text_api_base.trim_end_matches('/').to_string(),
        image_api_base: args.image_api_base.trim_end_matches('/').to_string(),
        output_dir: args.out_dir,
        work_dir: args.work_dir,
        caption_font: args.caption_font,
    };

    let font_bytes = std::fs::read(&config.caption_font).with_context(|| {
        format!(
            "Failed to read caption font {}",
            config.caption_font.display()
        )
    })?;

    let client = reqwest::Client::new();
    let artifact =
        pipeline::generate_comic(&client, &config, &font_bytes, &args.scenario, style).await?;

    if !artifact.story.title.is_empty() {
        println!("# {}", artifact.story.title);
    }
    if !artifact.story.moral.is_empty() {
        println!("Moral: {}", artifact.story.moral);
    }
    for panel in &artifact.panels {
        println!("\nPanel {}:", panel.index);
        println!("Description: {}", panel.scene);
        println!("Text: {}", panel.dialogue);
    }

    println!("\nSaved: {}", artifact.path.display());
    Ok(())
}
