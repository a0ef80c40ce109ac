//! End-to-end comic generation
//!
//! Sequencing only: one text call for the story, one for the panel
//! script, one image call per panel, then local caption overlay and
//! page assembly. Everything runs in story order within one request.

use std::path::PathBuf;

use image::RgbaImage;
use tracing::info;

use crate::compose::caption::CaptionRenderer;
use crate::compose::page;
use crate::config::AppConfig;
use crate::error::ComicError;
use crate::genai::{image as image_api, text as text_api};
use crate::script::{self, PanelDescription, StorySummary};
use crate::staging;
use crate::style::Style;

/// The finished comic and the script it was assembled from.
#[derive(Clone, Debug)]
pub struct ComicArtifact {
    /// Story summary from the text model.
    pub story: StorySummary,
    /// The panel script, in story order.
    pub panels: Vec<PanelDescription>,
    /// File name within the output directory.
    pub file_name: String,
    /// Full path of the written artifact.
    pub path: PathBuf,
}

/// Runs the full pipeline for one scenario and style.
pub async fn generate_comic(
    http: &reqwest::Client,
    config: &AppConfig,
    font_bytes: &[u8],
    scenario: &str,
    style: Style,
) -> Result<ComicArtifact, ComicError> {
    let slug = staging::artifact_slug(scenario, style);
    let staging_dir = staging::staging_dir(&config.work_dir, &slug)?;

    info!("[{slug}] requesting story summary");
    let story_text = text_api::generate_text(
        http,
        &config.text_api_base,
        &config.text_api_key,
        &config.text_model,
        &script::story_prompt(scenario, style),
    )
    .await?;
    let story = script::parse_story(&story_text)?;

    info!("[{slug}] requesting panel script");
    let panel_text = text_api::generate_text(
        http,
        &config.text_api_base,
        &config.text_api_key,
        &config.text_model,
        &script::panel_prompt(scenario, style),
    )
    .await?;
    let panels = script::parse_panels(&panel_text)?;

    let mut renderer = CaptionRenderer::new(font_bytes.to_vec())?;
    let mut rendered: Vec<RgbaImage> = Vec::with_capacity(panels.len());
    for panel in &panels {
        info!("[{slug}] rendering panel {} of {}", panel.index, panels.len());
        let png_bytes = image_api::generate_panel_image(
            http,
            &config.image_api_base,
            &config.image_api_key,
            &config.image_model,
            &script::image_prompt(panel, style),
            panel.index,
        )
        .await?;

        let mut bitmap = image::load_from_memory(&png_bytes)
            .map_err(|err| {
                ComicError::ImageApi(panel.index, format!("undecodable image payload: {err}"))
            })?
            .to_rgba8();

        if panel.has_dialogue() {
            renderer.overlay_caption(&mut bitmap, &panel.dialogue)?;
        }

        bitmap.save(staging::panel_path(&staging_dir, panel.index))?;
        rendered.push(bitmap);
    }

    info!("[{slug}] assembling page");
    let page = page::assemble_page(&rendered)?;
    let path = staging::artifact_path(&config.output_dir, &slug)?;
    page.save(&path)?;

    let file_name = staging::artifact_file_name(&slug);
    info!("[{slug}] wrote {}", path.display());

    Ok(ComicArtifact {
        story,
        panels,
        file_name,
        path,
    })
}
