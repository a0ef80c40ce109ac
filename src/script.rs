//! Prompt templates and parsing of model responses into comic scripts

use regex::Regex;

use crate::constants::PANEL_COUNT;
use crate::error::ComicError;
use crate::style::Style;

/// One panel of the comic script, in story order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PanelDescription {
    /// 1-based position within the story.
    pub index: usize,
    /// Background and character details, comma-separated.
    pub scene: String,
    /// Dialogue for the panel, `...` when silent.
    pub dialogue: String,
}

impl PanelDescription {
    /// Whether the panel carries dialogue worth overlaying.
    pub fn has_dialogue(&self) -> bool {
        let trimmed = self.dialogue.trim();
        !trimmed.is_empty() && trimmed != "..."
    }
}

/// The structured story the text model returns alongside the panels.
///
/// Sections the model omits are left empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StorySummary {
    /// Catchy title for the story.
    pub title: String,
    /// Main characters and setting.
    pub introduction: String,
    /// Events leading to the climax.
    pub storyline: String,
    /// Peak action or turning point.
    pub climax: String,
    /// Concluding lesson.
    pub moral: String,
}

/// Builds the prompt that asks the text model for a six-panel script.
pub fn panel_prompt(scenario: &str, style: Style) -> String {
    format!(
        r#"You are a professional comic book creator.
You will be given a short scenario, and you must split it into exactly {PANEL_COUNT} comic panels.
**Art Style:** {style}
For each comic panel, provide:
1. **Description**: A detailed background and character description (comma-separated, not full sentences).
2. **Text**: Exact dialogue in quotation marks, or if no dialogue, leave it empty or use `...`.
Ensure all text is clear, meaningful, and in proper English.
Format:
# Panel 1
Description: [Background and character details]
Text: "[Character]: [Dialogue]" OR "..." if no dialogue.
# Panel 2
Description: [Background and character details]
Text: "[Character]: [Dialogue]" OR "..." if no dialogue.
# end
Short Scenario:
{scenario}"#,
        style = style.label(),
        scenario = scenario.trim(),
    )
}

/// Builds the prompt that asks the text model for a titled story summary.
pub fn story_prompt(scenario: &str, style: Style) -> String {
    format!(
        r#"You are a professional storyteller.
Given a short scenario, create a structured story with a title and exactly 4 sections:
**Title**: A catchy title for the story.
1. **Introduction**: Introduce the main character(s) and setting in 1-2 sentences.
2. **Storyline**: Describe the sequence of events leading to the climax in 2-3 sentences.
3. **Climax**: Highlight the peak action or turning point in 1-2 sentences.
4. **Moral**: Provide a concluding lesson or takeaway in 1 sentence.
**Art Style Context:** {style}
Format:
# Title
[Title text]
# Introduction
[Text]
# Storyline
[Text]
# Climax
[Text]
# Moral
[Text]
Short Scenario:
{scenario}"#,
        style = style.label(),
        scenario = scenario.trim(),
    )
}

/// The prompt sent to the image model for one panel.
pub fn image_prompt(panel: &PanelDescription, style: Style) -> String {
    format!(
        "{}, {}, single comic panel, no speech bubbles, no text",
        panel.scene.trim_end_matches('.'),
        style.prompt_phrase()
    )
}

fn compiled(pattern: &str) -> Result<Regex, ComicError> {
    Regex::new(pattern).map_err(|err| ComicError::InternalServerError(err.to_string()))
}

/// Splits a model response on `# Panel N` headings and extracts each
/// panel's description and dialogue.
///
/// Fails unless exactly [`PANEL_COUNT`] panels come back.
pub fn parse_panels(response: &str) -> Result<Vec<PanelDescription>, ComicError> {
    let heading_re = compiled(r"(?mi)^\s*#\s*Panel\s+\d+\s*$")?;
    let description_re = compiled(r"(?i)Description:\s*(.+)")?;
    let dialogue_re = compiled(r#"(?is)Text:\s*"([^"]+)""#)?;
    let end_marker_re = compiled(r"(?mi)^\s*#\s*end\s*$")?;

    let mut panels = Vec::new();
    // Segment 0 is whatever precedes the first heading (model small talk,
    // or nothing), never a panel.
    for block in heading_re.split(response).skip(1) {
        let block = end_marker_re.replace(block, "");
        if block.trim().is_empty() {
            continue;
        }

        let scene = description_re
            .captures(&block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| "Unknown scene.".to_string());

        let lines: Vec<String> = dialogue_re
            .captures_iter(&block)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();
        let dialogue = if lines.is_empty() {
            "...".to_string()
        } else {
            lines.join(" ")
        };

        panels.push(PanelDescription {
            index: panels.len() + 1,
            scene,
            dialogue,
        });
    }

    if panels.len() != PANEL_COUNT {
        return Err(ComicError::Script(format!(
            "expected {PANEL_COUNT} panels, got {}",
            panels.len()
        )));
    }

    Ok(panels)
}

/// Collects the known `# Section` headings from a story response.
///
/// Unknown headings are ignored; missing sections stay empty.
pub fn parse_story(response: &str) -> Result<StorySummary, ComicError> {
    let heading_re = compiled(r"(?m)^\s*#\s*([A-Za-z]+)\s*$")?;

    let mut story = StorySummary::default();
    let matches: Vec<(usize, usize, String)> = heading_re
        .captures_iter(response)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            Some((whole.start(), whole.end(), name))
        })
        .collect();

    for (position, (_, content_start, name)) in matches.iter().enumerate() {
        let content_end = matches
            .get(position + 1)
            .map(|next| next.0)
            .unwrap_or(response.len());
        let content = response[*content_start..content_end].trim().to_string();
        match name.as_str() {
            "title" => story.title = content,
            "introduction" => story.introduction = content,
            "storyline" => story.storyline = content,
            "climax" => story.climax = content,
            "moral" => story.moral = content,
            _ => {}
        }
    }

    Ok(story)
}
