//! Filesystem staging and artifact naming
//!
//! Artifact names derive only from the scenario and style, so repeating
//! a request overwrites the same file instead of accumulating copies.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ComicError;
use crate::style::Style;

/// Longest scenario-derived portion of an artifact slug.
const SLUG_MAX_CHARS: usize = 48;

/// A finished comic found in the output directory.
#[derive(Clone, Debug)]
pub struct RecentComic {
    /// File name within the output directory.
    pub file_name: String,
    /// Local time the artifact was last written.
    pub generated_at: String,
}

/// Derives the deterministic artifact slug for a scenario and style.
pub fn artifact_slug(scenario: &str, style: Style) -> String {
    let mut slug = String::new();
    let mut last_was_dash = true;
    for c in scenario.chars() {
        if slug.len() >= SLUG_MAX_CHARS {
            break;
        }
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-');
    let base = if trimmed.is_empty() { "comic" } else { trimmed };
    format!("{base}-{}", style.label().to_ascii_lowercase())
}

/// File name of the final artifact for a slug.
pub fn artifact_file_name(slug: &str) -> String {
    format!("{slug}.png")
}

/// Creates (if needed) and returns the staging directory for one request.
pub fn staging_dir(work_dir: &Path, slug: &str) -> Result<PathBuf, ComicError> {
    let dir = work_dir.join(slug);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Path of one staged panel intermediate, 1-based like the script.
pub fn panel_path(staging: &Path, index: usize) -> PathBuf {
    staging.join(format!("panel_{index}.png"))
}

/// Creates (if needed) and returns the artifact path for a slug.
pub fn artifact_path(output_dir: &Path, slug: &str) -> Result<PathBuf, ComicError> {
    fs::create_dir_all(output_dir)?;
    Ok(output_dir.join(artifact_file_name(slug)))
}

/// Lists finished comics, newest first, capped at `limit`.
pub fn recent_artifacts(output_dir: &Path, limit: usize) -> Result<Vec<RecentComic>, ComicError> {
    let entries = match fs::read_dir(output_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(ComicError::from(err)),
    };

    let mut comics = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".png") {
            continue;
        }
        let Ok(modified) = entry.metadata().and_then(|meta| meta.modified()) else {
            continue;
        };
        comics.push((modified, name.to_string()));
    }

    comics.sort_by(|a, b| b.0.cmp(&a.0));
    comics.truncate(limit);

    Ok(comics
        .into_iter()
        .map(|(modified, file_name)| RecentComic {
            file_name,
            generated_at: DateTime::<Local>::from(modified)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        })
        .collect())
}
