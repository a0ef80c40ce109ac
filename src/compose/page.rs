//! Final page assembly
//!
//! Captioned panels are resized to a fixed cell and pasted into a
//! two-column grid in story order on a white page.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::constants::{PAGE_COLUMNS, PAGE_GUTTER, PANEL_CELL};
use crate::error::ComicError;

/// Page dimensions for a given panel count.
pub fn page_dimensions(panel_count: u32) -> (u32, u32) {
    let rows = panel_count.div_ceil(PAGE_COLUMNS);
    let width = PAGE_COLUMNS * PANEL_CELL + (PAGE_COLUMNS + 1) * PAGE_GUTTER;
    let height = rows * PANEL_CELL + (rows + 1) * PAGE_GUTTER;
    (width, height)
}

/// Pastes the panels into the grid, left-to-right then top-to-bottom.
pub fn assemble_page(panels: &[RgbaImage]) -> Result<RgbaImage, ComicError> {
    if panels.is_empty() {
        return Err(ComicError::Compose("no panels to assemble".to_string()));
    }

    let panel_count = u32::try_from(panels.len())
        .map_err(|_| ComicError::Compose("panel count out of range".to_string()))?;
    let (width, height) = page_dimensions(panel_count);
    let mut page = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    for (position, panel) in panels.iter().enumerate() {
        let position = position as u32;
        let column = position % PAGE_COLUMNS;
        let row = position / PAGE_COLUMNS;
        let x = PAGE_GUTTER + column * (PANEL_CELL + PAGE_GUTTER);
        let y = PAGE_GUTTER + row * (PANEL_CELL + PAGE_GUTTER);

        let resized = if panel.dimensions() == (PANEL_CELL, PANEL_CELL) {
            panel.clone()
        } else {
            imageops::resize(panel, PANEL_CELL, PANEL_CELL, FilterType::Triangle)
        };
        imageops::replace(&mut page, &resized, i64::from(x), i64::from(y));
    }

    Ok(page)
}
