//! Shared constants for panel geometry and default paths
//!

use std::sync::LazyLock;

/// How many panels a comic script must contain.
pub const PANEL_COUNT: usize = 6;

/// The default place finished comics land.
pub const DEFAULT_OUTPUT_DIR: &str = "./comics";

/// The default place per-panel intermediates are staged.
pub const DEFAULT_WORK_DIR: &str = "./work";

/// Default path to the TTF used for caption text.
pub const DEFAULT_CAPTION_FONT: &str = "./fonts/ComicNeue-Regular.ttf";

/// Size requested from the image model, both axes.
pub const GENERATED_IMAGE_SIZE: &str = "1024x1024";

/// Edge length each panel is resized to before pasting into the page.
pub const PANEL_CELL: u32 = 512;

/// Gap between panels and around the page edge, in pixels.
pub const PAGE_GUTTER: u32 = 16;

/// Panels per row on the assembled page.
pub const PAGE_COLUMNS: u32 = 2;

/// Caption text size in pixels.
pub const CAPTION_FONT_SIZE: f32 = 30.0;

/// Horizontal inset of caption text from the panel edge.
pub const CAPTION_PAD_X: u32 = 24;

/// Vertical padding above and below the caption text.
pub const CAPTION_PAD_Y: u32 = 14;

/// Max age (in seconds) for artifact cache entries.
pub const ARTIFACT_CACHE_MAX_AGE_SECONDS: u64 = 60 * 60;

/// Cache-Control value for artifact responses.
pub static ARTIFACT_CACHE_CONTROL: LazyLock<String> =
    LazyLock::new(|| format!("public, max-age={}", ARTIFACT_CACHE_MAX_AGE_SECONDS));

/// How many recent comics the home page lists.
pub const RECENT_COMICS_LIMIT: usize = 8;

/// Longest scenario accepted from the form, in characters.
pub const SCENARIO_MAX_CHARS: usize = 2000;
