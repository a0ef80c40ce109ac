//! Clients for the hosted text and image models

pub mod image;
pub mod text;

/// Default API base for the hosted text model.
pub const DEFAULT_TEXT_API_BASE: &str = "https://api.openai.com";

/// Default API base for the hosted image model.
pub const DEFAULT_IMAGE_API_BASE: &str = "https://api.openai.com";
