//! Error handling

use axum::response::IntoResponse;
use tracing::info;

/// definitions for the comiccrafter application.
#[derive(Debug)]
pub enum ComicError {
    /// When you didn't do the right thing
    BadRequest(String),
    /// Startup configuration problems, fatal before the listener binds
    Config(String),
    /// The text model call failed
    TextApi(String),
    /// The image model call failed for one panel (index is story order, 1-based)
    ImageApi(usize, String),
    /// The model response could not be parsed into a script
    Script(String),
    /// Caption layout or rasterization failed
    Compose(String),
    /// When a requested resource is not found
    NotFound(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl std::fmt::Display for ComicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(detail) => write!(f, "Bad request: {detail}"),
            Self::Config(detail) => write!(f, "Configuration error: {detail}"),
            Self::TextApi(detail) => write!(f, "Text model call failed: {detail}"),
            Self::ImageApi(panel, detail) => {
                write!(f, "Image generation failed for panel {panel}: {detail}")
            }
            Self::Script(detail) => write!(f, "Could not parse model response: {detail}"),
            Self::Compose(detail) => write!(f, "Compositing failed: {detail}"),
            Self::NotFound(what) => write!(f, "Not found: {what}"),
            Self::InternalServerError(detail) => write!(f, "Internal server error: {detail}"),
        }
    }
}

impl std::error::Error for ComicError {}

impl From<std::io::Error> for ComicError {
    fn from(err: std::io::Error) -> Self {
        ComicError::InternalServerError(err.to_string())
    }
}

impl From<image::ImageError> for ComicError {
    fn from(err: image::ImageError) -> Self {
        ComicError::Compose(err.to_string())
    }
}

impl From<axum::http::Error> for ComicError {
    fn from(err: axum::http::Error) -> Self {
        ComicError::InternalServerError(err.to_string())
    }
}

fn plain_response(status: axum::http::StatusCode, body: String) -> axum::response::Response {
    let mut response = axum::response::Response::new(axum::body::Body::from(body));
    *response.status_mut() = status;
    response
}

impl IntoResponse for ComicError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        match self {
            ComicError::BadRequest(detail) => {
                info!("Bad request received: {detail}");
                plain_response(StatusCode::BAD_REQUEST, format!("Bad request: {detail}"))
            }
            ComicError::NotFound(what) => {
                tracing::error!("404 {what}");
                plain_response(StatusCode::NOT_FOUND, "Not Found".to_string())
            }
            ComicError::TextApi(detail) => {
                tracing::error!("Text model call failed: {detail}");
                plain_response(
                    StatusCode::BAD_GATEWAY,
                    "The story model is unavailable right now, try again shortly.".to_string(),
                )
            }
            ComicError::ImageApi(panel, detail) => {
                tracing::error!("Image generation failed for panel {panel}: {detail}");
                plain_response(
                    StatusCode::BAD_GATEWAY,
                    format!("Image generation failed for panel {panel}."),
                )
            }
            ComicError::Script(detail) => {
                tracing::error!("Unparsable model response: {detail}");
                plain_response(
                    StatusCode::BAD_GATEWAY,
                    "The story model returned something unusable, try again.".to_string(),
                )
            }
            ComicError::Compose(detail) => {
                tracing::error!("Compositing failed: {detail}");
                plain_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ComicError::Config(detail) => {
                tracing::error!("Configuration error: {detail}");
                plain_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ComicError::InternalServerError(detail) => {
                tracing::error!("Internal server error: {detail}");
                plain_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}
