use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::HeaderMap;
use axum::http::header::{CACHE_CONTROL, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use axum::response::Response;
use httpdate::{fmt_http_date, parse_http_date};

use super::prelude::*;
use crate::constants::ARTIFACT_CACHE_CONTROL;

/// Conditional-request validators for one finished comic.
///
/// The ETag ties the artifact slug to its bytes on disk (size plus
/// mtime). Regenerating a comic overwrites the same name, so the
/// size/mtime suffix is what invalidates previously cached copies.
#[derive(Clone, Debug)]
pub(crate) struct ArtifactValidators {
    etag: String,
    modified_at: Option<SystemTime>,
}

impl ArtifactValidators {
    pub(crate) fn for_artifact(file_name: &str, metadata: &std::fs::Metadata) -> Self {
        let modified_at = metadata.modified().ok();
        let stamp = modified_at
            .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |age| age.as_secs());
        let slug = file_name.trim_end_matches(".png");
        Self {
            etag: format!("\"{slug}-{}-{stamp}\"", metadata.len()),
            modified_at,
        }
    }

    /// True when the request's validators still match the artifact.
    pub(crate) fn still_fresh(&self, headers: &HeaderMap) -> bool {
        if let Some(candidates) = headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok()) {
            return candidates
                .split(',')
                .map(str::trim)
                .any(|candidate| candidate == "*" || candidate == self.etag);
        }

        let since = headers
            .get(IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .and_then(|value| parse_http_date(value).ok());
        match (since, self.modified_at) {
            (Some(since), Some(modified_at)) => modified_at <= since,
            _ => false,
        }
    }

    /// Builds a response carrying the cache headers for this artifact.
    fn respond(&self, status: StatusCode, body: Body) -> Result<Response, ComicError> {
        let mut builder = Response::builder()
            .status(status)
            .header(CACHE_CONTROL, ARTIFACT_CACHE_CONTROL.as_str())
            .header(ETAG, self.etag.as_str());
        if let Some(modified_at) = self.modified_at {
            builder = builder.header(LAST_MODIFIED, fmt_http_date(modified_at));
        }
        builder.body(body).map_err(ComicError::from)
    }
}

/// Artifact names come straight from URLs, so only a flat set of
/// characters is allowed and the name must stay inside the output dir.
fn is_safe_artifact_name(name: &str) -> bool {
    !name.is_empty()
        && name.ends_with(".png")
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Serves one finished comic with cache validators.
pub(crate) async fn artifact_handler(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ComicError> {
    if !is_safe_artifact_name(&file_name) {
        return Err(ComicError::BadRequest("invalid artifact name".to_string()));
    }

    let path = state.config.output_dir.join(&file_name);
    let metadata = std::fs::metadata(&path)
        .map_err(|_| ComicError::NotFound(format!("/comics/{file_name}")))?;
    let validators = ArtifactValidators::for_artifact(&file_name, &metadata);

    if validators.still_fresh(&headers) {
        return validators.respond(StatusCode::NOT_MODIFIED, Body::empty());
    }

    let bytes = std::fs::read(&path)?;
    let mut response = validators.respond(StatusCode::OK, Body::from(bytes))?;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validators_with(etag: &str, modified_at: Option<SystemTime>) -> ArtifactValidators {
        ArtifactValidators {
            etag: etag.to_string(),
            modified_at,
        }
    }

    #[test]
    fn artifact_names_are_validated() {
        assert!(is_safe_artifact_name("a-cat-in-space-anime.png"));
        assert!(is_safe_artifact_name("comic_1.png"));
        assert!(!is_safe_artifact_name(""));
        assert!(!is_safe_artifact_name("comic.jpg"));
        assert!(!is_safe_artifact_name("../etc/passwd.png"));
        assert!(!is_safe_artifact_name("a/b.png"));
        assert!(!is_safe_artifact_name("sneaky..png"));
    }

    #[test]
    fn etag_embeds_slug_size_and_mtime() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("strip.png");
        std::fs::write(&path, b"ten bytes!").expect("write");
        let metadata = std::fs::metadata(&path).expect("metadata");

        let validators = ArtifactValidators::for_artifact("strip.png", &metadata);
        assert!(validators.etag.starts_with("\"strip-10-"));
        assert!(validators.etag.ends_with('"'));

        let again = ArtifactValidators::for_artifact("strip.png", &metadata);
        assert_eq!(validators.etag, again.etag);
    }

    #[test]
    fn if_none_match_star_always_matches() {
        let validators = validators_with("\"strip-10-1\"", None);
        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("*"));
        assert!(validators.still_fresh(&headers));
    }

    #[test]
    fn matching_etag_is_still_fresh() {
        let validators = validators_with("\"strip-10-1\"", None);

        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("\"strip-10-1\""));
        assert!(validators.still_fresh(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(
            IF_NONE_MATCH,
            HeaderValue::from_static("\"other\", \"strip-10-1\""),
        );
        assert!(validators.still_fresh(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("\"other\""));
        assert!(!validators.still_fresh(&headers));
    }

    #[test]
    fn if_modified_since_respects_mtime() {
        let modified_at = UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        let validators = validators_with("\"strip-10-1700000000\"", Some(modified_at));

        let mut headers = HeaderMap::new();
        headers.insert(
            IF_MODIFIED_SINCE,
            HeaderValue::from_str(&fmt_http_date(modified_at)).expect("header"),
        );
        assert!(validators.still_fresh(&headers));

        let earlier = modified_at - std::time::Duration::from_secs(60);
        let mut headers = HeaderMap::new();
        headers.insert(
            IF_MODIFIED_SINCE,
            HeaderValue::from_str(&fmt_http_date(earlier)).expect("header"),
        );
        assert!(!validators.still_fresh(&headers));
    }
}
