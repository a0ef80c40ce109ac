//! Image model client
//!
//! One request per panel against the hosted image-generation endpoint.
//! GPT image models return inline base64; DALL-E models may return a
//! download URL instead, so both shapes are handled.

use base64::Engine;
use base64::engine::general_purpose;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::GENERATED_IMAGE_SIZE;
use crate::error::ComicError;

/// Request body for POST /v1/images/generations.
#[derive(Serialize, Debug)]
struct ImagesGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,

    // For GPT image models.
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    output_format: Option<&'a str>,

    // For dall-e models.
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a str>,
}

impl<'a> ImagesGenerateRequest<'a> {
    fn for_model(model: &'a str, prompt: &'a str) -> Self {
        if model.starts_with("gpt-image") {
            Self {
                model,
                prompt,
                n: 1,
                size: GENERATED_IMAGE_SIZE,
                quality: Some("high"),
                output_format: Some("png"),
                response_format: None,
            }
        } else {
            Self {
                model,
                prompt,
                n: 1,
                size: GENERATED_IMAGE_SIZE,
                quality: None,
                output_format: None,
                response_format: Some("b64_json"),
            }
        }
    }
}

#[derive(Deserialize, Debug)]
struct ImagesGenerateResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    b64_json: Option<String>,
    url: Option<String>,
    revised_prompt: Option<String>,
}

/// Renders one panel prompt into raw PNG bytes.
///
/// `panel` is the 1-based story position, used only for error context.
pub async fn generate_panel_image(
    http: &reqwest::Client,
    api_base: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
    panel: usize,
) -> Result<Vec<u8>, ComicError> {
    let api_error = |detail: String| ComicError::ImageApi(panel, detail);

    let req_body = ImagesGenerateRequest::for_model(model, prompt);

    let resp = http
        .post(format!("{api_base}/v1/images/generations"))
        .bearer_auth(api_key)
        .json(&req_body)
        .send()
        .await
        .map_err(|err| api_error(format!("request failed: {err}")))?;

    let status = resp.status();
    let bytes = resp
        .bytes()
        .await
        .map_err(|err| api_error(format!("failed reading response body: {err}")))?;

    if !status.is_success() {
        return Err(api_error(format!(
            "API error {status}: {}",
            String::from_utf8_lossy(&bytes)
        )));
    }

    let parsed: ImagesGenerateResponse = serde_json::from_slice(&bytes)
        .map_err(|err| api_error(format!("unparsable response JSON: {err}")))?;

    let first = parsed
        .data
        .into_iter()
        .next()
        .ok_or_else(|| api_error("no image data returned".to_string()))?;

    if let Some(revised_prompt) = first.revised_prompt {
        debug!("Revised prompt for panel {panel}: {revised_prompt}");
    }

    if let Some(b64_json) = first.b64_json {
        general_purpose::STANDARD
            .decode(b64_json)
            .map_err(|err| api_error(format!("failed to base64-decode image: {err}")))
    } else if let Some(url) = first.url {
        let resp = http
            .get(url)
            .send()
            .await
            .map_err(|err| api_error(format!("failed to download image: {err}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(format!("image download error {status}")));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| api_error(format!("failed reading downloaded image: {err}")))?;
        Ok(bytes.to_vec())
    } else {
        Err(api_error(
            "image response missing b64_json and url fields".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpt_image_request_uses_inline_png_output() {
        let req = ImagesGenerateRequest::for_model("gpt-image-1.5", "a cat");
        assert_eq!(req.output_format, Some("png"));
        assert_eq!(req.quality, Some("high"));
        assert_eq!(req.response_format, None);
        assert_eq!(req.n, 1);
    }

    #[test]
    fn dalle_request_asks_for_b64_json() {
        let req = ImagesGenerateRequest::for_model("dall-e-3", "a cat");
        assert_eq!(req.response_format, Some("b64_json"));
        assert_eq!(req.output_format, None);
    }

    #[test]
    fn request_serialization_skips_unset_fields() {
        let req = ImagesGenerateRequest::for_model("gpt-image-1.5", "a cat");
        let value = serde_json::to_value(&req).expect("serialize");
        assert!(value.get("response_format").is_none());
        assert_eq!(value["size"], GENERATED_IMAGE_SIZE);
    }

    #[test]
    fn response_accepts_b64_or_url_payloads() {
        let raw = r#"{"data": [{"b64_json": "aGk=", "revised_prompt": "a fine cat"}]}"#;
        let parsed: ImagesGenerateResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(parsed.data[0].b64_json.as_deref(), Some("aGk="));
        assert!(parsed.data[0].url.is_none());

        let raw = r#"{"data": [{"url": "https://example.org/p.png"}]}"#;
        let parsed: ImagesGenerateResponse = serde_json::from_str(raw).expect("parse");
        assert!(parsed.data[0].b64_json.is_none());
    }
}
