//! Text model client
//!
//! One request per prompt against the hosted responses endpoint; the
//! free-form output text is returned for the caller to parse.

use serde::Deserialize;
use serde_json::json;

use crate::error::ComicError;

#[derive(Debug, Deserialize)]
struct ResponsesCreateResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<ResponseOutputItem>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseOutputItem {
    #[serde(default)]
    content: Vec<ResponseContentItem>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentItem {
    #[serde(rename = "output_text")]
    OutputText {
        /// The model's text output.
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Sends one free-form prompt to the text model and returns its text.
///
/// Endpoint: POST `{api_base}/v1/responses`.
pub async fn generate_text(
    http: &reqwest::Client,
    api_base: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String, ComicError> {
    let req_body = json!({
        "model": model,
        "input": prompt,
    });

    let resp = http
        .post(format!("{api_base}/v1/responses"))
        .bearer_auth(api_key)
        .json(&req_body)
        .send()
        .await
        .map_err(|err| ComicError::TextApi(format!("request failed: {err}")))?;

    let status = resp.status();
    let bytes = resp
        .bytes()
        .await
        .map_err(|err| ComicError::TextApi(format!("failed reading response body: {err}")))?;

    if !status.is_success() {
        return Err(ComicError::TextApi(format!(
            "API error {status}: {}",
            String::from_utf8_lossy(&bytes)
        )));
    }

    let parsed: ResponsesCreateResponse = serde_json::from_slice(&bytes)
        .map_err(|err| ComicError::TextApi(format!("unparsable response JSON: {err}")))?;

    if let Some(err) = parsed.error {
        return Err(ComicError::TextApi(format!("API returned error: {err}")));
    }

    let output_text = parsed.output_text.or_else(|| {
        parsed
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .find_map(|content| {
                if let ResponseContentItem::OutputText { text } = content {
                    Some(text.clone())
                } else {
                    None
                }
            })
    });

    output_text
        .map(|text| text.trim().to_string())
        .ok_or_else(|| ComicError::TextApi("response missing output_text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_top_level_output_text() {
        let raw = r##"{"output_text": "# Panel 1"}"##;
        let parsed: ResponsesCreateResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(parsed.output_text.as_deref(), Some("# Panel 1"));
    }

    #[test]
    fn response_parses_nested_content_items() {
        let raw = r#"{
            "output": [
                {"content": [{"type": "reasoning"}, {"type": "output_text", "text": "hello"}]}
            ]
        }"#;
        let parsed: ResponsesCreateResponse = serde_json::from_str(raw).expect("parse");
        let text = parsed
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .find_map(|content| match content {
                ResponseContentItem::OutputText { text } => Some(text.clone()),
                ResponseContentItem::Other => None,
            });
        assert_eq!(text.as_deref(), Some("hello"));
    }
}
