use anyhow::{Context as _, Result};
use serde_json::{json, Value};
use tracing::debug;

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Thin Google Cloud Vision wrapper for the `ocr` command. Holds its key as
/// an Option so the bot can run with the feature unconfigured.
#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl VisionClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs document text detection against a publicly reachable image URL.
    /// Returns `Ok(None)` when the image contains no recognizable text.
    pub async fn annotate(&self, image_url: &str) -> Result<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("no Google Cloud Vision API key configured")?;
        let payload = json!({
            "requests": [{
                "image": { "source": { "imageUri": image_url } },
                "features": [{ "type": "DOCUMENT_TEXT_DETECTION" }],
            }]
        });
        let response = self
            .http
            .post(ANNOTATE_URL)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .context("vision annotate request failed")?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("vision annotate returned a non-JSON body")?;
        if !status.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            anyhow::bail!("vision API error ({status}): {message}");
        }
        debug!("vision annotate responded with status {status}");
        Ok(extract_text(&body))
    }
}

fn extract_text(body: &Value) -> Option<String> {
    let first = body.get("responses")?.get(0)?;
    if let Some(message) = first.pointer("/error/message").and_then(Value::as_str) {
        debug!("vision per-image error: {message}");
        return None;
    }
    let text = first
        .pointer("/fullTextAnnotation/text")
        .and_then(Value::as_str)
        .or_else(|| {
            first
                .pointer("/textAnnotations/0/description")
                .and_then(Value::as_str)
        })?;
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_full_text_annotation() {
        let body = json!({
            "responses": [{
                "fullTextAnnotation": { "text": "WEST OF\nHOUSE\n" },
                "textAnnotations": [{ "description": "ignored" }],
            }]
        });
        assert_eq!(extract_text(&body).as_deref(), Some("WEST OF\nHOUSE"));
    }

    #[test]
    fn test_extract_falls_back_to_text_annotations() {
        let body = json!({
            "responses": [{
                "textAnnotations": [{ "description": "hello world" }],
            }]
        });
        assert_eq!(extract_text(&body).as_deref(), Some("hello world"));
    }

    #[test]
    fn test_extract_handles_empty_and_error_responses() {
        assert_eq!(extract_text(&json!({ "responses": [{}] })), None);
        assert_eq!(extract_text(&json!({ "responses": [] })), None);
        let errored = json!({
            "responses": [{ "error": { "message": "image too large" } }]
        });
        assert_eq!(extract_text(&errored), None);
    }
}
