//! HTTP client for the external image-generation service.
//!
//! The service accepts a text prompt and returns generated image bytes
//! inline; we hand back a `data:` URI so downstream consumers need no second
//! fetch. A 429 response is mapped to a dedicated rate-limit error variant
//! carrying the server-signaled backoff, which the task queue turns into a
//! retry instead of a user-visible failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("exo-backend/", env!("CARGO_PKG_VERSION"));
/// Backoff applied when a 429 arrives without a Retry-After header.
const DEFAULT_RETRY_AFTER_MS: u64 = 30_000;

/// Image-generation client errors.
#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error("network error: {0}")]
    Network(String),

    #[error("rate limited, retry after {retry_after_ms} ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("response contained no image data")]
    MissingImage,

    #[error("parse error: {0}")]
    Parse(String),
}

/// Seam for the image-generation backend, mockable in tests.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for a prompt; returns an image reference string
    /// (a data URI or an opaque URL).
    async fn generate(&self, prompt: &str, negative: &str) -> Result<String, ImageGenError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
    #[allow(dead_code)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: Option<String>,
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}

/// Pull the first inline image out of a response and render it as a data URI.
fn extract_data_uri(response: GenerateResponse) -> Result<String, ImageGenError> {
    let parts = response
        .candidates
        .and_then(|mut c| if c.is_empty() { None } else { c.remove(0).content })
        .and_then(|c| c.parts)
        .unwrap_or_default();

    for part in parts {
        if let Some(inline) = part.inline_data {
            if let Some(data) = inline.data {
                let mime = inline.mime_type.unwrap_or_else(|| "image/png".to_string());
                return Ok(format!("data:{};base64,{}", mime, data));
            }
        }
    }
    Err(ImageGenError::MissingImage)
}

/// Reqwest-backed image-generation client.
pub struct HttpImageClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpImageClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ImageGenError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ImageGenError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ImageGenerator for HttpImageClient {
    async fn generate(&self, prompt: &str, negative: &str) -> Result<String, ImageGenError> {
        let text = format!("{} Avoid: {}.", prompt, negative);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: &text }],
            }],
        };

        log::debug!("requesting image generation ({} chars of prompt)", text.len());

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ImageGenError::Network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(|secs| secs * 1000)
                .unwrap_or(DEFAULT_RETRY_AFTER_MS);
            return Err(ImageGenError::RateLimited { retry_after_ms });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ImageGenError::Api(status.as_u16(), text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::Parse(e.to_string()))?;

        extract_data_uri(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_data_uri_from_inline_data() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"text": "here is your planet"},
                            {"inlineData": {"data": "QUJD", "mimeType": "image/webp"}}
                        ]
                    }
                }]
            }"#,
        )
        .unwrap();

        let uri = extract_data_uri(response).unwrap();
        assert_eq!(uri, "data:image/webp;base64,QUJD");
    }

    #[test]
    fn test_extract_data_uri_defaults_mime() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "eHl6"}}]}}]}"#,
        )
        .unwrap();

        let uri = extract_data_uri(response).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_extract_data_uri_missing_image() {
        let text_only: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "sorry"}]}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            extract_data_uri(text_only),
            Err(ImageGenError::MissingImage)
        ));

        let empty: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            extract_data_uri(empty),
            Err(ImageGenError::MissingImage)
        ));
    }

    #[test]
    fn test_client_construction() {
        let client = HttpImageClient::new("https://example.invalid/generate", "k");
        assert!(client.is_ok());
    }
}
