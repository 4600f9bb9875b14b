use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::image::EncodedImage;
use super::parser::{parse_vlm_response, ParseError};
use crate::config::{ConfigError, VisionConfig};
use crate::models::IdentifiedBook;
use crate::network::{HttpClient, HttpTransport, TransportError};

pub const SYSTEM_PROMPT: &str = "\
You identify books in photographs. The image shows one or more books, for \
example a bookshelf, a stack of books or books laid out on a table.

Return a JSON array with one object per book you can identify. Every object \
has exactly these fields:

- \"title\"      (string)        the book title
- \"author\"     (string | null) the author, if visible or recognisable
- \"series\"     (string | null) the series name, if any
- \"confidence\" (number)        your confidence from 0.0 to 1.0
- \"notes\"      (string | null) anything useful, e.g. \"spine partially hidden\"

Rules:
1. Return ONLY the JSON array, without markdown fences or commentary.
2. Include partially hidden books with a lower confidence and a note.
3. Never invent books that are not visible.
4. Order the array by position in the image, left to right, top to bottom.
";

const USER_PROMPT: &str = "Identify every book in this image.";

/// Longest slice of an error body kept in [`IdentifyError::Api`]
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),
    #[error("Failed to read image {}: {source}", path.display())]
    ReadImage {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("Vision API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Malformed vision API response: {0}")]
    MalformedResponse(serde_json::Error),
    #[error("Vision API returned no content")]
    EmptyResponse,
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type IdentifyResult<T> = Result<T, IdentifyError>;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completions endpoint
pub struct VisionClient {
    config: VisionConfig,
    transport: Box<dyn HttpTransport>,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> IdentifyResult<Self> {
        config.validate()?;
        let transport = HttpClient::with_bearer(config.timeout(), &config.api_key)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    pub fn with_transport(config: VisionConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Identify the books in the image at `path`
    pub async fn identify_books(&self, path: &Path) -> IdentifyResult<Vec<IdentifiedBook>> {
        let image = EncodedImage::load(path).await?;
        tracing::info!(path = %path.display(), format = image.format.mime_type(), "Identifying books");

        self.identify_image(&image).await
    }

    pub async fn identify_image(&self, image: &EncodedImage) -> IdentifyResult<Vec<IdentifiedBook>> {
        let body = self.request_body(image);
        let response = self
            .transport
            .post_json(&self.config.completions_url(), &body)
            .await?;

        if !response.is_success() {
            return Err(IdentifyError::Api {
                status: response.status,
                message: truncate(&response.body, MAX_ERROR_BODY),
            });
        }

        let completion: ChatCompletion =
            response.json().map_err(IdentifyError::MalformedResponse)?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(IdentifyError::EmptyResponse)?;

        tracing::debug!(response = %text, "Vision model replied");

        let books = parse_vlm_response(&text)?;
        tracing::info!(count = books.len(), "Identified books");

        Ok(books)
    }

    fn request_body(&self, image: &EncodedImage) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": [
                        {"type": "text", "text": USER_PROMPT},
                        {"type": "image_url", "image_url": {"url": image.data_url()}}
                    ]
                }
            ]
        })
    }

    pub fn close(self) {
        tracing::debug!(model = %self.config.model, "Closing vision client");
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::ImageFormat;

    #[test]
    fn test_new_requires_api_key() {
        let result = VisionClient::new(VisionConfig::default());
        assert!(matches!(result, Err(IdentifyError::Config(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let config = VisionConfig {
            api_key: "sk-test".into(),
            model: "gpt-4o-mini".into(),
            ..Default::default()
        };
        let client = VisionClient::new(config).unwrap();
        let image = EncodedImage::from_bytes(ImageFormat::Jpeg, b"abc");

        let body = client.request_body(&image);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["content"][0]["text"], USER_PROMPT);
        assert_eq!(
            body["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,YWJj"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("éééé", 2), "éé...");
    }
}
