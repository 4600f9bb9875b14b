use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("Request timed out")]
    Timeout,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Status and body of a completed exchange.
///
/// A non-2xx status is still a completed exchange; callers decide what an
/// error status means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Request/response capability shared by every upstream client.
///
/// Headers and timeouts belong to the implementation and are fixed when it is
/// built, so one transport serves exactly one upstream.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> TransportResult<HttpResponse>;

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> TransportResult<HttpResponse>;
}
