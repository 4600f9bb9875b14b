use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use url::Url;

use super::transport::{HttpResponse, HttpTransport, TransportError, TransportResult};

const USER_AGENT: &str = concat!("bookcheck/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport bound to one upstream's headers and timeout
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Build a client that sends `headers` with every request
    pub fn new(timeout: Duration, headers: &[(String, String)]) -> TransportResult<Self> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(header_map(headers)?)
            .build()?;

        Ok(Self { inner, timeout })
    }

    /// Client carrying an `Authorization: Bearer` header
    pub fn with_bearer(timeout: Duration, token: &str) -> TransportResult<Self> {
        Self::new(
            timeout,
            &[("Authorization".to_string(), format!("Bearer {token}"))],
        )
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn send(&self, request: RequestBuilder) -> TransportResult<HttpResponse> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}

#[async_trait::async_trait]
impl HttpTransport for HttpClient {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> TransportResult<HttpResponse> {
        let url = validate_url(url)?;
        tracing::debug!(url = %url, "GET");

        self.send(self.inner.get(url).query(query)).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> TransportResult<HttpResponse> {
        let url = validate_url(url)?;
        tracing::debug!(url = %url, "POST");

        self.send(self.inner.post(url).json(body)).await
    }
}

fn header_map(headers: &[(String, String)]) -> TransportResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}

fn validate_url(url: &str) -> TransportResult<Url> {
    let parsed = Url::parse(url)?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(TransportError::InvalidUrl(format!("unsupported scheme {other}"))),
    }

    if parsed.host_str().is_none() {
        return Err(TransportError::InvalidUrl("No host in URL".to_string()));
    }

    Ok(parsed)
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Http(err)
    }
}
