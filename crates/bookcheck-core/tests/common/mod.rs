#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bookcheck_core::{HttpResponse, HttpTransport, TransportError, TransportResult};

/// One request seen by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RecordedCall {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn search_text(&self) -> Option<&str> {
        self.body.as_ref()?.get("searchText")?.as_str()
    }
}

type Responder = dyn Fn(&RecordedCall) -> TransportResult<HttpResponse> + Send + Sync;

/// Transport that records every call and answers from a closure
#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> TransportResult<HttpResponse> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn ok(body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(HttpResponse::new(200, body.clone())))
    }

    pub fn status(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    pub fn timeout() -> Self {
        Self::new(|_| Err(TransportError::Timeout))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn boxed(&self) -> Box<dyn HttpTransport> {
        Box::new(self.clone())
    }

    fn record(&self, call: RecordedCall) -> TransportResult<HttpResponse> {
        let result = (self.responder)(&call);
        self.calls.lock().unwrap().push(call);
        result
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> TransportResult<HttpResponse> {
        self.record(RecordedCall {
            method: "GET",
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            body: None,
        })
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> TransportResult<HttpResponse> {
        self.record(RecordedCall {
            method: "POST",
            url: url.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }
}

/// Catalogue body with one physical, one electronic tab for `title`
pub fn catalogue_body(title: &str, isbn: &str) -> String {
    serde_json::json!({
        "data": [{
            "title": title,
            "primaryAgent": {"label": "Author, Some"},
            "materialTabs": [
                {
                    "type": "physical",
                    "callNumber": "FIC",
                    "identifiedBy": {"isbn": [isbn]},
                    "locations": [
                        {"label": "Main Library", "availabilityStatus": "Available"},
                        {"label": "Branch", "availabilityStatus": "Checked Out"}
                    ]
                },
                {"type": "electronic", "identifiedBy": {"isbn": ["0000000000"]}}
            ]
        }]
    })
    .to_string()
}

pub const EMPTY_CATALOGUE: &str = r#"{"data": []}"#;
