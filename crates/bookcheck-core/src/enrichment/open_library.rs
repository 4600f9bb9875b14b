//! Open Library search, used to fill in ISBNs the vision model could not read.
//!
//! API docs: https://openlibrary.org/dev/docs/api/search

use serde::Deserialize;

use crate::config::OpenLibraryConfig;
use crate::network::{HttpClient, HttpTransport, TransportResult};

const SEARCH_FIELDS: &str = "isbn,title,author_name";

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Option<Vec<SearchDoc>>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    isbn: Option<Vec<String>>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Option<Vec<String>>,
}

pub struct OpenLibraryClient {
    config: OpenLibraryConfig,
    transport: Box<dyn HttpTransport>,
}

impl OpenLibraryClient {
    pub fn new(config: OpenLibraryConfig) -> TransportResult<Self> {
        let transport = HttpClient::new(config.timeout(), &[])?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    pub fn with_transport(config: OpenLibraryConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Existing ISBN if there is one, otherwise whatever Open Library knows.
    ///
    /// Never overrides a non-empty `existing_isbn` and never touches the
    /// network in that case.
    pub async fn enrich(
        &self,
        title: &str,
        author: Option<&str>,
        existing_isbn: Option<&str>,
    ) -> Option<String> {
        if let Some(isbn) = existing_isbn.filter(|isbn| !isbn.is_empty()) {
            tracing::debug!(title = %title, "ISBN already present, skipping enrichment");
            return Some(isbn.to_string());
        }

        self.search_isbn(title, author).await
    }

    /// First ISBN of the top search hit for `title` (and `author`).
    ///
    /// Any failure is logged and reported as `None`.
    pub async fn search_isbn(&self, title: &str, author: Option<&str>) -> Option<String> {
        let query = search_query(title, author);
        let params = [
            ("q", query.clone()),
            ("limit", "1".to_string()),
            ("fields", SEARCH_FIELDS.to_string()),
        ];

        tracing::info!(query = %query, "Searching Open Library");

        let response = match self.transport.get(&self.config.search_url(), &params).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Open Library request failed");
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(
                query = %query,
                status = response.status,
                "Open Library returned an error status"
            );
            return None;
        }

        let parsed: SearchResponse = match response.json() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Failed to parse Open Library response");
                return None;
            }
        };

        let Some(doc) = parsed.docs.unwrap_or_default().into_iter().next() else {
            tracing::debug!(query = %query, "No Open Library results");
            return None;
        };

        let Some(isbn) = doc.isbn.unwrap_or_default().into_iter().next() else {
            tracing::debug!(
                query = %query,
                title = doc.title.as_deref().unwrap_or_default(),
                "Open Library result has no ISBN"
            );
            return None;
        };

        let author_name = doc
            .author_name
            .as_ref()
            .and_then(|names| names.first())
            .map_or("Unknown", String::as_str);

        tracing::info!(
            query = %query,
            isbn = %isbn,
            title = doc.title.as_deref().unwrap_or_default(),
            author = author_name,
            "Found ISBN"
        );

        Some(isbn)
    }

    pub fn close(self) {
        tracing::debug!(url = %self.config.base_url, "Closing Open Library client");
    }
}

/// Enrich with a short-lived client built from `config`.
///
/// Failing to build the client is logged and treated like any other
/// enrichment failure.
pub async fn enrich_with_isbn(
    config: &OpenLibraryConfig,
    title: &str,
    author: Option<&str>,
    existing_isbn: Option<&str>,
) -> Option<String> {
    if let Some(isbn) = existing_isbn.filter(|isbn| !isbn.is_empty()) {
        return Some(isbn.to_string());
    }

    match OpenLibraryClient::new(config.clone()) {
        Ok(client) => {
            let isbn = client.search_isbn(title, author).await;
            client.close();
            isbn
        }
        Err(e) => {
            tracing::warn!(title = %title, error = %e, "Unexpected error during ISBN enrichment");
            None
        }
    }
}

fn search_query(title: &str, author: Option<&str>) -> String {
    match author.filter(|a| !a.is_empty()) {
        Some(author) => format!("{title} {author}"),
        None => title.to_string(),
    }
}
