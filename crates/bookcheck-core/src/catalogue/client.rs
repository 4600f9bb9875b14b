use std::fmt;

use super::parser::parse_search_json;
use super::schema::SearchRequest;
use crate::config::CatalogueConfig;
use crate::models::LibraryResult;
use crate::network::{HttpClient, HttpTransport, TransportResult};

/// What a catalogue search is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Title,
    Author,
    Isbn,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueQuery {
    pub kind: QueryKind,
    pub text: String,
}

impl CatalogueQuery {
    #[must_use]
    pub fn new(kind: QueryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn title(text: impl Into<String>) -> Self {
        Self::new(QueryKind::Title, text)
    }

    #[must_use]
    pub fn author(text: impl Into<String>) -> Self {
        Self::new(QueryKind::Author, text)
    }

    #[must_use]
    pub fn isbn(text: impl Into<String>) -> Self {
        Self::new(QueryKind::Isbn, text)
    }

    #[must_use]
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(QueryKind::Keyword, text)
    }

    /// Text in the catalogue's search syntax
    pub fn search_text(&self) -> String {
        match self.kind {
            QueryKind::Title => format!("t:({})", self.text),
            QueryKind::Author => format!("a:({})", self.text),
            QueryKind::Isbn | QueryKind::Keyword => self.text.clone(),
        }
    }
}

impl fmt::Display for CatalogueQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.search_text())
    }
}

/// Library catalogue search client.
///
/// Every search returns whatever could be parsed; an upstream failure is
/// logged and reads as zero results, so one bad lookup never sinks a batch.
pub struct CatalogueClient {
    config: CatalogueConfig,
    transport: Box<dyn HttpTransport>,
}

impl CatalogueClient {
    /// Client with its own connection pool carrying the catalogue headers
    pub fn new(config: CatalogueConfig) -> TransportResult<Self> {
        let transport = HttpClient::new(config.timeout(), &config.headers())?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    pub fn with_transport(config: CatalogueConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &CatalogueConfig {
        &self.config
    }

    pub async fn search_by_title(&self, title: &str, page_size: u32) -> Vec<LibraryResult> {
        self.search(&CatalogueQuery::title(title), 0, page_size).await
    }

    pub async fn search_by_author(&self, author: &str, page_size: u32) -> Vec<LibraryResult> {
        self.search(&CatalogueQuery::author(author), 0, page_size).await
    }

    pub async fn search_by_isbn(&self, isbn: &str, page_size: u32) -> Vec<LibraryResult> {
        self.search(&CatalogueQuery::isbn(isbn), 0, page_size).await
    }

    pub async fn search_by_keyword(&self, keyword: &str, page_size: u32) -> Vec<LibraryResult> {
        self.search(&CatalogueQuery::keyword(keyword), 0, page_size).await
    }

    /// Fetch one page of results; further pages are the caller's business
    pub async fn search(
        &self,
        query: &CatalogueQuery,
        page: u32,
        page_size: u32,
    ) -> Vec<LibraryResult> {
        let request = SearchRequest {
            search_text: query.search_text(),
            page_num: page,
            page_size,
        };

        let body = match serde_json::to_value(&request) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Failed to encode catalogue request");
                return Vec::new();
            }
        };

        tracing::debug!(query = %query, page, page_size, "Searching catalogue");

        let response = match self.transport.post_json(&self.config.search_url, &body).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Catalogue request failed");
                return Vec::new();
            }
        };

        if !response.is_success() {
            tracing::warn!(
                query = %query,
                status = response.status,
                "Catalogue returned an error status"
            );
            return Vec::new();
        }

        match parse_search_json(&response.body) {
            Ok(results) => {
                tracing::debug!(query = %query, count = results.len(), "Catalogue search complete");
                results
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Failed to parse catalogue response");
                Vec::new()
            }
        }
    }

    /// Release the connection pool
    pub fn close(self) {
        tracing::debug!(url = %self.config.search_url, "Closing catalogue client");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_author_are_field_scoped() {
        assert_eq!(CatalogueQuery::title("Wild Robot").search_text(), "t:(Wild Robot)");
        assert_eq!(CatalogueQuery::author("Peter Brown").search_text(), "a:(Peter Brown)");
    }

    #[test]
    fn test_isbn_and_keyword_pass_through() {
        assert_eq!(CatalogueQuery::isbn("9780316382007").search_text(), "9780316382007");
        assert_eq!(CatalogueQuery::keyword("robots island").search_text(), "robots island");
    }

    #[test]
    fn test_display_matches_search_text() {
        let query = CatalogueQuery::title("Dune");
        assert_eq!(query.to_string(), "t:(Dune)");
    }

    #[test]
    fn test_new_client_uses_config() {
        let config = CatalogueConfig {
            page_size: 3,
            ..Default::default()
        };
        let client = CatalogueClient::new(config).unwrap();

        assert_eq!(client.config().page_size, 3);
        client.close();
    }
}
