use futures::future::join_all;
use std::path::Path;

use crate::catalogue::CatalogueClient;
use crate::config::Settings;
use crate::enrichment::OpenLibraryClient;
use crate::models::{BookResult, CheckBooksResponse, IdentifiedBook, LibraryResult};
use crate::vision::{IdentifyResult, VisionClient};
use crate::Result;

/// Photograph in, library availability out.
///
/// Identification failures abort the whole check. Enrichment and catalogue
/// failures only degrade the affected book to "not found".
pub struct BookChecker {
    vision: VisionClient,
    catalogue: CatalogueClient,
    open_library: OpenLibraryClient,
    page_size: u32,
}

impl BookChecker {
    pub fn new(
        vision: VisionClient,
        catalogue: CatalogueClient,
        open_library: OpenLibraryClient,
    ) -> Self {
        let page_size = catalogue.config().page_size;
        Self {
            vision,
            catalogue,
            open_library,
            page_size,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            VisionClient::new(settings.vision.clone())?,
            CatalogueClient::new(settings.catalogue.clone())?,
            OpenLibraryClient::new(settings.open_library.clone())?,
        ))
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub async fn check_image(&self, path: &Path) -> IdentifyResult<CheckBooksResponse> {
        let identified = self.vision.identify_books(path).await?;
        Ok(CheckBooksResponse::new(self.check_books(identified).await))
    }

    /// Look every book up concurrently; output order follows input order
    pub async fn check_books(&self, books: Vec<IdentifiedBook>) -> Vec<BookResult> {
        join_all(books.into_iter().map(|book| self.lookup(book))).await
    }

    /// Enrich the ISBN, then search by ISBN and fall back to the title
    pub async fn lookup(&self, book: IdentifiedBook) -> BookResult {
        let isbn = self
            .open_library
            .enrich(&book.title, book.author.as_deref(), book.isbn.as_deref())
            .await;
        let book = book.with_isbn(isbn);

        let mut results = match book.isbn.as_deref() {
            Some(isbn) => self.catalogue.search_by_isbn(isbn, self.page_size).await,
            None => Vec::new(),
        };

        if results.is_empty() {
            if book.isbn.is_some() {
                tracing::debug!(title = %book.title, "No ISBN match, searching by title");
            }
            results = self.catalogue.search_by_title(&book.title, self.page_size).await;
        }

        let library = results
            .into_iter()
            .next()
            .unwrap_or_else(LibraryResult::not_found);

        BookResult::new(book, library)
    }

    pub fn close(self) {
        self.vision.close();
        self.catalogue.close();
        self.open_library.close();
    }
}
