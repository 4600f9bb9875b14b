use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status string the catalogue uses for a copy that can be borrowed now.
pub const STATUS_AVAILABLE: &str = "Available";

/// Placeholder used wherever the catalogue omits a location or status.
pub const UNKNOWN: &str = "Unknown";

/// A book recognised in a photograph by the vision model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedBook {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    /// Model confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl IdentifiedBook {
    #[must_use]
    pub fn new(title: impl Into<String>, confidence: f64) -> Self {
        Self {
            title: title.into(),
            author: None,
            series: None,
            isbn: None,
            confidence,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    #[must_use]
    pub fn with_isbn(mut self, isbn: Option<String>) -> Self {
        self.isbn = isbn;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// State of one physical copy at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryAvailability {
    pub location: String,
    #[serde(default)]
    pub call_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl LibraryAvailability {
    #[must_use]
    pub fn new(location: String, call_number: Option<String>, status: String) -> Self {
        Self {
            location,
            call_number,
            status,
            due_date: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == STATUS_AVAILABLE
    }
}

/// One catalogue item (format group) as reported by the library.
///
/// `found` means the catalogue holds at least one material record for the
/// item; it says nothing about whether a physical copy is on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryResult {
    pub found: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub availabilities: Vec<LibraryAvailability>,
}

impl LibraryResult {
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            found: false,
            title: None,
            author: None,
            isbn: None,
            availabilities: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.availabilities.iter().any(LibraryAvailability::is_available)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResult {
    pub identified: IdentifiedBook,
    pub library: LibraryResult,
}

impl BookResult {
    #[must_use]
    pub fn new(identified: IdentifiedBook, library: LibraryResult) -> Self {
        Self {
            identified,
            library,
        }
    }
}

/// Everything learned from checking one photograph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckBooksResponse {
    pub books: Vec<BookResult>,
}

impl CheckBooksResponse {
    #[must_use]
    pub fn new(books: Vec<BookResult>) -> Self {
        Self { books }
    }

    pub fn found_count(&self) -> usize {
        self.books.iter().filter(|b| b.library.found).count()
    }

    pub fn available_count(&self) -> usize {
        self.books.iter().filter(|b| b.library.is_available()).count()
    }
}
