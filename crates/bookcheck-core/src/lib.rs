#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod catalogue;
pub mod checker;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod network;
pub mod vision;

pub use catalogue::{parse_search_json, CatalogueClient, CatalogueQuery, QueryKind};
pub use checker::BookChecker;
pub use config::{CatalogueConfig, ConfigError, OpenLibraryConfig, Settings, VisionConfig};
pub use enrichment::{enrich_with_isbn, OpenLibraryClient};
pub use error::{Error, Result};
pub use models::{
    BookResult, CheckBooksResponse, IdentifiedBook, LibraryAvailability, LibraryResult,
};
pub use network::{HttpClient, HttpResponse, HttpTransport, TransportError, TransportResult};
pub use vision::{parse_vlm_response, IdentifyError, ImageFormat, ParseError, VisionClient};
