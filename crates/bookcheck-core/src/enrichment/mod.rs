mod open_library;

pub use open_library::{enrich_with_isbn, OpenLibraryClient};
