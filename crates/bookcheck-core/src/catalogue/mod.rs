mod client;
mod normalizer;
mod parser;
pub mod schema;

pub use client::{CatalogueClient, CatalogueQuery, QueryKind};
pub use normalizer::normalize_material_tab;
pub use parser::{parse_search_json, parse_search_results};
