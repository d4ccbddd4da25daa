/// Catalog client with retry and result extraction
pub mod catalog;
/// Discogs HTTP API
pub mod discogs;
/// Data entities for lookup requests, search results and reports
pub mod entities;
/// Error types and result aliases
pub mod errors;

pub use catalog::{CatalogClient, CatalogService};
pub use discogs::DiscogsApi;
