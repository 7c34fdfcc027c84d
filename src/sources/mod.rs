//! Network data retrieval: the catalog client, its transport and image downloads.

mod catalog;
mod download;
mod error;
mod parse;
mod transport;

/// Boxed error alias for non-catalog I/O in this module.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use catalog::{CatalogClient, FetchErrorPolicy};
pub use download::{download_image, image_file_name};
pub use error::FetchError;
pub use parse::parse_envelope;
pub use transport::{CatalogTransport, DEFAULT_API_BASE, HttpTransport, build_http_client};
