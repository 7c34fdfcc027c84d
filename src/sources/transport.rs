//! HTTP transport seam for the catalog client.

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::FetchError;

/// Default Jikan v4 endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.jikan.moe/v4";

/// What: Source of raw catalog JSON for a request path.
///
/// Details:
/// - `path` is relative to the API base and already carries its query string,
///   e.g. `/top/anime?page=2&filter=bypopularity`.
/// - Implementations must not retry; one call is one request.
pub trait CatalogTransport: Send + Sync {
    /// Issue a GET for `path` and decode the body as JSON.
    fn get_json<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Value, FetchError>>;
}

/// What: Build the HTTP client shared by catalog requests and image downloads.
///
/// Details:
/// - Pooled connections and the `AnimeVerse/<version>` User-Agent. No request
///   timeout is set; a request runs until the server answers or the
///   connection fails.
/// - Falls back to a default client if the builder fails.
#[must_use]
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!("AnimeVerse/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    /// Client from [`build_http_client`].
    client: reqwest::Client,
    /// API base without trailing slash.
    base_url: String,
}

impl HttpTransport {
    /// What: Build a transport for `base_url` over `client`.
    ///
    /// Inputs:
    /// - `base_url`: API root such as [`DEFAULT_API_BASE`]; a trailing `/` is trimmed.
    /// - `client`: Usually [`build_http_client`]; clones share one connection pool.
    #[must_use]
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl CatalogTransport for HttpTransport {
    fn get_json<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        Box::pin(async move {
            let url = self.url_for(path);
            debug!(url = %url, "requesting catalog page");
            let resp = self.client.get(&url).send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            info!(
                status = status.as_u16(),
                bytes = body.len(),
                "fetched catalog response"
            );
            if !status.is_success() {
                let preview: String = body.chars().take(200).collect();
                warn!(
                    status = status.as_u16(),
                    preview = preview,
                    "catalog returned non-success status"
                );
                return Err(FetchError::Status(status.as_u16()));
            }
            Ok(serde_json::from_str(&body)?)
        })
    }
}
