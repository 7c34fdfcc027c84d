//! Paged catalog client.

use std::sync::Arc;

use tracing::{info, warn};

use super::parse::parse_envelope;
use super::{CatalogTransport, FetchError};
use crate::state::{CatalogRecord, ListKind};

/// How a controller reacts to a failed fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchErrorPolicy {
    /// Failures stay distinguishable from empty pages.
    #[default]
    Surface,
    /// Failures are logged and reported as an empty page.
    Swallow,
}

impl FetchErrorPolicy {
    /// Parse a settings/CLI value (`surface` or `swallow`).
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "surface" | "distinguish" | "strict" => Some(Self::Surface),
            "swallow" | "silent" | "legacy" => Some(Self::Swallow),
            _ => None,
        }
    }
}

/// Client for the paged top-anime and top-character listings.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct CatalogClient {
    /// Request transport.
    transport: Arc<dyn CatalogTransport>,
}

impl CatalogClient {
    /// Wrap a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    /// What: Fetch one page and report failures to the caller.
    ///
    /// Inputs:
    /// - `kind`: Listing to query.
    /// - `page`: 1-based page number.
    ///
    /// Output:
    /// - Normalized records; `Ok(vec![])` when the page is empty.
    ///
    /// # Errors
    /// - `FetchError::InvalidPage` for page 0 (no request is issued).
    /// - Network, status and envelope failures from the transport.
    pub async fn try_fetch_page(
        &self,
        kind: ListKind,
        page: u32,
    ) -> Result<Vec<CatalogRecord>, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPage(page));
        }
        let path = kind.path_for_page(page);
        let body = self.transport.get_json(&path).await?;
        let records = parse_envelope(kind, &body)?;
        info!(%kind, page, count = records.len(), "catalog page loaded");
        Ok(records)
    }

    /// What: Fetch one page, converting any failure into an empty result.
    ///
    /// Inputs:
    /// - `kind`: Listing to query.
    /// - `page`: 1-based page number.
    ///
    /// Output:
    /// - Records, or an empty vector when the fetch failed or the page was empty.
    ///
    /// Details:
    /// - Callers cannot tell "no more data" from "transient failure"; the
    ///   failure is only visible in the log.
    pub async fn fetch_page(&self, kind: ListKind, page: u32) -> Vec<CatalogRecord> {
        match self.try_fetch_page(kind, page).await {
            Ok(records) => records,
            Err(e) => {
                warn!(%kind, page, error = %e, "catalog fetch failed; treating as empty");
                Vec::new()
            }
        }
    }

    /// Fetch honoring a controller's [`FetchErrorPolicy`].
    ///
    /// # Errors
    /// - Only under [`FetchErrorPolicy::Surface`]; see [`Self::try_fetch_page`].
    pub async fn fetch_with_policy(
        &self,
        kind: ListKind,
        page: u32,
        policy: FetchErrorPolicy,
    ) -> Result<Vec<CatalogRecord>, FetchError> {
        match policy {
            FetchErrorPolicy::Surface => self.try_fetch_page(kind, page).await,
            FetchErrorPolicy::Swallow => Ok(self.fetch_page(kind, page).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedTransport, anime_envelope, anime_json};

    #[tokio::test]
    /// What: N well-formed records in, N normalized records out, for several pages
    async fn returns_every_well_formed_record() {
        for page in [1_u32, 2, 7] {
            let transport = ScriptedTransport::new();
            let n = page as usize + 2;
            let entries: Vec<_> = (0..n).map(|i| anime_json(&format!("Show {i}"))).collect();
            transport.push_ok(anime_envelope(entries));
            let client = CatalogClient::new(transport.clone());
            let recs = client
                .try_fetch_page(ListKind::TopAnime, page)
                .await
                .expect("page loads");
            assert_eq!(recs.len(), n);
            assert!(recs.iter().all(|r| !r.title().is_empty() && !r.image_url().is_empty()));
            assert_eq!(
                transport.requests(),
                vec![format!("/top/anime?page={page}&filter=bypopularity")]
            );
        }
    }

    #[tokio::test]
    /// What: Silent variant turns a network failure into an empty list
    async fn fetch_page_swallows_failures() {
        let transport = ScriptedTransport::new();
        transport.push_err(FetchError::Network("connection reset".into()));
        let client = CatalogClient::new(transport.clone());
        assert!(client.fetch_page(ListKind::TopCharacters, 1).await.is_empty());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn page_zero_is_rejected_without_request() {
        let transport = ScriptedTransport::new();
        let client = CatalogClient::new(transport.clone());
        let err = client
            .try_fetch_page(ListKind::TopAnime, 0)
            .await
            .expect_err("page 0 rejected");
        assert_eq!(err, FetchError::InvalidPage(0));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    /// What: Policy decides whether a failure is visible to the caller
    async fn policy_controls_error_visibility() {
        let transport = ScriptedTransport::new();
        transport.push_err(FetchError::Status(503));
        transport.push_err(FetchError::Status(503));
        let client = CatalogClient::new(transport);
        assert!(
            client
                .fetch_with_policy(ListKind::TopAnime, 2, FetchErrorPolicy::Surface)
                .await
                .is_err()
        );
        let swallowed = client
            .fetch_with_policy(ListKind::TopAnime, 2, FetchErrorPolicy::Swallow)
            .await
            .expect("swallowed");
        assert!(swallowed.is_empty());
    }

    #[test]
    fn policy_from_config_key() {
        assert_eq!(
            FetchErrorPolicy::from_config_key(" Swallow "),
            Some(FetchErrorPolicy::Swallow)
        );
        assert_eq!(
            FetchErrorPolicy::from_config_key("surface"),
            Some(FetchErrorPolicy::Surface)
        );
        assert_eq!(FetchErrorPolicy::from_config_key("maybe"), None);
    }
}
