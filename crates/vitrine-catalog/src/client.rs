//! HTTP client for catalog retrieval.

use std::time::Duration;

use reqwest::Client;

use crate::catalog::{Catalog, CatalogError};

/// Client for fetching the remote catalog document.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, CatalogError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("vitrine/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }

    /// Fetch and parse the catalog from `url`.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or
    /// invalid YAML in the response body.
    pub async fn fetch(&self, url: &str) -> Result<Catalog, CatalogError> {
        tracing::debug!(url, "fetching theme catalog");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        let body = response.text().await?;
        Catalog::parse(&body)
    }
}
