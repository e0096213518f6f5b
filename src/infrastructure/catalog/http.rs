//! Catalog manifest fetched over HTTP

use async_trait::async_trait;

use crate::application::ports::CatalogSource;
use crate::domain::catalog::Catalog;
use crate::domain::error::CatalogError;

/// Fetches `metadata.json` with a single GET request
pub struct HttpCatalogSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::FetchError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::FetchError(format!(
                "HTTP {} from {}",
                status, self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::FetchError(e.to_string()))?;

        Catalog::from_json(&body).map_err(|e| CatalogError::ParseError(e.to_string()))
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}
