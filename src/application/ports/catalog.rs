//! Catalog source port interface

use async_trait::async_trait;

use crate::domain::catalog::Catalog;
use crate::domain::error::CatalogError;

/// Port for reading the static catalog manifest
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read and parse the manifest once.
    ///
    /// # Returns
    /// The catalog, or an error if it could not be read or parsed
    async fn load(&self) -> Result<Catalog, CatalogError>;

    /// Where the manifest is read from, for messages
    fn location(&self) -> String;
}

/// Blanket implementation for boxed catalog sources
#[async_trait]
impl CatalogSource for Box<dyn CatalogSource> {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        self.as_ref().load().await
    }

    fn location(&self) -> String {
        self.as_ref().location()
    }
}
