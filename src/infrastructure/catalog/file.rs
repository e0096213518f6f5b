//! Catalog manifest read from the local filesystem

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::CatalogSource;
use crate::domain::catalog::Catalog;
use crate::domain::error::CatalogError;

/// Reads `metadata.json` from disk
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::ReadError(format!("{}: {}", self.path.display(), e)))?;

        Catalog::from_json(&content).map_err(|e| CatalogError::ParseError(e.to_string()))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
