//! Catalog source adapters

mod file;
mod http;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

use crate::application::ports::CatalogSource;

/// Create a catalog source for `location`: HTTP for http(s) URLs, a file otherwise
pub fn create_catalog_source(location: &str) -> Box<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpCatalogSource::new(location))
    } else {
        Box::new(FileCatalogSource::new(location))
    }
}
