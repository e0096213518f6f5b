//! Configuration domain

mod app_config;

pub use app_config::{
    AppConfig, DEFAULT_CATALOG, DEFAULT_FADE_IN_SECS, DEFAULT_MEDIA_DIR, DEFAULT_MINUTES,
};
