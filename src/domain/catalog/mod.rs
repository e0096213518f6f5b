//! Catalog domain - available audio and chant selection

#[allow(clippy::module_inception)]
mod catalog;
mod media;
mod selector;

pub use catalog::{Bucket, Catalog, ChantEntry, InstructionFiles, InstructionType};
pub use media::{AudioResource, MediaLibrary, CHANTING_DIR};
pub use selector::{has_available, pick_chanting, select_with_retry, DEFAULT_MAX_ATTEMPTS};
