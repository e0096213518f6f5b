//! Audio resources and their on-disk locations

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::catalog::{Catalog, InstructionType};

/// Directory under the media root that holds chant files
pub const CHANTING_DIR: &str = "chanting";

/// Something a phase can play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioResource {
    Gong,
    Closing,
    /// Chant file name as listed in the catalog
    Chant(String),
    Instructions(InstructionType),
}

impl fmt::Display for AudioResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gong => write!(f, "gong"),
            Self::Closing => write!(f, "closing chant"),
            Self::Chant(file) => write!(f, "chant {}", file),
            Self::Instructions(kind) => write!(f, "{} instructions", kind),
        }
    }
}

/// Maps resources to files under a media root using the catalog's fixed references
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
    catalog: Arc<Catalog>,
}

impl MediaLibrary {
    pub fn new(root: impl Into<PathBuf>, catalog: Arc<Catalog>) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    /// Resolve a resource to a path.
    /// Returns `None` for instructions when the catalog lists no instruction pair.
    pub fn resolve(&self, resource: &AudioResource) -> Option<PathBuf> {
        match resource {
            AudioResource::Gong => Some(self.root.join(&self.catalog.gong)),
            AudioResource::Closing => Some(self.root.join(&self.catalog.closing)),
            AudioResource::Chant(file) => Some(self.root.join(CHANTING_DIR).join(file)),
            AudioResource::Instructions(kind) => self
                .catalog
                .instructions
                .as_ref()
                .map(|files| self.root.join(files.file_for(*kind))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::InstructionFiles;

    #[test]
    fn chants_live_under_chanting_dir() {
        let library = MediaLibrary::new("/media", Arc::new(Catalog::default()));
        assert_eq!(
            library.resolve(&AudioResource::Chant("om.mp3".to_string())),
            Some(PathBuf::from("/media/chanting/om.mp3"))
        );
        assert_eq!(
            library.resolve(&AudioResource::Gong),
            Some(PathBuf::from("/media/gong.mp3"))
        );
        assert_eq!(
            library.resolve(&AudioResource::Closing),
            Some(PathBuf::from("/media/closing.mp3"))
        );
    }

    #[test]
    fn instructions_need_catalog_entry() {
        let library = MediaLibrary::new("/media", Arc::new(Catalog::default()));
        assert!(library
            .resolve(&AudioResource::Instructions(InstructionType::Short))
            .is_none());

        let catalog = Catalog {
            instructions: Some(InstructionFiles {
                short: "s.mp3".to_string(),
                long: "l.mp3".to_string(),
            }),
            ..Default::default()
        };
        let library = MediaLibrary::new("/media", Arc::new(catalog));
        assert_eq!(
            library.resolve(&AudioResource::Instructions(InstructionType::Long)),
            Some(PathBuf::from("/media/l.mp3"))
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(AudioResource::Gong.to_string(), "gong");
        assert_eq!(
            AudioResource::Instructions(InstructionType::Long).to_string(),
            "long instructions"
        );
    }
}
