//! Icon resources
//!
//! Icons are addressed by a resource path such as `notify/icons/check.png`.
//! Whether the bytes come from an embedded table or from loose files on disk,
//! resolution goes through the same [`IconResolver`] contract.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{QFlowError, Result};
use crate::geometry::Size;

/// An image ready to hand to the host renderer
#[derive(Clone, Debug, PartialEq)]
pub struct Icon {
    /// Resource path the icon was resolved from
    pub path: String,
    /// Display size
    pub size: Size,
    /// Encoded image bytes; `None` when the resource could not be loaded
    pub bytes: Option<Arc<[u8]>>,
}

impl Icon {
    /// Wrap already-loaded image bytes
    pub fn from_bytes(path: impl Into<String>, bytes: impl Into<Arc<[u8]>>, size: Size) -> Self {
        Self {
            path: path.into(),
            size,
            bytes: Some(bytes.into()),
        }
    }

    /// Placeholder with no image data
    pub fn empty(path: impl Into<String>, size: Size) -> Self {
        Self {
            path: path.into(),
            size,
            bytes: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.bytes.is_some()
    }
}

/// Resolves resource paths to image bytes
pub trait IconResolver {
    fn load(&self, path: &str) -> Result<Arc<[u8]>>;

    /// Load `path` and wrap it as an icon of the given size
    fn resolve(&self, path: &str, size: Size) -> Result<Icon> {
        let bytes = self.load(path)?;
        Ok(Icon {
            path: path.to_string(),
            size,
            bytes: Some(bytes),
        })
    }
}

/// Resolver backed by an in-memory table
#[derive(Clone, Debug, Default)]
pub struct EmbeddedIcons {
    entries: FxHashMap<String, Arc<[u8]>>,
}

impl EmbeddedIcons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.entries.insert(path.into(), bytes.into());
    }

    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IconResolver for EmbeddedIcons {
    fn load(&self, path: &str) -> Result<Arc<[u8]>> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| QFlowError::IconNotFound(path.to_string()))
    }
}

/// Resolver reading loose files below a root directory
#[derive(Clone, Debug)]
pub struct FileIcons {
    root: PathBuf,
}

impl FileIcons {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl IconResolver for FileIcons {
    fn load(&self, path: &str) -> Result<Arc<[u8]>> {
        let full = self.root.join(path);
        match std::fs::read(&full) {
            Ok(bytes) => Ok(bytes.into()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(QFlowError::IconNotFound(path.to_string()))
            }
            Err(source) => Err(QFlowError::Io { path: full, source }),
        }
    }
}
