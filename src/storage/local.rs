//! Local filesystem data source.
//!
//! Reads the published layout from a directory, e.g. the `public/` folder
//! of a site checkout. A missing file is reported like an HTTP 404 so
//! callers see the same failure shape as with [`super::HttpSource`].

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::LoadError;
use crate::storage::DataSource;
use crate::utils::url::relative_asset_path;

/// Status reported for files that do not exist.
const NOT_FOUND: u16 = 404;

/// Data source reading from a local directory.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root_dir: PathBuf,
}

impl LocalSource {
    /// Create a new LocalSource rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a dataset path, refusing to leave the root.
    fn path(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(relative_asset_path(key));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return None;
        }
        Some(self.root_dir.join(relative))
    }
}

#[async_trait]
impl DataSource for LocalSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let full = self
            .path(path)
            .ok_or_else(|| LoadError::transport(path, "path escapes the data directory"))?;
        log::debug!("Reading {}", full.display());

        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::status(path, NOT_FOUND))
            }
            Err(e) => Err(LoadError::transport(path, e)),
        }
    }

    fn describe(&self) -> String {
        self.root_dir.display().to_string()
    }
}
