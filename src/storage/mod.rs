//! Data source abstractions for the published dataset files.
//!
//! Datasets are addressed by a path relative to the archive root, the same
//! layout whether served over HTTP or read from disk:
//!
//! ```text
//! {base}/
//! ├── data/
//! │   ├── stats.json                 # legacy students + branch totals
//! │   ├── merged_company_data.json   # legacy proformas
//! │   ├── timeline.json              # timeline notices
//! │   ├── analytics.json             # aggregated snapshot
//! │   └── 2025/
//! │       ├── stats.json
//! │       ├── company_data.json
//! │       ├── resumes.json
//! │       └── timeline.json          # slot timeline
//! ```

pub mod http;
pub mod local;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{LoadError, Result};
use crate::models::Config;

// Re-export for convenience
pub use http::HttpSource;
pub use local::LocalSource;
pub use session::{MemorySessionStore, SessionStore};

/// Read-only source of dataset bytes.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the raw bytes stored under `path`.
    async fn fetch(&self, path: &str) -> std::result::Result<Vec<u8>, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Build the data source selected by the configuration.
///
/// `source.base_url` takes precedence over `source.base_dir`.
pub fn from_config(config: &Config) -> Result<Arc<dyn DataSource>> {
    if let Some(base_url) = &config.source.base_url {
        return Ok(Arc::new(HttpSource::new(base_url, &config.http)?));
    }
    if let Some(base_dir) = &config.source.base_dir {
        return Ok(Arc::new(LocalSource::new(base_dir)));
    }
    Err(crate::error::AppError::config(
        "source needs either base_url or base_dir",
    ))
}
