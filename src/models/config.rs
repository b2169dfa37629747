//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{DatasetKind, DepartmentCatalog, Edition};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the data files are published
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Dataset locations, tagged with their edition
    #[serde(default = "defaults::datasets")]
    pub datasets: Vec<DatasetSpec>,

    /// Listing page sizes and window width
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Program/department catalog
    #[serde(default)]
    pub catalog: DepartmentCatalog,

    /// Student directory settings
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Find the dataset declared for a kind and edition.
    pub fn dataset(&self, kind: DatasetKind, edition: Edition) -> Option<&DatasetSpec> {
        self.datasets
            .iter()
            .find(|d| d.kind == kind && d.edition == edition)
    }

    /// Like [`Config::dataset`], failing with a configuration error.
    pub fn require_dataset(&self, kind: DatasetKind, edition: Edition) -> Result<&DatasetSpec> {
        self.dataset(kind, edition).ok_or_else(|| {
            AppError::config(format!("no {kind} dataset configured for edition {edition}"))
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.source.base_url.is_none() && self.source.base_dir.is_none() {
            return Err(AppError::validation(
                "source needs either base_url or base_dir",
            ));
        }
        if self.pagination.page_sizes.is_empty() {
            return Err(AppError::validation("pagination.page_sizes is empty"));
        }
        if self.pagination.page_sizes.contains(&0) {
            return Err(AppError::validation("pagination.page_sizes must be > 0"));
        }
        crate::services::resolve_page_size(&self.pagination, None).map_err(|e| {
            AppError::validation(format!("pagination.default_page_size: {e}"))
        })?;
        if self.pagination.max_buttons == 0 {
            return Err(AppError::validation("pagination.max_buttons must be > 0"));
        }

        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if dataset.path.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "{} dataset for edition {} has an empty path",
                    dataset.kind, dataset.edition
                )));
            }
            if !seen.insert((dataset.kind, dataset.edition)) {
                return Err(AppError::validation(format!(
                    "duplicate {} dataset for edition {}",
                    dataset.kind, dataset.edition
                )));
            }
        }

        if self.catalog.width() == 0 {
            return Err(AppError::validation("catalog has no departments"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            http: HttpConfig::default(),
            datasets: defaults::datasets(),
            pagination: PaginationConfig::default(),
            catalog: DepartmentCatalog::default(),
            directory: DirectoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Data source location. `base_url` wins when both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL the dataset paths are joined onto
    #[serde(default)]
    pub base_url: Option<String>,

    /// Local directory holding the same layout
    #[serde(default)]
    pub base_dir: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            base_dir: Some(defaults::base_dir()),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Location of one dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetSpec {
    pub kind: DatasetKind,
    pub edition: Edition,

    /// Path relative to the source base; also the cache key
    pub path: String,
}

impl DatasetSpec {
    pub fn new(kind: DatasetKind, edition: Edition, path: impl Into<String>) -> Self {
        Self {
            kind,
            edition,
            path: path.into(),
        }
    }
}

/// Listing pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Selectable page sizes ("all" is always offered in addition)
    #[serde(default = "defaults::page_sizes")]
    pub page_sizes: Vec<usize>,

    /// Initial page size: a number or "all"
    #[serde(default = "defaults::default_page_size")]
    pub default_page_size: String,

    /// Page buttons shown around the current page before compressing
    #[serde(default = "defaults::max_buttons")]
    pub max_buttons: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_sizes: defaults::page_sizes(),
            default_page_size: defaults::default_page_size(),
            max_buttons: defaults::max_buttons(),
        }
    }
}

/// Student directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Domain used to derive a student email from the roll number
    #[serde(default = "defaults::email_domain")]
    pub email_domain: String,

    /// Photo URL with a `{roll}` placeholder
    #[serde(default = "defaults::photo_url_template")]
    pub photo_url_template: String,

    /// Whether resume links are exposed in listings
    #[serde(default)]
    pub show_resume_links: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            email_domain: defaults::email_domain(),
            photo_url_template: defaults::photo_url_template(),
            show_resume_links: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use super::DatasetSpec;
    use crate::models::{DatasetKind, Edition};

    pub fn base_dir() -> String {
        "public".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; placement-archive/0.1)".into()
    }

    pub fn datasets() -> Vec<DatasetSpec> {
        vec![
            DatasetSpec::new(DatasetKind::Students, Edition::Legacy, "data/stats.json"),
            DatasetSpec::new(
                DatasetKind::Companies,
                Edition::Legacy,
                "data/merged_company_data.json",
            ),
            DatasetSpec::new(DatasetKind::Notices, Edition::Legacy, "data/timeline.json"),
            DatasetSpec::new(DatasetKind::Analytics, Edition::Legacy, "data/analytics.json"),
            DatasetSpec::new(DatasetKind::Students, Edition::Y2025, "data/2025/stats.json"),
            DatasetSpec::new(
                DatasetKind::Companies,
                Edition::Y2025,
                "data/2025/company_data.json",
            ),
            DatasetSpec::new(DatasetKind::Resumes, Edition::Y2025, "data/2025/resumes.json"),
            DatasetSpec::new(DatasetKind::Slots, Edition::Y2025, "data/2025/timeline.json"),
        ]
    }

    pub fn page_sizes() -> Vec<usize> {
        vec![15, 30, 50, 100]
    }
    pub fn default_page_size() -> String {
        "15".into()
    }
    pub fn max_buttons() -> usize {
        5
    }

    pub fn email_domain() -> String {
        "iitk.ac.in".into()
    }
    pub fn photo_url_template() -> String {
        "https://oa.cc.iitk.ac.in/Oa/Jsp/Photo/{roll}_0.jpg".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
