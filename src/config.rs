// src/config.rs

//! Configuration loading utilities.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::Config;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file is missing or unreadable.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Config::default();
    }
    Config::load_or_default(path)
}

/// Load configuration, apply command-line overrides and validate.
///
/// `base_url` and `base_dir` replace the configured source; a base URL
/// given here wins over any configured directory.
pub fn load_validated(
    path: &Path,
    base_url: Option<String>,
    base_dir: Option<PathBuf>,
) -> Result<Config> {
    let mut config = load_config(path);

    if let Some(url) = base_url {
        config.source.base_url = Some(url);
    } else if let Some(dir) = base_dir {
        config.source.base_url = None;
        config.source.base_dir = Some(dir.display().to_string());
    }

    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml"));
        assert_eq!(config.datasets.len(), Config::default().datasets.len());
    }

    #[test]
    fn test_overrides_replace_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source]\nbase_url = \"https://archive.example.org/\"\n").unwrap();

        let config = load_validated(&path, None, Some(PathBuf::from("site/public"))).unwrap();
        assert_eq!(config.source.base_url, None);
        assert_eq!(config.source.base_dir.as_deref(), Some("site/public"));

        let config = load_validated(&path, Some("https://mirror.example.org".into()), None).unwrap();
        assert_eq!(config.source.base_url.as_deref(), Some("https://mirror.example.org"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pagination]\nmax_buttons = 0\n").unwrap();

        let err = load_validated(&path, None, None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
