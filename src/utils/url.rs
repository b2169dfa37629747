//! URL and asset path helpers.

use url::Url;

use crate::error::Result;

/// Strip a leading slash so `path` joins under the base instead of
/// replacing its path.
pub fn relative_asset_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Join an asset path onto a base path string (`"/archive/"` +
/// `"/data/stats.json"` → `"/archive/data/stats.json"`).
pub fn asset_path(base: &str, path: &str) -> String {
    let clean = relative_asset_path(path);
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{clean}")
    } else {
        format!("{base}/{clean}")
    }
}

/// Parse a base URL, forcing a trailing slash so joins stay beneath it.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve an asset path against a base URL.
pub fn resolve_asset(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(relative_asset_path(path))?)
}
