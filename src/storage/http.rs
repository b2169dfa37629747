//! HTTP data source.
//!
//! Issues a plain GET per dataset. Any non-2xx status is a load failure
//! carrying the status code; transport errors carry the client's message.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{LoadError, Result};
use crate::models::HttpConfig;
use crate::storage::DataSource;
use crate::utils::http::create_async_client;
use crate::utils::url::{parse_base_url, resolve_asset};

/// Data source backed by a static file server.
#[derive(Clone)]
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    /// Create a source rooted at `base_url`.
    pub fn new(base_url: &str, config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            base: parse_base_url(base_url)?,
            client: create_async_client(config)?,
        })
    }

    /// Create a source with a caller-provided client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            base: parse_base_url(base_url)?,
            client,
        })
    }

    /// Absolute URL for a dataset path.
    pub fn url_for(&self, path: &str) -> std::result::Result<Url, LoadError> {
        resolve_asset(&self.base, path).map_err(|e| LoadError::transport(path, e))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, path: &str) -> std::result::Result<Vec<u8>, LoadError> {
        let url = self.url_for(path)?;
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::transport(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::status(path, status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadError::transport(path, e))?;
        log::debug!("Fetched {} ({} bytes)", path, bytes.len());
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
