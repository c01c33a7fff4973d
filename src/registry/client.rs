//! Registry HTTP client
//!
//! The only network boundary of the tool. No retries: a failed fetch is
//! returned to the caller, which decides whether the session ends.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::{ComponentDetails, RegistryManifest};
use crate::error::{Result, component_not_found, registry_malformed, registry_unavailable};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of registry data
///
/// Implemented over HTTP in production and by in-memory fakes in tests.
pub trait RegistrySource: Sync {
    /// Fetch the registry index
    fn fetch_manifest(&self) -> Result<RegistryManifest>;

    /// Fetch one component bundle with file contents
    fn fetch_component(&self, name: &str) -> Result<ComponentDetails>;

    /// Address of a component bundle, as handed to the installer
    fn component_url(&self, name: &str) -> String;
}

/// Registry served as JSON over HTTP(S)
pub struct HttpRegistry {
    base_url: String,
    client: Client,
}

impl HttpRegistry {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("compsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                registry_unavailable(&base_url, format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { base_url, client })
    }

    pub fn manifest_url(&self) -> String {
        format!("{}/r/registry.json", self.base_url)
    }

    fn get_text(&self, url: &str) -> Result<(reqwest::StatusCode, String)> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| registry_unavailable(url, e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| registry_unavailable(url, e.to_string()))?;
        Ok((status, body))
    }
}

impl RegistrySource for HttpRegistry {
    fn fetch_manifest(&self) -> Result<RegistryManifest> {
        let url = self.manifest_url();
        let (status, body) = self.get_text(&url)?;
        if !status.is_success() {
            return Err(registry_unavailable(
                &url,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let manifest = parse_manifest(&url, &body)?;
        debug!(items = manifest.items.len(), "registry manifest fetched");
        Ok(manifest)
    }

    fn fetch_component(&self, name: &str) -> Result<ComponentDetails> {
        let url = self.component_url(name);
        let (status, body) = self.get_text(&url)?;
        if !status.is_success() {
            return Err(component_not_found(name, status.as_u16()));
        }

        parse_component(&url, &body)
    }

    fn component_url(&self, name: &str) -> String {
        format!("{}/r/{name}.json", self.base_url)
    }
}

/// Parse a manifest body; a payload without an `items` array is malformed
pub fn parse_manifest(url: &str, body: &str) -> Result<RegistryManifest> {
    serde_json::from_str(body).map_err(|e| registry_malformed(url, e.to_string()))
}

pub fn parse_component(url: &str, body: &str) -> Result<ComponentDetails> {
    serde_json::from_str(body).map_err(|e| registry_malformed(url, e.to_string()))
}
