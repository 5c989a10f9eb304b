use np_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::info;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "NP_API_URL";

/// Body of `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(rename = "SITE_HOST")]
    pub site_host: String,
}

/// Where the article API lives. Set once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_site_host(base_url)?,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Result<Self> {
        let url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    /// Asks a portal for its backend location via `GET {portal}/api/config`.
    pub async fn discover(portal: &str) -> Result<Self> {
        let mut url = parse_site_host(portal)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base URL", portal)))?
            .pop_if_empty()
            .extend(["api", "config"]);

        let response = reqwest::get(url.clone()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!("HTTP {} from {}", status.as_u16(), url)));
        }
        let site: SiteConfig = serde_json::from_str(&response.text().await?)?;
        info!("Discovered article API at {} via {}", site.site_host, url);
        Self::new(&site.site_host)
    }

    /// Explicit URL, then `NP_API_URL`, then discovery through `portal`,
    /// then the default.
    pub async fn resolve(explicit: Option<&str>, portal: Option<&str>) -> Result<Self> {
        if let Some(url) = explicit {
            return Self::new(url);
        }
        if let Ok(url) = env::var(API_URL_ENV) {
            return Self::new(&url);
        }
        match portal {
            Some(portal) => Self::discover(portal).await,
            None => Self::new(DEFAULT_API_URL),
        }
    }
}

/// Turns a host such as `api.news.local:8000` or `https://news.example/` into a
/// base URL, assuming `http` when no scheme is given.
pub fn parse_site_host(host: &str) -> Result<Url> {
    let host = host.trim();
    if host.is_empty() {
        return Err(Error::Config("empty site host".to_string()));
    }
    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };
    let url = Url::parse(&candidate)?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(Error::InvalidUrl(host.to_string()));
    }
    Ok(url)
}
