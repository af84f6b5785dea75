//! Portal configuration parsed from environment variables.

use crate::error::PortalError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub backend_url: String,
    pub ipfs_gateway: String,
    pub timeouts: Timeouts,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_owned(),
            timeouts: Timeouts::default(),
        }
    }
}

impl PortalConfig {
    /// Build typed portal config from environment variables.
    ///
    /// Optional:
    /// - `PORTAL_BACKEND_URL`: default `http://127.0.0.1:5000`
    /// - `PORTAL_IPFS_GATEWAY`: default `https://ipfs.io/ipfs`
    /// - `PORTAL_REQUEST_TIMEOUT_SECS`: default 10
    /// - `PORTAL_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, PortalError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Same as [`PortalConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is not an absolute http(s) URL.
    pub fn from_lookup<F, E>(lookup: F) -> Result<Self, PortalError>
    where
        F: Fn(&str) -> Result<String, E>,
    {
        let backend_url = match lookup("PORTAL_BACKEND_URL") {
            Ok(url) => normalize_backend_url(&url)?,
            Err(_) => DEFAULT_BACKEND_URL.to_owned(),
        };
        let ipfs_gateway = match lookup("PORTAL_IPFS_GATEWAY") {
            Ok(gateway) => gateway.trim().trim_end_matches('/').to_owned(),
            Err(_) => DEFAULT_IPFS_GATEWAY.to_owned(),
        };
        let timeouts = Timeouts {
            request_secs: parse_secs(lookup("PORTAL_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_secs(lookup("PORTAL_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { backend_url, ipfs_gateway, timeouts })
    }

    /// Override the backend origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute http(s) URL.
    pub fn with_backend_url(mut self, url: &str) -> Result<Self, PortalError> {
        self.backend_url = normalize_backend_url(url)?;
        Ok(self)
    }

    /// Gateway link for a content identifier.
    #[must_use]
    pub fn ipfs_link(&self, cid: &str) -> String {
        format!("{}/{}", self.ipfs_gateway, cid)
    }
}

/// Seconds from an env value; unset, unparseable and zero all mean `default`.
fn parse_secs<E>(raw: Result<String, E>, default: u64) -> u64 {
    match raw.map(|value| value.trim().parse::<u64>()) {
        Ok(Ok(secs)) if secs > 0 => secs,
        _ => default,
    }
}

fn normalize_backend_url(raw: &str) -> Result<String, PortalError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|e| PortalError::Config(format!("invalid backend URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PortalError::Config(format!("backend URL must be http or https: {raw}")));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
