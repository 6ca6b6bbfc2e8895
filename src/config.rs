use std::path::PathBuf;
use std::time::Duration;

use crate::credentials;
use crate::error::Result;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    /// Deadline for each remote API call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Overrides `~/.terraformrc`.
    pub credentials_file: Option<PathBuf>,
    /// Overrides `https://<hostname>` as the API address.
    pub api_base_url: Option<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            credentials_file: None,
            api_base_url: None,
        }
    }
}

impl CheckOptions {
    pub fn credentials_path(&self) -> Result<PathBuf> {
        match &self.credentials_file {
            Some(path) => Ok(path.clone()),
            None => credentials::default_credentials_path(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }
}
