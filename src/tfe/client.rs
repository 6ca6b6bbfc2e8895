use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::TfeError;
use super::types::{Document, Entitlements, ErrorDocument, JSON_API_MEDIA_TYPE, Workspace};

const API_PATH: &str = "/api/v2";

#[derive(Clone)]
pub struct TfeClient {
    client: reqwest::Client,
    base_url: String,
}

impl TfeClient {
    /// Client for `https://<hostname>`.
    pub fn new(hostname: &str, token: &str, timeout: Option<Duration>) -> Result<Self, TfeError> {
        Self::with_base_url(format!("https://{}", hostname), token, timeout)
    }

    /// NOTE: Used for API address overrides and mock servers in tests.
    pub fn with_base_url(
        base_url: String,
        token: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TfeError> {
        if token.trim().is_empty() {
            return Err(TfeError::Auth {
                message: "missing API token".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            TfeError::Auth {
                message: "Invalid token format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, header_value);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TfeError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    /// `Ok(None)` means the API answered 2xx with an empty `data` member.
    pub async fn entitlements(
        &self,
        organization: &str,
    ) -> Result<Option<Entitlements>, TfeError> {
        let url = format!(
            "{}{}/organizations/{}/entitlement-set",
            self.base_url,
            API_PATH,
            urlencoding::encode(organization)
        );
        self.get_document(&url, || format!("organization '{}'", organization))
            .await
    }

    pub async fn workspace(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<Option<Workspace>, TfeError> {
        let url = format!(
            "{}{}/organizations/{}/workspaces/{}",
            self.base_url,
            API_PATH,
            urlencoding::encode(organization),
            urlencoding::encode(name)
        );
        self.get_document(&url, || format!("workspace '{}/{}'", organization, name))
            .await
    }

    async fn get_document<T, F>(&self, url: &str, describe: F) -> Result<Option<T>, TfeError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> String,
    {
        tracing::trace!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(TfeError::NotFound {
                resource: describe(),
            });
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorDocument>(&body)
                .ok()
                .and_then(|doc| doc.first_message())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(TfeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let document: Document<T> =
            serde_json::from_str(&body).map_err(|e| TfeError::Decode {
                message: format!("Failed to parse response: {}", e),
            })?;

        Ok(document.into_attributes())
    }
}

impl std::fmt::Debug for TfeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfeClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
