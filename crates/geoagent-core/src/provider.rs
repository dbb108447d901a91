//! Bounded-time HTTP client shared by every geodata provider.
//!
//! Each provider gets its own [`ProviderClient`] with its own timeout and
//! failure policy. A non-200 status always yields [`ProviderResult::Empty`].
//! Transport and body failures either propagate to the protocol handler or
//! are logged and absorbed into [`ProviderResult::Empty`], depending on
//! [`ProviderSettings::propagate_provider_errors`].

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode, Url};

use crate::error::ProviderError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Static, per-provider configuration. Built once at startup.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Used in logs and error messages.
    pub name: String,
    /// Full endpoint URL; query parameters are appended per call.
    pub base_url: String,
    pub timeout_secs: u64,
    /// `true`: transport/body failures surface as [`ProviderError`].
    /// `false`: they are logged and replaced by [`ProviderResult::Empty`].
    pub propagate_provider_errors: bool,
    pub user_agent: String,
}

/// Raw provider output, or the empty sentinel.
///
/// `Empty` means the call failed or returned a non-200 status. It is distinct
/// from a `Payload` that happens to contain zero entries.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResult {
    Empty,
    Payload(serde_json::Value),
}

impl ProviderResult {
    #[must_use]
    pub fn is_empty_sentinel(&self) -> bool {
        matches!(self, ProviderResult::Empty)
    }
}

pub struct ProviderClient {
    client: Client,
    name: String,
    base_url: Url,
    propagate_provider_errors: bool,
}

impl ProviderClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Client`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(
                CONNECT_TIMEOUT_SECS.min(settings.timeout_secs),
            ))
            .user_agent(&settings.user_agent)
            .build()
            .map_err(|source| ProviderError::Client {
                provider: settings.name.clone(),
                source,
            })?;

        let base_url =
            Url::parse(&settings.base_url).map_err(|e| ProviderError::InvalidBaseUrl {
                provider: settings.name.clone(),
                url: settings.base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            name: settings.name.clone(),
            base_url,
            propagate_provider_errors: settings.propagate_provider_errors,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn propagates_errors(&self) -> bool {
        self.propagate_provider_errors
    }

    /// Builds the request URL with percent-encoded query parameters appended
    /// to the configured endpoint, in the order given.
    #[must_use]
    pub fn url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Issues one GET and applies this provider's failure policy.
    ///
    /// # Errors
    ///
    /// Only when `propagate_provider_errors` is set:
    /// - [`ProviderError::Unavailable`] on network failure or timeout.
    /// - [`ProviderError::MalformedBody`] if a 200 body is not valid JSON.
    pub async fn fetch(
        &self,
        url: Url,
        headers: HeaderMap,
    ) -> Result<ProviderResult, ProviderError> {
        match self.request(url, headers).await {
            Ok(result) => Ok(result),
            Err(err) if self.propagate_provider_errors => Err(err),
            Err(err) => {
                tracing::error!(
                    provider = %self.name,
                    error = %err,
                    "provider call failed; continuing with empty result"
                );
                Ok(ProviderResult::Empty)
            }
        }
    }

    async fn request(
        &self,
        url: Url,
        headers: HeaderMap,
    ) -> Result<ProviderResult, ProviderError> {
        let path = url.path().to_owned();
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|source| self.unavailable(source))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                provider = %self.name,
                path = %path,
                status = status.as_u16(),
                "provider returned non-success status"
            );
            return Ok(ProviderResult::Empty);
        }

        let body = response
            .text()
            .await
            .map_err(|source| self.unavailable(source))?;
        let payload = serde_json::from_str(&body).map_err(|source| ProviderError::MalformedBody {
            provider: self.name.clone(),
            source,
        })?;
        tracing::debug!(provider = %self.name, path = %path, bytes = body.len(), "provider responded");
        Ok(ProviderResult::Payload(payload))
    }

    fn unavailable(&self, source: reqwest::Error) -> ProviderError {
        ProviderError::Unavailable {
            provider: self.name.clone(),
            source,
        }
    }
}
