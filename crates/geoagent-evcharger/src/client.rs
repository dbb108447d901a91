//! HTTP client for the `OpenChargeMap` POI endpoint.

use geoagent_core::{AppConfig, ProviderClient, ProviderError, ProviderResult, ProviderSettings};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;

pub const PROVIDER_NAME: &str = "openchargemap";

/// Fixed page size; no pagination beyond this.
pub const MAX_RESULTS: u32 = 100;

/// Transport failures reach the protocol handler instead of being absorbed.
pub const PROPAGATE_PROVIDER_ERRORS: bool = true;

const API_KEY_HEADER: &str = "x-api-key";

pub struct OpenChargeMapClient {
    provider: ProviderClient,
    api_key: HeaderValue,
}

impl OpenChargeMapClient {
    /// # Errors
    ///
    /// - [`ProviderError::InvalidApiKey`] if `api_key` is not a valid header value.
    /// - [`ProviderError::Client`] / [`ProviderError::InvalidBaseUrl`] from
    ///   [`ProviderClient::new`].
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let provider = ProviderClient::new(&ProviderSettings {
            name: PROVIDER_NAME.to_owned(),
            base_url: base_url.to_owned(),
            timeout_secs,
            propagate_provider_errors: PROPAGATE_PROVIDER_ERRORS,
            user_agent: user_agent.to_owned(),
        })?;

        let mut api_key =
            HeaderValue::from_str(api_key).map_err(|_| ProviderError::InvalidApiKey {
                provider: PROVIDER_NAME.to_owned(),
            })?;
        api_key.set_sensitive(true);

        Ok(Self { provider, api_key })
    }

    /// # Errors
    ///
    /// See [`OpenChargeMapClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            &config.openchargemap_api_key,
            &config.openchargemap_api_url,
            config.openchargemap_timeout_secs,
            &config.user_agent,
        )
    }

    pub(crate) fn search_url(&self, latitude: f64, longitude: f64, miles_radius: f64) -> Url {
        self.provider.url(&[
            ("maxresults", &MAX_RESULTS.to_string()),
            ("latitude", &latitude.to_string()),
            ("longitude", &longitude.to_string()),
            ("distance", &miles_radius.to_string()),
        ])
    }

    /// Fetches stations within `miles_radius` of the point.
    ///
    /// A non-200 status yields [`ProviderResult::Empty`].
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Unavailable`] on network failure or timeout.
    /// - [`ProviderError::MalformedBody`] if a 200 body is not JSON.
    pub async fn fetch_chargers(
        &self,
        latitude: f64,
        longitude: f64,
        miles_radius: f64,
    ) -> Result<ProviderResult, ProviderError> {
        let url = self.search_url(latitude, longitude, miles_radius);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        self.provider.fetch(url, headers).await
    }
}
