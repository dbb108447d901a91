//! HTTP client for the Geoapify Places endpoint.

use geoagent_core::{AppConfig, ProviderClient, ProviderError, ProviderResult, ProviderSettings};
use reqwest::header::HeaderMap;
use reqwest::Url;

pub const PROVIDER_NAME: &str = "geoapify";

/// Transport failures are logged here and become an empty result.
pub const PROPAGATE_PROVIDER_ERRORS: bool = false;

/// Conversion factor applied to the inbound radius before querying.
pub const METERS_PER_MILE: f64 = 1609.0;

#[must_use]
pub fn radius_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

pub struct GeoapifyClient {
    provider: ProviderClient,
    api_key: String,
}

impl GeoapifyClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Client`] / [`ProviderError::InvalidBaseUrl`]
    /// from [`ProviderClient::new`].
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
        Ok(Self {
            provider,
            api_key: api_key.to_owned(),
        })
    }

    /// # Errors
    ///
    /// See [`GeoapifyClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            &config.geoapify_api_key,
            &config.geoapify_api_url,
            config.geoapify_timeout_secs,
            &config.user_agent,
        )
    }

    pub(crate) fn search_url(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        limit: u32,
    ) -> Url {
        self.provider.url(&[
            ("categories", "parking"),
            (
                "filter",
                &format!("circle:{longitude},{latitude},{radius_meters}"),
            ),
            ("bias", &format!("proximity:{longitude},{latitude}")),
            ("limit", &limit.to_string()),
            ("apiKey", &self.api_key),
        ])
    }

    /// Fetches parking places within `radius_meters` of the point, nearest first.
    ///
    /// Never fails: non-200 statuses and transport errors both come back as
    /// [`ProviderResult::Empty`].
    ///
    /// # Errors
    ///
    /// Only if the client was built to propagate failures, which
    /// [`GeoapifyClient::new`] never does.
    pub async fn fetch_parking(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        limit: u32,
    ) -> Result<ProviderResult, ProviderError> {
        let url = self.search_url(latitude, longitude, radius_meters, limit);
        self.provider.fetch(url, HeaderMap::new()).await
    }
}
