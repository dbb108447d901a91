use geoagent_core::{
    Adaptor, AppConfig, EvRequest, KeyValue, NormalizeError, OptionKey, ProviderError,
    ProviderResult, Reply, RequestId,
};

use crate::client::OpenChargeMapClient;
use crate::normalize::{normalize_chargers, ChargerLine};

pub const AGENT_NAME: &str = "ev_adaptor";

pub struct EvChargerAdaptor {
    client: OpenChargeMapClient,
}

impl EvChargerAdaptor {
    #[must_use]
    pub fn new(client: OpenChargeMapClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ProviderError`] if the `OpenChargeMap` client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        OpenChargeMapClient::from_config(config).map(Self::new)
    }
}

/// Always an options reply, even when no station matched.
///
/// Each option is keyed by its station's position in the provider payload,
/// so keys skip the slots of stations that produced no line.
#[must_use]
pub fn assemble_options(lines: Vec<ChargerLine>, request_id: RequestId) -> Reply {
    let options = lines
        .into_iter()
        .map(|line| KeyValue {
            key: OptionKey::Ordinal(line.index),
            value: line.text,
        })
        .collect();
    Reply::SelectFromOptions {
        options,
        request_id,
    }
}

impl Adaptor for EvChargerAdaptor {
    type Request = EvRequest;
    type Line = ChargerLine;
    const PROTOCOL: &'static str = "EvChargers";

    async fn query(&self, request: &EvRequest) -> Result<ProviderResult, ProviderError> {
        tracing::debug!(
            latitude = request.latitude,
            longitude = request.longitude,
            miles_radius = request.miles_radius,
            "querying OpenChargeMap for chargers"
        );
        self.client
            .fetch_chargers(request.latitude, request.longitude, request.miles_radius)
            .await
    }

    fn normalize(&self, result: &ProviderResult) -> Result<Vec<ChargerLine>, NormalizeError> {
        normalize_chargers(result)
    }

    fn assemble(&self, lines: Vec<ChargerLine>, request_id: RequestId) -> Reply {
        assemble_options(lines, request_id)
    }
}
