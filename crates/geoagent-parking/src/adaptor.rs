use geoagent_core::{
    Adaptor, AppConfig, KeyValue, NormalizeError, OptionKey, ParkingRequest, ProviderError,
    ProviderResult, Reply, RequestId,
};

use crate::client::{radius_meters, GeoapifyClient};
use crate::normalize::normalize_parking;

pub const AGENT_NAME: &str = "geoapi_parking_adaptor";

pub const HEADER: &str = "Here is the list of some Parking spaces nearby:\n";
pub const NO_OPTIONS_MESSAGE: &str = "No options available for this context";

pub struct ParkingAdaptor {
    client: GeoapifyClient,
}

impl ParkingAdaptor {
    #[must_use]
    pub fn new(client: GeoapifyClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ProviderError`] if the Geoapify client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        GeoapifyClient::from_config(config).map(Self::new)
    }
}

/// Options reply with a header only when more than one place was found;
/// a single place (or none) gets the final "no options" reply.
///
/// Every option, header included, has the same empty key.
#[must_use]
pub fn assemble_parking_reply(lines: Vec<String>, request_id: RequestId) -> Reply {
    if lines.len() <= 1 {
        return Reply::Final {
            message: NO_OPTIONS_MESSAGE.to_owned(),
            request_id,
        };
    }

    let options = std::iter::once(HEADER.to_owned())
        .chain(lines)
        .map(|value| KeyValue {
            key: OptionKey::Opaque(String::new()),
            value,
        })
        .collect();
    Reply::SelectFromOptions {
        options,
        request_id,
    }
}

impl Adaptor for ParkingAdaptor {
    type Request = ParkingRequest;
    type Line = String;
    const PROTOCOL: &'static str = "Geoapi CarParking";

    async fn query(&self, request: &ParkingRequest) -> Result<ProviderResult, ProviderError> {
        let radius_m = radius_meters(request.radius);
        tracing::debug!(
            latitude = request.latitude,
            longitude = request.longitude,
            radius_m,
            limit = request.max_result,
            "querying Geoapify for parking"
        );
        self.client
            .fetch_parking(
                request.latitude,
                request.longitude,
                radius_m,
                request.max_result,
            )
            .await
    }

    fn normalize(&self, result: &ProviderResult) -> Result<Vec<String>, NormalizeError> {
        normalize_parking(result)
    }

    fn assemble(&self, lines: Vec<String>, request_id: RequestId) -> Reply {
        assemble_parking_reply(lines, request_id)
    }
}
