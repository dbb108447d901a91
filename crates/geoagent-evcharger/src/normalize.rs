//! Converts an `OpenChargeMap` POI payload into display lines.

use geoagent_core::{NormalizeError, ProviderResult};
use serde::Deserialize;
use serde_json::Value;

use crate::types::ChargePoint;

const UNKNOWN_COST: &str = "unknown";

/// Connection-type titles collected during one normalization pass.
///
/// Shared by every station in the payload and never reset, so each station's
/// line lists its own connection types after those of all earlier stations.
#[derive(Debug, Default)]
struct ConnectionTypes(Vec<String>);

impl ConnectionTypes {
    fn extend_from(&mut self, station: &ChargePoint) {
        self.0.extend(
            station
                .connections
                .iter()
                .map(|c| c.connection_type.title.clone()),
        );
    }

    fn joined(&self) -> String {
        self.0.join(", ")
    }
}

/// One station's display text, tagged with its position in the provider
/// payload. The position becomes the option key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargerLine {
    pub index: usize,
    pub text: String,
}

/// Normalizes the raw POI array into one line per station.
///
/// Stations without connections produce no line, but keep their slot in the
/// payload numbering. The empty sentinel yields no lines. Input order is
/// preserved.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedProviderResponse`] if the payload is not
/// an array of stations with the expected fields.
pub fn normalize_chargers(result: &ProviderResult) -> Result<Vec<ChargerLine>, NormalizeError> {
    let ProviderResult::Payload(payload) = result else {
        return Ok(Vec::new());
    };

    let stations = Vec::<ChargePoint>::deserialize(payload)
        .map_err(|e| NormalizeError::malformed(format!("OpenChargeMap POI list: {e}")))?;

    let mut seen = ConnectionTypes::default();
    let mut lines = Vec::with_capacity(stations.len());
    for (index, station) in stations.iter().enumerate() {
        if station.connections.is_empty() {
            continue;
        }
        seen.extend_from(station);
        lines.push(ChargerLine {
            index,
            text: format_station(station, &seen.joined()),
        });
    }
    Ok(lines)
}

/// Distance always carries two decimals; whole numbers are zero padded
/// on purpose (`12.00`, not `12.0`).
fn format_station(station: &ChargePoint, connection_types: &str) -> String {
    let cost = cost_text(&station.usage_cost);
    format!(
        "● EV charger: {} , located {:.2} miles from your location\n● Usage cost {};\n● Type - {}",
        station.address_info.title, station.address_info.distance, cost, connection_types
    )
}

fn cost_text(cost: &Value) -> String {
    match cost {
        Value::Null => UNKNOWN_COST.to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
