//! `OpenChargeMap` POI response types.
//!
//! Only the fields the normalizer reads are modelled; everything else in the
//! payload is ignored. Field names follow the API's `PascalCase`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One charging station (a "POI" in `OpenChargeMap` terms).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChargePoint {
    pub address_info: AddressInfo,
    /// Usually free text, sometimes a bare number, `null` when the operator
    /// did not publish it. The key itself must be present.
    #[serde(deserialize_with = "required_value")]
    pub usage_cost: Value,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressInfo {
    pub title: String,
    /// Distance from the query point, in the unit of the request (miles).
    pub distance: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Connection {
    pub connection_type: ConnectionType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionType {
    pub title: String,
}

/// Plain `Value` fields fall back to `null` when the key is absent; going
/// through `deserialize_with` makes serde report the missing field instead.
fn required_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer)
}
