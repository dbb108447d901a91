//! Geoapify Places response types (GeoJSON feature collection).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub properties: PlaceProperties,
}

#[derive(Debug, Deserialize)]
pub struct PlaceProperties {
    /// `Some` whenever the key is present, including `"name": null`.
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    /// Full postal address, comma separated, name first when the place has one.
    #[serde(default)]
    pub formatted: Option<String>,
    /// Only read for places that have a name or an address.
    #[serde(default)]
    pub datasource: Option<Datasource>,
}

#[derive(Debug, Deserialize)]
pub struct Datasource {
    /// Upstream OSM tags, untyped (`capacity`, `parking`, `access`, ...).
    pub raw: serde_json::Map<String, Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
