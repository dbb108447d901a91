//! Converts a Geoapify Places payload into display lines.

use geoagent_core::{NormalizeError, ProviderResult};
use serde::Deserialize;
use serde_json::Value;

use crate::types::{PlaceProperties, PlacesResponse};

const UNKNOWN_NAME: &str = "Unknown Parking";

/// Display fields carried from one feature to the next.
///
/// Neither field is reset per feature: a place without a `name` shows the
/// previous place's name, and a place without capacity tags shows the
/// previous place's capacity.
#[derive(Debug)]
struct Carried {
    name: String,
    capacity: String,
}

impl Default for Carried {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_owned(),
            capacity: String::new(),
        }
    }
}

/// Normalizes the feature collection into one line per retained place.
///
/// Places with neither a name nor a formatted address are dropped, as are
/// places without capacity tags whose `access` tag is anything but `"yes"`.
/// The empty sentinel yields no lines.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedProviderResponse`] if the payload has no
/// `features` array, or a retained place lacks the fields needed to format it.
pub fn normalize_parking(result: &ProviderResult) -> Result<Vec<String>, NormalizeError> {
    let ProviderResult::Payload(payload) = result else {
        return Ok(Vec::new());
    };

    let response = PlacesResponse::deserialize(payload)
        .map_err(|e| NormalizeError::malformed(format!("Geoapify places: {e}")))?;

    let mut carried = Carried::default();
    let mut lines = Vec::new();
    for (idx, feature) in response.features.iter().enumerate() {
        let props = &feature.properties;

        let address = match (&props.name, &props.formatted) {
            (Some(name), Some(formatted)) => {
                carried.name = name_text(name);
                drop_first_segment(formatted)
            }
            (Some(_), None) => {
                return Err(NormalizeError::malformed(format!(
                    "feature {idx} has a name but no formatted address"
                )));
            }
            (None, Some(formatted)) => formatted.clone(),
            (None, None) => continue,
        };

        let raw = raw_tags(props, idx)?;
        if let Some(capacity) = raw.get("capacity") {
            carried.capacity = format!("{} spaces", tag_text(capacity));
        } else if let Some(parking) = raw.get("parking") {
            carried.capacity = format!("{} parking", tag_text(parking));
        } else if raw.get("access").is_some_and(|access| access != "yes") {
            continue;
        }

        lines.push(format!(
            "● Car Parking: {} has {} at {}",
            carried.name, carried.capacity, address
        ));
    }
    Ok(lines)
}

/// `"Lot A, 1 Main St, Springfield"` -> `" 1 Main St Springfield"`.
///
/// Remaining segments are concatenated as-is, keeping their leading spaces.
fn drop_first_segment(formatted: &str) -> String {
    formatted.split(',').skip(1).collect()
}

fn raw_tags(
    props: &PlaceProperties,
    idx: usize,
) -> Result<&serde_json::Map<String, Value>, NormalizeError> {
    props
        .datasource
        .as_ref()
        .map(|d| &d.raw)
        .ok_or_else(|| NormalizeError::malformed(format!("feature {idx} has no datasource.raw")))
}

/// A present but null `name` still counts as named; it resets to the default.
fn name_text(value: &Value) -> String {
    match value {
        Value::Null => UNKNOWN_NAME.to_owned(),
        other => tag_text(other),
    }
}

fn tag_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
