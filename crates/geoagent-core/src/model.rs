//! Wire model shared by every adaptor: inbound requests, option lists, and
//! the reply envelope sent back to the orchestrator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RequestError;

/// Correlation id minted once per request and echoed in the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Option key: ordinal for charger results, an opaque (possibly empty)
/// string for parking results. Keys are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionKey {
    Ordinal(usize),
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: OptionKey,
    pub value: String,
}

/// The reply envelope. Exactly one is sent per inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    SelectFromOptions {
        options: Vec<KeyValue>,
        request_id: RequestId,
    },
    /// Successful request with nothing to choose from.
    Final {
        message: String,
        request_id: RequestId,
    },
    Error {
        message: String,
    },
}

impl Reply {
    #[must_use]
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Reply::SelectFromOptions { request_id, .. } | Reply::Final { request_id, .. } => {
                Some(*request_id)
            }
            Reply::Error { .. } => None,
        }
    }
}

/// Checked before any provider call; malformed values must not reach HTTP.
pub trait Validate {
    /// # Errors
    ///
    /// Returns [`RequestError::OutOfRange`] naming the first offending field.
    fn validate(&self) -> Result<(), RequestError>;
}

/// EV charger search around a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub miles_radius: f64,
}

impl Validate for EvRequest {
    fn validate(&self) -> Result<(), RequestError> {
        check_coordinates(self.latitude, self.longitude)?;
        check_radius("miles_radius", self.miles_radius)
    }
}

/// Car parking search around a point. `radius` is in miles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub max_result: u32,
}

impl Validate for ParkingRequest {
    fn validate(&self) -> Result<(), RequestError> {
        check_coordinates(self.latitude, self.longitude)?;
        check_radius("radius", self.radius)?;
        if self.max_result == 0 {
            return Err(RequestError::OutOfRange {
                field: "max_result",
                value: self.max_result.to_string(),
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), RequestError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(RequestError::OutOfRange {
            field: "latitude",
            value: latitude.to_string(),
            reason: "must be within [-90, 90]",
        });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(RequestError::OutOfRange {
            field: "longitude",
            value: longitude.to_string(),
            reason: "must be within [-180, 180]",
        });
    }
    Ok(())
}

fn check_radius(field: &'static str, radius: f64) -> Result<(), RequestError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(RequestError::OutOfRange {
            field,
            value: radius.to_string(),
            reason: "must be greater than 0",
        })
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
