//! Car parking search adaptor backed by the Geoapify Places API.
//!
//! Agent identity `geoapi_parking_adaptor`, protocol `Geoapi CarParking`.
//! Provider failures are logged at the client and treated as "no results".

pub mod adaptor;
pub mod client;
pub mod normalize;
pub mod types;

pub use adaptor::{assemble_parking_reply, ParkingAdaptor, AGENT_NAME, HEADER, NO_OPTIONS_MESSAGE};
pub use client::{radius_meters, GeoapifyClient, METERS_PER_MILE};
pub use normalize::normalize_parking;
