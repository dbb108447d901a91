//! EV charger search adaptor backed by the `OpenChargeMap` POI API.
//!
//! Agent identity `ev_adaptor`, protocol `EvChargers`. Provider failures
//! propagate to the protocol handler and come back as an error reply.

pub mod adaptor;
pub mod client;
pub mod normalize;
pub mod types;

pub use adaptor::{assemble_options, EvChargerAdaptor, AGENT_NAME};
pub use client::OpenChargeMapClient;
pub use normalize::{normalize_chargers, ChargerLine};
