//! Shared building blocks for the geodata adaptors.
//!
//! Holds the request/reply wire model, the provider HTTP client with its
//! per-provider failure policy, and the generic protocol handler that drives
//! one inbound request through query, normalization and reply.

pub mod app_config;
pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod provider;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{
    AdaptorError, ConfigError, NormalizeError, ProviderError, RequestError, SendError,
};
pub use model::{EvRequest, KeyValue, OptionKey, ParkingRequest, Reply, RequestId, Validate};
pub use protocol::{handle_message, Adaptor, ChannelSink, Outbound, ReplySink};
pub use provider::{ProviderClient, ProviderResult, ProviderSettings};
