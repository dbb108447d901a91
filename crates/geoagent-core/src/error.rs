use thiserror::Error;

/// Startup configuration errors. Fatal: the process exits before serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// An inbound request failed validation and never reached the provider.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid {field} {value}: {reason}")]
    OutOfRange {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Errors raised at the provider client boundary.
///
/// Only surfaced when the provider is configured to propagate failures;
/// otherwise the client logs them and hands back an empty result.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying `reqwest::Client` could not be constructed.
    #[error("failed to build HTTP client for {provider}: {source}")]
    Client {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid base URL '{url}' for {provider}: {reason}")]
    InvalidBaseUrl {
        provider: String,
        url: String,
        reason: String,
    },

    /// The API key cannot be carried in an HTTP header.
    #[error("invalid API key header for {provider}")]
    InvalidApiKey { provider: String },

    /// Network, TLS or timeout failure.
    #[error("{provider} unavailable: {source}")]
    Unavailable {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 response whose body is not valid JSON.
    #[error("{provider} returned a malformed body: {source}")]
    MalformedBody {
        provider: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The provider payload did not have the shape the normalizer expects.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed provider response: {context}")]
    MalformedProviderResponse { context: String },
}

impl NormalizeError {
    #[must_use]
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedProviderResponse {
            context: context.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to deliver reply to {to}: {reason}")]
pub struct SendError {
    pub to: String,
    pub reason: String,
}

/// Anything that turns a request into an error reply.
///
/// The `Display` output is used verbatim as the error reply message.
#[derive(Debug, Error)]
pub enum AdaptorError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
