#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, read once at startup and passed explicitly
/// to each adaptor constructor.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub user_agent: String,
    pub openchargemap_api_key: String,
    pub openchargemap_api_url: String,
    pub openchargemap_timeout_secs: u64,
    pub geoapify_api_key: String,
    pub geoapify_api_url: String,
    pub geoapify_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("openchargemap_api_key", &"[redacted]")
            .field("openchargemap_api_url", &self.openchargemap_api_url)
            .field(
                "openchargemap_timeout_secs",
                &self.openchargemap_timeout_secs,
            )
            .field("geoapify_api_key", &"[redacted]")
            .field("geoapify_api_url", &self.geoapify_api_url)
            .field("geoapify_timeout_secs", &self.geoapify_timeout_secs)
            .finish()
    }
}
