use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_OPENCHARGEMAP_API_URL: &str = "https://api.openchargemap.io/v3/poi";
pub const DEFAULT_GEOAPIFY_API_URL: &str = "https://api.geoapify.com/v2/places";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Core parsing/validation logic, decoupled from the real environment so it
/// can be tested with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // An empty key is as good as no key.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be at least 1 second".to_string(),
            });
        }
        Ok(secs)
    };

    let openchargemap_api_key = require("OPENCHARGEMAP_API_KEY")?;
    let geoapify_api_key = require("GEOAPI_API_KEY")?;

    let env = parse_environment(&or_default("GEOAGENT_ENV", "development"));
    let log_level = or_default("GEOAGENT_LOG_LEVEL", "info");
    let user_agent = or_default("GEOAGENT_USER_AGENT", "geoagent/0.1 (location-adaptor)");

    let openchargemap_api_url = or_default("OPENCHARGEMAP_API_URL", DEFAULT_OPENCHARGEMAP_API_URL);
    let openchargemap_timeout_secs = parse_timeout("OPENCHARGEMAP_TIMEOUT_SECS", "5")?;
    let geoapify_api_url = or_default("GEOAPI_API_URL", DEFAULT_GEOAPIFY_API_URL);
    let geoapify_timeout_secs = parse_timeout("GEOAPI_TIMEOUT_SECS", "60")?;

    Ok(AppConfig {
        env,
        log_level,
        user_agent,
        openchargemap_api_key,
        openchargemap_api_url,
        openchargemap_timeout_secs,
        geoapify_api_key,
        geoapify_api_url,
        geoapify_timeout_secs,
    })
}

/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
