//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `WAYSTONE_LISTEN` - HTTP bind address
//! - `WAYSTONE_REDIRECT_HOST` - Redirect target host
//! - `WAYSTONE_REDIRECT_PORT` - Redirect target port
//! - `WAYSTONE_INVITE_TTL_SECS` - Pending invite lifetime
//! - `WAYSTONE_MESSAGING_WEBHOOK_URL` - Invite delivery webhook
//! - `WAYSTONE_GAME_WEBHOOK_URL` - Server command webhook

use std::env;

use tracing::warn;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "WAYSTONE";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, |name| env::var(format!("{}_{}", ENV_PREFIX, name)).ok())
}

/// Apply overrides using `lookup` to resolve un-prefixed variable names.
fn apply_overrides_from(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(listen) = lookup("LISTEN") {
        config.server.listen = listen;
    }

    // Redirect target
    if let Some(host) = lookup("REDIRECT_HOST") {
        config.redirect.host = host;
    }
    if let Some(port) = lookup("REDIRECT_PORT") {
        match port.parse() {
            Ok(port) => config.redirect.port = port,
            Err(_) => warn!("Ignoring {}_REDIRECT_PORT: '{}' is not a port", ENV_PREFIX, port),
        }
    }

    if let Some(ttl) = lookup("INVITE_TTL_SECS") {
        match ttl.parse() {
            Ok(ttl) => config.invites.ttl_secs = ttl,
            Err(_) => warn!("Ignoring {}_INVITE_TTL_SECS: '{}' is not a number", ENV_PREFIX, ttl),
        }
    }

    // Capability webhooks
    if let Some(url) = lookup("MESSAGING_WEBHOOK_URL") {
        config.messaging.webhook_url = Some(url);
    }
    if let Some(url) = lookup("GAME_WEBHOOK_URL") {
        config.game.webhook_url = Some(url);
    }

    config
}

/// Check if any override variables are set but empty.
///
/// Returns a list of variable names that are set but empty.
pub fn check_empty_env_vars() -> Vec<String> {
    let vars = [
        format!("{}_REDIRECT_HOST", ENV_PREFIX),
        format!("{}_MESSAGING_WEBHOOK_URL", ENV_PREFIX),
        format!("{}_GAME_WEBHOOK_URL", ENV_PREFIX),
    ];

    vars.into_iter()
        .filter(|var| env::var(var).map(|v| v.is_empty()).unwrap_or(false))
        .collect()
}

/// Get the config file path from environment or use default.
///
/// Checks `WAYSTONE_CONFIG` environment variable, otherwise returns "waystone.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "waystone.conf".to_string())
}
