//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use std::net::SocketAddr;

use crate::common::error::ConfigError;
use crate::common::types::Endpoint;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.server.listen.parse::<SocketAddr>().is_err() {
        errors.push(format!(
            "server.listen '{}' is not a valid socket address",
            config.server.listen
        ));
    }

    // Validate redirect target
    if config.redirect.host.trim().is_empty() {
        errors.push("redirect.host is required".to_string());
    }
    if config.redirect.port == 0 {
        errors.push("redirect.port must be non-zero".to_string());
    }
    if let Err(e) = config.target_endpoint().parse::<Endpoint>() {
        errors.push(format!("redirect target: {}", e));
    }

    // Validate invite settings
    if config.invites.ttl_secs == 0 {
        errors.push("invites.ttl_secs must be non-zero".to_string());
    }
    if config.invites.sweep_interval_secs == 0 {
        errors.push("invites.sweep_interval_secs must be non-zero".to_string());
    }
    if config.invites.triggers.is_empty() {
        errors.push("invites.triggers is empty - no message would ever trigger an invite".to_string());
    }
    for (i, trigger) in config.invites.triggers.iter().enumerate() {
        if trigger.trim().is_empty() {
            errors.push(format!(
                "invites.triggers[{}] is blank and would match every message",
                i
            ));
        }
    }

    // Validate capabilities
    if let Some(ref url) = config.messaging.webhook_url {
        if !is_http_url(url) {
            errors.push(format!("messaging.webhook_url '{}' must be an http(s) URL", url));
        }
    }
    if let Some(ref url) = config.game.webhook_url {
        if !is_http_url(url) {
            errors.push(format!("game.webhook_url '{}' must be an http(s) URL", url));
        }
    }
    if config.game.commands.is_empty() {
        errors.push("game.commands is empty - redirects would do nothing".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
