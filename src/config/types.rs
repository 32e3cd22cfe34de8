//! Configuration type definitions.

use std::time::Duration;

use serde::Deserialize;

use crate::common::formatter::{DEFAULT_INVITE_FORMAT, DEFAULT_REDIRECT_COMMANDS};
use crate::common::types::Endpoint;

/// Default trigger tokens recognised in chat messages.
pub const DEFAULT_TRIGGERS: [&str; 7] = ["invite", "join", "inv", "redirect", "connect", "!invite", "!join"];

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub redirect: RedirectConfig,
    #[serde(default)]
    pub invites: InviteConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Server players are redirected to.
#[derive(Debug, Clone, Deserialize)]
pub struct RedirectConfig {
    pub host: String,
    pub port: u16,
}

/// Pending invite lifetime and trigger detection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Seconds a pending invite stays matchable.
    pub ttl_secs: u64,
    /// Seconds between expiry sweeps.
    pub sweep_interval_secs: u64,
    /// Tokens that mark a chat message as an invite request.
    pub triggers: Vec<String>,
    /// Invite text, supports %actor and %endpoint.
    pub message: String,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            sweep_interval_secs: 30,
            triggers: DEFAULT_TRIGGERS.iter().map(|t| t.to_string()).collect(),
            message: DEFAULT_INVITE_FORMAT.to_string(),
        }
    }
}

/// Messaging capability (invite delivery).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Webhook receiving `{actor, message}`. Invites are only logged when unset.
    pub webhook_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 10,
        }
    }
}

/// Game server command capability (redirects).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Webhook receiving `{actor, command}`. Commands are only logged when unset.
    pub webhook_url: Option<String>,
    pub timeout_secs: u64,
    /// Wait after the join before issuing commands, so the player has loaded in.
    pub settle_delay_ms: u64,
    /// Command templates, supports %actor, %endpoint, %host and %port.
    pub commands: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 10,
            settle_delay_ms: 0,
            commands: DEFAULT_REDIRECT_COMMANDS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Target endpoint in `host:port` form as stored in pending invites.
    pub fn target_endpoint(&self) -> String {
        Endpoint::new(self.redirect.host.clone(), self.redirect.port).to_string()
    }

    pub fn invite_ttl(&self) -> Duration {
        Duration::from_secs(self.invites.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.invites.sweep_interval_secs)
    }
}
