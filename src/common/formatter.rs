//! Placeholder substitution for invite text and server command templates.
//!
//! Supports placeholders: %actor, %endpoint, %host, %port

use crate::common::types::Endpoint;

/// Default invite text sent through the messaging capability.
pub const DEFAULT_INVITE_FORMAT: &str =
    "%actor, your invite is ready. Join the lobby and you will be moved to %endpoint.";

/// Default redirect command sequence executed on the game server.
pub const DEFAULT_REDIRECT_COMMANDS: [&str; 2] = [
    "say Redirecting %actor to %endpoint",
    "transfer \"%actor\" %host %port",
];

/// Template that substitutes placeholders for one actor.
#[derive(Debug, Clone)]
pub struct Template {
    format: String,
}

impl Template {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Substitute the placeholders:
    /// - `%actor` - the player being invited or redirected
    /// - `%endpoint` - the full target address
    /// - `%host` / `%port` - the target address split in two
    pub fn render(&self, ctx: &TemplateContext) -> String {
        // %actor last: player-chosen names are never rescanned.
        self.format
            .replace("%endpoint", &ctx.endpoint)
            .replace("%host", &ctx.host)
            .replace("%port", &ctx.port)
            .replace("%actor", &ctx.actor)
    }
}

/// Values available to a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub actor: String,
    pub endpoint: String,
    pub host: String,
    pub port: String,
}

impl TemplateContext {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: &Endpoint) -> Self {
        self.endpoint = endpoint.to_string();
        self.host = endpoint.host.clone();
        self.port = endpoint.port.to_string();
        self
    }

    /// Set only the display form of the endpoint.
    pub fn with_endpoint_text(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
