//! Dispatchers and the external capabilities they drive.
//!
//! ## Module Structure
//!
//! - `capability`: `Messenger` and `ServerCommands` traits
//! - `invite`: `InviteDispatcher` (invite delivery)
//! - `redirect`: `RedirectDispatcher` (server command sequence)
//! - `logging` / `webhook`: capability implementations

pub mod capability;
pub mod invite;
pub mod logging;
pub mod redirect;
pub mod webhook;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::common::error::DispatchResult;
use crate::common::formatter::Template;
use crate::config::types::Config;

pub use capability::{Messenger, ServerCommands};
pub use invite::InviteDispatcher;
pub use logging::{LoggingMessenger, LoggingServerCommands};
pub use redirect::RedirectDispatcher;
pub use webhook::{WebhookMessenger, WebhookServerCommands};

/// Build both dispatchers from configuration.
///
/// Capabilities without a webhook URL fall back to logging only.
pub fn dispatchers_from_config(
    config: &Config,
) -> DispatchResult<(InviteDispatcher, RedirectDispatcher)> {
    let messenger: Arc<dyn Messenger> = match config.messaging.webhook_url {
        Some(ref url) => {
            info!("Invites delivered via webhook {}", url);
            Arc::new(WebhookMessenger::new(
                url.clone(),
                Duration::from_secs(config.messaging.timeout_secs),
            )?)
        }
        None => {
            info!("No messaging webhook configured - invites will only be logged");
            Arc::new(LoggingMessenger)
        }
    };

    let server: Arc<dyn ServerCommands> = match config.game.webhook_url {
        Some(ref url) => {
            info!("Server commands sent via webhook {}", url);
            Arc::new(WebhookServerCommands::new(
                url.clone(),
                Duration::from_secs(config.game.timeout_secs),
            )?)
        }
        None => {
            info!("No game webhook configured - redirect commands will only be logged");
            Arc::new(LoggingServerCommands)
        }
    };

    let invites = InviteDispatcher::new(
        messenger,
        Template::new(config.invites.message.clone()),
        config.target_endpoint(),
    );
    let redirects = RedirectDispatcher::new(
        server,
        config.game.commands.iter().map(Template::new).collect(),
    )
    .with_settle_delay(Duration::from_millis(config.game.settle_delay_ms));

    Ok((invites, redirects))
}
