//! Redirect command dispatch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::common::error::{DispatchError, DispatchResult};
use crate::common::formatter::{Template, TemplateContext};
use crate::common::types::Endpoint;
use crate::dispatch::capability::ServerCommands;

/// Proof that the redirect command sequence ran.
#[derive(Debug, Clone)]
pub struct RedirectReceipt {
    pub actor: String,
    pub endpoint: Endpoint,
    pub commands_sent: usize,
    pub success: bool,
    pub redirected_at: DateTime<Utc>,
}

/// Moves an actor to another server by running command templates.
pub struct RedirectDispatcher {
    server: Arc<dyn ServerCommands>,
    commands: Vec<Template>,
    settle_delay: Duration,
}

impl RedirectDispatcher {
    pub fn new(server: Arc<dyn ServerCommands>, commands: Vec<Template>) -> Self {
        Self {
            server,
            commands,
            settle_delay: Duration::ZERO,
        }
    }

    /// Wait this long before the first command, so a freshly joined player has loaded.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Run the redirect sequence for `actor`.
    ///
    /// A malformed endpoint fails before anything is sent. Commands run in
    /// order and the first failure aborts the rest.
    pub async fn redirect_actor(
        &self,
        actor: &str,
        target_endpoint: &str,
    ) -> DispatchResult<RedirectReceipt> {
        if actor.trim().is_empty() {
            return Err(DispatchError::invalid("actor", "must not be empty"));
        }
        let endpoint = self.server.translate(target_endpoint)?;

        if !self.settle_delay.is_zero() {
            debug!(actor = %actor, "Waiting {:?} before redirect", self.settle_delay);
            tokio::time::sleep(self.settle_delay).await;
        }

        let ctx = TemplateContext::new(actor).with_endpoint(&endpoint);
        let mut commands_sent = 0;
        for template in &self.commands {
            let command = template.render(&ctx);
            debug!(actor = %actor, "Executing: {}", command);
            if let Err(e) = self.server.execute(actor, &command).await {
                warn!(
                    actor = %actor,
                    sent = commands_sent,
                    "Redirect command failed: {}",
                    e
                );
                return Err(e);
            }
            commands_sent += 1;
        }

        info!(actor = %actor, endpoint = %endpoint, "Redirect issued");
        Ok(RedirectReceipt {
            actor: actor.to_string(),
            endpoint,
            commands_sent,
            success: true,
            redirected_at: Utc::now(),
        })
    }
}
