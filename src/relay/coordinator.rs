//! Invite-to-redirect coordinator.
//!
//! Drives one actor through `NONE -> PENDING -> NONE`:
//!
//! - a chat message containing a trigger sends an invite, and only a
//!   delivered invite records a pending entry;
//! - a join consumes the pending entry *before* the redirect is dispatched,
//!   so concurrent joins for the same actor redirect at most once;
//! - entries older than the TTL count as absent and are swept periodically.
//!
//! Dispatch failures are reported in the outcome and never retried here.

use tracing::{debug, info, warn};

use crate::common::error::{DispatchError, RelayError};
use crate::common::messages::{JoinOutcome, MessageOutcome, PendingSummary};
use crate::config::types::Config;
use crate::dispatch::{dispatchers_from_config, InviteDispatcher, RedirectDispatcher};

use super::registry::{InviteRegistry, PendingInvite};
use super::trigger::TriggerClassifier;

/// Owns the pending invite registry and both dispatchers.
pub struct Coordinator {
    classifier: TriggerClassifier,
    registry: InviteRegistry,
    invites: InviteDispatcher,
    redirects: RedirectDispatcher,
    target_endpoint: String,
}

impl Coordinator {
    pub fn new(
        classifier: TriggerClassifier,
        registry: InviteRegistry,
        invites: InviteDispatcher,
        redirects: RedirectDispatcher,
        target_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            registry,
            invites,
            redirects,
            target_endpoint: target_endpoint.into(),
        }
    }

    /// Create a coordinator from configuration.
    pub fn from_config(config: &Config) -> Result<Self, DispatchError> {
        let (invites, redirects) = dispatchers_from_config(config)?;
        Ok(Self::new(
            TriggerClassifier::new(&config.invites.triggers),
            InviteRegistry::new(config.invite_ttl()),
            invites,
            redirects,
            config.target_endpoint(),
        ))
    }

    /// Handle a chat message from `actor`.
    pub async fn on_message(&self, actor: &str, text: &str) -> Result<MessageOutcome, RelayError> {
        validate_actor(actor)?;

        if !self.classifier.is_invite_trigger(text) {
            debug!(actor = %actor, "No invite trigger in message");
            return Ok(MessageOutcome::not_triggered());
        }
        info!(actor = %actor, "Invite trigger detected");

        // Dispatch outside any registry lock; a failed send leaves the actor at NONE.
        let receipt = match self.invites.send_invite(actor).await {
            Ok(receipt) => receipt,
            Err(e) => return Ok(MessageOutcome::failed(e.to_string())),
        };

        let invite = PendingInvite::new(receipt.actor.as_str(), self.target_endpoint.clone());
        if self.registry.insert(invite).is_some() {
            debug!(actor = %actor, "Replaced earlier pending invite");
        }
        info!(
            actor = %receipt.actor,
            success = receipt.success,
            sent_at = %receipt.sent_at,
            "Invite pending"
        );

        Ok(MessageOutcome::sent(self.target_endpoint.clone()))
    }

    /// Handle `actor` joining the lobby server.
    pub async fn on_join(&self, actor: &str) -> Result<JoinOutcome, RelayError> {
        validate_actor(actor)?;

        // The hand-off: whoever removes the entry owns the redirect.
        let Some(invite) = self.registry.take(actor) else {
            debug!(actor = %actor, "Join without pending invite");
            return Ok(JoinOutcome::no_pending());
        };

        info!(
            actor = %actor,
            endpoint = %invite.target_endpoint,
            "Redirecting joined player"
        );

        match self
            .redirects
            .redirect_actor(actor, &invite.target_endpoint)
            .await
        {
            Ok(receipt) => {
                info!(
                    actor = %receipt.actor,
                    endpoint = %receipt.endpoint,
                    commands = receipt.commands_sent,
                    success = receipt.success,
                    redirected_at = %receipt.redirected_at,
                    "Invite fulfilled"
                );
                Ok(JoinOutcome::redirected(invite.target_endpoint))
            }
            Err(e) => {
                warn!(actor = %actor, "Redirect failed, invite is consumed: {}", e);
                Ok(JoinOutcome::failed(invite.target_endpoint, e.to_string()))
            }
        }
    }

    /// Live pending invites, oldest first.
    pub fn list_pending(&self) -> Vec<PendingSummary> {
        self.registry.snapshot()
    }

    /// Remove expired invites. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        self.registry.prune_expired()
    }
}

/// Actor names are interpolated into quoted server command arguments, so
/// quotes, backslashes and control characters are refused along with empty names.
fn validate_actor(actor: &str) -> Result<(), RelayError> {
    if actor.trim().is_empty() {
        return Err(RelayError::invalid("actor", "must not be empty"));
    }
    if actor.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
        return Err(RelayError::invalid(
            "actor",
            "must not contain quotes, backslashes or control characters",
        ));
    }
    Ok(())
}
