//! Invite delivery.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::common::error::{DispatchError, DispatchResult};
use crate::common::formatter::{Template, TemplateContext};
use crate::dispatch::capability::Messenger;

/// Proof that an invite went out.
#[derive(Debug, Clone)]
pub struct InviteReceipt {
    pub actor: String,
    pub success: bool,
    pub sent_at: DateTime<Utc>,
}

/// Sends invite text to actors through the messaging capability.
///
/// Never retries; a failed send is returned as-is.
pub struct InviteDispatcher {
    messenger: Arc<dyn Messenger>,
    template: Template,
    target_endpoint: String,
}

impl InviteDispatcher {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        template: Template,
        target_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            messenger,
            template,
            target_endpoint: target_endpoint.into(),
        }
    }

    pub async fn send_invite(&self, actor: &str) -> DispatchResult<InviteReceipt> {
        if actor.trim().is_empty() {
            return Err(DispatchError::invalid("actor", "must not be empty"));
        }

        let ctx = TemplateContext::new(actor).with_endpoint_text(&self.target_endpoint);
        let message = self.template.render(&ctx);

        if let Err(e) = self.messenger.notify(actor, &message).await {
            warn!(actor = %actor, "Invite delivery failed: {}", e);
            return Err(e);
        }

        info!(actor = %actor, "Invite sent");
        Ok(InviteReceipt {
            actor: actor.to_string(),
            success: true,
            sent_at: Utc::now(),
        })
    }
}
