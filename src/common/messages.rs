//! Canonical result types returned by the relay core.
//!
//! These are the shapes the embedding transport hands back to its callers,
//! so they serialise in camelCase and omit absent optional fields.

use serde::Serialize;

/// Result of feeding one chat message into the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOutcome {
    /// The message contained an invite trigger.
    pub triggered: bool,
    /// The invite was delivered and a pending invite recorded.
    pub invite_sent: bool,
    /// Where the actor will be redirected once they join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_endpoint: Option<String>,
    /// Dispatch failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageOutcome {
    pub fn not_triggered() -> Self {
        Self::default()
    }

    pub fn sent(target_endpoint: impl Into<String>) -> Self {
        Self {
            triggered: true,
            invite_sent: true,
            target_endpoint: Some(target_endpoint.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            triggered: true,
            invite_sent: false,
            target_endpoint: None,
            error: Some(error.into()),
        }
    }
}

/// Result of a player-join event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinOutcome {
    /// A pending invite existed and was consumed by this join.
    pub had_pending: bool,
    /// The redirect dispatch succeeded.
    pub redirected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JoinOutcome {
    pub fn no_pending() -> Self {
        Self::default()
    }

    pub fn redirected(target_endpoint: impl Into<String>) -> Self {
        Self {
            had_pending: true,
            redirected: true,
            target_endpoint: Some(target_endpoint.into()),
            error: None,
        }
    }

    pub fn failed(target_endpoint: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            had_pending: true,
            redirected: false,
            target_endpoint: Some(target_endpoint.into()),
            error: Some(error.into()),
        }
    }
}

/// One row of the pending-invite listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSummary {
    pub actor: String,
    pub target_endpoint: String,
    pub age_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_serialise_camel_case_without_empty_fields() {
        let json = serde_json::to_value(MessageOutcome::not_triggered()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "triggered": false, "inviteSent": false })
        );

        let json = serde_json::to_value(JoinOutcome::redirected("10.0.0.5:19132")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hadPending": true,
                "redirected": true,
                "targetEndpoint": "10.0.0.5:19132"
            })
        );
    }

    #[test]
    fn test_pending_summary_field_names() {
        let row = PendingSummary {
            actor: "Steve".to_string(),
            target_endpoint: "10.0.0.5:19132".to_string(),
            age_ms: 12,
        };
        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["targetEndpoint"], "10.0.0.5:19132");
        assert_eq!(json["ageMs"], 12);
    }
}
