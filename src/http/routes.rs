//! HTTP routes feeding chat and join events into the coordinator.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::common::error::RelayError;
use crate::common::messages::{JoinOutcome, MessageOutcome, PendingSummary};
use crate::relay::Coordinator;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
}

/// `POST /api/message` body.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub gamertag: Option<String>,
    pub message: Option<String>,
}

/// `POST /api/player/join` body. `uuid` is accepted for logging only.
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub gamertag: Option<String>,
    pub uuid: Option<String>,
}

/// Request rejected before reaching the relay.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/message", post(handle_message))
        .route("/api/player/join", post(handle_join))
        .route("/api/pending-invites", get(pending_invites))
        .route("/health", get(health))
        .with_state(state)
}

fn required(field: Option<String>, name: &str) -> Result<String, ApiError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("Missing {}", name)))
}

pub async fn handle_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<(StatusCode, Json<MessageOutcome>), ApiError> {
    let actor = required(request.gamertag, "gamertag")?;
    let message = required(request.message, "message")?;
    info!(actor = %actor, "Message received: \"{}\"", message);

    let outcome = state.coordinator.on_message(&actor, &message).await?;
    let status = if outcome.error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}

pub async fn handle_join(
    State(state): State<AppState>,
    Json(request): Json<JoinRequest>,
) -> Result<(StatusCode, Json<JoinOutcome>), ApiError> {
    let actor = required(request.gamertag, "gamertag")?;
    info!(actor = %actor, uuid = ?request.uuid, "Player joined");

    let outcome = state.coordinator.on_join(&actor).await?;
    let status = if outcome.error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}

pub async fn pending_invites(State(state): State<AppState>) -> Json<Vec<PendingSummary>> {
    Json(state.coordinator.list_pending())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::common::formatter::Template;
    use crate::dispatch::testing::{RecordingMessenger, RecordingServer};
    use crate::dispatch::{InviteDispatcher, RedirectDispatcher};
    use crate::relay::registry::InviteRegistry;
    use crate::relay::trigger::TriggerClassifier;

    fn make_state(messenger: RecordingMessenger) -> AppState {
        make_state_with(messenger, RecordingServer::new())
    }

    fn make_state_with(messenger: RecordingMessenger, server: RecordingServer) -> AppState {
        let coordinator = Coordinator::new(
            TriggerClassifier::default(),
            InviteRegistry::new(Duration::from_secs(300)),
            InviteDispatcher::new(Arc::new(messenger), Template::new("%actor"), "10.0.0.5:19132"),
            RedirectDispatcher::new(Arc::new(server), vec![Template::new("say %actor")]),
            "10.0.0.5:19132",
        );
        AppState {
            coordinator: Arc::new(coordinator),
        }
    }

    fn message(gamertag: Option<&str>, text: Option<&str>) -> Json<MessageRequest> {
        Json(MessageRequest {
            gamertag: gamertag.map(String::from),
            message: text.map(String::from),
        })
    }

    fn join(gamertag: &str) -> Json<JoinRequest> {
        Json(JoinRequest {
            gamertag: Some(gamertag.to_string()),
            uuid: Some("-4294967295".to_string()),
        })
    }

    #[tokio::test]
    async fn test_message_then_join_flow() {
        let state = make_state(RecordingMessenger::new());

        let (status, Json(outcome)) =
            handle_message(State(state.clone()), message(Some("Steve"), Some("invite me")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(outcome.invite_sent);

        let Json(pending) = pending_invites(State(state.clone())).await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].actor, "Steve");

        let (status, Json(outcome)) = handle_join(State(state.clone()), join("Steve")).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(outcome.redirected);

        let (_, Json(outcome)) = handle_join(State(state), join("Steve")).await.unwrap();
        assert!(!outcome.had_pending);
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_requests() {
        let state = make_state(RecordingMessenger::new());

        let err = handle_message(State(state.clone()), message(None, Some("invite")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("gamertag"));

        let err = handle_message(State(state.clone()), message(Some("Steve"), Some("")))
            .await
            .unwrap_err();
        assert!(err.message.contains("message"));

        let err = handle_join(
            State(state),
            Json(JoinRequest {
                gamertag: None,
                uuid: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_invite_is_bad_gateway() {
        let state = make_state(RecordingMessenger::failing("down"));

        let (status, Json(outcome)) =
            handle_message(State(state), message(Some("Rae"), Some("join now")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(outcome.triggered);
        assert!(!outcome.invite_sent);
    }

    #[tokio::test]
    async fn test_failed_redirect_is_bad_gateway() {
        let state = make_state_with(
            RecordingMessenger::new(),
            RecordingServer::failing_after(0, "server offline"),
        );
        handle_message(State(state.clone()), message(Some("Steve"), Some("invite")))
            .await
            .unwrap();

        let (status, Json(outcome)) = handle_join(State(state.clone()), join("Steve")).await.unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(outcome.had_pending);
        assert!(!outcome.redirected);
        assert!(outcome.error.unwrap().contains("server offline"));

        // Consumed, so a second join is a plain miss.
        let (status, Json(outcome)) = handle_join(State(state), join("Steve")).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(!outcome.had_pending);
    }

    #[tokio::test]
    async fn test_invalid_gamertag_is_bad_request() {
        let state = make_state(RecordingMessenger::new());
        let err = handle_join(State(state), join("Steve\\")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
