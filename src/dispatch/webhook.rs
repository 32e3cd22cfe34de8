//! HTTP webhook capabilities.
//!
//! Each call is one JSON POST. The request timeout configured here is the
//! only timeout applied to a dispatch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;

use crate::common::error::{DispatchError, DispatchResult};
use crate::dispatch::capability::{Messenger, ServerCommands};

/// Longest response body quoted in a rejection.
const MAX_REASON_LEN: usize = 200;

#[derive(Serialize)]
struct NotifyPayload<'a> {
    actor: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct CommandPayload<'a> {
    actor: &'a str,
    command: &'a str,
}

fn build_client(timeout: Duration) -> DispatchResult<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Map a non-2xx response to a rejection carrying the status and body.
async fn check_status(response: Response) -> DispatchResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    let body: String = body.trim().chars().take(MAX_REASON_LEN).collect();
    let reason = if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    };
    Err(DispatchError::Rejected { reason })
}

/// Delivers invites by POSTing `{actor, message}`.
pub struct WebhookMessenger {
    client: Client,
    url: String,
}

impl WebhookMessenger {
    pub fn new(url: impl Into<String>, timeout: Duration) -> DispatchResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Messenger for WebhookMessenger {
    async fn notify(&self, actor: &str, message: &str) -> DispatchResult<()> {
        debug!(actor = %actor, url = %self.url, "POST notify");
        let response = self
            .client
            .post(&self.url)
            .json(&NotifyPayload { actor, message })
            .send()
            .await?;
        check_status(response).await
    }
}

/// Runs server commands by POSTing `{actor, command}`.
pub struct WebhookServerCommands {
    client: Client,
    url: String,
}

impl WebhookServerCommands {
    pub fn new(url: impl Into<String>, timeout: Duration) -> DispatchResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ServerCommands for WebhookServerCommands {
    async fn execute(&self, actor: &str, command: &str) -> DispatchResult<()> {
        debug!(actor = %actor, url = %self.url, "POST command");
        let response = self
            .client
            .post(&self.url)
            .json(&CommandPayload { actor, command })
            .send()
            .await?;
        check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;

    use super::*;

    type Received = Arc<Mutex<Vec<Value>>>;

    /// Serve one POST route that records bodies and answers with `status`.
    async fn spawn_hook(status: StatusCode) -> (String, Received) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/hook",
                post(
                    move |State(received): State<Received>, Json(body): Json<Value>| async move {
                        received.lock().unwrap().push(body);
                        (status, "server says no")
                    },
                ),
            )
            .with_state(received.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/hook", addr), received)
    }

    #[tokio::test]
    async fn test_notify_posts_json() {
        let (url, received) = spawn_hook(StatusCode::OK).await;
        let messenger = WebhookMessenger::new(url, Duration::from_secs(5)).unwrap();

        messenger.notify("Steve", "you are invited").await.unwrap();

        let bodies = received.lock().unwrap().clone();
        assert_eq!(
            bodies,
            vec![serde_json::json!({ "actor": "Steve", "message": "you are invited" })]
        );
    }

    #[tokio::test]
    async fn test_execute_posts_json() {
        let (url, received) = spawn_hook(StatusCode::NO_CONTENT).await;
        let server = WebhookServerCommands::new(url, Duration::from_secs(5)).unwrap();

        server.execute("Steve", "say hi").await.unwrap();

        let bodies = received.lock().unwrap().clone();
        assert_eq!(bodies[0]["command"], "say hi");
    }

    #[tokio::test]
    async fn test_error_status_is_rejection() {
        let (url, _) = spawn_hook(StatusCode::SERVICE_UNAVAILABLE).await;
        let messenger = WebhookMessenger::new(url, Duration::from_secs(5)).unwrap();

        match messenger.notify("Rae", "hi").await {
            Err(DispatchError::Rejected { reason }) => {
                assert!(reason.contains("503"));
                assert!(reason.contains("server says no"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let server =
            WebhookServerCommands::new(format!("http://{}/hook", addr), Duration::from_secs(2))
                .unwrap();
        let result = server.execute("Steve", "say hi").await;
        assert!(matches!(result, Err(DispatchError::Transport { .. })));
    }
}
