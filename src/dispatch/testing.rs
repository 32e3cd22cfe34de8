//! Recording capabilities for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::common::error::{DispatchError, DispatchResult};
use crate::dispatch::capability::{Messenger, ServerCommands};

/// Messenger that records every delivered message.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(String, String)>>,
    attempts: AtomicUsize,
    fail_with: Option<String>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every notification with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn notify(&self, actor: &str, message: &str) -> DispatchResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(ref reason) = self.fail_with {
            return Err(DispatchError::Rejected {
                reason: reason.clone(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((actor.to_string(), message.to_string()));
        Ok(())
    }
}

/// Server that records every executed command.
#[derive(Default)]
pub struct RecordingServer {
    commands: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    /// Fail once this many commands have succeeded.
    fail_after: Option<(usize, String)>,
}

impl RecordingServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `ok` commands, then fails every later one with a transport error.
    pub fn failing_after(ok: usize, message: &str) -> Self {
        Self {
            fail_after: Some((ok, message.to_string())),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServerCommands for RecordingServer {
    async fn execute(&self, _actor: &str, command: &str) -> DispatchResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some((ok, ref message)) = self.fail_after {
            if attempt >= ok {
                return Err(DispatchError::Transport {
                    message: message.clone(),
                });
            }
        }
        // Yield so concurrent callers interleave.
        tokio::task::yield_now().await;
        self.commands.lock().unwrap().push(command.to_string());
        Ok(())
    }
}
