//! Capabilities that only log what they would do.
//!
//! Used when no webhook is configured, so the relay can run end to end
//! against a server that is wired up out of band.

use async_trait::async_trait;
use tracing::info;

use crate::common::error::DispatchResult;
use crate::dispatch::capability::{Messenger, ServerCommands};

pub struct LoggingMessenger;

#[async_trait]
impl Messenger for LoggingMessenger {
    async fn notify(&self, actor: &str, message: &str) -> DispatchResult<()> {
        info!(actor = %actor, "Notify: {}", message);
        Ok(())
    }
}

pub struct LoggingServerCommands;

#[async_trait]
impl ServerCommands for LoggingServerCommands {
    async fn execute(&self, actor: &str, command: &str) -> DispatchResult<()> {
        info!(actor = %actor, "Execute: {}", command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_capabilities_succeed() {
        assert!(LoggingMessenger.notify("Steve", "hi").await.is_ok());
        assert!(LoggingServerCommands.execute("Steve", "say hi").await.is_ok());
        assert_eq!(
            LoggingServerCommands.translate("10.0.0.5:19132").unwrap().port,
            19132
        );
    }
}
