//! External capabilities the relay drives.
//!
//! Integration code supplies these; the relay only knows the trait surface.

use async_trait::async_trait;

use crate::common::error::DispatchResult;
use crate::common::types::Endpoint;

/// Delivers a text message to a player outside the game (e.g. a platform inbox).
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn notify(&self, actor: &str, message: &str) -> DispatchResult<()>;
}

/// Runs commands on the game server a player has joined.
#[async_trait]
pub trait ServerCommands: Send + Sync {
    /// Execute one command on behalf of `actor`.
    async fn execute(&self, actor: &str, command: &str) -> DispatchResult<()>;

    /// Turn an endpoint descriptor into a host/port pair.
    fn translate(&self, endpoint: &str) -> DispatchResult<Endpoint> {
        endpoint.parse()
    }
}
