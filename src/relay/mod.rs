//! Invite-to-redirect correlation core.
//!
//! ## Module Structure
//!
//! - `trigger`: chat message classification (`TriggerClassifier`)
//! - `registry`: pending invite store (`InviteRegistry`, `PendingInvite`)
//! - `coordinator`: message/join handling (`Coordinator`)
//! - `sweeper`: periodic expiry task

pub mod coordinator;
pub mod registry;
pub mod sweeper;
pub mod trigger;

pub use coordinator::Coordinator;
pub use sweeper::spawn_expiry_sweeper;
