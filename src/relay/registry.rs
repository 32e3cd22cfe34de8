//! Pending invite storage.
//!
//! The registry is the only owner of pending invite records. It is sharded
//! by actor name through `DashMap`, so every check-and-transition on one
//! actor is atomic while unrelated actors never wait on each other. No
//! shard lock is ever held across an `.await`.

use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use crate::common::messages::PendingSummary;

/// Stored intent to redirect an actor once they join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInvite {
    pub actor: String,
    pub created_at: Instant,
    pub target_endpoint: String,
}

impl PendingInvite {
    pub fn new(actor: impl Into<String>, target_endpoint: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            created_at: Instant::now(),
            target_endpoint: target_endpoint.into(),
        }
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}

/// Map from actor name to their pending invite.
#[derive(Debug)]
pub struct InviteRegistry {
    entries: DashMap<String, PendingInvite>,
    ttl: Duration,
}

impl InviteRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Record a pending invite, replacing any earlier one for the same actor.
    ///
    /// Returns the replaced invite.
    pub fn insert(&self, invite: PendingInvite) -> Option<PendingInvite> {
        self.entries.insert(invite.actor.clone(), invite)
    }

    /// Atomically remove and return the live invite for `actor`.
    ///
    /// Of any number of concurrent callers, at most one receives the invite.
    /// An expired invite is removed as well, but reported as absent.
    pub fn take(&self, actor: &str) -> Option<PendingInvite> {
        let (_, invite) = self.entries.remove(actor)?;
        if invite.is_expired(Instant::now(), self.ttl) {
            debug!(actor = %actor, "Discarded expired invite on lookup");
            return None;
        }
        Some(invite)
    }

    /// Whether a live invite exists for `actor`.
    #[cfg(test)]
    pub fn contains(&self, actor: &str) -> bool {
        let now = Instant::now();
        self.entries
            .get(actor)
            .map(|invite| !invite.is_expired(now, self.ttl))
            .unwrap_or(false)
    }

    /// Live invites, oldest first.
    pub fn snapshot(&self) -> Vec<PendingSummary> {
        let now = Instant::now();
        let mut live: Vec<(Instant, PendingSummary)> = self
            .entries
            .iter()
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| {
                (
                    entry.created_at,
                    PendingSummary {
                        actor: entry.actor.clone(),
                        target_endpoint: entry.target_endpoint.clone(),
                        age_ms: entry.age(now).as_millis() as u64,
                    },
                )
            })
            .collect();

        live.sort_by(|(a_at, a), (b_at, b)| a_at.cmp(b_at).then_with(|| a.actor.cmp(&b.actor)));
        live.into_iter().map(|(_, summary)| summary).collect()
    }

    /// Remove every invite older than the TTL. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut pruned = 0;
        self.entries.retain(|actor, invite| {
            let expired = invite.is_expired(now, self.ttl);
            if expired {
                debug!(actor = %actor, "Pruned expired invite");
                pruned += 1;
            }
            !expired
        });
        pruned
    }

    /// Number of stored invites, including expired ones not yet pruned.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
