//! Periodic expiry sweep for pending invites.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::coordinator::Coordinator;

/// Spawn a task that prunes expired invites every `interval` until shutdown.
pub fn spawn_expiry_sweeper(
    coordinator: Arc<Coordinator>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // First sweep after one full interval.
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let pruned = coordinator.prune_expired();
                    if pruned > 0 {
                        info!("Expired {} pending invite(s)", pruned);
                    } else {
                        debug!("Expiry sweep found nothing to prune");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Expiry sweeper stopping");
                        break;
                    }
                }
            }
        }
    })
}
