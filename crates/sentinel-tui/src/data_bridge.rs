//! Data bridge: forwards [`Dashboard`] state snapshots to TUI actions.
//!
//! Runs as a background task subscribed to the controller's `watch`
//! channel. Every change is cloned once into an `Arc` and sent as
//! [`Action::StateUpdated`].

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use sentinel_core::DashboardState;

use crate::action::Action;

pub async fn spawn_data_bridge(
    mut state: watch::Receiver<DashboardState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    // Initial snapshot so screens have data immediately
    let initial = Arc::new(state.borrow_and_update().clone());
    if action_tx.send(Action::StateUpdated(initial)).is_err() {
        return;
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = Arc::new(state.borrow_and_update().clone());
                if action_tx.send(Action::StateUpdated(snapshot)).is_err() {
                    break;
                }
            }
        }
    }

    debug!("data bridge shut down");
}
