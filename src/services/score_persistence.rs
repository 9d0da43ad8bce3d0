//! Background persistence of team records.
//!
//! Scoring commits to memory first and queues the team id here; this task
//! writes the records behind the players' backs so a slow or absent store
//! never sits on the submission path. The cost is a small durability window:
//! points committed but not yet drained are lost if the process dies.

use std::time::Duration;

use tokio::{sync::mpsc, time::sleep};
use tracing::{debug, warn};

use crate::state::SharedState;

/// Pause after a failed save before the team is retried.
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Drain the dirty-team queue until every sender is gone.
///
/// Each notification persists the team's record as it stands at save time, so
/// a team queued several times in quick succession simply writes its newest
/// state on each pass. Failed saves re-queue the team and back off briefly.
pub async fn run(state: SharedState, mut dirty_rx: mpsc::UnboundedReceiver<String>) {
    while let Some(team_id) = dirty_rx.recv().await {
        if !persist_team(&state, &team_id).await {
            state.mark_dirty(&team_id);
            sleep(RETRY_DELAY).await;
        }
    }
    debug!("dirty-team queue closed; score persistence task stopping");
}

async fn persist_team(state: &SharedState, team_id: &str) -> bool {
    if !state.ledger().is_tracked(team_id) {
        // Nothing to write; the id never committed.
        return true;
    }

    let record = state.ledger().get(team_id);
    match state.store().save_team_record(record.into()).await {
        Ok(()) => true,
        Err(err) => {
            warn!(team_id, error = %err, "failed to persist team record; will retry");
            false
        }
    }
}
