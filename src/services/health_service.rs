use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the current health picture while logging connectivity issues.
///
/// The payload always reports what the serving path can do right now: the
/// published snapshot keeps answering even when the store behind it is gone.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    if let Err(err) = state.store().health_check().await {
        warn!(error = %err, "storage health check failed");
    }

    let snapshot = state.catalog().current().await;
    if state.is_degraded() {
        HealthResponse::degraded(snapshot.len(), snapshot.version())
    } else {
        HealthResponse::ok(snapshot.len(), snapshot.version())
    }
}
