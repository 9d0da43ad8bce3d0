use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Number of questions currently served.
    pub questions: usize,
    /// Version of the published question snapshot.
    pub snapshot_version: u64,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(questions: usize, snapshot_version: u64) -> Self {
        Self {
            status: "ok".to_string(),
            questions,
            snapshot_version,
        }
    }

    /// Create a health response indicating the storage backend is unreachable.
    pub fn degraded(questions: usize, snapshot_version: u64) -> Self {
        Self {
            status: "degraded".to_string(),
            questions,
            snapshot_version,
        }
    }
}
