//! DTO definitions used by the admin REST API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{dto::format_system_time, state::QuestionSnapshot};

/// Result of a catalog refresh triggered through the admin API.
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshCacheResponse {
    /// Number of questions in the freshly published snapshot.
    pub questions: usize,
    /// Version assigned to the new snapshot.
    pub snapshot_version: u64,
    /// RFC 3339 timestamp of the store read that produced the snapshot.
    pub loaded_at: String,
}

impl From<&QuestionSnapshot> for RefreshCacheResponse {
    fn from(snapshot: &QuestionSnapshot) -> Self {
        Self {
            questions: snapshot.len(),
            snapshot_version: snapshot.version(),
            loaded_at: format_system_time(snapshot.loaded_at()),
        }
    }
}
