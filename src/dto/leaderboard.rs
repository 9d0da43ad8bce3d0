//! DTO definitions for the leaderboard and team progress views.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::TeamRecord;

/// Query options accepted by the leaderboard endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LeaderboardQuery {
    /// Number of rows to return; server default when omitted.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

/// One row of the leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based position after sorting.
    pub rank: usize,
    pub team_id: String,
    pub points: u32,
}

/// Response listing the highest-scoring teams.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// Progress view for a single team.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamProgressResponse {
    pub team_id: String,
    pub points: u32,
    /// Ids of the questions the team has been credited for, sorted.
    pub answered_question_ids: Vec<String>,
}

impl From<TeamRecord> for TeamProgressResponse {
    fn from(record: TeamRecord) -> Self {
        Self {
            team_id: record.team_id,
            points: record.points,
            answered_question_ids: record.answered_question_ids.into_iter().collect(),
        }
    }
}
