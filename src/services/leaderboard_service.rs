//! Ranking projections over the score ledger.

use crate::{
    dto::leaderboard::{LeaderboardEntry, LeaderboardResponse, TeamProgressResponse},
    error::ServiceError,
    services::submission_service,
    state::SharedState,
};

/// Rows returned when the caller does not ask for a specific count.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// The `limit` highest-scoring teams, ties broken by team id so equal scores
/// always rank in the same order.
pub fn top_teams(state: &SharedState, limit: Option<usize>) -> LeaderboardResponse {
    let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    let mut standings = state.ledger().standings();
    standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    standings.truncate(limit);

    let entries = standings
        .into_iter()
        .enumerate()
        .map(|(index, (team_id, points))| LeaderboardEntry {
            rank: index + 1,
            team_id,
            points,
        })
        .collect();
    LeaderboardResponse { entries }
}

/// Progress view for one team, covering durable history from before the
/// current process. Teams nobody has seen yet read as a zero record.
pub async fn team_progress(
    state: &SharedState,
    team_id: &str,
) -> Result<TeamProgressResponse, ServiceError> {
    submission_service::hydrate_team(state, team_id).await?;
    Ok(state.ledger().get(team_id).into())
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, sync::Arc};

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{models::TeamRecordEntity, quiz_store::memory::MemoryQuizStore},
        state::AppState,
    };

    fn state_with_scores(scores: &[(&str, u32)]) -> SharedState {
        let (state, _dirty_rx) = AppState::new(
            AppConfig::default(),
            Arc::new(MemoryQuizStore::new()),
            "test-token".into(),
        );
        for (team, points) in scores {
            state.ledger().try_commit(team, "q1", *points);
        }
        state
    }

    #[test]
    fn teams_rank_by_points_descending() {
        let state = state_with_scores(&[("bravo", 20), ("alpha", 50), ("charlie", 30)]);

        let board = top_teams(&state, None);
        let order: Vec<_> = board
            .entries
            .iter()
            .map(|entry| (entry.rank, entry.team_id.as_str(), entry.points))
            .collect();
        assert_eq!(
            order,
            vec![(1, "alpha", 50), (2, "charlie", 30), (3, "bravo", 20)]
        );
    }

    #[test]
    fn equal_scores_rank_lexically_by_team_id() {
        let state = state_with_scores(&[("zulu", 30), ("alpha", 30), ("mike", 30)]);

        let board = top_teams(&state, None);
        let ids: Vec<_> = board
            .entries
            .iter()
            .map(|entry| entry.team_id.as_str())
            .collect();
        assert_eq!(ids, vec!["alpha", "mike", "zulu"]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let state = state_with_scores(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);

        let board = top_teams(&state, Some(2));
        let ids: Vec<_> = board
            .entries
            .iter()
            .map(|entry| entry.team_id.as_str())
            .collect();
        assert_eq!(ids, vec!["d", "c"]);
    }

    #[test]
    fn default_limit_caps_the_board_at_ten() {
        let scores: Vec<(String, u32)> = (0..15)
            .map(|i| (format!("team-{i:02}"), i as u32))
            .collect();
        let borrowed: Vec<(&str, u32)> = scores
            .iter()
            .map(|(team, points)| (team.as_str(), *points))
            .collect();
        let state = state_with_scores(&borrowed);

        let board = top_teams(&state, None);
        assert_eq!(board.entries.len(), DEFAULT_LEADERBOARD_LIMIT);
        assert_eq!(board.entries[0].points, 14);
    }

    #[tokio::test]
    async fn team_progress_reaches_back_into_the_store() {
        let store = MemoryQuizStore::new();
        store.insert_team(TeamRecordEntity {
            team_id: "veterans".into(),
            points: 70,
            answered_question_ids: BTreeSet::from(["q1".into(), "q5".into()]),
        });
        let (state, _dirty_rx) = AppState::new(
            AppConfig::default(),
            Arc::new(store.clone()),
            "test-token".into(),
        );

        let progress = team_progress(&state, "veterans").await.unwrap();
        assert_eq!(progress.points, 70);
        assert_eq!(progress.answered_question_ids, vec!["q1", "q5"]);

        let unseen = team_progress(&state, "rookies").await.unwrap();
        assert_eq!(unseen.points, 0);
        assert!(unseen.answered_question_ids.is_empty());
    }
}
