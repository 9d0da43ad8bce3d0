//! The answer submission pipeline: locate the question, gate on distance,
//! reject duplicates, compare the answer, commit the points.

use tracing::{info, warn};

use crate::{
    error::ServiceError,
    geo::{self, Coordinate},
    state::{CommitResult, SharedState},
};

/// What one submission produced.
///
/// Every variant is a normal quiz outcome; transport-level failures travel as
/// [`ServiceError`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Correct answer from within the acceptance radius; points were awarded.
    Accepted {
        /// Points credited by this submission.
        points_awarded: u32,
        /// Team total after the award.
        total_points: u32,
        /// Hint revealed by solving this question, when it defines one.
        next_hint: Option<String>,
    },
    /// The reported position is too far from the quiz point.
    OutOfRange {
        /// Great-circle distance between the player and the quiz point.
        distance_m: f64,
        /// Radius the distance was checked against.
        radius_m: f64,
    },
    /// The team was already credited for this question.
    AlreadyAnswered,
    /// Wrong answer given from within the radius. The team may try again.
    Incorrect,
    /// No question with the submitted id exists in the current snapshot.
    QuestionNotFound,
}

/// Decide the outcome of one answer submission.
///
/// The whole decision runs against a single snapshot captured up front, so a
/// concurrent catalog refresh cannot produce a mixed view. Gates run in a
/// fixed order: unknown question, then distance, then duplicate, then answer
/// text. A duplicate answers `AlreadyAnswered` even when the new guess is
/// wrong; the team already holds the credit.
pub async fn submit_answer(
    state: &SharedState,
    team_id: &str,
    question_id: &str,
    answer: &str,
    position: Coordinate,
) -> Result<SubmissionOutcome, ServiceError> {
    let snapshot = state.catalog().current().await;
    let Some(question) = snapshot.get(question_id) else {
        return Ok(SubmissionOutcome::QuestionNotFound);
    };

    let radius_m = state.config().proximity_radius_m();
    let proximity = geo::proximity(position, question.location, radius_m);
    if !proximity.within {
        return Ok(SubmissionOutcome::OutOfRange {
            distance_m: proximity.distance_m,
            radius_m,
        });
    }

    hydrate_team(state, team_id).await?;

    if state.ledger().has_answered(team_id, question_id) {
        return Ok(SubmissionOutcome::AlreadyAnswered);
    }

    if normalize_answer(answer) != normalize_answer(&question.answer) {
        return Ok(SubmissionOutcome::Incorrect);
    }

    let points = question
        .points
        .unwrap_or_else(|| state.config().points_per_question());

    match state.ledger().try_commit(team_id, question_id, points) {
        CommitResult::Committed { new_total } => {
            state.mark_dirty(team_id);
            info!(team_id, question_id, points, total = new_total, "answer accepted");
            Ok(SubmissionOutcome::Accepted {
                points_awarded: points,
                total_points: new_total,
                next_hint: question.next_hint().map(str::to_owned),
            })
        }
        // A racing submission for the same pair won the commit.
        CommitResult::AlreadyCommitted => Ok(SubmissionOutcome::AlreadyAnswered),
    }
}

/// Make sure a team's durable history sits in memory before the duplicate
/// gate consults it.
///
/// Once a team is tracked, memory stays authoritative and the store is never
/// read for it again. An unreachable store therefore only blocks teams the
/// process has not seen yet; refusing those is what keeps scoring
/// at-most-once across restarts.
pub(crate) async fn hydrate_team(state: &SharedState, team_id: &str) -> Result<(), ServiceError> {
    if state.ledger().is_tracked(team_id) {
        return Ok(());
    }

    match state.store().load_team_record(team_id).await {
        Ok(Some(entity)) => {
            state.ledger().hydrate(entity.into());
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            warn!(team_id, error = %err, "cannot load team history; refusing submission");
            Err(err.into())
        }
    }
}

/// Collapse case and surrounding whitespace before answers are compared.
fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, sync::Arc};

    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::{QuestionEntity, TeamRecordEntity},
            quiz_store::memory::MemoryQuizStore,
        },
        services::catalog_service,
        state::AppState,
    };

    const QUESTION_POS: Coordinate = Coordinate {
        lat: 30.3539,
        lng: 76.3683,
    };
    /// About 15 m from [`QUESTION_POS`].
    const NEARBY_POS: Coordinate = Coordinate {
        lat: 30.3540,
        lng: 76.3684,
    };
    /// About 500 m north of [`QUESTION_POS`].
    const FAR_POS: Coordinate = Coordinate {
        lat: 30.3584,
        lng: 76.3683,
    };

    fn lighthouse() -> QuestionEntity {
        QuestionEntity {
            id: "q-lighthouse".into(),
            location: QUESTION_POS,
            answer: "Lighthouse".into(),
            hints: vec!["count the steps".into()],
            clue_index: 0,
            points: None,
        }
    }

    async fn state_with(
        store: &MemoryQuizStore,
    ) -> (crate::state::SharedState, mpsc::UnboundedReceiver<String>) {
        let (state, dirty_rx) = AppState::new(
            AppConfig::default(),
            Arc::new(store.clone()),
            "test-token".into(),
        );
        catalog_service::refresh_catalog(&state)
            .await
            .expect("initial refresh");
        (state, dirty_rx)
    }

    #[tokio::test]
    async fn correct_answer_nearby_scores_and_reveals_the_hint() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, _dirty_rx) = state_with(&store).await;

        let outcome = submit_answer(&state, "team-1", "q-lighthouse", "  LIGHTHOUSE ", NEARBY_POS)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Accepted {
                points_awarded: 10,
                total_points: 10,
                next_hint: Some("count the steps".into()),
            }
        );
        assert!(state.ledger().has_answered("team-1", "q-lighthouse"));
    }

    #[tokio::test]
    async fn submission_from_afar_reports_the_distance() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, _dirty_rx) = state_with(&store).await;

        let outcome = submit_answer(&state, "team-1", "q-lighthouse", "Lighthouse", FAR_POS)
            .await
            .unwrap();

        let SubmissionOutcome::OutOfRange {
            distance_m,
            radius_m,
        } = outcome
        else {
            panic!("expected OutOfRange, got {outcome:?}");
        };
        assert!(
            (499.0..502.0).contains(&distance_m),
            "unexpected distance {distance_m}"
        );
        assert_eq!(radius_m, 50.0);
        // A correct answer from the wrong place must not score.
        assert!(!state.ledger().has_answered("team-1", "q-lighthouse"));
    }

    #[tokio::test]
    async fn wrong_answer_nearby_keeps_the_question_open() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, _dirty_rx) = state_with(&store).await;

        let first = submit_answer(&state, "team-1", "q-lighthouse", "windmill", NEARBY_POS)
            .await
            .unwrap();
        assert_eq!(first, SubmissionOutcome::Incorrect);
        assert_eq!(state.ledger().get("team-1").points, 0);

        // The team may retry and still win the points.
        let second = submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();
        assert!(matches!(second, SubmissionOutcome::Accepted { .. }));
    }

    #[tokio::test]
    async fn repeated_correct_answer_is_already_answered() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, _dirty_rx) = state_with(&store).await;

        submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();
        let again = submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();

        assert_eq!(again, SubmissionOutcome::AlreadyAnswered);
        assert_eq!(state.ledger().get("team-1").points, 10);
    }

    #[tokio::test]
    async fn wrong_guess_after_solving_reports_already_answered() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, _dirty_rx) = state_with(&store).await;

        submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();
        // The duplicate gate answers before the text is even compared.
        let outcome = submit_answer(&state, "team-1", "q-lighthouse", "windmill", NEARBY_POS)
            .await
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::AlreadyAnswered);
    }

    #[tokio::test]
    async fn unknown_question_id_is_reported_as_such() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, _dirty_rx) = state_with(&store).await;

        let outcome = submit_answer(&state, "team-1", "q-ghost", "anything", NEARBY_POS)
            .await
            .unwrap();
        assert_eq!(outcome, SubmissionOutcome::QuestionNotFound);
    }

    #[tokio::test]
    async fn per_question_points_override_beats_the_default() {
        let mut entity = lighthouse();
        entity.points = Some(40);
        entity.hints = vec![];
        let store = MemoryQuizStore::with_questions(vec![entity]);
        let (state, _dirty_rx) = state_with(&store).await;

        let outcome = submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Accepted {
                points_awarded: 40,
                total_points: 40,
                next_hint: None,
            }
        );
    }

    #[tokio::test]
    async fn durable_history_blocks_a_second_award_after_restart() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        store.insert_team(TeamRecordEntity {
            team_id: "team-1".into(),
            points: 10,
            answered_question_ids: BTreeSet::from(["q-lighthouse".into()]),
        });
        // A fresh state over the same store stands in for a restarted process.
        let (state, _dirty_rx) = state_with(&store).await;

        let outcome = submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::AlreadyAnswered);
        assert_eq!(state.ledger().get("team-1").points, 10);
    }

    #[tokio::test]
    async fn store_failure_during_first_contact_refuses_the_submission() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, _dirty_rx) = state_with(&store).await;
        store.set_fail_reads(true);

        let err = submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert!(!state.ledger().is_tracked("team-1"));
    }

    #[tokio::test]
    async fn tracked_teams_keep_playing_while_the_store_is_down() {
        let mut second = lighthouse();
        second.id = "q-fountain".into();
        second.answer = "fountain".into();
        let store = MemoryQuizStore::with_questions(vec![lighthouse(), second]);
        let (state, _dirty_rx) = state_with(&store).await;

        submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();
        store.set_fail_reads(true);

        let outcome = submit_answer(&state, "team-1", "q-fountain", "fountain", NEARBY_POS)
            .await
            .unwrap();
        assert!(matches!(outcome, SubmissionOutcome::Accepted { .. }));
    }

    #[tokio::test]
    async fn only_accepted_submissions_queue_persistence() {
        let store = MemoryQuizStore::with_questions(vec![lighthouse()]);
        let (state, mut dirty_rx) = state_with(&store).await;

        submit_answer(&state, "team-1", "q-lighthouse", "windmill", NEARBY_POS)
            .await
            .unwrap();
        assert!(dirty_rx.try_recv().is_err());

        submit_answer(&state, "team-1", "q-lighthouse", "lighthouse", NEARBY_POS)
            .await
            .unwrap();
        assert_eq!(dirty_rx.try_recv().unwrap(), "team-1");
    }
}
