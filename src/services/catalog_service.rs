//! Loading questions from the store and publishing them as snapshots, plus
//! the sanitized projections handed to players.

use std::{sync::Arc, time::SystemTime};

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::{
    dto::question::{QuestionSummary, QuestionsResponse},
    error::ServiceError,
    state::{Question, QuestionSnapshot, SharedState},
};

/// Reload every question from the store and publish a fresh snapshot.
///
/// On any storage or decode failure the previously published snapshot stays
/// in place untouched; the serving path never observes a half-loaded set.
/// Concurrent refreshes are serialized, so versions advance by exactly one
/// per successful reload.
pub async fn refresh_catalog(
    state: &SharedState,
) -> Result<Arc<QuestionSnapshot>, ServiceError> {
    let catalog = state.catalog();
    let _gate = catalog.begin_refresh().await;

    let entities = state.store().load_all_questions().await.inspect_err(
        |err| warn!(error = %err, "question reload failed; keeping the published snapshot"),
    )?;

    let mut questions = IndexMap::with_capacity(entities.len());
    for entity in entities {
        let question = Question::from(entity);
        if let Some(previous) = questions.insert(question.id.clone(), question) {
            warn!(question_id = %previous.id, "duplicate question id in store; keeping the later document");
        }
    }
    if questions.is_empty() {
        warn!("store returned an empty question set; publishing it regardless");
    }

    let previous = catalog.current().await;
    let snapshot =
        QuestionSnapshot::new(previous.version() + 1, SystemTime::now(), questions);
    catalog.publish(snapshot).await;

    let published = catalog.current().await;
    info!(
        version = published.version(),
        questions = published.len(),
        "published question snapshot"
    );
    Ok(published)
}

/// Every question in the published snapshot, sanitized for players.
pub async fn list_questions(state: &SharedState) -> QuestionsResponse {
    let snapshot = state.catalog().current().await;
    let default_points = state.config().points_per_question();
    QuestionsResponse {
        snapshot_version: snapshot.version(),
        questions: snapshot
            .iter()
            .map(|question| (question, default_points).into())
            .collect(),
    }
}

/// Sanitized projection of a single question.
pub async fn get_question(
    state: &SharedState,
    id: &str,
) -> Result<QuestionSummary, ServiceError> {
    let snapshot = state.catalog().current().await;
    let default_points = state.config().points_per_question();
    snapshot
        .get(id)
        .map(|question| (question, default_points).into())
        .ok_or_else(|| ServiceError::NotFound(format!("question `{id}` not found")))
}
