use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::question::{QuestionSummary, QuestionsResponse},
    error::AppError,
    services::catalog_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    responses((status = 200, description = "Every question in the published snapshot", body = QuestionsResponse))
)]
/// List the questions players can currently hunt for.
pub async fn list_questions(State(state): State<SharedState>) -> Json<QuestionsResponse> {
    Json(catalog_service::list_questions(&state).await)
}

#[utoipa::path(
    get,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = String, Path, description = "Identifier of the question to retrieve")),
    responses(
        (status = 200, description = "Question", body = QuestionSummary),
        (status = 404, description = "No such question in the published snapshot")
    )
)]
/// Retrieve a single question by its ID.
pub async fn get_question(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionSummary>, AppError> {
    Ok(Json(catalog_service::get_question(&state, &id).await?))
}

/// Configure the question listing routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/questions", get(list_questions))
        .route("/questions/{id}", get(get_question))
}
