use axum::{Json, Router, extract::State, routing::post};
use axum_valid::Valid;

use crate::{
    dto::answer::{SubmitAnswerRequest, SubmitAnswerResponse},
    error::AppError,
    services::submission_service,
    state::SharedState,
};

#[utoipa::path(
    post,
    path = "/answers",
    tag = "answers",
    request_body = SubmitAnswerRequest,
    responses(
        (status = 200, description = "Submission judged; branch on the `result` tag", body = SubmitAnswerResponse),
        (status = 400, description = "Malformed or invalid payload"),
        (status = 503, description = "Team history unavailable for a first-time submitter")
    )
)]
/// Judge one answer submission and award points when it earns them.
pub async fn submit_answer(
    State(state): State<SharedState>,
    Valid(Json(request)): Valid<Json<SubmitAnswerRequest>>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let outcome = submission_service::submit_answer(
        &state,
        &request.team_id,
        &request.question_id,
        &request.answer,
        request.position.into(),
    )
    .await?;
    Ok(Json(outcome.into()))
}

/// Configure the answer submission routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/answers", post(submit_answer))
}
