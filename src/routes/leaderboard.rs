use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::{
        leaderboard::{LeaderboardQuery, LeaderboardResponse, TeamProgressResponse},
        validation::validate_team_id,
    },
    error::AppError,
    services::leaderboard_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "leaderboard",
    params(("limit" = Option<usize>, Query, description = "Rows to return (1-100); defaults to 10")),
    responses(
        (status = 200, description = "Highest-scoring teams in rank order", body = LeaderboardResponse),
        (status = 400, description = "Limit outside the accepted range")
    )
)]
/// Return the leaderboard, highest totals first.
pub async fn get_leaderboard(
    State(state): State<SharedState>,
    Valid(Query(query)): Valid<Query<LeaderboardQuery>>,
) -> Json<LeaderboardResponse> {
    Json(leaderboard_service::top_teams(&state, query.limit))
}

#[utoipa::path(
    get,
    path = "/teams/{team_id}",
    tag = "leaderboard",
    params(("team_id" = String, Path, description = "Identifier the team submits under")),
    responses(
        (status = 200, description = "Team progress, zeroed for unknown teams", body = TeamProgressResponse),
        (status = 400, description = "Malformed team identifier"),
        (status = 503, description = "Durable team history unavailable")
    )
)]
/// Return one team's points and answered questions.
pub async fn get_team_progress(
    State(state): State<SharedState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamProgressResponse>, AppError> {
    if let Err(err) = validate_team_id(&team_id) {
        return Err(AppError::BadRequest(format!("invalid team id: {err}")));
    }

    Ok(Json(
        leaderboard_service::team_progress(&state, &team_id).await?,
    ))
}

/// Configure the leaderboard routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/teams/{team_id}", get(get_team_progress))
}
