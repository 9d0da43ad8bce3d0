use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the quiz backend's REST surface.
#[openapi(
    paths(
        crate::routes::answers::submit_answer,
        crate::routes::questions::list_questions,
        crate::routes::questions::get_question,
        crate::routes::leaderboard::get_leaderboard,
        crate::routes::leaderboard::get_team_progress,
        crate::routes::admin::refresh_cache,
        crate::routes::health::healthcheck,
    ),
    components(
        schemas(
            crate::dto::answer::SubmitAnswerRequest,
            crate::dto::answer::SubmitAnswerResponse,
            crate::dto::answer::CoordinateDto,
            crate::dto::question::QuestionSummary,
            crate::dto::question::QuestionsResponse,
            crate::dto::leaderboard::LeaderboardEntry,
            crate::dto::leaderboard::LeaderboardResponse,
            crate::dto::leaderboard::TeamProgressResponse,
            crate::dto::admin::RefreshCacheResponse,
            crate::dto::health::HealthResponse,
        )
    ),
    tags(
        (name = "answers", description = "Answer submission"),
        (name = "questions", description = "Published quiz questions"),
        (name = "leaderboard", description = "Scores and team progress"),
        (name = "admin", description = "Operator endpoints"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
