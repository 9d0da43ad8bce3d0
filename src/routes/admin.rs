use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::post,
};

use crate::{
    dto::admin::RefreshCacheResponse, error::AppError, services::catalog_service,
    state::SharedState,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Operator-only endpoints for driving the question catalog.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/cache/refresh", post(refresh_cache))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

#[utoipa::path(
    post,
    path = "/admin/cache/refresh",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Operator token configured at startup")),
    responses(
        (status = 200, description = "Fresh snapshot published", body = RefreshCacheResponse),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 503, description = "Store unreachable; the previous snapshot stays published")
    )
)]
/// Reload every question from the store and publish a new snapshot.
pub async fn refresh_cache(
    State(state): State<SharedState>,
) -> Result<Json<RefreshCacheResponse>, AppError> {
    let snapshot = catalog_service::refresh_catalog(&state).await?;
    Ok(Json(RefreshCacheResponse::from(snapshot.as_ref())))
}

async fn require_admin_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = req.headers().get(ADMIN_TOKEN_HEADER);
    let Some(provided) = header.and_then(|value| value.to_str().ok()) else {
        return Err(AppError::Unauthorized(
            "the `X-Admin-Token` header is required".into(),
        ));
    };

    if provided != state.admin_token() {
        return Err(AppError::Unauthorized(
            "the provided admin token does not match".into(),
        ));
    }

    Ok(next.run(req).await)
}
