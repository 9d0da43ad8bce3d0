use axum::Router;

use crate::state::SharedState;

pub mod admin;
pub mod answers;
pub mod docs;
pub mod health;
pub mod leaderboard;
pub mod questions;

/// Assemble the public API, the admin endpoints and the documentation routes
/// into one tree.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(answers::router())
        .merge(questions::router())
        .merge(leaderboard::router())
        .merge(admin::router(state.clone()));

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
