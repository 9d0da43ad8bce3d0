//! Binary entrypoint wiring config, the CouchDB store, background tasks and the REST router.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trail_quiz_back::{
    config::AppConfig,
    dao::quiz_store::couchdb::{CouchConfig, CouchQuizStore},
    routes,
    services::{catalog_service, score_persistence, store_monitor},
    state::{AppState, SharedState},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();

    let couch_config = CouchConfig::from_env().context("reading CouchDB configuration")?;
    let store = CouchQuizStore::connect(couch_config)
        .await
        .context("connecting to CouchDB")?;

    let (state, dirty_rx) = AppState::new(config, Arc::new(store), admin_token_from_env());

    // The server must not come up without a question snapshot to serve.
    let snapshot = catalog_service::refresh_catalog(&state)
        .await
        .context("loading the initial question snapshot")?;
    info!(
        questions = snapshot.len(),
        version = snapshot.version(),
        "initial question snapshot published"
    );

    tokio::spawn(store_monitor::run(state.clone()));
    tokio::spawn(score_persistence::run(state.clone(), dirty_rx));

    let app = build_router(state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Admin token from the environment, or a fresh one logged at startup.
fn admin_token_from_env() -> String {
    match env::var("ADMIN_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            let token = Uuid::new_v4().simple().to_string();
            info!(%token, "ADMIN_TOKEN not set, generated one for this run");
            token
        }
    }
}

fn build_router(state: SharedState) -> Router {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
