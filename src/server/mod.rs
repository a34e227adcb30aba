//! HTTP server for the pointlog REST API.

pub mod handlers;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Database;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}

/// The REST surface, without any mount prefix.
fn api_router() -> Router<AppState> {
    Router::new()
        .route("/custom-tasks", get(handlers::list_custom_tasks))
        .route("/custom-tasks", post(handlers::create_custom_task))
        .route("/custom-tasks/search", get(handlers::search_custom_tasks))
        .route("/custom-tasks/frequency", get(handlers::ranked_custom_tasks))
        .route("/custom-tasks/{id}", delete(handlers::delete_custom_task))
        .route("/daily-tasks", get(handlers::list_daily_tasks))
        .route("/daily-tasks", post(handlers::create_daily_task))
        .route("/daily-tasks/{id}", delete(handlers::delete_daily_task))
        .route("/stats", get(handlers::get_stats))
        .route("/trend", get(handlers::get_trend))
        .route("/preferences", get(handlers::get_preferences))
        .route("/preferences", put(handlers::put_preferences))
        .route("/health", get(handlers::health))
}

/// Build the application router.
///
/// The API is mounted both at the root and under `/api`, so clients
/// work with or without the prefix.
pub fn build_router(state: AppState) -> Router {
    // Permissive CORS: the front-end is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_router())
        .nest("/api", api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until ctrl-c, then shut down gracefully.
pub async fn serve(db: Database, bind: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(db);
    let app = build_router(state);

    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
