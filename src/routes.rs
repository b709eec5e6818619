use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers::{exercises, health, logs, users};
use crate::middleware::{cors_layer, trace_layer};

pub fn create_router(
    health_state: health::HealthState,
    users_state: users::UsersState,
    exercises_state: exercises::ExercisesState,
    logs_state: logs::LogsState,
    public_dir: &Path,
    views_dir: &Path,
) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state)
        // User routes
        .route("/api/users", get(users::list).post(users::create))
        .with_state(users_state)
        // Exercise routes
        .route("/api/users/{id}/exercises", post(exercises::create))
        .with_state(exercises_state)
        // Log routes
        .route("/api/users/{id}/logs", get(logs::show))
        .with_state(logs_state)
        // Landing page and static assets
        .route_service("/", ServeFile::new(views_dir.join("index.html")))
        .fallback_service(ServeDir::new(public_dir))
        .layer(cors_layer())
        .layer(trace_layer())
}
