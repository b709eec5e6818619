use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::db::DbPool;
use crate::version::GIT_VERSION;

#[derive(Clone)]
pub struct HealthState {
    pub pool: DbPool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    git_version: &'static str,
}

fn ping(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get()?;
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

/// Reports the build version and whether the store answers a trivial query.
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let pool = state.pool.clone();
    let reachable = match tokio::task::spawn_blocking(move || ping(&pool)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::warn!("Health check failed: {}", e);
            false
        }
        Err(e) => {
            tracing::warn!("Health check task failed: {}", e);
            false
        }
    };

    let (status, body) = if reachable {
        (
            StatusCode::OK,
            HealthResponse {
                status: "ok",
                database: "ok",
                git_version: GIT_VERSION,
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "unavailable",
                database: "unreachable",
                git_version: GIT_VERSION,
            },
        )
    };

    (status, Json(body))
}
