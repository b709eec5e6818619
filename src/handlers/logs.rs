use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::models::{ExerciseLog, LogQuery};
use crate::repositories::{ExerciseRepository, UserRepository};

#[derive(Clone)]
pub struct LogsState {
    pub user_repo: UserRepository,
    pub exercise_repo: ExerciseRepository,
}

pub async fn show(
    State(state): State<LogsState>,
    Path(user_id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<ExerciseLog>> {
    let user = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let filter = query.into_filter().map_err(AppError::Validation)?;
    let exercises = state.exercise_repo.find_log(&user.id, &filter).await?;

    Ok(Json(ExerciseLog::new(user, exercises)))
}
