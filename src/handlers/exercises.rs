use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::error::{AppError, Result};
use crate::middleware::JsonOrForm;
use crate::models::calendar::parse_date;
use crate::models::{CreateExercise, ExerciseResponse};
use crate::repositories::{ExerciseRepository, UserRepository};

#[derive(Clone)]
pub struct ExercisesState {
    pub user_repo: UserRepository,
    pub exercise_repo: ExerciseRepository,
}

pub async fn create(
    State(state): State<ExercisesState>,
    Path(user_id): Path<String>,
    JsonOrForm(form): JsonOrForm<CreateExercise>,
) -> Result<Json<ExerciseResponse>> {
    let user = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let description = form
        .description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("Description is required".to_string()))?;
    let duration = form
        .duration
        .ok_or_else(|| AppError::Validation("Duration is required".to_string()))?;
    let date = match form.date {
        Some(raw) => parse_date(&raw)
            .ok_or_else(|| AppError::Validation(format!("Invalid date: {}", raw)))?,
        None => Utc::now(),
    };

    let exercise = state
        .exercise_repo
        .create(&user.id, &description, duration, date)
        .await?;
    tracing::debug!("Recorded exercise {} for user {}", exercise.id, user.id);

    Ok(Json(ExerciseResponse::new(user, exercise)))
}
