use axum::{extract::State, Json};

use crate::error::{AppError, Result};
use crate::middleware::JsonOrForm;
use crate::models::{CreateUser, CreatedUser, User};
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
}

pub async fn create(
    State(state): State<UsersState>,
    JsonOrForm(form): JsonOrForm<CreateUser>,
) -> Result<Json<CreatedUser>> {
    let username = form
        .username
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::Validation("Username is required".to_string()))?;

    let user = state.user_repo.create(&username).await?;
    tracing::info!("Created user {} ({})", user.username, user.id);

    Ok(Json(user.into()))
}

pub async fn list(State(state): State<UsersState>) -> Result<Json<Vec<User>>> {
    let users = state.user_repo.find_all().await?;
    Ok(Json(users))
}
