use axum::extract::{Path, State};
use axum::Json;

use crate::models::user::UserProfile;
use crate::repo;
use crate::state::AppState;
use crate::utils::error::AppError;

pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = repo::users::find_profile(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    Ok(Json(profile))
}
