use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::user::{UpdateLocationRequest, User, UserProfile};
use crate::services::solar::Location;
use crate::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(auth_user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}

/// Store the user's city coordinates (and optionally their UTC offset).
/// Coordinates are validated, never clamped.
pub async fn update_location(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateLocationRequest>,
) -> AppResult<Json<UserProfile>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let location = Location::new(body.latitude, body.longitude)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            city_lat = $2,
            city_lon = $3,
            utc_offset_minutes = COALESCE($4, utc_offset_minutes),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(body.utc_offset_minutes)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("User not found".into()))?;

    tracing::info!(
        user_id = %auth_user.id,
        latitude = location.latitude,
        longitude = location.longitude,
        "Location updated"
    );

    Ok(Json(user.into()))
}
