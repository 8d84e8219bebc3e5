use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, DeleteUserResponse, UpdateUserRequest, UserListResponse,
            UserResponse,
        },
        repo_types::User,
        services::{hash_password, is_valid_email},
    },
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:id", patch(update_user).delete(delete_user))
}

// A malformed id cannot match any row, so it is reported as NotFound
// rather than a parse error.
fn parse_user_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound("User not found.".into()))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = User::list_all(&state.db).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(UserListResponse {
        total: data.len(),
        data,
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let hash = hash_password(&payload.password)?;

    let user = User::insert(&state.db, &payload.name, &payload.email, &hash)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Email already registered"))?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_user_id(&id)?;

    if let Some(email) = payload.email.as_mut() {
        *email = email.trim().to_lowercase();
        if !is_valid_email(email) {
            warn!(email = %email, "invalid email");
            return Err(ApiError::Validation("Invalid email".into()));
        }
    }

    let mut user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".into()))?;

    payload.apply_to(&mut user);

    let updated = User::update(&state.db, user.id, &user.name, &user.email)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Email already registered"))?;

    info!(user_id = %updated.id, "user updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    let deleted = User::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("User not found.".into()));
    }

    info!(user_id = %id, "user deleted");
    Ok(Json(DeleteUserResponse {
        status: true,
        message: "User deleted successfully.".into(),
    }))
}

#[cfg(test)]
mod id_tests {
    use super::*;

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_user_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
