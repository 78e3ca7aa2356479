//! Administrative user CRUD handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use notifly_api_models::{ApiEnvelope, ErrorCode, UserAccount, UserRequest};
use tracing::info;
use uuid::Uuid;

use crate::http::errors::ApiError;
use crate::state::ApiState;

pub(crate) async fn list_users(
    State(state): State<Arc<ApiState>>,
) -> Json<ApiEnvelope<Vec<UserAccount>>> {
    Json(ApiEnvelope::ok(state.list_users()))
}

pub(crate) async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<UserRequest>,
) -> Result<Json<ApiEnvelope<UserAccount>>, ApiError> {
    let (email, display_name) = validated(&request)?;
    if state.email_taken(&email, None) {
        return Err(duplicate_email(&email));
    }
    let user = UserAccount {
        id: Uuid::new_v4(),
        email,
        display_name,
        created_at: Utc::now(),
    };
    state.insert_user(user.clone());
    info!(user_id = %user.id, "user created");
    Ok(Json(ApiEnvelope::ok(user)))
}

pub(crate) async fn update_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UserRequest>,
) -> Result<Json<ApiEnvelope<UserAccount>>, ApiError> {
    let (email, display_name) = validated(&request)?;
    if state.email_taken(&email, Some(id)) {
        return Err(duplicate_email(&email));
    }
    let user = UserAccount {
        id,
        email,
        display_name,
        created_at: Utc::now(),
    };
    if !state.replace_user(user.clone()) {
        return Err(not_found(id));
    }
    info!(user_id = %id, "user updated");
    Ok(Json(ApiEnvelope::ok(user)))
}

pub(crate) async fn delete_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiEnvelope<Uuid>>, ApiError> {
    if !state.remove_user(id) {
        return Err(not_found(id));
    }
    info!(user_id = %id, "user deleted");
    Ok(Json(ApiEnvelope::ok(id)))
}

fn validated(request: &UserRequest) -> Result<(String, String), ApiError> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request(
            ErrorCode::MissingRequiredField,
            "a valid email address is required",
        ));
    }
    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::bad_request(
            ErrorCode::MissingRequiredField,
            "display name must not be empty",
        ));
    }
    Ok((email.to_string(), display_name.to_string()))
}

fn duplicate_email(email: &str) -> ApiError {
    ApiError::conflict(
        ErrorCode::DuplicateEmail,
        format!("email '{email}' is already registered"),
    )
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::not_found(ErrorCode::UserNotFound, format!("user {id} not found"))
}
