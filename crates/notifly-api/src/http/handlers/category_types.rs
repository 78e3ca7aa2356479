//! Category-type CRUD handlers.
//!
//! # Design
//! - Names are normalised to trimmed values and must be unique
//!   case-insensitively, mirroring the database constraint the store stands
//!   in for.
//! - Every success returns the full record so the console can update its
//!   local cache without a refetch.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use notifly_api_models::{ApiEnvelope, CategoryType, CategoryTypeRequest, ErrorCode};
use tracing::info;
use uuid::Uuid;

use crate::http::errors::ApiError;
use crate::state::ApiState;

pub(crate) async fn list_category_types(
    State(state): State<Arc<ApiState>>,
) -> Json<ApiEnvelope<Vec<CategoryType>>> {
    Json(ApiEnvelope::ok(state.list_categories()))
}

pub(crate) async fn create_category_type(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CategoryTypeRequest>,
) -> Result<Json<ApiEnvelope<CategoryType>>, ApiError> {
    let name = normalized_name(&request)?;
    if state.category_name_taken(&name, None) {
        return Err(ApiError::conflict(
            ErrorCode::DuplicateCategoryName,
            format!("category type '{name}' already exists"),
        ));
    }
    let category = CategoryType {
        id: Uuid::new_v4(),
        name,
        description: request.description.clone(),
        updated_at: Utc::now(),
    };
    state.insert_category(category.clone());
    info!(category_id = %category.id, category_name = %category.name, "category type created");
    Ok(Json(ApiEnvelope::ok(category)))
}

pub(crate) async fn update_category_type(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CategoryTypeRequest>,
) -> Result<Json<ApiEnvelope<CategoryType>>, ApiError> {
    let name = normalized_name(&request)?;
    if !state.category_exists(id) {
        return Err(not_found(id));
    }
    if state.category_name_taken(&name, Some(id)) {
        return Err(ApiError::conflict(
            ErrorCode::DuplicateCategoryName,
            format!("category type '{name}' already exists"),
        ));
    }
    let category = CategoryType {
        id,
        name,
        description: request.description.clone(),
        updated_at: Utc::now(),
    };
    if !state.replace_category(category.clone()) {
        return Err(not_found(id));
    }
    info!(category_id = %id, "category type updated");
    Ok(Json(ApiEnvelope::ok(category)))
}

pub(crate) async fn delete_category_type(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiEnvelope<Uuid>>, ApiError> {
    if !state.remove_category(id) {
        return Err(not_found(id));
    }
    info!(category_id = %id, "category type deleted");
    Ok(Json(ApiEnvelope::ok(id)))
}

fn normalized_name(request: &CategoryTypeRequest) -> Result<String, ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request(
            ErrorCode::MissingRequiredField,
            "category type name must not be empty",
        ));
    }
    Ok(name.to_string())
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::not_found(
        ErrorCode::CategoryTypeNotFound,
        format!("category type {id} not found"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push::NoopPushGateway;
    use notifly_telemetry::Metrics;

    fn state() -> Arc<ApiState> {
        Arc::new(ApiState::new(
            Metrics::new().expect("metrics"),
            Arc::new(NoopPushGateway),
        ))
    }

    fn request(name: &str) -> CategoryTypeRequest {
        CategoryTypeRequest {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let state = state();
        let created = create_category_type(State(state.clone()), Json(request("Alerts")))
            .await
            .expect("create")
            .0
            .data
            .expect("data");

        let listed = list_category_types(State(state)).await.0.data.expect("data");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let state = state();
        let _ = create_category_type(State(state.clone()), Json(request("Alerts")))
            .await
            .expect("create");
        let err = create_category_type(State(state), Json(request("  alerts ")))
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::DuplicateCategoryName);
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let state = state();
        let err = create_category_type(State(state), Json(request("   ")))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::MissingRequiredField);
    }

    #[tokio::test]
    async fn update_and_delete_miss_report_not_found() {
        let state = state();
        let missing = Uuid::new_v4();
        let err = update_category_type(State(state.clone()), Path(missing), Json(request("A")))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::CategoryTypeNotFound);

        let err = delete_category_type(State(state), Path(missing))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::CategoryTypeNotFound);
    }
}
