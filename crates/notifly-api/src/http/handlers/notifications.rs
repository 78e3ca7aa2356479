//! Notification send handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use notifly_api_models::{
    ApiEnvelope, ErrorCode, SendNotificationRequest, SendNotificationResponse,
};
use tracing::{error, info};

use crate::http::errors::ApiError;
use crate::push::PushMessage;
use crate::schedule::{ScheduleError, resolve_schedule};
use crate::state::ApiState;

/// Upper bound on the combined title and body, matching the provider's
/// payload limit.
const MAX_PAYLOAD_CHARS: usize = 4000;

pub(crate) async fn send_notification(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<Json<ApiEnvelope<SendNotificationResponse>>, ApiError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request(
            ErrorCode::MissingRequiredField,
            "notification title must not be empty",
        ));
    }
    let body = request.body.trim();
    if body.is_empty() {
        return Err(ApiError::bad_request(
            ErrorCode::MissingRequiredField,
            "notification body must not be empty",
        ));
    }
    if title.chars().count() + body.chars().count() > MAX_PAYLOAD_CHARS {
        return Err(ApiError::validation(
            ErrorCode::PushPayloadTooLarge,
            format!("title and body together must not exceed {MAX_PAYLOAD_CHARS} characters"),
        ));
    }
    if let Some(category_id) = request.category_type_id {
        if !state.category_exists(category_id) {
            return Err(ApiError::not_found(
                ErrorCode::CategoryTypeNotFound,
                format!("category type {category_id} not found"),
            ));
        }
    }

    let deliver_at = match (&request.schedule_date, &request.schedule_time) {
        (None, None) => None,
        (Some(date), Some(time)) => {
            Some(resolve_schedule(date, time, Utc::now()).map_err(schedule_error)?)
        }
        _ => {
            return Err(ApiError::bad_request(
                ErrorCode::MissingRequiredField,
                "schedule date and time must be provided together",
            ));
        }
    };

    let message = PushMessage {
        title: title.to_string(),
        body: body.to_string(),
        recipients: request.recipients,
        deliver_at,
    };
    match state.push.send(&message).await {
        Ok(receipt) => {
            state.telemetry.inc_notification_sent();
            info!(
                message_id = %receipt.message_id,
                accepted = receipt.accepted,
                scheduled = deliver_at.is_some(),
                "notification accepted by provider"
            );
            Ok(Json(ApiEnvelope::ok(SendNotificationResponse {
                message_id: receipt.message_id,
                accepted: receipt.accepted,
                scheduled_for: deliver_at,
            })))
        }
        Err(err) => {
            state.telemetry.inc_notification_failed();
            error!(error = %err, "push provider rejected send");
            Err(ApiError::service_unavailable(
                ErrorCode::PushGatewayFailed,
                "push provider is unavailable",
            ))
        }
    }
}

fn schedule_error(err: ScheduleError) -> ApiError {
    match err {
        ScheduleError::BadDate => ApiError::bad_request(
            ErrorCode::InvalidDateFormat,
            "schedule date must use the M/d/yyyy format",
        ),
        ScheduleError::BadTime => ApiError::bad_request(
            ErrorCode::InvalidTimeFormat,
            "schedule time must use the H:mm format",
        ),
        ScheduleError::InPast => ApiError::validation(
            ErrorCode::ScheduleInPast,
            "scheduled delivery must be in the future",
        ),
    }
}
