#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Notifly public API.
//!
//! Every backend response is wrapped in the same `{responseCode,
//! responseMessage, errorCode, data}` envelope, and the admin UI decodes the
//! same types it sends. Keeping the envelope, error codes, and page math in
//! one crate means the server and the wasm client cannot drift apart on the
//! wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Page size applied when the client sends none.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// JSON envelope shared by every API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// HTTP-style status code echoed in the body.
    pub response_code: u16,
    /// Human-readable summary of the outcome.
    pub response_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Stable numeric error code on failures, absent on success.
    pub error_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Response payload, absent on failures.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Wrap a successful payload.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            response_code: 200,
            response_message: "success".to_string(),
            error_code: None,
            data: Some(data),
        }
    }

    /// Wrap a failure with its status, message, and numeric code.
    #[must_use]
    pub fn failure(status: u16, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            response_code: status,
            response_message: message.into(),
            error_code: Some(code.code()),
            data: None,
        }
    }
}

/// Closed set of numeric error codes surfaced through the envelope.
///
/// The admin UI renders a fixed sentence per code; anything the server cannot
/// classify falls back to [`ErrorCode::Internal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Unclassified server-side failure.
    Internal,
    /// Username/password pair rejected.
    InvalidCredentials,
    /// Authentication handshake failed.
    AuthenticationFailed,
    /// Session or token lifetime elapsed.
    SessionExpired,
    /// Authenticated but not allowed to perform the action.
    NoPermission,
    /// Account exists but has been disabled.
    AccountDisabled,
    /// Request payload failed validation.
    ValidationFailed,
    /// A required field is missing or empty.
    MissingRequiredField,
    /// Schedule date string is malformed.
    InvalidDateFormat,
    /// Schedule time string is malformed.
    InvalidTimeFormat,
    /// Schedule points at a moment that already passed.
    ScheduleInPast,
    /// Requested page size falls outside the accepted range.
    PageSizeOutOfRange,
    /// Generic resource lookup miss.
    NotFound,
    /// User id lookup miss.
    UserNotFound,
    /// Template id lookup miss.
    TemplateNotFound,
    /// Category type id lookup miss.
    CategoryTypeNotFound,
    /// Generic state conflict.
    Conflict,
    /// Email already registered to another user.
    DuplicateEmail,
    /// Category type name already in use.
    DuplicateCategoryName,
    /// Deletion blocked by a referencing record.
    ForeignKeyConstraint,
    /// Insert/update violated a uniqueness rule.
    UniqueConstraint,
    /// Backing store is unreachable.
    DatabaseUnavailable,
    /// Service health check is failing.
    ServiceUnhealthy,
    /// Outbound push provider rejected or timed out.
    PushGatewayFailed,
    /// Notification payload exceeds the provider limit.
    PushPayloadTooLarge,
}

impl ErrorCode {
    /// Stable numeric value carried on the wire.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Internal => 1000,
            Self::InvalidCredentials => 1001,
            Self::AuthenticationFailed => 1002,
            Self::SessionExpired => 1003,
            Self::NoPermission => 1004,
            Self::AccountDisabled => 1005,
            Self::ValidationFailed => 2000,
            Self::MissingRequiredField => 2001,
            Self::InvalidDateFormat => 2002,
            Self::InvalidTimeFormat => 2003,
            Self::ScheduleInPast => 2004,
            Self::PageSizeOutOfRange => 2005,
            Self::NotFound => 3000,
            Self::UserNotFound => 3001,
            Self::TemplateNotFound => 3002,
            Self::CategoryTypeNotFound => 3003,
            Self::Conflict => 4000,
            Self::DuplicateEmail => 4001,
            Self::DuplicateCategoryName => 4002,
            Self::ForeignKeyConstraint => 4003,
            Self::UniqueConstraint => 4004,
            Self::DatabaseUnavailable => 5000,
            Self::ServiceUnhealthy => 5001,
            Self::PushGatewayFailed => 5002,
            Self::PushPayloadTooLarge => 5003,
        }
    }

    /// Resolve a wire value back to a known code.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            1000 => Some(Self::Internal),
            1001 => Some(Self::InvalidCredentials),
            1002 => Some(Self::AuthenticationFailed),
            1003 => Some(Self::SessionExpired),
            1004 => Some(Self::NoPermission),
            1005 => Some(Self::AccountDisabled),
            2000 => Some(Self::ValidationFailed),
            2001 => Some(Self::MissingRequiredField),
            2002 => Some(Self::InvalidDateFormat),
            2003 => Some(Self::InvalidTimeFormat),
            2004 => Some(Self::ScheduleInPast),
            2005 => Some(Self::PageSizeOutOfRange),
            3000 => Some(Self::NotFound),
            3001 => Some(Self::UserNotFound),
            3002 => Some(Self::TemplateNotFound),
            3003 => Some(Self::CategoryTypeNotFound),
            4000 => Some(Self::Conflict),
            4001 => Some(Self::DuplicateEmail),
            4002 => Some(Self::DuplicateCategoryName),
            4003 => Some(Self::ForeignKeyConstraint),
            4004 => Some(Self::UniqueConstraint),
            5000 => Some(Self::DatabaseUnavailable),
            5001 => Some(Self::ServiceUnhealthy),
            5002 => Some(Self::PushGatewayFailed),
            5003 => Some(Self::PushPayloadTooLarge),
            _ => None,
        }
    }

    /// Synthesize a code from a bare HTTP status when no envelope is present.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::ValidationFailed,
            401 => Self::AuthenticationFailed,
            403 => Self::NoPermission,
            404 => Self::NotFound,
            409 => Self::Conflict,
            503 => Self::ServiceUnhealthy,
            _ => Self::Internal,
        }
    }
}

/// Client-requested page coordinates before normalisation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRequest {
    /// One-based page index.
    pub page: u32,
    /// Requested rows per page.
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Normalised skip/take window derived from a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Rows to skip before the first returned item.
    pub skip: u64,
    /// Rows to return, clamped into `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
    pub take: u32,
}

impl PageRequest {
    /// Clamp the raw request into a usable window.
    ///
    /// `size` is clamped into `[1, 100]` (zero becomes the default of 10) and
    /// `page` to at least 1; `skip = (page - 1) * take`.
    #[must_use]
    pub fn normalize(self) -> PageWindow {
        let take = if self.size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
        };
        let page = self.page.max(1);
        PageWindow {
            skip: u64::from(page - 1) * u64::from(take),
            take,
        }
    }
}

/// Page metadata returned alongside every paginated list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// One-based page that was requested.
    pub page: u32,
    /// Page size the window was computed with.
    pub size: u32,
    /// Number of items on this page.
    pub item_count: u32,
    /// Total matching items across all pages.
    pub total_count: u64,
    /// Total number of pages (`ceil(total_count / size)`).
    pub page_count: u32,
    /// Whether a previous page exists.
    pub has_previous_page: bool,
    /// Whether a further page exists.
    pub has_next_page: bool,
}

impl PageMeta {
    /// Compute the metadata for a page.
    ///
    /// The requested page is deliberately not clamped against `page_count`:
    /// an out-of-range request yields zero items with accurate metadata so
    /// the client can render "page P of T" truthfully.
    #[must_use]
    pub fn compute(page: u32, size: u32, total_count: u64, item_count: u32) -> Self {
        let size = size.max(1);
        let page_count =
            u32::try_from(total_count.div_ceil(u64::from(size))).unwrap_or(u32::MAX);
        Self {
            page,
            size,
            item_count,
            total_count,
            page_count,
            has_previous_page: page > 1,
            has_next_page: page < page_count,
        }
    }
}

/// Whether a request landed past the final page of a non-empty dataset.
#[must_use]
pub fn is_empty_page(page: u32, total_count: u64, size: u32) -> bool {
    if total_count == 0 {
        return false;
    }
    u64::from(page) > total_count.div_ceil(u64::from(size.max(1)))
}

/// Paginated list payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Items for the requested window, in display order.
    pub items: Vec<T>,
    /// Metadata describing the page within the full dataset.
    pub meta: PageMeta,
}

/// Reference category used to group notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryType {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional free-text description.
    pub description: Option<String>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a category type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTypeRequest {
    /// Unique display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Languages a template can be authored in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TemplateLanguage {
    /// English.
    En,
    /// Khmer.
    Km,
}

/// Body formats a template can carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    /// Plain text body.
    Text,
    /// HTML body.
    Html,
}

/// Reusable notification template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier.
    pub id: Uuid,
    /// Template title shown in pickers and pushes.
    pub title: String,
    /// Message body with placeholder markers.
    pub body: String,
    /// Authoring language.
    pub language: TemplateLanguage,
    /// Body format.
    pub format: TemplateFormat,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    /// Template title.
    pub title: String,
    /// Message body.
    pub body: String,
    /// Authoring language.
    pub language: TemplateLanguage,
    /// Body format.
    pub format: TemplateFormat,
}

/// Administrative user of the console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique login email.
    pub email: String,
    /// Name shown in the UI.
    pub display_name: String,
    /// Timestamp the account was created.
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Unique login email.
    pub email: String,
    /// Name shown in the UI.
    pub display_name: String,
}

/// Outbound push request composed in the admin console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    /// Push title.
    pub title: String,
    /// Push body.
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional category the notification belongs to.
    pub category_type_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional local schedule date (`M/d/yyyy`).
    pub schedule_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional local schedule time (`H:mm`).
    pub schedule_time: Option<String>,
    #[serde(default)]
    /// Device tokens or topics to deliver to; empty means broadcast.
    pub recipients: Vec<String>,
}

/// Acknowledgement returned once the push provider accepts a send.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    /// Provider-assigned message identifier.
    pub message_id: String,
    /// Number of recipients the provider accepted.
    pub accepted: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// UTC instant the provider will deliver at, when scheduled.
    pub scheduled_for: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_preserves_in_range_requests() {
        for size in [1_u32, 25, 100] {
            for page in [1_u32, 2, 50] {
                let window = PageRequest { page, size }.normalize();
                assert_eq!(window.take, size);
                assert_eq!(window.skip, u64::from(page - 1) * u64::from(size));
            }
        }
    }

    #[test]
    fn normalize_clamps_out_of_range_requests() {
        let window = PageRequest { page: 0, size: 0 }.normalize();
        assert_eq!(window.take, DEFAULT_PAGE_SIZE);
        assert_eq!(window.skip, 0);

        let window = PageRequest { page: 3, size: 500 }.normalize();
        assert_eq!(window.take, MAX_PAGE_SIZE);
        assert_eq!(window.skip, 200);
    }

    #[test]
    fn meta_reports_boundaries() {
        let meta = PageMeta::compute(2, 10, 25, 5);
        assert_eq!(meta.page_count, 3);
        assert!(meta.has_previous_page);
        assert!(meta.has_next_page);

        let last = PageMeta::compute(3, 10, 25, 5);
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);

        let only = PageMeta::compute(1, 10, 5, 5);
        assert!(!only.has_previous_page);
        assert!(!only.has_next_page);
    }

    #[test]
    fn empty_page_requires_data_beyond_range() {
        assert!(is_empty_page(5, 20, 10));
        assert!(!is_empty_page(2, 20, 10));
        assert!(!is_empty_page(1, 0, 10));
    }

    #[test]
    fn error_codes_round_trip() {
        for code in [
            ErrorCode::Internal,
            ErrorCode::SessionExpired,
            ErrorCode::DuplicateCategoryName,
            ErrorCode::PushPayloadTooLarge,
        ] {
            assert_eq!(ErrorCode::from_code(code.code()), Some(code));
        }
        assert_eq!(ErrorCode::from_code(9999), None);
    }

    #[test]
    fn status_mapping_covers_client_errors() {
        assert_eq!(ErrorCode::from_status(400), ErrorCode::ValidationFailed);
        assert_eq!(ErrorCode::from_status(422), ErrorCode::ValidationFailed);
        assert_eq!(ErrorCode::from_status(401), ErrorCode::AuthenticationFailed);
        assert_eq!(ErrorCode::from_status(403), ErrorCode::NoPermission);
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(409), ErrorCode::Conflict);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::ServiceUnhealthy);
        assert_eq!(ErrorCode::from_status(500), ErrorCode::Internal);
    }

    #[test]
    fn envelope_serialises_camel_case() {
        let envelope = ApiEnvelope::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).expect("serialise");
        assert_eq!(
            value,
            json!({"responseCode": 200, "responseMessage": "success", "data": [1, 2, 3]})
        );

        let failure: ApiEnvelope<()> =
            ApiEnvelope::failure(404, "category type not found", ErrorCode::CategoryTypeNotFound);
        let value = serde_json::to_value(&failure).expect("serialise");
        assert_eq!(value["errorCode"], json!(3003));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn page_request_defaults_apply_on_deserialise() {
        let request: PageRequest = serde_json::from_str("{}").expect("deserialise");
        assert_eq!(request.page, 1);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
    }
}
