//! Error translation and toast dedup.
//!
//! # Design
//! - A [`Notifier`] is constructed once and passed through the store, so the
//!   dedup window and the error log are instance state rather than a hidden
//!   global.
//! - Translation resolves a numeric code (envelope first, HTTP status as the
//!   fallback) through a closed sentence table; unknown codes fall back to
//!   the raw server message, then to a generic sentence.

use std::collections::VecDeque;

use notifly_api_models::ErrorCode;

/// Window in which an identical rendered message is suppressed.
pub const DEDUP_WINDOW_MS: i64 = 1_000;

/// Most recent log entries kept; older ones are dropped.
pub const LOG_CAP: usize = 256;

/// Failed request as seen by the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// Structured envelope decoded from the response body.
    Envelope {
        /// Numeric error code from the envelope.
        error_code: u16,
        /// Server-provided message.
        message: String,
    },
    /// Response received but the body carried no envelope.
    Status(u16),
    /// No response at all.
    Network,
}

/// Translation result handed to the toast layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// User-facing sentence.
    pub message: String,
    /// False when an identical message was rendered inside the dedup window.
    pub visible: bool,
}

/// One entry of the append-only error log.
///
/// Carries the raw failure next to the rendered message so entries that
/// render identically stay distinguishable during inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Failure as received from the service layer.
    pub failure: ApiFailure,
    /// Rendered message.
    pub message: String,
    /// Caller-supplied context, usually the action that failed.
    pub context: String,
    /// Epoch-millisecond stamp of the translation.
    pub timestamp_ms: i64,
}

/// Translates failures to display strings and suppresses toast storms.
#[derive(Debug, Default)]
pub struct Notifier {
    last_shown: Option<(String, i64)>,
    log: VecDeque<LogEntry>,
}

impl Notifier {
    /// Fresh notifier with an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_shown: None,
            log: VecDeque::new(),
        }
    }

    /// Translate a failure into a notification, logging every call and
    /// hiding duplicates rendered within [`DEDUP_WINDOW_MS`].
    pub fn translate(&mut self, failure: &ApiFailure, context: &str, now_ms: i64) -> Notification {
        let message = render(failure);
        self.log.push_back(LogEntry {
            failure: failure.clone(),
            message: message.clone(),
            context: context.to_string(),
            timestamp_ms: now_ms,
        });
        while self.log.len() > LOG_CAP {
            self.log.pop_front();
        }

        let duplicate = self
            .last_shown
            .as_ref()
            .is_some_and(|(last, shown_at)| *last == message && now_ms - shown_at < DEDUP_WINDOW_MS);
        if !duplicate {
            self.last_shown = Some((message.clone(), now_ms));
        }
        Notification {
            message,
            visible: !duplicate,
        }
    }

    /// Entries recorded so far, oldest first.
    #[must_use]
    pub fn log(&self) -> &VecDeque<LogEntry> {
        &self.log
    }

    /// Drop every log entry.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

fn render(failure: &ApiFailure) -> String {
    match failure {
        ApiFailure::Envelope {
            error_code,
            message,
        } => ErrorCode::from_code(*error_code).map_or_else(
            || {
                let trimmed = message.trim();
                if trimmed.is_empty() {
                    "Something went wrong. Please try again.".to_string()
                } else {
                    trimmed.to_string()
                }
            },
            |code| sentence(code).to_string(),
        ),
        ApiFailure::Status(status) => sentence(ErrorCode::from_status(*status)).to_string(),
        ApiFailure::Network => {
            "Unable to reach the server. Check your connection and try again.".to_string()
        }
    }
}

/// Fixed sentence for every known error code.
#[must_use]
pub const fn sentence(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::Internal => "Something went wrong on our side. Please try again.",
        ErrorCode::InvalidCredentials => "The email or password you entered is incorrect.",
        ErrorCode::AuthenticationFailed => "We could not sign you in. Please try again.",
        ErrorCode::SessionExpired => "Your session has expired. Please log in again.",
        ErrorCode::NoPermission => "You do not have permission to perform this action.",
        ErrorCode::AccountDisabled => "This account has been disabled. Contact an administrator.",
        ErrorCode::ValidationFailed => "Some fields are invalid. Please review and try again.",
        ErrorCode::MissingRequiredField => "A required field is missing. Please fill it in.",
        ErrorCode::InvalidDateFormat => "The date must use the M/d/yyyy format.",
        ErrorCode::InvalidTimeFormat => "The time must use the H:mm format.",
        ErrorCode::ScheduleInPast => "The scheduled time has already passed. Pick a future time.",
        ErrorCode::PageSizeOutOfRange => "The requested page size is not supported.",
        ErrorCode::NotFound => "The requested item could not be found.",
        ErrorCode::UserNotFound => "That user no longer exists.",
        ErrorCode::TemplateNotFound => "That template no longer exists.",
        ErrorCode::CategoryTypeNotFound => "That category type no longer exists.",
        ErrorCode::Conflict => "This change conflicts with the current data. Refresh and retry.",
        ErrorCode::DuplicateEmail => "That email address is already registered.",
        ErrorCode::DuplicateCategoryName => "A category type with that name already exists.",
        ErrorCode::ForeignKeyConstraint => {
            "This item is still referenced elsewhere and cannot be removed."
        }
        ErrorCode::UniqueConstraint => "A record with those values already exists.",
        ErrorCode::DatabaseUnavailable => "The service is temporarily unavailable. Try again soon.",
        ErrorCode::ServiceUnhealthy => "The service is not healthy right now. Try again soon.",
        ErrorCode::PushGatewayFailed => {
            "The notification could not be delivered to the push provider."
        }
        ErrorCode::PushPayloadTooLarge => "The notification content is too long to send.",
    }
}
