//! HTTP delivery surface: router, envelope errors, and route handlers.

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod router;
pub(crate) mod telemetry;
