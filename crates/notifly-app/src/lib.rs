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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Notifly application bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (configuration, telemetry, and server wiring),
//! `gateway.rs` (outbound push-provider client).

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application-level error types.
pub mod error;
/// Reqwest push-gateway implementation.
pub mod gateway;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
