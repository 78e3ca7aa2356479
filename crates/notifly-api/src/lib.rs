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
#![allow(clippy::multiple_crate_versions)]
//! Notifly HTTP API.
//!
//! Hosts the CRUD surface the admin console consumes (category types,
//! templates, users) plus the outbound notification send. Every response is
//! wrapped in the shared [`notifly_api_models::ApiEnvelope`] so clients can
//! rely on one decoding path for success and failure alike.

mod config;
mod http;
mod push;
mod schedule;
mod state;

pub use config::ApiConfig;
pub use http::router::ApiServer;
pub use push::{NoopPushGateway, PushGateway, PushMessage, PushReceipt};
pub use state::ApiState;
