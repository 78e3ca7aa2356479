//! Pure UI logic extracted from components for non-wasm testing.

pub mod cache;
pub mod notify;
pub mod pagination;
pub mod selection;
pub mod store;
pub mod time;
