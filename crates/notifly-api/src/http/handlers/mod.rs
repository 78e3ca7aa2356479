//! Route handlers grouped by resource.

pub(crate) mod category_types;
pub(crate) mod health;
pub(crate) mod notifications;
pub(crate) mod templates;
pub(crate) mod users;
