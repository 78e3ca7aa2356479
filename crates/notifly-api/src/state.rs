//! API application state and in-memory repositories.
//!
//! Persistence is deliberately out of scope for this service; records live in
//! `Mutex`-guarded maps owned by the state. Handlers take the locks through
//! the accessor methods below so lock scope stays small and consistent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use notifly_api_models::{CategoryType, Template, UserAccount};
use notifly_telemetry::Metrics;
use uuid::Uuid;

use crate::push::PushGateway;

/// Shared state threaded through every handler.
pub struct ApiState {
    pub(crate) telemetry: Metrics,
    pub(crate) push: Arc<dyn PushGateway>,
    started_at: Instant,
    categories: Mutex<HashMap<Uuid, CategoryType>>,
    templates: Mutex<HashMap<Uuid, Template>>,
    users: Mutex<HashMap<Uuid, UserAccount>>,
}

impl ApiState {
    /// Construct state with empty repositories.
    #[must_use]
    pub fn new(telemetry: Metrics, push: Arc<dyn PushGateway>) -> Self {
        Self {
            telemetry,
            push,
            started_at: Instant::now(),
            categories: Mutex::new(HashMap::new()),
            templates: Mutex::new(HashMap::new()),
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Seconds since the state was constructed.
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// All category types sorted by case-insensitive name.
    pub(crate) fn list_categories(&self) -> Vec<CategoryType> {
        let guard = Self::lock_guard(&self.categories, "categories");
        let mut items: Vec<CategoryType> = guard.values().cloned().collect();
        drop(guard);
        items.sort_by_key(|item| item.name.to_lowercase());
        items
    }

    /// Whether a category name is already used by another record.
    pub(crate) fn category_name_taken(&self, name: &str, exclude: Option<Uuid>) -> bool {
        let needle = name.trim().to_lowercase();
        Self::lock_guard(&self.categories, "categories")
            .values()
            .any(|item| Some(item.id) != exclude && item.name.to_lowercase() == needle)
    }

    pub(crate) fn insert_category(&self, category: CategoryType) {
        let mut guard = Self::lock_guard(&self.categories, "categories");
        guard.insert(category.id, category);
        let count = i64::try_from(guard.len()).unwrap_or(i64::MAX);
        drop(guard);
        self.telemetry.set_category_types(count);
    }

    pub(crate) fn category_exists(&self, id: Uuid) -> bool {
        Self::lock_guard(&self.categories, "categories").contains_key(&id)
    }

    /// Replace an existing category; `false` when the id is unknown.
    pub(crate) fn replace_category(&self, category: CategoryType) -> bool {
        let mut guard = Self::lock_guard(&self.categories, "categories");
        if !guard.contains_key(&category.id) {
            return false;
        }
        guard.insert(category.id, category);
        true
    }

    /// Remove a category; `false` when the id is unknown.
    pub(crate) fn remove_category(&self, id: Uuid) -> bool {
        let mut guard = Self::lock_guard(&self.categories, "categories");
        let removed = guard.remove(&id).is_some();
        let count = i64::try_from(guard.len()).unwrap_or(i64::MAX);
        drop(guard);
        if removed {
            self.telemetry.set_category_types(count);
        }
        removed
    }

    /// All templates in unspecified order; callers sort per query.
    pub(crate) fn list_templates(&self) -> Vec<Template> {
        Self::lock_guard(&self.templates, "templates")
            .values()
            .cloned()
            .collect()
    }

    pub(crate) fn insert_template(&self, template: Template) {
        let mut guard = Self::lock_guard(&self.templates, "templates");
        guard.insert(template.id, template);
    }

    /// Replace an existing template; `false` when the id is unknown.
    pub(crate) fn replace_template(&self, template: Template) -> bool {
        let mut guard = Self::lock_guard(&self.templates, "templates");
        if !guard.contains_key(&template.id) {
            return false;
        }
        guard.insert(template.id, template);
        true
    }

    /// Remove a template; `false` when the id is unknown.
    pub(crate) fn remove_template(&self, id: Uuid) -> bool {
        Self::lock_guard(&self.templates, "templates")
            .remove(&id)
            .is_some()
    }

    /// All users sorted by email.
    pub(crate) fn list_users(&self) -> Vec<UserAccount> {
        let guard = Self::lock_guard(&self.users, "users");
        let mut items: Vec<UserAccount> = guard.values().cloned().collect();
        drop(guard);
        items.sort_by_key(|item| item.email.to_lowercase());
        items
    }

    /// Whether an email is already registered to another user.
    pub(crate) fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> bool {
        let needle = email.trim().to_lowercase();
        Self::lock_guard(&self.users, "users")
            .values()
            .any(|item| Some(item.id) != exclude && item.email.to_lowercase() == needle)
    }

    pub(crate) fn insert_user(&self, user: UserAccount) {
        let mut guard = Self::lock_guard(&self.users, "users");
        guard.insert(user.id, user);
    }

    /// Replace an existing user; `false` when the id is unknown.
    pub(crate) fn replace_user(&self, user: UserAccount) -> bool {
        let mut guard = Self::lock_guard(&self.users, "users");
        if !guard.contains_key(&user.id) {
            return false;
        }
        guard.insert(user.id, user);
        true
    }

    /// Remove a user; `false` when the id is unknown.
    pub(crate) fn remove_user(&self, id: Uuid) -> bool {
        Self::lock_guard(&self.users, "users").remove(&id).is_some()
    }

    fn lock_guard<'a, T>(mutex: &'a Mutex<T>, name: &'a str) -> MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(|err| {
            panic!("failed to lock {name}: {err}");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push::NoopPushGateway;
    use chrono::Utc;

    fn state() -> ApiState {
        ApiState::new(Metrics::new().expect("metrics"), Arc::new(NoopPushGateway))
    }

    fn category(name: &str) -> CategoryType {
        CategoryType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn categories_list_sorted_by_name() {
        let state = state();
        state.insert_category(category("Promotions"));
        state.insert_category(category("alerts"));
        let names: Vec<String> = state
            .list_categories()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["alerts".to_string(), "Promotions".to_string()]);
    }

    #[test]
    fn duplicate_name_check_ignores_case_and_self() {
        let state = state();
        let existing = category("Alerts");
        let id = existing.id;
        state.insert_category(existing);
        assert!(state.category_name_taken("alerts", None));
        assert!(!state.category_name_taken("alerts", Some(id)));
        assert!(!state.category_name_taken("digest", None));
    }

    #[test]
    fn replace_and_remove_report_missing_ids() {
        let state = state();
        let item = category("Alerts");
        assert!(!state.replace_category(item.clone()));
        state.insert_category(item.clone());
        assert!(state.replace_category(item.clone()));
        assert!(state.remove_category(item.id));
        assert!(!state.remove_category(item.id));
    }
}
