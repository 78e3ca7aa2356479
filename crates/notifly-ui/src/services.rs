//! Browser-side service layer: HTTP client, localStorage backend, and
//! persisted preferences.

use gloo::storage::{LocalStorage, Storage};
use gloo_net::http::Request;
use notifly_api_models::{
    ApiEnvelope, CategoryType, CategoryTypeRequest, PageResult, SendNotificationRequest,
    SendNotificationResponse, Template, TemplateFormat, TemplateLanguage,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::core::cache::{CategoryCache, KeyValueStore, StoreOutcome};
use crate::core::notify::ApiFailure;
use crate::core::pagination::template_list_path;

/// Persisted slot for the session token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Persisted slot for the preferred console language.
pub const APP_LANGUAGE_KEY: &str = "app_language";

/// Read the persisted session token, if any.
#[must_use]
pub fn load_auth_token() -> Option<String> {
    let value = raw_read(AUTH_TOKEN_KEY)?;
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}

/// Read the persisted console language, defaulting to English.
#[must_use]
pub fn load_app_language() -> String {
    raw_read(APP_LANGUAGE_KEY).unwrap_or_else(|| "en".to_string())
}

fn raw_read(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).ok().flatten()
}

/// [`KeyValueStore`] backed by browser localStorage.
///
/// Raw string access; the cache owns its own JSON encoding, so values are
/// stored verbatim rather than re-wrapped by a serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        raw_read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| format!("{err:?}"))
    }

    fn delete(&mut self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

/// HTTP client for the Notifly API, decoding the shared envelope.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Client rooted at the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    /// Attach a bearer token to every request; `None` leaves them anonymous.
    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    fn authorize(&self, request: Request) -> Request {
        match &self.auth_token {
            Some(token) => request.header("authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    /// Category types, served from the cache when fresh.
    ///
    /// `force_refresh` bypasses the cache; a failed fetch leaves any
    /// existing cache untouched.
    ///
    /// # Errors
    ///
    /// Returns the translated failure when the network request fails or the
    /// server responds with an error envelope.
    pub async fn category_types(
        &self,
        cache: &mut CategoryCache<LocalStore>,
        force_refresh: bool,
        now_ms: i64,
    ) -> Result<Vec<CategoryType>, ApiFailure> {
        if !force_refresh {
            if let Some(cached) = cache.load(now_ms) {
                return Ok(cached);
            }
        }
        let items: Vec<CategoryType> = self.get_json("/category-type").await?;
        if cache.store(items.clone(), now_ms) == StoreOutcome::MemoryOnly {
            gloo::console::warn!("category cache degraded to memory-only for this session");
        }
        Ok(items)
    }

    /// Create a category type and fold it into the cache.
    ///
    /// # Errors
    ///
    /// Returns the translated failure when the request is rejected.
    pub async fn create_category_type(
        &self,
        cache: &mut CategoryCache<LocalStore>,
        request: &CategoryTypeRequest,
        now_ms: i64,
    ) -> Result<CategoryType, ApiFailure> {
        let created: CategoryType = self.post_json("/category-type", request).await?;
        cache.upsert(created.clone(), now_ms);
        Ok(created)
    }

    /// Update a category type and fold it into the cache.
    ///
    /// # Errors
    ///
    /// Returns the translated failure when the request is rejected.
    pub async fn update_category_type(
        &self,
        cache: &mut CategoryCache<LocalStore>,
        id: Uuid,
        request: &CategoryTypeRequest,
        now_ms: i64,
    ) -> Result<CategoryType, ApiFailure> {
        let updated: CategoryType = self.put_json(&format!("/category-type/{id}"), request).await?;
        cache.upsert(updated.clone(), now_ms);
        Ok(updated)
    }

    /// Delete a category type and drop it from the cache.
    ///
    /// # Errors
    ///
    /// Returns the translated failure when the request is rejected.
    pub async fn delete_category_type(
        &self,
        cache: &mut CategoryCache<LocalStore>,
        id: Uuid,
        now_ms: i64,
    ) -> Result<(), ApiFailure> {
        let _: Uuid = self.delete_json(&format!("/category-type/{id}")).await?;
        cache.remove(id, now_ms);
        Ok(())
    }

    /// One page of the template list.
    ///
    /// # Errors
    ///
    /// Returns the translated failure when the request is rejected.
    pub async fn templates(
        &self,
        page: u32,
        size: u32,
        language: Option<TemplateLanguage>,
        format: Option<TemplateFormat>,
        is_ascending: bool,
    ) -> Result<PageResult<Template>, ApiFailure> {
        self.get_json(&template_list_path(page, size, language, format, is_ascending))
            .await
    }

    /// Submit a notification for delivery.
    ///
    /// # Errors
    ///
    /// Returns the translated failure when the request is rejected.
    pub async fn send_notification(
        &self,
        request: &SendNotificationRequest,
    ) -> Result<SendNotificationResponse, ApiFailure> {
        self.post_json("/notification/send", request).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiFailure> {
        let response = self
            .authorize(Request::get(&format!("{}{path}", self.base_url)))
            .send()
            .await
            .map_err(|_| ApiFailure::Network)?;
        Self::unwrap_envelope(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiFailure> {
        let response = self
            .authorize(Request::post(&format!("{}{path}", self.base_url)))
            .json(body)
            .map_err(|_| ApiFailure::Network)?
            .send()
            .await
            .map_err(|_| ApiFailure::Network)?;
        Self::unwrap_envelope(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiFailure> {
        let response = self
            .authorize(Request::put(&format!("{}{path}", self.base_url)))
            .json(body)
            .map_err(|_| ApiFailure::Network)?
            .send()
            .await
            .map_err(|_| ApiFailure::Network)?;
        Self::unwrap_envelope(response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiFailure> {
        let response = self
            .authorize(Request::delete(&format!("{}{path}", self.base_url)))
            .send()
            .await
            .map_err(|_| ApiFailure::Network)?;
        Self::unwrap_envelope(response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        response: gloo_net::http::Response,
    ) -> Result<T, ApiFailure> {
        let status = response.status();
        match response.json::<ApiEnvelope<T>>().await {
            Ok(envelope) => {
                if let Some(data) = envelope.data {
                    return Ok(data);
                }
                match envelope.error_code {
                    Some(error_code) => Err(ApiFailure::Envelope {
                        error_code,
                        message: envelope.response_message,
                    }),
                    None => Err(ApiFailure::Status(status)),
                }
            }
            Err(_) => Err(ApiFailure::Status(status)),
        }
    }
}
