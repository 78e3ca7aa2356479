//! Template CRUD and paginated listing.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use notifly_api_models::{
    ApiEnvelope, DEFAULT_PAGE_SIZE, ErrorCode, PageMeta, PageRequest, PageResult, Template,
    TemplateFormat, TemplateLanguage, TemplateRequest,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::http::errors::ApiError;
use crate::state::ApiState;

/// Query parameters accepted by the template listing.
///
/// Page fields are spelled out rather than flattened because
/// `serde_urlencoded` cannot drive `#[serde(flatten)]` defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplateListQuery {
    #[serde(default = "default_page")]
    pub(crate) page: u32,
    #[serde(default = "default_size")]
    pub(crate) size: u32,
    #[serde(default)]
    pub(crate) language: Option<TemplateLanguage>,
    #[serde(default)]
    pub(crate) format: Option<TemplateFormat>,
    /// Sort direction over the title; defaults to ascending.
    #[serde(default = "default_ascending")]
    pub(crate) is_ascending: bool,
}

const fn default_page() -> u32 {
    1
}

const fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_ascending() -> bool {
    true
}

pub(crate) async fn list_templates(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TemplateListQuery>,
) -> Result<Json<ApiEnvelope<PageResult<Template>>>, ApiError> {
    let mut items = state.list_templates();
    items.retain(|item| {
        query.language.is_none_or(|wanted| item.language == wanted)
            && query.format.is_none_or(|wanted| item.format == wanted)
    });
    items.sort_by(|a, b| {
        let ordering = a.title.to_lowercase().cmp(&b.title.to_lowercase());
        if query.is_ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    let total_count = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let window = PageRequest {
        page: query.page,
        size: query.size,
    }
    .normalize();
    let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
    let take = usize::try_from(window.take).unwrap_or(usize::MAX);
    let page_items: Vec<Template> = items.into_iter().skip(skip).take(take).collect();
    let item_count = u32::try_from(page_items.len()).unwrap_or(u32::MAX);
    let meta = PageMeta::compute(query.page.max(1), window.take, total_count, item_count);

    Ok(Json(ApiEnvelope::ok(PageResult {
        items: page_items,
        meta,
    })))
}

pub(crate) async fn create_template(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<TemplateRequest>,
) -> Result<Json<ApiEnvelope<Template>>, ApiError> {
    validate(&request)?;
    let template = Template {
        id: Uuid::new_v4(),
        title: request.title.trim().to_string(),
        body: request.body,
        language: request.language,
        format: request.format,
        updated_at: Utc::now(),
    };
    state.insert_template(template.clone());
    info!(template_id = %template.id, "template created");
    Ok(Json(ApiEnvelope::ok(template)))
}

pub(crate) async fn update_template(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<TemplateRequest>,
) -> Result<Json<ApiEnvelope<Template>>, ApiError> {
    validate(&request)?;
    let template = Template {
        id,
        title: request.title.trim().to_string(),
        body: request.body,
        language: request.language,
        format: request.format,
        updated_at: Utc::now(),
    };
    if !state.replace_template(template.clone()) {
        return Err(not_found(id));
    }
    info!(template_id = %id, "template updated");
    Ok(Json(ApiEnvelope::ok(template)))
}

pub(crate) async fn delete_template(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiEnvelope<Uuid>>, ApiError> {
    if !state.remove_template(id) {
        return Err(not_found(id));
    }
    info!(template_id = %id, "template deleted");
    Ok(Json(ApiEnvelope::ok(id)))
}

fn validate(request: &TemplateRequest) -> Result<(), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request(
            ErrorCode::MissingRequiredField,
            "template title must not be empty",
        ));
    }
    if request.body.trim().is_empty() {
        return Err(ApiError::bad_request(
            ErrorCode::MissingRequiredField,
            "template body must not be empty",
        ));
    }
    Ok(())
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::not_found(
        ErrorCode::TemplateNotFound,
        format!("template {id} not found"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push::NoopPushGateway;
    use notifly_telemetry::Metrics;

    fn state() -> Arc<ApiState> {
        Arc::new(ApiState::new(
            Metrics::new().expect("metrics"),
            Arc::new(NoopPushGateway),
        ))
    }

    fn request(title: &str, language: TemplateLanguage) -> TemplateRequest {
        TemplateRequest {
            title: title.to_string(),
            body: "Hello {name}".to_string(),
            language,
            format: TemplateFormat::Text,
        }
    }

    fn query(page: u32, size: u32) -> TemplateListQuery {
        TemplateListQuery {
            page,
            size,
            language: None,
            format: None,
            is_ascending: true,
        }
    }

    async fn seed(state: &Arc<ApiState>, titles: &[&str]) {
        for title in titles {
            let _ = create_template(
                State(state.clone()),
                Json(request(title, TemplateLanguage::En)),
            )
            .await
            .expect("create");
        }
    }

    #[tokio::test]
    async fn listing_pages_and_sorts_by_title() {
        let state = state();
        seed(&state, &["Charlie", "alpha", "Bravo"]).await;

        let mut q = query(1, 2);
        let page = list_templates(State(state.clone()), Query(q))
            .await
            .expect("list")
            .0
            .data
            .expect("data");
        let titles: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Bravo"]);
        assert_eq!(page.meta.total_count, 3);
        assert_eq!(page.meta.page_count, 2);
        assert!(page.meta.has_next_page);

        q = query(2, 2);
        let page = list_templates(State(state), Query(q))
            .await
            .expect("list")
            .0
            .data
            .expect("data");
        let titles: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Charlie"]);
        assert!(page.meta.has_previous_page);
        assert!(!page.meta.has_next_page);
    }

    #[tokio::test]
    async fn descending_sort_reverses_titles() {
        let state = state();
        seed(&state, &["alpha", "Bravo"]).await;
        let q = TemplateListQuery {
            is_ascending: false,
            ..query(1, 10)
        };
        let page = list_templates(State(state), Query(q))
            .await
            .expect("list")
            .0
            .data
            .expect("data");
        let titles: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Bravo", "alpha"]);
    }

    #[tokio::test]
    async fn language_filter_narrows_results() {
        let state = state();
        let _ = create_template(
            State(state.clone()),
            Json(request("English", TemplateLanguage::En)),
        )
        .await
        .expect("create");
        let _ = create_template(
            State(state.clone()),
            Json(request("Khmer", TemplateLanguage::Km)),
        )
        .await
        .expect("create");

        let q = TemplateListQuery {
            language: Some(TemplateLanguage::Km),
            ..query(1, 10)
        };
        let page = list_templates(State(state), Query(q))
            .await
            .expect("list")
            .0
            .data
            .expect("data");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Khmer");
    }

    #[tokio::test]
    async fn past_the_end_page_is_empty_with_accurate_meta() {
        let state = state();
        seed(&state, &["alpha", "Bravo", "Charlie"]).await;
        let page = list_templates(State(state), Query(query(9, 2)))
            .await
            .expect("list")
            .0
            .data
            .expect("data");
        assert!(page.items.is_empty());
        assert_eq!(page.meta.page, 9);
        assert_eq!(page.meta.page_count, 2);
        assert_eq!(page.meta.total_count, 3);
    }

    #[tokio::test]
    async fn oversized_page_size_is_clamped_to_the_maximum() {
        let state = state();
        seed(&state, &["alpha", "Bravo", "Charlie"]).await;
        let page = list_templates(State(state), Query(query(1, 101)))
            .await
            .expect("list")
            .0
            .data
            .expect("data");
        assert_eq!(page.meta.size, notifly_api_models::MAX_PAGE_SIZE);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.meta.page_count, 1);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let state = state();
        let err = create_template(
            State(state),
            Json(request("   ", TemplateLanguage::En)),
        )
        .await
        .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::MissingRequiredField);
    }

    #[tokio::test]
    async fn update_and_delete_miss_report_not_found() {
        let state = state();
        let missing = Uuid::new_v4();
        let err = update_template(
            State(state.clone()),
            Path(missing),
            Json(request("A", TemplateLanguage::En)),
        )
        .await
        .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::TemplateNotFound);

        let err = delete_template(State(state), Path(missing))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::TemplateNotFound);
    }
}
