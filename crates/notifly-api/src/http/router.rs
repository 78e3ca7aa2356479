//! Router construction and server host for the API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Router,
    http::{Method, Request, header::CONTENT_TYPE},
    routing::{get, post},
};
use notifly_telemetry::{Metrics, REQUEST_ID_HEADER, build_sha};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::http::handlers::category_types::{
    create_category_type, delete_category_type, list_category_types, update_category_type,
};
use crate::http::handlers::health::{health, metrics};
use crate::http::handlers::notifications::send_notification;
use crate::http::handlers::templates::{
    create_template, delete_template, list_templates, update_template,
};
use crate::http::handlers::users::{create_user, delete_user, list_users, update_user};
use crate::http::telemetry::HttpMetricsLayer;
use crate::push::PushGateway;
use crate::state::ApiState;

/// Axum router wrapper that hosts the Notifly API services.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Construct a new API server with shared dependencies wired through
    /// application state.
    #[must_use]
    pub fn new(telemetry: Metrics, push: Arc<dyn PushGateway>) -> Self {
        let state = Arc::new(ApiState::new(telemetry.clone(), push));
        Self::with_state(state, telemetry)
    }

    pub(crate) fn with_state(state: Arc<ApiState>, telemetry: Metrics) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let method = request.method().clone();
                let uri_path = request.uri().path();
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();

                tracing::info_span!(
                    "http.request",
                    method = %method,
                    route = %uri_path,
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    let status = response.status().as_u16();
                    span.record("status_code", status);
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(notifly_telemetry::propagate_request_id_layer())
            .layer(notifly_telemetry::set_request_id_layer())
            .layer(trace_layer)
            .layer(HttpMetricsLayer::new(telemetry));

        let router = Self::build_router()
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    fn build_router() -> Router<Arc<ApiState>> {
        Router::new()
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .route(
                "/category-type",
                get(list_category_types).post(create_category_type),
            )
            .route(
                "/category-type/{id}",
                axum::routing::put(update_category_type).delete(delete_category_type),
            )
            .route("/template", get(list_templates).post(create_template))
            .route(
                "/template/{id}",
                axum::routing::put(update_template).delete(delete_template),
            )
            .route("/user", get(list_users).post(create_user))
            .route(
                "/user/{id}",
                axum::routing::put(update_user).delete(delete_user),
            )
            .route("/notification/send", post(send_notification))
    }

    /// Serve the API using the configured router on the supplied address.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        tracing::info!("Starting API on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router.into_make_service()).await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) const fn router(&self) -> &Router {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push::NoopPushGateway;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    fn server() -> ApiServer {
        let telemetry = Metrics::new().expect("metrics");
        ApiServer::new(telemetry, Arc::new(NoopPushGateway))
    }

    #[tokio::test]
    async fn health_route_responds() {
        let response = server()
            .router()
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn metrics_route_renders_exposition() {
        let response = server()
            .router()
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = server()
            .router()
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_category_type_over_http_round_trips() {
        let response = server()
            .router()
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/category-type")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Alerts"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
