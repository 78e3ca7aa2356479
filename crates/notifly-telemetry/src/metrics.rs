//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the handful of counters/gauges the API surfaces today.

use anyhow::{Context, Result};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: std::sync::Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    notifications_sent_total: IntCounter,
    notifications_failed_total: IntCounter,
    category_types: IntGauge,
}

/// Snapshot of selected gauges and counters for health reporting.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    /// Total notifications accepted by the push gateway.
    pub notifications_sent_total: u64,
    /// Total notification sends rejected by the push gateway.
    pub notifications_failed_total: u64,
    /// Current number of configured category types.
    pub category_types: i64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests received"),
            &["route", "code"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency by route",
            ),
            &["route"],
        )?;
        let notifications_sent_total = IntCounter::with_opts(Opts::new(
            "notifications_sent_total",
            "Notifications accepted by the push gateway",
        ))?;
        let notifications_failed_total = IntCounter::with_opts(Opts::new(
            "notifications_failed_total",
            "Notification sends rejected by the push gateway",
        ))?;
        let category_types =
            IntGauge::with_opts(Opts::new("category_types", "Configured category types"))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(notifications_sent_total.clone()))?;
        registry.register(Box::new(notifications_failed_total.clone()))?;
        registry.register(Box::new(category_types.clone()))?;

        Ok(Self {
            inner: std::sync::Arc::new(MetricsInner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                notifications_sent_total,
                notifications_failed_total,
                category_types,
            }),
        })
    }

    /// Record a completed HTTP request.
    pub fn observe_http_request(&self, route: &str, code: u16, latency_seconds: f64) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &code.to_string()])
            .inc();
        self.inner
            .http_request_duration_seconds
            .with_label_values(&[route])
            .observe(latency_seconds);
    }

    /// Record a notification accepted by the push gateway.
    pub fn inc_notification_sent(&self) {
        self.inner.notifications_sent_total.inc();
    }

    /// Record a notification rejected by the push gateway.
    pub fn inc_notification_failed(&self) {
        self.inner.notifications_failed_total.inc();
    }

    /// Update the category-type gauge after a mutation.
    pub fn set_category_types(&self, count: i64) {
        self.inner.category_types.set(count);
    }

    /// Read the values surfaced by the health endpoint.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            notifications_sent_total: self.inner.notifications_sent_total.get(),
            notifications_failed_total: self.inner.notifications_failed_total.get(),
            category_types: self.inner.category_types.get(),
        }
    }

    /// Render the registry in the prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding the metric families fails.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.inner.registry.gather(), &mut buffer)
            .context("failed to encode metrics")?;
        String::from_utf8(buffer).context("metrics output was not valid UTF-8")
    }
}
