//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Domain counters (stored documents, rejected duplicates, cache
//! outcomes) are incremented by the route handlers as events happen.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use plagio_analysis::CacheStatus;
use prometheus::{
    core::Collector, Encoder, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    documents_stored_total: IntCounter,
    duplicate_uploads_total: IntCounter,
    analysis_cache_total: IntCounterVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("plagio_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "plagio_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new("plagio_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let documents_stored_total = IntCounter::new(
            "plagio_documents_stored_total",
            "Documents newly stored by the file service",
        )
        .expect("metric can be created");

        let duplicate_uploads_total = IntCounter::new(
            "plagio_duplicate_uploads_total",
            "Uploads rejected because identical content was already stored",
        )
        .expect("metric can be created");

        let analysis_cache_total = IntCounterVec::new(
            Opts::new("plagio_analysis_cache_total", "Analysis requests by cache outcome"),
            &["outcome"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(documents_stored_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(duplicate_uploads_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(analysis_cache_total.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                documents_stored_total,
                duplicate_uploads_total,
                analysis_cache_total,
            }),
        }
    }

    /// Return current total request count (sum across all labels).
    pub fn requests(&self) -> u64 {
        sum_counters(&self.inner.http_requests_total)
    }

    /// Return current total error count (sum across all labels).
    pub fn errors(&self) -> u64 {
        sum_counters(&self.inner.http_errors_total)
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Count a newly stored document.
    pub fn record_stored(&self) {
        self.inner.documents_stored_total.inc();
    }

    /// Count an upload rejected as a duplicate.
    pub fn record_duplicate(&self) {
        self.inner.duplicate_uploads_total.inc();
    }

    /// Count an analysis answered with `status`.
    pub fn record_analysis(&self, status: CacheStatus) {
        self.inner
            .analysis_cache_total
            .with_label_values(&[status.as_str()])
            .inc();
    }

    /// Number of documents stored since startup.
    pub fn documents_stored(&self) -> u64 {
        self.inner.documents_stored_total.get()
    }

    /// Number of duplicate uploads since startup.
    pub fn duplicate_uploads(&self) -> u64 {
        self.inner.duplicate_uploads_total.get()
    }

    /// Number of analyses answered with `status` since startup.
    pub fn analyses(&self, status: CacheStatus) -> u64 {
        self.inner
            .analysis_cache_total
            .with_label_values(&[status.as_str()])
            .get()
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_counters(vec: &IntCounterVec) -> u64 {
    let mut total = 0u64;
    for mf in &vec.collect() {
        for m in mf.get_metric() {
            total += m.get_counter().get_value() as u64;
        }
    }
    total
}

/// Normalize a request path by replacing UUID segments with `{id}`.
///
/// Prevents cardinality explosion in Prometheus labels.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.len() == 36
                && segment.chars().enumerate().all(|(i, c)| {
                    if i == 8 || i == 13 || i == 18 || i == 23 {
                        c == '-'
                    } else {
                        c.is_ascii_hexdigit()
                    }
                })
            {
                "{id}"
            } else if segment.len() == 32 && segment.chars().all(|c| c.is_ascii_hexdigit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Middleware that records HTTP request metrics via Prometheus.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}
