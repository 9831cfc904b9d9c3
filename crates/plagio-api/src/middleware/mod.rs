//! # Middleware Stack
//!
//! - [`metrics`]: Prometheus request metrics and domain counters.
//!
//! Request tracing uses `tower_http::trace::TraceLayer` directly in
//! [`app`](crate::app).

pub mod metrics;
