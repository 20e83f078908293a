//! Tokengate Observability
//!
//! Provides:
//! - Console logging, plus a rolling JSON log file, via `tracing-subscriber`
//! - Prometheus metrics via `metrics-exporter-prometheus`
//! - HTTP request logging and metrics middleware
//!
//! Compiled in with the `observability` feature (default). At runtime it can
//! be switched off with `OBSERVABILITY_ENABLED=false`, in which case only the
//! console logger is installed and no metrics are recorded.
//!
//! # Examples
//!
//! ```no_run
//! use tokengate_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing().expect("logging");
//!     let _metrics = init_metrics();
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, is_observability_enabled, metrics_app, metrics_middleware, track_login_failure,
    track_login_success, track_token_issued, track_token_refresh, track_user_registered,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Placeholder for the Prometheus handle
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console logging only when the feature is compiled out
    pub fn init_tracing() -> anyhow::Result<()> {
        crate::basic_logging::init_basic_console_logging()
    }

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    pub fn track_user_registered() {}
    pub fn track_login_success() {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_issued(_kind: &str) {}
    pub fn track_token_refresh(_success: bool) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
