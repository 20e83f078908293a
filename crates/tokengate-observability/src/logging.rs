use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::init_basic_console_logging;
use crate::metrics::is_observability_enabled;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}

/// Installs the global subscriber.
///
/// Console output is filtered by `RUST_LOG` (default
/// `tokengate=info,tower_http=warn`). Info-level events are also written as
/// JSON to a daily file under `LOG_DIR` (default `storage/logs`); if that
/// directory cannot be created, logging continues on the console only.
pub fn init_tracing() -> anyhow::Result<()> {
    if !is_observability_enabled() {
        return init_basic_console_logging();
    }

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("tokengate=info,tower_http=warn,hyper=info,sqlx=warn")
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string());
    let json_layer = match std::fs::create_dir_all(&log_dir).map_err(anyhow::Error::from).and_then(
        |_| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("tokengate")
                .filename_suffix("json")
                .build(&log_dir)
                .map_err(anyhow::Error::from)
        },
    ) {
        Ok(appender) => Some(
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(EnvFilter::new("info")),
        ),
        Err(e) => {
            eprintln!("⚠️  Failed to open log directory {log_dir}: {e}. Logging to console only");
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()?;

    info!("Tracing initialized");
    Ok(())
}
