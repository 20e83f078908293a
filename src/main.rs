use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{error, info};

use tokengate::modules::users::{InMemoryUserStore, PgUserStore, UserStore};
use tokengate::router::init_router;
use tokengate::state::AppState;
use tokengate_config::{AppConfig, ServerConfig, UserStoreKind};
use tokengate_db::{init_db_pool, run_migrations};
use tokengate_observability::{init_metrics, init_tracing, metrics_app};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("❌ Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let users = init_user_store(&config.server).await?;
    let state = AppState::new(&config, users)?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "🚀 Server running");
    info!("📖 Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn init_user_store(server: &ServerConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    match server.user_store {
        UserStoreKind::Postgres => {
            let database_url = server
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
            let pool = init_db_pool(database_url).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        UserStoreKind::Memory => {
            info!("Using in-memory user store; data is lost on restart");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
    }
}
