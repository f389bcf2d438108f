use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_backoffice::config::{DatabaseConfig, EnvironmentConfig};
use fleet_backoffice::database::DatabaseConnection;
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::routes::create_router;
use fleet_backoffice::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚚 Fleet back office API");

    let config = EnvironmentConfig::from_env().context("invalid service configuration")?;
    let db_config = DatabaseConfig::from_env().context("invalid database configuration")?;

    let db = match DatabaseConnection::connect(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("❌ Could not connect to the database: {}", e);
            return Err(anyhow::anyhow!("database error: {}", e));
        }
    };

    if config.run_migrations {
        db.run_migrations().await.context("migrations failed")?;
    } else {
        warn!("⚠️ RUN_MIGRATIONS=false, skipping schema migrations");
    }

    let address = config.server_address();
    let repositories = Repositories::postgres(db.pool().clone());
    let app = create_router(AppState::new(config, repositories));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("could not bind {}", address))?;
    info!("🌐 Listening on http://{}/api/v1", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ Could not listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C received, shutting down"),
        _ = terminate => info!("🛑 Termination signal received, shutting down"),
    }
}
