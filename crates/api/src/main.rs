use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use allotment_api::config::{ConfigError, LogFormat, ServerConfig};
use allotment_api::router::build_app_router;
use allotment_api::state::AppState;

/// Anything that stops the server from coming up or running.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid HOST address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "allotment_api=debug,allotment_db=info,tower_http=debug".into()
    });
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

async fn run() -> Result<(), StartupError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        api_domain = %config.api_domain,
        frontend_domain = %config.frontend_domain,
        frontend_path = %config.frontend_path.display(),
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = allotment_db::create_pool(&config.database_url).await?;
    tracing::info!(database_url = %config.database_url, "Database connection pool created");

    allotment_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    allotment_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // --- App state ---
    let addr = SocketAddr::new(config.host.parse::<IpAddr>()?, config.port);
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config),
    };

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pool");
    pool.close().await;
    tracing::info!("Server shut down");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
