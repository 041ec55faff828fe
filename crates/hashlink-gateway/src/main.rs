use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use hashlink_gateway::config::{load_env_file, StorageBackendArg};
use hashlink_gateway::{App, AppState, Cli};
use hashlink_mapper::MappingService;
use hashlink_storage::{InMemoryRepository, MySqlRepository, Repository};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = load_env_file().context("failed to load env file")?;
    let config = Cli::parse();

    hashlink_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr(),
        mode = %config.mode,
        storage_backend = %config.storage,
        env_file = ?env_file,
        "starting gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            let service = MappingService::new(InMemoryRepository::new());
            serve(&config, service).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = Arc::new(MySqlRepository::connect(mysql_dsn).await?);
            repository.ensure_schema().await?;

            let result = serve(&config, MappingService::from_shared(Arc::clone(&repository))).await;
            repository.close().await;
            info!("storage pool closed");
            result?;
        }
    }

    Ok(())
}

async fn serve<R: Repository>(config: &Cli, service: MappingService<R>) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(service), config.mode);

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr()))?;
    info!(listen_addr = %listener.local_addr()?, "API running");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
