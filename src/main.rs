//! `taskflow` HTTP server.
//!
//! Reads configuration from the environment, checks the database, and
//! serves the task routes until SIGINT or SIGTERM.

use anyhow::Context;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use taskflow::api;
use taskflow::config::Config;
use taskflow::notification::Notifier;
use taskflow::notification::adapters::{LogNotifier, SmtpNotifier};
use taskflow::storage::{PgPool, PostgresWorkflowStore};
use taskflow::task::services::TaskLifecycleService;
use taskflow::telemetry;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init().context("install tracing subscriber")?;
    let config = Config::from_env().context("load configuration")?;

    let pool = connect(&config).context("connect to database")?;
    info!("database connection established");
    let store = Arc::new(PostgresWorkflowStore::new(pool));

    match &config.smtp {
        Some(settings) => {
            let notifier = SmtpNotifier::new(settings).context("configure SMTP notifier")?;
            info!(host = %settings.host, port = settings.port, "notifications via SMTP");
            serve(&config, store, Arc::new(notifier)).await
        }
        None => {
            warn!("SMTP_HOST unset; notifications will only be logged");
            serve(&config, store, Arc::new(LogNotifier)).await
        }
    }
}

/// Builds the pool and checks out one connection so an unreachable database
/// fails startup.
fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(&config.database.url);
    let pool = Pool::builder()
        .max_size(config.database.pool_size)
        .connection_timeout(config.database.timeout)
        .build(manager)?;
    drop(pool.get()?);
    Ok(pool)
}

async fn serve<N>(
    config: &Config,
    store: Arc<PostgresWorkflowStore>,
    notifier: Arc<N>,
) -> anyhow::Result<()>
where
    N: Notifier + 'static,
{
    let service = TaskLifecycleService::new(store, notifier, Arc::new(DefaultClock));
    let app = api::router(service);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    info!(address = %config.bind, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "could not listen for Ctrl+C");
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
                warn!(error = %err, "could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
