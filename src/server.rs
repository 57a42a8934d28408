//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, the expiry sweeper, and the Axum
//! server lifecycle including graceful shutdown.

use crate::application::expiry_sweeper::spawn_expiry_sweeper;
use crate::application::services::{DynLinkService, LinkService};
use crate::config::Config;
use crate::domain::cancellation::CancellationSource;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .acquire_timeout(Duration::from_secs(config.pool.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.pool.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.pool.max_lifetime_secs))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Background expiry sweeper
/// - Axum HTTP server
///
/// On Ctrl+C or SIGTERM the sweeper is cancelled at once, the server stops
/// accepting connections, in-flight requests drain, and the sweeper task is
/// awaited.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let visit_repository: Arc<dyn VisitRepository> = Arc::new(PgVisitRepository::new(pool));
    let link_service: Arc<DynLinkService> =
        Arc::new(LinkService::new(link_repository, visit_repository));

    let shutdown = Arc::new(CancellationSource::new());
    let sweeper = spawn_expiry_sweeper(
        link_service.clone(),
        config.cleanup_interval(),
        shutdown.token(),
    );

    let state = AppState::new(link_service, config.request_timeout());
    let app = app_router(state);

    let addr = config.listen_socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(cancel_on(shutdown_signal(), shutdown.clone()))
    .await?;

    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "Expiry sweeper terminated abnormally");
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Waits for `signal`, then fires `source` before resolving.
///
/// Used as the graceful-shutdown future so background tasks stop while
/// connections are still draining.
async fn cancel_on<F>(signal: F, source: Arc<CancellationSource>)
where
    F: Future<Output = ()>,
{
    signal.await;
    source.cancel();
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_cancel_on_fires_when_signal_arrives() {
        let source = Arc::new(CancellationSource::new());
        let token = source.token();
        let (tx, rx) = oneshot::channel::<()>();

        let shutdown = tokio::spawn(cancel_on(
            async {
                let _ = rx.await;
            },
            source.clone(),
        ));

        tokio::task::yield_now().await;
        assert!(!token.is_cancelled());

        tx.send(()).unwrap();
        shutdown.await.unwrap();

        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_before_drain_completes() {
        use crate::infrastructure::persistence::{
            InMemoryLinkRepository, InMemoryVisitRepository,
        };

        let links: Arc<dyn LinkRepository> = Arc::new(InMemoryLinkRepository::new());
        let visits: Arc<dyn VisitRepository> = Arc::new(InMemoryVisitRepository::new());
        let service: Arc<DynLinkService> = Arc::new(LinkService::new(links, visits));

        let source = Arc::new(CancellationSource::new());
        let sweeper = spawn_expiry_sweeper(service, Duration::from_secs(60), source.token());

        // The graceful-shutdown future resolves; the server may keep draining.
        cancel_on(std::future::ready(()), source.clone()).await;

        tokio::time::timeout(Duration::from_secs(1), sweeper)
            .await
            .expect("sweeper should stop on the shutdown signal")
            .unwrap();
    }
}
