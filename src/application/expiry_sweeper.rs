//! Background task that periodically purges expired links.
//!
//! The sweeper wakes once per interval and calls
//! [`LinkService::cleanup_expired_links`]. A failed sweep is logged and
//! retried on the next tick. The shutdown [`Cancellation`] is observed both
//! while waiting for a tick and during the sweep itself, so the task stops
//! promptly even if the store call is in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::application::services::LinkService;
use crate::domain::cancellation::Cancellation;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Default sweep interval.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawns [`run_expiry_sweeper`] on the runtime.
pub fn spawn_expiry_sweeper<L, V>(
    service: Arc<LinkService<L, V>>,
    interval: Duration,
    shutdown: Cancellation,
) -> JoinHandle<()>
where
    L: LinkRepository + ?Sized + 'static,
    V: VisitRepository + ?Sized + 'static,
{
    tokio::spawn(run_expiry_sweeper(service, interval, shutdown))
}

/// Runs sweeps every `interval` until `shutdown` fires.
///
/// The first sweep happens one full interval after start. Missed ticks are
/// not replayed in a burst.
pub async fn run_expiry_sweeper<L, V>(
    service: Arc<LinkService<L, V>>,
    interval: Duration,
    shutdown: Cancellation,
) where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_secs = interval.as_secs(), "Expiry sweeper started");

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match service.cleanup_expired_links(&shutdown).await {
            Ok(0) => debug!("Expiry sweep found nothing to remove"),
            Ok(removed) => info!(removed, "Expired links cleaned"),
            Err(AppError::Cancelled { .. }) => break,
            Err(e) => warn!(error = %e, "Expiry sweep failed, retrying on next tick"),
        }
    }

    info!("Expiry sweeper stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cancellation::CancellationSource;
    use crate::domain::entities::{Link, LinkUpdate, NewLink};
    use crate::domain::repositories::MockVisitRepository;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Behavior {
        Succeed,
        Fail,
        Hang,
    }

    /// Link store that only answers `delete_expired`, counting calls.
    struct CountingStore {
        calls: AtomicUsize,
        behavior: Behavior,
    }

    impl CountingStore {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                behavior,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LinkRepository for CountingStore {
        async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
            unimplemented!()
        }

        async fn get_by_id(&self, _id: &str) -> Result<Link, AppError> {
            unimplemented!()
        }

        async fn update(&self, _update: LinkUpdate) -> Result<Link, AppError> {
            unimplemented!()
        }

        async fn delete(&self, _id: &str) -> Result<(), AppError> {
            unimplemented!()
        }

        async fn increment_clicks(&self, _id: &str) -> Result<(), AppError> {
            unimplemented!()
        }

        async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => Ok(1),
                Behavior::Fail => Err(AppError::storage("Database error", json!({}))),
                Behavior::Hang => std::future::pending().await,
            }
        }

        async fn ping(&self) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn start(store: Arc<CountingStore>, source: &CancellationSource) -> JoinHandle<()> {
        let service = Arc::new(LinkService::new(
            store,
            Arc::new(MockVisitRepository::new()),
        ));
        spawn_expiry_sweeper(service, DEFAULT_SWEEP_INTERVAL, source.token())
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sweep_before_first_interval() {
        let store = CountingStore::new(Behavior::Succeed);
        let source = CancellationSource::new();
        let handle = start(store.clone(), &source);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(store.calls(), 0);

        source.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_once_per_interval() {
        let store = CountingStore::new(Behavior::Succeed);
        let source = CancellationSource::new();
        let handle = start(store.clone(), &source);

        tokio::time::sleep(Duration::from_secs(185)).await;
        assert_eq!(store.calls(), 3);

        source.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_sweep_does_not_stop_sweeper() {
        let store = CountingStore::new(Behavior::Fail);
        let source = CancellationSource::new();
        let handle = start(store.clone(), &source);

        tokio::time::sleep(Duration::from_secs(125)).await;
        assert_eq!(store.calls(), 2);
        assert!(!handle.is_finished());

        source.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_while_idle_stops_sweeper() {
        let store = CountingStore::new(Behavior::Succeed);
        let source = CancellationSource::new();
        let handle = start(store.clone(), &source);

        source.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop promptly")
            .unwrap();
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_in_flight_sweep() {
        let store = CountingStore::new(Behavior::Hang);
        let source = CancellationSource::new();
        let handle = start(store.clone(), &source);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(store.calls(), 1);

        source.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("in-flight sweep should be abandoned")
            .unwrap();
    }
}
