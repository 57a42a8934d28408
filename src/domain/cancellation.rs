//! Cancellation and deadline propagation for store calls.
//!
//! A [`CancellationSource`] owns the signal; any number of [`Cancellation`]
//! handles observe it. Every lifecycle operation takes a `&Cancellation` and
//! races its store calls against both the signal and an optional deadline,
//! so an aborted call surfaces as [`AppError::Cancelled`] rather than a
//! storage or not-found error.
//!
//! ```rust,ignore
//! let source = CancellationSource::new();
//! let cancel = source.token().with_timeout(Duration::from_secs(30));
//!
//! let link = cancel.run(|| repository.get_by_id("42")).await?;
//!
//! // Later, at shutdown:
//! source.cancel();
//! ```

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::AppError;

/// Owner of a cancellation signal.
///
/// Dropping the source without calling [`cancel`](Self::cancel) leaves its
/// tokens uncancelled forever.
#[derive(Debug)]
pub struct CancellationSource {
    tx: watch::Sender<bool>,
}

impl CancellationSource {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Returns a handle observing this source, with no deadline.
    pub fn token(&self) -> Cancellation {
        Cancellation {
            rx: Some(self.tx.subscribe()),
            deadline: None,
        }
    }

    /// Fires the signal. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side cancellation context: a signal plus an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    rx: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A context that is never cancelled and has no deadline.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns a copy that also expires `timeout` from now.
    ///
    /// An earlier existing deadline is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns a copy that also expires at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns true if the signal fired or the deadline passed.
    pub fn is_cancelled(&self) -> bool {
        let signalled = self.rx.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        signalled || expired
    }

    /// Resolves once the signal fires. Never resolves if the source is gone.
    pub async fn cancelled(&self) {
        let Some(rx) = &self.rx else {
            return std::future::pending().await;
        };

        let mut rx = rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }

    /// Starts the call built by `call` unless the context is already
    /// cancelled, then races it against the signal and the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Cancelled`] if the signal fires or the deadline
    /// passes before the call completes; otherwise returns the call's own result.
    pub async fn run<T, F, C>(&self, call: C) -> Result<T, AppError>
    where
        C: FnOnce() -> F,
        F: Future<Output = Result<T, AppError>>,
    {
        if self.is_cancelled() {
            return Err(cancelled_error(self.deadline_passed()));
        }

        let fut = call();
        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancelled() => Err(cancelled_error(false)),
                res = fut => res,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, guarded)
                .await
                .unwrap_or_else(|_| Err(cancelled_error(true))),
            None => guarded.await,
        }
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

fn cancelled_error(deadline: bool) -> AppError {
    if deadline {
        AppError::cancelled("Deadline exceeded", json!({ "reason": "deadline" }))
    } else {
        AppError::cancelled("Operation cancelled", json!({ "reason": "cancelled" }))
    }
}
