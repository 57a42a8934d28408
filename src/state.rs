//! Shared state injected into every HTTP handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::DynLinkService;
use crate::domain::cancellation::Cancellation;

/// Application state cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Deadline applied to every store call made on behalf of a request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(link_service: Arc<DynLinkService>, request_timeout: Duration) -> Self {
        Self {
            link_service,
            request_timeout,
        }
    }

    /// Cancellation context for one request: no signal, `request_timeout` deadline.
    ///
    /// A client disconnect drops the handler future, which aborts the call
    /// without needing a signal.
    pub fn request_cancellation(&self) -> Cancellation {
        Cancellation::none().with_timeout(self.request_timeout)
    }
}
