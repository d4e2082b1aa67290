//! The fetch hook: one cancellable API call at a time, with observable state.
//!
//! A [`Fetcher`] belongs to a single view. Each call to [`Fetcher::fetch`] cancels the call
//! before it, so only the most recent call can publish a result. Dropping the fetcher
//! cancels whatever is still in flight and nothing is published afterwards.

use super::{ApiClient, FetchError, FetchRequest};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// What a view renders from: last payload, last error, and whether a call is running.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Payload of the last successful call; cleared when a call fails
    pub result: Option<T>,
    /// Error of the last failed call; cleared when a call succeeds
    pub error: Option<FetchError>,
    /// Whether a call is running
    pub is_loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            result: None,
            error: None,
            is_loading: false,
        }
    }
}

/// The call allowed to publish, identified by its ticket.
type Inflight = Option<(u64, CancellationToken)>;

struct Shared<T> {
    client: ApiClient,
    state: watch::Sender<FetchState<T>>,
    inflight: Mutex<Inflight>,
    next_ticket: AtomicU64,
}

impl<T> Shared<T> {
    fn inflight(&self) -> MutexGuard<'_, Inflight> {
        self.inflight
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Empties the slot if `ticket` still owns it, returning the call's token.
fn take_if_current(slot: &mut Inflight, ticket: u64) -> Option<CancellationToken> {
    if matches!(slot, Some((current, _)) if *current == ticket) {
        slot.take().map(|(_, token)| token)
    } else {
        None
    }
}

/// Owns one call's claim on the in-flight slot.
///
/// Dropping it before the call settled (the future was dropped unpolled, timed out, or lost
/// a `select!`) releases the slot and clears the loading flag.
struct Pending<T> {
    shared: Arc<Shared<T>>,
    ticket: u64,
}

impl<T: Clone> Pending<T> {
    /// Publishes `outcome` if this call still owns the slot. Checking ownership and writing
    /// the state happen under the same lock, so a concurrent `fetch` or `cancel` wins.
    fn publish(&self, outcome: &Result<T, FetchError>) -> bool {
        let mut slot = self.shared.inflight();
        if take_if_current(&mut slot, self.ticket).is_none() {
            return false;
        }

        self.shared.state.send_modify(|state| {
            match outcome {
                Ok(payload) => {
                    state.result = Some(payload.clone());
                    state.error = None;
                }
                Err(error) => {
                    state.result = None;
                    state.error = Some(error.clone());
                }
            }
            state.is_loading = false;
        });
        true
    }
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        let mut slot = self.shared.inflight();
        if let Some(token) = take_if_current(&mut slot, self.ticket) {
            trace!(ticket = self.ticket, "Call abandoned before settling");
            token.cancel();
            self.shared
                .state
                .send_modify(|state| state.is_loading = false);
        }
    }
}

/// Cancellable, last-call-wins fetch hook for responses of type `T`.
pub struct Fetcher<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Fetcher<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates an idle fetcher issuing its calls through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            shared: Arc::new(Shared {
                client,
                state,
                inflight: Mutex::new(None),
                next_ticket: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    /// Receiver that is notified whenever the state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Starts a call and returns the future that completes it.
    ///
    /// The previous in-flight call is cancelled and loading is set immediately, before the
    /// returned future is first polled. The future resolves to `None` when this call is
    /// cancelled or superseded; in that case it has not touched the state. Dropping the
    /// future before it resolves cancels the call and clears the loading flag.
    pub fn fetch(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Option<Result<T, FetchError>>> + Send + use<T> {
        let token = CancellationToken::new();
        let ticket = {
            let mut slot = self.shared.inflight();
            let ticket = self.shared.next_ticket.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some((previous, superseded)) = slot.replace((ticket, token.clone())) {
                trace!(ticket = previous, "Cancelling superseded call");
                superseded.cancel();
            }
            self.shared
                .state
                .send_modify(|state| state.is_loading = true);
            ticket
        };

        let pending = Pending {
            shared: Arc::clone(&self.shared),
            ticket,
        };

        async move {
            let outcome = tokio::select! {
                () = token.cancelled() => None,
                result = pending.shared.client.send::<T>(&request) => Some(result),
            };

            let Some(outcome) = outcome else {
                debug!(method = %request.method, path = %request.path, "Call cancelled");
                return None;
            };

            pending.publish(&outcome).then_some(outcome)
        }
    }

    /// Aborts the in-flight call, if any, and clears the loading flag.
    pub fn cancel(&self) {
        let mut slot = self.shared.inflight();
        if let Some((_, token)) = slot.take() {
            token.cancel();
            self.shared
                .state
                .send_modify(|state| state.is_loading = false);
        }
    }
}

impl<T> Drop for Fetcher<T> {
    fn drop(&mut self) {
        // An emptied slot also stops a call that already got its response from publishing
        if let Some((_, token)) = self.shared.inflight().take() {
            token.cancel();
        }
    }
}
