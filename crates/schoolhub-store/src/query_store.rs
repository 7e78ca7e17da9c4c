//! Load/refresh/retry state machine behind every list and detail screen.
//!
//! A [`QueryStore`] owns the screen's parameters and publishes a
//! [`ViewState`] on a watch channel. Intents are dispatched with
//! [`QueryStore::dispatch`]:
//!
//! - `Load`/`Retry` show `Loading` and read through the cache
//! - `Refresh` bypasses the cache; if data is already on screen it stays
//!   there on failure and the error is shown as a toast
//! - `SetParams` is ignored when the parameters did not change, otherwise
//!   it triggers exactly one load
//!
//! A result that arrives after newer parameters were set is discarded.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use schoolhub_cache::FetchPolicy;
use schoolhub_client::ApiError;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::effects::{Effect, EffectSender, Toast};
use crate::navigation::Route;
use crate::state::ViewState;

pub type Fetcher<T, P> =
    Arc<dyn Fn(P, FetchPolicy) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent<P> {
    Load,
    Refresh,
    Retry,
    SetParams(P),
}

pub struct QueryStore<T, P> {
    params: Mutex<P>,
    generation: AtomicU64,
    fetcher: Fetcher<T, P>,
    state: watch::Sender<ViewState<T>>,
    effects: EffectSender,
}

impl<T, P> QueryStore<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new<F, Fut>(params: P, effects: EffectSender, fetcher: F) -> Self
    where
        F: Fn(P, FetchPolicy) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let fetcher: Fetcher<T, P> = Arc::new(move |params, policy| fetcher(params, policy).boxed());
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            params: Mutex::new(params),
            generation: AtomicU64::new(0),
            fetcher,
            state,
            effects,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    pub fn params(&self) -> P {
        self.lock_params().clone()
    }

    pub async fn dispatch(&self, intent: Intent<P>) {
        match intent {
            Intent::Load | Intent::Retry => self.load(FetchPolicy::CacheFirst).await,
            Intent::Refresh => self.refresh().await,
            Intent::SetParams(params) => {
                {
                    let mut current = self.lock_params();
                    if *current == params {
                        debug!("Parameters unchanged, skipping load");
                        return;
                    }
                    *current = params;
                }
                self.load(FetchPolicy::CacheFirst).await;
            }
        }
    }

    async fn load(&self, policy: FetchPolicy) {
        let (generation, params) = self.begin();
        self.state.send_replace(ViewState::Loading);

        let result = (self.fetcher)(params, policy).await;
        if !self.is_current(generation) {
            debug!("Discarding result for outdated parameters");
            return;
        }
        match result {
            Ok(data) => {
                self.state.send_replace(ViewState::Success(data));
            }
            Err(e) => self.fail(e),
        }
    }

    async fn refresh(&self) {
        let previous = self.state.borrow().data().cloned();
        if previous.is_none() {
            return self.load(FetchPolicy::NetworkOnly).await;
        }

        let (generation, params) = self.begin();
        let result = (self.fetcher)(params, FetchPolicy::NetworkOnly).await;
        if !self.is_current(generation) {
            return;
        }
        match result {
            Ok(data) => {
                self.state.send_replace(ViewState::Success(data));
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping previous data");
                if e.is_unauthorized() {
                    return self.fail(e);
                }
                self.effects.toast(Toast::error(e.user_message()));
            }
        }
    }

    fn fail(&self, error: ApiError) {
        warn!(error = %error, "Query failed");
        if error.is_unauthorized() {
            self.effects.send(Effect::ResetTo(Route::Login));
        }
        self.state.send_replace(ViewState::Error(error.user_message()));
    }

    fn begin(&self) -> (u64, P) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, self.params())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn lock_params(&self) -> std::sync::MutexGuard<'_, P> {
        self.params.lock().unwrap_or_else(|e| e.into_inner())
    }
}
