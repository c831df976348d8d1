use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// How long a freshly fetched value stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Valid for the life of the cache, or until invalidated.
    Forever,
    /// Valid for the given duration after the fetch resolves.
    For(Duration),
}

impl Lifetime {
    fn deadline_from(self, now: Instant) -> Option<Instant> {
        match self {
            Lifetime::Forever => None,
            Lifetime::For(ttl) => Some(now + ttl),
        }
    }
}

type Resolved<T> = (T, Option<Instant>);
type SharedFetch<T, E> = Shared<BoxFuture<'static, Result<Resolved<T>, E>>>;

enum Slot<T, E> {
    Empty,
    InFlight {
        generation: u64,
        fetch: SharedFetch<T, E>,
    },
    Ready {
        value: T,
        expires_at: Option<Instant>,
    },
}

struct State<T, E> {
    slot: Slot<T, E>,
    /// Bumped on every new fetch and every invalidation, so a fetch that
    /// finishes late cannot overwrite a newer slot.
    generation: u64,
}

/// A lazily computed, shared, expiring value.
pub struct CachedAsyncValue<T, E> {
    name: &'static str,
    state: Mutex<State<T, E>>,
}

impl<T, E> CachedAsyncValue<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache. `name` only appears in log output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// Returns the cached value, fetching it first if needed.
    ///
    /// `fetch` is only called when no fresh value is cached and no fetch is
    /// already in flight. Its future is shared with every caller that
    /// arrives before it resolves.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(T, Lifetime), E>> + Send + 'static,
    {
        let (generation, shared) = {
            let mut state = self.lock();
            let now = Instant::now();

            let joined = match &state.slot {
                Slot::Ready { value, expires_at } if !is_expired(*expires_at, now) => {
                    return Ok(value.clone());
                }
                Slot::InFlight { generation, fetch } => Some((*generation, fetch.clone())),
                _ => None,
            };

            match joined {
                Some((generation, shared)) => {
                    debug!(cache = self.name, generation, "Joining in-flight fetch");
                    (generation, shared)
                }
                None => {
                    state.generation += 1;
                    let generation = state.generation;
                    debug!(cache = self.name, generation, "Starting fetch");

                    let pending = fetch();
                    let shared = async move {
                        pending
                            .await
                            .map(|(value, lifetime)| (value, lifetime.deadline_from(Instant::now())))
                    }
                    .boxed()
                    .shared();

                    state.slot = Slot::InFlight {
                        generation,
                        fetch: shared.clone(),
                    };
                    (generation, shared)
                }
            }
        };

        let outcome = shared.await;

        {
            let mut state = self.lock();
            let current = matches!(
                &state.slot,
                Slot::InFlight { generation: g, .. } if *g == generation
            );
            if current {
                state.slot = match &outcome {
                    Ok((value, expires_at)) => Slot::Ready {
                        value: value.clone(),
                        expires_at: *expires_at,
                    },
                    Err(_) => {
                        debug!(cache = self.name, generation, "Fetch failed, not caching");
                        Slot::Empty
                    }
                };
            }
        }

        outcome.map(|(value, _)| value)
    }

    /// Returns the cached value if one is present and not expired.
    pub fn peek(&self) -> Option<T> {
        let state = self.lock();
        match &state.slot {
            Slot::Ready { value, expires_at } if !is_expired(*expires_at, Instant::now()) => {
                Some(value.clone())
            }
            _ => None,
        }
    }

    /// Returns when the cached value expires, if one is cached and finite.
    pub fn expires_at(&self) -> Option<Instant> {
        match &self.lock().slot {
            Slot::Ready { expires_at, .. } => *expires_at,
            _ => None,
        }
    }

    /// Returns true while a fetch is pending.
    pub fn is_in_flight(&self) -> bool {
        matches!(self.lock().slot, Slot::InFlight { .. })
    }

    /// Drops the cached value. The next caller starts a new fetch.
    ///
    /// A fetch already in flight still resolves for its waiters but its
    /// result is not stored.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.slot = Slot::Empty;
        debug!(cache = self.name, "Invalidated");
    }

    fn lock(&self) -> MutexGuard<'_, State<T, E>> {
        // The slot is always left consistent, so a poisoned lock is usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_expired(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.is_some_and(|deadline| now >= deadline)
}

impl<T, E> std::fmt::Debug for CachedAsyncValue<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = match state.slot {
            Slot::Empty => "empty",
            Slot::InFlight { .. } => "in-flight",
            Slot::Ready { .. } => "ready",
        };
        f.debug_struct("CachedAsyncValue")
            .field("name", &self.name)
            .field("slot", &slot)
            .field("generation", &state.generation)
            .finish()
    }
}
