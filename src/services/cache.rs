// src/services/cache.rs

//! Single-flight async memoizer.
//!
//! At most one load per key runs at a time. Every caller that arrives while
//! a load is in flight awaits the same shared future and sees the same
//! outcome. Successful values are kept until [`SingleFlight::reset`];
//! failures are not cached, so the next call starts a fresh load.
//!
//! The slot map is only locked for the non-suspending transitions
//! (lookup, insert, settle), never across an `.await` or a loader call.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::error::LoadError;

type LoadOutcome<V> = Result<Arc<V>, LoadError>;
type SharedLoad<V> = Shared<BoxFuture<'static, LoadOutcome<V>>>;

enum Slot<V> {
    Loaded(Arc<V>),
    Loading {
        generation: u64,
        future: SharedLoad<V>,
    },
}

struct Inner<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
    next_generation: AtomicU64,
}

impl<K, V> Inner<K, V>
where
    K: Eq + Hash,
{
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Slot<V>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the outcome of the load identified by `generation`.
    ///
    /// A slot that was reset or replaced meanwhile is left alone.
    fn settle(&self, key: K, generation: u64, outcome: &LoadOutcome<V>) {
        let mut slots = self.lock();
        let current = matches!(
            slots.get(&key),
            Some(Slot::Loading { generation: g, .. }) if *g == generation
        );
        if !current {
            return;
        }
        match outcome {
            Ok(value) => {
                slots.insert(key, Slot::Loaded(Arc::clone(value)));
            }
            Err(_) => {
                slots.remove(&key);
            }
        }
    }
}

/// Keyed single-flight memoizer.
pub struct SingleFlight<K, V> {
    inner: Arc<Inner<K, V>>,
}

impl<K, V> Clone for SingleFlight<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SingleFlight<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                slots: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Return the value for `key`, running `loader` only when the key is
    /// neither loaded nor loading.
    ///
    /// The in-flight future is owned by the slot, so dropping a caller does
    /// not cancel the load; the next caller picks it up where it stopped.
    ///
    /// `loader` runs with the map unlocked and may query this memoizer.
    /// Under contention a loader's future can be built and dropped unpolled;
    /// only one per key is ever driven.
    pub async fn get_with<F, Fut>(&self, key: K, loader: F) -> LoadOutcome<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, LoadError>> + Send + 'static,
    {
        let pending = match self.inner.lock().get(&key) {
            Some(Slot::Loaded(value)) => return Ok(Arc::clone(value)),
            Some(Slot::Loading { future, .. }) => Some(future.clone()),
            None => None,
        };
        let future = match pending {
            Some(future) => future,
            None => self.start(key, loader()),
        };
        future.await
    }

    /// Install `load` for `key` unless another caller got there first.
    fn start<Fut>(&self, key: K, load: Fut) -> SharedLoad<V>
    where
        Fut: Future<Output = Result<V, LoadError>> + Send + 'static,
    {
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let inner = Arc::clone(&self.inner);
        let settle_key = key.clone();
        let future = async move {
            let outcome = load.await.map(Arc::new);
            inner.settle(settle_key, generation, &outcome);
            outcome
        }
        .boxed()
        .shared();

        let mut slots = self.inner.lock();
        match slots.get(&key) {
            Some(Slot::Loaded(value)) => {
                let value = Arc::clone(value);
                async move { Ok(value) }.boxed().shared()
            }
            Some(Slot::Loading { future, .. }) => future.clone(),
            None => {
                slots.insert(
                    key,
                    Slot::Loading {
                        generation,
                        future: future.clone(),
                    },
                );
                future
            }
        }
    }

    /// Cached value, without loading.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        match self.inner.lock().get(key) {
            Some(Slot::Loaded(value)) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    pub fn is_loaded(&self, key: &K) -> bool {
        matches!(self.inner.lock().get(key), Some(Slot::Loaded(_)))
    }

    pub fn is_loading(&self, key: &K) -> bool {
        matches!(self.inner.lock().get(key), Some(Slot::Loading { .. }))
    }

    /// Forget every loaded value and in-flight handle.
    ///
    /// Loads still running complete for their own callers but no longer
    /// write back into the map.
    pub fn reset(&self) {
        self.inner.lock().clear();
    }
}
