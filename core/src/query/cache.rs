use hashbrown::HashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::effects::CacheEffect;
use super::key::QueryKey;
use crate::api::ApiError;

/// Type-erased response stored under a key
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// Proof that the holder started the current fetch for a key.
///
/// Completing with a ticket that has since been superseded (by invalidation,
/// overwrite or removal) is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

/// What a view should render for one query
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// Query disabled (no auth token, input too short) and nothing cached
    Idle,
    Loading,
    Error(Arc<ApiError>),
    Success {
        data: T,
        /// Cached data is shown while a re-fetch is in flight
        refreshing: bool,
    },
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            QueryState::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, QueryState::Idle)
    }
}

#[derive(Default)]
struct CacheEntry {
    data: Option<CachedValue>,
    error: Option<Arc<ApiError>>,
    stale: bool,
    in_flight: Option<u64>,
}

impl CacheEntry {
    fn typed<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let data = self.data.as_ref()?;
        let typed = data.downcast_ref::<T>().cloned();
        if typed.is_none() {
            tracing::debug!(%key, expected = std::any::type_name::<T>(), "Cached value has a different type");
        }
        typed
    }
}

/// Keyed store of server responses.
///
/// Owned by whoever drives the queries (a context signal in the web app, a
/// local in the CLI) and passed by reference; there is no global instance.
#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    next_generation: u64,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.len())
            .field("next_generation", &self.next_generation)
            .finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Cached data for `key`, if present and of type `T`
    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries.get(key).and_then(|entry| entry.typed(key))
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.stale)
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Render state for `key`. Disabled queries with nothing cached are idle.
    pub fn state<T: Clone + 'static>(&self, key: &QueryKey, enabled: bool) -> QueryState<T> {
        let Some(entry) = self.entries.get(key) else {
            return if enabled {
                QueryState::Loading
            } else {
                QueryState::Idle
            };
        };

        if let Some(data) = entry.typed::<T>(key) {
            return QueryState::Success {
                data,
                refreshing: entry.in_flight.is_some(),
            };
        }
        if !enabled {
            return QueryState::Idle;
        }
        match (&entry.error, entry.in_flight) {
            (Some(err), None) if !entry.stale => QueryState::Error(Arc::clone(err)),
            _ => QueryState::Loading,
        }
    }

    /// True when a fetch for `key` should start now: nothing cached yet, or
    /// the entry was invalidated, and no fetch is already in flight.
    ///
    /// Failed entries stay failed until invalidated.
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(entry) => {
                entry.in_flight.is_none()
                    && (entry.stale || (entry.data.is_none() && entry.error.is_none()))
            }
        }
    }

    /// Register a fetch for `key`. Returns `None` when one is already in
    /// flight, so concurrent requests for one key collapse into one.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> Option<FetchTicket> {
        let entry = self.entries.entry(key.clone()).or_default();
        if entry.in_flight.is_some() {
            tracing::debug!(%key, "Fetch already in flight");
            return None;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        entry.in_flight = Some(generation);
        tracing::debug!(%key, generation, "Fetch started");
        Some(FetchTicket {
            key: key.clone(),
            generation,
        })
    }

    /// Store the outcome of a fetch. Returns false when the ticket was
    /// superseded and the result was dropped.
    pub fn complete<T: Send + Sync + 'static>(
        &mut self,
        ticket: FetchTicket,
        result: Result<T, ApiError>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            tracing::debug!(key = %ticket.key, "Dropping result for removed entry");
            return false;
        };
        if entry.in_flight != Some(ticket.generation) {
            tracing::debug!(
                key = %ticket.key,
                generation = ticket.generation,
                "Dropping superseded result"
            );
            return false;
        }

        entry.in_flight = None;
        entry.stale = false;
        match result {
            Ok(value) => {
                entry.data = Some(Arc::new(value));
                entry.error = None;
            }
            Err(err) => {
                tracing::debug!(key = %ticket.key, error = %err, "Fetch failed");
                entry.error = Some(Arc::new(err));
            }
        }
        true
    }

    /// Release a ticket whose fetch was dropped before completing, so the key
    /// can be fetched again. Returns false when the ticket was already
    /// superseded.
    pub fn cancel(&mut self, ticket: &FetchTicket) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.in_flight != Some(ticket.generation) {
            return false;
        }
        entry.in_flight = None;
        tracing::debug!(key = %ticket.key, generation = ticket.generation, "Fetch cancelled");
        true
    }

    /// Overwrite the data for `key` directly, superseding any fetch in flight
    pub fn set_data<T: Send + Sync + 'static>(&mut self, key: &QueryKey, value: T) {
        self.set_value(key, Arc::new(value));
    }

    fn set_value(&mut self, key: &QueryKey, value: CachedValue) {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.data = Some(value);
        entry.error = None;
        entry.stale = false;
        entry.in_flight = None;
        tracing::debug!(%key, "Cache entry overwritten");
    }

    /// Mark every entry under `prefix` stale so its next render re-fetches.
    /// Fetches in flight for those keys are superseded.
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                entry.in_flight = None;
                count += 1;
            }
        }
        tracing::debug!(%prefix, count, "Invalidated cache entries");
        count
    }

    /// Drop every entry under `prefix`
    pub fn remove(&mut self, prefix: &QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len()
    }

    /// Drop every entry under `prefix` other than `keep`
    pub fn remove_except(&mut self, prefix: &QueryKey, keep: Option<&QueryKey>) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !key.starts_with(prefix) || Some(key) == keep);
        before - self.entries.len()
    }

    /// Forget everything (sign-out)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Apply the cache effects of a successful mutation
    pub fn apply<I>(&mut self, effects: I)
    where
        I: IntoIterator<Item = CacheEffect>,
    {
        for effect in effects {
            match effect {
                CacheEffect::Invalidate(prefix) => {
                    self.invalidate(&prefix);
                }
                CacheEffect::Overwrite { key, value } => self.set_value(&key, value),
            }
        }
    }
}
