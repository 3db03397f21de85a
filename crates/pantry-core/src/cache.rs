//! Keyed query cache shared by the store operations.
//!
//! Entries are keyed by `(resource kind, query parameter)`, e.g.
//! `(plannerWeek, 2024-03-10)` or `(recipes, 5)`. Reads populate entries and
//! mutations only ever invalidate them, never write into them:
//!
//! - a recipe create, edit or delete invalidates every `recipes` entry;
//! - a slot update invalidates the one `plannerWeek` entry for its week.
//!
//! Invalidation marks the entry stale so the next read refetches.
//!
//! # Superseded results
//!
//! Every entry carries a generation counter. Starting a fetch and
//! invalidating both bump it, and a fetch result is stored only if the
//! generation is still the one its [`FetchTicket`] was issued for. A fetch
//! that was in flight while a mutation invalidated its key therefore cannot
//! put pre-mutation data back into the cache: last request wins per key.
//!
//! Concurrent reads of the same key queue behind a per-key async gate; the
//! reader that arrives second finds the first one's result and does not
//! issue its own request. A gate lives only while some reader holds it.

use std::{
    collections::HashMap,
    fmt,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use jiff::civil::Date;
use log::debug;

use crate::{
    error::Result,
    models::{PlannerWeek, Recipe, RecipeId},
};

/// Resource family a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Recipes,
    PlannerWeek,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Recipes => "recipes",
            ResourceKind::PlannerWeek => "plannerWeek",
        }
    }
}

/// Query parameter half of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryParam {
    /// The whole collection
    All,
    Id(RecipeId),
    StartDate(Date),
}

/// Cache key: resource kind plus query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ResourceKind,
    pub param: QueryParam,
}

impl QueryKey {
    /// `(recipes, all)`
    pub fn recipes() -> Self {
        Self {
            kind: ResourceKind::Recipes,
            param: QueryParam::All,
        }
    }

    /// `(recipes, id)`
    pub fn recipe(id: RecipeId) -> Self {
        Self {
            kind: ResourceKind::Recipes,
            param: QueryParam::Id(id),
        }
    }

    /// `(plannerWeek, start_date)`
    pub fn planner_week(start_date: Date) -> Self {
        Self {
            kind: ResourceKind::PlannerWeek,
            param: QueryParam::StartDate(start_date),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.param {
            QueryParam::All => write!(f, "({}, all)", self.kind.as_str()),
            QueryParam::Id(id) => write!(f, "({}, {id})", self.kind.as_str()),
            QueryParam::StartDate(date) => write!(f, "({}, {date})", self.kind.as_str()),
        }
    }
}

/// A value held by the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Recipes(Vec<Recipe>),
    Recipe(Recipe),
    Week(PlannerWeek),
}

/// Types that can be stored in the cache.
pub trait Cacheable: Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<&Self>;
}

impl Cacheable for Vec<Recipe> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Recipes(self)
    }

    fn from_cached(value: &CachedValue) -> Option<&Self> {
        match value {
            CachedValue::Recipes(recipes) => Some(recipes),
            _ => None,
        }
    }
}

impl Cacheable for Recipe {
    fn into_cached(self) -> CachedValue {
        CachedValue::Recipe(self)
    }

    fn from_cached(value: &CachedValue) -> Option<&Self> {
        match value {
            CachedValue::Recipe(recipe) => Some(recipe),
            _ => None,
        }
    }
}

impl Cacheable for PlannerWeek {
    fn into_cached(self) -> CachedValue {
        CachedValue::Week(self)
    }

    fn from_cached(value: &CachedValue) -> Option<&Self> {
        match value {
            CachedValue::Week(week) => Some(week),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Entry {
    value: Option<CachedValue>,
    stale: bool,
    generation: u64,
}

/// Proof that a fetch was started for a key at a given generation.
#[derive(Debug)]
#[must_use = "a fetch ticket must be completed for its result to be cached"]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

/// A reader's hold on the gate of one key. The map entry goes away with
/// the last holder.
struct GateLease<'a> {
    cache: &'a QueryCache,
    key: QueryKey,
    gate: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for GateLease<'_> {
    fn drop(&mut self) {
        self.cache.release_gate(&self.key, &self.gate);
    }
}

/// Process-wide keyed store of query results.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    gates: Mutex<HashMap<QueryKey, Arc<tokio::sync::Mutex<()>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key` if present and not invalidated.
    pub fn fresh<T: Cacheable>(&self, key: &QueryKey) -> Option<T> {
        let entries = lock(&self.entries);
        let entry = entries.get(key).filter(|entry| !entry.stale)?;
        entry.value.as_ref().and_then(T::from_cached).cloned()
    }

    /// Cached value for `key`, stale or not.
    pub fn peek<T: Cacheable>(&self, key: &QueryKey) -> Option<T> {
        let entries = lock(&self.entries);
        entries
            .get(key)?
            .value
            .as_ref()
            .and_then(T::from_cached)
            .cloned()
    }

    /// True when a read of `key` would go to the backend.
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        lock(&self.entries)
            .get(key)
            .map_or(true, |entry| entry.stale || entry.value.is_none())
    }

    /// Register a fetch for `key`, superseding any fetch already in flight.
    pub fn begin_fetch(&self, key: &QueryKey) -> FetchTicket {
        let mut entries = lock(&self.entries);
        let entry = entries.entry(*key).or_default();
        entry.generation += 1;
        FetchTicket {
            key: *key,
            generation: entry.generation,
        }
    }

    /// Store a fetch result unless the key was invalidated or refetched
    /// since the ticket was issued. Returns whether the value was stored.
    pub fn complete<T: Cacheable>(&self, ticket: FetchTicket, value: T) -> bool {
        let mut entries = lock(&self.entries);
        let entry = entries.entry(ticket.key).or_default();
        if entry.generation != ticket.generation {
            debug!("Discarding superseded result for {}", ticket.key);
            return false;
        }
        entry.value = Some(value.into_cached());
        entry.stale = false;
        true
    }

    /// Mark one entry stale and supersede any fetch in flight for it.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = lock(&self.entries);
        if let Some(entry) = entries.get_mut(key) {
            entry.stale = true;
            entry.generation += 1;
            debug!("Invalidated {key}");
        }
    }

    /// Mark every entry of a resource kind stale. Returns how many entries
    /// were affected.
    pub fn invalidate_kind(&self, kind: ResourceKind) -> usize {
        let mut entries = lock(&self.entries);
        let mut count = 0;
        for (_, entry) in entries.iter_mut().filter(|(key, _)| key.kind == kind) {
            entry.stale = true;
            entry.generation += 1;
            count += 1;
        }
        debug!("Invalidated {count} {} entries", kind.as_str());
        count
    }

    /// Drop every entry.
    pub fn clear(&self) {
        lock(&self.entries).clear();
        lock(&self.gates).clear();
    }

    fn lease_gate(&self, key: &QueryKey) -> GateLease<'_> {
        let gate = lock(&self.gates).entry(*key).or_default().clone();
        GateLease {
            cache: self,
            key: *key,
            gate,
        }
    }

    /// Forget the gate of `key` once the last reader holding it is done.
    fn release_gate(&self, key: &QueryKey, gate: &Arc<tokio::sync::Mutex<()>>) {
        let mut gates = lock(&self.gates);
        let unused = gates
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, gate) && Arc::strong_count(gate) == 2);
        if unused {
            gates.remove(key);
        }
    }

    /// Read-through query: return the fresh cached value for `key`, or run
    /// `fetch` and cache its result.
    ///
    /// The fetched value is returned to the caller even when a concurrent
    /// invalidation keeps it out of the cache.
    ///
    /// # Errors
    ///
    /// Propagates the error of `fetch`; nothing is cached in that case.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.fresh(&key) {
            debug!("Cache hit for {key}");
            return Ok(value);
        }

        let lease = self.lease_gate(&key);
        let _guard = lease.gate.lock().await;
        if let Some(value) = self.fresh(&key) {
            debug!("Cache hit for {key} after waiting on in-flight read");
            return Ok(value);
        }

        debug!("Cache miss for {key}");
        let ticket = self.begin_fetch(&key);
        let value = fetch().await?;
        self.complete(ticket, value.clone());
        Ok(value)
    }
}
