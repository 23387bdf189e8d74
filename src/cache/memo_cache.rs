use crate::config::CacheConfig;
use crate::event;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::{Duration, Instant};

/// A stored value together with the instant it was computed.
#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self { Self { value, created_at: Instant::now() } }

    fn is_fresh(&self, ttl: Duration) -> bool { self.created_at.elapsed() < ttl }
}

/// One key's storage cell. The slot lock is held for the whole computation, which
/// serializes racing callers on the same key while leaving other keys untouched.
#[derive(Debug)]
struct Slot<V> {
    entry: Mutex<Option<CacheEntry<V>>>,
}

impl<V> Slot<V> {
    fn empty() -> Self { Self { entry: Mutex::new(None) } }

    fn is_live(&self, ttl: Duration) -> bool {
        match self.entry.try_lock() {
            Ok(guard) => guard.as_ref().is_some_and(|e| e.is_fresh(ttl)),
            Err(TryLockError::WouldBlock) => true,
            Err(TryLockError::Poisoned(poisoned)) => {
                poisoned.into_inner().as_ref().is_some_and(|e| e.is_fresh(ttl))
            }
        }
    }
}

/// A thread-safe memoization table with age-based expiry.
///
/// Entries older than the TTL are treated as absent and recomputed on the next
/// request. Concurrent requests for the same missing key run the computation
/// once; the other callers block on the key and reuse the stored result.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    name: &'static str,
    slots: Mutex<HashMap<K, Arc<Slot<V>>>>,
    ttl: Duration,
    capacity: usize,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(name: &'static str, config: &CacheConfig) -> Self {
        Self {
            name,
            slots: Mutex::new(HashMap::new()),
            ttl: config.ttl,
            capacity: config.capacity,
        }
    }

    pub fn name(&self) -> &'static str { self.name }

    pub fn ttl(&self) -> Duration { self.ttl }

    /// Returns the fresh value stored under `key`, or runs `compute` and stores its result.
    ///
    /// An `Err` from `compute` is handed back untouched and nothing is stored, so
    /// the next caller for `key` computes again.
    pub fn get_or_compute<E, F>(&self, key: K, compute: F) -> Result<V, E>
    where F: FnOnce() -> Result<V, E> {
        let slot = self.slot_for(&key);
        let mut entry = slot.entry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(self.ttl) {
                return Ok(cached.value.clone());
            }
        }
        match compute() {
            Ok(value) => {
                *entry = Some(CacheEntry::new(value.clone()));
                Ok(value)
            }
            Err(e) => {
                if entry.is_none() {
                    self.release_empty(&key, &slot);
                }
                Err(e)
            }
        }
    }

    /// Infallible variant of [`Self::get_or_compute`].
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where F: FnOnce() -> V {
        match self.get_or_compute(key, || Ok::<V, std::convert::Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Removes every entry older than the TTL and returns how many were dropped.
    ///
    /// Slots that another caller currently holds or computes are never evicted.
    pub fn sweep_expired(&self) -> usize {
        let mut slots = self.lock_slots();
        let removed = Self::sweep_locked(&mut slots, self.ttl);
        if removed > 0 {
            event!("Cache '{}' swept {removed} expired entries", self.name);
        }
        removed
    }

    pub fn len(&self) -> usize { self.lock_slots().len() }

    pub fn is_empty(&self) -> bool { self.lock_slots().is_empty() }

    /// Drops every entry. Computations already running finish but are not retained.
    pub fn clear(&self) { self.lock_slots().clear() }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<K, Arc<Slot<V>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot_for(&self, key: &K) -> Arc<Slot<V>> {
        let mut slots = self.lock_slots();
        if let Some(slot) = slots.get(key) {
            return Arc::clone(slot);
        }
        if slots.len() > self.capacity {
            let removed = Self::sweep_locked(&mut slots, self.ttl);
            if slots.len() > self.capacity {
                event!(
                    "Cache '{}' still holds {} entries after sweeping {removed}, accepting insert over capacity {}",
                    self.name,
                    slots.len(),
                    self.capacity
                );
            }
        }
        let slot = Arc::new(Slot::empty());
        slots.insert(key.clone(), Arc::clone(&slot));
        slot
    }

    /// Drops an empty slot after a failed computation unless another caller is waiting on it.
    fn release_empty(&self, key: &K, slot: &Arc<Slot<V>>) {
        let mut slots = self.lock_slots();
        let unshared = slots
            .get(key)
            .is_some_and(|stored| Arc::ptr_eq(stored, slot) && Arc::strong_count(slot) == 2);
        if unshared {
            slots.remove(key);
        }
    }

    fn sweep_locked(slots: &mut HashMap<K, Arc<Slot<V>>>, ttl: Duration) -> usize {
        let before = slots.len();
        slots.retain(|_, slot| Arc::strong_count(slot) > 1 || slot.is_live(ttl));
        before - slots.len()
    }
}
