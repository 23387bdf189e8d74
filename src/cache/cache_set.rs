use super::cache_keys::{BucketedPoint, PositionKey, ScalarKey, SpanKey};
use super::memo_cache::MemoCache;
use crate::config::CacheConfig;
use crate::orbit::{CartesianPoint, GeodeticPosition, GroundPoint, TrajectorySample};
use serde::Serialize;
use std::hash::Hash;
use std::sync::Arc;

/// Object-safe view on a memo cache used by sweeps, resets and statistics.
pub trait SweepableCache: Send + Sync {
    fn name(&self) -> &'static str;
    fn sweep_expired(&self) -> usize;
    fn entry_count(&self) -> usize;
    fn clear(&self);
}

impl<K, V> SweepableCache for MemoCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn name(&self) -> &'static str { MemoCache::name(self) }

    fn sweep_expired(&self) -> usize { MemoCache::sweep_expired(self) }

    fn entry_count(&self) -> usize { self.len() }

    fn clear(&self) { MemoCache::clear(self) }
}

/// All memo caches owned by one engine instance.
///
/// Propagated positions live apart from every derived result, so position
/// samples and general results can be inspected and sized separately.
#[derive(Debug)]
pub struct EngineCaches {
    pub(crate) positions: MemoCache<PositionKey, GeodeticPosition>,
    pub(crate) cartesian: MemoCache<BucketedPoint, CartesianPoint>,
    pub(crate) scalars: MemoCache<ScalarKey, f64>,
    pub(crate) trajectories: MemoCache<SpanKey, Arc<[TrajectorySample]>>,
    pub(crate) ground_tracks: MemoCache<SpanKey, Arc<[GroundPoint]>>,
}

impl EngineCaches {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            positions: MemoCache::new("positions", config),
            cartesian: MemoCache::new("cartesian", config),
            scalars: MemoCache::new("scalars", config),
            trajectories: MemoCache::new("trajectories", config),
            ground_tracks: MemoCache::new("ground_tracks", config),
        }
    }

    fn members(&self) -> [&dyn SweepableCache; 5] {
        [
            &self.positions,
            &self.cartesian,
            &self.scalars,
            &self.trajectories,
            &self.ground_tracks,
        ]
    }

    /// Runs an expiry sweep over every cache and returns the total number of purged entries.
    pub fn sweep_all(&self) -> usize { self.members().iter().map(|c| c.sweep_expired()).sum() }

    pub fn clear_all(&self) { self.members().iter().for_each(|c| c.clear()) }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            positions: self.positions.len(),
            cartesian: self.cartesian.len(),
            scalars: self.scalars.len(),
            trajectories: self.trajectories.len(),
            ground_tracks: self.ground_tracks.len(),
        }
    }

    pub fn entry_counts(&self) -> Vec<(&'static str, usize)> {
        self.members().iter().map(|c| (c.name(), c.entry_count())).collect()
    }
}

/// Entry counts per cache at the time of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub positions: usize,
    pub cartesian: usize,
    pub scalars: usize,
    pub trajectories: usize,
    pub ground_tracks: usize,
}

impl CacheStats {
    /// Entries of the position-sample cache.
    pub fn position_cache_size(&self) -> usize { self.positions }

    /// Entries of every general result cache.
    pub fn result_cache_size(&self) -> usize {
        self.cartesian + self.scalars + self.trajectories + self.ground_tracks
    }

    pub fn total_entries(&self) -> usize { self.position_cache_size() + self.result_cache_size() }
}
