use crate::proximity::{RiskWeights, SearchStrategy};
use crate::warn;
use std::str::FromStr;
use std::time::Duration;

/// Aggregated tuning knobs of an [`OrbitalEngine`](crate::OrbitalEngine).
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub cache: CacheConfig,
    pub precision: PrecisionBuckets,
    pub proximity: ProximityConfig,
    pub batch: BatchConfig,
}

/// Expiry and sizing policy applied to every memo cache of an engine.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Maximum age of an entry before it is treated as absent.
    pub ttl: Duration,
    /// Entry count above which an insertion triggers an expiry sweep first.
    ///
    /// Advisory only: if the sweep frees nothing the new entry is still accepted,
    /// so a cache under sustained load of fresh keys grows past this value.
    pub capacity: usize,
    /// Period of the background janitor sweep.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            capacity: 1000,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self { Self::default() }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.capacity = max;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Rounding applied to coordinates before they become cache keys.
///
/// Two positions closer than one bucket share the same cached Cartesian point,
/// distance and velocity. Changing these widths changes result granularity
/// everywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionBuckets {
    /// Decimal places kept for latitude and longitude (degrees).
    pub angle_decimals: u32,
    /// Decimal places kept for altitude (km).
    pub altitude_decimals: u32,
}

impl Default for PrecisionBuckets {
    fn default() -> Self { Self { angle_decimals: 3, altitude_decimals: 1 } }
}

impl PrecisionBuckets {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn angle_scale(&self) -> f64 { 10f64.powi(self.angle_decimals as i32) }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn altitude_scale(&self) -> f64 { 10f64.powi(self.altitude_decimals as i32) }
}

#[derive(Debug, Clone, Copy)]
pub struct ProximityConfig {
    /// Populations up to this size are evaluated candidate by candidate.
    pub brute_force_limit: usize,
    pub weights: RiskWeights,
    /// Relative velocity at which the velocity component of the risk saturates.
    pub max_relative_velocity_kms: f64,
    pub default_max_distance_km: f64,
    pub strategy: SearchStrategy,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            brute_force_limit: 100,
            weights: RiskWeights::default(),
            max_relative_velocity_kms: 10.0,
            default_max_distance_km: 1000.0,
            strategy: SearchStrategy::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Populations above this size are split over blocking worker tasks.
    pub parallel_threshold: usize,
    /// Items processed between two cancellation checks.
    pub chunk_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self { Self { parallel_threshold: 50, chunk_size: 64 } }
}

impl EngineConfig {
    pub const TTL_VAR: &'static str = "ORBIT_CACHE_TTL_SECS";
    pub const CAPACITY_VAR: &'static str = "ORBIT_CACHE_CAPACITY";
    pub const SWEEP_VAR: &'static str = "ORBIT_CACHE_SWEEP_SECS";
    pub const BRUTE_FORCE_VAR: &'static str = "ORBIT_BRUTE_FORCE_LIMIT";
    pub const STRATEGY_VAR: &'static str = "ORBIT_SEARCH_STRATEGY";
    pub const PARALLEL_VAR: &'static str = "ORBIT_PARALLEL_THRESHOLD";

    /// Builds the default configuration overridden by the `ORBIT_*` environment variables.
    pub fn from_env() -> Self { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Builds the default configuration overridden by whatever `lookup` yields per key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let mut config = Self::default();
        if let Some(secs) = parse_var::<u64>(&lookup, Self::TTL_VAR) {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(cap) = parse_var::<usize>(&lookup, Self::CAPACITY_VAR) {
            config.cache.capacity = cap;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, Self::SWEEP_VAR) {
            if secs == 0 {
                warn!("Ignoring {}=0, the janitor needs a non-zero interval", Self::SWEEP_VAR);
            } else {
                config.cache.sweep_interval = Duration::from_secs(secs);
            }
        }
        if let Some(limit) = parse_var::<usize>(&lookup, Self::BRUTE_FORCE_VAR) {
            config.proximity.brute_force_limit = limit;
        }
        if let Some(strategy) = parse_var::<SearchStrategy>(&lookup, Self::STRATEGY_VAR) {
            config.proximity.strategy = strategy;
        }
        if let Some(threshold) = parse_var::<usize>(&lookup, Self::PARALLEL_VAR) {
            config.batch.parallel_threshold = threshold;
        }
        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {key}={raw}, keeping the default");
            None
        }
    }
}
