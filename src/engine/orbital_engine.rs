use crate::cache::{
    BucketedPoint, CacheJanitor, CacheStats, EngineCaches, PositionKey, ScalarKey, altitude_center,
    bucket_altitude,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, InvalidElementsReason, QueryError};
use crate::orbit::{
    CartesianPoint, DebrisRecord, GeodeticPosition, OrbitalElements, ResolvedElements, circular_velocity_kms,
    orbital_period_minutes, propagate, spherical_to_cartesian,
};
use crate::proximity::{
    CartesianIndex, ProximityReport, ProximityResult, RiskLevel, SearchPath, SearchStrategy, SkippedRecord,
    SpatialGrid, collision_probability, rank_results, risk_factor, round_to,
};
use crate::{event, info, log, warn};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

/// A candidate whose coordinates passed validation.
struct ValidCandidate<'a> {
    index: usize,
    record: &'a DebrisRecord,
    position: GeodeticPosition,
}

/// Memoized orbital computation engine.
///
/// Every expensive step (propagation, coordinate conversion, distances,
/// velocities, sampled tracks) goes through the engine's own caches, so two
/// engines in one process never share state.
#[derive(Debug)]
pub struct OrbitalEngine {
    pub(super) config: EngineConfig,
    pub(super) caches: Arc<EngineCaches>,
    janitor: Mutex<Option<CacheJanitor>>,
}

impl OrbitalEngine {
    /// Creates an engine without a background janitor; expiry then happens on
    /// access, on capacity pressure and through [`Self::sweep_caches`].
    pub fn new(config: EngineConfig) -> Self {
        let caches = Arc::new(EngineCaches::new(&config.cache));
        Self { config, caches, janitor: Mutex::new(None) }
    }

    /// Creates an engine and starts its periodic cache janitor.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn spawn(config: EngineConfig) -> Self {
        let engine = Self::new(config);
        engine.start_janitor();
        engine
    }

    /// Starts the cache janitor unless one is already running.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start_janitor(&self) {
        let mut janitor = self.janitor.lock().unwrap_or_else(PoisonError::into_inner);
        if janitor.as_ref().is_some_and(CacheJanitor::is_running) {
            return;
        }
        *janitor = Some(CacheJanitor::spawn(Arc::clone(&self.caches), self.config.cache.sweep_interval));
    }

    pub fn janitor_running(&self) -> bool {
        self.janitor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(CacheJanitor::is_running)
    }

    /// Stops the cache janitor and waits for it to exit. Cached entries stay usable.
    pub async fn shutdown(&self) {
        let janitor = self.janitor.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(janitor) = janitor {
            janitor.shutdown().await;
        }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Geodetic position of `elements` at `time`, memoized by `(norad_id, time)`.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidElements`] when the identifier is missing or
    /// an element value is not physically meaningful.
    pub fn position_at(
        &self,
        elements: &OrbitalElements,
        time: DateTime<Utc>,
    ) -> Result<GeodeticPosition, EngineError> {
        let resolved = elements.resolve()?;
        Ok(self.resolved_position_at(&resolved, time))
    }

    pub(super) fn resolved_position_at(&self, resolved: &ResolvedElements, time: DateTime<Utc>) -> GeodeticPosition {
        let key = PositionKey { norad_id: resolved.norad_id, time_ms: time.timestamp_millis() };
        self.caches.positions.get_or_insert_with(key, || propagate(resolved, time))
    }

    /// Earth-centered Cartesian form of a geodetic position.
    ///
    /// Inputs are rounded to the precision buckets first and the point is
    /// computed from the bucket centre.
    pub fn to_cartesian(&self, lat: f64, lon: f64, alt_km: f64) -> CartesianPoint {
        self.cartesian_for(BucketedPoint::new(lat, lon, alt_km, &self.config.precision))
    }

    fn cartesian_for(&self, bucket: BucketedPoint) -> CartesianPoint {
        let precision = self.config.precision;
        self.caches.cartesian.get_or_insert_with(bucket, || {
            let (lat, lon, alt) = bucket.center(&precision);
            spherical_to_cartesian(lat, lon, alt)
        })
    }

    /// Straight-line distance in km between two positions, memoized by their buckets.
    pub fn distance_km(&self, a: &GeodeticPosition, b: &GeodeticPosition) -> f64 {
        let key_a = BucketedPoint::from_position(a, &self.config.precision);
        let key_b = BucketedPoint::from_position(b, &self.config.precision);
        self.caches.scalars.get_or_insert_with(ScalarKey::distance(key_a, key_b), || {
            self.cartesian_for(key_a).euclid_distance(&self.cartesian_for(key_b))
        })
    }

    /// Circular-orbit speed in km/s, memoized by the altitude bucket.
    pub fn orbital_velocity(&self, altitude_km: f64) -> f64 {
        let precision = self.config.precision;
        let bucket = bucket_altitude(altitude_km, &precision);
        self.caches
            .scalars
            .get_or_insert_with(ScalarKey::Velocity(bucket), || circular_velocity_kms(altitude_center(bucket, &precision)))
    }

    pub fn relative_velocity(&self, altitude_a_km: f64, altitude_b_km: f64) -> f64 {
        (self.orbital_velocity(altitude_a_km) - self.orbital_velocity(altitude_b_km)).abs()
    }

    /// Orbital period in minutes for a mean motion in revolutions per day.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidElements`] for a non-finite or non-positive mean motion.
    pub fn orbital_period_minutes(&self, mean_motion: f64) -> Result<f64, EngineError> {
        if !mean_motion.is_finite() {
            return Err(InvalidElementsReason::NonFiniteValue.into());
        }
        if mean_motion <= 0.0 {
            return Err(InvalidElementsReason::NonPositiveMeanMotion.into());
        }
        Ok(self
            .caches
            .scalars
            .get_or_insert_with(ScalarKey::Period(mean_motion.to_bits()), || orbital_period_minutes(mean_motion)))
    }

    /// Risk factor with the configured weights and velocity normalisation.
    pub fn risk_factor(&self, distance_km: f64, relative_velocity_kms: f64, max_distance_km: f64) -> f64 {
        let proximity = &self.config.proximity;
        risk_factor(
            distance_km,
            relative_velocity_kms,
            max_distance_km,
            proximity.max_relative_velocity_kms,
            &proximity.weights,
        )
    }

    /// Debris within `max_distance_km` of `reference`, ranked by risk, using the configured strategy.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] for a non-positive or non-finite threshold.
    pub fn filter_by_proximity(
        &self,
        reference: &GeodeticPosition,
        candidates: &[DebrisRecord],
        max_distance_km: f64,
    ) -> Result<ProximityReport, EngineError> {
        self.filter_by_proximity_with(
            reference,
            candidates,
            max_distance_km,
            self.config.proximity.strategy,
            &CancellationToken::new(),
        )
    }

    /// Like [`Self::filter_by_proximity`] with an explicit strategy and cancellation token.
    ///
    /// Malformed candidates are reported in [`ProximityReport::skipped`] and do
    /// not abort the query. The token is checked between evaluation chunks.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidQuery`] for an unusable threshold and
    /// [`EngineError::Cancelled`] once `c_tok` fires.
    pub fn filter_by_proximity_with(
        &self,
        reference: &GeodeticPosition,
        candidates: &[DebrisRecord],
        max_distance_km: f64,
        strategy: SearchStrategy,
        c_tok: &CancellationToken,
    ) -> Result<ProximityReport, EngineError> {
        if !max_distance_km.is_finite() || max_distance_km <= 0.0 {
            return Err(QueryError::NonPositiveThreshold.into());
        }
        let (valid, skipped) = Self::partition_candidates(candidates);
        if !skipped.is_empty() {
            warn!("Skipped {} of {} debris records with missing coordinates", skipped.len(), candidates.len());
        }

        let path = strategy.resolve(candidates.len(), self.config.proximity.brute_force_limit);
        let selected = match path {
            SearchPath::BruteForce => (0..valid.len()).collect::<Vec<_>>(),
            SearchPath::Grid => {
                let grid = SpatialGrid::build(max_distance_km / 2.0, valid.iter().enumerate().map(|(i, c)| (i, c.position)));
                grid.neighborhood(grid.cell_of(reference)).collect()
            }
            SearchPath::KdTree => {
                let precision = self.config.precision;
                let index = CartesianIndex::build(valid.iter().enumerate().map(|(i, c)| {
                    let bucket = BucketedPoint::from_position(&c.position, &precision);
                    (i, bucket, self.cartesian_for(bucket))
                }));
                let center = self.to_cartesian(reference.latitude, reference.longitude, reference.altitude_km);
                index.within(&center, max_distance_km)
            }
        };
        event!(
            "Proximity query via {path}: {} candidates, {} selected, threshold {max_distance_km} km",
            candidates.len(),
            selected.len()
        );

        let reference_velocity = self.orbital_velocity(reference.altitude_km);
        let mut results = Vec::new();
        for chunk in selected.chunks(self.config.batch.chunk_size.max(1)) {
            if c_tok.is_cancelled() {
                log!("Proximity query cancelled after {} results", results.len());
                return Err(EngineError::Cancelled);
            }
            results.extend(
                chunk.iter().filter_map(|&i| self.evaluate(reference, reference_velocity, &valid[i], max_distance_km)),
            );
        }
        rank_results(&mut results);

        Ok(ProximityReport {
            results,
            skipped,
            path,
            examined: selected.len(),
            total_candidates: candidates.len(),
        })
    }

    fn partition_candidates(candidates: &[DebrisRecord]) -> (Vec<ValidCandidate<'_>>, Vec<SkippedRecord>) {
        let mut valid = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();
        for (index, record) in candidates.iter().enumerate() {
            match record.coordinates() {
                Ok((lat, lon, alt)) => {
                    valid.push(ValidCandidate { index, record, position: GeodeticPosition::new(lat, lon, alt) });
                }
                Err(field) => skipped.push(SkippedRecord { index, norad_id: record.norad_id, reason: field.into() }),
            }
        }
        (valid, skipped)
    }

    fn evaluate(
        &self,
        reference: &GeodeticPosition,
        reference_velocity: f64,
        candidate: &ValidCandidate<'_>,
        max_distance_km: f64,
    ) -> Option<ProximityResult> {
        let distance = self.distance_km(reference, &candidate.position);
        if distance > max_distance_km {
            return None;
        }
        let relative_velocity = (reference_velocity - self.orbital_velocity(candidate.position.altitude_km)).abs();
        let risk = self.risk_factor(distance, relative_velocity, max_distance_km);
        Some(ProximityResult {
            debris: candidate.record.clone(),
            candidate_index: candidate.index,
            distance_km: round_to(distance, 2),
            relative_velocity_kms: round_to(relative_velocity, 3),
            risk_factor: round_to(risk, 4),
            risk_level: RiskLevel::from_distance(distance),
            collision_probability: collision_probability(distance, candidate.record.rcs_size),
        })
    }

    pub fn cache_stats(&self) -> CacheStats { self.caches.stats() }

    /// Empties every cache. Only later recomputation cost is affected.
    pub fn clear_cache(&self) {
        self.caches.clear_all();
        info!("All engine caches cleared");
    }

    /// Purges expired entries from every cache and returns how many were removed.
    pub fn sweep_caches(&self) -> usize { self.caches.sweep_all() }
}
