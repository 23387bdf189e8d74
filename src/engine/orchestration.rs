use super::orbital_engine::OrbitalEngine;
use crate::cache::SpanKey;
use crate::error::{EngineError, QueryError};
use crate::orbit::{GeodeticPosition, GroundPoint, OrbitalElements, TrajectorySample, sample_times};
use crate::proximity::SkippedRecord;
use crate::{event, log};
use chrono::{DateTime, TimeDelta, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Position of one element set from a batch.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BatchPosition {
    /// Position of the element set in the caller's input.
    pub index: usize,
    pub norad_id: u64,
    pub position: GeodeticPosition,
}

/// Positions in input order plus the element sets that could not be propagated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    pub positions: Vec<BatchPosition>,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchOutcome {
    fn append(&mut self, mut other: BatchOutcome) {
        self.positions.append(&mut other.positions);
        self.skipped.append(&mut other.skipped);
    }

    pub fn skipped_count(&self) -> usize { self.skipped.len() }
}

impl OrbitalEngine {
    /// Evenly spaced trajectory samples over `[start, start + span]`, memoized as a whole.
    ///
    /// Yields `sample_count + 1` samples; a count of zero yields only the start.
    ///
    /// # Errors
    /// Fails on invalid elements, a negative span, or cancellation. A failed
    /// computation leaves nothing behind in the trajectory cache.
    pub fn precompute_trajectory(
        &self,
        elements: &OrbitalElements,
        start: DateTime<Utc>,
        span: TimeDelta,
        sample_count: usize,
        c_tok: &CancellationToken,
    ) -> Result<Arc<[TrajectorySample]>, EngineError> {
        if span < TimeDelta::zero() {
            return Err(QueryError::NegativeTimeSpan.into());
        }
        let resolved = elements.resolve()?;
        let key = SpanKey {
            norad_id: resolved.norad_id,
            start_ms: start.timestamp_millis(),
            span_ms: span.num_milliseconds(),
            samples: sample_count,
        };
        let chunk = self.config.batch.chunk_size.max(1);
        self.caches.trajectories.get_or_compute(key, || {
            let mut samples = Vec::with_capacity(sample_count + 1);
            for (i, time) in sample_times(start, span, sample_count).enumerate() {
                if i % chunk == 0 && c_tok.is_cancelled() {
                    log!("Trajectory of {} cancelled after {i} samples", resolved.norad_id);
                    return Err(EngineError::Cancelled);
                }
                let position = self.resolved_position_at(&resolved, time);
                let cartesian = self.to_cartesian(position.latitude, position.longitude, position.altitude_km);
                samples.push(TrajectorySample { time, position, cartesian });
            }
            Ok(Arc::from(samples))
        })
    }

    /// `(lon, lat)` pairs sampled like [`Self::precompute_trajectory`], for 2D track rendering.
    ///
    /// # Errors
    /// Fails on invalid elements, a negative span, or cancellation.
    pub fn ground_track(
        &self,
        elements: &OrbitalElements,
        start: DateTime<Utc>,
        span: TimeDelta,
        steps: usize,
        c_tok: &CancellationToken,
    ) -> Result<Arc<[GroundPoint]>, EngineError> {
        if span < TimeDelta::zero() {
            return Err(QueryError::NegativeTimeSpan.into());
        }
        let resolved = elements.resolve()?;
        let key = SpanKey {
            norad_id: resolved.norad_id,
            start_ms: start.timestamp_millis(),
            span_ms: span.num_milliseconds(),
            samples: steps,
        };
        let chunk = self.config.batch.chunk_size.max(1);
        self.caches.ground_tracks.get_or_compute(key, || {
            let mut points = Vec::with_capacity(steps + 1);
            for (i, time) in sample_times(start, span, steps).enumerate() {
                if i % chunk == 0 && c_tok.is_cancelled() {
                    log!("Ground track of {} cancelled after {i} points", resolved.norad_id);
                    return Err(EngineError::Cancelled);
                }
                points.push(GroundPoint::from(self.resolved_position_at(&resolved, time)));
            }
            Ok(Arc::from(points))
        })
    }

    /// Positions of every element set at `time`, in input order.
    ///
    /// Element sets that cannot be propagated are listed in
    /// [`BatchOutcome::skipped`] and do not abort the batch.
    ///
    /// # Errors
    /// Returns [`EngineError::Cancelled`] once `c_tok` fires between chunks.
    pub fn batch_positions(
        &self,
        satellites: &[OrbitalElements],
        time: DateTime<Utc>,
        c_tok: &CancellationToken,
    ) -> Result<BatchOutcome, EngineError> {
        let chunk = self.config.batch.chunk_size.max(1);
        let mut outcome = BatchOutcome::default();
        for (n, elements) in satellites.chunks(chunk).enumerate() {
            if c_tok.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            outcome.append(self.positions_for(elements, n * chunk, time));
        }
        Ok(outcome)
    }

    /// Parallel form of [`Self::batch_positions`] for large populations.
    ///
    /// Populations above the configured threshold are split into chunks that run
    /// on tokio's blocking pool; the chunks are joined back in input order.
    ///
    /// # Errors
    /// Returns [`EngineError::Cancelled`] if `c_tok` fires before a chunk starts.
    pub async fn batch_positions_parallel(
        self: Arc<Self>,
        satellites: Arc<[OrbitalElements]>,
        time: DateTime<Utc>,
        c_tok: CancellationToken,
    ) -> Result<BatchOutcome, EngineError> {
        if satellites.len() <= self.config.batch.parallel_threshold {
            return self.batch_positions(&satellites, time, &c_tok);
        }
        let chunk = self.config.batch.chunk_size.max(1);
        event!("Batch of {} element sets split into chunks of {chunk}", satellites.len());
        let tasks = (0..satellites.len()).step_by(chunk).map(|offset| {
            let engine = Arc::clone(&self);
            let sats = Arc::clone(&satellites);
            let task_tok = c_tok.clone();
            tokio::task::spawn_blocking(move || {
                if task_tok.is_cancelled() {
                    return Err(EngineError::Cancelled);
                }
                let end = (offset + chunk).min(sats.len());
                Ok(engine.positions_for(&sats[offset..end], offset, time))
            })
        });

        let mut outcome = BatchOutcome::default();
        for joined in join_all(tasks).await {
            match joined {
                Ok(part) => outcome.append(part?),
                Err(join_err) if join_err.is_panic() => std::panic::resume_unwind(join_err.into_panic()),
                Err(_) => return Err(EngineError::Cancelled),
            }
        }
        Ok(outcome)
    }

    fn positions_for(&self, satellites: &[OrbitalElements], offset: usize, time: DateTime<Utc>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for (i, elements) in satellites.iter().enumerate() {
            let index = offset + i;
            match elements.resolve() {
                Ok(resolved) => outcome.positions.push(BatchPosition {
                    index,
                    norad_id: resolved.norad_id,
                    position: self.resolved_position_at(&resolved, time),
                }),
                Err(reason) => {
                    event!("Batch entry {index} skipped: {reason}");
                    outcome.skipped.push(SkippedRecord { index, norad_id: elements.norad_id, reason: reason.into() });
                }
            }
        }
        outcome
    }
}
