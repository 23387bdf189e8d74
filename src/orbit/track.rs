use super::geodetic::{CartesianPoint, GeodeticPosition};
use chrono::{DateTime, TimeDelta, Utc};

/// One sample of a precomputed trajectory.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TrajectorySample {
    pub time: DateTime<Utc>,
    pub position: GeodeticPosition,
    pub cartesian: CartesianPoint,
}

/// A `(lon, lat)` pair of a ground track, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GroundPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<GeodeticPosition> for GroundPoint {
    fn from(value: GeodeticPosition) -> Self {
        Self { longitude: value.longitude, latitude: value.latitude }
    }
}

/// `samples + 1` evenly spaced instants covering `[start, start + span]`.
///
/// Offsets are rounded to whole milliseconds, the resolution of position keys.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn sample_times(start: DateTime<Utc>, span: TimeDelta, samples: usize) -> impl Iterator<Item = DateTime<Utc>> {
    let span_ms = span.num_milliseconds() as f64;
    let step_ms = if samples == 0 { 0.0 } else { span_ms / samples as f64 };
    (0..=samples).map(move |i| start + TimeDelta::milliseconds((i as f64 * step_ms).round() as i64))
}
