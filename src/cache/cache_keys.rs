use crate::config::PrecisionBuckets;
use crate::orbit::GeodeticPosition;

/// A geodetic position rounded to the engine's precision buckets.
///
/// Latitude and longitude are stored as integer multiples of the angle bucket,
/// altitude as integer multiples of the altitude bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketedPoint {
    lat: i64,
    lon: i64,
    alt: i64,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
impl BucketedPoint {
    pub fn new(lat: f64, lon: f64, alt_km: f64, buckets: &PrecisionBuckets) -> Self {
        let angle = buckets.angle_scale();
        Self {
            lat: (lat * angle).round() as i64,
            lon: (lon * angle).round() as i64,
            alt: bucket_altitude(alt_km, buckets),
        }
    }

    pub fn from_position(pos: &GeodeticPosition, buckets: &PrecisionBuckets) -> Self {
        Self::new(pos.latitude, pos.longitude, pos.altitude_km, buckets)
    }

    /// The bucket centre as `(lat, lon, alt_km)`.
    pub fn center(&self, buckets: &PrecisionBuckets) -> (f64, f64, f64) {
        let angle = buckets.angle_scale();
        (
            self.lat as f64 / angle,
            self.lon as f64 / angle,
            altitude_center(self.alt, buckets),
        )
    }
}

#[allow(clippy::cast_possible_truncation)]
pub fn bucket_altitude(alt_km: f64, buckets: &PrecisionBuckets) -> i64 {
    (alt_km * buckets.altitude_scale()).round() as i64
}

#[allow(clippy::cast_precision_loss)]
pub fn altitude_center(bucket: i64, buckets: &PrecisionBuckets) -> f64 {
    bucket as f64 / buckets.altitude_scale()
}

/// Key of a propagated position: object identity plus query time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub norad_id: u64,
    pub time_ms: i64,
}

/// Keys of the scalar results sharing one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKey {
    /// Order-normalised pair, so both argument orders hit the same entry.
    Distance(BucketedPoint, BucketedPoint),
    /// Altitude bucket of a circular-orbit speed.
    Velocity(i64),
    /// Bit pattern of the mean motion an orbital period was derived from.
    Period(u64),
}

impl ScalarKey {
    pub fn distance(a: BucketedPoint, b: BucketedPoint) -> Self {
        if a <= b { ScalarKey::Distance(a, b) } else { ScalarKey::Distance(b, a) }
    }
}

/// Key of a sampled track: identity, start, span and sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanKey {
    pub norad_id: u64,
    pub start_ms: i64,
    pub span_ms: i64,
    pub samples: usize,
}
