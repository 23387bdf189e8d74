use super::constants::{
    EARTH_RADIUS_KM, GM_EARTH, LATITUDE_SCALE, MILLIS_PER_DAY, MIN_ALTITUDE_KM, MINUTES_PER_DAY,
    SECONDS_PER_DAY,
};
use super::elements::ResolvedElements;
use super::geodetic::{GeodeticPosition, wrap_longitude};
use chrono::{DateTime, Utc};
use std::f64::consts::PI;

/// Propagates resolved elements to `time` with a simplified Keplerian model.
///
/// The true anomaly uses only the first-order equation-of-center term and the
/// latitude is an inclination-scaled swing, not a rotation out of the orbital
/// plane. Good enough for visualization and screening, not for ephemerides.
#[allow(clippy::cast_precision_loss)]
pub fn propagate(elements: &ResolvedElements, time: DateTime<Utc>) -> GeodeticPosition {
    let days_elapsed = (time - elements.epoch_time).num_milliseconds() as f64 / MILLIS_PER_DAY;
    let mean_anomaly_now = mean_anomaly_at(elements, days_elapsed);
    let true_anomaly = true_anomaly_approx(mean_anomaly_now, elements.eccentricity);

    let semi_major_axis = semi_major_axis_km(elements.mean_motion);
    let radius = semi_major_axis * (1.0 - elements.eccentricity * mean_anomaly_now.to_radians().cos());

    let latitude =
        (elements.inclination * true_anomaly.to_radians().sin() * LATITUDE_SCALE).clamp(-90.0, 90.0);
    let longitude = wrap_longitude(elements.longitude + mean_anomaly_now);
    let altitude_km = (radius - EARTH_RADIUS_KM).max(MIN_ALTITUDE_KM);

    GeodeticPosition::new(latitude, longitude, altitude_km)
}

/// Mean anomaly in degrees after `days_elapsed`, reduced into [0, 360).
///
/// An advance too large to represent leaves the epoch mean anomaly in place.
pub fn mean_anomaly_at(elements: &ResolvedElements, days_elapsed: f64) -> f64 {
    let advanced = elements.mean_anomaly + elements.mean_motion * 360.0 * days_elapsed;
    let anomaly = if advanced.is_finite() { advanced } else { elements.mean_anomaly };
    anomaly.rem_euclid(360.0)
}

/// First-order equation of center, `M + 2e·sin(M)` with the correction taken in radians.
pub fn true_anomaly_approx(mean_anomaly_deg: f64, eccentricity: f64) -> f64 {
    mean_anomaly_deg + (2.0 * eccentricity * mean_anomaly_deg.to_radians().sin()).to_degrees()
}

/// Semi-major axis in km from the mean motion in revolutions per day.
pub fn semi_major_axis_km(mean_motion: f64) -> f64 {
    let n_rad_per_sec = mean_motion * 2.0 * PI / SECONDS_PER_DAY;
    (GM_EARTH / n_rad_per_sec.powi(2)).cbrt()
}

/// Orbital period in minutes.
pub fn orbital_period_minutes(mean_motion: f64) -> f64 { MINUTES_PER_DAY / mean_motion }

/// Circular-orbit speed in km/s at the given altitude.
pub fn circular_velocity_kms(altitude_km: f64) -> f64 { (GM_EARTH / (EARTH_RADIUS_KM + altitude_km)).sqrt() }
