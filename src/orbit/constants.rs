/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Standard gravitational parameter of the Earth in km^3/s^2.
pub const GM_EARTH: f64 = 398_600.441_8;
/// Lowest altitude a propagated position may report, in kilometers.
pub const MIN_ALTITUDE_KM: f64 = 160.0;
/// Upper bound of the low Earth orbit band, in kilometers.
pub const LEO_MAX_ALTITUDE_KM: f64 = 2000.0;
/// Mean motion assumed when the elements carry none, in revolutions per day.
pub const DEFAULT_MEAN_MOTION: f64 = 15.5;
/// Largest accepted mean motion in revolutions per day. Keeps the propagated
/// mean anomaly finite over the whole representable time range.
pub const MAX_MEAN_MOTION: f64 = 1.0e6;
pub const DEFAULT_INCLINATION: f64 = 0.0;
pub const DEFAULT_ECCENTRICITY: f64 = 0.0;
/// Cosmetic scale applied to the inclination-driven latitude swing.
pub const LATITUDE_SCALE: f64 = 0.1;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const MINUTES_PER_DAY: f64 = 1440.0;
