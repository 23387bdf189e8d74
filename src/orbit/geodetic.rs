use super::constants::{EARTH_RADIUS_KM, LEO_MAX_ALTITUDE_KM, MIN_ALTITUDE_KM};

/// Latitude/longitude in degrees and altitude above the mean Earth radius in km.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GeodeticPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
}

impl GeodeticPosition {
    pub const fn new(latitude: f64, longitude: f64, altitude_km: f64) -> Self {
        Self { latitude, longitude, altitude_km }
    }

    /// Checks the latitude/longitude ranges and the altitude floor.
    pub fn is_bounded(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && self.longitude > -180.0
            && self.longitude <= 180.0
            && self.altitude_km >= MIN_ALTITUDE_KM
    }

    pub fn is_leo(&self) -> bool { is_leo(self.altitude_km) }
}

/// Earth-centered Cartesian coordinates in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self { Self { x, y, z } }

    pub fn as_array(&self) -> [f64; 3] { [self.x, self.y, self.z] }

    pub fn abs(&self) -> f64 { (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt() }

    pub fn euclid_distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }
}

/// Spherical to Cartesian conversion with `EARTH_RADIUS_KM + alt_km` as radial distance.
pub fn spherical_to_cartesian(lat: f64, lon: f64, alt_km: f64) -> CartesianPoint {
    let r = EARTH_RADIUS_KM + alt_km;
    let (lat_r, lon_r) = (lat.to_radians(), lon.to_radians());
    CartesianPoint::new(
        r * lat_r.cos() * lon_r.cos(),
        r * lat_r.cos() * lon_r.sin(),
        r * lat_r.sin(),
    )
}

/// Inverse of [`spherical_to_cartesian`]. The origin maps to latitude and longitude 0.
pub fn cartesian_to_spherical(point: &CartesianPoint) -> GeodeticPosition {
    let r = point.abs();
    if r == 0.0 {
        return GeodeticPosition::new(0.0, 0.0, -EARTH_RADIUS_KM);
    }
    let latitude = (point.z / r).clamp(-1.0, 1.0).asin().to_degrees();
    let longitude = wrap_longitude(point.y.atan2(point.x).to_degrees());
    GeodeticPosition::new(latitude, longitude, r - EARTH_RADIUS_KM)
}

/// Wraps an angle in degrees into (-180, 180].
pub fn wrap_longitude(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

pub fn is_leo(altitude_km: f64) -> bool { (MIN_ALTITUDE_KM..=LEO_MAX_ALTITUDE_KM).contains(&altitude_km) }
