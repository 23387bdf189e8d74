use super::constants::{DEFAULT_ECCENTRICITY, DEFAULT_INCLINATION, DEFAULT_MEAN_MOTION, MAX_MEAN_MOTION};
use crate::error::{InvalidElementsReason, MalformedField};
use chrono::{DateTime, Utc};
use strum_macros::{Display, EnumIter};

/// Radar cross-section class of a tracked object.
#[derive(
    Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RcsSize {
    Small,
    Medium,
    Large,
    #[default]
    Unknown,
}

/// Mean orbital elements of one object as handed in by the caller.
///
/// Optional numeric fields fall back to fixed defaults instead of failing;
/// only a missing identifier or physically meaningless values are rejected.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct OrbitalElements {
    pub norad_id: Option<u64>,
    /// Revolutions per day.
    #[serde(default)]
    pub mean_motion: Option<f64>,
    /// Degrees.
    #[serde(default)]
    pub inclination: Option<f64>,
    #[serde(default)]
    pub eccentricity: Option<f64>,
    /// Degrees at `epoch_time`.
    #[serde(default)]
    pub mean_anomaly: f64,
    pub epoch_time: DateTime<Utc>,
    /// Reference longitude in degrees.
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub rcs_size: RcsSize,
}

/// Element values after defaults were applied and validation passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedElements {
    pub norad_id: u64,
    pub mean_motion: f64,
    pub inclination: f64,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
    pub longitude: f64,
    pub epoch_time: DateTime<Utc>,
}

impl OrbitalElements {
    pub fn new(norad_id: u64, epoch_time: DateTime<Utc>) -> Self {
        Self {
            norad_id: Some(norad_id),
            mean_motion: None,
            inclination: None,
            eccentricity: None,
            mean_anomaly: 0.0,
            epoch_time,
            longitude: 0.0,
            rcs_size: RcsSize::Unknown,
        }
    }

    pub fn with_mean_motion(mut self, rev_per_day: f64) -> Self {
        self.mean_motion = Some(rev_per_day);
        self
    }

    pub fn with_inclination(mut self, degrees: f64) -> Self {
        self.inclination = Some(degrees);
        self
    }

    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.eccentricity = Some(eccentricity);
        self
    }

    pub fn with_mean_anomaly(mut self, degrees: f64) -> Self {
        self.mean_anomaly = degrees;
        self
    }

    pub fn with_longitude(mut self, degrees: f64) -> Self {
        self.longitude = degrees;
        self
    }

    /// Applies the field defaults and validates the result.
    ///
    /// A zero mean motion counts as absent, like a missing one.
    pub fn resolve(&self) -> Result<ResolvedElements, InvalidElementsReason> {
        let norad_id = self.norad_id.ok_or(InvalidElementsReason::MissingNoradId)?;
        let mean_motion = self.mean_motion.filter(|m| *m != 0.0).unwrap_or(DEFAULT_MEAN_MOTION);
        let inclination = self.inclination.unwrap_or(DEFAULT_INCLINATION);
        let eccentricity = self.eccentricity.unwrap_or(DEFAULT_ECCENTRICITY);

        let values = [mean_motion, inclination, eccentricity, self.mean_anomaly, self.longitude];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(InvalidElementsReason::NonFiniteValue);
        }
        if mean_motion < 0.0 {
            return Err(InvalidElementsReason::NonPositiveMeanMotion);
        }
        if mean_motion > MAX_MEAN_MOTION {
            return Err(InvalidElementsReason::MeanMotionOutOfRange);
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(InvalidElementsReason::EccentricityOutOfRange);
        }
        Ok(ResolvedElements {
            norad_id,
            mean_motion,
            inclination,
            eccentricity,
            mean_anomaly: self.mean_anomaly,
            longitude: self.longitude,
            epoch_time: self.epoch_time,
        })
    }
}

/// A debris object with its current geodetic position, as delivered by the caller.
///
/// Position fields are optional because upstream catalogues are incomplete;
/// proximity queries skip records that lack any of them.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DebrisRecord {
    #[serde(default)]
    pub norad_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "altitude_km")]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub rcs_size: RcsSize,
}

impl DebrisRecord {
    pub fn new(norad_id: u64, latitude: f64, longitude: f64, altitude_km: f64) -> Self {
        Self {
            norad_id: Some(norad_id),
            name: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude: Some(altitude_km),
            rcs_size: RcsSize::Unknown,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rcs_size(mut self, rcs_size: RcsSize) -> Self {
        self.rcs_size = rcs_size;
        self
    }

    /// Returns `(lat, lon, alt_km)` or the first missing or non-finite field.
    pub fn coordinates(&self) -> Result<(f64, f64, f64), MalformedField> {
        let lat = self.latitude.filter(|v| v.is_finite()).ok_or(MalformedField::Latitude)?;
        let lon = self.longitude.filter(|v| v.is_finite()).ok_or(MalformedField::Longitude)?;
        let alt = self.altitude.filter(|v| v.is_finite()).ok_or(MalformedField::Altitude)?;
        Ok((lat, lon, alt))
    }
}
