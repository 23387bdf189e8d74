use crate::orbit::RcsSize;
use strum_macros::{Display, EnumIter};

/// Weights of the distance and velocity components of a risk factor.
///
/// The default weights sum to [`RiskWeights::NOMINAL_TOTAL`], which keeps a
/// risk factor inside [0, 1] for every in-range candidate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RiskWeights {
    pub distance: f64,
    pub velocity: f64,
}

impl Default for RiskWeights {
    fn default() -> Self { Self { distance: 0.7, velocity: 0.3 } }
}

impl RiskWeights {
    pub const NOMINAL_TOTAL: f64 = 1.0;

    pub fn total(&self) -> f64 { self.distance + self.velocity }
}

/// Combines proximity and relative speed into one dimensionless score.
///
/// # Arguments
/// - `distance_km`: Separation of the two objects.
/// - `relative_velocity_kms`: Absolute speed difference of the two objects.
/// - `max_distance_km`: Query threshold; candidates at this distance score 0 on distance.
/// - `max_relative_velocity_kms`: Speed difference at which the velocity component saturates.
/// - `weights`: Component weights.
pub fn risk_factor(
    distance_km: f64,
    relative_velocity_kms: f64,
    max_distance_km: f64,
    max_relative_velocity_kms: f64,
    weights: &RiskWeights,
) -> f64 {
    let distance_component = ((max_distance_km - distance_km) / max_distance_km).max(0.0);
    let velocity_component = (relative_velocity_kms / max_relative_velocity_kms).min(1.0);
    distance_component * weights.distance + velocity_component * weights.velocity
}

/// Distance-based severity bands of a conjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, serde::Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    const CRITICAL_KM: f64 = 50.0;
    const HIGH_KM: f64 = 200.0;
    const MEDIUM_KM: f64 = 500.0;

    pub fn from_distance(distance_km: f64) -> Self {
        if distance_km < Self::CRITICAL_KM {
            RiskLevel::Critical
        } else if distance_km < Self::HIGH_KM {
            RiskLevel::High
        } else if distance_km < Self::MEDIUM_KM {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn is_high_risk(self) -> bool { self >= RiskLevel::High }
}

const COLLISION_HORIZON_KM: f64 = 1000.0;
const COLLISION_BASE_PROBABILITY: f64 = 0.001;

/// Rough collision probability from separation, doubled for large objects.
pub fn collision_probability(distance_km: f64, rcs_size: RcsSize) -> f64 {
    let base = ((COLLISION_HORIZON_KM - distance_km) / COLLISION_HORIZON_KM).max(0.0) * COLLISION_BASE_PROBABILITY;
    if rcs_size == RcsSize::Large { base * 2.0 } else { base }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
