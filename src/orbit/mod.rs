pub mod constants;
mod elements;
mod geodetic;
mod position_model;
#[cfg(test)]
mod tests;
mod track;

pub use elements::{DebrisRecord, OrbitalElements, RcsSize, ResolvedElements};
pub use geodetic::{
    CartesianPoint, GeodeticPosition, cartesian_to_spherical, is_leo, spherical_to_cartesian, wrap_longitude,
};
pub use position_model::{
    circular_velocity_kms, mean_anomaly_at, orbital_period_minutes, propagate, semi_major_axis_km,
    true_anomaly_approx,
};
pub use track::{GroundPoint, TrajectorySample, sample_times};
