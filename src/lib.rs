#![allow(clippy::similar_names, clippy::module_name_repetitions)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
//! Memoized orbital computations for debris proximity screening.
//!
//! [`OrbitalEngine`] propagates simplified Keplerian elements to geodetic
//! positions, converts them to Earth-centered Cartesian points and ranks debris
//! around a reference object by a distance/velocity risk factor. Every step is
//! cached per engine with age-based expiry.

pub mod cache;
pub mod config;
mod engine;
pub mod error;
pub mod logger;
pub mod orbit;
pub mod proximity;

pub use config::{BatchConfig, CacheConfig, EngineConfig, PrecisionBuckets, ProximityConfig};
pub use engine::{BatchOutcome, BatchPosition, OrbitalEngine};
pub use error::EngineError;
