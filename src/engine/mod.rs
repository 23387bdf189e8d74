mod orbital_engine;
mod orchestration;

pub use orbital_engine::OrbitalEngine;
pub use orchestration::{BatchOutcome, BatchPosition};
