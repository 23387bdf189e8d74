mod kd_search;
mod proximity_result;
mod risk;
mod spatial_grid;
#[cfg(test)]
mod tests;

pub use kd_search::CartesianIndex;
pub use proximity_result::{ConjunctionSummary, ProximityReport, ProximityResult, SkippedRecord, rank_results};
pub use risk::{RiskLevel, RiskWeights, collision_probability, risk_factor, round_to};
pub use spatial_grid::{CellKey, SpatialGrid};

use strum_macros::{Display, EnumIter, EnumString};

/// How a proximity query selects the candidates it evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SearchStrategy {
    /// Brute force up to the configured population limit, spatial grid above it.
    Auto,
    BruteForce,
    /// Approximate 3×3×3 cell neighborhood; see [`SpatialGrid`].
    Grid,
    /// Exact radius search on a k-d tree of Cartesian positions.
    KdTree,
}

/// The evaluation path a query actually took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, serde::Serialize)]
pub enum SearchPath {
    BruteForce,
    Grid,
    KdTree,
}

impl SearchStrategy {
    pub fn resolve(self, population: usize, brute_force_limit: usize) -> SearchPath {
        match self {
            SearchStrategy::Auto if population <= brute_force_limit => SearchPath::BruteForce,
            SearchStrategy::Auto | SearchStrategy::Grid => SearchPath::Grid,
            SearchStrategy::BruteForce => SearchPath::BruteForce,
            SearchStrategy::KdTree => SearchPath::KdTree,
        }
    }
}
