use super::{
    CartesianIndex, ProximityResult, RiskLevel, RiskWeights, SearchPath, SearchStrategy, SpatialGrid,
    collision_probability, rank_results, risk_factor, round_to,
};
use crate::cache::BucketedPoint;
use crate::config::PrecisionBuckets;
use crate::orbit::{DebrisRecord, GeodeticPosition, RcsSize, spherical_to_cartesian};
use itertools::Itertools;
use std::str::FromStr;
use strum::IntoEnumIterator;

fn result(id: Option<u64>, index: usize, risk: f64) -> ProximityResult {
    let mut debris = DebrisRecord::new(0, 0.0, 0.0, 400.0);
    debris.norad_id = id;
    ProximityResult {
        debris,
        candidate_index: index,
        distance_km: 1.0,
        relative_velocity_kms: 0.0,
        risk_factor: risk,
        risk_level: RiskLevel::Critical,
        collision_probability: 0.0,
    }
}

#[test]
fn test_default_weights_sum_to_nominal_total() {
    let weights = RiskWeights::default();
    assert!((weights.total() - RiskWeights::NOMINAL_TOTAL).abs() < 1e-12);
}

#[test]
fn test_risk_factor_components() {
    let w = RiskWeights::default();
    // touching, no speed difference: distance component only
    assert!((risk_factor(0.0, 0.0, 20.0, 10.0, &w) - 0.7).abs() < 1e-12);
    // at the threshold: velocity component only
    assert!((risk_factor(20.0, 5.0, 20.0, 10.0, &w) - 0.15).abs() < 1e-12);
    // velocity saturates at the normalisation speed
    assert!((risk_factor(10.0, 25.0, 20.0, 10.0, &w) - (0.35 + 0.3)).abs() < 1e-12);
    // beyond the threshold the distance component clamps at zero
    assert!(risk_factor(40.0, 0.0, 20.0, 10.0, &w).abs() < 1e-12);
}

#[test]
fn test_closer_debris_scores_higher() {
    let w = RiskWeights::default();
    assert!(risk_factor(1.0, 0.2, 20.0, 10.0, &w) > risk_factor(10.0, 0.2, 20.0, 10.0, &w));
}

#[test]
fn test_risk_levels_and_probability() {
    assert_eq!(RiskLevel::from_distance(10.0), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_distance(50.0), RiskLevel::High);
    assert_eq!(RiskLevel::from_distance(499.9), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_distance(800.0), RiskLevel::Low);
    assert!(RiskLevel::High.is_high_risk() && !RiskLevel::Medium.is_high_risk());
    assert_eq!(RiskLevel::Critical.to_string(), "CRITICAL");

    assert!((collision_probability(0.0, RcsSize::Small) - 0.001).abs() < 1e-15);
    assert!((collision_probability(500.0, RcsSize::Large) - 0.001).abs() < 1e-15);
    assert_eq!(collision_probability(1500.0, RcsSize::Medium), 0.0);
}

#[test]
fn test_risk_levels_ascend_in_severity() {
    let levels = RiskLevel::iter().collect_vec();
    assert_eq!(levels, vec![RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical]);
    assert!(levels.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(SearchStrategy::iter().count(), 4);
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(1.23456, 2), 1.23);
    assert_eq!(round_to(-2.5, 0), -3.0);
    assert_eq!(round_to(0.123_456_78, 4), 0.1235);
}

#[test]
fn test_rank_orders_by_risk_then_id_then_index() {
    let mut results = vec![
        result(Some(9), 0, 0.5),
        result(None, 1, 0.8),
        result(Some(3), 2, 0.5),
        result(Some(3), 3, 0.5),
        result(Some(1), 4, 0.9),
    ];
    rank_results(&mut results);
    let order = results.iter().map(|r| r.candidate_index).collect_vec();
    assert_eq!(order, vec![4, 1, 2, 3, 0]);
}

#[test]
fn test_strategy_resolution() {
    assert_eq!(SearchStrategy::Auto.resolve(100, 100), SearchPath::BruteForce);
    assert_eq!(SearchStrategy::Auto.resolve(101, 100), SearchPath::Grid);
    assert_eq!(SearchStrategy::BruteForce.resolve(5000, 100), SearchPath::BruteForce);
    assert_eq!(SearchStrategy::KdTree.resolve(1, 100), SearchPath::KdTree);
    assert_eq!(SearchStrategy::from_str("kd_tree"), Ok(SearchStrategy::KdTree));
    assert_eq!(SearchStrategy::from_str("GRID"), Ok(SearchStrategy::Grid));
    assert!(SearchStrategy::from_str("octree").is_err());
}

#[test]
fn test_grid_neighborhood_covers_adjacent_cells_only() {
    let positions = [
        GeodeticPosition::new(0.5, 0.5, 400.5),   // same cell as the reference
        GeodeticPosition::new(1.5, -0.5, 399.5),  // adjacent on every axis
        GeodeticPosition::new(0.5, 2.5, 400.5),   // two cells away in longitude
        GeodeticPosition::new(0.5, 0.5, 402.5),   // two cells away in altitude
    ];
    let grid = SpatialGrid::build(1.0, positions.iter().copied().enumerate());
    assert_eq!(grid.cell_count(), 4);
    let center = grid.cell_of(&GeodeticPosition::new(0.2, 0.2, 400.2));
    assert_eq!(center, (0, 0, 400));
    let found = grid.neighborhood(center).sorted().collect_vec();
    assert_eq!(found, vec![0, 1]);
}

#[test]
fn test_grid_floor_for_negative_coordinates() {
    let grid = SpatialGrid::build(10.0, std::iter::empty());
    assert_eq!(grid.cell_of(&GeodeticPosition::new(-0.1, -10.0, 5.0)), (-1, -1, 0));
}

#[test]
fn test_grid_neighborhood_at_the_edge_of_the_cell_range() {
    // a cell far smaller than the coordinates saturates the cell index
    let positions = [GeodeticPosition::new(0.0, 0.0, 400.0), GeodeticPosition::new(0.0, 0.0, -400.0)];
    let grid = SpatialGrid::build(5e-18, positions.iter().copied().enumerate());
    let top = grid.cell_of(&positions[0]);
    assert_eq!(top, (0, 0, i64::MAX));
    assert_eq!(grid.neighborhood(top).collect_vec(), vec![0]);
    let bottom = grid.cell_of(&positions[1]);
    assert_eq!(bottom, (0, 0, i64::MIN));
    assert_eq!(grid.neighborhood(bottom).collect_vec(), vec![1]);
}

#[test]
fn test_cartesian_index_radius_search() {
    let buckets = PrecisionBuckets::default();
    let positions = [
        (0.0, 0.0, 400.0),
        (0.05, 0.0, 400.0),  // ~5.9 km away
        (0.0, 0.0, 450.0),   // 50 km away
        (0.05, 0.0, 400.0),  // duplicate of item 1
    ];
    let index = CartesianIndex::build(positions.iter().enumerate().map(|(i, &(lat, lon, alt))| {
        (i, BucketedPoint::new(lat, lon, alt, &buckets), spherical_to_cartesian(lat, lon, alt))
    }));
    assert_eq!(index.len(), 4);
    let center = spherical_to_cartesian(0.0, 0.0, 400.0);
    assert_eq!(index.within(&center, 10.0), vec![0, 1, 3]);
    assert_eq!(index.within(&center, 60.0), vec![0, 1, 2, 3]);
    assert_eq!(index.within(&center, 1.0), vec![0]);
}
