use super::SearchPath;
use super::risk::RiskLevel;
use crate::error::EngineError;
use crate::orbit::DebrisRecord;
use std::cmp::Ordering;

/// A debris record that passed the distance threshold, with its screening metrics.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProximityResult {
    pub debris: DebrisRecord,
    /// Position of the record in the caller's candidate list.
    pub candidate_index: usize,
    /// Rounded to 2 decimals.
    pub distance_km: f64,
    /// Rounded to 3 decimals.
    pub relative_velocity_kms: f64,
    /// Rounded to 4 decimals.
    pub risk_factor: f64,
    pub risk_level: RiskLevel,
    pub collision_probability: f64,
}

/// A candidate record left out of a query or batch, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub index: usize,
    pub norad_id: Option<u64>,
    pub reason: EngineError,
}

/// Outcome of one proximity query.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityReport {
    /// Sorted by descending risk, then ascending id (missing ids last), then input order.
    pub results: Vec<ProximityResult>,
    pub skipped: Vec<SkippedRecord>,
    pub path: SearchPath,
    /// Candidates whose distance was actually evaluated.
    pub examined: usize,
    pub total_candidates: usize,
}

impl ProximityReport {
    pub fn skipped_count(&self) -> usize { self.skipped.len() }

    pub fn norad_ids(&self) -> Vec<Option<u64>> { self.results.iter().map(|r| r.debris.norad_id).collect() }

    pub fn summary(&self) -> ConjunctionSummary {
        ConjunctionSummary {
            total_candidates: self.total_candidates,
            nearby: self.results.len(),
            high_risk: self.results.iter().filter(|r| r.risk_level.is_high_risk()).count(),
            skipped: self.skipped.len(),
            max_risk_factor: self.results.first().map(|r| r.risk_factor),
        }
    }
}

/// Condensed numbers of a proximity query for status displays.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ConjunctionSummary {
    pub total_candidates: usize,
    pub nearby: usize,
    /// Results in the `High` or `Critical` band.
    pub high_risk: usize,
    pub skipped: usize,
    pub max_risk_factor: Option<f64>,
}

/// Sorts results into their reporting order.
pub fn rank_results(results: &mut [ProximityResult]) {
    results.sort_by(|a, b| {
        b.risk_factor
            .total_cmp(&a.risk_factor)
            .then_with(|| cmp_ids(a.debris.norad_id, b.debris.norad_id))
            .then_with(|| a.candidate_index.cmp(&b.candidate_index))
    });
}

fn cmp_ids(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
