#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
use chrono::{DateTime, TimeDelta, Utc};
use orbit_proximity::orbit::{DebrisRecord, OrbitalElements, RcsSize};
use orbit_proximity::{EngineConfig, EngineError, OrbitalEngine, error, info, log};
use rand::Rng;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const ISS_NORAD_ID: u64 = 25544;
const DEBRIS_VARIANTS: u64 = 80;
const TOP_RESULTS: usize = 5;
const TRACK_SPAN: TimeDelta = TimeDelta::minutes(93);
const TRACK_STEPS: usize = 60;

/// Catalogued fragmentation families the synthetic debris cloud is derived from.
const DEBRIS_FAMILIES: [(u64, &str, f64, f64, f64, RcsSize); 3] = [
    (36837, "FENGYUN 1C DEB", 15.38, 0.1234, 98.7, RcsSize::Small),
    (34454, "COSMOS 2251 DEB", 15.12, 0.0891, 74.0, RcsSize::Medium),
    (29275, "SL-16 R/B(2) DEB", 15.89, 0.0234, 82.5, RcsSize::Large),
];

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let engine = Arc::new(OrbitalEngine::spawn(EngineConfig::from_env()));
    if let Err(e) = run(&engine).await {
        error!("Screening run failed: {e}");
    }
    engine.shutdown().await;
}

async fn run(engine: &Arc<OrbitalEngine>) -> Result<(), EngineError> {
    let now = Utc::now();
    let reference_elements = OrbitalElements::new(ISS_NORAD_ID, now - TimeDelta::hours(3))
        .with_mean_motion(15.5)
        .with_inclination(51.64)
        .with_eccentricity(0.0005)
        .with_mean_anomaly(42.0)
        .with_longitude(-73.0);
    let reference = engine.position_at(&reference_elements, now)?;
    info!(
        "Reference {ISS_NORAD_ID} at lat {:.3}, lon {:.3}, alt {:.1} km",
        reference.latitude,
        reference.longitude,
        reference.altitude_km
    );

    let (elements, families) = synthetic_debris(now);
    let c_tok = CancellationToken::new();
    let outcome = Arc::clone(engine).batch_positions_parallel(Arc::from(elements), now, c_tok.clone()).await?;
    if outcome.skipped_count() > 0 {
        log!("{} debris element sets could not be propagated", outcome.skipped_count());
    }
    let debris: Vec<DebrisRecord> = outcome
        .positions
        .iter()
        .map(|p| {
            let (name, rcs) = families[p.index];
            DebrisRecord::new(p.norad_id, p.position.latitude, p.position.longitude, p.position.altitude_km)
                .with_name(name)
                .with_rcs_size(rcs)
        })
        .collect();

    let threshold = engine.config().proximity.default_max_distance_km;
    let report = engine.filter_by_proximity(&reference, &debris, threshold)?;
    let summary = report.summary();
    info!(
        "{} of {} debris within {threshold} km via {}, {} high risk",
        summary.nearby,
        summary.total_candidates,
        report.path,
        summary.high_risk
    );
    for result in report.results.iter().take(TOP_RESULTS) {
        log!(
            "{:<18} {:>8.2} km  dv {:.3} km/s  risk {:.4} {}",
            result.debris.name.as_deref().unwrap_or("UNKNOWN"),
            result.distance_km,
            result.relative_velocity_kms,
            result.risk_factor,
            result.risk_level
        );
    }

    let track = engine.ground_track(&reference_elements, now, TRACK_SPAN, TRACK_STEPS, &c_tok)?;
    if let (Some(first), Some(last)) = (track.first(), track.last()) {
        info!(
            "Ground track of {} points from ({:.2}, {:.2}) to ({:.2}, {:.2})",
            track.len(),
            first.longitude,
            first.latitude,
            last.longitude,
            last.latitude
        );
    }

    let stats = engine.cache_stats();
    info!(
        "Cache holds {} position samples and {} results",
        stats.position_cache_size(),
        stats.result_cache_size()
    );
    Ok(())
}

/// Perturbed copies of each debris family, with the name and size per entry.
fn synthetic_debris(now: DateTime<Utc>) -> (Vec<OrbitalElements>, Vec<(&'static str, RcsSize)>) {
    let mut rng = rand::rng();
    let mut elements = Vec::new();
    let mut families = Vec::new();
    for (base_id, name, mean_motion, eccentricity, inclination, rcs) in DEBRIS_FAMILIES {
        for variant in 0..DEBRIS_VARIANTS {
            let epoch = now - TimeDelta::minutes(rng.random_range(0..720));
            elements.push(
                OrbitalElements::new(base_id * 1000 + variant, epoch)
                    .with_mean_motion(mean_motion + rng.random_range(-0.3..0.3))
                    .with_eccentricity((eccentricity + rng.random_range(-0.01..0.01)).max(0.0))
                    .with_inclination(inclination + rng.random_range(-2.0..2.0))
                    .with_mean_anomaly(rng.random_range(0.0..360.0))
                    .with_longitude(rng.random_range(-180.0..180.0)),
            );
            families.push((name, rcs));
        }
    }
    (elements, families)
}
