use super::constants::{DEFAULT_MEAN_MOTION, EARTH_RADIUS_KM, MAX_MEAN_MOTION, MIN_ALTITUDE_KM};
use super::{
    CartesianPoint, DebrisRecord, GeodeticPosition, OrbitalElements, RcsSize, ResolvedElements, cartesian_to_spherical, is_leo,
    orbital_period_minutes, propagate, sample_times, semi_major_axis_km, spherical_to_cartesian,
    true_anomaly_approx, wrap_longitude,
};
use crate::error::{InvalidElementsReason, MalformedField};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn epoch() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() }

fn iss_like() -> OrbitalElements {
    OrbitalElements::new(25544, epoch())
        .with_mean_motion(15.5)
        .with_inclination(51.6)
        .with_eccentricity(0.0006)
        .with_mean_anomaly(10.0)
        .with_longitude(-30.0)
}

#[test]
fn test_defaults_applied_for_missing_fields() {
    let resolved = OrbitalElements::new(1, epoch()).resolve().unwrap();
    assert_eq!(resolved.mean_motion, DEFAULT_MEAN_MOTION);
    assert_eq!(resolved.inclination, 0.0);
    assert_eq!(resolved.eccentricity, 0.0);

    let zero_motion = OrbitalElements::new(1, epoch()).with_mean_motion(0.0).resolve().unwrap();
    assert_eq!(zero_motion.mean_motion, DEFAULT_MEAN_MOTION);
}

#[test]
fn test_invalid_elements_rejected() {
    let mut no_id = iss_like();
    no_id.norad_id = None;
    assert_eq!(no_id.resolve(), Err(InvalidElementsReason::MissingNoradId));
    assert_eq!(
        iss_like().with_eccentricity(1.0).resolve(),
        Err(InvalidElementsReason::EccentricityOutOfRange)
    );
    assert_eq!(
        iss_like().with_mean_motion(-2.0).resolve(),
        Err(InvalidElementsReason::NonPositiveMeanMotion)
    );
    assert_eq!(iss_like().with_inclination(f64::NAN).resolve(), Err(InvalidElementsReason::NonFiniteValue));
}

#[test]
fn test_position_at_epoch_matches_hand_computation() {
    let elements = OrbitalElements::new(7, epoch()).with_mean_motion(15.5).with_mean_anomaly(90.0).with_longitude(10.0);
    let pos = propagate(&elements.resolve().unwrap(), epoch());
    assert!((pos.longitude - 100.0).abs() < 1e-9);
    assert!(pos.latitude.abs() < 1e-12);
    let expected_alt = semi_major_axis_km(15.5) - EARTH_RADIUS_KM;
    assert!((pos.altitude_km - expected_alt).abs() < 1e-9);
    // a 15.5 rev/day orbit sits at roughly 424 km
    assert!((pos.altitude_km - 423.86).abs() < 0.01, "altitude {}", pos.altitude_km);
}

#[test]
fn test_latitude_follows_inclination_swing() {
    let elements = OrbitalElements::new(8, epoch()).with_inclination(60.0).with_mean_anomaly(90.0);
    let pos = propagate(&elements.resolve().unwrap(), epoch());
    assert!((pos.latitude - 6.0).abs() < 1e-9);
}

#[test]
fn test_equation_of_center_in_degrees() {
    let nu = true_anomaly_approx(90.0, 0.1);
    assert!((nu - (90.0 + 0.2f64.to_degrees())).abs() < 1e-9);
    assert_eq!(true_anomaly_approx(123.0, 0.0), 123.0);
}

#[test]
fn test_propagation_is_deterministic() {
    let resolved = iss_like().resolve().unwrap();
    let t = epoch() + TimeDelta::minutes(37);
    assert_eq!(propagate(&resolved, t), propagate(&resolved, t));
}

#[test]
fn test_output_is_bounded() {
    let mut rng = StdRng::seed_from_u64(0x0b17);
    for _ in 0..2000 {
        let elements = OrbitalElements::new(rng.random_range(1..100_000), epoch())
            .with_mean_motion(rng.random_range(0.5..17.0))
            .with_inclination(rng.random_range(-180.0..180.0))
            .with_eccentricity(rng.random_range(0.0..0.99))
            .with_mean_anomaly(rng.random_range(-720.0..720.0))
            .with_longitude(rng.random_range(-540.0..540.0));
        let offset = TimeDelta::seconds(rng.random_range(-30 * 86_400..30 * 86_400));
        let pos = propagate(&elements.resolve().unwrap(), epoch() + offset);
        assert!(pos.is_bounded(), "unbounded position {pos:?} for {elements:?}");
    }
}

#[test]
fn test_output_is_bounded_for_extreme_elements() {
    let offsets = [-36_500, -1, 0, 1, 36_500].map(TimeDelta::days);
    for mean_motion in [1e-6, 1e-3, 20.0, 1e5, MAX_MEAN_MOTION] {
        for eccentricity in [0.0, 0.999] {
            let elements = OrbitalElements::new(11, epoch())
                .with_mean_motion(mean_motion)
                .with_inclination(179.0)
                .with_eccentricity(eccentricity)
                .with_mean_anomaly(-1e12)
                .with_longitude(1e12);
            let resolved = elements.resolve().unwrap();
            for offset in offsets {
                let pos = propagate(&resolved, epoch() + offset);
                assert!(pos.is_bounded(), "unbounded position {pos:?} for {elements:?} at {offset}");
            }
        }
    }
}

#[test]
fn test_oversized_mean_motion() {
    let elements = OrbitalElements::new(9, epoch()).with_mean_motion(1e307);
    assert_eq!(elements.resolve(), Err(InvalidElementsReason::MeanMotionOutOfRange));

    // resolved values built by hand skip validation; the anomaly advance overflows
    let unchecked = ResolvedElements {
        norad_id: 9,
        mean_motion: 1e307,
        inclination: 45.0,
        eccentricity: 0.0,
        mean_anomaly: 30.0,
        longitude: 0.0,
        epoch_time: epoch(),
    };
    let pos = propagate(&unchecked, epoch() + TimeDelta::days(1));
    assert!(pos.is_bounded(), "unbounded position {pos:?}");
    assert!((pos.longitude - 30.0).abs() < 1e-9);
}

#[test]
fn test_altitude_floor() {
    // 20 rev/day would put the object below the floor
    let elements = OrbitalElements::new(9, epoch()).with_mean_motion(20.0);
    let pos = propagate(&elements.resolve().unwrap(), epoch());
    assert_eq!(pos.altitude_km, MIN_ALTITUDE_KM);
}

#[test]
fn test_wrap_longitude() {
    assert_eq!(wrap_longitude(180.0), 180.0);
    assert_eq!(wrap_longitude(-180.0), 180.0);
    assert!((wrap_longitude(190.0) + 170.0).abs() < 1e-12);
    assert!((wrap_longitude(-190.0) - 170.0).abs() < 1e-12);
    assert!((wrap_longitude(725.0) - 5.0).abs() < 1e-9);
}

#[test]
fn test_cartesian_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let lat = rng.random_range(-89.9..89.9);
        let lon = rng.random_range(-179.9..180.0);
        let alt = rng.random_range(160.0..2000.0);
        let back = cartesian_to_spherical(&spherical_to_cartesian(lat, lon, alt));
        assert!((back.latitude - lat).abs() < 1e-6);
        assert!((back.longitude - lon).abs() < 1e-6);
        assert!((back.altitude_km - alt).abs() < 1e-6);
    }
}

#[test]
fn test_cartesian_axes() {
    let p = spherical_to_cartesian(0.0, 0.0, 0.0);
    assert!((p.x - EARTH_RADIUS_KM).abs() < 1e-9 && p.y.abs() < 1e-9 && p.z.abs() < 1e-9);
    let pole = spherical_to_cartesian(90.0, 0.0, 100.0);
    assert!((pole.z - (EARTH_RADIUS_KM + 100.0)).abs() < 1e-9);
    let a = CartesianPoint::new(1.0, 2.0, 2.0);
    assert_eq!(a.abs(), 3.0);
    assert_eq!(a.euclid_distance(&CartesianPoint::new(1.0, 2.0, 2.0)), 0.0);
}

#[test]
fn test_sample_times_inclusive() {
    let times: Vec<_> = sample_times(epoch(), TimeDelta::seconds(100), 4).collect();
    assert_eq!(times.len(), 5);
    assert_eq!(times[0], epoch());
    assert_eq!(times[4], epoch() + TimeDelta::seconds(100));
    assert_eq!(times[1] - times[0], TimeDelta::seconds(25));
    assert_eq!(sample_times(epoch(), TimeDelta::seconds(100), 0).count(), 1);
}

#[test]
fn test_period_and_leo_band() {
    assert!((orbital_period_minutes(15.5) - 92.903_225_806).abs() < 1e-6);
    assert!(is_leo(400.0));
    assert!(!is_leo(35_786.0));
    assert!(GeodeticPosition::new(0.0, 0.0, 550.0).is_leo());
}

#[test]
fn test_debris_record_coordinates() {
    let ok = DebrisRecord::new(1, 10.0, 20.0, 500.0);
    assert_eq!(ok.coordinates(), Ok((10.0, 20.0, 500.0)));
    let mut missing_alt = ok.clone();
    missing_alt.altitude = None;
    assert_eq!(missing_alt.coordinates(), Err(MalformedField::Altitude));
    let mut nan_lat = ok;
    nan_lat.latitude = Some(f64::NAN);
    assert_eq!(nan_lat.coordinates(), Err(MalformedField::Latitude));
}

#[test]
fn test_rcs_size_default_and_display() {
    assert_eq!(RcsSize::default(), RcsSize::Unknown);
    assert_eq!(RcsSize::Large.to_string(), "Large");
}
