//! Shared fixtures for unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use log::LevelFilter;
use std::collections::HashSet;
use std::sync::Once;
use tempfile::TempDir;

use crate::error::PropagationError;
use crate::propagator::{Propagator, StateVector};
use crate::visibility::Sample;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Empty directory, removed when the returned handle drops.
pub fn scratch_dir() -> TempDir {
    TempDir::new().unwrap()
}

pub const ISS_TLE: [&str; 3] = [
    "ISS (ZARYA)",
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
];

/// ISS orbit with an extreme drag term, decays within days of epoch.
pub const DECAYING_TLE: [&str; 2] = [
    "1 25544U 98067A   08264.51782528  .00100000  00000-0  90000-0 0  2924",
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
];

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Samples at 60 s spacing from [t0] with the given elevations.
pub fn samples_with_elevations(elevations: &[f64]) -> Vec<Sample> {
    elevations
        .iter()
        .enumerate()
        .map(|(i, &elevation_deg)| Sample {
            timestamp: t0() + Duration::seconds(60 * i as i64),
            elevation_deg,
            azimuth_deg: 10.0 * i as f64,
            range_km: 1000.0 + i as f64,
            range_rate_km_s: -1.5,
            satellite_altitude_km: 420.0,
        })
        .collect()
}

/// Deterministic propagator: the satellite moves along a straight TEME line and
/// fails at scripted instants.
pub struct ScriptedPropagator {
    pub origin: [f64; 3],
    pub velocity_km_s: [f64; 3],
    pub failures: HashSet<DateTime<Utc>>,
}

impl ScriptedPropagator {
    pub fn new(origin: [f64; 3], velocity_km_s: [f64; 3]) -> Self {
        Self {
            origin,
            velocity_km_s,
            failures: HashSet::new(),
        }
    }

    pub fn failing_at(mut self, timestamps: &[DateTime<Utc>]) -> Self {
        self.failures.extend(timestamps.iter().copied());
        self
    }
}

impl Propagator for ScriptedPropagator {
    fn propagate(&self, timestamp: DateTime<Utc>) -> Result<StateVector, PropagationError> {
        if self.failures.contains(&timestamp) {
            return Err(PropagationError::Propagation(format!(
                "scripted failure at {timestamp}"
            )));
        }
        let dt = (timestamp - t0()).num_milliseconds() as f64 / 1000.0;
        Ok(StateVector {
            position_km: [
                self.origin[0] + self.velocity_km_s[0] * dt,
                self.origin[1] + self.velocity_km_s[1] * dt,
                self.origin[2] + self.velocity_km_s[2] * dt,
            ],
            velocity_km_s: self.velocity_km_s,
        })
    }
}
