use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;
use serde::Deserialize;
use strum_macros::Display;

use crate::error::PropagationError;
use crate::frames::{
    difference, inertial_to_earth_fixed, norm, EarthFixedVector, GeodeticPosition,
    EARTH_RADIUS_KM,
};
use crate::propagator::Propagator;
use crate::topocentric::look_angles;

/// Where the forward difference for range rate looks ahead to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum RangeRateLookahead {
    /// Next grid instant, `t + step`.
    #[default]
    Step,
    /// `t + 1 s`, regardless of the grid step.
    OneSecond,
}

impl RangeRateLookahead {
    fn offset(&self, step: Duration) -> Duration {
        match self {
            RangeRateLookahead::Step => step,
            RangeRateLookahead::OneSecond => Duration::seconds(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
    pub range_rate_km_s: f64,
    pub satellite_altitude_km: f64,
}

/// `start, start + step, ...` up to and including the last instant `<= end`.
///
/// A non-positive step yields at most the single instant `start`.
pub fn time_grid(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Vec<DateTime<Utc>> {
    let mut times = Vec::new();
    if step <= Duration::zero() {
        log::warn!("non-positive step {step}, sampling {start} only");
        if start <= end {
            times.push(start);
        }
        return times;
    }

    let mut cursor = start;
    while cursor <= end {
        times.push(cursor);
        cursor += step;
    }
    times
}

/// Propagates over the grid and projects every instant into the observer's sky.
///
/// Instants where propagation fails are dropped. Range rate is a forward
/// difference and is 0 for the last grid instant or when the lookahead fails.
pub fn generate_samples<P: Propagator + ?Sized>(
    propagator: &P,
    observer: &GeodeticPosition,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
    lookahead: RangeRateLookahead,
) -> Vec<Sample> {
    let observer_ecef = observer.position_ecef_km();
    let times = time_grid(start, end, step);
    let mut samples = Vec::with_capacity(times.len());

    for (i, &timestamp) in times.iter().enumerate() {
        let sat_ecef = match satellite_ecef(propagator, timestamp) {
            Ok(position) => position,
            Err(e) => {
                log::warn!("skipping {}: {}", timestamp, e);
                continue;
            }
        };

        let angles = look_angles(
            difference(sat_ecef, observer_ecef),
            observer.latitude_deg,
            observer.longitude_deg,
        );

        let range_rate_km_s = if i + 1 < times.len() {
            let next = timestamp + lookahead.offset(step);
            match satellite_ecef(propagator, next) {
                Ok(next_ecef) => {
                    let next_range = norm(difference(next_ecef, observer_ecef));
                    let elapsed = (next - timestamp).num_milliseconds() as f64 / 1000.0;
                    (next_range - angles.range_km) / elapsed
                }
                Err(e) => {
                    log::debug!(
                        "no range rate at {}: lookahead {} failed: {}",
                        timestamp,
                        next,
                        e
                    );
                    0.0
                }
            }
        } else {
            0.0
        };

        samples.push(Sample {
            timestamp,
            elevation_deg: angles.elevation_deg,
            azimuth_deg: angles.azimuth_deg,
            range_km: angles.range_km,
            range_rate_km_s,
            satellite_altitude_km: norm(sat_ecef) - EARTH_RADIUS_KM,
        });
    }

    samples
}

fn satellite_ecef<P: Propagator + ?Sized>(
    propagator: &P,
    timestamp: DateTime<Utc>,
) -> Result<EarthFixedVector, PropagationError> {
    let state = propagator.propagate(timestamp)?;
    Ok(inertial_to_earth_fixed(state.position_km, timestamp))
}
