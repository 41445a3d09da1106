//! Orbit propagation capability and its SGP4 implementation.

use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::error::PropagationError;
use crate::frames::InertialVector;

/// Position and velocity in the TEME frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: InertialVector,
    pub velocity_km_s: [f64; 3],
}

impl StateVector {
    pub fn is_finite(&self) -> bool {
        self.position_km
            .iter()
            .chain(self.velocity_km_s.iter())
            .all(|v| v.is_finite())
    }
}

/// Anything that can place the satellite in TEME at an absolute time.
///
/// An `Err` marks the time step as unusable; callers skip it.
pub trait Propagator {
    fn propagate(&self, timestamp: DateTime<Utc>) -> Result<StateVector, PropagationError>;
}

impl<F> Propagator for F
where
    F: Fn(DateTime<Utc>) -> Result<StateVector, PropagationError>,
{
    fn propagate(&self, timestamp: DateTime<Utc>) -> Result<StateVector, PropagationError> {
        self(timestamp)
    }
}

pub struct Sgp4Propagator {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Propagator {
    /// Accepts 2-line or 3-line (named) element sets.
    pub fn from_tle_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, PropagationError> {
        let (name, line1, line2) = parse_tle_lines(lines)?;
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements_afspc_compatibility_mode(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn object_name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }
}

impl Propagator for Sgp4Propagator {
    fn propagate(&self, timestamp: DateTime<Utc>) -> Result<StateVector, PropagationError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| PropagationError::Propagation(e.to_string()))?;

        let prediction = self.constants.propagate(minutes)?;

        let state = StateVector {
            position_km: prediction.position,
            velocity_km_s: prediction.velocity,
        };
        if !state.is_finite() {
            return Err(PropagationError::Propagation(format!(
                "non-finite state at {timestamp}"
            )));
        }
        Ok(state)
    }
}

fn parse_tle_lines<S: AsRef<str>>(
    lines: &[S],
) -> Result<(Option<String>, String, String), PropagationError> {
    let lines: Vec<&str> = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect();

    match lines.len() {
        2 => Ok((None, lines[0].to_string(), lines[1].to_string())),
        3 => Ok((
            Some(lines[0].to_string()),
            lines[1].to_string(),
            lines[2].to_string(),
        )),
        n => Err(PropagationError::InvalidTleFormat(n)),
    }
}
