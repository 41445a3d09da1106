//! Test case input schema.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::CaseError;
use crate::frames::GeodeticPosition;

#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub satellite: SatelliteData,
    pub observer: Observer,
    #[serde(rename = "timeWindow")]
    pub time_window: TimeWindow,
    #[serde(rename = "minElevation")]
    pub min_elevation: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteData {
    /// `[name, line1, line2]`, or just the two element lines.
    pub tle: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above the ellipsoid.
    pub altitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
    pub step: i64,
}

/// Time window with parsed instants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
}

impl TestCase {
    pub fn from_file(path: &Path) -> Result<Self, CaseError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, CaseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn observer_position(&self) -> GeodeticPosition {
        GeodeticPosition::from_meters(
            self.observer.latitude,
            self.observer.longitude,
            self.observer.altitude,
        )
    }

    pub fn time_range(&self) -> Result<TimeRange, CaseError> {
        self.time_window.parse()
    }
}

impl TimeWindow {
    pub fn parse(&self) -> Result<TimeRange, CaseError> {
        let start = parse_timestamp(&self.start)?;
        let end = parse_timestamp(&self.end)?;

        if self.step <= 0 {
            return Err(CaseError::InvalidTimeWindow(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if end < start {
            return Err(CaseError::InvalidTimeWindow(format!(
                "end {} is before start {}",
                self.end, self.start
            )));
        }

        Ok(TimeRange {
            start,
            end,
            step: Duration::seconds(self.step),
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CaseError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CaseError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}
