//! Result output schema shared by every implementation under comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::visibility::{round2, VisibilityWindow, WindowPoint};

pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(rename = "testCase")]
    pub test_case: String,
    pub implementation: String,
    pub version: String,
    #[serde(rename = "visibilityWindows")]
    pub visibility_windows: Vec<WindowReport>,
    #[serde(rename = "executionTime", default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    pub start: String,
    pub end: String,
    #[serde(rename = "maxElevation")]
    pub max_elevation: f64,
    #[serde(rename = "maxElevationTime")]
    pub max_elevation_time: String,
    pub duration: f64,
    pub points: Vec<PointReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointReport {
    pub time: String,
    pub azimuth: f64,
    pub elevation: f64,
    pub range: f64,
    #[serde(rename = "rangeRate")]
    pub range_rate: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "libraryName")]
    pub library_name: String,
    #[serde(rename = "libraryVersion")]
    pub library_version: String,
    pub platform: String,
    #[serde(rename = "rangeRateLookahead")]
    pub range_rate_lookahead: String,
}

impl From<&WindowPoint> for PointReport {
    fn from(point: &WindowPoint) -> Self {
        Self {
            time: format_time(&point.time),
            azimuth: point.azimuth_deg,
            elevation: point.elevation_deg,
            range: point.range_km,
            range_rate: point.range_rate_km_s,
            altitude: point.altitude_km,
        }
    }
}

impl From<&VisibilityWindow> for WindowReport {
    fn from(window: &VisibilityWindow) -> Self {
        Self {
            start: format_time(&window.start),
            end: format_time(&window.end),
            max_elevation: round2(window.peak_elevation_deg),
            max_elevation_time: format_time(&window.peak_elevation_time),
            duration: window.duration_s,
            points: window.points.iter().map(PointReport::from).collect(),
        }
    }
}

impl TestResult {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
