use chrono::Utc;
use std::time::Instant;

use crate::case::TestCase;
use crate::error::CaseError;
use crate::propagator::{Propagator, Sgp4Propagator};
use crate::report::{format_time, Metadata, TestResult, WindowReport};
use crate::visibility::{generate_samples, round3, segment_windows, RangeRateLookahead};

const LIBRARY_NAME: &str = "sgp4";
const LIBRARY_VERSION: &str = "2.3";

/// Runs one test case end to end.
pub struct VisibilityCalculator {
    implementation: String,
    version: String,
    lookahead: RangeRateLookahead,
}

impl VisibilityCalculator {
    pub fn new(implementation: &str, version: &str, lookahead: RangeRateLookahead) -> Self {
        Self {
            implementation: implementation.to_string(),
            version: version.to_string(),
            lookahead,
        }
    }

    pub fn lookahead(&self) -> RangeRateLookahead {
        self.lookahead
    }

    pub fn calculate(&self, case: &TestCase) -> Result<TestResult, CaseError> {
        let propagator = Sgp4Propagator::from_tle_lines(&case.satellite.tle)?;
        log::debug!(
            "{}: NORAD {} epoch {}",
            case.name,
            propagator.norad_id(),
            propagator.epoch()
        );
        self.calculate_with(case, &propagator)
    }

    pub fn calculate_with<P: Propagator + ?Sized>(
        &self,
        case: &TestCase,
        propagator: &P,
    ) -> Result<TestResult, CaseError> {
        let started = Instant::now();
        let range = case.time_range()?;
        let observer = case.observer_position();

        let samples = generate_samples(
            propagator,
            &observer,
            range.start,
            range.end,
            range.step,
            self.lookahead,
        );
        let windows = segment_windows(&samples, case.min_elevation);
        log::debug!(
            "{}: {} samples, {} windows",
            case.name,
            samples.len(),
            windows.len()
        );

        let elapsed = started.elapsed();
        Ok(TestResult {
            test_case: case.name.clone(),
            implementation: self.implementation.clone(),
            version: self.version.clone(),
            visibility_windows: windows.iter().map(WindowReport::from).collect(),
            execution_time: Some(round3(elapsed.as_secs_f64())),
            timestamp: Some(format_time(&Utc::now())),
            metadata: Some(Metadata {
                library_name: LIBRARY_NAME.to_string(),
                library_version: LIBRARY_VERSION.to_string(),
                platform: "Rust".to_string(),
                range_rate_lookahead: self.lookahead.to_string(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Observer, SatelliteData, TimeWindow};
    use crate::error::PropagationError;
    use crate::propagator::StateVector;
    use crate::tests::{init_logger, ScriptedPropagator, ISS_TLE};

    fn case(tle: &[&str], start: &str, end: &str, step: i64) -> TestCase {
        TestCase {
            name: "unit".into(),
            satellite: SatelliteData {
                tle: tle.iter().map(|l| l.to_string()).collect(),
            },
            observer: Observer {
                latitude: 0.0,
                longitude: 0.0,
                altitude: 0.0,
            },
            time_window: TimeWindow {
                start: start.into(),
                end: end.into(),
                step,
            },
            min_elevation: 10.0,
        }
    }

    fn calculator() -> VisibilityCalculator {
        VisibilityCalculator::new("rust-sgp4", "1.0.0", RangeRateLookahead::Step)
    }

    #[test]
    fn result_carries_identity_and_metadata() {
        init_logger();
        let case = case(
            &ISS_TLE,
            "2008-09-20T12:00:00Z",
            "2008-09-20T18:00:00Z",
            60,
        );
        let result = calculator().calculate(&case).unwrap();
        assert_eq!(result.test_case, "unit");
        assert_eq!(result.implementation, "rust-sgp4");
        assert_eq!(result.version, "1.0.0");
        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.library_name, "sgp4");
        assert_eq!(metadata.range_rate_lookahead, "step");
        assert!(result.execution_time.unwrap() >= 0.0);
    }

    #[test]
    fn invalid_tle_fails_the_case() {
        let case = case(
            &["1 garbage", "2 garbage"],
            "2008-09-20T12:00:00Z",
            "2008-09-20T13:00:00Z",
            60,
        );
        assert!(matches!(
            calculator().calculate(&case),
            Err(CaseError::Satellite(_))
        ));
    }

    #[test]
    fn invalid_window_fails_the_case() {
        let case = case(&ISS_TLE, "2008-09-20T12:00:00Z", "2008-09-20T13:00:00Z", -60);
        assert!(matches!(
            calculator().calculate(&case),
            Err(CaseError::InvalidTimeWindow(_))
        ));
    }

    #[test]
    fn degenerate_grid_with_failure_yields_no_windows() {
        let case = case(&ISS_TLE, "2024-01-01T00:00:00Z", "2024-01-01T00:00:00Z", 60);
        let always_fails = |_: chrono::DateTime<Utc>| {
            Err::<StateVector, _>(PropagationError::Propagation("decayed".into()))
        };
        let result = calculator().calculate_with(&case, &always_fails).unwrap();
        assert!(result.visibility_windows.is_empty());
    }

    #[test]
    fn satellite_above_pole_is_visible_throughout() {
        let mut case = case(&ISS_TLE, "2024-01-01T00:00:00Z", "2024-01-01T00:10:00Z", 60);
        case.observer = Observer {
            latitude: 90.0,
            longitude: 0.0,
            altitude: 0.0,
        };
        // on the polar axis, unaffected by Earth rotation
        let stationary = ScriptedPropagator::new([0.0, 0.0, 42164.0], [0.0, 0.0, 0.0]);

        let result = calculator().calculate_with(&case, &stationary).unwrap();
        assert_eq!(result.visibility_windows.len(), 1);
        let window = &result.visibility_windows[0];
        assert_eq!(window.start, "2024-01-01T00:00:00Z");
        assert_eq!(window.end, "2024-01-01T00:10:00Z");
        assert_eq!(window.duration, 600.0);
        assert_eq!(window.points.len(), 11);
        assert!(window.max_elevation > 89.0);
        assert!(window.points.iter().all(|p| p.range_rate == 0.0));
    }
}
