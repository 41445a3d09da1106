use chrono::{DateTime, Utc};

use super::rounding::{round2, round3};
use super::sample::Sample;

/// A sample as reported inside a window, rounded for output.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPoint {
    pub time: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub range_rate_km_s: f64,
    pub altitude_km: f64,
}

impl From<&Sample> for WindowPoint {
    fn from(sample: &Sample) -> Self {
        Self {
            time: sample.timestamp,
            azimuth_deg: round2(sample.azimuth_deg),
            elevation_deg: round2(sample.elevation_deg),
            range_km: round2(sample.range_km),
            range_rate_km_s: round3(sample.range_rate_km_s),
            altitude_km: round2(sample.satellite_altitude_km),
        }
    }
}

/// Maximal run of consecutive samples at or above the elevation threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Unrounded maximum over the contained samples.
    pub peak_elevation_deg: f64,
    pub peak_elevation_time: DateTime<Utc>,
    pub duration_s: f64,
    pub points: Vec<WindowPoint>,
}

#[derive(Debug)]
struct OpenWindow {
    start: DateTime<Utc>,
    last: DateTime<Utc>,
    peak_elevation_deg: f64,
    peak_elevation_time: DateTime<Utc>,
    points: Vec<WindowPoint>,
}

impl OpenWindow {
    fn open(sample: &Sample) -> Self {
        Self {
            start: sample.timestamp,
            last: sample.timestamp,
            peak_elevation_deg: sample.elevation_deg,
            peak_elevation_time: sample.timestamp,
            points: vec![WindowPoint::from(sample)],
        }
    }

    fn extend(&mut self, sample: &Sample) {
        // strict: the first maximum wins ties
        if sample.elevation_deg > self.peak_elevation_deg {
            self.peak_elevation_deg = sample.elevation_deg;
            self.peak_elevation_time = sample.timestamp;
        }
        self.last = sample.timestamp;
        self.points.push(WindowPoint::from(sample));
    }

    /// Ends at the last in-threshold sample.
    fn close(self) -> VisibilityWindow {
        let duration_ms = (self.last - self.start).num_milliseconds();
        VisibilityWindow {
            start: self.start,
            end: self.last,
            peak_elevation_deg: self.peak_elevation_deg,
            peak_elevation_time: self.peak_elevation_time,
            duration_s: (duration_ms as f64 / 1000.0).round(),
            points: self.points,
        }
    }
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Outside,
    Inside(OpenWindow),
}

/// Streaming segmenter: feed time-ordered samples, collect closed windows.
///
/// Samples are neither reordered nor deduplicated.
#[derive(Debug)]
pub struct WindowSegmenter {
    min_elevation_deg: f64,
    state: ScanState,
}

impl WindowSegmenter {
    pub fn new(min_elevation_deg: f64) -> Self {
        Self {
            min_elevation_deg,
            state: ScanState::Outside,
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self.state, ScanState::Inside(_))
    }

    /// Returns the window closed by this sample, if any.
    pub fn push(&mut self, sample: &Sample) -> Option<VisibilityWindow> {
        let visible = sample.elevation_deg >= self.min_elevation_deg;

        match (std::mem::take(&mut self.state), visible) {
            (ScanState::Outside, false) => None,
            (ScanState::Outside, true) => {
                self.state = ScanState::Inside(OpenWindow::open(sample));
                None
            }
            (ScanState::Inside(mut window), true) => {
                window.extend(sample);
                self.state = ScanState::Inside(window);
                None
            }
            (ScanState::Inside(window), false) => Some(window.close()),
        }
    }

    /// Closes a window still open at the end of the scan.
    pub fn finish(self) -> Option<VisibilityWindow> {
        match self.state {
            ScanState::Outside => None,
            ScanState::Inside(window) => Some(window.close()),
        }
    }
}

/// Iterator adapter yielding windows as soon as they close.
pub struct Windows<I> {
    samples: I,
    segmenter: Option<WindowSegmenter>,
}

impl<I> Windows<I> {
    pub fn new(samples: I, min_elevation_deg: f64) -> Self {
        Self {
            samples,
            segmenter: Some(WindowSegmenter::new(min_elevation_deg)),
        }
    }
}

impl<I, S> Iterator for Windows<I>
where
    I: Iterator<Item = S>,
    S: std::borrow::Borrow<Sample>,
{
    type Item = VisibilityWindow;

    fn next(&mut self) -> Option<Self::Item> {
        let segmenter = self.segmenter.as_mut()?;
        for sample in self.samples.by_ref() {
            if let Some(window) = segmenter.push(sample.borrow()) {
                return Some(window);
            }
        }
        self.segmenter.take().and_then(WindowSegmenter::finish)
    }
}

pub fn segment_windows(samples: &[Sample], min_elevation_deg: f64) -> Vec<VisibilityWindow> {
    Windows::new(samples.iter(), min_elevation_deg).collect()
}
