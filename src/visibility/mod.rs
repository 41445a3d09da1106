//! Sample generation over a time grid and segmentation into visibility windows.

mod rounding;
mod sample;
mod window;

pub use rounding::{round2, round3, round_to};
pub use sample::{generate_samples, time_grid, RangeRateLookahead, Sample};
pub use window::{segment_windows, VisibilityWindow, WindowPoint, WindowSegmenter, Windows};
