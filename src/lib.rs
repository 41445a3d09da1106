//! Satellite visibility windows from TLE sets: SGP4 propagation, Earth-fixed
//! look angles and threshold-based pass segmentation.

pub mod calculator;
pub mod case;
pub mod compare;
pub mod config;
pub mod error;
pub mod frames;
pub mod propagator;
pub mod report;
pub mod runner;
pub mod topocentric;
pub mod visibility;

#[cfg(test)]
mod tests;
