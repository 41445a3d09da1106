//! Conversions between geodetic, Earth-fixed and inertial (TEME) frames.

mod geodetic;
mod sidereal;

pub use geodetic::{earth_fixed_to_geodetic, geodetic_to_earth_fixed, GeodeticPosition};
pub use sidereal::{inertial_to_earth_fixed, julian_date, sidereal_angle};

/// WGS-84 equatorial radius
pub const EARTH_RADIUS_KM: f64 = 6378.137;
/// WGS-84 flattening
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257223563;

/// Cartesian position in the rotating Earth-fixed frame, km.
pub type EarthFixedVector = [f64; 3];
/// Cartesian position in the propagator's TEME frame, km.
pub type InertialVector = [f64; 3];

/// First eccentricity squared, `2f - f²`.
pub(crate) fn eccentricity_sq() -> f64 {
    2.0 * EARTH_FLATTENING - EARTH_FLATTENING * EARTH_FLATTENING
}

pub fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

pub fn difference(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}
