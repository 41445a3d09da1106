//! Observer-relative look angles in the South-East-Zenith frame.

use crate::frames::{norm, EarthFixedVector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

/// Rotates an Earth-fixed observer-to-satellite vector into (south, east, zenith).
pub fn ecef_to_sez(dr: EarthFixedVector, lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let south = sin_lat * cos_lon * dr[0] + sin_lat * sin_lon * dr[1] - cos_lat * dr[2];
    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let zenith = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (south, east, zenith)
}

/// Azimuth in `[0, 360)` clockwise from north and elevation in `[-90, 90]`.
///
/// A zero range vector yields elevation 0 and an azimuth of 0 or 180 depending on
/// the signs of the zero SEZ components, following IEEE `atan2(±0, ±0)`.
pub fn to_az_el(range_vector: EarthFixedVector, observer_lat_deg: f64, observer_lon_deg: f64) -> (f64, f64) {
    let (south, east, zenith) = ecef_to_sez(
        range_vector,
        observer_lat_deg.to_radians(),
        observer_lon_deg.to_radians(),
    );

    let mut azimuth = east.atan2(-south).to_degrees();
    if azimuth < 0.0 {
        azimuth += 360.0;
    }

    let horizontal = (south * south + east * east).sqrt();
    let elevation = zenith.atan2(horizontal).to_degrees();

    (azimuth, elevation)
}

pub fn look_angles(range_vector: EarthFixedVector, observer_lat_deg: f64, observer_lon_deg: f64) -> LookAngles {
    let (azimuth_deg, elevation_deg) = to_az_el(range_vector, observer_lat_deg, observer_lon_deg);
    LookAngles {
        azimuth_deg,
        elevation_deg,
        range_km: norm(range_vector),
    }
}
