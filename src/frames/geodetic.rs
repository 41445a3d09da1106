use super::{eccentricity_sq, EarthFixedVector, EARTH_RADIUS_KM};

const LATITUDE_ITERATIONS: usize = 10;

/// Observer position on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

impl Default for GeodeticPosition {
    fn default() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: 0.0,
        }
    }
}

impl GeodeticPosition {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        }
    }

    /// Test cases carry the observer altitude in meters.
    pub fn from_meters(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self::new(latitude_deg, longitude_deg, altitude_m / 1000.0)
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> EarthFixedVector {
        geodetic_to_earth_fixed(self.latitude_deg, self.longitude_deg, self.altitude_km)
    }
}

pub fn geodetic_to_earth_fixed(lat_deg: f64, lon_deg: f64, alt_km: f64) -> EarthFixedVector {
    let e2 = eccentricity_sq();
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let n = EARTH_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    let x = (n + alt_km) * cos_lat * lon.cos();
    let y = (n + alt_km) * cos_lat * lon.sin();
    let z = (n * (1.0 - e2) + alt_km) * sin_lat;
    [x, y, z]
}

/// Inverse of [geodetic_to_earth_fixed], by fixed-point iteration on latitude.
pub fn earth_fixed_to_geodetic(position: EarthFixedVector) -> GeodeticPosition {
    let e2 = eccentricity_sq();
    let [x, y, z] = position;

    let longitude_rad = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    let mut latitude_rad = z.atan2(p * (1.0 - e2));
    for _ in 0..LATITUDE_ITERATIONS {
        let sin_lat = latitude_rad.sin();
        let n = EARTH_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude_rad = (z + e2 * n * sin_lat).atan2(p);
    }

    let sin_lat = latitude_rad.sin();
    let cos_lat = latitude_rad.cos();
    let n = EARTH_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    // near the poles p/cos(lat) is ill-conditioned
    let altitude_km = if cos_lat.abs() > 1e-10 {
        p / cos_lat - n
    } else {
        z.abs() / sin_lat.abs() - n * (1.0 - e2)
    };

    GeodeticPosition {
        latitude_deg: latitude_rad.to_degrees(),
        longitude_deg: longitude_rad.to_degrees(),
        altitude_km,
    }
}
