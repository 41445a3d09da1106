use chrono::{DateTime, Utc};
use std::f64::consts::PI;

use super::{EarthFixedVector, InertialVector};

const SECONDS_PER_DAY: f64 = 86400.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;
const J2000_JD: f64 = 2451545.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

// IAU 1982 GMST polynomial, seconds
const GMST_C0: f64 = 24110.54841;
const GMST_C1: f64 = 8640184.812866;
const GMST_C2: f64 = 0.093104;
const GMST_C3: f64 = -6.2e-6;
const SIDEREAL_RATE: f64 = 1.00273790935;

/// Julian date of 0h UTC of the day containing `time`, and the elapsed day fraction.
pub fn julian_date(time: DateTime<Utc>) -> (f64, f64) {
    let seconds = time.timestamp();
    let days = seconds.div_euclid(86400);
    let seconds_of_day =
        seconds.rem_euclid(86400) as f64 + time.timestamp_subsec_nanos() as f64 * 1e-9;
    (UNIX_EPOCH_JD + days as f64, seconds_of_day / SECONDS_PER_DAY)
}

/// Greenwich Mean Sidereal Time in radians, in `[0, 2π)`.
pub fn sidereal_angle(time: DateTime<Utc>) -> f64 {
    let (jd, fr) = julian_date(time);
    let t = (jd - J2000_JD + fr) / DAYS_PER_JULIAN_CENTURY;

    let mut gmst = GMST_C0 + GMST_C1 * t + GMST_C2 * t * t + GMST_C3 * t * t * t;
    gmst += SECONDS_PER_DAY * SIDEREAL_RATE * fr;

    gmst.rem_euclid(SECONDS_PER_DAY) * (2.0 * PI / SECONDS_PER_DAY)
}

/// Rotates a TEME position about the polar axis by `-gmst`.
///
/// Polar motion and nutation are ignored.
pub fn teme_to_ecef_position(pos_teme: InertialVector, gmst: f64) -> EarthFixedVector {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn inertial_to_earth_fixed(position: InertialVector, time: DateTime<Utc>) -> EarthFixedVector {
    teme_to_ecef_position(position, sidereal_angle(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn wrapped_delta(from: f64, to: f64) -> f64 {
        (to - from).rem_euclid(2.0 * PI)
    }

    #[test]
    fn julian_date_of_j2000_noon() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let (jd, fr) = julian_date(t);
        assert_eq!(jd, 2451544.5);
        assert_eq!(fr, 0.5);
    }

    #[test]
    fn julian_date_before_unix_epoch() {
        let t = Utc.with_ymd_and_hms(1969, 12, 31, 18, 0, 0).unwrap();
        let (jd, fr) = julian_date(t);
        assert_eq!(jd, UNIX_EPOCH_JD - 1.0);
        assert_eq!(fr, 0.75);
    }

    #[test]
    fn julian_date_keeps_subseconds() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::milliseconds(500);
        let (_, fr) = julian_date(t);
        assert!((fr - (43200.5 / 86400.0)).abs() < 1e-12);
    }

    #[test]
    fn sidereal_angle_at_j2000() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        // T = 0: only the constant term and the half-day contribution remain
        let expected_s = 24110.54841 + 86400.0 * 1.00273790935 * 0.5;
        let expected = expected_s * 2.0 * PI / 86400.0;
        assert!((sidereal_angle(t) - expected).abs() < 1e-12);
    }

    #[test]
    fn sidereal_angle_is_normalized() {
        let start = Utc.with_ymd_and_hms(1995, 6, 1, 0, 0, 0).unwrap();
        for hour in 0..24 * 40 {
            let theta = sidereal_angle(start + Duration::hours(hour * 13));
            assert!((0.0..2.0 * PI).contains(&theta), "{theta}");
        }
    }

    #[test]
    fn sidereal_angle_advances_at_sidereal_rate() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap();
        // the day fraction enters both T and the sidereal-rate term
        let rate = SIDEREAL_RATE + GMST_C1 / (SECONDS_PER_DAY * DAYS_PER_JULIAN_CENTURY);
        let expected_step = 60.0 * rate * 2.0 * PI / SECONDS_PER_DAY;

        let mut prev = sidereal_angle(start);
        for minute in 1..=180 {
            let t = start + Duration::minutes(minute);
            let theta = sidereal_angle(t);
            let step = wrapped_delta(prev, theta);
            if t.timestamp() % 86400 != 0 {
                assert!(step > 0.0 && step < PI, "not advancing at {t}");
                assert!((step - expected_step).abs() < 1e-8, "rate at {t}: {step}");
            }
            prev = theta;
        }
    }

    #[test]
    fn day_rollover_restarts_fractional_term() {
        // T already carries the day fraction, so the re-split at 0h UTC steps back by
        // the polynomial's daily increment (C1 / 36525 s) instead of advancing.
        let before = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();
        let after = before + Duration::seconds(1);
        let step = sidereal_angle(after) - sidereal_angle(before);
        let step = (step + PI).rem_euclid(2.0 * PI) - PI;

        let daily_increment = GMST_C1 / DAYS_PER_JULIAN_CENTURY * 2.0 * PI / SECONDS_PER_DAY;
        let one_second = SIDEREAL_RATE * 2.0 * PI / SECONDS_PER_DAY;
        assert!((step - (one_second - daily_increment)).abs() < 1e-6, "{step}");
    }

    #[test]
    fn rotation_preserves_norm_and_z() {
        let pos = [4000.0, -3000.0, 4500.0];
        let rotated = teme_to_ecef_position(pos, 1.234);
        assert!((crate::frames::norm(rotated) - crate::frames::norm(pos)).abs() < 1e-9);
        assert_eq!(rotated[2], pos[2]);
    }

    #[test]
    fn rotation_by_quarter_turn() {
        let rotated = teme_to_ecef_position([7000.0, 0.0, 0.0], PI / 2.0);
        assert!(rotated[0].abs() < 1e-9);
        assert!((rotated[1] + 7000.0).abs() < 1e-9);
    }

    #[test]
    fn inertial_to_earth_fixed_uses_sidereal_angle() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap();
        let pos = [6778.0, 120.0, -35.0];
        assert_eq!(
            inertial_to_earth_fixed(pos, t),
            teme_to_ecef_position(pos, sidereal_angle(t))
        );
    }
}
