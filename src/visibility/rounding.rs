/// Scales, rounds half away from zero, and scales back.
///
/// Operates on the binary value, so `1.005` rounds to `1.0` while `0.015`,
/// whose scaled product is exactly `1.5`, rounds to `0.02`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}
