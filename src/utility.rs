/// Divides `part` by `whole`, treating a zero divisor as one.
pub fn ratio(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64
}

/// Rounds to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Integer mean of `sum` over `count`, rounded half away from zero.
///
/// Inputs are non-negative, so this agrees with round-half-up.
pub fn rounded_mean(sum: u64, count: u64) -> u64 {
    ratio(sum, count).round() as u64
}
