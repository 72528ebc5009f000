use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

/// P(Z <= x) for a standard Normal Z.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}
