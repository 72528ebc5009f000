//! Chi-squared quantiles via Goldstein's refinement of the Wilson–Hilferty
//! cube-root normal approximation.
//!
//! The quantile is `n * S³` where `S` is a seven-term series in `d`, a
//! normal-deviate-like term derived from the cumulative probability. The
//! approximation is only fitted for probabilities in `[0.001, 0.999]`.

use fitlens_common::{FitLensError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldsteinCoefficient {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

const fn coeff(a: f64, b: f64, c: f64) -> GoldsteinCoefficient {
    GoldsteinCoefficient { a, b, c }
}

/// Empirically fitted; do not round.
pub const GOLDSTEIN_COEFFICIENTS: [GoldsteinCoefficient; 7] = [
    coeff(1.0000886, -0.2237368, -0.01513904),
    coeff(0.4713941, 0.02607083, -0.008986007),
    coeff(0.0001348028, 0.01128186, 0.02277679),
    coeff(-0.008553069, -0.01153761, -0.01323293),
    coeff(0.00312558, 0.00516965, -0.006950356),
    coeff(-0.0008426812, 0.00253001, 0.001060438),
    coeff(0.0000978049, -0.00145011, 0.001565326),
];

pub const MIN_PROBABILITY: f64 = 0.001;
pub const MAX_PROBABILITY: f64 = 0.999;

fn deviate(alpha: f64) -> Result<f64> {
    if (0.5..=MAX_PROBABILITY).contains(&alpha) {
        Ok(2.0637 * ((1.0 / (1.0 - alpha)).ln() - 0.16).powf(0.4274) - 1.5774)
    } else if (MIN_PROBABILITY..0.5).contains(&alpha) {
        Ok(-2.0637 * ((1.0 / alpha).ln() - 0.16).powf(0.4274) + 1.5774)
    } else {
        Err(FitLensError::Domain { alpha })
    }
}

/// Quantile of the chi-squared distribution with `degrees_of_freedom` at
/// cumulative probability `alpha`.
///
/// Hypothesis tests at significance level `s` call this with `alpha = 1 - s`.
pub fn chi_squared_critical(alpha: f64, degrees_of_freedom: u32) -> Result<f64> {
    if degrees_of_freedom == 0 {
        return Err(FitLensError::InvalidDegreesOfFreedom(0));
    }
    let d = deviate(alpha)?;
    let n = f64::from(degrees_of_freedom);
    let sum: f64 = GOLDSTEIN_COEFFICIENTS
        .iter()
        .enumerate()
        .map(|(i, k)| {
            let i = i as i32;
            n.powf(-f64::from(i) / 2.0) * d.powi(i) * (k.a + k.b / n + k.c / (n * n))
        })
        .sum();
    Ok(n * sum.powi(3))
}
