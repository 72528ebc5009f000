pub mod normal;
pub mod uniform;

pub use normal::test_normal;
pub use uniform::test_uniform;

use crate::critical::chi_squared_critical;
use crate::histogram::{Bin, Histogram};
use crate::sample::validate_significance;
use fitlens_common::{FitLensError, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    Normal,
    Uniform,
}

impl Distribution {
    /// Parameters estimated from the sample, each costing one degree of freedom.
    pub fn estimated_parameters(self) -> i64 {
        match self {
            Self::Normal => 2,
            Self::Uniform => 0,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Uniform => write!(f, "Uniform"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => write!(f, "Hypothesis ACCEPTED"),
            Self::Reject => write!(f, "Hypothesis REJECTED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FitOutcome {
    Decided { critical_value: f64, verdict: Verdict },
    /// Degrees of freedom <= 0; no critical value was computed.
    InsufficientBins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinContribution {
    pub bin: Bin,
    pub observed: u64,
    pub expected: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub distribution: Distribution,
    pub significance: f64,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub contributions: Vec<BinContribution>,
    pub statistic: f64,
    pub degrees_of_freedom: i64,
    pub outcome: FitOutcome,
}

impl FitReport {
    pub fn verdict(&self) -> Option<Verdict> {
        match self.outcome {
            FitOutcome::Decided { verdict, .. } => Some(verdict),
            FitOutcome::InsufficientBins => None,
        }
    }

    pub fn critical_value(&self) -> Option<f64> {
        match self.outcome {
            FitOutcome::Decided { critical_value, .. } => Some(critical_value),
            FitOutcome::InsufficientBins => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict() == Some(Verdict::Accept)
    }

    /// Human-readable conclusion line.
    pub fn conclusion(&self) -> String {
        match self.verdict() {
            Some(Verdict::Accept) => format!(
                "Data follows {} distribution at significance level α={:.3}",
                self.distribution, self.significance
            ),
            Some(Verdict::Reject) => format!(
                "Data does NOT follow {} distribution at significance level α={:.3}",
                self.distribution, self.significance
            ),
            None => "Not enough bins for valid test (degrees of freedom <= 0)".to_string(),
        }
    }
}

/// (observed - expected)² / expected, or 0 where expected is zero or not finite.
pub fn contribution(observed: u64, expected: f64) -> f64 {
    if expected > 0.0 && expected.is_finite() {
        (observed as f64 - expected).powi(2) / expected
    } else {
        0.0
    }
}

fn check_inputs(histogram: &Histogram, significance: f64) -> Result<()> {
    if histogram.is_empty() || histogram.total_count == 0 {
        return Err(FitLensError::EmptySample);
    }
    validate_significance(significance)?;
    Ok(())
}

/// Shared tail of both testers: tabulate contributions, apply the
/// degrees-of-freedom guard, and compare against the critical value.
fn conclude(
    distribution: Distribution,
    histogram: &Histogram,
    significance: f64,
    expected: Vec<f64>,
    moments: Option<(f64, f64)>,
) -> Result<FitReport> {
    let contributions: Vec<BinContribution> = histogram
        .bins
        .iter()
        .zip(expected)
        .map(|(bin, expected)| BinContribution {
            bin: *bin,
            observed: bin.count,
            expected,
            contribution: contribution(bin.count, expected),
        })
        .collect();
    let statistic: f64 = contributions.iter().map(|c| c.contribution).sum();
    let degrees_of_freedom =
        histogram.len() as i64 - distribution.estimated_parameters() - 1;

    let outcome = if degrees_of_freedom <= 0 {
        warn!(
            "{distribution} test: {} bin(s) leave {degrees_of_freedom} degrees of freedom",
            histogram.len()
        );
        FitOutcome::InsufficientBins
    } else {
        let df = u32::try_from(degrees_of_freedom)
            .map_err(|_| FitLensError::InvalidDegreesOfFreedom(degrees_of_freedom))?;
        let critical_value = chi_squared_critical(1.0 - significance, df)?;
        let verdict = if statistic < critical_value {
            Verdict::Accept
        } else {
            Verdict::Reject
        };
        info!(
            "{distribution} test: χ²={statistic:.4} critical={critical_value:.4} r={df} -> {verdict}"
        );
        FitOutcome::Decided {
            critical_value,
            verdict,
        }
    };

    Ok(FitReport {
        distribution,
        significance,
        mean: moments.map(|(m, _)| m),
        std_dev: moments.map(|(_, s)| s),
        contributions,
        statistic,
        degrees_of_freedom,
        outcome,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::histogram::build_histogram;
    use proptest::prelude::*;

    fn check_report(report: &FitReport) -> std::result::Result<(), TestCaseError> {
        prop_assert!(report.statistic >= 0.0 && report.statistic.is_finite(), "{:?}", report);
        for c in &report.contributions {
            prop_assert!(c.contribution >= 0.0, "{:?}", c);
        }
        if let Some(critical) = report.critical_value() {
            prop_assert!(critical >= 0.0, "critical {}", critical);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn chi_squared_values_non_negative(
            values in proptest::collection::vec(0_i64..=20, 1..=300),
            significance in 0.01_f64..=0.99,
        ) {
            let h = build_histogram(&values, 0, 20);
            check_report(&test_normal(&h, significance).unwrap())?;
            check_report(&test_uniform(&h, significance).unwrap())?;
        }
    }
}
