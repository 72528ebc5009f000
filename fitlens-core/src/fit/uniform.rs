use super::{check_inputs, conclude, Distribution, FitReport};
use crate::histogram::Histogram;
use fitlens_common::{FitLensError, Result};

/// Chi-squared goodness-of-fit against a discrete Uniform over the observed
/// range `[first.lower, last.upper]`; each bin expects mass in proportion to
/// the number of integers it spans.
pub fn test_uniform(histogram: &Histogram, significance: f64) -> Result<FitReport> {
    check_inputs(histogram, significance)?;
    let n = histogram.total_count as f64;
    let (Some(first), Some(last)) = (histogram.bins.first(), histogram.bins.last()) else {
        return Err(FitLensError::EmptySample);
    };
    let range_size = (last.upper - first.lower + 1) as f64;

    let expected = histogram
        .bins
        .iter()
        .map(|b| n * b.width() as f64 / range_size)
        .collect();

    conclude(Distribution::Uniform, histogram, significance, expected, None)
}
