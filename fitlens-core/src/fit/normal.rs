use super::{check_inputs, conclude, Distribution, FitReport};
use crate::cdf::normal_cdf;
use crate::histogram::Histogram;
use fitlens_common::Result;
use log::debug;

/// Mean and Bessel-corrected standard deviation, treating every observation
/// in a bin as sitting at the bin midpoint.
///
/// Merged bins spanning several integers bias both estimates; this is kept
/// so results stay comparable with earlier reports.
pub fn binned_moments(histogram: &Histogram) -> (f64, f64) {
    let n = histogram.total_count as f64;
    let mean = histogram
        .bins
        .iter()
        .map(|b| b.midpoint() * b.count as f64)
        .sum::<f64>()
        / n;
    let variance = if histogram.total_count > 1 {
        histogram
            .bins
            .iter()
            .map(|b| (b.midpoint() - mean).powi(2) * b.count as f64)
            .sum::<f64>()
            / (n - 1.0)
    } else {
        0.0
    };
    (mean, variance.sqrt())
}

/// Chi-squared goodness-of-fit against a Normal with mean and standard
/// deviation estimated from the histogram. Expected counts use a ±0.5
/// continuity correction on the integer bin edges.
pub fn test_normal(histogram: &Histogram, significance: f64) -> Result<FitReport> {
    check_inputs(histogram, significance)?;
    let n = histogram.total_count as f64;
    let (mean, std_dev) = binned_moments(histogram);
    debug!("normal test: mean={mean:.4} std_dev={std_dev:.4}");

    let expected = histogram
        .bins
        .iter()
        .map(|b| {
            let lower = (b.lower as f64 - 0.5 - mean) / std_dev;
            let upper = (b.upper as f64 + 0.5 - mean) / std_dev;
            n * (normal_cdf(upper) - normal_cdf(lower))
        })
        .collect();

    conclude(
        Distribution::Normal,
        histogram,
        significance,
        expected,
        Some((mean, std_dev)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::{FitOutcome, Verdict};
    use crate::histogram::{build_histogram, Bin};
    use statrs::distribution::{ContinuousCDF, Normal};

    fn bell() -> Histogram {
        Histogram::from_bins(vec![
            Bin::singleton(0, 5),
            Bin::singleton(1, 20),
            Bin::singleton(2, 50),
            Bin::singleton(3, 20),
            Bin::singleton(4, 5),
        ])
    }

    #[test]
    fn moments_from_midpoints() {
        let (mean, sd) = binned_moments(&bell());
        assert!((mean - 2.0).abs() < 1e-12);
        assert!((sd - (80.0_f64 / 99.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn merged_bins_use_midpoint() {
        let h = Histogram::from_bins(vec![
            Bin { lower: 0, upper: 3, count: 10 },
            Bin::singleton(5, 10),
        ]);
        let (mean, _) = binned_moments(&h);
        assert!((mean - 3.25).abs() < 1e-12);
    }

    #[test]
    fn statistic_matches_independent_computation() {
        let h = bell();
        let report = test_normal(&h, 0.05).unwrap();
        let sd = (80.0_f64 / 99.0).sqrt();
        let dist = Normal::new(2.0, sd).unwrap();
        let expected_stat: f64 = h
            .bins
            .iter()
            .map(|b| {
                let e = 100.0
                    * (dist.cdf(b.upper as f64 + 0.5) - dist.cdf(b.lower as f64 - 0.5));
                (b.count as f64 - e).powi(2) / e
            })
            .sum();
        assert!((report.statistic - expected_stat).abs() < 1e-4);
        assert_eq!(report.degrees_of_freedom, 2);
        assert_eq!(report.contributions.len(), 5);
        assert!(report.critical_value().is_some());
    }

    #[test]
    fn three_bins_is_insufficient() {
        let h = Histogram::from_bins(vec![
            Bin::singleton(1, 6),
            Bin::singleton(2, 9),
            Bin::singleton(3, 6),
        ]);
        let report = test_normal(&h, 0.05).unwrap();
        assert_eq!(report.degrees_of_freedom, 0);
        assert_eq!(report.outcome, FitOutcome::InsufficientBins);
        assert!(report.critical_value().is_none());
        assert!(report.mean.is_some());
    }

    #[test]
    fn two_bins_give_negative_degrees() {
        let h = Histogram::from_bins(vec![Bin::singleton(1, 2), Bin::singleton(2, 2)]);
        let report = test_normal(&h, 0.05).unwrap();
        assert_eq!(report.degrees_of_freedom, -1);
        assert_eq!(report.outcome, FitOutcome::InsufficientBins);
    }

    #[test]
    fn tiny_sample_is_insufficient() {
        let h = build_histogram(&[2, 5, 5, 9], 0, 20);
        let report = test_normal(&h, 0.05).unwrap();
        assert!(report.degrees_of_freedom <= 0);
        assert_eq!(report.outcome, FitOutcome::InsufficientBins);
    }

    #[test]
    fn single_observation_has_finite_moments() {
        let h = build_histogram(&[7], 0, 20);
        let report = test_normal(&h, 0.05).unwrap();
        assert_eq!(report.std_dev, Some(0.0));
        assert!(report.statistic.is_finite());
    }

    #[test]
    fn binomial_shaped_sample_is_accepted() {
        // counts proportional to C(10, k), k = 0..=10, scaled to ~1000
        let weights = [1, 10, 45, 120, 210, 252, 210, 120, 45, 10, 1];
        let mut values = Vec::new();
        for (k, w) in weights.iter().enumerate() {
            values.extend(std::iter::repeat(k as i64).take(*w));
        }
        let h = build_histogram(&values, 0, 20);
        let report = test_normal(&h, 0.05).unwrap();
        assert_eq!(report.verdict(), Some(Verdict::Accept), "{report:?}");
    }

    #[test]
    fn flat_sample_is_rejected() {
        let mut values = Vec::new();
        for v in 0..=20 {
            values.extend(std::iter::repeat(v).take(30));
        }
        let h = build_histogram(&values, 0, 20);
        let report = test_normal(&h, 0.05).unwrap();
        assert_eq!(report.verdict(), Some(Verdict::Reject));
    }
}
