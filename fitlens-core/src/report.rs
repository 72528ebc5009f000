use crate::fit::{test_normal, test_uniform, FitOutcome, FitReport};
use crate::frequency::FrequencyRow;
use crate::histogram::Histogram;
use crate::sample::{validate_significance, Sample};
use fitlens_common::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodnessReport {
    pub sample_size: usize,
    pub significance: f64,
    pub histogram: Histogram,
    pub normal: FitReport,
    pub uniform: FitReport,
}

impl GoodnessReport {
    pub fn fits(&self) -> [&FitReport; 2] {
        [&self.normal, &self.uniform]
    }
}

/// Build the histogram once and run both goodness-of-fit tests against it.
pub fn analyze(sample: &Sample, significance: f64) -> Result<GoodnessReport> {
    let significance = validate_significance(significance)?;
    let histogram = Histogram::build(sample);
    // both testers only read the histogram
    let (normal, uniform) = rayon::join(
        || test_normal(&histogram, significance),
        || test_uniform(&histogram, significance),
    );
    Ok(GoodnessReport {
        sample_size: sample.len(),
        significance,
        normal: normal?,
        uniform: uniform?,
        histogram,
    })
}

// --- headless text output ---

pub fn print_histogram(histogram: &Histogram) {
    println!("{:<16} {}", "Bin", "Count");
    println!("{}", "─".repeat(28));
    for bin in &histogram.bins {
        println!("{:<16} {}", bin.to_string(), bin.count);
    }
    println!("{:<16} {}", "Total", histogram.total_count);
}

pub fn print_frequency_table(rows: &[FrequencyRow]) {
    println!(
        "{:>6} {:>8} {:>10} {:>10} {:>10}",
        "x", "m", "m_cum", "f", "F"
    );
    for r in rows {
        println!(
            "{:>6} {:>8} {:>10} {:>10.4} {:>10.4}",
            r.value, r.count, r.cumulative_count, r.relative, r.cumulative_relative
        );
    }
}

pub fn print_fit_report(report: &FitReport) {
    println!("=== Testing for {} Distribution ===", report.distribution);
    if let (Some(mean), Some(sd)) = (report.mean, report.std_dev) {
        println!("{:<24} {mean:.4}", "Estimated mean:");
        println!("{:<24} {sd:.4}", "Estimated std dev:");
    }
    println!(
        "{:<14} {:>10} {:>12} {:>14}",
        "Bin", "Observed", "Expected", "Contribution"
    );
    println!("{}", "─".repeat(53));
    for c in &report.contributions {
        println!(
            "{:<14} {:>10} {:>12.2} {:>14.4}",
            c.bin.to_string(),
            c.observed,
            c.expected,
            c.contribution
        );
    }
    match report.outcome {
        FitOutcome::InsufficientBins => {
            println!("Error: {}", report.conclusion());
        }
        FitOutcome::Decided {
            critical_value,
            verdict,
        } => {
            println!("χ²_empirical = {:.4}", report.statistic);
            println!(
                "χ²_critical(α={:.3}, r={}) = {critical_value:.4}",
                report.significance, report.degrees_of_freedom
            );
            let relation = if report.is_accepted() { "<" } else { "≥" };
            println!("χ²_emp {relation} χ²_crit → {verdict}");
            println!("{}", report.conclusion());
        }
    }
}

pub fn print_summary(report: &GoodnessReport) {
    println!("{:<24} {}", "Sample size:", report.sample_size);
    println!("{:<24} {:.3}", "Significance level α:", report.significance);
    println!();
    print_histogram(&report.histogram);
    for fit in report.fits() {
        println!();
        print_fit_report(fit);
    }
}
