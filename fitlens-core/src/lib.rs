pub mod cdf;
pub mod critical;
pub mod export;
pub mod fit;
pub mod frequency;
pub mod histogram;
pub mod report;
pub mod sample;

pub use cdf::normal_cdf;
pub use critical::{chi_squared_critical, GoldsteinCoefficient, GOLDSTEIN_COEFFICIENTS};
pub use export::{export_csv, export_json, load_json};
pub use fit::{
    test_normal, test_uniform, BinContribution, Distribution, FitOutcome, FitReport, Verdict,
};
pub use fitlens_common::{FitLensError, Result};
pub use frequency::{frequency_table, FrequencyRow};
pub use histogram::{build_histogram, merge_bins, Bin, Histogram, MIN_BIN_COUNT};
pub use report::{
    analyze, print_fit_report, print_frequency_table, print_histogram, print_summary,
    GoodnessReport,
};
pub use sample::{validate_significance, Sample, SupportRange, MAX_SUPPORT_WIDTH};
