use crate::report::GoodnessReport;
use fitlens_common::{FitLensError, Result};
use std::io::Write;
use std::path::Path;

pub fn export_json(output_path: &Path, report: &GoodnessReport) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, report)
        .map_err(|e| FitLensError::Other(e.to_string()))?;
    Ok(())
}

pub fn load_json(path: &Path) -> Result<GoodnessReport> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| FitLensError::Other(e.to_string()))
}

pub fn export_csv(output_path: &Path, report: &GoodnessReport) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    writeln!(file, "distribution,bin,observed,expected,contribution")?;
    for fit in report.fits() {
        for c in &fit.contributions {
            writeln!(
                file,
                "{},{},{},{:.6},{:.6}",
                fit.distribution, c.bin, c.observed, c.expected, c.contribution
            )?;
        }
    }
    Ok(())
}
