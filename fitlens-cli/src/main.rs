use clap::{Parser, Subcommand};
use fitlens_common::Config;
use fitlens_core::{
    analyze, chi_squared_critical, export_csv, export_json, frequency_table, print_frequency_table,
    print_histogram, print_summary, validate_significance, Histogram, Sample, SupportRange,
};
use log::{debug, info};
use std::path::{Path, PathBuf};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

fn parse_probability(s: &str) -> Result<f64, String> { // validate (0, 1) at CLI parse time
    let v: f64 = s.parse().map_err(|_| format!("not a float: {s}"))?;
    if v > 0.0 && v < 1.0 { Ok(v) } else { Err(format!("must be in (0.0, 1.0), got {v}")) }
}

#[derive(Parser)]
#[command(name = "fitlens", version, about = "Chi-squared goodness-of-fit for integer samples")]
struct Cli {
    /// -v for info, -vv for debug
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a sample against Normal and Uniform distributions
    Test {
        /// sample file; stdin when omitted or "-"
        path: Option<String>,
        #[arg(long, value_parser = parse_probability)] alpha: Option<f64>,
        #[arg(long)] min: Option<i64>,
        #[arg(long)] max: Option<i64>,
        #[arg(long)] save: bool,
        #[arg(long)] format: Option<String>,
        #[arg(long)] output: Option<String>,
    },
    /// Print the merged histogram and per-value frequency table
    Histogram {
        path: Option<String>,
        #[arg(long)] min: Option<i64>,
        #[arg(long)] max: Option<i64>,
    },
    /// Chi-squared quantile at cumulative probability ALPHA
    Critical {
        #[arg(long, value_parser = parse_probability)] alpha: f64,
        #[arg(long)] df: u32,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("falling back to default config: {e}");
        Config::default()
    });
    match cli.command {
        Commands::Test { path, alpha, min, max, save, format, output } => {
            run_test(path, alpha, min, max, save, format, output, &config)?
        }
        Commands::Histogram { path, min, max } => run_histogram(path, min, max, &config)?,
        Commands::Critical { alpha, df } => run_critical(alpha, df)?,
    }
    Ok(())
}

fn support_range(min: Option<i64>, max: Option<i64>, config: &Config) -> anyhow::Result<SupportRange> {
    let base = SupportRange::from(&config.sample);
    SupportRange::new(min.unwrap_or(base.min), max.unwrap_or(base.max)).map_err(|e| anyhow::anyhow!("{e}"))
}

fn read_sample(path: Option<&str>, range: SupportRange) -> anyhow::Result<Sample> {
    let sample = match path {
        None | Some("-") => {
            debug!("reading sample from stdin");
            Sample::from_reader(std::io::stdin().lock(), range)
        }
        Some(p) => {
            if !Path::new(p).exists() { anyhow::bail!("sample file not found: {p}"); }
            Sample::from_path(Path::new(p), range)
        }
    };
    sample.map_err(|e| anyhow::anyhow!("{e}"))
}

#[allow(clippy::too_many_arguments)]
fn run_test(
    path: Option<String>,
    alpha: Option<f64>,
    min: Option<i64>,
    max: Option<i64>,
    save: bool,
    format: Option<String>,
    output: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let range = support_range(min, max, config)?;
    let alpha = validate_significance(alpha.unwrap_or(config.test.significance))
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let sample = read_sample(path.as_deref(), range)?;
    info!("read {} observations in [{}, {}]", sample.len(), range.min, range.max);
    let report = analyze(&sample, alpha).map_err(|e| anyhow::anyhow!("{e}"))?;
    print_summary(&report);

    if save || output.is_some() {
        let format = format.unwrap_or_else(|| config.export.format.clone());
        let out_path: PathBuf = if let Some(ref o) = output {
            PathBuf::from(o)
        } else {
            Path::new(&config.export.output_dir).join(format!("report.{format}"))
        };
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
        }
        match format.as_str() {
            "json" => export_json(&out_path, &report).map_err(|e| anyhow::anyhow!("{e}"))?,
            "csv" => export_csv(&out_path, &report).map_err(|e| anyhow::anyhow!("{e}"))?,
            _ => anyhow::bail!("Unknown format: {format} (use json or csv)"),
        }
        println!("\nReport saved to {}", out_path.display());
    }
    Ok(())
}

fn run_histogram(path: Option<String>, min: Option<i64>, max: Option<i64>, config: &Config) -> anyhow::Result<()> {
    let range = support_range(min, max, config)?;
    let sample = read_sample(path.as_deref(), range)?;
    print_histogram(&Histogram::build(&sample));
    println!();
    print_frequency_table(&frequency_table(&sample));
    Ok(())
}

fn run_critical(alpha: f64, df: u32) -> anyhow::Result<()> {
    let value = chi_squared_critical(alpha, df).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("χ²({alpha}, r={df}) = {value:.4}");
    Ok(())
}
