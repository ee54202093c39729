// src/main.rs

mod cli;
mod helper_functions;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pharmaguard::guidelines::load_tables;
use pharmaguard::pipeline::{analyze, parse_drug_list};
use pharmaguard::report::{build_report, PlaceholderExplainer};
use pharmaguard::vcf_parser::parse_vcf;

use crate::cli::Args;
use crate::helper_functions::{read_vcf, write_report_json, write_summary_csv};

fn main() -> Result<()> {
    // Logs go to stderr so the JSON report can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting pharmacogenomic analysis of {}", args.vcf.display());

    let tables = load_tables(args.tables.as_deref()).context("failed to load reference tables")?;

    let content = read_vcf(&args.vcf)?;
    let variants = parse_vcf(&content);
    let drugs = parse_drug_list(&args.drugs);

    let results = analyze(&tables, &variants, &drugs);
    let report = match build_report(&args.patient_id, variants.len(), &results, &PlaceholderExplainer) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    write_report_json(&report, args.output.as_deref())?;
    if let Some(path) = &args.summary_csv {
        write_summary_csv(&report, path)?;
        info!("Summary written to {}", path.display());
    }

    info!("Report complete: {} drug results", report.results.len());
    Ok(())
}
