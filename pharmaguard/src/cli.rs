// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pharmaguard", about = "Pharmacogenomic risk report from a patient VCF")]
pub struct Args {
    #[arg(
        short = 'v',
        long = "vcf",
        required = true,
        value_name = "PATH",
        help = "Patient variant-call file"
    )]
    pub vcf: PathBuf,

    #[arg(
        short = 'd',
        long = "drugs",
        required = true,
        value_name = "DRUGS",
        help = "Comma-separated drug names, e.g. \"codeine,warfarin\""
    )]
    pub drugs: String,

    #[arg(
        short = 'p',
        long = "patient-id",
        value_name = "ID",
        default_value = "PATIENT_001",
        help = "Patient identifier written into the report"
    )]
    pub patient_id: String,

    #[arg(
        short = 't',
        long = "tables",
        value_name = "PATH",
        help = "CPIC reference tables (JSON); falls back to $PHARMAGUARD_TABLES, then the built-in set"
    )]
    pub tables: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Write the JSON report here instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long = "summary-csv",
        value_name = "PATH",
        help = "Also write one CSV row per analyzed drug"
    )]
    pub summary_csv: Option<PathBuf>,
}
