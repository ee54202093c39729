//! Pharmacogenomic interpretation of a single patient's variant calls.
//!
//! The pipeline parses variant-call text, calls a star-allele diplotype per
//! gene, resolves the metabolizer phenotype and scores risk and confidence
//! for each requested drug against static CPIC tables.
//!
//! ```no_run
//! use pharmaguard::guidelines::ReferenceTables;
//! use pharmaguard::pipeline::analyze_text;
//!
//! let vcf = std::fs::read_to_string("patient.vcf").unwrap();
//! for result in analyze_text(ReferenceTables::builtin(), &vcf, "codeine, warfarin") {
//!     println!("{} {} {}", result.drug, result.diplotype, result.risk.risk_label);
//! }
//! ```

pub mod activity_score;
pub mod confidence;
pub mod error;
pub mod guidelines;
pub mod models;
pub mod phenotype;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod star_allele;
pub mod vcf_parser;
pub mod zygosity;

pub use guidelines::ReferenceTables;
pub use models::{AnalysisResult, Diplotype, Phenotype, VariantRecord, Zygosity};
pub use pipeline::{analyze, analyze_text, parse_drug_list};
