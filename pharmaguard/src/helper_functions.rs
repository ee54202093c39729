// src/helper_functions.rs

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use pharmaguard::report::PatientReport;

/// Read a patient VCF, refusing paths without a `.vcf` extension
pub fn read_vcf(path: &Path) -> Result<String> {
    let is_vcf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("vcf"));
    if !is_vcf {
        bail!("{} is not a .vcf file", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("failed to read VCF {}", path.display()))
}

/// Pretty JSON to a file, or stdout when no path is given
pub fn write_report_json(report: &PatientReport, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

/// One flat row per drug, for spreadsheets
pub fn write_summary_csv(report: &PatientReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    wtr.write_record([
        "patient_id",
        "drug",
        "gene",
        "diplotype",
        "phenotype",
        "activity_score",
        "risk_label",
        "severity",
        "confidence",
        "alternatives",
    ])?;

    for drug in &report.results {
        let profile = &drug.pharmacogenomic_profile;
        let activity = profile.activity_score.to_string();
        let confidence = format!("{:.2}", drug.risk_assessment.confidence_score);
        let alternatives = drug.clinical_recommendation.alternative_drugs.join(";");
        wtr.write_record([
            report.patient_id.as_str(),
            drug.drug.as_str(),
            profile.primary_gene.as_str(),
            profile.diplotype.as_str(),
            profile.phenotype.as_str(),
            activity.as_str(),
            drug.risk_assessment.risk_label.as_str(),
            drug.risk_assessment.severity.as_str(),
            confidence.as_str(),
            alternatives.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
