// src/report.rs
// -----------------------------------------------------------------------------
// Wraps core results into the patient-facing envelope: timestamp, display
// colour and urgency, guideline reference, templated summary and an optional
// mechanism explanation from an external collaborator.
// A failed explanation never invalidates the rest of a drug report.
// -----------------------------------------------------------------------------

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::error::ReportError;
use crate::models::{AnalysisResult, VariantDetail};
use crate::risk::Severity;

pub const EXPLANATION_PLACEHOLDER: &str = "Mechanism explanation unavailable.";
pub const MONITORING_NOTE: &str = "Standard monitoring per CPIC guideline.";
pub const VARIANT_IMPACT_NOTE: &str = "Variant impacts enzyme activity affecting drug metabolism.";
pub const CLINICAL_CONTEXT_NOTE: &str = "Recommendation derived from CPIC pharmacogenomic guidelines.";
pub const EVIDENCE_LEVEL: &str = "CPIC Level A";

/// Fields handed to an explanation collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationRequest<'a> {
    pub gene: &'a str,
    pub diplotype: &'a str,
    pub phenotype: &'a str,
    pub drug: &'a str,
    pub risk_label: &'a str,
    pub variant_ids: Vec<&'a str>,
}

/// External source of free-text mechanism explanations
pub trait MechanismExplainer {
    fn explain(&self, request: &ExplanationRequest<'_>) -> anyhow::Result<String>;
}

/// Explainer used when no collaborator is configured
pub struct PlaceholderExplainer;

impl MechanismExplainer for PlaceholderExplainer {
    fn explain(&self, _request: &ExplanationRequest<'_>) -> anyhow::Result<String> {
        Ok(EXPLANATION_PLACEHOLDER.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientReport {
    pub patient_id: String,
    pub timestamp: String,
    pub results: Vec<DrugReport>,
    pub quality_metrics: QualityMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub variants_parsed: usize,
    pub drugs_analyzed: usize,
    /// Distinct primary genes, in first-seen order
    pub genes_analyzed: Vec<String>,
    pub data_completeness: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrugReport {
    pub drug: String,
    pub risk_assessment: RiskSummary,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub explanation: Explanation,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskSummary {
    pub risk_label: String,
    pub confidence_score: f64,
    pub severity: Severity,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: String,
    pub diplotype: String,
    pub phenotype: String,
    pub activity_score: f64,
    pub detected_variants: Vec<VariantDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClinicalRecommendation {
    pub recommended_action: String,
    pub urgency: &'static str,
    pub alternative_drugs: Vec<String>,
    pub monitoring: &'static str,
    pub guideline_reference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub summary: String,
    pub biological_mechanism: String,
    pub variant_impact: &'static str,
    pub clinical_context: &'static str,
    pub evidence_level: &'static str,
}

pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::None | Severity::Low => "green",
        Severity::Moderate => "orange",
        Severity::High | Severity::Critical => "red",
    }
}

pub fn severity_urgency(severity: Severity) -> &'static str {
    match severity {
        Severity::None | Severity::Low => "Routine",
        Severity::Moderate => "Urgent",
        Severity::High | Severity::Critical => "Emergency",
    }
}

fn summary_for(result: &AnalysisResult) -> String {
    format!(
        "The patient has {} {}, consistent with {} phenotype. According to CPIC guidelines, {} is classified as '{}'.",
        result.gene, result.diplotype, result.phenotype, result.drug, result.risk.risk_label
    )
}

/// Ask the explainer for a mechanism, substituting the placeholder on failure
fn mechanism_for(result: &AnalysisResult, explainer: &dyn MechanismExplainer) -> String {
    let phenotype = result.phenotype.label();
    let request = ExplanationRequest {
        gene: &result.gene,
        diplotype: result.diplotype.as_str(),
        phenotype,
        drug: &result.drug,
        risk_label: &result.risk.risk_label,
        variant_ids: result.variants.iter().map(|v| v.rsid.as_str()).collect(),
    };
    match explainer.explain(&request) {
        Ok(text) => text,
        Err(e) => {
            warn!("Explanation for {} failed, using placeholder: {:#}", result.drug, e);
            EXPLANATION_PLACEHOLDER.to_string()
        }
    }
}

pub fn drug_report(result: &AnalysisResult, explainer: &dyn MechanismExplainer) -> DrugReport {
    let severity = result.risk.severity;
    DrugReport {
        drug: result.drug.clone(),
        risk_assessment: RiskSummary {
            risk_label: result.risk.risk_label.clone(),
            confidence_score: result.confidence,
            severity,
            color: severity_color(severity),
        },
        pharmacogenomic_profile: PharmacogenomicProfile {
            primary_gene: result.gene.clone(),
            diplotype: result.diplotype.to_string(),
            phenotype: result.phenotype.to_string(),
            activity_score: result.activity_score,
            detected_variants: result.variants.clone(),
        },
        clinical_recommendation: ClinicalRecommendation {
            recommended_action: result.risk.recommendation.clone(),
            urgency: severity_urgency(severity),
            alternative_drugs: result.alternatives.clone(),
            monitoring: MONITORING_NOTE,
            guideline_reference: format!("CPIC {}-{}", result.gene, result.drug),
        },
        explanation: Explanation {
            summary: summary_for(result),
            biological_mechanism: mechanism_for(result, explainer),
            variant_impact: VARIANT_IMPACT_NOTE,
            clinical_context: CLINICAL_CONTEXT_NOTE,
            evidence_level: EVIDENCE_LEVEL,
        },
    }
}

/// Build the patient report, rejecting input that produced no variant records
pub fn build_report(
    patient_id: &str,
    variants_parsed: usize,
    results: &[AnalysisResult],
    explainer: &dyn MechanismExplainer,
) -> Result<PatientReport, ReportError> {
    if variants_parsed == 0 {
        return Err(ReportError::NoVariants);
    }

    let mut genes_analyzed: Vec<String> = Vec::new();
    for result in results {
        if !genes_analyzed.contains(&result.gene) {
            genes_analyzed.push(result.gene.clone());
        }
    }

    Ok(PatientReport {
        patient_id: patient_id.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        results: results.iter().map(|r| drug_report(r, explainer)).collect(),
        quality_metrics: QualityMetrics {
            vcf_parsing_success: true,
            variants_parsed,
            drugs_analyzed: results.len(),
            genes_analyzed,
            data_completeness: 1.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::ReferenceTables;
    use crate::pipeline::analyze_text;

    const VCF: &str =
        "chr22\t42130692\trs3892097\tG\tA\t.\tPASS\tGENE=CYP2D6;STAR=*4\tGT\t0/1\n";

    struct FailingExplainer;

    impl MechanismExplainer for FailingExplainer {
        fn explain(&self, _request: &ExplanationRequest<'_>) -> anyhow::Result<String> {
            anyhow::bail!("timed out")
        }
    }

    struct EchoExplainer;

    impl MechanismExplainer for EchoExplainer {
        fn explain(&self, request: &ExplanationRequest<'_>) -> anyhow::Result<String> {
            Ok(format!("{} {} {}", request.gene, request.phenotype, request.variant_ids.join(",")))
        }
    }

    fn results() -> Vec<AnalysisResult> {
        analyze_text(ReferenceTables::builtin(), VCF, "codeine")
    }

    #[test]
    fn colour_and_urgency_follow_severity() {
        assert_eq!(severity_color(Severity::None), "green");
        assert_eq!(severity_color(Severity::Moderate), "orange");
        assert_eq!(severity_color(Severity::Critical), "red");
        assert_eq!(severity_urgency(Severity::Low), "Routine");
        assert_eq!(severity_urgency(Severity::Moderate), "Urgent");
        assert_eq!(severity_urgency(Severity::High), "Emergency");
    }

    #[test]
    fn envelope_fields() {
        let report = build_report("PATIENT_007", 1, &results(), &PlaceholderExplainer).unwrap();
        assert_eq!(report.patient_id, "PATIENT_007");
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
        assert_eq!(report.quality_metrics.drugs_analyzed, 1);

        let drug = &report.results[0];
        assert_eq!(drug.risk_assessment.risk_label, "Adjust Dosage");
        assert_eq!(drug.risk_assessment.color, "orange");
        assert_eq!(drug.clinical_recommendation.urgency, "Urgent");
        assert_eq!(drug.clinical_recommendation.guideline_reference, "CPIC CYP2D6-CODEINE");
        assert_eq!(
            drug.explanation.summary,
            "The patient has CYP2D6 *1/*4, consistent with IM phenotype. According to CPIC guidelines, CODEINE is classified as 'Adjust Dosage'."
        );
        assert_eq!(drug.explanation.biological_mechanism, EXPLANATION_PLACEHOLDER);
        assert_eq!(drug.clinical_recommendation.monitoring, MONITORING_NOTE);
        assert_eq!(drug.explanation.variant_impact, VARIANT_IMPACT_NOTE);
        assert_eq!(drug.explanation.clinical_context, CLINICAL_CONTEXT_NOTE);
        assert_eq!(drug.explanation.evidence_level, "CPIC Level A");
    }

    #[test]
    fn quality_metrics_list_each_gene_once() {
        let results = analyze_text(ReferenceTables::builtin(), VCF, "warfarin,codeine,codeine,warfarin");
        let report = build_report("P", 1, &results, &PlaceholderExplainer).unwrap();
        let metrics = &report.quality_metrics;
        assert!(metrics.vcf_parsing_success);
        assert_eq!(metrics.drugs_analyzed, 4);
        assert_eq!(metrics.genes_analyzed, vec!["CYP2C9", "CYP2D6"]);
        assert_eq!(metrics.data_completeness, 1.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["quality_metrics"]["genes_analyzed"][1], "CYP2D6");
        assert_eq!(json["results"][0]["clinical_recommendation"]["monitoring"], MONITORING_NOTE);
        assert_eq!(json["results"][0]["explanation"]["evidence_level"], "CPIC Level A");
    }

    #[test]
    fn explainer_receives_call_fields() {
        let report = build_report("P", 1, &results(), &EchoExplainer).unwrap();
        assert_eq!(report.results[0].explanation.biological_mechanism, "CYP2D6 IM rs3892097");
    }

    #[test]
    fn failed_explanation_keeps_report_valid() {
        let report = build_report("P", 1, &results(), &FailingExplainer).unwrap();
        let drug = &report.results[0];
        assert_eq!(drug.explanation.biological_mechanism, EXPLANATION_PLACEHOLDER);
        assert_eq!(drug.pharmacogenomic_profile.phenotype, "IM");
        assert_eq!(drug.risk_assessment.confidence_score, 0.98);
    }

    #[test]
    fn zero_variants_is_rejected() {
        assert!(matches!(
            build_report("P", 0, &[], &PlaceholderExplainer),
            Err(ReportError::NoVariants)
        ));
    }

    #[test]
    fn serializes_lowercase_severity() {
        let report = build_report("P", 1, &results(), &PlaceholderExplainer).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["risk_assessment"]["severity"], "moderate");
        assert_eq!(json["results"][0]["pharmacogenomic_profile"]["diplotype"], "*1/*4");
    }
}
