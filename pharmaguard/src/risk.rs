// src/risk.rs

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::guidelines::{GuidelineEntry, ReferenceTables};
use crate::models::Phenotype;

pub const UNKNOWN_RISK: &str = "Unknown";
pub const NO_GUIDELINE: &str = "No guideline available.";
pub const NO_PHENOTYPE_RULE: &str = "No phenotype rule found.";
pub const FOLLOW_GUIDELINES: &str = "Follow clinical guidelines.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Map a table value onto the fixed severity scale; anything else is `Low`
    pub fn coerce(raw: &str) -> Severity {
        match raw {
            "none" => Severity::None,
            "low" => Severity::Low,
            "moderate" => Severity::Moderate,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            other => {
                warn!("Severity '{}' is not recognised, using 'low'", other);
                Severity::Low
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_label: String,
    pub severity: Severity,
    pub recommendation: String,
}

impl RiskAssessment {
    fn unknown(recommendation: &str) -> Self {
        Self {
            risk_label: UNKNOWN_RISK.to_string(),
            severity: Severity::Low,
            recommendation: recommendation.to_string(),
        }
    }
}

/// Guideline row for a phenotype: exact label first, then its tier code
fn lookup_entry<'a>(tables: &'a ReferenceTables, drug: &str, phenotype: Phenotype) -> Option<&'a GuidelineEntry> {
    let rule = tables.drug(drug)?;
    rule.phenotypes
        .get(phenotype.label())
        .or_else(|| rule.phenotypes.get(phenotype.tier().code()))
}

pub fn assess_risk(tables: &ReferenceTables, drug: &str, phenotype: Phenotype) -> RiskAssessment {
    if !tables.covers_drug(drug) {
        return RiskAssessment::unknown(NO_GUIDELINE);
    }
    let Some((entry, risk_label)) = lookup_entry(tables, drug, phenotype)
        .and_then(|entry| entry.risk.as_ref().map(|risk| (entry, risk)))
    else {
        return RiskAssessment::unknown(NO_PHENOTYPE_RULE);
    };

    RiskAssessment {
        risk_label: risk_label.clone(),
        severity: Severity::coerce(entry.severity.as_deref().unwrap_or_default()),
        recommendation: entry
            .recommendation
            .clone()
            .unwrap_or_else(|| FOLLOW_GUIDELINES.to_string()),
    }
}

/// Alternative drugs listed for a (drug, phenotype) row; empty when none apply
pub fn alternative_drugs(tables: &ReferenceTables, drug: &str, phenotype: Phenotype) -> Vec<String> {
    lookup_entry(tables, drug, phenotype)
        .map(|entry| entry.alternatives.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::builtin()
    }

    #[test]
    fn unknown_drug_ignores_phenotype() {
        for phenotype in [Phenotype::PoorMetabolizer, Phenotype::NormalMetabolizer, Phenotype::Unknown] {
            let risk = assess_risk(tables(), "ASPIRIN", phenotype);
            assert_eq!(risk.risk_label, "Unknown");
            assert_eq!(risk.severity, Severity::Low);
            assert_eq!(risk.recommendation, NO_GUIDELINE);
        }
    }

    #[test]
    fn unmapped_phenotype_is_distinguishable() {
        let risk = assess_risk(tables(), "CODEINE", Phenotype::Unknown);
        assert_eq!(risk.risk_label, "Unknown");
        assert_eq!(risk.severity, Severity::Low);
        assert_eq!(risk.recommendation, NO_PHENOTYPE_RULE);
    }

    #[test]
    fn codeine_poor_metabolizer_is_toxic() {
        let risk = assess_risk(tables(), "CODEINE", Phenotype::PoorMetabolizer);
        assert_eq!(risk.risk_label, "Toxic");
        assert_eq!(risk.severity, Severity::Critical);
        assert!(risk.recommendation.starts_with("Avoid codeine"));
    }

    #[test]
    fn analogue_phenotypes_use_tier_rows() {
        let risk = assess_risk(tables(), "SIMVASTATIN", Phenotype::LowFunction);
        assert_eq!(risk.risk_label, "Toxic");
        assert_eq!(risk.severity, Severity::High);
        let risk = assess_risk(tables(), "FLUOROURACIL", Phenotype::IntermediateFunction);
        assert_eq!(risk.severity, Severity::High);
        let risk = assess_risk(tables(), "AZATHIOPRINE", Phenotype::NormalFunction);
        assert_eq!(risk.risk_label, "Safe");
    }

    #[test]
    fn severity_outside_scale_is_low() {
        assert_eq!(Severity::coerce("catastrophic"), Severity::Low);
        assert_eq!(Severity::coerce("high"), Severity::High);
        assert_eq!(Severity::coerce("critical"), Severity::Critical);
        // only the exact lowercase words are on the scale
        assert_eq!(Severity::coerce(" HIGH "), Severity::Low);
        assert_eq!(Severity::coerce("High"), Severity::Low);
        assert_eq!(Severity::coerce(""), Severity::Low);
    }

    #[test]
    fn missing_recommendation_falls_back() {
        let json = r#"{"genes": {}, "drugs": {"X": {"gene": "G", "phenotypes": {
            "PM": {"risk": "Toxic", "severity": "severe"}
        }}}}"#;
        let tables = ReferenceTables::from_json(json).unwrap();
        let risk = assess_risk(&tables, "X", Phenotype::PoorMetabolizer);
        assert_eq!(risk.severity, Severity::Low);
        assert_eq!(risk.recommendation, FOLLOW_GUIDELINES);
    }

    #[test]
    fn alternatives_only_row_has_no_risk_rule() {
        let risk = assess_risk(tables(), "CODEINE", Phenotype::UltrarapidMetabolizer);
        assert_eq!(risk.risk_label, "Unknown");
        assert_eq!(risk.severity, Severity::Low);
        assert_eq!(risk.recommendation, NO_PHENOTYPE_RULE);
    }

    #[test]
    fn alternatives_follow_phenotype_row() {
        assert_eq!(
            alternative_drugs(tables(), "CLOPIDOGREL", Phenotype::IntermediateMetabolizer),
            vec!["PRASUGREL", "TICAGRELOR"]
        );
        assert!(alternative_drugs(tables(), "CODEINE", Phenotype::NormalMetabolizer).is_empty());
        assert!(alternative_drugs(tables(), "ASPIRIN", Phenotype::PoorMetabolizer).is_empty());
        assert_eq!(
            alternative_drugs(tables(), "CODEINE", Phenotype::UltrarapidMetabolizer),
            vec!["MORPHINE", "HYDROMORPHONE"]
        );
    }
}
