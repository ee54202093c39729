// src/models.rs

use serde::Serialize;
use std::fmt;

use crate::risk::RiskAssessment;

/// Reference diplotype every unresolved call collapses to
pub const REFERENCE_DIPLOTYPE: &str = "*1/*1";

/// One data line of a variant-call file
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chromosome: String,
    pub position: u64,
    pub rsid: String,
    pub reference: String,
    pub alternate: String,
    pub gene: Option<String>,
    pub star: Option<String>,
    pub impact: String,
    pub copy_number: Option<u32>,
    pub genotype: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Zygosity {
    HomozygousReference,
    Homozygous,
    Heterozygous,
    Unknown,
}

impl Zygosity {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Zygosity::Unknown)
    }
}

impl fmt::Display for Zygosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Zygosity::HomozygousReference => "HomozygousReference",
            Zygosity::Homozygous => "Homozygous",
            Zygosity::Heterozygous => "Heterozygous",
            Zygosity::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Two star alleles joined by "/", e.g. `*1/*4`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diplotype(String);

impl Diplotype {
    pub fn pair(first: &str, second: &str) -> Self {
        Diplotype(format!("{first}/{second}"))
    }

    pub fn reference() -> Self {
        Diplotype(REFERENCE_DIPLOTYPE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Diplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Splits a diplotype string into its two alleles.
///
/// Returns `None` unless there are exactly two non-empty parts.
pub fn split_diplotype(diplotype: &str) -> Option<(&str, &str)> {
    let mut parts = diplotype.split('/');
    let first = parts.next()?.trim();
    let second = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

/// Coarse functional tier shared by every phenotype vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetabolizerTier {
    Poor,
    Intermediate,
    Normal,
    Rapid,
    Ultrarapid,
    Unknown,
}

impl MetabolizerTier {
    /// Guideline row key for this tier
    pub fn code(&self) -> &'static str {
        match self {
            MetabolizerTier::Poor => "PM",
            MetabolizerTier::Intermediate => "IM",
            MetabolizerTier::Normal => "NM",
            MetabolizerTier::Rapid => "RM",
            MetabolizerTier::Ultrarapid => "URM",
            MetabolizerTier::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phenotype {
    #[serde(rename = "PM")]
    PoorMetabolizer,
    #[serde(rename = "IM")]
    IntermediateMetabolizer,
    #[serde(rename = "NM")]
    NormalMetabolizer,
    #[serde(rename = "RM")]
    RapidMetabolizer,
    #[serde(rename = "URM")]
    UltrarapidMetabolizer,
    #[serde(rename = "Low")]
    LowFunction,
    #[serde(rename = "Intermediate")]
    IntermediateFunction,
    #[serde(rename = "Normal")]
    NormalFunction,
    Deficient,
    Unknown,
}

impl Phenotype {
    pub fn label(&self) -> &'static str {
        match self {
            Phenotype::PoorMetabolizer => "PM",
            Phenotype::IntermediateMetabolizer => "IM",
            Phenotype::NormalMetabolizer => "NM",
            Phenotype::RapidMetabolizer => "RM",
            Phenotype::UltrarapidMetabolizer => "URM",
            Phenotype::LowFunction => "Low",
            Phenotype::IntermediateFunction => "Intermediate",
            Phenotype::NormalFunction => "Normal",
            Phenotype::Deficient => "Deficient",
            Phenotype::Unknown => "Unknown",
        }
    }

    pub fn tier(&self) -> MetabolizerTier {
        match self {
            Phenotype::PoorMetabolizer | Phenotype::LowFunction | Phenotype::Deficient => {
                MetabolizerTier::Poor
            }
            Phenotype::IntermediateMetabolizer | Phenotype::IntermediateFunction => {
                MetabolizerTier::Intermediate
            }
            Phenotype::NormalMetabolizer | Phenotype::NormalFunction => MetabolizerTier::Normal,
            Phenotype::RapidMetabolizer => MetabolizerTier::Rapid,
            Phenotype::UltrarapidMetabolizer => MetabolizerTier::Ultrarapid,
            Phenotype::Unknown => MetabolizerTier::Unknown,
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-variant evidence attached to a drug result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantDetail {
    pub rsid: String,
    pub star: String,
    pub impact: String,
    pub chromosome: String,
    pub position: u64,
    pub reference: String,
    pub alternate: String,
    pub zygosity: Zygosity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub drug: String,
    pub gene: String,
    pub diplotype: Diplotype,
    pub phenotype: Phenotype,
    pub activity_score: f64,
    pub risk: RiskAssessment,
    pub alternatives: Vec<String>,
    pub confidence: f64,
    pub variants: Vec<VariantDetail>,
}

/// Rounds to two decimals the way every reported score is rounded
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_requires_exactly_two_parts() {
        assert_eq!(split_diplotype("*1/*4"), Some(("*1", "*4")));
        assert_eq!(split_diplotype("*1"), None);
        assert_eq!(split_diplotype("*1/*4/*10"), None);
        assert_eq!(split_diplotype(""), None);
        // a missing allele still splits; it scores and resolves like an unlisted one
        assert_eq!(split_diplotype("*1/"), Some(("*1", "")));
        assert_eq!(split_diplotype("/"), Some(("", "")));
    }

    #[test]
    fn analogue_phenotypes_share_tiers() {
        assert_eq!(Phenotype::LowFunction.tier(), MetabolizerTier::Poor);
        assert_eq!(Phenotype::Deficient.tier(), MetabolizerTier::Poor);
        assert_eq!(Phenotype::IntermediateFunction.tier().code(), "IM");
        assert_eq!(Phenotype::NormalFunction.tier().code(), "NM");
    }

    #[test]
    fn phenotype_serializes_as_label() {
        let json = serde_json::to_string(&Phenotype::PoorMetabolizer).unwrap();
        assert_eq!(json, "\"PM\"");
        let json = serde_json::to_string(&Phenotype::LowFunction).unwrap();
        assert_eq!(json, "\"Low\"");
    }
}
