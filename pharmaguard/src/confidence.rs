// src/confidence.rs
// -----------------------------------------------------------------------------
// Heuristic certainty of a resolved call: five sub-scores, fixed weights
// summing to 1.0, clamped to [0.5, 0.99] and rounded to two decimals.
// Weights and term order are part of the output format and must not change.
// -----------------------------------------------------------------------------

use tracing::debug;

use crate::guidelines::ReferenceTables;
use crate::models::{round2, Phenotype, VariantRecord, REFERENCE_DIPLOTYPE};
use crate::zygosity::classify_zygosity;

const VARIANT_WEIGHT: f64 = 0.30;
const ZYGOSITY_WEIGHT: f64 = 0.20;
const DIPLOTYPE_WEIGHT: f64 = 0.20;
const GUIDELINE_WEIGHT: f64 = 0.20;
const COPY_NUMBER_WEIGHT: f64 = 0.10;

const MIN_CONFIDENCE: f64 = 0.5;
const MAX_CONFIDENCE: f64 = 0.99;

/// Only CYP2D6 calls are sensitive to deletions/duplications
const COPY_NUMBER_GENE: &str = "CYP2D6";

/// Individual terms before weighting, kept for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceTerms {
    pub variant_strength: f64,
    pub zygosity_certainty: f64,
    pub diplotype_certainty: f64,
    pub guideline_coverage: f64,
    pub copy_number_certainty: f64,
}

impl ConfidenceTerms {
    pub fn weighted(&self) -> f64 {
        VARIANT_WEIGHT * self.variant_strength
            + ZYGOSITY_WEIGHT * self.zygosity_certainty
            + DIPLOTYPE_WEIGHT * self.diplotype_certainty
            + GUIDELINE_WEIGHT * self.guideline_coverage
            + COPY_NUMBER_WEIGHT * self.copy_number_certainty
    }
}

pub fn confidence_terms(
    tables: &ReferenceTables,
    gene: &str,
    diplotype: &str,
    drug: &str,
    variants: &[VariantRecord],
) -> ConfidenceTerms {
    let variant_strength = if variants.is_empty() { 0.6 } else { 1.0 };

    // a single unresolved genotype drags the whole term down
    let zygosity_certainty = if variants
        .iter()
        .any(|v| !classify_zygosity(&v.genotype).is_resolved())
    {
        0.7
    } else {
        1.0
    };

    let diplotype_certainty = if diplotype == REFERENCE_DIPLOTYPE { 0.7 } else { 1.0 };

    let guideline_coverage = if tables.covers_drug(drug) { 1.0 } else { 0.5 };

    let copy_number_certainty = if !gene.eq_ignore_ascii_case(COPY_NUMBER_GENE)
        || variants.iter().any(|v| v.copy_number.is_some())
    {
        1.0
    } else {
        0.8
    };

    ConfidenceTerms {
        variant_strength,
        zygosity_certainty,
        diplotype_certainty,
        guideline_coverage,
        copy_number_certainty,
    }
}

/// Confidence in the call for one drug.
///
/// `phenotype` is accepted so callers can pass the full resolved call; the
/// score itself does not depend on it.
pub fn calculate_confidence(
    tables: &ReferenceTables,
    gene: &str,
    diplotype: &str,
    _phenotype: Phenotype,
    drug: &str,
    variants: &[VariantRecord],
) -> f64 {
    let terms = confidence_terms(tables, gene, diplotype, drug, variants);
    let score = round2(terms.weighted().clamp(MIN_CONFIDENCE, MAX_CONFIDENCE));
    debug!("{} {} {}: {:?} -> {}", drug, gene, diplotype, terms, score);
    score
}
