// src/activity_score.rs

use crate::guidelines::ReferenceTables;
use crate::models::{round2, split_diplotype};

/// Coefficient for alleles missing from a gene's table, and the score for
/// anything that cannot be scored at all
const DEFAULT_ACTIVITY: f64 = 1.0;

/// Sum of the two alleles' activity coefficients, rounded to two decimals.
///
/// Informational only, phenotype never depends on it.
pub fn activity_score(tables: &ReferenceTables, gene: &str, diplotype: &str) -> f64 {
    let Some(scores) = tables.gene(gene).and_then(|t| t.activity.as_ref()) else {
        return DEFAULT_ACTIVITY;
    };
    let Some((first, second)) = split_diplotype(diplotype) else {
        return DEFAULT_ACTIVITY;
    };

    let coefficient = |allele: &str| scores.get(allele).copied().unwrap_or(DEFAULT_ACTIVITY);
    round2(coefficient(first) + coefficient(second))
}
