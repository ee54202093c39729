// src/zygosity.rs

use crate::models::Zygosity;

const MISSING_ALLELE: &str = ".";
const REFERENCE_ALLELE: &str = "0";

/// Classify a raw genotype token such as `0/1`, `1|1` or `0/1:35:99`.
///
/// Format fields after the first `:` are dropped and phased separators are
/// treated as unphased. Anything that is not exactly two allele indices is
/// `Unknown`.
pub fn classify_zygosity(genotype: &str) -> Zygosity {
    let gt = genotype.split(':').next().unwrap_or_default().trim();
    let normalized = gt.replace('|', "/");
    let alleles: Vec<&str> = normalized.split('/').collect();

    let [first, second] = alleles.as_slice() else {
        return Zygosity::Unknown;
    };

    if first.is_empty() || second.is_empty() {
        return Zygosity::Unknown;
    }
    if *first == MISSING_ALLELE || *second == MISSING_ALLELE {
        return Zygosity::Unknown;
    }

    match (first == second, *first == REFERENCE_ALLELE) {
        (true, true) => Zygosity::HomozygousReference,
        (true, false) => Zygosity::Homozygous,
        (false, _) => Zygosity::Heterozygous,
    }
}
