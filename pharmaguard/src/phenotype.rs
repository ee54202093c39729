// src/phenotype.rs

use crate::guidelines::{PhenotypeVocabulary, ReferenceTables};
use crate::models::{split_diplotype, Phenotype};

/// Number of reduced-function alleles in a diplotype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReducedCount {
    Neither,
    One,
    Both,
}

fn phenotype_for(vocabulary: PhenotypeVocabulary, count: ReducedCount) -> Phenotype {
    use PhenotypeVocabulary::*;
    match (vocabulary, count) {
        (Metabolizer, ReducedCount::Both) => Phenotype::PoorMetabolizer,
        (Metabolizer, ReducedCount::One) => Phenotype::IntermediateMetabolizer,
        (Metabolizer, ReducedCount::Neither) => Phenotype::NormalMetabolizer,
        (Function, ReducedCount::Both) => Phenotype::LowFunction,
        (Deficiency, ReducedCount::Both) => Phenotype::Deficient,
        (Function | Deficiency, ReducedCount::One) => Phenotype::IntermediateFunction,
        (Function | Deficiency, ReducedCount::Neither) => Phenotype::NormalFunction,
    }
}

/// Resolve the phenotype a (gene, diplotype) pair implies.
///
/// Allele order does not matter and the gene symbol is case-insensitive. Empty
/// input, unknown genes, or a diplotype that does not split into exactly two
/// '/'-separated parts all give `Phenotype::Unknown`. An empty part counts as
/// a non-reduced allele.
pub fn resolve_phenotype(tables: &ReferenceTables, gene: &str, diplotype: &str) -> Phenotype {
    if gene.is_empty() || diplotype.is_empty() {
        return Phenotype::Unknown;
    }
    let Some((a, b)) = split_diplotype(diplotype) else {
        return Phenotype::Unknown;
    };
    let Some(table) = tables.gene(gene) else {
        return Phenotype::Unknown;
    };

    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let reduced = |allele: &str| table.reduced_function.contains(allele);

    let count = match (reduced(first), reduced(second)) {
        (true, true) => ReducedCount::Both,
        (false, false) => ReducedCount::Neither,
        _ => ReducedCount::One,
    };
    phenotype_for(table.vocabulary, count)
}
