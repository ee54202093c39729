// src/star_allele.rs

use tracing::debug;

use crate::guidelines::ReferenceTables;
use crate::models::{Diplotype, VariantRecord, Zygosity};
use crate::zygosity::classify_zygosity;

const REFERENCE_ALLELE: &str = "*1";

/// Call a diplotype for `gene` from variants already filtered to that gene.
///
/// Variants are scanned in input order. The first homozygous hit on a known
/// rsID decides the call outright; heterozygous hits pair with `*1`, and when
/// more than two are seen only the first two are kept. Unphased, so `*2/*3`
/// from two heterozygous hits may really be `*1/*2+*3`.
pub fn call_diplotype(tables: &ReferenceTables, gene: &str, variants: &[VariantRecord]) -> Diplotype {
    let Some(table) = tables.gene(gene) else {
        return Diplotype::reference();
    };

    let mut detected: Vec<&str> = Vec::new();

    for variant in variants {
        let Some(star) = table.variant_alleles.get(&variant.rsid) else {
            continue;
        };
        match classify_zygosity(&variant.genotype) {
            Zygosity::Homozygous => {
                debug!("{}: homozygous {} at {}", gene, star, variant.rsid);
                return Diplotype::pair(star, star);
            }
            Zygosity::Heterozygous => detected.push(star),
            // reference or no-call genotypes carry no allele evidence
            Zygosity::HomozygousReference | Zygosity::Unknown => {}
        }
    }

    match detected.as_slice() {
        [] => Diplotype::reference(),
        [only] => Diplotype::pair(REFERENCE_ALLELE, only),
        [first, second, rest @ ..] => {
            if !rest.is_empty() {
                debug!("{}: discarding {} extra heterozygous calls", gene, rest.len());
            }
            Diplotype::pair(first, second)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(rsid: &str, genotype: &str) -> VariantRecord {
        VariantRecord {
            chromosome: "chr22".into(),
            position: 1,
            rsid: rsid.into(),
            reference: "G".into(),
            alternate: "A".into(),
            gene: Some("CYP2D6".into()),
            star: None,
            impact: "Unknown".into(),
            copy_number: None,
            genotype: genotype.into(),
        }
    }

    fn call(gene: &str, variants: &[VariantRecord]) -> String {
        call_diplotype(ReferenceTables::builtin(), gene, variants).to_string()
    }

    #[test]
    fn homozygous_hit() {
        assert_eq!(call("CYP2D6", &[variant("rs3892097", "1/1")]), "*4/*4");
    }

    #[test]
    fn heterozygous_hit() {
        assert_eq!(call("CYP2D6", &[variant("rs3892097", "0/1")]), "*1/*4");
    }

    #[test]
    fn no_match_is_reference() {
        assert_eq!(call("CYP2D6", &[variant("rs999", "1/1")]), "*1/*1");
        assert_eq!(call("CYP2D6", &[]), "*1/*1");
    }

    #[test]
    fn unknown_gene_is_reference() {
        assert_eq!(call("BRCA1", &[variant("rs3892097", "1/1")]), "*1/*1");
    }

    #[test]
    fn first_homozygous_short_circuits() {
        let variants = [
            variant("rs1065852", "0/1"),
            variant("rs3892097", "1/1"),
            variant("rs1065852", "1/1"),
        ];
        assert_eq!(call("CYP2D6", &variants), "*4/*4");
    }

    #[test]
    fn first_two_heterozygous_in_scan_order() {
        let variants = [
            variant("rs12248560", "0/1"),
            variant("rs4244285", "1|0"),
            variant("rs4986893", "0/1"),
        ];
        assert_eq!(call("CYP2C19", &variants), "*17/*2");
    }

    #[test]
    fn reference_and_missing_genotypes_ignored() {
        let variants = [variant("rs3892097", "0/0"), variant("rs1065852", "./.")];
        assert_eq!(call("CYP2D6", &variants), "*1/*1");
    }
}
