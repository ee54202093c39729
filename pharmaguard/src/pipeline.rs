// src/pipeline.rs

use tracing::{debug, info};

use crate::activity_score::activity_score;
use crate::confidence::calculate_confidence;
use crate::guidelines::ReferenceTables;
use crate::models::{AnalysisResult, VariantDetail, VariantRecord};
use crate::phenotype::resolve_phenotype;
use crate::risk::{alternative_drugs, assess_risk};
use crate::star_allele::call_diplotype;
use crate::vcf_parser::parse_vcf;
use crate::zygosity::classify_zygosity;

/// Star designator reported for a variant that carries no STAR annotation
const DEFAULT_STAR: &str = "*1";

/// Split a comma-separated drug list, trimming and upper-casing each name
pub fn parse_drug_list(drugs: &str) -> Vec<String> {
    drugs
        .split(',')
        .map(|d| d.trim().to_uppercase())
        .filter(|d| !d.is_empty())
        .collect()
}

fn variant_detail(variant: &VariantRecord) -> VariantDetail {
    VariantDetail {
        rsid: variant.rsid.clone(),
        star: variant.star.clone().unwrap_or_else(|| DEFAULT_STAR.to_string()),
        impact: variant.impact.clone(),
        chromosome: variant.chromosome.clone(),
        position: variant.position,
        reference: variant.reference.clone(),
        alternate: variant.alternate.clone(),
        zygosity: classify_zygosity(&variant.genotype),
    }
}

/// Interpret one drug against the patient's variants.
///
/// Returns `None` when no guideline covers the drug.
pub fn analyze_drug(tables: &ReferenceTables, drug: &str, variants: &[VariantRecord]) -> Option<AnalysisResult> {
    let Some(gene) = tables.gene_for_drug(drug) else {
        debug!("No guideline for {}, skipping", drug);
        return None;
    };

    let gene_variants: Vec<VariantRecord> = variants
        .iter()
        .filter(|v| v.gene.as_deref().is_some_and(|g| g.eq_ignore_ascii_case(gene)))
        .cloned()
        .collect();

    let diplotype = call_diplotype(tables, gene, &gene_variants);
    let phenotype = resolve_phenotype(tables, gene, diplotype.as_str());
    let score = activity_score(tables, gene, diplotype.as_str());
    let risk = assess_risk(tables, drug, phenotype);
    let confidence = calculate_confidence(tables, gene, diplotype.as_str(), phenotype, drug, &gene_variants);

    info!(
        "{}: {} {} -> {} ({}, {}), confidence {:.2}",
        drug, gene, diplotype, phenotype, risk.risk_label, risk.severity, confidence
    );

    Some(AnalysisResult {
        drug: drug.to_string(),
        gene: gene.to_string(),
        diplotype,
        phenotype,
        activity_score: score,
        alternatives: alternative_drugs(tables, drug, phenotype),
        risk,
        confidence,
        variants: gene_variants.iter().map(variant_detail).collect(),
    })
}

/// Interpret every requested drug, in request order.
///
/// Drugs without a guideline produce no entry, so an all-unknown request
/// yields an empty list.
pub fn analyze(tables: &ReferenceTables, variants: &[VariantRecord], drugs: &[String]) -> Vec<AnalysisResult> {
    let results: Vec<AnalysisResult> = drugs
        .iter()
        .filter_map(|drug| analyze_drug(tables, drug, variants))
        .collect();
    info!("Analyzed {} of {} requested drugs", results.len(), drugs.len());
    results
}

/// Parse raw variant-call text and a comma-separated drug list, then analyze
pub fn analyze_text(tables: &ReferenceTables, vcf: &str, drugs: &str) -> Vec<AnalysisResult> {
    let variants = parse_vcf(vcf);
    analyze(tables, &variants, &parse_drug_list(drugs))
}
