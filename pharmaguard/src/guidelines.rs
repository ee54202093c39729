// src/guidelines.rs
// -----------------------------------------------------------------------------
// Static CPIC reference data: per-gene star-allele maps, reduced-function
// allele sets, activity coefficients and per-drug guideline rows.
// Tables are deserialized once and only ever handed out by shared reference.
// -----------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

use crate::error::TableError;

const BUILTIN_TABLES: &str = include_str!("../data/cpic_tables.json");

static BUILTIN: OnceLock<ReferenceTables> = OnceLock::new();

/// Which phenotype words a gene reports with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhenotypeVocabulary {
    /// PM / IM / NM
    Metabolizer,
    /// Low / Intermediate / Normal
    Function,
    /// Deficient / Intermediate / Normal
    Deficiency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneTable {
    pub vocabulary: PhenotypeVocabulary,
    /// rsID → star designator
    pub variant_alleles: BTreeMap<String, String>,
    #[serde(default)]
    pub reduced_function: BTreeSet<String>,
    /// Star designator → activity coefficient; absent for genes without CPIC scores
    #[serde(default)]
    pub activity: Option<BTreeMap<String, f64>>,
}

/// One guideline row for a (drug, phenotype) pair.
///
/// A row without `risk` only lists alternatives and carries no risk rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineEntry {
    #[serde(default)]
    pub risk: Option<String>,
    /// Raw severity, coerced on lookup
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugRule {
    pub gene: String,
    /// Keyed by phenotype label or tier code (PM, IM, NM, RM, URM)
    pub phenotypes: BTreeMap<String, GuidelineEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub genes: BTreeMap<String, GeneTable>,
    pub drugs: BTreeMap<String, DrugRule>,
}

impl ReferenceTables {
    /// Built-in CPIC tables, parsed on first use and shared process-wide
    pub fn builtin() -> &'static ReferenceTables {
        BUILTIN.get_or_init(|| {
            let tables = Self::from_json(BUILTIN_TABLES)
                .expect("embedded CPIC tables must parse and validate");
            info!(
                "Loaded built-in CPIC tables: {} genes, {} drugs",
                tables.genes.len(),
                tables.drugs.len()
            );
            tables
        })
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let mut tables: ReferenceTables = serde_json::from_str(json)?;
        tables.normalize();
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        info!("Reading reference tables from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Upper-case gene and drug keys so lookups match the normalized drug list,
    /// and accept "UM" as an alias of the ultrarapid row.
    fn normalize(&mut self) {
        self.genes = std::mem::take(&mut self.genes)
            .into_iter()
            .map(|(gene, table)| (gene.to_uppercase(), table))
            .collect();

        self.drugs = std::mem::take(&mut self.drugs)
            .into_iter()
            .map(|(drug, mut rule)| {
                rule.gene = rule.gene.to_uppercase();
                if let Some(entry) = rule.phenotypes.remove("UM") {
                    rule.phenotypes.entry("URM".to_string()).or_insert(entry);
                }
                (drug.to_uppercase(), rule)
            })
            .collect();
    }

    fn validate(&self) -> Result<(), TableError> {
        for (gene, table) in &self.genes {
            if table.variant_alleles.is_empty() {
                return Err(TableError::Invalid(format!(
                    "gene {gene} has an empty variant map"
                )));
            }
        }
        for (drug, rule) in &self.drugs {
            if rule.gene.trim().is_empty() {
                return Err(TableError::Invalid(format!("drug {drug} names no gene")));
            }
        }
        Ok(())
    }

    /// Gene keys are stored upper-case, so the lookup is case-insensitive
    pub fn gene(&self, gene: &str) -> Option<&GeneTable> {
        self.genes.get(&gene.to_uppercase())
    }

    pub fn drug(&self, drug: &str) -> Option<&DrugRule> {
        self.drugs.get(drug)
    }

    /// Gene a drug's guideline is keyed on, if the drug is covered
    pub fn gene_for_drug(&self, drug: &str) -> Option<&str> {
        self.drugs.get(drug).map(|rule| rule.gene.as_str())
    }

    pub fn covers_drug(&self, drug: &str) -> bool {
        self.drugs.contains_key(drug)
    }
}

/// Resolve which tables a run should use: an explicit path, then the
/// `PHARMAGUARD_TABLES` environment variable, then the built-in set.
pub fn load_tables(explicit: Option<&Path>) -> Result<ReferenceTables, TableError> {
    if let Some(path) = explicit {
        return ReferenceTables::from_path(path);
    }
    match std::env::var_os("PHARMAGUARD_TABLES") {
        Some(val) => ReferenceTables::from_path(Path::new(&val)),
        None => Ok(ReferenceTables::builtin().clone()),
    }
}
