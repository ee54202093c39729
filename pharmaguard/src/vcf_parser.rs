// src/vcf_parser.rs

use std::collections::HashMap;
use tracing::{debug, info};

use crate::models::VariantRecord;

// Fixed column offsets of a VCF data line
const CHROM_COL: usize = 0;
const POS_COL: usize = 1;
const ID_COL: usize = 2;
const REF_COL: usize = 3;
const ALT_COL: usize = 4;
const INFO_COL: usize = 7;
const SAMPLE_COL: usize = 9;
const MIN_COLUMNS: usize = 10;

const DEFAULT_IMPACT: &str = "Unknown";

/// Parse the semicolon-separated INFO column into key/value pairs.
///
/// Flags without a `=` are ignored; only the first `=` splits key from value.
pub fn parse_info_field(info: &str) -> HashMap<&str, &str> {
    info.split(';')
        .filter_map(|item| item.split_once('='))
        .collect()
}

/// Parse one data line, returning `None` for anything short or malformed
fn parse_line(line_no: usize, line: &str) -> Option<VariantRecord> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() < MIN_COLUMNS {
        debug!("Line {}: {} columns, need {}", line_no, columns.len(), MIN_COLUMNS);
        return None;
    }

    let position = match columns[POS_COL].parse::<u64>() {
        Ok(p) => p,
        Err(_) => {
            debug!("Line {}: invalid position '{}'", line_no, columns[POS_COL]);
            return None;
        }
    };

    let info = parse_info_field(columns[INFO_COL]);
    let copy_number = info.get("CN").and_then(|cn| match cn.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!("Line {}: ignoring non-numeric CN '{}'", line_no, cn);
            None
        }
    });

    Some(VariantRecord {
        chromosome: columns[CHROM_COL].to_string(),
        position,
        rsid: columns[ID_COL].to_string(),
        reference: columns[REF_COL].to_string(),
        alternate: columns[ALT_COL].to_string(),
        gene: info.get("GENE").map(|s| s.to_string()),
        star: info.get("STAR").map(|s| s.to_string()),
        impact: info.get("IMPACT").unwrap_or(&DEFAULT_IMPACT).to_string(),
        copy_number,
        genotype: columns[SAMPLE_COL].to_string(),
    })
}

/// Parse variant-call text into records, in file order.
///
/// Header lines (`#`) and blank lines are skipped, short or malformed lines are
/// dropped. An empty result means the file carries no usable signal.
pub fn parse_vcf(content: &str) -> Vec<VariantRecord> {
    let mut skipped = 0usize;
    let mut records = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(idx + 1, line) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    info!("Parsed {} variant records ({} lines dropped)", records.len(), skipped);
    records
}
