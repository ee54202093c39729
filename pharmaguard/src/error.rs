// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures loading reference tables from disk
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read reference tables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reference tables are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid reference tables: {0}")]
    Invalid(String),
}

/// Hard rejections raised while shaping a patient report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("VCF file parsed but no pharmacogenomic variants detected")]
    NoVariants,
}
