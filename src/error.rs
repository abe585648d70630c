use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GsaError {
    #[error("invalid {expected} accession on line {line}: {value}")]
    InvalidAccession {
        expected: &'static str,
        line: usize,
        value: String,
    },

    #[error("invalid accession: {0}")]
    InvalidAccessionValue(String),

    #[error("missing config file gsa2xml.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid config value: {0}")]
    InvalidConfig(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("sample {accession} has sample type {code} with no submission package")]
    UnsupportedSampleType { accession: String, code: i64 },

    #[error("{accession} is missing mandatory field {field}")]
    MissingField {
        accession: String,
        field: &'static str,
    },

    #[error("{0} has no FASTQ or BAM runs to submit")]
    NoRuns(String),

    #[error("failed to read accession list at {0}")]
    AccessionListRead(PathBuf),

    #[error("XML serialization failed: {0}")]
    Xml(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}

impl GsaError {
    /// Errors that only affect the record being converted; the batch keeps going.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            GsaError::RecordNotFound(_)
                | GsaError::UnsupportedSampleType { .. }
                | GsaError::MissingField { .. }
                | GsaError::NoRuns(_)
                | GsaError::Database(_)
        )
    }
}

impl From<rusqlite::Error> for GsaError {
    fn from(err: rusqlite::Error) -> Self {
        GsaError::Database(err.to_string())
    }
}
