use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GsaError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectAccession(String);

impl ProjectAccession {
    pub const PREFIX: &'static str = "PRJC";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectAccession {
    type Err = GsaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_prefixed(value, Self::PREFIX).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleAccession(String);

impl SampleAccession {
    pub const PREFIX: &'static str = "SAMC";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SampleAccession {
    type Err = GsaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_prefixed(value, Self::PREFIX).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CraAccession(String);

impl CraAccession {
    pub const PREFIX: &'static str = "CRA";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn xml_file_name(&self) -> String {
        format!("{}.xml", self.0)
    }
}

impl fmt::Display for CraAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CraAccession {
    type Err = GsaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_prefixed(value, Self::PREFIX).map(Self)
    }
}

fn parse_prefixed(value: &str, prefix: &str) -> Result<String, GsaError> {
    let normalized = value.trim();
    let is_valid = normalized.starts_with(prefix)
        && normalized.len() > prefix.len()
        && !normalized.chars().any(char::is_whitespace);
    if !is_valid {
        return Err(GsaError::InvalidAccessionValue(value.to_string()));
    }
    Ok(normalized.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    Project,
    Sample,
    Cra,
}

impl BatchKind {
    pub fn accession_prefix(self) -> &'static str {
        match self {
            BatchKind::Project => ProjectAccession::PREFIX,
            BatchKind::Sample => SampleAccession::PREFIX,
            BatchKind::Cra => CraAccession::PREFIX,
        }
    }

    pub fn target_db(self) -> &'static str {
        match self {
            BatchKind::Project => "BioProject",
            BatchKind::Sample => "BioSample",
            BatchKind::Cra => "DRA",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchKind::Project => write!(f, "project"),
            BatchKind::Sample => write!(f, "sample"),
            BatchKind::Cra => write!(f, "cra"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunDataType {
    Fastq,
    Bam,
}

impl RunDataType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(RunDataType::Fastq),
            2 => Some(RunDataType::Bam),
            _ => None,
        }
    }

    pub fn file_type(self) -> &'static str {
        match self {
            RunDataType::Fastq => "FASTQ",
            RunDataType::Bam => "BAM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LibraryLayout {
    Single,
    Paired,
}

impl LibraryLayout {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(LibraryLayout::Single),
            "2" => Some(LibraryLayout::Paired),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LibraryLayout::Single => "SINGLE",
            LibraryLayout::Paired => "PAIRED",
        }
    }
}
