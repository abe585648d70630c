use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::domain::{BatchKind, CraAccession};
use crate::error::GsaError;

pub fn parse_accessions<A>(content: &str, kind: BatchKind) -> Result<Vec<A>, GsaError>
where
    A: FromStr<Err = GsaError>,
{
    let mut accessions = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let value = line.trim();
        if value.is_empty() || value.starts_with("accession") {
            continue;
        }
        let accession = value.parse().map_err(|_| GsaError::InvalidAccession {
            expected: kind.accession_prefix(),
            line: index + 1,
            value: value.to_string(),
        })?;
        accessions.push(accession);
    }
    Ok(accessions)
}

pub fn read_accessions<A>(path: &Path, kind: BatchKind) -> Result<Vec<A>, GsaError>
where
    A: FromStr<Err = GsaError>,
{
    let content =
        fs::read_to_string(path).map_err(|_| GsaError::AccessionListRead(path.to_path_buf()))?;
    parse_accessions(&content, kind)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CraPartition {
    pub pending: Vec<CraAccession>,
    pub existing: Vec<CraAccession>,
}

pub fn partition_existing(accessions: Vec<CraAccession>, out_dir: &Path) -> CraPartition {
    let mut partition = CraPartition::default();
    for accession in accessions {
        if out_dir.join(accession.xml_file_name()).exists() {
            partition.existing.push(accession);
        } else {
            partition.pending.push(accession);
        }
    }
    partition
}
