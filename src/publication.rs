use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::records::{RawGrant, RawPublication};

pub const MISSING: &str = "missing";

static PUBMED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{5,8}$").expect("pubmed pattern is valid")
});

static DOI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^10\.\d{4,9}/[-._;()/:A-Z0-9]+$").expect("doi pattern is valid")
});

pub fn is_valid_pubmed(value: &str) -> bool {
    PUBMED_RE.is_match(value)
}

pub fn is_valid_doi(value: &str) -> bool {
    DOI_RE.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PublicationId {
    Pubmed(String),
    Doi(String),
}

impl PublicationId {
    /// Pubmed wins when both identifiers validate.
    pub fn select(pubmed_id: Option<&str>, doi: Option<&str>) -> Option<Self> {
        if let Some(pubmed_id) = pubmed_id.filter(|value| is_valid_pubmed(value)) {
            return Some(PublicationId::Pubmed(pubmed_id.to_string()));
        }
        doi.filter(|value| is_valid_doi(value))
            .map(|value| PublicationId::Doi(value.to_string()))
    }

    pub fn value(&self) -> &str {
        match self {
            PublicationId::Pubmed(value) | PublicationId::Doi(value) => value,
        }
    }

    pub fn db_type(&self) -> &'static str {
        match self {
            PublicationId::Pubmed(_) => "ePubmed",
            PublicationId::Doi(_) => "eDOI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub id: PublicationId,
    pub article_title: String,
    pub journal: String,
    pub year: String,
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grant {
    pub grant_id: String,
    pub agency: String,
    pub agency_abbr: String,
    pub title: String,
}

pub fn format_publications(raw: &[RawPublication]) -> Vec<Publication> {
    let mut seen: Vec<(Option<&str>, Option<&str>)> = Vec::new();
    let mut publications = Vec::new();
    for record in raw {
        let pubmed_id = record.pubmed_id.as_deref().map(str::trim);
        let doi = record.doi.as_deref().map(str::trim);
        let Some(id) = PublicationId::select(pubmed_id, doi) else {
            continue;
        };
        if seen.contains(&(pubmed_id, doi)) {
            continue;
        }
        seen.push((pubmed_id, doi));
        publications.push(Publication {
            id,
            article_title: or_missing(record.article_title.as_deref()),
            journal: or_missing(record.journal.as_deref()),
            year: or_missing(record.year.as_deref()),
            month: or_missing(record.month.as_deref()),
        });
    }
    publications
}

pub fn format_grants(raw: &[RawGrant]) -> Vec<Grant> {
    raw.iter()
        .filter_map(|record| {
            let grant_id = record
                .grant_id
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())?;
            Some(Grant {
                grant_id: grant_id.to_string(),
                agency: or_missing(record.agency.as_deref()),
                agency_abbr: or_missing(record.agency_abbr.as_deref()),
                title: or_missing(record.title.as_deref()),
            })
        })
        .collect()
}

pub fn or_missing(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}
