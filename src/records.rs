use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::{CraAccession, ProjectAccession, RunDataType, SampleAccession};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub organization: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawPublication {
    pub pubmed_id: Option<String>,
    pub doi: Option<String>,
    pub article_title: Option<String>,
    pub journal: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawGrant {
    pub grant_id: Option<String>,
    pub agency: Option<String>,
    pub agency_abbr: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub accession: ProjectAccession,
    pub title: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub taxonomy: Option<String>,
    pub sample_scope: Option<String>,
    pub data_types: Vec<String>,
    pub relevance: Option<String>,
    pub publications: Vec<RawPublication>,
    pub grants: Vec<RawGrant>,
    pub contact: Option<Contact>,
}

impl Project {
    pub fn primary_organism(&self) -> Option<&str> {
        self.taxonomy
            .as_deref()
            .and_then(|taxonomy| taxonomy.split(',').next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl AttrValue {
    pub fn is_blank(&self) -> bool {
        match self {
            AttrValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(value) => Some(*value),
            AttrValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => write!(f, "{text}"),
            AttrValue::Integer(value) => write!(f, "{value}"),
            AttrValue::Real(value) if value.fract() == 0.0 && value.is_finite() => {
                write!(f, "{value:.1}")
            }
            AttrValue::Real(value) => write!(f, "{value}"),
            AttrValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            AttrValue::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleAttributes {
    entries: Vec<(String, AttrValue)>,
}

impl SampleAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn is_present(&self, key: &str) -> bool {
        self.get(key).map(|value| !value.is_blank()).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for SampleAttributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attributes = SampleAttributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub accession: SampleAccession,
    pub name: String,
    pub title: Option<String>,
    pub sample_type_id: i64,
    pub release_date: Option<NaiveDate>,
    pub taxon_id: Option<i64>,
    pub taxon_name: Option<String>,
    pub attributes: SampleAttributes,
    pub project: Option<ProjectAccession>,
    pub contact: Option<Contact>,
}

impl Sample {
    pub fn spuid(&self) -> String {
        format!("{}: {}", self.accession, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFile {
    pub archived_file_name: String,
    pub md5: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentAttributes {
    pub title: String,
    pub instrument_model: String,
    pub library_source: String,
    pub library_selection: String,
    pub library_strategy: String,
    pub library_name: String,
    pub insert_size: String,
    pub library_construction_protocol: String,
    pub library_layout: String,
}

impl ExperimentAttributes {
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("title", self.title.as_str()),
            ("instrument_model", self.instrument_model.as_str()),
            ("library_source", self.library_source.as_str()),
            ("library_selection", self.library_selection.as_str()),
            ("library_strategy", self.library_strategy.as_str()),
            ("library_name", self.library_name.as_str()),
            ("insert_size", self.insert_size.as_str()),
            (
                "library_construction_protocol",
                self.library_construction_protocol.as_str(),
            ),
            ("library_layout", self.library_layout.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Run {
    pub accession: String,
    pub experiment_accession: String,
    pub sample_accession: String,
    pub sample_title: String,
    pub data_type: RunDataType,
    pub experiment: ExperimentAttributes,
    pub files: Vec<RunFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CraUnit {
    pub accession: CraAccession,
    pub title: Option<String>,
    pub description: Option<String>,
    pub submit_date: Option<NaiveDate>,
    pub release_date: Option<NaiveDate>,
    pub project: Option<ProjectAccession>,
    pub contact: Option<Contact>,
    pub runs: Vec<Run>,
}
