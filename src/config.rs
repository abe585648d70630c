use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::assemble::{DEFAULT_SPUID_NAMESPACE, SubmissionHeader};
use crate::error::GsaError;
use crate::xml::Indent;

pub const DEFAULT_CONFIG_FILE: &str = "gsa2xml.json";
pub const DEFAULT_THREADS: usize = 4;
const SUPPORTED_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub spuid_namespace: Option<String>,
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default)]
    pub indent: Option<IndentEntry>,
    #[serde(default)]
    pub emit_relevance: Option<bool>,
    #[serde(default)]
    pub description: Option<DescriptionEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IndentEntry {
    Spaces(usize),
    Named(String),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DescriptionEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization: String,
    #[serde(default)]
    pub hold_release_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub database: Option<Utf8PathBuf>,
    pub spuid_namespace: String,
    pub threads: usize,
    pub indent: Indent,
    pub emit_relevance: bool,
    pub header: SubmissionHeader,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, GsaError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Err(GsaError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| GsaError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| GsaError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, GsaError> {
        let schema_version = config.schema_version.unwrap_or(SUPPORTED_SCHEMA_VERSION);
        if schema_version > SUPPORTED_SCHEMA_VERSION {
            return Err(GsaError::InvalidConfig(format!(
                "schema_version {schema_version} is newer than supported version {SUPPORTED_SCHEMA_VERSION}"
            )));
        }

        let spuid_namespace = match config.spuid_namespace {
            Some(namespace) if namespace.trim().is_empty() => {
                return Err(GsaError::InvalidConfig(
                    "spuid_namespace must not be empty".to_string(),
                ));
            }
            Some(namespace) => namespace.trim().to_string(),
            None => DEFAULT_SPUID_NAMESPACE.to_string(),
        };

        let threads = config.threads.unwrap_or(DEFAULT_THREADS);
        if threads == 0 {
            return Err(GsaError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }

        let indent = match config.indent {
            None => Indent::Tab,
            Some(IndentEntry::Spaces(width)) => Indent::Spaces(width),
            Some(IndentEntry::Named(name)) if name.eq_ignore_ascii_case("tab") => Indent::Tab,
            Some(IndentEntry::Named(name)) => {
                return Err(GsaError::InvalidConfig(format!(
                    "indent must be \"tab\" or a number of spaces, got {name:?}"
                )));
            }
        };

        let description = config.description.ok_or_else(|| {
            GsaError::InvalidConfig("description block is required".to_string())
        })?;

        Ok(ResolvedConfig {
            schema_version,
            database: config
                .database
                .filter(|path| !path.trim().is_empty())
                .map(Utf8PathBuf::from),
            spuid_namespace,
            threads,
            indent,
            emit_relevance: config.emit_relevance.unwrap_or(false),
            header: resolve_header(description)?,
        })
    }
}

fn resolve_header(description: DescriptionEntry) -> Result<SubmissionHeader, GsaError> {
    let fields = [
        ("first_name", &description.first_name),
        ("last_name", &description.last_name),
        ("email", &description.email),
        ("organization", &description.organization),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(GsaError::InvalidConfig(format!(
                "description.{name} must not be empty"
            )));
        }
    }

    let hold_release_date = match description.hold_release_date.as_deref() {
        Some(date) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            GsaError::InvalidConfig(format!(
                "description.hold_release_date must be YYYY-MM-DD, got {date:?}"
            ))
        })?,
        None => Local::now().date_naive(),
    };

    Ok(SubmissionHeader {
        first_name: description.first_name.trim().to_string(),
        last_name: description.last_name.trim().to_string(),
        email: description.email.trim().to_string(),
        organization: description.organization.trim().to_string(),
        hold_release_date,
    })
}
