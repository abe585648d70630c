use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use tracing::{debug, warn};

use crate::accessor::{AccessorFactory, GsaAccessor, TaxonomyLookup};
use crate::domain::{CraAccession, LibraryLayout, ProjectAccession, RunDataType, SampleAccession};
use crate::error::GsaError;
use crate::publication::MISSING;
use crate::records::{
    AttrValue, Contact, CraUnit, ExperimentAttributes, Project, RawGrant, RawPublication, Run,
    RunFile, Sample, SampleAttributes,
};
use crate::vocab;

pub const SCHEMA: &str = include_str!("schema.sql");

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const ARCHIVED_STATUS: i64 = 10;

pub struct SqliteAccessor {
    connection: Connection,
}

impl SqliteAccessor {
    pub fn open(path: &Utf8Path) -> Result<Self, GsaError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(path.as_std_path(), flags)
            .map_err(|err| GsaError::Database(format!("{path}: {err}")))?;
        connection.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { connection })
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    fn contact(&self, submitter_id: Option<i64>) -> Result<Option<Contact>, GsaError> {
        let Some(submitter_id) = submitter_id else {
            return Ok(None);
        };
        debug!(submitter_id, "querying submitter");
        let contact = self
            .connection
            .query_row(
                "SELECT first_name, middle_name, last_name, email, organization
                 FROM submitter WHERE submitter_id = ?1",
                params![submitter_id],
                |row| {
                    Ok(Contact {
                        first_name: text_at(row, 0)?.unwrap_or_default(),
                        middle_name: text_at(row, 1)?,
                        last_name: text_at(row, 2)?.unwrap_or_default(),
                        email: text_at(row, 3)?.unwrap_or_default(),
                        organization: text_at(row, 4)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(contact)
    }

    fn data_types(&self, prj_id: i64) -> Result<Vec<String>, GsaError> {
        let mut statement = self.connection.prepare(
            "SELECT x.data_type_name
             FROM prj_data_type x
             JOIN pro_data_type d ON d.data_type_id = x.data_type_id
             WHERE d.prj_id = ?1
             ORDER BY x.data_type_id",
        )?;
        let names = statement
            .query_map(params![prj_id], |row| text_at(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names.into_iter().flatten().collect())
    }

    fn publications(&self, prj_id: i64) -> Result<Vec<RawPublication>, GsaError> {
        let mut statement = self.connection.prepare(
            "SELECT pubmed_id, doi, article_title, journal_title, year, month
             FROM publication
             WHERE is_deleted_by_user = 0 AND prj_id = ?1
             ORDER BY publication_id",
        )?;
        let publications = statement
            .query_map(params![prj_id], |row| {
                Ok(RawPublication {
                    pubmed_id: text_at(row, 0)?,
                    doi: text_at(row, 1)?,
                    article_title: text_at(row, 2)?,
                    journal: text_at(row, 3)?,
                    year: text_at(row, 4)?,
                    month: text_at(row, 5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(publications)
    }

    fn grants(&self, prj_id: i64) -> Result<Vec<RawGrant>, GsaError> {
        let mut statement = self.connection.prepare(
            "SELECT g.grant_ID, g.agency, g.agency_abbr, g.grant_title
             FROM prj_grants g
             INNER JOIN pro_grants pg ON g.grants_id = pg.grants_id
             WHERE pg.prj_id = ?1
             ORDER BY g.grants_id",
        )?;
        let grants = statement
            .query_map(params![prj_id], |row| {
                Ok(RawGrant {
                    grant_id: text_at(row, 0)?,
                    agency: text_at(row, 1)?,
                    agency_abbr: text_at(row, 2)?,
                    title: text_at(row, 3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(grants)
    }

    fn attributes(&self, sample_id: i64, sample_type_id: i64) -> Result<SampleAttributes, GsaError> {
        let Some(table) = vocab::attribute_table(sample_type_id) else {
            return Ok(SampleAttributes::new());
        };
        debug!(table, sample_id, "querying sample attributes");
        let sql = format!("SELECT * FROM {table} WHERE sample_id = ?1 LIMIT 1");
        let mut statement = self.connection.prepare(&sql)?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let mut rows = statement.query(params![sample_id])?;
        let mut attributes = SampleAttributes::new();
        let Some(row) = rows.next()? else {
            return Ok(attributes);
        };
        for (index, column) in columns.iter().enumerate() {
            if vocab::NON_ATTRIBUTE_COLUMNS.contains(&column.as_str()) {
                continue;
            }
            if let Some(value) = attr_value(row.get_ref(index)?) {
                attributes.insert(column.as_str(), value);
            }
        }
        Ok(attributes)
    }

    fn runs(&self, cra_id: i64) -> Result<Vec<Run>, GsaError> {
        let mut statement = self.connection.prepare(
            "SELECT r.accession, r.run_data_type_id,
                    e.accession, e.title, e.lib_name, e.lib_design, e.lib_insert_size, e.lib_layout,
                    pl.platform_name, so.source_name, se.selection_name, st.strategy_name,
                    s.accession, s.title,
                    f.archived_file_name, f.md5
             FROM run_data_file f
             JOIN run r ON r.run_id = f.run_id
             JOIN experiment e ON e.exp_id = r.exp_id
             JOIN sample s ON s.sample_id = e.sample_id
             LEFT JOIN exp_platform pl ON pl.platform_id = e.platform_id
             LEFT JOIN exp_lib_source so ON so.source_id = e.source_id
             LEFT JOIN exp_lib_selection se ON se.selection_id = e.selection_id
             LEFT JOIN exp_lib_strategy st ON st.strategy_id = e.strategy_id
             WHERE e.cra_id = ?1 AND f.status = ?2 AND r.run_data_type_id IN (1, 2)
             ORDER BY r.run_id, f.run_file_id",
        )?;
        let rows = statement
            .query_map(params![cra_id, ARCHIVED_STATUS], |row| {
                let run = Run {
                    accession: text_at(row, 0)?.unwrap_or_default(),
                    data_type: row
                        .get::<_, Option<i64>>(1)?
                        .and_then(RunDataType::from_code)
                        .unwrap_or(RunDataType::Fastq),
                    experiment_accession: text_at(row, 2)?.unwrap_or_default(),
                    experiment: ExperimentAttributes {
                        title: or_missing(text_at(row, 3)?),
                        library_name: or_missing(text_at(row, 4)?),
                        library_construction_protocol: or_missing(text_at(row, 5)?),
                        insert_size: or_missing(text_at(row, 6)?.filter(|size| size != "0")),
                        library_layout: text_at(row, 7)?
                            .as_deref()
                            .and_then(LibraryLayout::from_code)
                            .map(|layout| layout.as_str().to_string())
                            .unwrap_or_else(|| MISSING.to_string()),
                        instrument_model: or_missing(text_at(row, 8)?),
                        library_source: or_missing(text_at(row, 9)?),
                        library_selection: or_missing(text_at(row, 10)?),
                        library_strategy: or_missing(text_at(row, 11)?),
                    },
                    sample_accession: text_at(row, 12)?.unwrap_or_default(),
                    sample_title: or_missing(text_at(row, 13)?),
                    files: Vec::new(),
                };
                let file = RunFile {
                    archived_file_name: text_at(row, 14)?.unwrap_or_default(),
                    md5: text_at(row, 15)?.unwrap_or_default(),
                };
                Ok((run, file))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut runs: Vec<Run> = Vec::new();
        for (run, file) in rows {
            match runs.last_mut() {
                Some(last) if last.accession == run.accession => last.files.push(file),
                _ => {
                    let mut run = run;
                    run.files.push(file);
                    runs.push(run);
                }
            }
        }
        Ok(runs)
    }
}

impl TaxonomyLookup for SqliteAccessor {
    fn scientific_name(&self, taxon_id: i64) -> Option<String> {
        let result = self
            .connection
            .query_row(
                "SELECT name_txt FROM taxon_name
                 WHERE tax_id = ?1 AND name_class = 'scientific name'
                 LIMIT 1",
                params![taxon_id],
                |row| text_at(row, 0),
            )
            .optional();
        match result {
            Ok(name) => name.flatten(),
            Err(err) => {
                warn!(taxon_id, error = %err, "taxonomy lookup failed");
                None
            }
        }
    }
}

impl GsaAccessor for SqliteAccessor {
    fn project(&self, accession: &ProjectAccession) -> Result<Option<Project>, GsaError> {
        debug!(%accession, "querying project");
        let row = self
            .connection
            .query_row(
                "SELECT p.prj_id, p.title, p.description, p.release_time, p.taxonomy,
                        p.relevance, s.sample_scope_name, p.submitter_id
                 FROM project p
                 LEFT JOIN prj_sample_scope s ON s.sample_scope_id = p.sample_scope_id
                 WHERE p.accession = ?1",
                params![accession.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        text_at(row, 1)?,
                        text_at(row, 2)?,
                        text_at(row, 3)?,
                        text_at(row, 4)?,
                        text_at(row, 5)?,
                        text_at(row, 6)?,
                        row.get::<_, Option<i64>>(7)?,
                    ))
                },
            )
            .optional()?;
        let Some((prj_id, title, description, release, taxonomy, relevance, scope, submitter_id)) =
            row
        else {
            return Ok(None);
        };

        Ok(Some(Project {
            accession: accession.clone(),
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            release_date: release.as_deref().and_then(parse_date),
            taxonomy,
            sample_scope: scope,
            data_types: self.data_types(prj_id)?,
            relevance,
            publications: self.publications(prj_id)?,
            grants: self.grants(prj_id)?,
            contact: self.contact(submitter_id)?,
        }))
    }

    fn sample(&self, accession: &SampleAccession) -> Result<Option<Sample>, GsaError> {
        debug!(%accession, "querying sample");
        let row = self
            .connection
            .query_row(
                "SELECT s.sample_id, s.name, s.title, s.sample_type_id, s.release_time,
                        s.taxon_id, s.submitter_id, p.accession
                 FROM sample s
                 LEFT JOIN project p ON p.prj_id = s.prj_id
                 WHERE s.accession = ?1",
                params![accession.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        text_at(row, 1)?,
                        text_at(row, 2)?,
                        row.get::<_, Option<i64>>(3)?,
                        text_at(row, 4)?,
                        row.get::<_, Option<i64>>(5)?,
                        row.get::<_, Option<i64>>(6)?,
                        text_at(row, 7)?,
                    ))
                },
            )
            .optional()?;
        let Some((sample_id, name, title, type_id, release, taxon_id, submitter_id, project)) = row
        else {
            return Ok(None);
        };

        let sample_type_id = type_id.unwrap_or_default();
        let project = project.as_deref().map(related_project).transpose()?;

        Ok(Some(Sample {
            accession: accession.clone(),
            name: name.unwrap_or_default(),
            title,
            sample_type_id,
            release_date: release.as_deref().and_then(parse_date),
            taxon_id,
            taxon_name: taxon_id.and_then(|id| self.scientific_name(id)),
            attributes: self.attributes(sample_id, sample_type_id)?,
            project,
            contact: self.contact(submitter_id)?,
        }))
    }

    fn cra(&self, accession: &CraAccession) -> Result<Option<CraUnit>, GsaError> {
        debug!(%accession, "querying cra");
        let row = self
            .connection
            .query_row(
                "SELECT c.cra_id, c.title, c.description, c.submit_time, c.release_time,
                        c.submitter_id, p.accession
                 FROM cra c
                 LEFT JOIN project p ON p.prj_id = c.prj_id
                 WHERE c.accession = ?1",
                params![accession.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        text_at(row, 1)?,
                        text_at(row, 2)?,
                        text_at(row, 3)?,
                        text_at(row, 4)?,
                        row.get::<_, Option<i64>>(5)?,
                        text_at(row, 6)?,
                    ))
                },
            )
            .optional()?;
        let Some((cra_id, title, description, submitted, release, submitter_id, project)) = row
        else {
            return Ok(None);
        };

        let project = project.as_deref().map(related_project).transpose()?;

        Ok(Some(CraUnit {
            accession: accession.clone(),
            title,
            description,
            submit_date: submitted.as_deref().and_then(parse_date),
            release_date: release.as_deref().and_then(parse_date),
            project,
            contact: self.contact(submitter_id)?,
            runs: self.runs(cra_id)?,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct SqliteAccessorFactory {
    path: Utf8PathBuf,
}

impl SqliteAccessorFactory {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccessorFactory for SqliteAccessorFactory {
    type Accessor = SqliteAccessor;

    fn open(&self) -> Result<SqliteAccessor, GsaError> {
        SqliteAccessor::open(&self.path)
    }
}

fn text_at(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<String>> {
    let text = match row.get_ref(index)? {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    };
    Ok(text.filter(|text| !text.trim().is_empty()))
}

fn related_project(value: &str) -> Result<ProjectAccession, GsaError> {
    value
        .parse()
        .map_err(|_| GsaError::Database(format!("malformed project accession {value:?}")))
}

fn or_missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING.to_string())
}

fn attr_value(value: ValueRef<'_>) -> Option<AttrValue> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(AttrValue::Integer(value)),
        ValueRef::Real(value) => Some(AttrValue::Real(value)),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            Some(typed_text(&text))
        }
    }
}

/// Date and datetime columns come back from SQLite as text. Only canonical
/// renderings are restored to their type, anything else stays verbatim.
fn typed_text(text: &str) -> AttrValue {
    const DATETIME: &str = "%Y-%m-%d %H:%M:%S";
    const DATE: &str = "%Y-%m-%d";
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, DATETIME)
        && datetime.format(DATETIME).to_string() == text
    {
        return AttrValue::DateTime(datetime);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, DATE)
        && date.format(DATE).to_string() == text
    {
        return AttrValue::Date(date);
    }
    AttrValue::Text(text.to_string())
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
}
