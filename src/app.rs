use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::accession_list::{partition_existing, read_accessions};
use crate::accessor::{AccessorFactory, GsaAccessor};
use crate::assemble::{Assembler, CRA_EXTERNAL_DBS, SAMPLE_EXTERNAL_DBS};
use crate::domain::{BatchKind, CraAccession, ProjectAccession, SampleAccession};
use crate::error::GsaError;
use crate::pool::run_pool;
use crate::xml::{self, Element, Indent};

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub accession: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub kind: BatchKind,
    pub requested: usize,
    pub converted: usize,
    pub skipped: Vec<SkippedRecord>,
    pub existing: Vec<String>,
    pub outputs: Vec<String>,
}

impl BatchSummary {
    fn new(kind: BatchKind, requested: usize) -> Self {
        Self {
            kind,
            requested,
            converted: 0,
            skipped: Vec::new(),
            existing: Vec::new(),
            outputs: Vec::new(),
        }
    }

    fn skip(&mut self, accession: &str, err: GsaError) -> Result<(), GsaError> {
        if !err.is_record_level() {
            return Err(err);
        }
        warn!(accession, "skipping record: {}", err);
        self.skipped.push(SkippedRecord {
            accession: accession.to_string(),
            reason: err.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct App<F: AccessorFactory> {
    factory: F,
    assembler: Assembler,
    threads: usize,
    indent: Indent,
}

impl<F: AccessorFactory> App<F> {
    pub fn new(factory: F, assembler: Assembler, threads: usize, indent: Indent) -> Self {
        Self {
            factory,
            assembler,
            threads: threads.max(1),
            indent,
        }
    }

    pub fn project_batch(
        &self,
        list: &Path,
        out: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<BatchSummary, GsaError> {
        let accessions: Vec<ProjectAccession> = read_accessions(list, BatchKind::Project)?;
        let start = Instant::now();
        sink.event(ProgressEvent {
            message: format!("phase=Resolve; {} project(s)", accessions.len()),
            elapsed: None,
        });

        let results = run_pool(&self.factory, &accessions, self.threads, |accessor, accession| {
            let project = accessor
                .project(accession)?
                .ok_or_else(|| GsaError::RecordNotFound(accession.to_string()))?;
            self.assembler.project_action(&project)
        })?;

        let accessions: Vec<&str> = accessions.iter().map(ProjectAccession::as_str).collect();
        self.write_submission(BatchKind::Project, &accessions, results, &[], out, sink, start)
    }

    pub fn sample_batch(
        &self,
        list: &Path,
        out: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<BatchSummary, GsaError> {
        let accessions: Vec<SampleAccession> = read_accessions(list, BatchKind::Sample)?;
        let start = Instant::now();
        sink.event(ProgressEvent {
            message: format!("phase=Resolve; {} sample(s)", accessions.len()),
            elapsed: None,
        });

        let results = run_pool(&self.factory, &accessions, self.threads, |accessor, accession| {
            let sample = accessor
                .sample(accession)?
                .ok_or_else(|| GsaError::RecordNotFound(accession.to_string()))?;
            self.assembler.sample_action(&sample, accessor)
        })?;

        let accessions: Vec<&str> = accessions.iter().map(SampleAccession::as_str).collect();
        self.write_submission(
            BatchKind::Sample,
            &accessions,
            results,
            SAMPLE_EXTERNAL_DBS,
            out,
            sink,
            start,
        )
    }

    /// Writes one `<acc>.xml` per CRA unit into `out_dir`. Existing files are
    /// never touched.
    pub fn cra_batch(
        &self,
        list: &Path,
        out_dir: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<BatchSummary, GsaError> {
        let accessions: Vec<CraAccession> = read_accessions(list, BatchKind::Cra)?;
        let start = Instant::now();
        let mut summary = BatchSummary::new(BatchKind::Cra, accessions.len());
        let partition = partition_existing(accessions, out_dir);
        for accession in &partition.existing {
            info!(%accession, "output exists, skipping");
        }
        summary.existing = partition.existing.iter().map(ToString::to_string).collect();
        sink.event(ProgressEvent {
            message: format!(
                "phase=Resolve; {} CRA unit(s), {} already written",
                partition.pending.len(),
                partition.existing.len()
            ),
            elapsed: None,
        });

        let results = run_pool(&self.factory, &partition.pending, self.threads, |accessor, accession| {
            convert_cra(&self.assembler, accessor, accession, out_dir, self.indent)
        })?;

        for (accession, result) in partition.pending.iter().zip(results) {
            match result {
                Ok(Some(path)) => {
                    summary.converted += 1;
                    summary.outputs.push(path.display().to_string());
                    sink.event(ProgressEvent {
                        message: format!("phase=Store; wrote {}", path.display()),
                        elapsed: Some(start.elapsed()),
                    });
                }
                Ok(None) => summary.existing.push(accession.to_string()),
                Err(err) => summary.skip(accession.as_str(), err)?,
            }
        }

        info!(
            converted = summary.converted,
            skipped = summary.skipped.len(),
            existing = summary.existing.len(),
            "cra batch finished"
        );
        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    fn write_submission(
        &self,
        kind: BatchKind,
        accessions: &[&str],
        results: Vec<Result<Element, GsaError>>,
        external_dbs: &[&str],
        out: &Path,
        sink: &dyn ProgressSink,
        start: Instant,
    ) -> Result<BatchSummary, GsaError> {
        let mut summary = BatchSummary::new(kind, accessions.len());
        let mut root = self.assembler.submission(kind);
        for (accession, result) in accessions.iter().zip(results) {
            match result {
                Ok(action) => {
                    root.push_child(action);
                    summary.converted += 1;
                    sink.event(ProgressEvent {
                        message: format!("phase=Assemble; {accession}"),
                        elapsed: Some(start.elapsed()),
                    });
                }
                Err(err) => summary.skip(accession, err)?,
            }
        }

        for reference in xml::dangling_references(&root, external_dbs) {
            warn!(%reference, "reference has no matching identifier in the submission");
        }

        xml::write_file(&root, out, self.indent, true)?;
        summary.outputs.push(out.display().to_string());
        sink.event(ProgressEvent {
            message: format!("phase=Store; wrote {}", out.display()),
            elapsed: Some(start.elapsed()),
        });
        info!(
            %kind,
            converted = summary.converted,
            skipped = summary.skipped.len(),
            "batch finished"
        );
        Ok(summary)
    }
}

fn convert_cra<A: GsaAccessor>(
    assembler: &Assembler,
    accessor: &A,
    accession: &CraAccession,
    out_dir: &Path,
    indent: Indent,
) -> Result<Option<PathBuf>, GsaError> {
    let cra = accessor
        .cra(accession)?
        .ok_or_else(|| GsaError::RecordNotFound(accession.to_string()))?;
    let document = assembler.cra_document(&cra)?;
    for reference in xml::dangling_references(&document, CRA_EXTERNAL_DBS) {
        warn!(%accession, %reference, "reference has no matching identifier in the document");
    }
    let path = out_dir.join(accession.xml_file_name());
    let written = xml::write_file(&document, &path, indent, false)?;
    Ok(written.then_some(path))
}
