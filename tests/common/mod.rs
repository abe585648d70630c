#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::TempDir;

use gsa_exchange::app::{App, ProgressEvent, ProgressSink};
use gsa_exchange::assemble::{Assembler, SubmissionHeader};
use gsa_exchange::sqlite::{SCHEMA, SqliteAccessorFactory};
use gsa_exchange::xml::Indent;

const ROWS: &str = "
INSERT INTO submitter VALUES (1, 'Li', 'Q', 'Zhang', 'li@example.org', 'Beijing Institute of Genomics');

INSERT INTO prj_sample_scope VALUES (1, 'Monoisolate'), (3, 'Environment');
INSERT INTO project VALUES
    (10, 'PRJCA000001', 'Mouse liver atlas', 'Single-cell atlas of mouse liver',
     '2021-01-01 00:00:00', 'Mus musculus, Homo sapiens', 'Model organism', 1, 1),
    (11, 'PRJCA000002', 'Orphan project', 'No submitter', '2021-01-01', NULL, NULL, 3, NULL);
INSERT INTO prj_data_type VALUES (1, 'Transcriptome or Gene expression'), (2, 'Something unknown');
INSERT INTO pro_data_type VALUES (10, 1), (10, 2);
INSERT INTO publication VALUES
    (1, 10, '31234567', '10.1000/xyz', 'Liver atlas', 'Cell', '2021', 'May', 0);
INSERT INTO prj_grants VALUES (1, 'XDA19090000', 'Chinese Academy of Sciences', 'CAS', NULL);
INSERT INTO pro_grants VALUES (10, 1);

INSERT INTO taxon_name VALUES
    (10090, 'Mus musculus', 'scientific name'),
    (10090, 'house mouse', 'genbank common name'),
    (9606, 'Homo sapiens', 'scientific name'),
    (410658, 'soil metagenome', 'scientific name');

INSERT INTO sample (sample_id, accession, name, title, sample_type_id, release_time,
                    taxon_id, prj_id, submitter_id) VALUES
    (1, 'SAMC000001', 'mouse-1', 'Mouse 1 liver', 4, '2021-02-01', 10090, 10, 1),
    (2, 'SAMC000002', 'donor-2', 'Donor 2', 5, '2021-02-01', 9606, 10, 1),
    (3, 'SAMC000003', 'plot-3', 'Plot 3', 10, '2021-02-01', 410658, 10, 1);
INSERT INTO sample_attr_model_animal (attribute_id, sample_id, strain, age, age_unit, sex,
                                      tissue, collection_date, geographic_location, specimen_voucher)
    VALUES (1, 1, 'C57BL/6', '8', 'weeks', '2', 'liver', '2020-06-01 00:00:00',
            'China: Beijing', 'V-1');
INSERT INTO sample_attr_human (attribute_id, sample_id, age, age_unit, sex)
    VALUES (1, 2, '40', 'years', '1');
INSERT INTO sample_attr_mimsme_soil (attribute_id, sample_id, collection_date, depth,
                                     env_biome, tillage, current_land_use_id)
    VALUES (1, 3, '2019-08-01', 0.5, 'cropland', '1', 1);

INSERT INTO cra VALUES
    (3, 'CRA000003', 'Liver RNA-seq', NULL, '2021-01-15', '2021-03-01', 10, 1),
    (4, 'CRA000004', 'Empty', NULL, '2021-01-15', '2021-03-01', 10, 1);
INSERT INTO exp_platform VALUES (1, 'Illumina NovaSeq 6000');
INSERT INTO exp_lib_source VALUES (1, 'TRANSCRIPTOMIC');
INSERT INTO exp_lib_selection VALUES (1, 'cDNA');
INSERT INTO exp_lib_strategy VALUES (1, 'RNA-Seq');
INSERT INTO experiment (exp_id, accession, cra_id, sample_id, selection_id, platform_id,
                        strategy_id, source_id, lib_design, lib_layout, lib_name,
                        lib_insert_size, title)
    VALUES (4, 'CRX000004', 3, 1, 1, 1, 1, 1, 'TruSeq stranded', '2', 'lib-1', '350',
            'Liver RNA-seq');
INSERT INTO run VALUES (8, 4, 'CRR000008', 1, NULL), (9, 4, 'CRR000009', 1, NULL);
INSERT INTO run_data_file VALUES
    (1, 8, 'r1.fq.gz', 'CRR000008_f1.fq.gz', '0f0f', 10),
    (2, 8, 'r2.fq.gz', 'CRR000008_r2.fq.gz', '1e1e', 10),
    (3, 9, 'x.fq.gz', 'CRR000009.fq.gz', '2d2d', 10);
";

pub struct Fixture {
    pub dir: TempDir,
    pub database: Utf8PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gsa.sqlite");
        let connection = Connection::open(&path).unwrap();
        connection.execute_batch(SCHEMA).unwrap();
        connection.execute_batch(ROWS).unwrap();
        drop(connection);
        Self {
            database: Utf8PathBuf::from_path_buf(path).unwrap(),
            dir,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_list(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn app(&self, threads: usize) -> App<SqliteAccessorFactory> {
        App::new(
            SqliteAccessorFactory::new(self.database.clone()),
            Assembler::new(header()),
            threads,
            Indent::Tab,
        )
    }
}

pub fn header() -> SubmissionHeader {
    SubmissionHeader {
        first_name: "Wei".to_string(),
        last_name: "Zhao".to_string(),
        email: "gsa@big.ac.cn".to_string(),
        organization: "National Genomics Data Center".to_string(),
        hold_release_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    }
}

pub struct Quiet;

impl ProgressSink for Quiet {
    fn event(&self, _event: ProgressEvent) {}
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
