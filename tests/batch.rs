mod common;

use std::fs;

use assert_matches::assert_matches;

use common::{Fixture, Quiet, read};
use gsa_exchange::accessor::GsaAccessor;
use gsa_exchange::app::App;
use gsa_exchange::assemble::{Assembler, CRA_EXTERNAL_DBS, SAMPLE_EXTERNAL_DBS};
use gsa_exchange::domain::BatchKind;
use gsa_exchange::error::GsaError;
use gsa_exchange::sqlite::{SqliteAccessor, SqliteAccessorFactory};
use gsa_exchange::xml::{Indent, dangling_references};

#[test]
fn project_batch_converts_and_skips() {
    let fixture = Fixture::new();
    let list = fixture.write_list(
        "projects.txt",
        "accession\nPRJCA000001\n\nPRJCA000002\nPRJCA000099\n",
    );
    let out = fixture.path("bioproject.xml");

    let summary = fixture.app(2).project_batch(&list, &out, &Quiet).unwrap();
    assert_eq!(summary.kind, BatchKind::Project);
    assert_eq!(summary.requested, 3);
    assert_eq!(summary.converted, 1);
    let skipped: Vec<_> = summary.skipped.iter().map(|s| s.accession.as_str()).collect();
    assert_eq!(skipped, vec!["PRJCA000002", "PRJCA000099"]);

    let xml = read(&out);
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Submission>\n"));
    assert!(xml.contains("<Comment>NGDC to DDBJ data transfer: BioProject</Comment>"));
    assert!(xml.contains("<Hold release_date=\"2030-01-01\"/>"));
    assert!(xml.contains("<AddData target_db=\"BioProject\">"));
    assert!(xml.contains("<Project schema_version=\"2.0\">"));
    assert!(xml.contains("<SPUID spuid_namespace=\"NGDC\">PRJCA000001</SPUID>"));
    assert!(xml.contains("<URL>https://ngdc.cncb.ac.cn/bioproject/browse/PRJCA000001</URL>"));
    assert!(xml.contains("<Publication id=\"31234567\">"));
    assert!(xml.contains("<DbType>ePubmed</DbType>"));
    assert!(xml.contains("<Grant GrantId=\"XDA19090000\">"));
    assert!(xml.contains("<ProjectTypeSubmission sample_scope=\"eMonoisolate\">"));
    assert!(xml.contains("<OrganismName>Mus musculus</OrganismName>"));
    assert!(xml.contains(
        "<DataType>Transcriptome or Gene expression</DataType>"
    ));
    assert!(xml.contains("<DataType>Other</DataType>"));
    assert!(xml.contains("<ReleaseDate>2021-01-01</ReleaseDate>"));
    assert!(xml.contains("<Middle>Q</Middle>"));
    assert!(!xml.contains("<Relevance>"));
    assert!(!xml.contains("PRJCA000002"));
}

#[test]
fn sample_batch_normalizes_attributes() {
    let fixture = Fixture::new();
    let list = fixture.write_list("samples.txt", "SAMC000001\nSAMC000002\nSAMC000003\n");
    let out = fixture.path("biosample.xml");

    let summary = fixture.app(3).sample_batch(&list, &out, &Quiet).unwrap();
    assert_eq!(summary.converted, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].accession, "SAMC000002");

    let xml = read(&out);
    assert!(xml.contains("<Comment>NGDC to DDBJ data transfer: BioSample</Comment>"));
    assert!(xml.contains("<SPUID spuid_namespace=\"NGDC\">SAMC000001: mouse-1</SPUID>"));
    assert!(xml.contains("<Package>Model.organism.animal.1.0</Package>"));
    assert!(xml.contains("<OrganismName>Mus musculus</OrganismName>"));
    assert!(xml.contains("<Attribute attribute_name=\"strain\">C57BL/6</Attribute>"));
    assert!(xml.contains("<Attribute attribute_name=\"age\">8 weeks</Attribute>"));
    assert!(xml.contains("<Attribute attribute_name=\"sex\">female</Attribute>"));
    assert!(xml.contains(
        "<Attribute attribute_name=\"collection_date\">2020-06-01</Attribute>"
    ));
    assert!(xml.contains("<Package>MIMS.me.soil.6.0</Package>"));
    assert!(xml.contains("<Attribute attribute_name=\"tillage\">drill</Attribute>"));
    assert!(!xml.contains("specimen_voucher"));
    assert!(!xml.contains("geo_loc_name"));
    assert!(!xml.contains("SAMC000002"));
}

#[test]
fn sample_output_attribute_order_follows_columns() {
    let fixture = Fixture::new();
    let list = fixture.write_list("samples.txt", "SAMC000001\n");
    let out = fixture.path("biosample.xml");
    fixture.app(1).sample_batch(&list, &out, &Quiet).unwrap();

    let xml = read(&out);
    let position = |needle: &str| xml.find(needle).unwrap();
    assert!(position("\"strain\"") < position("\"age\""));
    assert!(position("\"age\"") < position("\"sex\""));
    assert!(position("\"sex\"") < position("\"tissue\""));
    assert!(position("\"tissue\"") < position("\"collection_date\""));
}

#[test]
fn cra_batch_writes_one_file_per_unit() {
    let fixture = Fixture::new();
    let list = fixture.write_list("cra.txt", "CRA000003\nCRA000004\nCRA000404\n");
    let out_dir = fixture.path("dra");

    let summary = fixture.app(2).cra_batch(&list, &out_dir, &Quiet).unwrap();
    assert_eq!(summary.converted, 1);
    assert_eq!(summary.skipped.len(), 2);
    assert!(!out_dir.join("CRA000004.xml").exists());

    let xml = read(&out_dir.join("CRA000003.xml"));
    assert!(xml.contains("<Comment>GSA to DRA Data submission. GSA accession: CRA000003</Comment>"));
    assert!(xml.contains("<Description>missing</Description>"));
    assert!(xml.contains("<SubmissionDate>2021-01-15</SubmissionDate>"));
    assert_eq!(xml.matches("target_object=\"Experiment\"").count(), 2);
    assert_eq!(xml.matches("target_object=\"Run\"").count(), 2);
    assert!(xml.contains("<Attribute name=\"library_layout\">PAIRED</Attribute>"));
    assert!(xml.contains("<Attribute name=\"insert_size\">350</Attribute>"));
    assert!(xml.contains("<Attribute name=\"instrument_model\">Illumina NovaSeq 6000</Attribute>"));
    assert!(xml.contains("<File file_path=\"CRR000008_f1.fq.gz\">"));
    assert!(xml.contains("<MD5Checksum>1e1e</MD5Checksum>"));
    assert!(xml.contains("<FileType>FASTQ</FileType>"));
    assert!(xml.contains(
        "<SPUID spuid_namespace=\"NGDC\" db=\"BioProject\">PRJCA000001</SPUID>"
    ));
}

#[test]
fn cra_batch_never_overwrites() {
    let fixture = Fixture::new();
    let list = fixture.write_list("cra.txt", "CRA000003\n");
    let out_dir = fixture.path("dra");
    let app = fixture.app(1);

    app.cra_batch(&list, &out_dir, &Quiet).unwrap();
    let target = out_dir.join("CRA000003.xml");
    let first = fs::read(&target).unwrap();

    let summary = app.cra_batch(&list, &out_dir, &Quiet).unwrap();
    assert_eq!(summary.converted, 0);
    assert_eq!(summary.existing, vec!["CRA000003".to_string()]);
    assert_eq!(fs::read(&target).unwrap(), first);

    fs::write(&target, "hand edited").unwrap();
    app.cra_batch(&list, &out_dir, &Quiet).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "hand edited");
}

#[test]
fn thread_count_does_not_change_output() {
    let fixture = Fixture::new();
    let list = fixture.write_list("samples.txt", "SAMC000003\nSAMC000002\nSAMC000001\n");
    let single = fixture.path("one.xml");
    let many = fixture.path("many.xml");

    fixture.app(1).sample_batch(&list, &single, &Quiet).unwrap();
    fixture.app(8).sample_batch(&list, &many, &Quiet).unwrap();
    assert_eq!(read(&single), read(&many));

    let xml = read(&single);
    assert!(xml.find("SAMC000003: plot-3").unwrap() < xml.find("SAMC000001: mouse-1").unwrap());
}

#[test]
fn malformed_list_is_fatal_before_any_output() {
    let fixture = Fixture::new();
    let list = fixture.write_list("projects.txt", "PRJCA000001\nCRA000003\n");
    let out = fixture.path("bioproject.xml");

    let err = fixture.app(2).project_batch(&list, &out, &Quiet).unwrap_err();
    assert_matches!(err, GsaError::InvalidAccession { line: 2, expected: "PRJC", .. });
    assert!(!out.exists());
}

#[test]
fn unopenable_database_is_fatal() {
    let fixture = Fixture::new();
    let list = fixture.write_list("projects.txt", "PRJCA000001\n");
    let out = fixture.path("bioproject.xml");
    let absent = fixture.path("absent.sqlite");
    let app = App::new(
        SqliteAccessorFactory::new(absent.to_str().unwrap()),
        Assembler::new(common::header()),
        1,
        Indent::Tab,
    );

    let err = app.project_batch(&list, &out, &Quiet).unwrap_err();
    assert_matches!(err, GsaError::Database(_));
    assert!(!out.exists());
}

#[test]
fn assembled_documents_have_no_dangling_references() {
    let fixture = Fixture::new();
    let accessor = SqliteAccessor::open(&fixture.database).unwrap();
    let assembler = Assembler::new(common::header());

    let cra = accessor.cra(&"CRA000003".parse().unwrap()).unwrap().unwrap();
    let document = assembler.cra_document(&cra).unwrap();
    assert!(dangling_references(&document, CRA_EXTERNAL_DBS).is_empty());
    // Without the external list the BioProject/BioSample refs are reported.
    assert_eq!(dangling_references(&document, &[]).len(), 3);

    let sample = accessor.sample(&"SAMC000001".parse().unwrap()).unwrap().unwrap();
    let mut submission = assembler.submission(BatchKind::Sample);
    submission.push_child(assembler.sample_action(&sample, &accessor).unwrap());
    assert!(dangling_references(&submission, SAMPLE_EXTERNAL_DBS).is_empty());
}

#[test]
fn custom_namespace_and_relevance() {
    let fixture = Fixture::new();
    let list = fixture.write_list("projects.txt", "PRJCA000001\n");
    let out = fixture.path("bioproject.xml");
    let app = App::new(
        SqliteAccessorFactory::new(fixture.database.clone()),
        Assembler::new(common::header())
            .with_namespace("BIGD")
            .with_relevance(true),
        1,
        Indent::Spaces(2),
    );
    app.project_batch(&list, &out, &Quiet).unwrap();

    let xml = read(&out);
    assert!(xml.contains("<SPUID spuid_namespace=\"BIGD\">PRJCA000001</SPUID>"));
    assert!(xml.contains("<ModelOrganism>yes</ModelOrganism>"));
    assert!(xml.contains("\n  <Description>\n"));
}
