use chrono::NaiveDate;
use serde::Serialize;

use crate::accessor::TaxonomyLookup;
use crate::attributes::normalize_all;
use crate::domain::BatchKind;
use crate::error::GsaError;
use crate::organism::resolve_organism_name;
use crate::package::resolve_package;
use crate::publication::{Grant, MISSING, Publication, format_grants, format_publications};
use crate::records::{Contact, CraUnit, Project, Run, Sample};
use crate::vocab;
use crate::xml::Element;

pub const DEFAULT_SPUID_NAMESPACE: &str = "NGDC";
const PROJECT_BROWSE_URL: &str = "https://ngdc.cncb.ac.cn/bioproject/browse/";
const GSA_DB: &str = "GSA";

pub const CRA_EXTERNAL_DBS: &[&str] = &["BioProject", "BioSample"];
pub const SAMPLE_EXTERNAL_DBS: &[&str] = &["BioProject"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionHeader {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization: String,
    pub hold_release_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct Assembler {
    namespace: String,
    emit_relevance: bool,
    header: SubmissionHeader,
}

impl Assembler {
    pub fn new(header: SubmissionHeader) -> Self {
        Self {
            namespace: DEFAULT_SPUID_NAMESPACE.to_string(),
            emit_relevance: false,
            header,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_relevance(mut self, emit_relevance: bool) -> Self {
        self.emit_relevance = emit_relevance;
        self
    }

    fn spuid(&self, value: &str) -> Element {
        Element::text("SPUID", value.trim()).with_attr("spuid_namespace", &self.namespace)
    }

    fn spuid_in(&self, db: &str, value: &str) -> Element {
        self.spuid(value).with_attr("db", db)
    }

    fn identifier(&self, value: &str) -> Element {
        Element::new("Identifier").with_child(self.spuid(value))
    }

    fn attribute_ref(&self, name: &str, db: &str, value: &str) -> Element {
        Element::new("AttributeRefId")
            .with_attr("name", name)
            .with_child(Element::new("RefId").with_child(self.spuid_in(db, value)))
    }

    pub fn submission(&self, kind: BatchKind) -> Element {
        Element::new("Submission").with_child(self.description(kind))
    }

    fn description(&self, kind: BatchKind) -> Element {
        let header = &self.header;
        let contact = Element::new("Contact")
            .with_attr("email", &header.email)
            .with_child(
                Element::new("Name")
                    .with_child(Element::text("First", &header.first_name))
                    .with_child(Element::text("Last", &header.last_name)),
            );
        let organization = Element::new("Organization")
            .with_attr("role", "owner")
            .with_attr("type", "institute")
            .with_child(Element::text("Name", &header.organization))
            .with_child(contact);

        Element::new("Description")
            .with_child(Element::text(
                "Comment",
                format!("NGDC to DDBJ data transfer: {}", kind.target_db()),
            ))
            .with_child(organization)
            .with_child(
                Element::new("Hold")
                    .with_attr("release_date", format_date(header.hold_release_date)),
            )
    }

    fn add_data(&self, target_db: &str, spuid: &str, content: Element) -> Element {
        Element::new("AddData")
            .with_attr("target_db", target_db)
            .with_child(
                Element::new("Data")
                    .with_attr("content_type", "xml")
                    .with_child(Element::new("XmlContent").with_child(content)),
            )
            .with_child(self.identifier(spuid))
    }

    pub fn project_action(&self, project: &Project) -> Result<Element, GsaError> {
        let accession = project.accession.as_str();
        let release_date = project.release_date.ok_or_else(|| missing(accession, "release date"))?;
        let contact = project
            .contact
            .as_ref()
            .ok_or_else(|| missing(accession, "contact"))?;

        let mut descriptor = Element::new("Descriptor")
            .with_child(Element::text("Title", project.title.trim()))
            .with_child(
                Element::new("Description").with_child(Element::text("p", project.description.trim())),
            )
            .with_child(
                Element::new("ExternalLink").with_child(Element::text(
                    "URL",
                    format!("{PROJECT_BROWSE_URL}{accession}"),
                )),
            );
        for publication in format_publications(&project.publications) {
            descriptor.push_child(publication_element(&publication));
        }
        for grant in format_grants(&project.grants) {
            descriptor.push_child(grant_element(&grant));
        }
        if self.emit_relevance
            && let Some(relevance) = project.relevance.as_deref()
        {
            descriptor.push_child(relevance_element(relevance));
        }

        let mut submission_type = Element::new("ProjectTypeSubmission")
            .with_attr("sample_scope", vocab::sample_scope(project.sample_scope.as_deref()));
        if let Some(organism) = project.primary_organism() {
            submission_type.push_child(
                Element::new("Organism").with_child(Element::text("OrganismName", organism)),
            );
        }
        let mut data_types = Element::new("ProjectDataType");
        for data_type in vocab::map_data_types(project.data_types.iter().map(String::as_str)) {
            data_types.push_child(Element::text("DataType", data_type));
        }
        submission_type.push_child(data_types);

        let content = Element::new("Project")
            .with_attr("schema_version", "2.0")
            .with_child(Element::new("ProjectID").with_child(self.spuid(accession)))
            .with_child(descriptor)
            .with_child(Element::new("ProjectType").with_child(submission_type));

        let add_data = self
            .add_data(BatchKind::Project.target_db(), accession, content)
            .with_child(Element::text("ReleaseDate", format_date(release_date)))
            .with_child(submitter(contact));
        Ok(Element::new("Action").with_child(add_data))
    }

    pub fn sample_action(
        &self,
        sample: &Sample,
        taxonomy: &dyn TaxonomyLookup,
    ) -> Result<Element, GsaError> {
        let accession = sample.accession.as_str();
        let package =
            resolve_package(sample.sample_type_id).ok_or_else(|| GsaError::UnsupportedSampleType {
                accession: accession.to_string(),
                code: sample.sample_type_id,
            })?;
        let taxon_name = sample
            .taxon_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| missing(accession, "taxon name"))?;
        let project = sample
            .project
            .as_ref()
            .ok_or_else(|| missing(accession, "related project"))?;
        let release_date = sample.release_date.ok_or_else(|| missing(accession, "release date"))?;
        let contact = sample
            .contact
            .as_ref()
            .ok_or_else(|| missing(accession, "contact"))?;

        let spuid = sample.spuid();
        let mut attributes = Element::new("Attributes");
        for attribute in normalize_all(package, &sample.attributes, taxonomy) {
            attributes.push_child(
                Element::text("Attribute", attribute.value).with_attr("attribute_name", attribute.name),
            );
        }

        let content = Element::new("BioSample")
            .with_attr("schema_version", "2.0")
            .with_child(Element::new("SampleId").with_child(self.spuid(&spuid)))
            .with_child(Element::new("Descriptor").with_child(Element::text("Title", &sample.name)))
            .with_child(Element::new("Organism").with_child(Element::text(
                "OrganismName",
                resolve_organism_name(sample.sample_type_id, taxon_name),
            )))
            .with_child(Element::text("Package", package.as_str()))
            .with_child(attributes);

        let add_data = self
            .add_data(BatchKind::Sample.target_db(), &spuid, content)
            .with_child(
                Element::new("RelatedProject")
                    .with_child(Element::new("ProjectID").with_child(self.spuid(project.as_str()))),
            )
            .with_child(Element::text("ReleaseDate", format_date(release_date)))
            .with_child(submitter(contact));
        Ok(Element::new("Action").with_child(add_data))
    }

    pub fn cra_document(&self, cra: &CraUnit) -> Result<Element, GsaError> {
        let accession = cra.accession.as_str();
        let project = cra
            .project
            .as_ref()
            .ok_or_else(|| missing(accession, "related project"))?;
        let release_date = cra.release_date.ok_or_else(|| missing(accession, "release date"))?;
        let contact = cra
            .contact
            .as_ref()
            .ok_or_else(|| missing(accession, "contact"))?;
        if cra.runs.is_empty() {
            return Err(GsaError::NoRuns(accession.to_string()));
        }

        let descriptor = Element::new("Descriptor")
            .with_child(Element::text(
                "Comment",
                format!("GSA to DRA Data submission. GSA accession: {accession}"),
            ))
            .with_child(Element::text("Title", non_blank_or_missing(cra.title.as_deref())))
            .with_child(Element::text(
                "Description",
                non_blank_or_missing(cra.description.as_deref()),
            ))
            .with_child(submitter(contact))
            .with_child(Element::text(
                "SubmissionDate",
                cra.submit_date.map(format_date).unwrap_or_else(|| MISSING.to_string()),
            ))
            .with_child(Element::text("ReleaseDate", format_date(release_date)))
            .with_child(Element::new("Identifier").with_child(self.spuid_in(GSA_DB, accession)))
            .with_child(self.attribute_ref("BioProject", "BioProject", project.as_str()));

        // One Experiment action per run, even when runs share an experiment.
        let mut document = Element::new("Submission").with_child(descriptor);
        for run in &cra.runs {
            document.push_child(self.experiment_action(run));
        }
        for run in &cra.runs {
            document.push_child(self.run_action(run));
        }
        Ok(document)
    }

    fn experiment_action(&self, run: &Run) -> Element {
        let mut add_data = Element::new("AddData").with_attr("target_object", "Experiment");
        for (name, value) in run.experiment.fields() {
            add_data.push_child(Element::text("Attribute", value).with_attr("name", name));
        }
        let add_data = add_data
            .with_child(self.attribute_ref("BioSample", "BioSample", &run.sample_accession))
            .with_child(
                Element::new("Identifier")
                    .with_child(self.spuid_in(GSA_DB, &run.experiment_accession)),
            );
        Element::new("Action").with_child(add_data)
    }

    fn run_action(&self, run: &Run) -> Element {
        let mut add_files = Element::new("AddFiles")
            .with_attr("target_object", "Run")
            .with_child(Element::text("Title", &run.sample_title))
            .with_child(Element::text("FileType", run.data_type.file_type()));
        for file in &run.files {
            add_files.push_child(
                Element::new("File")
                    .with_attr("file_path", &file.archived_file_name)
                    .with_child(Element::text("MD5Checksum", &file.md5)),
            );
        }
        let add_files = add_files
            .with_child(self.attribute_ref("Experiment", GSA_DB, &run.experiment_accession))
            .with_child(
                Element::new("Identifier").with_child(self.spuid_in(GSA_DB, &run.accession)),
            );
        Element::new("Action").with_child(add_files)
    }
}

fn missing(accession: &str, field: &'static str) -> GsaError {
    GsaError::MissingField {
        accession: accession.to_string(),
        field,
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn non_blank_or_missing(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn submitter(contact: &Contact) -> Element {
    let mut name = Element::new("Name").with_child(Element::text("First", &contact.first_name));
    if let Some(middle) = contact
        .middle_name
        .as_deref()
        .filter(|middle| !middle.trim().is_empty())
    {
        name.push_child(Element::text("Middle", middle));
    }
    name.push_child(Element::text("Last", &contact.last_name));

    Element::new("Submitter")
        .with_child(Element::text("Organization", &contact.organization))
        .with_child(Element::text("Email", &contact.email))
        .with_child(name)
}

fn publication_element(publication: &Publication) -> Element {
    Element::new("Publication")
        .with_attr("id", publication.id.value())
        .with_child(
            Element::new("Reference")
                .with_child(Element::text("Title", &publication.article_title))
                .with_child(Element::text("Journal", &publication.journal))
                .with_child(Element::text("Year", &publication.year))
                .with_child(Element::text("Month", &publication.month)),
        )
        .with_child(Element::text("DbType", publication.id.db_type()))
}

fn grant_element(grant: &Grant) -> Element {
    Element::new("Grant")
        .with_attr("GrantId", &grant.grant_id)
        .with_child(Element::text("Title", &grant.title))
        .with_child(
            Element::text("Agency", &grant.agency).with_attr("abbr", &grant.agency_abbr),
        )
}

fn relevance_element(raw: &str) -> Element {
    let bucket = vocab::relevance(raw);
    let value = if bucket == "Other" { raw.trim() } else { "yes" };
    Element::new("Relevance").with_child(Element::text(bucket, value))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::domain::RunDataType;
    use crate::records::{
        AttrValue, ExperimentAttributes, RawGrant, RawPublication, RunFile, SampleAttributes,
    };
    use crate::xml::{dangling_references, to_string, Indent};

    struct HumanOnlyTaxonomy;

    impl TaxonomyLookup for HumanOnlyTaxonomy {
        fn scientific_name(&self, taxon_id: i64) -> Option<String> {
            (taxon_id == 9606).then(|| "Homo sapiens".to_string())
        }
    }

    fn header() -> SubmissionHeader {
        SubmissionHeader {
            first_name: "Yanqing".to_string(),
            last_name: "Wang".to_string(),
            email: "curator@example.org".to_string(),
            organization: "China National Center for Bioinformation".to_string(),
            hold_release_date: NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(),
        }
    }

    fn contact() -> Contact {
        Contact {
            first_name: "Li".to_string(),
            middle_name: None,
            last_name: "Zhang".to_string(),
            email: "li@example.org".to_string(),
            organization: "BIG".to_string(),
        }
    }

    fn project() -> Project {
        Project {
            accession: "PRJCA000902".parse().unwrap(),
            title: " Rice pan-genome ".to_string(),
            description: "Resequencing of cultivars".to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 1, 2),
            taxonomy: Some("Oryza sativa, Oryza rufipogon".to_string()),
            sample_scope: Some("Multiisolate".to_string()),
            data_types: vec![
                "Whole genome sequencing".to_string(),
                "Genome sequencing".to_string(),
                "Something else".to_string(),
            ],
            relevance: Some("agricultural".to_string()),
            publications: vec![RawPublication {
                pubmed_id: Some("32123456".to_string()),
                doi: Some("10.1038/s41586-020-1234-5".to_string()),
                article_title: Some("A rice study".to_string()),
                ..RawPublication::default()
            }],
            grants: vec![RawGrant {
                grant_id: Some("XDA24000000".to_string()),
                agency: Some("Chinese Academy of Sciences".to_string()),
                agency_abbr: Some("CAS".to_string()),
                title: None,
            }],
            contact: Some(contact()),
        }
    }

    fn sample(sample_type_id: i64) -> Sample {
        Sample {
            accession: "SAMC000123".parse().unwrap(),
            name: "gut-01".to_string(),
            title: Some("Gut sample".to_string()),
            sample_type_id,
            release_date: NaiveDate::from_ymd_opt(2021, 6, 30),
            taxon_id: Some(408170),
            taxon_name: Some("environmental sample".to_string()),
            attributes: [
                ("host_organism_id", AttrValue::Integer(10090)),
                ("age", AttrValue::from("35")),
                ("age_unit", AttrValue::from("years")),
                ("specimen_voucher", AttrValue::from("V1")),
                ("sample_id", AttrValue::Integer(123)),
            ]
            .into_iter()
            .collect::<SampleAttributes>(),
            project: Some("PRJCA000902".parse().unwrap()),
            contact: Some(contact()),
        }
    }

    fn run(accession: &str, experiment: &str) -> Run {
        Run {
            accession: accession.to_string(),
            experiment_accession: experiment.to_string(),
            sample_accession: "SAMC000123".to_string(),
            sample_title: "Gut sample".to_string(),
            data_type: RunDataType::Fastq,
            experiment: ExperimentAttributes {
                title: "WGS of gut".to_string(),
                instrument_model: "Illumina NovaSeq 6000".to_string(),
                library_source: "GENOMIC".to_string(),
                library_selection: "RANDOM".to_string(),
                library_strategy: "WGS".to_string(),
                library_name: MISSING.to_string(),
                insert_size: "350".to_string(),
                library_construction_protocol: MISSING.to_string(),
                library_layout: "PAIRED".to_string(),
            },
            files: vec![
                RunFile {
                    archived_file_name: format!("{accession}_f1.fq.gz"),
                    md5: "0123456789abcdef0123456789abcdef".to_string(),
                },
                RunFile {
                    archived_file_name: format!("{accession}_r2.fq.gz"),
                    md5: "fedcba9876543210fedcba9876543210".to_string(),
                },
            ],
        }
    }

    fn cra() -> CraUnit {
        CraUnit {
            accession: "CRA000095".parse().unwrap(),
            title: None,
            description: Some("Gut metagenomes".to_string()),
            submit_date: None,
            release_date: NaiveDate::from_ymd_opt(2021, 7, 1),
            project: Some("PRJCA000902".parse().unwrap()),
            contact: Some(contact()),
            runs: vec![
                run("CRR000001", "CRX000001"),
                run("CRR000002", "CRX000001"),
                run("CRR000003", "CRX000002"),
            ],
        }
    }

    fn texts(root: &Element, name: &str) -> Vec<String> {
        root.descendants(name)
            .into_iter()
            .map(Element::text_content)
            .collect()
    }

    #[test]
    fn submission_header() {
        let assembler = Assembler::new(header());
        let root = assembler.submission(BatchKind::Sample);
        assert_eq!(
            texts(&root, "Comment"),
            vec!["NGDC to DDBJ data transfer: BioSample"]
        );
        let hold = root.descendants("Hold")[0];
        assert_eq!(hold.attribute("release_date"), Some("2025-03-17"));
        let organization = root.descendants("Organization")[0];
        assert_eq!(organization.attribute("role"), Some("owner"));
        assert_eq!(
            root.descendants("Contact")[0].attribute("email"),
            Some("curator@example.org")
        );
    }

    #[test]
    fn project_action_layout() {
        let assembler = Assembler::new(header());
        let action = assembler.project_action(&project()).unwrap();
        let add_data = action.child("AddData").unwrap();
        assert_eq!(add_data.attribute("target_db"), Some("BioProject"));
        assert_eq!(
            texts(add_data.child("Identifier").unwrap(), "SPUID"),
            vec!["PRJCA000902"]
        );
        assert_eq!(add_data.child("ReleaseDate").unwrap().text_content(), "2020-01-02");
        assert!(add_data.child("Submitter").is_some());

        assert_eq!(texts(&action, "URL"), vec![
            "https://ngdc.cncb.ac.cn/bioproject/browse/PRJCA000902"
        ]);
        assert_eq!(texts(&action, "OrganismName"), vec!["Oryza sativa"]);
        assert_eq!(
            texts(&action, "DataType"),
            vec!["Genome sequencing", "Other"]
        );
        let scope = action.descendants("ProjectTypeSubmission")[0];
        assert_eq!(scope.attribute("sample_scope"), Some("eMultiisolate"));
        assert_eq!(texts(&action, "DbType"), vec!["ePubmed"]);
        assert_eq!(
            action.descendants("Publication")[0].attribute("id"),
            Some("32123456")
        );
        assert_eq!(texts(&action, "Journal"), vec![MISSING]);
        let grant = action.descendants("Grant")[0];
        assert_eq!(grant.attribute("GrantId"), Some("XDA24000000"));
        assert_eq!(
            grant.child("Agency").unwrap().attribute("abbr"),
            Some("CAS")
        );
        assert!(action.descendants("Relevance").is_empty());
        assert!(action.descendants("Middle").is_empty());
    }

    #[test]
    fn project_relevance_when_enabled() {
        let assembler = Assembler::new(header()).with_relevance(true);
        let action = assembler.project_action(&project()).unwrap();
        let relevance = action.descendants("Relevance")[0];
        assert_eq!(relevance.child("Agricultural").unwrap().text_content(), "yes");
    }

    #[test]
    fn project_without_contact_skipped() {
        let mut project = project();
        project.contact = None;
        let err = Assembler::new(header()).project_action(&project).unwrap_err();
        assert_matches!(err, GsaError::MissingField { field: "contact", .. });
    }

    #[test]
    fn sample_action_layout() {
        let assembler = Assembler::new(header()).with_namespace("BIGD");
        let action = assembler.sample_action(&sample(9), &HumanOnlyTaxonomy).unwrap();
        assert_eq!(texts(&action, "Package"), vec!["MIMS.me.human-gut.6.0"]);
        assert_eq!(texts(&action, "OrganismName"), vec!["human gut metagenome"]);
        assert_eq!(texts(&action, "Title"), vec!["gut-01"]);

        let attributes: Vec<_> = action
            .descendants("Attribute")
            .into_iter()
            .map(|attr| {
                (
                    attr.attribute("attribute_name").unwrap().to_string(),
                    attr.text_content(),
                )
            })
            .collect();
        assert_eq!(
            attributes,
            vec![
                ("host".to_string(), "Homo sapiens".to_string()),
                ("age".to_string(), "35 years".to_string()),
            ]
        );

        let spuids = texts(&action, "SPUID");
        assert!(spuids.contains(&"SAMC000123: gut-01".to_string()));
        assert!(spuids.contains(&"PRJCA000902".to_string()));
        assert!(
            action
                .descendants("SPUID")
                .iter()
                .all(|spuid| spuid.attribute("spuid_namespace") == Some("BIGD"))
        );
    }

    #[test]
    fn human_sample_type_is_unsupported() {
        let err = Assembler::new(header())
            .sample_action(&sample(5), &HumanOnlyTaxonomy)
            .unwrap_err();
        assert_matches!(err, GsaError::UnsupportedSampleType { code: 5, .. });
    }

    #[test]
    fn sample_without_related_project_skipped() {
        let mut sample = sample(9);
        sample.project = None;
        let err = Assembler::new(header())
            .sample_action(&sample, &HumanOnlyTaxonomy)
            .unwrap_err();
        assert_matches!(err, GsaError::MissingField { field: "related project", .. });
    }

    #[test]
    fn cra_document_layout() {
        let document = Assembler::new(header()).cra_document(&cra()).unwrap();
        let children: Vec<_> = document.elements().map(Element::name).collect();
        assert_eq!(
            children,
            vec!["Descriptor", "Action", "Action", "Action", "Action", "Action", "Action"]
        );

        let descriptor = document.child("Descriptor").unwrap();
        assert_eq!(descriptor.child("Title").unwrap().text_content(), MISSING);
        assert_eq!(descriptor.child("SubmissionDate").unwrap().text_content(), MISSING);
        assert_eq!(descriptor.child("ReleaseDate").unwrap().text_content(), "2021-07-01");

        let experiments: Vec<_> = document
            .descendants("AddData")
            .into_iter()
            .map(|add_data| add_data.attribute("target_object"))
            .collect();
        assert_eq!(experiments, vec![Some("Experiment"); 3]);
        let first = document.descendants("AddData")[0];
        assert_eq!(first.descendants("Attribute").len(), 9);

        let runs = document.descendants("AddFiles");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].child("FileType").unwrap().text_content(), "FASTQ");
        assert_eq!(runs[0].descendants("File").len(), 2);
        assert_eq!(
            runs[0].descendants("File")[0].attribute("file_path"),
            Some("CRR000001_f1.fq.gz")
        );
    }

    #[test]
    fn shared_experiment_emitted_for_each_run() {
        let mut unit = cra();
        unit.runs.truncate(2);
        let document = Assembler::new(header()).cra_document(&unit).unwrap();
        let experiment_ids: Vec<_> = document
            .descendants("AddData")
            .into_iter()
            .map(|add_data| {
                let identifier = add_data.child("Identifier").unwrap();
                identifier.child("SPUID").unwrap().text_content()
            })
            .collect();
        assert_eq!(experiment_ids, vec!["CRX000001", "CRX000001"]);
        assert_eq!(document.descendants("AddFiles").len(), 2);
    }

    #[test]
    fn cra_document_has_no_dangling_references() {
        let document = Assembler::new(header()).cra_document(&cra()).unwrap();
        assert!(dangling_references(&document, CRA_EXTERNAL_DBS).is_empty());
    }

    #[test]
    fn cra_without_runs_skipped() {
        let mut unit = cra();
        unit.runs.clear();
        let err = Assembler::new(header()).cra_document(&unit).unwrap_err();
        assert_matches!(err, GsaError::NoRuns(_));
    }

    #[test]
    fn middle_name_emitted_when_present() {
        let mut unit = cra();
        if let Some(contact) = unit.contact.as_mut() {
            contact.middle_name = Some("Q".to_string());
        }
        let document = Assembler::new(header()).cra_document(&unit).unwrap();
        let xml = to_string(&document, Indent::Tab).unwrap();
        assert!(xml.contains("<Middle>Q</Middle>"));
    }
}
