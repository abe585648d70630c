use crate::domain::{CraAccession, ProjectAccession, SampleAccession};
use crate::error::GsaError;
use crate::records::{CraUnit, Project, Sample};

pub trait TaxonomyLookup {
    fn scientific_name(&self, taxon_id: i64) -> Option<String>;
}

pub trait GsaAccessor: TaxonomyLookup + Send {
    fn project(&self, accession: &ProjectAccession) -> Result<Option<Project>, GsaError>;
    fn sample(&self, accession: &SampleAccession) -> Result<Option<Sample>, GsaError>;
    fn cra(&self, accession: &CraAccession) -> Result<Option<CraUnit>, GsaError>;
}

pub trait AccessorFactory: Sync {
    type Accessor: GsaAccessor;

    fn open(&self) -> Result<Self::Accessor, GsaError>;
}
