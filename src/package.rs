use std::fmt;

use serde::Serialize;

use crate::records::{AttrValue, SampleAttributes};

pub const HUMAN_TAXON_ID: i64 = 9606;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Package {
    PathogenClinical,
    PathogenEnvironmental,
    Microbe,
    ModelOrganismAnimal,
    Plant,
    Virus,
    MetagenomeEnvironmental,
    MimsHumanGut,
    MimsSoil,
    MimsWater,
}

impl Package {
    pub fn as_str(self) -> &'static str {
        match self {
            Package::PathogenClinical => "Pathogen.cl.1.0",
            Package::PathogenEnvironmental => "Pathogen.env.1.0",
            Package::Microbe => "Microbe.1.0",
            Package::ModelOrganismAnimal => "Model.organism.animal.1.0",
            Package::Plant => "Plant.1.0",
            Package::Virus => "Virus.1.0",
            Package::MetagenomeEnvironmental => "Metagenome.environmental.1.0",
            Package::MimsHumanGut => "MIMS.me.human-gut.6.0",
            Package::MimsSoil => "MIMS.me.soil.6.0",
            Package::MimsWater => "MIMS.me.water.6.0",
        }
    }

    pub fn collision_rule(self) -> CollisionRule {
        match self {
            Package::MetagenomeEnvironmental | Package::Microbe => CollisionRule::Exclusive {
                preferred: "host_organism_id",
                other: "isolation_source",
            },
            Package::PathogenClinical => CollisionRule::Exclusive {
                preferred: "isolate",
                other: "strain",
            },
            Package::MimsHumanGut => CollisionRule::Force {
                key: "host_organism_id",
                value: HUMAN_TAXON_ID,
            },
            Package::Virus => CollisionRule::Exclusive {
                preferred: "host_organism_id",
                other: "lab_host",
            },
            Package::PathogenEnvironmental
            | Package::ModelOrganismAnimal
            | Package::Plant
            | Package::MimsSoil
            | Package::MimsWater => CollisionRule::None,
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Code 5 (human) has an attribute table but no package.
pub fn resolve_package(sample_type_id: i64) -> Option<Package> {
    let package = match sample_type_id {
        1 => Package::PathogenClinical,
        2 => Package::PathogenEnvironmental,
        3 => Package::Microbe,
        4 => Package::ModelOrganismAnimal,
        6 => Package::Plant,
        7 => Package::Virus,
        8 => Package::MetagenomeEnvironmental,
        9 => Package::MimsHumanGut,
        10 => Package::MimsSoil,
        11 => Package::MimsWater,
        _ => return None,
    };
    Some(package)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    None,
    Exclusive {
        preferred: &'static str,
        other: &'static str,
    },
    Force { key: &'static str, value: i64 },
}

impl CollisionRule {
    pub fn apply(self, attributes: &mut SampleAttributes) {
        match self {
            CollisionRule::None => {}
            CollisionRule::Exclusive { preferred, other } => {
                if attributes.is_present(preferred) {
                    attributes.remove(other);
                } else {
                    attributes.remove(preferred);
                }
            }
            CollisionRule::Force { key, value } => {
                attributes.insert(key, AttrValue::Integer(value));
            }
        }
    }
}
