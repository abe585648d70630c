use std::sync::LazyLock;

use regex::Regex;

use crate::accessor::TaxonomyLookup;
use crate::package::Package;
use crate::records::{AttrValue, SampleAttributes};
use crate::vocab;

static AGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:(second|minute|hour|day|week|month|year)s?)?$")
        .expect("age pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAttribute {
    pub name: &'static str,
    pub value: String,
}

pub fn normalize(
    key: &str,
    value: &AttrValue,
    siblings: &SampleAttributes,
    taxonomy: &dyn TaxonomyLookup,
) -> Option<NormalizedAttribute> {
    let name = *vocab::ATTRIBUTE_CROSSWALK.get(key)?;
    if value.is_blank() {
        return None;
    }

    let normalized = match key {
        "collection_date" => collection_date(value),
        "age" => age(value, siblings.get("age_unit")),
        "host_age" => age(value, siblings.get("host_age_unit")),
        "host_organism_id" => host_organism(value, taxonomy),
        "culture_collection" | "specimen_voucher" => None,
        "tillage" => coded(&vocab::TILLAGE_CODES, value),
        "sex" | "host_sex" | "host_sex_id" => coded(&vocab::SEX_CODES, value),
        "current_land_use_id" => coded(&vocab::LAND_USE_CODES, value),
        "oxygenation_status" | "oxygenation_status_id" => {
            coded(&vocab::OXYGENATION_STATUS_CODES, value)
        }
        "relationship_oxygen_id" => coded(&vocab::OXYGEN_RELATIONSHIP_CODES, value),
        _ => Some(value.to_string()),
    }?;

    Some(NormalizedAttribute {
        name,
        value: normalized,
    })
}

pub fn normalize_all(
    package: Package,
    attributes: &SampleAttributes,
    taxonomy: &dyn TaxonomyLookup,
) -> Vec<NormalizedAttribute> {
    let mut resolved = attributes.clone();
    package.collision_rule().apply(&mut resolved);
    resolved
        .iter()
        .filter_map(|(key, value)| normalize(key, value, &resolved, taxonomy))
        .collect()
}

fn collection_date(value: &AttrValue) -> Option<String> {
    match value {
        AttrValue::Text(text) => text
            .split(' ')
            .next()
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .map(String::from),
        AttrValue::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        AttrValue::DateTime(datetime) => Some(datetime.format("%Y-%m-%d").to_string()),
        AttrValue::Integer(_) | AttrValue::Real(_) => None,
    }
}

fn age(value: &AttrValue, sibling_unit: Option<&AttrValue>) -> Option<String> {
    let text = value.to_string();
    let captures = AGE_RE.captures(text.trim())?;
    let number = captures.get(1)?.as_str();
    if let Some(unit) = captures.get(2) {
        return Some(format!("{number} {}", unit.as_str()));
    }
    let unit = sibling_unit
        .filter(|unit| !unit.is_blank())?
        .to_string();
    Some(format!("{number} {}", unit.trim()))
}

fn host_organism(value: &AttrValue, taxonomy: &dyn TaxonomyLookup) -> Option<String> {
    let taxon_id = value.as_integer().filter(|id| *id > 0)?;
    taxonomy.scientific_name(taxon_id)
}

fn coded(
    table: &std::collections::HashMap<&'static str, &'static str>,
    value: &AttrValue,
) -> Option<String> {
    let code = value.to_string();
    table.get(code.trim()).map(|label| label.to_string())
}
