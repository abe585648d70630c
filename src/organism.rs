const METAGENOME_SUFFIX: &str = "metagenome";
const MICROBE_FALLBACK: &str = "Bacteria";
const MICROBE_REJECTED_NAMES: &[&str] = &["Microbiota", "Eukaryota", "unclassified sequences"];

fn metagenome_label(sample_type_id: i64) -> Option<&'static str> {
    match sample_type_id {
        8 => Some("metagenome"),
        9 => Some("human gut metagenome"),
        10 => Some("soil metagenome"),
        11 => Some("water metagenome"),
        _ => None,
    }
}

pub fn resolve_organism_name(sample_type_id: i64, taxon_name: &str) -> String {
    if let Some(label) = metagenome_label(sample_type_id) {
        if taxon_name.ends_with(METAGENOME_SUFFIX) {
            return taxon_name.to_string();
        }
        return label.to_string();
    }

    if sample_type_id == 3
        && (taxon_name.ends_with(METAGENOME_SUFFIX) || MICROBE_REJECTED_NAMES.contains(&taxon_name))
    {
        return MICROBE_FALLBACK.to_string();
    }

    taxon_name.to_string()
}
