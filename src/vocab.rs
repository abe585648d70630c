use std::collections::HashMap;
use std::sync::LazyLock;

pub static ATTRIBUTE_CROSSWALK: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        [
            ("cultivar", "cultivar"),
            ("biomaterial_provider", "biomaterial_provider"),
            ("tissue", "tissue"),
            ("age", "age"),
            ("cell_line", "cell_line"),
            ("cell_type", "cell_type"),
            ("collected_by", "collected_by"),
            ("collection_date", "collection_date"),
            ("culture_collection", "culture_collection"),
            ("dev_stage", "dev_stage"),
            ("disease", "disease"),
            ("disease_stage", "disease_stage"),
            ("genotype", "genotype"),
            ("growth_protocol", "growth_protocol"),
            ("height_length", "height_or_length"),
            ("isolation_source", "isolation_source"),
            ("latitude_longitude", "lat_lon"),
            ("phenotype", "phenotype"),
            ("population", "population"),
            ("specimen_voucher", "specimen_voucher"),
            ("treatment", "treatment"),
            ("isolate", "isolate"),
            ("strain", "strain"),
            ("host_organism_id", "host"),
            ("lab_host", "lab_host"),
            ("geographic_location", "geo_loc_name"),
            ("altitude", "altitude"),
            ("depth", "depth"),
            ("host_tissue_sampled", "host_tissue_sampled"),
            ("identified_by", "identified_by"),
            ("passage_history", "passage_history"),
            ("sample_size", "samp_size"),
            ("serotype", "serotype"),
            ("serovar", "serovar"),
            ("subgroup", "subgroup"),
            ("subtype", "subtype"),
            ("host_disease", "host_disease"),
            ("host_age", "host_age"),
            ("host_description", "host_description"),
            ("host_disease_outcome", "host_disease_outcome"),
            ("host_disease_stage", "host_disease_stage"),
            ("host_health_state", "host_health_state"),
            ("host_subject_id", "host_subject_id"),
            ("pathotype", "pathotype"),
            ("breed", "breed"),
            ("birth_date", "birth_date"),
            ("birth_location", "birth_location"),
            ("breed_history", "breeding_history"),
            ("breed_method", "breeding_method"),
            ("cell_subtype", "cell_subtype"),
            ("death_date", "death_date"),
            ("health_state", "health_state"),
            ("storage_conditions", "store_cond"),
            ("stud_book_number", "stud_book_number"),
            ("elevation", "elev"),
            ("agrochemical_additions", "agrochem_addition"),
            ("aluminium_saturation", "al_sat"),
            ("aluminium_saturation_method", "al_sat_meth"),
            ("annual_seasonal_precipitation", "annual_season_precpt"),
            ("annual_seasonal_temperature", "annual_season_temp"),
            ("crop_rotation", "crop_rotation"),
            ("current_vegetation", "cur_vegetation"),
            ("current_vegetation_method", "cur_vegetation_meth"),
            ("drainage_classification", "drainage_class"),
            ("extreme_event", "extreme_event"),
            ("extreme_salinity", "extreme_salinity"),
            ("fao_classification", "fao_class"),
            ("fire", "fire"),
            ("flooding", "flooding"),
            ("heavy_metals", "heavy_metals"),
            ("heavy_metals_method", "heavy_metals_meth"),
            ("horizon", "horizon"),
            ("horizon_method", "horizon_meth"),
            ("links_additional_analysis", "link_addit_analys"),
            ("link_classification_information", "link_class_info"),
            ("link_climate_information", "link_climate_info"),
            ("local_classification", "local_class"),
            ("local_classification_method", "local_class_meth"),
            ("microbial_biomass", "microbial_biomass"),
            ("microbial_biomass_method", "microbial_biomass_meth"),
            ("miscellaneous_parameter", "misc_param"),
            ("ph", "ph"),
            ("ph_method", "ph_meth"),
            ("pooling_dna_extracts", "pool_dna_extracts"),
            ("previous_land_use", "previous_land_use"),
            ("previous_land_use_method", "previous_land_use_meth"),
            ("profile_position", "profile_position"),
            ("salinity_method", "salinity_meth"),
            ("sieving", "sieving"),
            ("slope_aspect", "slope_aspect"),
            ("soil_type", "soil_type"),
            ("slope_gradient", "slope_gradient"),
            ("soil_type_method", "soil_type_meth"),
            ("texture", "texture"),
            ("texture_method", "texture_meth"),
            ("tillage", "tillage"),
            ("total_n_method", "tot_n_meth"),
            ("total_nitrogen", "tot_nitro"),
            ("total_organic_carbon_method", "tot_org_c_meth"),
            ("total_organic_carbon", "tot_org_carb"),
            ("water_content_soil", "water_content_soil"),
            ("water_content_soil_method", "water_content_soil_meth"),
            ("reference_biomaterial", "ref_biomaterial"),
            ("sample_collection_device", "samp_collect_device"),
            ("sample_material_processing", "samp_mat_process"),
            ("source_material_identifiers", "source_material_id"),
            ("description", "description"),
            ("chemical_administration", "chem_administration"),
            ("ethnicity", "ethnicity"),
            ("gastrointestinal_tract_disorder", "gastrointest_disord"),
            ("host_mass_index", "host_body_mass_index"),
            ("host_product", "host_body_product"),
            ("host_temperature", "host_body_temp"),
            ("host_diet", "host_diet"),
            ("host_family_relationship", "host_family_relationship"),
            ("host_genotype", "host_genotype"),
            ("host_height", "host_height"),
            ("host_last_meal", "host_last_meal"),
            ("host_occupation", "host_occupation"),
            ("host_phenotype", "host_phenotype"),
            ("host_pulse", "host_pulse"),
            ("host_total_mass", "host_tot_mass"),
            ("medication_code", "ihmc_medication_code"),
            ("liver_disorder", "liver_disord"),
            ("medical_history_performed", "medic_hist_perform"),
            ("organism_count", "organism_count"),
            ("perturbation", "perturbation"),
            ("salinity", "samp_salinity"),
            ("sample_storage_duration", "samp_store_dur"),
            ("sample_storage_location", "samp_store_loc"),
            ("sample_storage_temperature", "samp_store_temp"),
            ("special_diet", "special_diet"),
            ("mating_type", "mating_type"),
            ("alkalinity", "alkalinity"),
            ("alkyl_diethers", "alkyl_diethers"),
            ("aminopeptidase_activity", "aminopept_act"),
            ("ammonium", "ammonium"),
            ("atmospheric_data", "atmospheric_data"),
            ("bacterial_production", "bac_prod"),
            ("bacterial_respiration", "bac_resp"),
            ("bacterial_carbon_production", "bacteria_carb_prod"),
            ("biomass", "biomass"),
            ("bishomohopanol", "bishomohopanol"),
            ("bromide", "bromide"),
            ("calcium", "calcium"),
            ("carbon_nitrogen_ratio", "carb_nitro_ratio"),
            ("chloride", "chloride"),
            ("chlorophyll", "chlorophyll"),
            ("conductivity", "conduc"),
            ("density", "density"),
            ("diether_lipids", "diether_lipids"),
            ("dissolved_carbon_dioxide", "diss_carb_dioxide"),
            ("dissolved_hydrogen", "diss_hydrogen"),
            ("dissolved_inorganic_carbon", "diss_inorg_carb"),
            ("dissolved_inorganic_nitrogen", "diss_inorg_nitro"),
            ("dissolved_inorganic_phosphorus", "diss_inorg_phosp"),
            ("dissolved_organic_carbon", "diss_org_carb"),
            ("dissolved_organic_nitrogen", "diss_org_nitro"),
            ("dissolved_oxygen", "diss_oxygen"),
            ("downward_par", "down_par"),
            ("fluorescence", "fluor"),
            ("glucosidase_activity", "glucosidase_act"),
            ("light_intensity", "light_intensity"),
            ("magnesium", "magnesium"),
            ("mean_friction_velocity", "mean_frict_vel"),
            ("mean_peak_friction_velocity", "mean_peak_frict_vel"),
            ("n_alkanes", "n_alkanes"),
            ("nitrate", "nitrate"),
            ("nitrite", "nitrite"),
            ("nitrogen", "nitro"),
            ("organic_carbon", "org_carb"),
            ("organic_matter", "org_matter"),
            ("organic_nitrogen", "org_nitro"),
            ("oxygenation_status", "oxy_stat_samp"),
            ("particulate_organic_carbon", "part_org_carb"),
            ("particulate_organic_nitrogen", "part_org_nitro"),
            ("petroleum_hydrocarbon", "petroleum_hydrocarb"),
            ("phaeopigments", "phaeopigments"),
            ("phosphate", "phosphate"),
            ("phospholipid_fatty_acid", "phosplipid_fatt_acid"),
            ("photon_flux", "photon_flux"),
            ("potassium", "potassium"),
            ("pressure", "pressure"),
            ("primary_production", "primary_prod"),
            ("redox_potential", "redox_potential"),
            ("silicate", "silicate"),
            ("sodium", "sodium"),
            ("soluble_reactive_phosphorus", "soluble_react_phosp"),
            ("sulfate", "sulfate"),
            ("sulfide", "sulfide"),
            ("suspended_particulate_matter", "suspend_part_matter"),
            ("tidal_stage", "tidal_stage"),
            ("total_depth_water_column", "tot_depth_water_col"),
            ("total_dissolved_nitrogen", "tot_diss_nitro"),
            ("total_inorganic_nitrogen", "tot_inorg_nitro"),
            ("total_particulate_carbon", "tot_part_carb"),
            ("total_phosphorus", "tot_phosp"),
            ("water_current", "water_current"),
            ("sex", "sex"),
            ("host_sex", "host_sex"),
            ("host_sex_id", "host_sex"),
            ("sample_volume_weight_dna_extraction", "samp_vol_we_dna_ext"),
            ("sample_volume_weight", "samp_vol_we_dna_ext"),
            ("current_land_use_id", "cur_land_use"),
            ("environment_biome", "env_broad_scale"),
            ("environment_feature", "env_local_scale"),
            ("environment_material", "env_medium"),
            ("oxygenation_status_id", "oxy_stat_samp"),
            ("relationship_oxygen_id", "rel_to_oxygen"),
        ]
        .into_iter()
        .collect()
    });

pub static SEX_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("1", "male"),
        ("2", "female"),
        ("3", "neuter"),
        ("4", "hermaphrodite"),
        ("5", "not determined"),
        ("6", "missing"),
        ("7", "not applicable"),
        ("8", "not collected"),
    ]
    .into_iter()
    .collect()
});

pub static TILLAGE_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("1", "drill"),
        ("2", "cutting disc"),
        ("3", "ridge till"),
        ("4", "strip tillage"),
        ("5", "zonal tillage"),
        ("6", "chisel"),
        ("7", "tined"),
        ("8", "mouldboard"),
        ("9", "disc plough"),
    ]
    .into_iter()
    .collect()
});

pub static LAND_USE_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("1", "cities"),
        ("2", "farmstead"),
        ("3", "industrial areas"),
        ("4", "roads/railroads"),
        ("5", "rock"),
        ("6", "sand"),
        ("7", "gravel"),
        ("8", "mudflats"),
        ("9", "salt flats"),
        ("10", "badlands"),
        ("11", "permanent snow or ice"),
        ("12", "saline seeps"),
        ("13", "mines/quarries"),
        ("14", "oil waste areas"),
        ("15", "small grains"),
        ("16", "row crops"),
        ("17", "vegetable crops"),
        ("18", "horticultural plants (e.g. tulips)"),
        ("19", "marshlands (grass, sedges, rushes)"),
        ("20", "tundra (mosses, lichens)"),
        ("21", "rangeland"),
        ("22", "pastureland (grasslands used for livestock grazing)"),
        ("23", "hayland"),
        ("24", "meadows (grasses, alfalfa, fescue, bromegrass, timothy)"),
        (
            "25",
            "shrub land (e.g. mesquite, sage-brush, creosote bush, shrub oak, eucalyptus)",
        ),
        (
            "26",
            "successional shrub land (tree saplings, hazels, sumacs, chokecherry, shrub dogwoods, blackberries)",
        ),
        ("27", "shrub crops (blueberries, nursery ornamentals, filberts)"),
        ("28", "vine crops (grapes)"),
        ("29", "conifers (e.g. pine, spruce, fir, cypress)"),
        ("30", "hardwoods (e.g. oak, hickory, elm, aspen)"),
        ("31", "intermixed hardwood and conifers"),
        ("32", "tropical (e.g. mangrove, palms)"),
        (
            "33",
            "rainforest (evergreen forest receiving >406 cm annual rainfall)",
        ),
        (
            "34",
            "swamp (permanent or semi-permanent water body dominated by woody plants)",
        ),
        ("35", "crop trees (nuts, fruit, christmas trees, nursery trees)"),
    ]
    .into_iter()
    .collect()
});

pub static OXYGENATION_STATUS_CODES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| [("1", "aerobe"), ("2", "anaerobe")].into_iter().collect());

pub static OXYGEN_RELATIONSHIP_CODES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        [
            ("1", "aerobe"),
            ("2", "anaerobe"),
            ("3", "facultative"),
            ("4", "microaerophilic"),
            ("5", "microanaerobe"),
            ("6", "obligate aerobe"),
            ("7", "obligate anaerobe"),
        ]
        .into_iter()
        .collect()
    });

pub static DATA_TYPE_CROSSWALK: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        [
            ("Genome sequencing and assembly", "Genome sequencing and assembly"),
            ("Raw sequence reads", "Raw sequence reads"),
            ("Genome sequencing", "Genome sequencing"),
            ("Whole genome sequencing", "Genome sequencing"),
            ("Clone ends", "Clone ends"),
            ("Epigenomics", "Epigenomics"),
            ("Exome", "Exome"),
            ("Map", "Map"),
            ("Metabonomics", "Metabolome"),
            ("Metagenome", "Metagenome"),
            ("Metagenomic assembly", "Metagenomic assembly"),
            ("Phenotype or Genotype", "Phenotype or Genotype"),
            ("Proteome", "Proteome"),
            ("Random survey", "Random survey"),
            ("Targeted loci cultured", "Targeted loci cultured"),
            ("Targeted loci environmental", "Targeted loci environmental"),
            ("Targeted Locus (Loci)", "Targeted Locus (Loci)"),
            (
                "Transcriptome or Gene expression",
                "Transcriptome or Gene expression",
            ),
            ("Variation", "Variation"),
        ]
        .into_iter()
        .collect()
    });

pub const OTHER_DATA_TYPE: &str = "Other";

pub fn attribute_table(sample_type_id: i64) -> Option<&'static str> {
    let table = match sample_type_id {
        1 => "sample_attr_pathogen_clinical_host_associated",
        2 => "sample_attr_pathogen_environmental_food_other",
        3 => "sample_attr_microbe",
        4 => "sample_attr_model_animal",
        5 => "sample_attr_human",
        6 => "sample_attr_plant",
        7 => "sample_attr_virus",
        8 => "sample_attr_metagenome_environmental",
        9 => "sample_attr_mimsme_human_gut",
        10 => "sample_attr_mimsme_soil",
        11 => "sample_attr_mimsme_water",
        _ => return None,
    };
    Some(table)
}

pub const NON_ATTRIBUTE_COLUMNS: &[&str] = &[
    "sample_id",
    "type",
    "taxon_id",
    "attribute_id",
    "geographic_location",
    "latitude_longitude",
];

/// Unmapped names collapse into one trailing `Other`.
pub fn map_data_types<'a, I>(names: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut mapped = Vec::new();
    let mut has_other = false;
    for name in names {
        match DATA_TYPE_CROSSWALK.get(name.trim()) {
            Some(value) => {
                if !mapped.contains(value) {
                    mapped.push(*value);
                }
            }
            None => has_other = true,
        }
    }
    if has_other {
        mapped.push(OTHER_DATA_TYPE);
    }
    mapped
}

pub fn sample_scope(name: Option<&str>) -> &'static str {
    match name.map(str::trim) {
        Some("Monoisolate") => "eMonoisolate",
        Some("Multiisolate") => "eMultiisolate",
        Some("Multispecies") => "eMultispecies",
        Some("Environment") => "eEnvironment",
        Some("Synthetic") => "eSynthetic",
        Some("Single cell") => "eSingleCell",
        _ => "eOther",
    }
}

pub fn relevance(value: &str) -> &'static str {
    let compact = value.trim().replace(' ', "").to_uppercase();
    match compact.as_str() {
        "AGRICULTURAL" => "Agricultural",
        "MEDICAL" => "Medical",
        "INDUSTRIAL" => "Industrial",
        "ENVIRONMENTAL" => "Environmental",
        "EVOLUTION" => "Evolution",
        "MODELORGANISM" => "ModelOrganism",
        _ => "Other",
    }
}
