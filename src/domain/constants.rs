pub const DEFAULT_DATA_DIR: &str = "data/processed";
pub const CONFIG_FILE_NAME: &str = "scoring.toml";
pub const ALL_COUNTRIES: &str = "All";

pub const PASSENGER_FLOW_FILE: &str = "fact_route_passenger_flow.csv";
pub const CARGO_FLOW_FILE: &str = "fact_route_cargo_flow.csv";
pub const TOURISM_INBOUND_FILE: &str = "fact_tourism_inbound.csv";
pub const AVIATION_FLAGS_FILE: &str = "fact_aviation_governance_flags.csv";
pub const TOURISM_FLAGS_FILE: &str = "fact_tourism_governance_flags.csv";
pub const AI_INDEX_FILE: &str = "fact_ai_procurement_index.csv";

pub const GOVERNANCE_OUTPUT_FILE: &str = "fact_governance_flags.csv";
pub const OPPORTUNITY_OUTPUT_FILE: &str = "fact_uk_africa_aviation_opportunity.csv";
pub const COMPUTED_SUFFIX: &str = "_computed";

pub const AVIATION: &str = "Aviation";
pub const TOURISM: &str = "Tourism";
pub const TOURISM_HOSPITALITY: &str = "Tourism & Hospitality";

pub const DIGITAL_PROCUREMENT: &str = "digital_procurement";
pub const OPEN_CONTRACTING: &str = "open_contracting";
pub const AI_POLICY: &str = "ai_policy";
pub const VENDOR_TRANSPARENCY: &str = "vendor_transparency";

pub const COUNTRY: &str = "country";
pub const YEAR: &str = "year";
pub const SECTOR: &str = "sector";
pub const PASSENGER_VOLUME: &str = "passenger_volume";
pub const CARGO_TONNAGE: &str = "cargo_tonnage";
pub const INBOUND_TOURISTS: &str = "inbound_tourists";
pub const COUNTRY_MODIFIER: &str = "country_modifier";
pub const AI_PROCUREMENT_INDEX: &str = "ai_procurement_index";
pub const GOVERNANCE_FLAG: &str = "governance_flag";
pub const READINESS_SCORE: &str = "procurement_readiness_score";

pub const PASSENGER_COLUMNS: &[&str] = &[COUNTRY, YEAR, PASSENGER_VOLUME];
pub const CARGO_COLUMNS: &[&str] = &[COUNTRY, YEAR, CARGO_TONNAGE];
pub const TOURISM_COLUMNS: &[&str] = &[COUNTRY, YEAR, INBOUND_TOURISTS];
pub const FLAG_COLUMNS: &[&str] = &[
    COUNTRY,
    SECTOR,
    DIGITAL_PROCUREMENT,
    OPEN_CONTRACTING,
    AI_POLICY,
    VENDOR_TRANSPARENCY,
    COUNTRY_MODIFIER,
];
pub const AI_INDEX_COLUMNS: &[&str] = &[COUNTRY, YEAR, AI_PROCUREMENT_INDEX];

pub const GOVERNANCE_OUTPUT_COLUMNS: &[&str] = &[COUNTRY, YEAR, GOVERNANCE_FLAG];
pub const OPPORTUNITY_OUTPUT_COLUMNS: &[&str] = &[COUNTRY, YEAR, SECTOR, READINESS_SCORE];

/// Column set written by older releases before scores were split per sector.
pub const LEGACY_OPPORTUNITY_COLUMNS: &[&str] = &[
    COUNTRY,
    YEAR,
    "aviation_score",
    "tourism_score",
    "combined_opportunity_score",
];
