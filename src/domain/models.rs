use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Governance indicator name → value, as read from a raw flag record.
pub type IndicatorFlags = BTreeMap<String, bool>;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GovernanceFlag {
    High,
    Low,
}

impl GovernanceFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            GovernanceFlag::High => "HIGH",
            GovernanceFlag::Low => "LOW",
        }
    }

    /// Case-insensitive; older files spell the flag `High`/`Low`.
    pub fn parse(raw: &str) -> Option<Self> {
        let v = raw.trim();
        if v.eq_ignore_ascii_case("high") {
            Some(GovernanceFlag::High)
        } else if v.eq_ignore_ascii_case("low") {
            Some(GovernanceFlag::Low)
        } else {
            None
        }
    }
}

/// One row of a passenger, cargo or tourism table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficRecord {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiIndexRecord {
    pub country: String,
    pub year: i32,
    pub ai_procurement_index: f64,
}

/// Raw governance flag record for one (country, sector).
#[derive(Debug, Clone, PartialEq)]
pub struct FlagRecord {
    pub country: String,
    pub sector: String,
    pub flags: IndicatorFlags,
    pub country_modifier: f64,
}

/// Passenger, cargo and tourism volumes after the (country, year) join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedIndicators {
    pub country: String,
    pub year: i32,
    pub passenger_volume: f64,
    pub cargo_tonnage: f64,
    pub inbound_tourists: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceRecord {
    pub country: String,
    pub year: i32,
    pub governance_flag: GovernanceFlag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityScore {
    pub country: String,
    pub year: i32,
    pub sector: String,
    pub procurement_readiness_score: u32,
}

/// Read-side opportunity row. Legacy files carry fractional scores, so the
/// score is widened to `f64` here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreView {
    pub country: String,
    pub year: i32,
    pub sector: String,
    pub procurement_readiness_score: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct ArtifactReport {
    pub path: String,
    pub rows: usize,
    pub sha256: String,
}

#[derive(Serialize, Debug)]
pub struct RunReport {
    pub merged_rows: usize,
    pub median_passenger_volume: Option<f64>,
    pub high_count: usize,
    pub low_count: usize,
    pub ai_index_source: Option<String>,
    pub governance_rows: usize,
    pub opportunity_rows: usize,
    pub outputs: Vec<ArtifactReport>,
}

#[derive(Serialize, Clone, Debug)]
pub struct IndexEntry {
    pub table: String,
    pub country: String,
    pub sector: String,
    pub ai_procurement_index: f64,
}

#[derive(Serialize, Debug)]
pub struct IndexReport {
    pub entries: Vec<IndexEntry>,
    pub outputs: Vec<ArtifactReport>,
}

#[derive(Serialize, Debug)]
pub struct TableCheck {
    pub table: String,
    pub file: String,
    /// Command that reads the table: `run` or `index`.
    pub used_by: String,
    pub required: bool,
    pub status: String,
    pub rows: Option<usize>,
    pub missing_columns: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct ValidateReport {
    /// Readiness of the `run` inputs.
    pub overall: String,
    /// Readiness of the `index` inputs.
    pub index: String,
    pub tables: Vec<TableCheck>,
}

#[derive(Serialize, Clone, Debug)]
pub struct SectorReadiness {
    pub sector: String,
    pub rows: usize,
    pub mean_score: f64,
}

#[derive(Serialize, Debug)]
pub struct SummaryReport {
    pub country: String,
    pub countries: Vec<String>,
    pub total_passengers: u64,
    pub total_cargo: u64,
    pub total_inbound_tourists: u64,
    pub high_count: usize,
    pub low_count: usize,
    pub sector_readiness: Vec<SectorReadiness>,
}
