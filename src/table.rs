use crate::domain::constants::*;
use crate::domain::errors::ScoringError;
use crate::domain::models::{AiIndexRecord, FlagRecord, IndicatorFlags, TrafficRecord};
use std::path::{Path, PathBuf};

/// Input tables the pipeline knows how to locate and check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    PassengerFlow,
    CargoFlow,
    TourismInbound,
    AviationFlags,
    TourismFlags,
    AiProcurementIndex,
}

impl TableKind {
    pub const INPUTS: [TableKind; 6] = [
        TableKind::PassengerFlow,
        TableKind::CargoFlow,
        TableKind::TourismInbound,
        TableKind::AviationFlags,
        TableKind::TourismFlags,
        TableKind::AiProcurementIndex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::PassengerFlow => "passenger_flow",
            TableKind::CargoFlow => "cargo_flow",
            TableKind::TourismInbound => "tourism_inbound",
            TableKind::AviationFlags => "aviation_governance_flags",
            TableKind::TourismFlags => "tourism_governance_flags",
            TableKind::AiProcurementIndex => "ai_procurement_index",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::PassengerFlow => PASSENGER_FLOW_FILE,
            TableKind::CargoFlow => CARGO_FLOW_FILE,
            TableKind::TourismInbound => TOURISM_INBOUND_FILE,
            TableKind::AviationFlags => AVIATION_FLAGS_FILE,
            TableKind::TourismFlags => TOURISM_FLAGS_FILE,
            TableKind::AiProcurementIndex => AI_INDEX_FILE,
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::PassengerFlow => PASSENGER_COLUMNS,
            TableKind::CargoFlow => CARGO_COLUMNS,
            TableKind::TourismInbound => TOURISM_COLUMNS,
            TableKind::AviationFlags | TableKind::TourismFlags => FLAG_COLUMNS,
            TableKind::AiProcurementIndex => AI_INDEX_COLUMNS,
        }
    }

    /// Numeric column carried by a traffic table.
    pub fn value_column(&self) -> Option<&'static str> {
        match self {
            TableKind::PassengerFlow => Some(PASSENGER_VOLUME),
            TableKind::CargoFlow => Some(CARGO_TONNAGE),
            TableKind::TourismInbound => Some(INBOUND_TOURISTS),
            _ => None,
        }
    }

    /// Command whose inputs include this table.
    pub fn used_by(&self) -> &'static str {
        match self {
            TableKind::AviationFlags | TableKind::TourismFlags => "index",
            _ => "run",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TableKind::AiProcurementIndex)
    }
}

pub fn resolve_table_file(data_dir: &Path, kind: TableKind) -> PathBuf {
    data_dir.join(kind.file_name())
}

/// A CSV file held as strings, headers kept in file order.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<csv::StringRecord>,
}

impl RawTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| self.column(c).is_none())
            .map(|c| c.to_string())
            .collect()
    }

    /// Index of every required column, or a schema error naming all gaps.
    pub fn require(&self, required: &[&str]) -> Result<Vec<usize>, ScoringError> {
        let missing = self.missing_columns(required);
        if !missing.is_empty() {
            return Err(ScoringError::Schema {
                table: self.name.clone(),
                missing,
            });
        }
        Ok(required.iter().filter_map(|c| self.column(c)).collect())
    }

    fn cell<'a>(&self, row: &'a csv::StringRecord, idx: usize) -> &'a str {
        row.get(idx).unwrap_or("").trim()
    }

    fn invalid(&self, row_idx: usize, column: &str, value: &str) -> ScoringError {
        ScoringError::InvalidValue {
            table: self.name.clone(),
            // header is line 1
            line: row_idx as u64 + 2,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

pub fn read_table(path: &Path, name: &str) -> Result<RawTable, ScoringError> {
    if !path.exists() {
        return Err(ScoringError::SourceUnavailable {
            table: name.to_string(),
            path: path.display().to_string(),
            reason: "file not found".to_string(),
        });
    }
    // short rows are zero-filled downstream
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ScoringError::SourceUnavailable {
            table: name.to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    let malformed = |e: csv::Error| ScoringError::Malformed {
        table: name.to_string(),
        message: e.to_string(),
    };
    let headers = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.map_err(malformed)?);
    }
    tracing::debug!(table = name, rows = rows.len(), "table loaded");
    Ok(RawTable {
        name: name.to_string(),
        headers,
        rows,
    })
}

pub fn load_kind(data_dir: &Path, kind: TableKind) -> Result<RawTable, ScoringError> {
    read_table(&resolve_table_file(data_dir, kind), kind.name())
}

pub fn load_traffic(data_dir: &Path, kind: TableKind) -> Result<Vec<TrafficRecord>, ScoringError> {
    let table = load_kind(data_dir, kind)?;
    parse_traffic(&table, kind)
}

pub fn parse_traffic(table: &RawTable, kind: TableKind) -> Result<Vec<TrafficRecord>, ScoringError> {
    let value_column = kind.value_column().ok_or_else(|| ScoringError::Malformed {
        table: table.name.clone(),
        message: "not a traffic table".to_string(),
    })?;
    let idx = table.require(kind.required_columns())?;
    let mut out = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        out.push(TrafficRecord {
            country: table.cell(row, idx[0]).to_string(),
            year: parse_year(table, i, table.cell(row, idx[1]))?,
            value: parse_volume(table, i, value_column, table.cell(row, idx[2]))?,
        });
    }
    Ok(out)
}

pub fn load_ai_index(path: &Path) -> Result<Vec<AiIndexRecord>, ScoringError> {
    let table = read_table(path, TableKind::AiProcurementIndex.name())?;
    parse_ai_index(&table)
}

pub fn parse_ai_index(table: &RawTable) -> Result<Vec<AiIndexRecord>, ScoringError> {
    let idx = table.require(AI_INDEX_COLUMNS)?;
    let mut out = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let year = parse_year(table, i, table.cell(row, idx[1]))?;
        let raw = table.cell(row, idx[2]);
        // empty cells fall back to the default index downstream
        if raw.is_empty() {
            continue;
        }
        let value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| table.invalid(i, AI_PROCUREMENT_INDEX, raw))?;
        out.push(AiIndexRecord {
            country: table.cell(row, idx[0]).to_string(),
            year,
            ai_procurement_index: value,
        });
    }
    Ok(out)
}

pub fn parse_flag_records(table: &RawTable) -> Result<Vec<FlagRecord>, ScoringError> {
    let idx = table.require(FLAG_COLUMNS)?;
    let indicators = [
        (DIGITAL_PROCUREMENT, idx[2]),
        (OPEN_CONTRACTING, idx[3]),
        (AI_POLICY, idx[4]),
        (VENDOR_TRANSPARENCY, idx[5]),
    ];
    let mut out = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let mut flags = IndicatorFlags::new();
        for (name, col) in indicators {
            let raw = table.cell(row, col);
            let value = parse_bool(raw).ok_or_else(|| table.invalid(i, name, raw))?;
            flags.insert(name.to_string(), value);
        }
        out.push(FlagRecord {
            country: table.cell(row, idx[0]).to_string(),
            sector: table.cell(row, idx[1]).to_string(),
            flags,
            country_modifier: parse_modifier(table, i, table.cell(row, idx[6]))?,
        });
    }
    Ok(out)
}

fn parse_year(table: &RawTable, row_idx: usize, raw: &str) -> Result<i32, ScoringError> {
    if let Ok(y) = raw.parse::<i32>() {
        return Ok(y);
    }
    // spreadsheets export integral years as `2023.0`
    match raw.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.abs() < i32::MAX as f64 => Ok(f as i32),
        _ => Err(table.invalid(row_idx, YEAR, raw)),
    }
}

fn parse_volume(
    table: &RawTable,
    row_idx: usize,
    column: &str,
    raw: &str,
) -> Result<f64, ScoringError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| table.invalid(row_idx, column, raw))
}

fn parse_modifier(table: &RawTable, row_idx: usize, raw: &str) -> Result<f64, ScoringError> {
    if raw.is_empty() {
        return Ok(1.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| table.invalid(row_idx, COUNTRY_MODIFIER, raw))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "0.0" | "no" | "n" | "f" => Some(false),
        "true" | "1" | "1.0" | "yes" | "y" | "t" => Some(true),
        _ => None,
    }
}
