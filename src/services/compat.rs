//! Opportunity-table schema translation for readers.
//!
//! Older releases wrote one row per (country, year) with `aviation_score`,
//! `tourism_score` and `combined_opportunity_score`. The scoring core only
//! writes the per-sector layout; this module folds either layout into
//! [`ScoreView`] rows so callers see one shape.

use crate::domain::constants::*;
use crate::domain::errors::ScoringError;
use crate::domain::models::ScoreView;
use crate::table::RawTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunitySchema {
    Current,
    Legacy,
}

pub fn detect_schema(table: &RawTable) -> Option<OpportunitySchema> {
    if table.missing_columns(OPPORTUNITY_OUTPUT_COLUMNS).is_empty() {
        Some(OpportunitySchema::Current)
    } else if table.missing_columns(LEGACY_OPPORTUNITY_COLUMNS).is_empty() {
        Some(OpportunitySchema::Legacy)
    } else {
        None
    }
}

pub fn translate_opportunity_table(table: &RawTable) -> Result<Vec<ScoreView>, ScoringError> {
    match detect_schema(table) {
        Some(OpportunitySchema::Current) => read_current(table),
        Some(OpportunitySchema::Legacy) => {
            tracing::debug!(table = %table.name, "translating legacy opportunity schema");
            read_legacy(table)
        }
        None => Err(ScoringError::Schema {
            table: table.name.clone(),
            missing: table.missing_columns(OPPORTUNITY_OUTPUT_COLUMNS),
        }),
    }
}

fn number(table: &RawTable, row: usize, column: &str, raw: &str) -> Result<f64, ScoringError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScoringError::InvalidValue {
            table: table.name.clone(),
            line: row as u64 + 2,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn year(table: &RawTable, row: usize, raw: &str) -> Result<i32, ScoringError> {
    let v = number(table, row, YEAR, raw)?;
    if v.fract() != 0.0 {
        return Err(ScoringError::InvalidValue {
            table: table.name.clone(),
            line: row as u64 + 2,
            column: YEAR.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(v as i32)
}

fn read_current(table: &RawTable) -> Result<Vec<ScoreView>, ScoringError> {
    let idx = table.require(OPPORTUNITY_OUTPUT_COLUMNS)?;
    let mut out = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let cell = |c: usize| row.get(idx[c]).unwrap_or("").trim();
        out.push(ScoreView {
            country: cell(0).to_string(),
            year: year(table, i, cell(1))?,
            sector: cell(2).to_string(),
            procurement_readiness_score: number(table, i, READINESS_SCORE, cell(3))?,
        });
    }
    Ok(out)
}

fn read_legacy(table: &RawTable) -> Result<Vec<ScoreView>, ScoringError> {
    let idx = table.require(LEGACY_OPPORTUNITY_COLUMNS)?;
    let sectors = [(AVIATION, 2usize), (TOURISM_HOSPITALITY, 3usize)];
    let mut out = Vec::with_capacity(table.rows.len() * sectors.len());
    for (i, row) in table.rows.iter().enumerate() {
        let cell = |c: usize| row.get(idx[c]).unwrap_or("").trim();
        let y = year(table, i, cell(1))?;
        for (sector, col) in sectors {
            out.push(ScoreView {
                country: cell(0).to_string(),
                year: y,
                sector: sector.to_string(),
                procurement_readiness_score: number(
                    table,
                    i,
                    LEGACY_OPPORTUNITY_COLUMNS[col],
                    cell(col),
                )?,
            });
        }
    }
    Ok(out)
}
