use crate::domain::constants::*;
use crate::domain::errors::ScoringError;
use crate::domain::models::{ArtifactReport, GovernanceFlag, GovernanceRecord, ScoreView, TrafficRecord};
use crate::services::compat::translate_opportunity_table;
use crate::table::{self, RawTable, TableKind};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A fully rendered output file that has not touched the filesystem yet.
pub struct PendingArtifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

pub fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn persist_error(path: &Path, e: impl std::fmt::Display) -> ScoringError {
    ScoringError::Persist {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Header row is always written, even for an empty table.
pub fn render_csv<T: Serialize>(
    path: PathBuf,
    headers: &[&str],
    rows: &[T],
) -> Result<PendingArtifact, ScoringError> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    w.write_record(headers).map_err(|e| persist_error(&path, e))?;
    for r in rows {
        w.serialize(r).map_err(|e| persist_error(&path, e))?;
    }
    let bytes = w.into_inner().map_err(|e| persist_error(&path, e))?;
    Ok(PendingArtifact {
        path,
        bytes,
        rows: rows.len(),
    })
}

pub fn render_records(
    path: PathBuf,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<PendingArtifact, ScoringError> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    w.write_record(headers).map_err(|e| persist_error(&path, e))?;
    for r in rows {
        w.write_record(r).map_err(|e| persist_error(&path, e))?;
    }
    let bytes = w.into_inner().map_err(|e| persist_error(&path, e))?;
    Ok(PendingArtifact {
        path,
        bytes,
        rows: rows.len(),
    })
}

/// Stages every artifact as a synced temp file next to its target, then
/// renames them into place. A failure while staging leaves every target
/// untouched; staged temp files are removed on drop.
pub fn commit_artifacts(artifacts: Vec<PendingArtifact>) -> Result<Vec<ArtifactReport>, ScoringError> {
    let mut staged = Vec::with_capacity(artifacts.len());
    for a in artifacts {
        let dir = match a.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| persist_error(&a.path, e))?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| persist_error(&a.path, e))?;
        tmp.write_all(&a.bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| persist_error(&a.path, e))?;
        staged.push((tmp, a));
    }

    let mut reports = Vec::with_capacity(staged.len());
    for (tmp, a) in staged {
        tmp.persist(&a.path).map_err(|e| persist_error(&a.path, e.error))?;
        tracing::info!(path = %a.path.display(), rows = a.rows, "artifact written");
        reports.push(ArtifactReport {
            path: a.path.display().to_string(),
            rows: a.rows,
            sha256: digest_hex(&a.bytes),
        });
    }
    Ok(reports)
}

pub fn governance_output_path(data_dir: &Path) -> PathBuf {
    data_dir.join(GOVERNANCE_OUTPUT_FILE)
}

pub fn opportunity_output_path(data_dir: &Path) -> PathBuf {
    data_dir.join(OPPORTUNITY_OUTPUT_FILE)
}

fn read_or_warn(path: &Path, name: &str) -> Option<RawTable> {
    if !path.exists() {
        tracing::warn!(table = name, path = %path.display(), "derived table missing, using empty table");
        return None;
    }
    match table::read_table(path, name) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::warn!(table = name, error = %e, "derived table unreadable, using empty table");
            None
        }
    }
}

fn parse_governance(t: &RawTable) -> Result<Vec<GovernanceRecord>, ScoringError> {
    let idx = t.require(GOVERNANCE_OUTPUT_COLUMNS)?;
    let mut out = Vec::with_capacity(t.rows.len());
    for (i, row) in t.rows.iter().enumerate() {
        let cell = |c: usize| row.get(idx[c]).unwrap_or("").trim();
        let invalid = |column: &str, value: &str| ScoringError::InvalidValue {
            table: t.name.clone(),
            line: i as u64 + 2,
            column: column.to_string(),
            value: value.to_string(),
        };
        let year = cell(1).parse::<i32>().map_err(|_| invalid(YEAR, cell(1)))?;
        let flag = GovernanceFlag::parse(cell(2)).ok_or_else(|| invalid(GOVERNANCE_FLAG, cell(2)))?;
        out.push(GovernanceRecord {
            country: cell(0).to_string(),
            year,
            governance_flag: flag,
        });
    }
    Ok(out)
}

/// Computed governance flags; never fails. Absent or invalid files yield an
/// empty table.
pub fn read_governance_flags(data_dir: &Path) -> Vec<GovernanceRecord> {
    let path = governance_output_path(data_dir);
    let Some(t) = read_or_warn(&path, "governance_flags") else {
        return Vec::new();
    };
    parse_governance(&t).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "governance flags schema invalid, using empty table");
        Vec::new()
    })
}

/// Opportunity scores in the current schema, translating legacy files.
/// Never fails.
pub fn read_opportunity_scores(data_dir: &Path) -> Vec<ScoreView> {
    let path = opportunity_output_path(data_dir);
    let Some(t) = read_or_warn(&path, "opportunity_scores") else {
        return Vec::new();
    };
    translate_opportunity_table(&t).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "opportunity scores schema invalid, using empty table");
        Vec::new()
    })
}

/// Raw traffic table for display; never fails.
pub fn read_traffic(data_dir: &Path, kind: TableKind) -> Vec<TrafficRecord> {
    match table::load_traffic(data_dir, kind) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(table = kind.name(), error = %e, "input table unavailable, using empty table");
            Vec::new()
        }
    }
}
