use crate::domain::errors::ScoringError;
use crate::domain::models::{TableCheck, ValidateReport};
use crate::table::{self, TableKind};
use std::path::Path;

fn check_table(data_dir: &Path, kind: TableKind) -> TableCheck {
    let path = table::resolve_table_file(data_dir, kind);
    let mut check = TableCheck {
        table: kind.name().to_string(),
        file: kind.file_name().to_string(),
        used_by: kind.used_by().to_string(),
        required: !kind.is_optional(),
        status: "ok".to_string(),
        rows: None,
        missing_columns: Vec::new(),
    };
    match table::read_table(&path, kind.name()) {
        Ok(raw) => {
            check.rows = Some(raw.rows.len());
            check.missing_columns = raw.missing_columns(kind.required_columns());
            if !check.missing_columns.is_empty() {
                check.status = "schema_error".to_string();
            }
        }
        Err(ScoringError::SourceUnavailable { .. }) => check.status = "missing".to_string(),
        Err(e) => {
            tracing::warn!(table = kind.name(), error = %e, "table unreadable");
            check.status = "schema_error".to_string();
        }
    }
    check
}

fn readiness(tables: &[TableCheck], command: &str) -> String {
    let ok = tables
        .iter()
        .filter(|t| t.required && t.used_by == command)
        .all(|t| t.status == "ok");
    let status = if ok { "ok" } else { "failed" };
    status.to_string()
}

/// Presence and header check of every known input table. `overall` covers
/// the tables `run` reads; the raw flag tables only gate `index`.
pub fn validate_inputs(data_dir: &Path) -> ValidateReport {
    let tables: Vec<TableCheck> = TableKind::INPUTS
        .iter()
        .map(|k| check_table(data_dir, *k))
        .collect();
    ValidateReport {
        overall: readiness(&tables, "run"),
        index: readiness(&tables, "index"),
        tables,
    }
}
