use crate::domain::constants::*;
use crate::domain::errors::ScoringError;
use crate::domain::models::{IndexEntry, IndexReport};
use crate::services::governance::GovernanceScorer;
use crate::services::storage::{commit_artifacts, render_records, PendingArtifact};
use crate::table::{self, RawTable, TableKind};
use std::path::{Path, PathBuf};

const FLAG_TABLES: [TableKind; 2] = [TableKind::AviationFlags, TableKind::TourismFlags];

/// `fact_aviation_governance_flags.csv` → `fact_aviation_governance_flags_computed.csv`
pub fn computed_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}{COMPUTED_SUFFIX}.csv"))
}

fn render_computed(
    table: &RawTable,
    scorer: &GovernanceScorer,
    entries: &mut Vec<IndexEntry>,
    path: PathBuf,
) -> Result<PendingArtifact, ScoringError> {
    let records = table::parse_flag_records(table)?;

    let mut headers = table.headers.clone();
    // recomputing an already computed file replaces the old column
    let existing = table.column(AI_PROCUREMENT_INDEX);
    if existing.is_none() {
        headers.push(AI_PROCUREMENT_INDEX.to_string());
    }

    let mut rows = Vec::with_capacity(records.len());
    for (raw, rec) in table.rows.iter().zip(&records) {
        let index = scorer.ai_procurement_index(&rec.sector, &rec.flags, rec.country_modifier);
        let mut row: Vec<String> = raw.iter().map(str::to_string).collect();
        row.resize(table.headers.len(), String::new());
        match existing {
            Some(i) => row[i] = index.to_string(),
            None => row.push(index.to_string()),
        }
        rows.push(row);
        entries.push(IndexEntry {
            table: table.name.clone(),
            country: rec.country.clone(),
            sector: rec.sector.clone(),
            ai_procurement_index: index,
        });
    }
    render_records(path, &headers, &rows)
}

/// Scores both raw governance flag tables. Both are parsed and rendered
/// before either computed file is written.
pub fn compute_ai_index(data_dir: &Path, scorer: &GovernanceScorer) -> Result<IndexReport, ScoringError> {
    let mut entries = Vec::new();
    let mut pending = Vec::with_capacity(FLAG_TABLES.len());
    for kind in FLAG_TABLES {
        let source = table::resolve_table_file(data_dir, kind);
        let raw = table::read_table(&source, kind.name())?;
        pending.push(render_computed(&raw, scorer, &mut entries, computed_path(&source))?);
    }
    let outputs = commit_artifacts(pending)?;
    tracing::info!(rows = entries.len(), "ai procurement index computed");
    Ok(IndexReport { entries, outputs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::ScoringConfig;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "country,sector,digital_procurement,open_contracting,ai_policy,vendor_transparency,country_modifier";

    fn scorer() -> GovernanceScorer {
        GovernanceScorer::from_config(&ScoringConfig::default()).unwrap()
    }

    #[test]
    fn computed_name_keeps_stem() {
        assert_eq!(
            computed_path(Path::new("/d/fact_tourism_governance_flags.csv")),
            PathBuf::from("/d/fact_tourism_governance_flags_computed.csv")
        );
    }

    #[test]
    fn writes_both_computed_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(AVIATION_FLAGS_FILE),
            format!("{HEADER}\nKenya,Aviation,1,1,0,1,1.0\n"),
        )
        .unwrap();
        fs::write(
            dir.path().join(TOURISM_FLAGS_FILE),
            format!("{HEADER}\nGhana,Tourism & Hospitality,1,0,0,0,\n"),
        )
        .unwrap();

        let report = compute_ai_index(dir.path(), &scorer()).unwrap();
        assert_eq!(report.outputs.len(), 2);
        assert_eq!(report.entries[0].ai_procurement_index, 0.68);
        assert_eq!(report.entries[1].ai_procurement_index, 0.225);

        let out = fs::read_to_string(dir.path().join("fact_aviation_governance_flags_computed.csv"))
            .unwrap();
        assert_eq!(
            out,
            format!("{HEADER},ai_procurement_index\nKenya,Aviation,1,1,0,1,1.0,0.68\n")
        );
    }

    #[test]
    fn short_rows_are_padded_before_the_index_column() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(AVIATION_FLAGS_FILE),
            format!("{HEADER}\nKenya,Aviation,1\n"),
        )
        .unwrap();
        fs::write(dir.path().join(TOURISM_FLAGS_FILE), format!("{HEADER}\n")).unwrap();

        let report = compute_ai_index(dir.path(), &scorer()).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].ai_procurement_index, 0.255);

        let out = fs::read_to_string(dir.path().join("fact_aviation_governance_flags_computed.csv"))
            .unwrap();
        assert_eq!(
            out,
            format!("{HEADER},ai_procurement_index\nKenya,Aviation,1,,,,,0.255\n")
        );
    }

    #[test]
    fn invalid_second_table_writes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(AVIATION_FLAGS_FILE),
            format!("{HEADER}\nKenya,Aviation,1,1,0,1,1.0\n"),
        )
        .unwrap();
        fs::write(
            dir.path().join(TOURISM_FLAGS_FILE),
            "country,sector\nGhana,Tourism & Hospitality\n",
        )
        .unwrap();

        let err = compute_ai_index(dir.path(), &scorer()).unwrap_err();
        assert_eq!(err.code(), "SCHEMA_ERROR");
        assert!(!dir
            .path()
            .join("fact_aviation_governance_flags_computed.csv")
            .exists());
    }
}
