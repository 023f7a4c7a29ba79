use crate::domain::constants::*;
use crate::domain::errors::ScoringError;
use crate::domain::models::{ArtifactReport, GovernanceFlag, RunReport};
use crate::services::config::ScoringConfig;
use crate::services::engine::{ScoringEngine, ScoringInputs, ScoringOutput};
use crate::services::storage::{
    commit_artifacts, governance_output_path, opportunity_output_path, render_csv,
};
use crate::table::{self, TableKind};
use std::path::{Path, PathBuf};

/// Load → join → score → persist over one data directory.
pub struct ScoringPipeline {
    data_dir: PathBuf,
    ai_index_path: Option<PathBuf>,
    config: ScoringConfig,
}

pub struct PipelineRun {
    pub output: ScoringOutput,
    pub ai_index_source: Option<PathBuf>,
    pub artifacts: Vec<ArtifactReport>,
}

impl ScoringPipeline {
    pub fn new(data_dir: &Path, config: ScoringConfig) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            ai_index_path: None,
            config,
        }
    }

    /// An explicit AI index table must exist; without one the default file
    /// in the data directory is used when present.
    pub fn with_ai_index(mut self, path: Option<PathBuf>) -> Self {
        self.ai_index_path = path;
        self
    }

    fn ai_index_source(&self) -> Option<PathBuf> {
        match &self.ai_index_path {
            Some(p) => Some(p.clone()),
            None => {
                let p = table::resolve_table_file(&self.data_dir, TableKind::AiProcurementIndex);
                p.exists().then_some(p)
            }
        }
    }

    pub fn load(&self) -> Result<(ScoringInputs, Option<PathBuf>), ScoringError> {
        let passenger = table::load_traffic(&self.data_dir, TableKind::PassengerFlow)?;
        let cargo = table::load_traffic(&self.data_dir, TableKind::CargoFlow)?;
        let tourism = table::load_traffic(&self.data_dir, TableKind::TourismInbound)?;
        let source = self.ai_index_source();
        let ai_index = match &source {
            Some(p) => Some(table::load_ai_index(p)?),
            None => None,
        };
        tracing::info!(
            passenger = passenger.len(),
            cargo = cargo.len(),
            tourism = tourism.len(),
            ai_index = ai_index.as_ref().map(|t| t.len()),
            "inputs loaded"
        );
        Ok((
            ScoringInputs {
                passenger,
                cargo,
                tourism,
                ai_index,
            },
            source,
        ))
    }

    /// Nothing is written unless every input loads and scores cleanly.
    pub fn run(&self) -> Result<PipelineRun, ScoringError> {
        self.config.validate()?;
        let (inputs, source) = self.load()?;
        let output = ScoringEngine::new(&self.config.readiness).score(&inputs)?;

        let pending = vec![
            render_csv(
                governance_output_path(&self.data_dir),
                GOVERNANCE_OUTPUT_COLUMNS,
                &output.governance,
            )?,
            render_csv(
                opportunity_output_path(&self.data_dir),
                OPPORTUNITY_OUTPUT_COLUMNS,
                &output.opportunity,
            )?,
        ];
        let artifacts = commit_artifacts(pending)?;
        Ok(PipelineRun {
            output,
            ai_index_source: source,
            artifacts,
        })
    }
}

impl PipelineRun {
    pub fn report(&self) -> RunReport {
        let high = self
            .output
            .governance
            .iter()
            .filter(|g| g.governance_flag == GovernanceFlag::High)
            .count();
        RunReport {
            merged_rows: self.output.merged.len(),
            median_passenger_volume: self.output.median_passenger_volume,
            high_count: high,
            low_count: self.output.governance.len() - high,
            ai_index_source: self
                .ai_index_source
                .as_ref()
                .map(|p| p.display().to_string()),
            governance_rows: self.output.governance.len(),
            opportunity_rows: self.output.opportunity.len(),
            outputs: self.artifacts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seed(dir: &Path) {
        fs::write(
            dir.join(PASSENGER_FLOW_FILE),
            "country,year,passenger_volume\nKenya,2023,40\nNigeria,2023,30\nGhana,2023,20\nEgypt,2023,10\n",
        )
        .unwrap();
        fs::write(
            dir.join(CARGO_FLOW_FILE),
            "country,year,cargo_tonnage\nKenya,2023,5\n",
        )
        .unwrap();
        fs::write(
            dir.join(TOURISM_INBOUND_FILE),
            "country,year,inbound_tourists\nKenya,2023,9\nRwanda,2023,4\n",
        )
        .unwrap();
    }

    #[test]
    fn run_writes_both_tables() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let run = ScoringPipeline::new(dir.path(), ScoringConfig::default())
            .run()
            .unwrap();
        let report = run.report();
        assert_eq!(report.merged_rows, 5);
        assert_eq!(report.governance_rows, 5);
        assert_eq!(report.opportunity_rows, 10);
        assert_eq!(report.median_passenger_volume, Some(20.0));
        assert_eq!(report.high_count, 2);
        assert!(report.ai_index_source.is_none());

        let gov = fs::read_to_string(governance_output_path(dir.path())).unwrap();
        assert!(gov.starts_with("country,year,governance_flag\n"));
        assert!(gov.contains("Rwanda,2023,LOW\n"));
        assert!(gov.contains("Kenya,2023,HIGH\n"));
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let pipeline = ScoringPipeline::new(dir.path(), ScoringConfig::default());
        pipeline.run().unwrap();
        let first = fs::read(opportunity_output_path(dir.path())).unwrap();
        let first_gov = fs::read(governance_output_path(dir.path())).unwrap();
        let second = pipeline.run().unwrap();
        assert_eq!(fs::read(opportunity_output_path(dir.path())).unwrap(), first);
        assert_eq!(fs::read(governance_output_path(dir.path())).unwrap(), first_gov);
        assert_eq!(
            second.artifacts[1].sha256,
            crate::services::storage::digest_hex(&first)
        );
    }

    #[test]
    fn schema_error_writes_nothing() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        fs::write(
            dir.path().join(CARGO_FLOW_FILE),
            "country,year,tonnes\nKenya,2023,5\n",
        )
        .unwrap();
        let err = ScoringPipeline::new(dir.path(), ScoringConfig::default())
            .run()
            .err()
            .unwrap();
        assert_eq!(err.code(), "SCHEMA_ERROR");
        assert!(!governance_output_path(dir.path()).exists());
        assert!(!opportunity_output_path(dir.path()).exists());
    }

    #[test]
    fn failed_run_keeps_previous_outputs() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let pipeline = ScoringPipeline::new(dir.path(), ScoringConfig::default());
        pipeline.run().unwrap();
        let before = fs::read(opportunity_output_path(dir.path())).unwrap();
        fs::remove_file(dir.path().join(TOURISM_INBOUND_FILE)).unwrap();
        let err = pipeline.run().err().unwrap();
        assert_eq!(err.code(), "SOURCE_UNAVAILABLE");
        assert_eq!(fs::read(opportunity_output_path(dir.path())).unwrap(), before);
    }

    #[test]
    fn default_ai_index_file_is_used_when_present() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        fs::write(
            dir.path().join(AI_INDEX_FILE),
            "country,year,ai_procurement_index\nEgypt,2023,0.91\n",
        )
        .unwrap();
        let run = ScoringPipeline::new(dir.path(), ScoringConfig::default())
            .run()
            .unwrap();
        assert!(run.ai_index_source.is_some());
        let egypt: Vec<_> = run
            .output
            .opportunity
            .iter()
            .filter(|o| o.country == "Egypt")
            .map(|o| o.procurement_readiness_score)
            .collect();
        assert_eq!(egypt, vec![60, 60]);
    }

    #[test]
    fn explicit_ai_index_must_exist() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let err = ScoringPipeline::new(dir.path(), ScoringConfig::default())
            .with_ai_index(Some(dir.path().join("missing.csv")))
            .run()
            .err()
            .unwrap();
        assert_eq!(err.code(), "SOURCE_UNAVAILABLE");
    }
}
