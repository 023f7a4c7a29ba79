use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;
mod table;

pub use cli::*;
pub use domain::constants::*;
pub use domain::errors::ScoringError;
pub use domain::models::*;
pub use services::config::{load_config, ScoringConfig};
pub use services::governance::GovernanceScorer;
pub use services::indexing::compute_ai_index;
pub use services::output::{print_error, print_one, print_out};
pub use services::pipeline::ScoringPipeline;
pub use services::storage::{read_governance_flags, read_opportunity_scores};
pub use services::summary::{filter_governance, filter_scores, summarize, SummaryInputs};
pub use services::validation::validate_inputs;

use commands::{handle_inspect_commands, handle_pipeline_commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries command output only
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        let code = e
            .downcast_ref::<ScoringError>()
            .map(|s| s.code())
            .unwrap_or("INTERNAL");
        print_error(cli.json, code, &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    tracing::debug!(data_dir = %cli.data_dir.display(), "starting");
    if handle_pipeline_commands(cli)? {
        return Ok(());
    }
    handle_inspect_commands(cli)?;
    Ok(())
}
