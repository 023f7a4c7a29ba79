use crate::domain::constants::DEFAULT_DATA_DIR;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "readiness",
    version,
    about = "Procurement readiness scoring for aviation and tourism indicator tables"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_DATA_DIR,
        help = "Directory holding input tables and derived outputs"
    )]
    pub data_dir: PathBuf,
    #[arg(
        long,
        global = true,
        help = "Scoring config (TOML); defaults to <data-dir>/scoring.toml when present"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Join indicators, classify governance and write both derived tables
    Run {
        #[arg(long, help = "AI procurement index table (country, year, ai_procurement_index)")]
        ai_index: Option<PathBuf>,
    },
    /// Compute the AI procurement index for the raw governance flag tables
    Index,
    Show {
        #[command(subcommand)]
        command: ShowCommands,
    },
    /// Dashboard metrics over the inputs and derived tables
    Summary {
        #[arg(long)]
        country: Option<String>,
    },
    /// Check presence and columns of every input table
    Validate,
}

#[derive(Subcommand, Debug)]
pub enum ShowCommands {
    /// Derived governance flags
    Governance {
        #[arg(long)]
        country: Option<String>,
    },
    /// Derived readiness scores, current or legacy layout
    Scores {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        sector: Option<String>,
    },
}
