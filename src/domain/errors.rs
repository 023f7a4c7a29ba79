/// Failures surfaced by the scoring core.
///
/// Every variant maps to a stable error code used in the `--json` envelope.
#[derive(thiserror::Error, Debug)]
pub enum ScoringError {
    #[error("{table}: missing required column(s): {}", .missing.join(", "))]
    Schema { table: String, missing: Vec<String> },
    #[error("{table}: malformed table: {message}")]
    Malformed { table: String, message: String },
    #[error("{table}: line {line}: invalid {column} value {value:?}")]
    InvalidValue {
        table: String,
        line: u64,
        column: String,
        value: String,
    },
    #[error("{table}: duplicate row for {country}/{year}")]
    DuplicateKey {
        table: String,
        country: String,
        year: i32,
    },
    #[error("{table}: source unavailable at {path}: {reason}")]
    SourceUnavailable {
        table: String,
        path: String,
        reason: String,
    },
    #[error("failed to persist {path}: {reason}")]
    Persist { path: String, reason: String },
    #[error("invalid scoring config: {0}")]
    Config(String),
}

impl ScoringError {
    pub fn code(&self) -> &'static str {
        match self {
            ScoringError::Schema { .. }
            | ScoringError::Malformed { .. }
            | ScoringError::InvalidValue { .. }
            | ScoringError::DuplicateKey { .. } => "SCHEMA_ERROR",
            ScoringError::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            ScoringError::Persist { .. } => "PIPELINE_ERROR",
            ScoringError::Config(_) => "CONFIG_ERROR",
        }
    }
}
