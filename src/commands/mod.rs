//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `pipeline.rs` — `run` and `index`, the two commands that write derived tables.
//! - `inspect.rs` — `show`, `summary` and `validate`; read-only.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate scoring and file access to `services/*`.
//! - Keep behavior and output schema stable (`docs/contracts/*`).

pub mod inspect;
pub mod pipeline;

pub use inspect::handle_inspect_commands;
pub use pipeline::handle_pipeline_commands;
