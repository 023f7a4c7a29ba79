//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — indicator records, derived tables, report/output structs.
//! - `constants.rs` — file names, column sets, sector names.
//! - `errors.rs` — typed scoring errors and their stable codes.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and the derived CSV
//! schemas. Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod errors;
pub mod models;
