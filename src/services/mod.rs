//! Service layer containing scoring logic and side-effect helpers.
//!
//! ## Service map
//! - `config.rs` — scoring config (weights, sector table, readiness rules) + TOML loading.
//! - `governance.rs` — governance score, sector score, AI procurement index.
//! - `engine.rs` — join, median classification, readiness scoring (pure).
//! - `pipeline.rs` — load → score → atomic persist for one data directory.
//! - `indexing.rs` — `*_computed.csv` generation from raw governance flags.
//! - `validation.rs` — input table presence/schema report.
//! - `storage.rs` — CSV rendering, staged atomic writes, non-failing readers.
//! - `compat.rs` — legacy opportunity-table translation.
//! - `summary.rs` — country filter + dashboard metrics.
//! - `output.rs` — JSON/text output helpers and the error envelope.
//!
//! ## Conventions
//! - The engine and scorer stay pure; filesystem access lives in pipeline/storage.
//! - Nothing is written until every output has been rendered in memory.
//! - Keep command handlers thin; delegate to services.

pub mod compat;
pub mod config;
pub mod engine;
pub mod governance;
pub mod indexing;
pub mod output;
pub mod pipeline;
pub mod storage;
pub mod summary;
pub mod validation;
