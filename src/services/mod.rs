//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `input.rs`: document id column from the uploaded workbook.
//! - `extract.rs`: flattening of one `detailpo` payload into rows.
//! - `ingest.rs`: sequential fetch loop with pacing, progress and cancellation.
//! - `summary.rs`: top products by qty, PO count per distribution center.
//! - `export.rs`: CSV export/import and the xlsx report with charts.
//! - `settings.rs`: optional TOML settings.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod export;
pub mod extract;
pub mod ingest;
pub mod input;
pub mod output;
pub mod settings;
pub mod summary;
