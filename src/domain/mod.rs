//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep row, diagnostic and report structs in one place.
//! - Avoid cyclic imports between the portal client, services and commands.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: row records, diagnostics, progress, summary and report structs.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and the CSV export.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod models;
