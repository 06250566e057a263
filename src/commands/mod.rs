//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `inspect.rs`: ids/summarize/config: commands that never touch the portal.
//! - `harvest.rs`: fetch: the full read → fetch → summarize → export run.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*` and `portal`.
//! - Keep behavior and output schema stable.

pub mod harvest;
pub mod inspect;

pub use harvest::handle_fetch_command;
pub use inspect::handle_inspect_commands;
