//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements one subcommand, writes its result to the configured
//! output target and returns the process exit code.

mod catalog;
mod format;
mod lookup;
mod output;
mod savings;
mod search;

pub use catalog::{run_localities, run_refresh, run_stats};
pub use format::{
    format_price, AlternativesResponse, ErrorPayload, FormattedMedicine, SearchResponse, Table,
};
pub use lookup::{run_alternatives, run_show};
pub use output::{should_use_color, write_output, OutputTarget};
pub use savings::{run_savings, SavingsArgs, DEFAULT_PRESCRIPTIONS_PER_YEAR};
pub use search::{run_search, SearchArgs};

use crate::config::OutputFormat;
use anyhow::Result;

/// Command completed with a result.
pub const EXIT_SUCCESS: i32 = 0;
/// No medicine matched the name or query.
pub const EXIT_NOT_FOUND: i32 = 1;
/// Input was rejected (query too short, bad prices, unreadable feed).
pub const EXIT_INVALID_INPUT: i32 = 2;

/// Resolve a user-supplied limit: absent means the default, negative means none.
#[must_use]
pub fn resolve_limit(limit: Option<i64>, default: usize) -> usize {
    match limit {
        None => default,
        Some(n) => usize::try_from(n).unwrap_or(0),
    }
}

/// Write an error payload to the output target.
fn emit_error(payload: &ErrorPayload, format: OutputFormat, target: &OutputTarget) -> Result<()> {
    match format {
        OutputFormat::Json => write_output(&serde_json::to_string_pretty(payload)?, target),
        OutputFormat::Table => write_output(&payload.error, target),
    }
}
