//! Catalog-level command handlers: `stats`, `localities` and `refresh`.

use super::format::{ErrorPayload, Table};
use super::output::{should_use_color, write_output, OutputTarget};
use super::{emit_error, EXIT_INVALID_INPUT, EXIT_SUCCESS};
use crate::catalog::JsonFileFeed;
use crate::config::{AppConfig, OutputFormat};
use crate::engine::{MedicineMatcher, MergeReport};
use crate::model::SummaryStats;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Run the stats command.
pub fn run_stats(matcher: &MedicineMatcher, config: &AppConfig) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let stats = matcher.summary_stats();

    let output = match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(&stats)?,
        OutputFormat::Table => format_stats(&stats),
    };
    write_output(&output, &target)?;
    Ok(EXIT_SUCCESS)
}

/// One row of the locality listing.
#[derive(Debug, Clone, Serialize)]
struct LocalityEntry<'a> {
    locality: &'a str,
    multiplier: f64,
}

/// Run the localities command.
pub fn run_localities(matcher: &MedicineMatcher, config: &AppConfig) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let entries: Vec<LocalityEntry<'_>> = matcher
        .localities()
        .entries()
        .map(|(locality, multiplier)| LocalityEntry {
            locality,
            multiplier,
        })
        .collect();

    let output = match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(&entries)?,
        OutputFormat::Table => {
            let mut table = Table::new(&["LOCALITY", "MULTIPLIER"]).right_align(&[1]);
            for entry in &entries {
                table.push_row(vec![
                    entry.locality.to_string(),
                    format!("{:.2}", entry.multiplier),
                ]);
            }
            table.render(should_use_color(config.output.no_color, &target))
        }
    };
    write_output(&output, &target)?;
    Ok(EXIT_SUCCESS)
}

/// Run the refresh command: merge a JSON feed into the catalog.
///
/// A feed that cannot be read or is not a JSON array is reported as invalid
/// input; the catalog is left untouched.
pub fn run_refresh(
    matcher: &MedicineMatcher,
    config: &AppConfig,
    feed_path: &Path,
    limit: Option<usize>,
) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let feed = JsonFileFeed::new(feed_path).with_limit(limit);

    let report = match matcher.merge_feed(&feed) {
        Ok(report) => report,
        Err(e) => {
            tracing::debug!(error = %e, "refresh failed");
            emit_error(&ErrorPayload::new(e.to_string()), config.output.format, &target)?;
            return Ok(EXIT_INVALID_INPUT);
        }
    };

    let output = match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => format_merge_report(&report),
    };
    write_output(&output, &target)?;
    Ok(EXIT_SUCCESS)
}

pub(crate) fn format_stats(stats: &SummaryStats) -> String {
    let mut out = format!("Medicines in catalog:          {}\n", stats.total_count);
    match stats.pricing {
        Some(ref pricing) => {
            out.push_str(&format!(
                "Average brand price:           {:.2}\n",
                pricing.average_brand_price
            ));
            out.push_str(&format!(
                "Average generic price:         {:.2}\n",
                pricing.average_generic_price
            ));
            out.push_str(&format!(
                "Average savings per refill:    {:.2}\n",
                pricing.average_savings
            ));
        }
        None => out.push_str("No records with both prices known\n"),
    }
    out
}

pub(crate) fn format_merge_report(report: &MergeReport) -> String {
    let mut out = format!("Merged feed {}\n", report.feed);
    out.push_str(&format!("  Added:              {}\n", report.added));
    out.push_str(&format!("  Rejected rows:      {}\n", report.rejected));
    out.push_str(&format!(
        "  Skipped duplicates: {}\n",
        report.skipped_duplicates
    ));
    out.push_str(&format!("  Catalog size:       {}\n", report.total_records));
    out.push_str(&format!(
        "  Generated at:       {}\n",
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    for note in &report.metadata.notes {
        out.push_str(&format!("  Note: {note}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MedicineRecord, PriceAverages};

    #[test]
    fn test_format_stats_with_pricing() {
        let records = vec![
            MedicineRecord::new("A", "a").with_prices(10.0, 2.0),
            MedicineRecord::new("B", "b").with_prices(20.0, 4.0),
        ];
        let stats = SummaryStats::compute(&records);
        assert_eq!(
            stats.pricing,
            Some(PriceAverages {
                average_brand_price: 15.0,
                average_generic_price: 3.0,
                average_savings: 12.0,
            })
        );
        let text = format_stats(&stats);
        assert!(text.contains("Medicines in catalog:          2"));
        assert!(text.contains("12.00"));
    }

    #[test]
    fn test_format_stats_without_pricing() {
        let stats = SummaryStats::compute(&[MedicineRecord::new("A", "a")]);
        assert!(format_stats(&stats).contains("No records with both prices known"));
    }
}
