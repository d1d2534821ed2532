//! `search` command handler.
//!
//! Ranks catalog records against a free-text query and prints them with
//! optional locality pricing and score explanations.

use super::format::{format_price, ErrorPayload, FormattedMedicine, SearchResponse, Table};
use super::output::{should_use_color, write_output, OutputTarget};
use super::{emit_error, resolve_limit, EXIT_INVALID_INPUT, EXIT_NOT_FOUND, EXIT_SUCCESS};
use crate::config::{AppConfig, OutputFormat};
use crate::engine::MedicineMatcher;
use anyhow::Result;

/// Arguments of the `search` command.
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub query: String,
    /// Result limit; negative values return nothing
    pub limit: Option<i64>,
    /// Locality code for adjusted prices
    pub locality: Option<String>,
    /// Include score and matched field
    pub explain: bool,
}

/// Run the search command, returning the process exit code.
pub fn run_search(matcher: &MedicineMatcher, config: &AppConfig, args: &SearchArgs) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let query = args.query.trim();

    if query.chars().count() < config.output.min_query_length {
        let payload = ErrorPayload::query_too_short(config.output.min_query_length);
        emit_error(&payload, config.output.format, &target)?;
        return Ok(EXIT_INVALID_INPUT);
    }

    let limit = resolve_limit(args.limit, config.matching.search_limit);
    let locality = args
        .locality
        .as_deref()
        .or(config.locality.default_locality.as_deref());

    let results: Vec<FormattedMedicine> = matcher
        .search_scored(query, limit)
        .iter()
        .map(|hit| {
            let formatted = match locality {
                Some(code) => FormattedMedicine::priced(matcher.adjust_prices(&hit.record, code)),
                None => FormattedMedicine::new(hit.record.clone()),
            };
            if args.explain {
                formatted.with_score(hit)
            } else {
                formatted
            }
        })
        .collect();

    let response = SearchResponse {
        query: query.to_string(),
        count: results.len(),
        results,
    };

    let output = match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Table => format_search_table(
            &response,
            args.explain,
            should_use_color(config.output.no_color, &target),
        ),
    };
    write_output(&output, &target)?;

    Ok(if response.count == 0 {
        EXIT_NOT_FOUND
    } else {
        EXIT_SUCCESS
    })
}

/// Format search results as a table for terminal output.
pub(crate) fn format_search_table(response: &SearchResponse, explain: bool, color: bool) -> String {
    let mut out = String::new();

    if response.results.is_empty() {
        out.push_str(&format!("No medicines match \"{}\"\n", response.query));
        return out;
    }

    let mut headers = vec!["BRAND", "GENERIC", "FORM", "STRENGTH", "BRAND $", "GENERIC $", "SAVINGS"];
    if explain {
        headers.extend(["SCORE", "FIELD"]);
    }
    let mut table = Table::new(&headers).right_align(&[4, 5, 6, 7]);

    for item in &response.results {
        let mut row = vec![
            item.record.brand_name.clone(),
            item.record.generic_name.clone(),
            item.record.form.clone(),
            item.record.strength.clone(),
            format_price(item.record.average_brand_price),
            format_price(item.record.average_generic_price),
            format!("{:.2}", item.savings),
        ];
        if explain {
            row.push(item.score.map_or_else(String::new, |s| format!("{s:.2}")));
            row.push(
                item.matched_field
                    .map_or_else(String::new, |f| format!("{f:?}").to_lowercase()),
            );
        }
        table.push_row(row);
    }

    out.push_str(&table.render(color));

    if let Some(locality) = response.results.first().and_then(|r| r.locality.as_ref()) {
        out.push_str(&format!(
            "\nPrices adjusted for {} (x{:.2})\n",
            locality.locality, locality.multiplier
        ));
    }
    out.push_str(&format!(
        "\n{} result{} for \"{}\"\n",
        response.count,
        if response.count == 1 { "" } else { "s" },
        response.query
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MedicineRecord;

    fn response(explain: bool) -> SearchResponse {
        let hit = crate::engine::ScoredMedicine {
            record: MedicineRecord::new("Tylenol", "Acetaminophen")
                .with_form("Tablet", "500 mg")
                .with_prices(12.5, 4.0),
            score: 1.0,
            matched_field: crate::engine::MatchedField::Brand,
        };
        let formatted = FormattedMedicine::new(hit.record.clone());
        let formatted = if explain { formatted.with_score(&hit) } else { formatted };
        SearchResponse {
            query: "tylen".to_string(),
            results: vec![formatted],
            count: 1,
        }
    }

    #[test]
    fn test_table_contains_record() {
        let table = format_search_table(&response(false), false, false);
        assert!(table.starts_with("BRAND"));
        assert!(table.contains("Tylenol"));
        assert!(table.contains("8.50"));
        assert!(table.contains("1 result for \"tylen\""));
        assert!(!table.contains("SCORE"));
    }

    #[test]
    fn test_table_explain_columns() {
        let table = format_search_table(&response(true), true, false);
        assert!(table.contains("SCORE"));
        assert!(table.contains("brand"));
    }

    #[test]
    fn test_empty_results() {
        let empty = SearchResponse {
            query: "zzz".to_string(),
            results: Vec::new(),
            count: 0,
        };
        assert_eq!(format_search_table(&empty, false, false), "No medicines match \"zzz\"\n");
    }
}
