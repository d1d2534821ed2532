//! `show` and `alternatives` command handlers.

use super::format::{format_price, AlternativesResponse, ErrorPayload, FormattedMedicine, Table};
use super::output::{should_use_color, write_output, OutputTarget};
use super::{emit_error, resolve_limit, EXIT_NOT_FOUND, EXIT_SUCCESS};
use crate::config::{AppConfig, OutputFormat};
use crate::engine::MedicineMatcher;
use anyhow::Result;

/// Run the show command: exact lookup by brand or generic name.
pub fn run_show(
    matcher: &MedicineMatcher,
    config: &AppConfig,
    name: &str,
    locality: Option<&str>,
) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());

    let Some(record) = matcher.find_exact(name) else {
        emit_error(&ErrorPayload::not_found(name), config.output.format, &target)?;
        return Ok(EXIT_NOT_FOUND);
    };

    let locality = locality.or(config.locality.default_locality.as_deref());
    let formatted = match locality {
        Some(code) => FormattedMedicine::priced(matcher.adjust_prices(&record, code)),
        None => FormattedMedicine::new(record),
    };

    let output = match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(&formatted)?,
        OutputFormat::Table => format_detail(&formatted),
    };
    write_output(&output, &target)?;
    Ok(EXIT_SUCCESS)
}

/// Run the alternatives command.
pub fn run_alternatives(
    matcher: &MedicineMatcher,
    config: &AppConfig,
    name: &str,
    limit: Option<i64>,
) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());

    let Some(base) = matcher.find_exact(name) else {
        emit_error(&ErrorPayload::not_found(name), config.output.format, &target)?;
        return Ok(EXIT_NOT_FOUND);
    };

    let limit = resolve_limit(limit, config.matching.alternatives_limit);
    let alternatives: Vec<FormattedMedicine> = matcher
        .get_alternatives(&base, limit)
        .into_iter()
        .map(FormattedMedicine::new)
        .collect();

    let response = AlternativesResponse {
        base: FormattedMedicine::new(base),
        count: alternatives.len(),
        alternatives,
    };

    let output = match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Table => format_alternatives_table(
            &response,
            should_use_color(config.output.no_color, &target),
        ),
    };
    write_output(&output, &target)?;
    Ok(EXIT_SUCCESS)
}

/// Key/value listing of a single record.
pub(crate) fn format_detail(item: &FormattedMedicine) -> String {
    let record = &item.record;
    let mut out = String::new();

    out.push_str(&format!("{} ({})\n", record.brand_name, record.generic_name));
    if !record.form.is_empty() || !record.strength.is_empty() {
        out.push_str(&format!("  Form:          {} {}\n", record.form, record.strength));
    }
    if !record.indications.is_empty() {
        out.push_str(&format!("  Indications:   {}\n", record.indications.join(", ")));
    }
    out.push_str(&format!(
        "  Brand price:   {}\n",
        format_price(record.average_brand_price)
    ));
    out.push_str(&format!(
        "  Generic price: {}\n",
        format_price(record.average_generic_price)
    ));
    out.push_str(&format!("  Savings:       {:.2}\n", item.savings));
    if let Some(ref locality) = item.locality {
        out.push_str(&format!(
            "  Locality:      {} (x{:.2})\n",
            locality.locality, locality.multiplier
        ));
    }
    if let Some(ref notes) = record.notes {
        out.push_str(&format!("  Notes:         {notes}\n"));
    }
    for source in &record.sources {
        out.push_str(&format!("  Source:        {} <{}>\n", source.name, source.url));
    }
    out
}

/// Format alternatives as a table for terminal output.
pub(crate) fn format_alternatives_table(response: &AlternativesResponse, color: bool) -> String {
    let base = &response.base.record;
    let mut out = format!(
        "Alternatives to {} ({}), indications: {}\n\n",
        base.brand_name,
        base.generic_name,
        if base.indications.is_empty() {
            "none".to_string()
        } else {
            base.indications.join(", ")
        }
    );

    if response.alternatives.is_empty() {
        out.push_str("No alternatives found\n");
        return out;
    }

    let mut table =
        Table::new(&["BRAND", "GENERIC", "INDICATIONS", "GENERIC $", "BRAND $"]).right_align(&[3, 4]);
    for item in &response.alternatives {
        table.push_row(vec![
            item.record.brand_name.clone(),
            item.record.generic_name.clone(),
            item.record.indications.join(", "),
            format_price(item.record.average_generic_price),
            format_price(item.record.average_brand_price),
        ]);
    }
    out.push_str(&table.render(color));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MedicineRecord;

    #[test]
    fn test_format_detail() {
        let record = MedicineRecord::new("Lipitor", "Atorvastatin")
            .with_indications(["cholesterol"])
            .with_prices(320.5, 11.8);
        let detail = format_detail(&FormattedMedicine::new(record));

        assert!(detail.starts_with("Lipitor (Atorvastatin)\n"));
        assert!(detail.contains("Indications:   cholesterol"));
        assert!(detail.contains("Generic price: 11.80"));
        assert!(detail.contains("Savings:       308.70"));
        assert!(!detail.contains("Locality"));
    }

    #[test]
    fn test_alternatives_table_empty() {
        let response = AlternativesResponse {
            base: FormattedMedicine::new(MedicineRecord::new("Lonely", "Nothing")),
            alternatives: Vec::new(),
            count: 0,
        };
        let table = format_alternatives_table(&response, false);
        assert!(table.contains("indications: none"));
        assert!(table.ends_with("No alternatives found\n"));
    }
}
