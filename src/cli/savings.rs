//! `savings` command handler.
//!
//! Prices come from the command line, or from the catalog record named by
//! `--name` when a price is omitted.

use super::format::ErrorPayload;
use super::output::{write_output, OutputTarget};
use super::{emit_error, EXIT_INVALID_INPUT, EXIT_NOT_FOUND, EXIT_SUCCESS};
use crate::config::{AppConfig, OutputFormat};
use crate::engine::MedicineMatcher;
use crate::pricing::SavingsEstimate;
use anyhow::Result;

/// Default number of prescriptions filled per year.
pub const DEFAULT_PRESCRIPTIONS_PER_YEAR: u32 = 12;

/// Arguments of the `savings` command.
#[derive(Debug, Clone, Default)]
pub struct SavingsArgs {
    pub brand_price: Option<f64>,
    pub generic_price: Option<f64>,
    pub per_year: Option<u32>,
    pub name: Option<String>,
}

/// Run the savings command.
pub fn run_savings(matcher: &MedicineMatcher, config: &AppConfig, args: &SavingsArgs) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let format = config.output.format;

    let (brand_price, generic_price, name) = match (args.brand_price, args.generic_price) {
        (Some(brand), Some(generic)) => (brand, generic, args.name.clone()),
        (brand, generic) => {
            let Some(ref name) = args.name else {
                let payload =
                    ErrorPayload::new("Provide --brand-price and --generic-price, or --name");
                emit_error(&payload, format, &target)?;
                return Ok(EXIT_INVALID_INPUT);
            };
            let Some(record) = matcher.find_exact(name) else {
                emit_error(&ErrorPayload::not_found(name), format, &target)?;
                return Ok(EXIT_NOT_FOUND);
            };
            (
                brand.unwrap_or(record.average_brand_price),
                generic.unwrap_or(record.average_generic_price),
                Some(record.brand_name),
            )
        }
    };

    let per_year = args.per_year.unwrap_or(DEFAULT_PRESCRIPTIONS_PER_YEAR);
    let estimate = match SavingsEstimate::compute(brand_price, generic_price, per_year) {
        Ok(estimate) => estimate,
        Err(e) => {
            emit_error(&ErrorPayload::new(e.to_string()), format, &target)?;
            return Ok(EXIT_INVALID_INPUT);
        }
    };
    let estimate = match name {
        Some(name) => estimate.with_name(name),
        None => estimate,
    };

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&estimate)?,
        OutputFormat::Table => format_estimate(&estimate),
    };
    write_output(&output, &target)?;
    Ok(EXIT_SUCCESS)
}

pub(crate) fn format_estimate(estimate: &SavingsEstimate) -> String {
    let mut out = String::new();
    if let Some(ref name) = estimate.medicine_name {
        out.push_str(&format!("{name}\n"));
    }
    out.push_str(&format!(
        "Prescriptions per year: {}\n",
        estimate.prescriptions_per_year
    ));
    out.push_str(&format!(
        "Brand annual cost:      {:.2}\n",
        estimate.brand_annual_cost
    ));
    out.push_str(&format!(
        "Generic annual cost:    {:.2}\n",
        estimate.generic_annual_cost
    ));
    out.push_str(&format!(
        "Annual savings:         {:.2} ({:.2}%)\n",
        estimate.annual_savings, estimate.percentage_saved
    ));
    out
}
