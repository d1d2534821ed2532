//! Response shapes and table rendering shared by the handlers.

use crate::engine::{MatchedField, ScoredMedicine};
use crate::model::MedicineRecord;
use crate::pricing::{LocalityAdjustment, PricedRecord};
use crate::utils::round2;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table column may grow before cells are truncated.
const MAX_COLUMN_WIDTH: usize = 40;

// ============================================================================
// Response shapes
// ============================================================================

/// A record as shown to users: prices plus the per-prescription savings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedMedicine {
    #[serde(flatten)]
    pub record: MedicineRecord,
    /// `brand - generic`, rounded to cents
    pub savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<LocalityAdjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_field: Option<MatchedField>,
}

impl FormattedMedicine {
    /// Format a record at catalog prices.
    #[must_use]
    pub fn new(record: MedicineRecord) -> Self {
        let savings = round2(record.average_brand_price - record.average_generic_price);
        Self {
            record,
            savings,
            locality: None,
            score: None,
            matched_field: None,
        }
    }

    /// Format a record at locality-adjusted prices.
    #[must_use]
    pub fn priced(priced: PricedRecord) -> Self {
        let mut formatted = Self::new(priced.record);
        formatted.locality = Some(priced.locality);
        formatted
    }

    /// Attach the search score that ranked this record.
    #[must_use]
    pub fn with_score(mut self, hit: &ScoredMedicine) -> Self {
        self.score = Some(hit.score);
        self.matched_field = Some(hit.matched_field);
        self
    }
}

/// Response of the `search` command.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<FormattedMedicine>,
    pub count: usize,
}

/// Response of the `alternatives` command.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativesResponse {
    pub base: FormattedMedicine,
    pub alternatives: Vec<FormattedMedicine>,
    pub count: usize,
}

/// Error body for rejected input and unknown names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Payload for a name that matched nothing.
    pub fn not_found(name: &str) -> Self {
        Self::new(format!("No medicine found for '{name}'."))
    }

    /// Payload for a search query that is too short.
    pub fn query_too_short(min_length: usize) -> Self {
        let amount = match min_length {
            1 => "one character".to_string(),
            2 => "two characters".to_string(),
            3 => "three characters".to_string(),
            n => format!("{n} characters"),
        };
        Self::new(format!("Please provide at least {amount} to search."))
    }
}

/// Price cell text: unknown prices show as `n/a`.
pub fn format_price(price: f64) -> String {
    if price > 0.0 {
        format!("{price:.2}")
    } else {
        "n/a".to_string()
    }
}

// ============================================================================
// Table rendering
// ============================================================================

/// Plain-text table with display-width aware padding.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    right_aligned: Vec<bool>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            right_aligned: vec![false; headers.len()],
            rows: Vec::new(),
        }
    }

    /// Right-align the given column indices.
    #[must_use]
    pub fn right_align(mut self, columns: &[usize]) -> Self {
        for &column in columns {
            if let Some(flag) = self.right_aligned.get_mut(column) {
                *flag = true;
            }
        }
        self
    }

    /// Add a row; missing cells render empty, extra cells are dropped.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table, optionally with a bold header line.
    pub fn render(&self, bold_header: bool) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_COLUMN_WIDTH)
            })
            .collect();

        let mut out = String::new();
        let header = self.render_line(self.headers.iter().copied(), &widths);
        if bold_header {
            out.push_str(&format!("\x1b[1m{header}\x1b[0m\n"));
        } else {
            out.push_str(&header);
            out.push('\n');
        }

        for row in &self.rows {
            let cells = (0..self.headers.len()).map(|i| row.get(i).map_or("", String::as_str));
            out.push_str(&self.render_line(cells, &widths));
            out.push('\n');
        }
        out
    }

    fn render_line<'a>(&self, cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
        let rendered: Vec<String> = cells
            .zip(widths)
            .zip(&self.right_aligned)
            .map(|((cell, &width), &right)| pad(&truncate(cell, width), width, right))
            .collect();
        rendered.join("  ").trim_end().to_string()
    }
}

/// Pad to a display width.
pub fn pad(s: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(s.width()));
    if right {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}

/// Truncate to a display width, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let (budget, ellipsis) = if max > 3 { (max - 3, "...") } else { (max, "") };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_savings() {
        let record = MedicineRecord::new("Lipitor", "Atorvastatin").with_prices(320.5, 11.8);
        let formatted = FormattedMedicine::new(record);
        assert_eq!(formatted.savings, 308.7);

        let json = serde_json::to_value(&formatted).unwrap();
        assert_eq!(json["brand_name"], "Lipitor");
        assert_eq!(json["savings"], 308.7);
        assert!(json.get("locality").is_none());
        assert!(json.get("score").is_none());
    }

    #[test]
    fn test_query_too_short_message() {
        assert_eq!(
            ErrorPayload::query_too_short(2).error,
            "Please provide at least two characters to search."
        );
        assert_eq!(
            ErrorPayload::query_too_short(5).error,
            "Please provide at least 5 characters to search."
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(4.5), "4.50");
        assert_eq!(format_price(0.0), "n/a");
    }

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("Tylenol", 10), "Tylenol");
        assert_eq!(truncate("Acetaminophen", 8), "Aceta...");
        // Wide characters take two columns each.
        assert_eq!(truncate("日本語テキスト", 7), "日本...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4, false), "ab  ");
        assert_eq!(pad("ab", 4, true), "  ab");
        assert_eq!(pad("日本", 6, false), "日本  ");
    }

    #[test]
    fn test_table_render() {
        let mut table = Table::new(&["BRAND", "PRICE"]).right_align(&[1]);
        table.push_row(vec!["Tylenol".to_string(), "4.50".to_string()]);
        table.push_row(vec!["Advil".to_string(), "12.00".to_string()]);

        let rendered = table.render(false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "BRAND    PRICE");
        assert_eq!(lines[1], "Tylenol   4.50");
        assert_eq!(lines[2], "Advil    12.00");
    }
}
