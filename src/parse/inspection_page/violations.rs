use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;
use scraper::ElementRef;

use crate::parse::text_from_selection::element_text;
use crate::parse::{remove_excess_whitespace, Error};
use crate::static_selector;

/// Width of the status code that closes every compliance row, e.g. `OUT - 2`.
pub const TRAILING_CODE_WIDTH: usize = 7;

/// A row of the compliance table that reports a failed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceRow {
    text: String,
    /// Text of the cells ahead of the status code, when the code has cells of its own.
    leading: Option<String>,
}

impl From<&str> for ComplianceRow {
    fn from(text: &str) -> Self {
        Self {
            text: text.trim().to_owned(),
            leading: None,
        }
    }
}

/// Out-of-compliance rows start and end with a digit; headers and totals don't.
pub fn is_violation_row(text: &str) -> bool {
    let text = text.trim();
    text.starts_with(|c: char| c.is_ascii_digit()) && text.ends_with(|c: char| c.is_ascii_digit())
}

/// Drops the fixed-width status code from the end of `text`.
pub fn strip_trailing_code(text: &str) -> Result<&str, Error> {
    let cut = text
        .char_indices()
        .rev()
        .nth(TRAILING_CODE_WIDTH - 1)
        .map(|(i, _)| i)
        .filter(|&i| i > 0)
        .ok_or_else(|| {
            Error::MarkupShape(format!(
                "Compliance row `{text}` is too short to carry a {TRAILING_CODE_WIDTH} character code"
            ))
        })?;
    Ok(text[..cut].trim())
}

/// A status word followed by the points it costs, e.g. `OUT - 2` or `COS 4`.
fn is_status_code(text: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:OUT|COS|IN|N/O|N/A|MAJ|MIN)\b[\s:-]*\d+$").expect("regex should be valid")
    })
    .is_match(text.trim())
}

/// Joins the cells ahead of the shortest run of trailing cells that reads as a status
/// code. `None` if no such run exists or nothing is left in front of it.
fn split_at_status_code(cells: &[String]) -> Option<String> {
    (1..cells.len())
        .rev()
        .find(|&start| is_status_code(&cells[start..].join(" ")))
        .map(|start| cells[..start].join(" ").trim().to_owned())
        .filter(|leading| !leading.is_empty())
}

impl ComplianceRow {
    /// `None` for rows that are not violations.
    pub fn from_html_element(element: ElementRef<'_>) -> Option<Self> {
        static_selector!(CELL_SELECTOR <- "td");
        let text = element_text(element);
        if !is_violation_row(&text) {
            return None;
        }
        let cells: Vec<String> = element.select(&CELL_SELECTOR).map(element_text).collect();
        let leading = split_at_status_code(&cells);
        Some(Self { text, leading })
    }

    /// The item number and description, without the status code.
    pub fn description(&self) -> Result<Cow<'_, str>, Error> {
        let description = match &self.leading {
            Some(leading) => leading.as_str(),
            None => strip_trailing_code(&self.text)?,
        };
        Ok(remove_excess_whitespace(description))
    }
}

/// Joins the descriptions of `rows` with `", "`, skipping rows without one.
pub fn format_violations(rows: &[ComplianceRow]) -> String {
    rows.iter()
        .filter_map(|row| match row.description() {
            Ok(description) => Some(description),
            Err(e) => {
                log::warn!("Skipping compliance row: {e}");
                None
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Out-of-compliance violations listed in the report's main table(s).
pub fn violations_from_html_element(element: ElementRef<'_>) -> String {
    static_selector!(ROW_SELECTOR <- "table.insideTable tr");
    let rows: Vec<ComplianceRow> = element
        .select(&ROW_SELECTOR)
        .filter_map(ComplianceRow::from_html_element)
        .collect();
    if rows.is_empty() {
        log::debug!("No out of compliance rows found");
    }
    format_violations(&rows)
}
