use scraper::ElementRef;

use crate::parse::text_from_selection::non_empty_text;
use crate::parse::{Error, Result};
use crate::static_selector;

/// The letter grade: last character of the last points table in the grading section.
pub fn grade_from_html_element(element: ElementRef<'_>) -> Result<char> {
    static_selector!(GRADE_TABLE_SELECTOR <- "div.page2Content table.totPtsTbl");
    let table = element
        .select(&GRADE_TABLE_SELECTOR)
        .last()
        .ok_or_else(|| Error::markup_shape_error("Every inspection report should have a grading table."))?;
    let text = non_empty_text(table, "grading table")?;
    text.chars()
        .last()
        .ok_or_else(|| Error::text_node_error("Grading table should have text inside."))
}
