use scraper::ElementRef;

use crate::parse::text_from_selection::{element_text, first_selection};
use crate::parse::Error;
use crate::static_selector;

/// Where each identity field sits among the `span`s of the report's top section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopSectionLayout {
    pub facility_name: usize,
    pub inspection_date: usize,
    pub address: usize,
    pub inspection_type: usize,
}

impl Default for TopSectionLayout {
    fn default() -> Self {
        Self {
            facility_name: 0,
            inspection_date: 2,
            address: 4,
            inspection_type: 9,
        }
    }
}

/// Facility identity fields, as printed at the top of an inspection report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSection {
    pub facility_name: String,
    pub inspection_date: String,
    pub address: String,
    pub inspection_type: String,
}

impl TopSection {
    pub fn from_html_element(element: ElementRef<'_>, layout: TopSectionLayout) -> Result<Self, Error> {
        static_selector!(TOP_SECTION_SELECTOR <- "div.topSection");
        static_selector!(SPAN_SELECTOR <- "span");

        let section = first_selection(&TOP_SECTION_SELECTOR, element, "inspection report", "top section")?;
        let spans: Vec<String> = section.select(&SPAN_SELECTOR).map(element_text).collect();

        let field = |index: usize, label: &str| {
            spans.get(index).cloned().ok_or_else(|| {
                Error::MarkupShape(format!(
                    "Top section has {} spans, expected the {label} at position {index}",
                    spans.len()
                ))
            })
        };

        Ok(Self {
            facility_name: field(layout.facility_name, "facility name")?,
            inspection_date: field(layout.inspection_date, "inspection date")?,
            address: field(layout.address, "address")?,
            inspection_type: field(layout.inspection_type, "inspection type")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;
    use std::fs;

    #[test]
    fn test_from_report() {
        let html =
            fs::read_to_string("./src/parse/html_examples/inspection/report.html").unwrap();
        let document = Html::parse_document(&html);
        let top = TopSection::from_html_element(document.root_element(), TopSectionLayout::default())
            .expect("The example html should be valid");
        assert_eq!(
            top,
            TopSection {
                facility_name: "NAPA VALLEY CREPE CO".into(),
                inspection_date: "02/15/2017".into(),
                address: "1310 Napa Town Center, Napa, CA 94559".into(),
                inspection_type: "ROUTINE INSPECTION".into(),
            }
        );
    }

    #[test]
    fn test_short_top_section() {
        let document = Html::parse_document(
            r#"<div class="topSection"><span>ONLY A NAME</span><span>x</span><span>01/02/2017</span></div>"#,
        );
        let err = TopSection::from_html_element(document.root_element(), TopSectionLayout::default())
            .unwrap_err();
        assert_eq!(
            err,
            Error::MarkupShape("Top section has 3 spans, expected the address at position 4".into())
        );
    }

    #[test]
    fn test_missing_top_section() {
        let document = Html::parse_document("<div class=\"bottomSection\"></div>");
        assert!(matches!(
            TopSection::from_html_element(document.root_element(), TopSectionLayout::default()),
            Err(Error::MarkupShape(_))
        ));
    }

    #[test]
    fn test_custom_layout() {
        let document = Html::parse_document(
            r#"<div class="topSection">
                <span>Type</span><span>Name</span><span>Date</span><span>Address</span>
            </div>"#,
        );
        let layout = TopSectionLayout {
            facility_name: 1,
            inspection_date: 2,
            address: 3,
            inspection_type: 0,
        };
        let top = TopSection::from_html_element(document.root_element(), layout).unwrap();
        assert_eq!(top.facility_name, "Name");
        assert_eq!(top.inspection_type, "Type");
    }
}
