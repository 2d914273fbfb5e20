use scraper::ElementRef;

use super::grade::grade_from_html_element;
use super::top_section::{TopSection, TopSectionLayout};
use super::violations::violations_from_html_element;
use crate::parse::Address;
use crate::parse::Error;

/// Everything collected from one inspection report page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub facility_name: String,
    /// As printed on the report, not normalized.
    pub inspection_date: String,
    pub address: Address,
    pub inspection_type: String,
    pub grade: char,
    /// Out of compliance items joined with `", "`.
    pub violations: String,
}

impl Inspection {
    pub fn from_html_element(element: ElementRef<'_>, layout: TopSectionLayout) -> Result<Self, Error> {
        let top = TopSection::from_html_element(element, layout)?;
        let address = Address::parse(&top.address)?;
        let grade = grade_from_html_element(element)?;
        let violations = violations_from_html_element(element);

        Ok(Self {
            facility_name: top.facility_name,
            inspection_date: top.inspection_date,
            address,
            inspection_type: top.inspection_type,
            grade,
            violations,
        })
    }

    /// Fields paired with their report labels, in report order.
    pub fn fields(&self) -> [(&'static str, String); 9] {
        [
            (FACILITY_NAME, self.facility_name.clone()),
            (INSPECTION_DATE, self.inspection_date.clone()),
            (STREET_ADDRESS, self.address.street.clone()),
            (CITY, self.address.city.clone()),
            (STATE, self.address.state.clone()),
            (ZIPCODE, self.address.zip.clone()),
            (INSPECTION_TYPE, self.inspection_type.clone()),
            (INSPECTION_GRADE, self.grade.to_string()),
            (VIOLATIONS, self.violations.clone()),
        ]
    }
}

const FACILITY_NAME: &str = "Facility Name: ";
const INSPECTION_DATE: &str = "Inspection Date: ";
const STREET_ADDRESS: &str = "Street Address: ";
const CITY: &str = "City: ";
const STATE: &str = "State: ";
const ZIPCODE: &str = "Zipcode: ";
const INSPECTION_TYPE: &str = "Inspection Type: ";
const INSPECTION_GRADE: &str = "Inspection Grade: ";
const VIOLATIONS: &str = "Out of Compliance Violations: ";

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
        let inspection = Inspection::from_html_element(document.root_element(), TopSectionLayout::default())
            .expect("The example html should be valid");
        assert_eq!(inspection.facility_name, "NAPA VALLEY CREPE CO");
        assert_eq!(inspection.inspection_date, "02/15/2017");
        assert_eq!(
            inspection.address,
            Address {
                street: "1310 Napa Town Center".into(),
                city: "Napa".into(),
                state: "CA".into(),
                zip: "94559".into(),
            }
        );
        assert_eq!(inspection.inspection_type, "ROUTINE INSPECTION");
        assert_eq!(inspection.grade, 'A');
        assert!(inspection.violations.starts_with("6. Adequate handwashing"));
    }

    #[test]
    fn test_bad_address_fails_the_record() {
        let html = fs::read_to_string("./src/parse/html_examples/inspection/no_zip.html").unwrap();
        let document = Html::parse_document(&html);
        assert!(matches!(
            Inspection::from_html_element(document.root_element(), TopSectionLayout::default()),
            Err(Error::AddressParse(_))
        ));
    }

    #[test]
    fn test_fields_order() {
        let html =
            fs::read_to_string("./src/parse/html_examples/inspection/report.html").unwrap();
        let document = Html::parse_document(&html);
        let inspection =
            Inspection::from_html_element(document.root_element(), TopSectionLayout::default()).unwrap();
        let labels: Vec<_> = inspection.fields().iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            [
                "Facility Name: ",
                "Inspection Date: ",
                "Street Address: ",
                "City: ",
                "State: ",
                "Zipcode: ",
                "Inspection Type: ",
                "Inspection Grade: ",
                "Out of Compliance Violations: ",
            ]
        );
        assert_eq!(inspection.fields()[7].1, "A");
    }
}
