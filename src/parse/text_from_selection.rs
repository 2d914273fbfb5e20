use super::Error;
use scraper::{ElementRef, Selector};

/// First element under `element` matching `selector`.
pub fn first_selection<'a>(
    selector: &Selector,
    element: ElementRef<'a>,
    parent_label: &str,
    child_label: &str,
) -> Result<ElementRef<'a>, Error> {
    element.select(selector).next().ok_or_else(|| {
        Error::MarkupShape(format!(
            "Every {parent_label} should have a {child_label}."
        ))
    })
}

/// Every text node below `element` concatenated, with the ends trimmed.
/// Inner whitespace is kept as-is since some callers count characters from the end.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Like [`element_text`] but fails when nothing is left after trimming.
pub fn non_empty_text(element: ElementRef<'_>, text_label: &str) -> Result<String, Error> {
    let text = element_text(element);
    if text.is_empty() {
        let mut text_label = text_label.to_string();
        text_label[..1].make_ascii_uppercase();
        return Err(Error::TextNode(format!("{text_label} should have text inside.")));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_selector;
    use scraper::Html;

    #[test]
    fn test_element_text_joins_nested_nodes() {
        let doc = Html::parse_fragment("<p>  Total <b>points</b>: 96 A \n</p>");
        static_selector!(P <- "p");
        let p = first_selection(&P, doc.root_element(), "fragment", "paragraph").unwrap();
        assert_eq!(element_text(p), "Total points: 96 A");
    }

    #[test]
    fn test_missing_selection_names_both_labels() {
        let doc = Html::parse_fragment("<div></div>");
        static_selector!(TABLE <- "table.totPtsTbl");
        let err = first_selection(&TABLE, doc.root_element(), "report", "grade table").unwrap_err();
        assert_eq!(
            err,
            Error::MarkupShape("Every report should have a grade table.".into())
        );
    }

    #[test]
    fn test_non_empty_text() {
        let doc = Html::parse_fragment("<span>   </span>");
        static_selector!(SPAN <- "span");
        let span = first_selection(&SPAN, doc.root_element(), "fragment", "span").unwrap();
        assert!(matches!(
            non_empty_text(span, "grade"),
            Err(Error::TextNode(msg)) if msg == "Grade should have text inside."
        ));
    }
}
