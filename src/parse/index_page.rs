use scraper::ElementRef;
use url::Url;

use crate::static_selector;

/// Links to every inspection report on a search results page, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionLinks {
    links: Vec<Url>,
}

/// Turns a relative report href into an absolute url on `site`.
/// Up to two leading dots are dropped, the rest of the path is kept as-is.
pub fn rewrite_href(site: &str, href: &str) -> Option<String> {
    if !href.starts_with('.') {
        return None;
    }
    let href = href.strip_prefix('.').unwrap_or(href);
    let href = href.strip_prefix('.').unwrap_or(href);
    Some(format!("{}{href}", site.trim_end_matches('/')))
}

impl InspectionLinks {
    pub fn from_html_element(element: ElementRef<'_>, site: &str) -> Self {
        static_selector!(ANCHOR_SELECTOR <- "a");
        let mut links = Vec::new();
        for anchor in element.select(&ANCHOR_SELECTOR) {
            let Some(href) = anchor.attr("href") else {
                log::debug!("Skipping anchor without href: {:?}", anchor.value().attr("name"));
                continue;
            };
            let Some(rewritten) = rewrite_href(site, href) else {
                continue;
            };
            match Url::parse(&rewritten) {
                Ok(url) => links.push(url),
                Err(e) => log::warn!("Skipping report link `{rewritten}`: {e}"),
            }
        }
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Url> {
        self.links.iter()
    }
}

impl IntoIterator for InspectionLinks {
    type Item = Url;
    type IntoIter = std::vec::IntoIter<Url>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;
    use std::fs;

    const SITE: &str = "http://ca.healthinspections.us";

    #[test]
    fn test_from_search_results() {
        let html = fs::read_to_string("./src/parse/html_examples/index/search_results.html").unwrap();
        let document = Html::parse_document(&html);
        let links = InspectionLinks::from_html_element(document.root_element(), SITE);
        let links: Vec<_> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            links,
            [
                "http://ca.healthinspections.us/_templates/NCA/Restaurant/_report_full.cfm?domainID=11&fsimID=1001&reportID=7001",
                "http://ca.healthinspections.us/_templates/NCA/Restaurant/_report_full.cfm?domainID=11&fsimID=1002&reportID=7002",
                "http://ca.healthinspections.us/_templates/NCA/Restaurant/_report_full.cfm?domainID=11&fsimID=1001&reportID=7001",
                "http://ca.healthinspections.us/napa/_report_summary.cfm?reportID=7003",
            ]
        );
    }

    #[test]
    fn test_rewrite_href() {
        assert_eq!(
            rewrite_href(SITE, "../_templates/a.cfm?x=1").as_deref(),
            Some("http://ca.healthinspections.us/_templates/a.cfm?x=1")
        );
        assert_eq!(
            rewrite_href("http://ca.healthinspections.us/", "./a.cfm").as_deref(),
            Some("http://ca.healthinspections.us/a.cfm")
        );
        // only two dots are dropped
        assert_eq!(
            rewrite_href(SITE, ".../a.cfm").as_deref(),
            Some("http://ca.healthinspections.us./a.cfm")
        );
        assert_eq!(rewrite_href(SITE, "/napa/index.cfm"), None);
        assert_eq!(rewrite_href(SITE, "search.cfm?start=21"), None);
    }

    #[test]
    fn test_anchor_without_href() {
        let document = Html::parse_document(
            r#"<a name="top"></a><a href="../_templates/r.cfm?id=1">Report</a>"#,
        );
        let links = InspectionLinks::from_html_element(document.root_element(), SITE);
        assert_eq!(links.len(), 1);
        assert!(!links.is_empty());
    }
}
