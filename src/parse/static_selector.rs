use std::sync::OnceLock;

use scraper::Selector;

/// A CSS selector compiled the first time it is dereferenced.
#[derive(Debug)]
pub(crate) struct StaticSelector<'a> {
    cell: OnceLock<Selector>,
    source: &'a str,
}

impl<'a> StaticSelector<'a> {
    pub(crate) const fn new(source: &'a str) -> Self {
        Self {
            cell: OnceLock::new(),
            source,
        }
    }
}

impl core::ops::Deref for StaticSelector<'_> {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        // selectors are literals in this crate, so a bad one is a programming error
        self.cell.get_or_init(|| match Selector::parse(self.source) {
            Ok(sel) => sel,
            Err(e) => panic!("invalid static selector `{}`: {e:?}", self.source),
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    #[test]
    fn test_selector_is_reused() {
        static_selector!(SPAN <- "div.topSection span");
        let doc = Html::parse_fragment(
            r#"<div class="topSection"><span>a</span><span>b</span></div>"#,
        );
        assert_eq!(doc.select(&SPAN).count(), 2);
        // second deref hits the initialized cell
        assert_eq!(doc.select(&SPAN).count(), 2);
    }
}
