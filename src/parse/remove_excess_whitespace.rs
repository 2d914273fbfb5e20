use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Collapses every run of whitespace (including lone newlines and tabs) into a single space.
pub fn remove_excess_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s\s+|[\t\n\r]").expect("regex should be valid"));
    re.replace_all(s, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs() {
        assert_eq!(
            remove_excess_whitespace("Hands clean\n\t and   properly washed"),
            "Hands clean and properly washed"
        );
    }

    #[test]
    fn test_borrows_when_clean() {
        assert!(matches!(
            remove_excess_whitespace("already clean"),
            Cow::Borrowed(_)
        ));
    }
}
