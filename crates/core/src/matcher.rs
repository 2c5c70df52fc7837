//! Content pre-filter for post scans
//!
//! [`PostMatcher`] is the combined "any of these literals" pattern handed to
//! [`Repository::posts_matching`](crate::Repository::posts_matching). Every
//! input string is escaped before compilation, so slug text can never be
//! interpreted as pattern syntax.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Case-insensitive alternation of literal strings
#[derive(Debug, Clone)]
pub struct PostMatcher {
    regex: Regex,
}

impl PostMatcher {
    /// Build a matcher that selects any body containing one of `literals`,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `literals` is empty.
    pub fn any_literal<I, S>(literals: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let escaped: Vec<String> = literals
            .into_iter()
            .map(|s| regex::escape(s.as_ref()))
            .collect();
        if escaped.is_empty() {
            return Err(Error::InvalidInput(
                "post matcher needs at least one literal".into(),
            ));
        }
        let pattern = format!("({})", escaped.join("|"));
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// True if `raw` contains any of the literals, ignoring case
    pub fn is_match(&self, raw: &str) -> bool {
        self.regex.is_match(raw)
    }

    /// The compiled pattern text, for diagnostics
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_literal() {
        let m = PostMatcher::any_literal(["#support", "#docs:faq"]).unwrap();
        assert!(m.is_match("see #support for help"));
        assert!(m.is_match("moved to #docs:faq"));
        assert!(!m.is_match("nothing to see"));
    }

    #[test]
    fn test_ignores_case() {
        let m = PostMatcher::any_literal(["#Support"]).unwrap();
        assert!(m.is_match("ask in #SUPPORT"));
    }

    #[test]
    fn test_literals_are_escaped() {
        let m = PostMatcher::any_literal(["#a.b", "#c+"]).unwrap();
        assert!(m.is_match("#a.b"));
        assert!(!m.is_match("#axb"));
        assert!(m.is_match("#c+"));
        assert!(!m.is_match("#ccc"));
    }

    #[test]
    fn test_empty_rejected() {
        let none: [&str; 0] = [];
        assert!(PostMatcher::any_literal(none).is_err());
    }
}
