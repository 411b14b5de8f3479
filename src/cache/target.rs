//! Clear Target Module
//!
//! Resolves what a `clear` call should remove, and the `*` wildcard rule
//! shared with `find`.

// == Clear Target ==
/// Which keys a `clear` call removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearTarget {
    /// Every key
    All,
    /// One literal key
    Single(String),
    /// Every key containing the substring
    Pattern(String),
    /// Each literal key in the list
    Many(Vec<String>),
}

impl ClearTarget {
    /// Resolves a key-or-pattern string.
    ///
    /// A string containing `*` is a pattern meaning "contains" the text left
    /// after dropping every `*`. When nothing is left the string is treated as
    /// a literal key.
    pub fn parse(input: &str) -> Self {
        match pattern_needle(input) {
            Some(needle) => ClearTarget::Pattern(needle),
            None => ClearTarget::Single(input.to_string()),
        }
    }
}

impl From<&str> for ClearTarget {
    fn from(input: &str) -> Self {
        ClearTarget::parse(input)
    }
}

impl From<String> for ClearTarget {
    fn from(input: String) -> Self {
        ClearTarget::parse(&input)
    }
}

impl From<Vec<String>> for ClearTarget {
    fn from(keys: Vec<String>) -> Self {
        ClearTarget::Many(keys)
    }
}

impl From<&[&str]> for ClearTarget {
    fn from(keys: &[&str]) -> Self {
        ClearTarget::Many(keys.iter().map(|key| key.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ClearTarget {
    fn from(keys: [&str; N]) -> Self {
        ClearTarget::Many(keys.iter().map(|key| key.to_string()).collect())
    }
}

/// The substring a wildcard pattern matches on.
///
/// Returns `None` for strings without `*`, and for strings made only of `*`.
pub fn pattern_needle(input: &str) -> Option<String> {
    if !input.contains('*') {
        return None;
    }
    let needle = input.replace('*', "");
    if needle.is_empty() {
        None
    } else {
        Some(needle)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_needle() {
        assert_eq!(pattern_needle("user:*"), Some("user:".to_string()));
        assert_eq!(pattern_needle("*ser*"), Some("ser".to_string()));
        assert_eq!(pattern_needle("a*b"), Some("ab".to_string()));
        assert_eq!(pattern_needle("***"), None);
        assert_eq!(pattern_needle("plain"), None);
        assert_eq!(pattern_needle(""), None);
    }

    #[test]
    fn test_parse_literal_and_pattern() {
        assert_eq!(ClearTarget::parse("one"), ClearTarget::Single("one".to_string()));
        assert_eq!(ClearTarget::parse("on*"), ClearTarget::Pattern("on".to_string()));
        assert_eq!(ClearTarget::parse("**"), ClearTarget::Single("**".to_string()));
    }

    #[test]
    fn test_from_sequences() {
        assert_eq!(
            ClearTarget::from(["a", "b"]),
            ClearTarget::Many(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            ClearTarget::from(vec!["x*".to_string()]),
            ClearTarget::Many(vec!["x*".to_string()])
        );
    }
}
