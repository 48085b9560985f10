//! String utilities for the domain layer.

/// Trim a string and return it only if something is left.
///
/// Used for every override-then-default decision: blank and whitespace-only
/// values behave exactly like absent ones.
pub fn non_empty_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-blank value among the candidates, trimmed.
pub fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates.into_iter().find_map(non_empty_trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trimmed() {
        assert_eq!(non_empty_trimmed(Some("  abc ")), Some("abc".to_string()));
        assert_eq!(non_empty_trimmed(Some("   ")), None);
        assert_eq!(non_empty_trimmed(Some("")), None);
        assert_eq!(non_empty_trimmed(None), None);
    }

    #[test]
    fn test_first_non_empty_skips_blanks() {
        assert_eq!(
            first_non_empty([Some(" "), None, Some(" prebuilt-invoice ")]),
            Some("prebuilt-invoice".to_string())
        );
        assert_eq!(first_non_empty([Some(""), None]), None);
    }
}
