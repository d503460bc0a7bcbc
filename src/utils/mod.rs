//! Utility functions and helpers.

pub mod http;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a course code for comparison: "comp 1405 " -> "COMP1405".
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Leading alphabetic prefix of a course code ("COMP1405" -> "COMP").
pub fn subject_prefix(code: &str) -> Option<String> {
    let prefix: String = code
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .flat_map(|c| c.to_uppercase())
        .collect();
    (!prefix.is_empty()).then_some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" comp 1405 "), "COMP1405");
        assert_eq!(normalize_code("MATH\u{a0}1007"), "MATH1007");
    }

    #[test]
    fn test_subject_prefix() {
        assert_eq!(subject_prefix("COMP1405"), Some("COMP".to_string()));
        assert_eq!(subject_prefix("math 1007"), Some("MATH".to_string()));
        assert_eq!(subject_prefix("1405"), None);
    }
}
