use indexmap::IndexSet;

use super::NULL_TOKEN;

const SEPARATOR: &str = " | ";

/// Join alternatives into one union expression.
///
/// `None` stands for the null literal. Duplicates are dropped by exact text
/// (first occurrence wins), so `string` and `'a'` are never merged. Callers
/// always pass at least one alternative; zero yields `""`.
pub fn combine(values: &[Option<String>]) -> String {
    let unique = values
        .iter()
        .map(|v| v.as_deref().unwrap_or(NULL_TOKEN))
        .collect::<IndexSet<&str>>();
    unique.into_iter().collect::<Vec<_>>().join(SEPARATOR)
}

/// Render enum members as a union of single-quoted literals.
///
/// Null members are skipped; the surrounding union decides nullability.
/// Embedded quotes are not escaped.
pub fn combine_enum(values: &[Option<String>]) -> String {
    values
        .iter()
        .flatten()
        .map(|v| if v.is_empty() { "''".to_string() } else { format!("'{v}'") })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn combine_keeps_first_occurrence_order() {
        assert_eq!(combine(&[some("number"), some("string"), some("number")]), "number | string");
        assert_eq!(combine(&[some("string"), some("string")]), "string");
    }

    #[test]
    fn combine_renders_null_as_token() {
        assert_eq!(combine(&[some("string"), None]), "string | null");
        assert_eq!(combine(&[None, some("string")]), "null | string");
        assert_eq!(combine(&[None, None]), "null");
        assert_eq!(combine(&[some("null"), None]), "null");
    }

    #[test]
    fn combine_only_merges_exact_text() {
        assert_eq!(combine(&[some("'a' | 'b'"), some("string")]), "'a' | 'b' | string");
    }

    #[test]
    fn combine_of_nothing_is_empty() {
        assert_eq!(combine(&[]), "");
    }

    #[test]
    fn enum_drops_null_members() {
        let values = [some("joka"), some("boka"), some("test"), None];
        assert_eq!(combine_enum(&values), "'joka' | 'boka' | 'test'");
        assert_eq!(combine_enum(&[None, some("a")]), "'a'");
    }

    #[test]
    fn enum_keeps_empty_string_member() {
        assert_eq!(combine_enum(&[some(""), some("x")]), "'' | 'x'");
    }

    #[test]
    fn enum_does_not_escape_or_dedupe() {
        assert_eq!(combine_enum(&[some("it's"), some("a"), some("a")]), "'it's' | 'a' | 'a'");
    }
}
