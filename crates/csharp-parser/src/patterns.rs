//! Regex fragments and keyword tables shared by the recognizers.

use crate::scan::next_char_boundary;
use regex::{Captures, Regex};

/// An identifier.
pub(crate) const IDENT: &str = r"[\p{L}_][\p{L}\p{N}_]*";

/// A type reference: dotted name, optional generic arguments (two levels of
/// nesting are enough for `Dictionary<string, List<int>>`), nullable marker and
/// array ranks.
pub(crate) const TYPE: &str =
    r"[\p{L}_][\w.]*(?:\s*<[\w\s,.?\[\]]*(?:<[\w\s,.?\[\]]*(?:<[\w\s,.?\[\]]*>[\w\s,.?\[\]]*)*>[\w\s,.?\[\]]*)*>)?\??(?:\s*\[[\s,]*\])*\??";

/// Member modifiers, as an alternation.
pub(crate) const MODIFIER: &str = "public|private|protected|internal|static|readonly|const|virtual|override|abstract|sealed|new|async|extern|unsafe|volatile|partial|required";

/// Access modifiers, as an alternation.
pub(crate) const ACCESS: &str = "public|private|protected|internal";

/// Words that can never be a type or member name in the positions the
/// recognizers capture. Includes the TypeScript keywords that appear in
/// already converted output.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "base", "break", "case", "catch", "checked", "class",
    "const", "continue", "declare", "default", "delegate", "do", "else", "enum", "event",
    "explicit", "export", "extends", "extern", "false", "finally", "fixed", "for", "foreach", "function",
    "get", "goto", "if", "implements", "implicit", "in", "init", "interface", "internal", "is", "let", "lock",
    "nameof", "namespace", "new", "null", "operator", "out", "override", "params", "partial",
    "private", "protected", "public", "readonly", "record", "ref", "required", "return", "sealed",
    "set", "sizeof", "stackalloc", "static", "struct", "switch", "this", "throw", "true", "try",
    "typeof", "unchecked", "unsafe", "using", "var", "virtual", "volatile", "when", "where",
    "while", "yield",
];

/// Returns true if `word` is reserved in a type or name position.
pub(crate) fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Returns the leading word of a type reference (`List` for `List<int>`).
pub(crate) fn type_head(ty: &str) -> &str {
    ty.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or(ty)
}

/// Splits a captured run of modifiers into words.
pub(crate) fn split_modifiers(mods: &str) -> Vec<smol_str::SmolStr> {
    mods.split_whitespace().map(Into::into).collect()
}

/// Runs `re` over `code` and returns the first candidate `accept` turns into a
/// value.
///
/// A rejected candidate resumes the search one character after its start, so
/// a later, overlapping candidate can still be found.
pub(crate) fn find_accepted<T>(
    re: &Regex,
    code: &str,
    mut accept: impl FnMut(&Captures<'_>) -> Option<T>,
) -> Option<T> {
    let mut from = 0;
    while from < code.len() {
        let caps = re.captures_at(code, from)?;
        let start = caps.get(0)?.start();
        if let Some(found) = accept(&caps) {
            return Some(found);
        }
        from = next_char_boundary(code, start);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static TYPE_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^(?:{TYPE})$")).unwrap());

    #[test]
    fn test_type_fragment() {
        for ty in [
            "int",
            "int?",
            "byte[]",
            "string[,]",
            "System.DateTime",
            "List<Address>",
            "Dictionary<string, List<int>>",
            "IEnumerable<KeyValuePair<string, List<int?>>>",
            "Task<IActionResult>",
        ] {
            assert!(TYPE_ONLY.is_match(ty), "{ty} should be a type");
        }
        assert!(!TYPE_ONLY.is_match("List<int"));
    }

    #[test]
    fn test_keywords() {
        assert!(is_keyword("return"));
        assert!(is_keyword("export"));
        assert!(!is_keyword("string"));
        assert!(!is_keyword("void"));
    }

    #[test]
    fn test_type_head() {
        assert_eq!(type_head("List<int>"), "List");
        assert_eq!(type_head("int?"), "int");
        assert_eq!(type_head("return"), "return");
    }

    #[test]
    fn test_find_accepted_resumes_after_rejection() {
        let re = Regex::new(r"\b\w+\b").unwrap();
        let found = find_accepted(&re, "return value", |caps| {
            let word = caps.get(0)?.as_str();
            (!is_keyword(word)).then(|| word.to_string())
        });
        assert_eq!(found.as_deref(), Some("value"));
    }
}
