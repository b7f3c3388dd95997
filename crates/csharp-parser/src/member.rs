//! Fallback for `public` declarations with a body that no specific recognizer
//! claimed, such as enums.

use crate::ast::MemberDecl;
use crate::patterns::{find_accepted, is_keyword, type_head};
use crate::ParseResult;
use once_cell::sync::Lazy;
use regex::Regex;

static MEMBER_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\bpublic\s+(?:(?:abstract|sealed|static|partial|readonly|unsafe|new)\s+)*(?P<kind>[\p{L}_]\w*)\s+(?P<name>[\p{L}_]\w*(?:<[^<>\n{]*>)?)[^\n{;=()]*?\s*\{",
    )
    .expect("member header regex")
});

/// Type keywords that are valid in the kind position.
const TYPE_KEYWORDS: &[&str] = &["class", "struct", "interface", "enum", "record"];

/// Finds the next `public kind Name ... {` header. The match ends at the brace;
/// the body is left for the driver.
pub fn parse_member(code: &str) -> Option<ParseResult<MemberDecl>> {
    find_accepted(&MEMBER_HEADER, code, |caps| {
        let kind = caps.name("kind")?.as_str();
        if is_keyword(kind) && !TYPE_KEYWORDS.contains(&kind) {
            return None;
        }
        let name = caps.name("name")?.as_str();
        if is_keyword(type_head(name)) {
            return None;
        }
        let whole = caps.get(0)?;
        Some(ParseResult::new(
            MemberDecl {
                kind: kind.into(),
                name: name.into(),
            },
            whole.start(),
            whole.end(),
        ))
    })
}
