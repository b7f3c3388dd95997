//! Class, struct, interface and record declarations.

use crate::ast::{ClassDecl, ConvertedDecl, TypeKind};
use crate::patterns::{find_accepted, is_keyword, split_modifiers, IDENT};
use crate::scan::{find_closing, preceding_word, split_top_level};
use crate::ParseResult;
use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

static CLASS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<mods>(?:(?:public|private|protected|internal|static|abstract|sealed|partial|new|unsafe|readonly|ref|file)\s+)*)(?P<kind>class|struct|interface|record(?:\s+(?:class|struct))?)\s+(?P<name>{IDENT})\s*(?:<(?P<tparams>[^<>{{}};]*)>)?\s*(?::\s*(?P<bases>[^{{}};]*?))?\s*(?:\bwhere\b[^{{}};]*)?\{{"
    ))
    .expect("class header regex")
});

static CONVERTED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\bexport\s+(?:(?:default|declare|abstract)\s+)*(?:class|interface|namespace|enum)\s+(?P<name>{IDENT})[^{{}};]*\{{"
    ))
    .expect("converted header regex")
});

/// Finds the next type declaration.
///
/// The match runs through the closing brace of the body. When the body is not
/// closed, only the header is matched and `body` is `None`. Declarations that
/// already read `export class` are TypeScript and are skipped; see
/// [`parse_converted`].
pub fn parse_class(code: &str) -> Option<ParseResult<ClassDecl>> {
    find_accepted(&CLASS_HEADER, code, |caps| {
        let header = caps.get(0)?;
        let name = caps.name("name")?.as_str();
        if is_keyword(name) || follows_export(code, header.start()) {
            return None;
        }

        let kind = match caps.name("kind")?.as_str() {
            "class" => TypeKind::Class,
            "struct" => TypeKind::Struct,
            "interface" => TypeKind::Interface,
            kind if kind.ends_with("struct") => TypeKind::Struct,
            _ => TypeKind::Record,
        };

        let type_params = caps
            .name("tparams")
            .map(|m| {
                split_top_level(m.as_str())
                    .into_iter()
                    .map(SmolStr::from)
                    .collect()
            })
            .unwrap_or_default();

        let bases = caps
            .name("bases")
            .map(|m| {
                split_top_level(m.as_str())
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let open = header.end() - 1;
        let (body, end) = match find_closing(code, open) {
            Some(close) => (Some(code[open + 1..close - 1].to_string()), close),
            None => (None, header.end()),
        };

        Some(ParseResult::new(
            ClassDecl {
                modifiers: split_modifiers(caps.name("mods")?.as_str()),
                kind,
                name: name.into(),
                type_params,
                bases,
                body,
                indent: line_indent(code, header.start()).to_string(),
            },
            header.start(),
            end,
        ))
    })
}

/// Finds the next TypeScript type declaration, as produced by converting a
/// C# type.
///
/// The match covers the balanced body, so converting the text again leaves
/// the declaration and everything inside it alone.
pub fn parse_converted(code: &str) -> Option<ParseResult<ConvertedDecl>> {
    let caps = CONVERTED_HEADER.captures(code)?;
    let header = caps.get(0)?;
    let end = find_closing(code, header.end() - 1).unwrap_or(header.end());
    Some(ParseResult::new(
        ConvertedDecl {
            name: caps.name("name")?.as_str().into(),
            text: code[header.start()..end].to_string(),
        },
        header.start(),
        end,
    ))
}

/// The whitespace from the start of the line up to `at`, or `""` when other
/// text precedes `at` on its line.
fn line_indent(code: &str, at: usize) -> &str {
    let line_start = code[..at].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &code[line_start..at];
    if prefix.trim().is_empty() {
        prefix
    } else {
        ""
    }
}

/// Returns true if the words before `at` are `export`, `export default` or
/// `declare`, possibly followed by `abstract`.
fn follows_export(code: &str, mut at: usize) -> bool {
    loop {
        match preceding_word(code, at) {
            "export" | "declare" => return true,
            word @ ("abstract" | "default") => at = code[..at].trim_end().len() - word.len(),
            _ => return false,
        }
    }
}
