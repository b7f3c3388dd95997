//! Properties and fields.

use crate::ast::{PropertyDecl, PropertyKind};
use crate::patterns::{
    find_accepted, is_keyword, split_modifiers, type_head, IDENT, MODIFIER, TYPE,
};
use crate::scan::{find_closing, find_statement_end, skip_trivia};
use crate::ParseResult;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `Type Name {` or `Type Name =>`.
static PROPERTY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<mods>(?:(?:{MODIFIER})\s+)*)(?P<type>{TYPE})\s+(?P<name>{IDENT})\s*(?P<open>\{{|=>)"
    ))
    .expect("property header regex")
});

/// `modifiers Type Name;` or `modifiers Type Name =`.
static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<mods>(?:(?:{MODIFIER})\s+)+)(?P<type>{TYPE})\s+(?P<name>{IDENT})\s*(?P<tail>;|=)"
    ))
    .expect("field regex")
});

/// The start of an accessor list: optional attributes and access modifier,
/// then `get`, `set` or `init`.
static ACCESSOR_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\[[^\]]*\]\s*)*(?:(?:public|private|protected|internal)\s+)*(?:get|set|init)\b")
        .expect("accessor regex")
});

static WRITE_ACCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[;{}\]\s])(?:(?:public|private|protected|internal)\s+)*(?:set|init)\s*[;{=]")
        .expect("write accessor regex")
});

/// Finds the next property or field.
///
/// Properties need an accessor list (`{ get; set; }`, accessor bodies allowed)
/// or an expression body. Fields need at least one modifier so that local
/// variable declarations are not mistaken for them. When both match at the
/// same offset the property wins.
pub fn parse_property(code: &str) -> Option<ParseResult<PropertyDecl>> {
    let property = find_accepted(&PROPERTY_HEADER, code, |caps| accept_property(code, caps));
    let field = find_accepted(&FIELD, code, |caps| accept_field(code, caps));

    match (property, field) {
        (Some(p), Some(f)) if f.index < p.index => Some(f),
        (Some(p), _) => Some(p),
        (None, f) => f,
    }
}

fn valid_names<'a>(caps: &Captures<'a>) -> Option<(&'a str, &'a str)> {
    let ty = caps.name("type")?.as_str();
    let name = caps.name("name")?.as_str();
    if is_keyword(type_head(ty)) || is_keyword(name) {
        return None;
    }
    Some((ty, name))
}

fn accept_property(code: &str, caps: &Captures<'_>) -> Option<ParseResult<PropertyDecl>> {
    let (ty, name) = valid_names(caps)?;
    let whole = caps.get(0)?;
    let open = caps.name("open")?;

    let (kind, mut end) = if open.as_str() == "=>" {
        (PropertyKind::Expression, find_statement_end(code, open.end())?)
    } else {
        if !ACCESSOR_START.is_match(&code[open.end()..]) {
            return None;
        }
        let close = find_closing(code, open.start())?;
        let accessors = &code[open.end()..close - 1];
        let settable = WRITE_ACCESSOR.is_match(accessors);
        (PropertyKind::Auto { settable }, close)
    };

    let mut initializer = None;
    if kind != PropertyKind::Expression {
        let next = skip_trivia(code, end);
        if code[next..].starts_with('=') && !code[next..].starts_with("=>") {
            let stmt_end = find_statement_end(code, next + 1)?;
            initializer = Some(code[next + 1..stmt_end - 1].trim().to_string());
            end = stmt_end;
        }
    }

    Some(ParseResult::new(
        PropertyDecl {
            modifiers: split_modifiers(caps.name("mods")?.as_str()),
            ty: ty.to_string(),
            name: name.into(),
            initializer,
            kind,
        },
        whole.start(),
        end,
    ))
}

fn accept_field(code: &str, caps: &Captures<'_>) -> Option<ParseResult<PropertyDecl>> {
    let (ty, name) = valid_names(caps)?;
    let whole = caps.get(0)?;
    let tail = caps.name("tail")?;

    let (initializer, end) = if tail.as_str() == ";" {
        (None, tail.end())
    } else {
        // `==` and `=>` are not initializers.
        if matches!(code[tail.end()..].chars().next(), Some('=' | '>')) {
            return None;
        }
        let stmt_end = find_statement_end(code, tail.end())?;
        (
            Some(code[tail.end()..stmt_end - 1].trim().to_string()),
            stmt_end,
        )
    };

    Some(ParseResult::new(
        PropertyDecl {
            modifiers: split_modifiers(caps.name("mods")?.as_str()),
            ty: ty.to_string(),
            name: name.into(),
            initializer,
            kind: PropertyKind::Field,
        },
        whole.start(),
        end,
    ))
}
