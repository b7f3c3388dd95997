//! Methods, constructors and their parameter lists.

use crate::ast::{ConstructorDecl, MethodBody, MethodDecl, Parameter, ParameterModifier};
use crate::patterns::{
    find_accepted, is_keyword, split_modifiers, type_head, ACCESS, IDENT, MODIFIER, TYPE,
};
use crate::scan::{
    find_closing, find_statement_end, preceding_word, skip_trivia, split_top_level,
};
use crate::ParseResult;
use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

static METHOD_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<mods>(?:(?:{MODIFIER})\s+)*)(?P<ret>{TYPE})\s+(?P<name>{IDENT})\s*(?:<(?P<tparams>[^<>(){{}};]*)>)?\s*\("
    ))
    .expect("method header regex")
});

static CONSTRUCTOR_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<mods>(?:(?:{ACCESS}|static|extern|unsafe)\s+)+)(?P<name>{IDENT})\s*\("
    ))
    .expect("constructor header regex")
});

static CONSTRUCTOR_INITIALIZER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:\s*(?:base|this)\s*\(").expect("initializer regex"));

static CONSTRAINTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^where\b[^{;=]*").expect("constraints regex"));

static PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:\[[^\]]*\]\s*)*(?:(?P<modifier>ref|out|in|params|this)\s+)?(?:scoped\s+)?(?P<type>{TYPE})\s+(?P<name>@?{IDENT})\s*(?:=\s*(?P<default>[\s\S]+))?$"
    ))
    .expect("parameter regex")
});

/// Finds the next method declaration.
///
/// The header must be followed by a block body, an expression body, or `;`.
/// Calls and statements are filtered out by rejecting keywords in the return
/// type or name position (`return Foo(x);`, `new Bar(y)`, `else if (z)`).
/// Delegate declarations are not methods.
pub fn parse_method(code: &str) -> Option<ParseResult<MethodDecl>> {
    find_accepted(&METHOD_HEADER, code, |caps| {
        let ret = caps.name("ret")?.as_str();
        let name = caps.name("name")?.as_str();
        if is_keyword(type_head(ret)) || is_keyword(name) {
            return None;
        }

        let whole = caps.get(0)?;
        if preceding_word(code, whole.start()) == "delegate" {
            return None;
        }
        let parens = parse_parameter_list(code, whole.end() - 1)?;
        let after = skip_constraints(code, parens.end);
        let (body, end) = parse_body(code, after)?;

        let type_params = caps
            .name("tparams")
            .map(|m| {
                split_top_level(m.as_str())
                    .into_iter()
                    .map(SmolStr::from)
                    .collect()
            })
            .unwrap_or_default();

        Some(ParseResult::new(
            MethodDecl {
                modifiers: split_modifiers(caps.name("mods")?.as_str()),
                return_type: ret.to_string(),
                name: name.into(),
                type_params,
                parameters: parens.parameters,
                body,
            },
            whole.start(),
            end,
        ))
    })
}

/// Finds the next constructor declaration.
///
/// At least one access or `static` modifier is required, which is what tells a
/// constructor apart from a call.
pub fn parse_constructor(code: &str) -> Option<ParseResult<ConstructorDecl>> {
    find_accepted(&CONSTRUCTOR_HEADER, code, |caps| {
        let name = caps.name("name")?.as_str();
        if is_keyword(name) {
            return None;
        }

        let whole = caps.get(0)?;
        let parens = parse_parameter_list(code, whole.end() - 1)?;

        let mut after = skip_trivia(code, parens.end);
        let mut initializer = None;
        if let Some(m) = CONSTRUCTOR_INITIALIZER.find(&code[after..]) {
            let close = find_closing(code, after + m.end() - 1)?;
            initializer = Some(code[after + 1..close].trim().to_string());
            after = skip_trivia(code, close);
        }
        let (body, end) = parse_body(code, after)?;

        Some(ParseResult::new(
            ConstructorDecl {
                modifiers: split_modifiers(caps.name("mods")?.as_str()),
                name: name.into(),
                parameters: parens.parameters,
                initializer,
                body,
            },
            whole.start(),
            end,
        ))
    })
}

struct ParameterList {
    parameters: Vec<Parameter>,
    /// Offset just past the closing parenthesis.
    end: usize,
}

fn parse_parameter_list(code: &str, open: usize) -> Option<ParameterList> {
    let end = find_closing(code, open)?;
    let parameters = split_top_level(&code[open + 1..end - 1])
        .into_iter()
        .map(parse_parameter)
        .collect::<Option<Vec<_>>>()?;
    Some(ParameterList { parameters, end })
}

/// Parses one parameter. `None` means the text is not a declaration (an
/// argument of a call), which rejects the whole candidate.
fn parse_parameter(text: &str) -> Option<Parameter> {
    let caps = PARAMETER.captures(text)?;
    let ty = caps.name("type")?.as_str();
    if is_keyword(type_head(ty)) {
        return None;
    }

    let modifier = caps.name("modifier").map(|m| match m.as_str() {
        "ref" => ParameterModifier::Ref,
        "out" => ParameterModifier::Out,
        "in" => ParameterModifier::In,
        "params" => ParameterModifier::Params,
        _ => ParameterModifier::This,
    });

    Some(Parameter {
        modifier,
        ty: ty.to_string(),
        name: caps.name("name")?.as_str().trim_start_matches('@').into(),
        default: caps.name("default").map(|m| m.as_str().trim().to_string()),
    })
}

fn skip_constraints(code: &str, from: usize) -> usize {
    let at = skip_trivia(code, from);
    match CONSTRAINTS.find(&code[at..]) {
        Some(m) => skip_trivia(code, at + m.end()),
        None => at,
    }
}

/// Reads a block body, an expression body, or a bare `;` starting at `at`.
fn parse_body(code: &str, at: usize) -> Option<(MethodBody, usize)> {
    let rest = &code[at..];
    if rest.starts_with('{') {
        let close = find_closing(code, at)?;
        Some((MethodBody::Block(code[at..close].to_string()), close))
    } else if rest.starts_with("=>") {
        let end = find_statement_end(code, at + 2)?;
        let expr = code[at + 2..end - 1].trim().to_string();
        Some((MethodBody::Expression(expr), end))
    } else if rest.starts_with(';') {
        Some((MethodBody::None, at + 1))
    } else {
        None
    }
}
