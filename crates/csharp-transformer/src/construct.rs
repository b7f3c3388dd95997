//! The closed set of constructs and the adapter between recognizers and
//! generators.

use crate::generate::{
    generate_attribute, generate_class, generate_constructor, generate_doc_comment,
    generate_member, generate_method, generate_property,
};
use crate::Options;
use csharp_parser::{
    parse_attribute, parse_class, parse_constructor, parse_converted, parse_doc_comment,
    parse_member, parse_method, parse_property, AttributeList, ClassDecl, ConstructorDecl,
    ConvertedDecl, DocComment, MemberDecl, MethodDecl, ParseResult, PropertyDecl,
};
use source_map::Span;
use std::fmt;

/// A kind of C# construct the engine can rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Construct {
    Class,
    Property,
    Constructor,
    Method,
    DocComment,
    Attribute,
    /// The `public ... {` fallback.
    Member,
}

impl Construct {
    /// All constructs, highest priority first. Ties at the same offset go to
    /// the construct listed first.
    pub const PRIORITY: [Construct; 7] = [
        Self::Class,
        Self::Property,
        Self::Constructor,
        Self::Method,
        Self::DocComment,
        Self::Attribute,
        Self::Member,
    ];

    /// A short lowercase name, used in logs and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Property => "property",
            Self::Constructor => "constructor",
            Self::Method => "method",
            Self::DocComment => "doc_comment",
            Self::Attribute => "attribute",
            Self::Member => "member",
        }
    }

    /// Runs this construct's recognizer on `code` and renders the leftmost
    /// match.
    pub fn attempt(self, code: &str, options: &Options) -> Option<MatchResult> {
        self.recognize(code)?.adapt(options)
    }

    pub(crate) fn recognize(self, code: &str) -> Option<Recognized> {
        match self {
            Self::Class => recognize_type(code),
            Self::Property => parse_property(code).map(Recognized::Property),
            Self::Constructor => parse_constructor(code).map(Recognized::Constructor),
            Self::Method => parse_method(code).map(Recognized::Method),
            Self::DocComment => parse_doc_comment(code).map(Recognized::DocComment),
            Self::Attribute => parse_attribute(code).map(Recognized::Attribute),
            Self::Member => parse_member(code).map(Recognized::Member),
        }
    }
}

/// The leftmost C# type declaration or already converted TypeScript one.
fn recognize_type(code: &str) -> Option<Recognized> {
    let class = parse_class(code);
    let converted = parse_converted(code);
    match (class, converted) {
        (Some(class), Some(converted)) if converted.index <= class.index => {
            Some(Recognized::Converted(converted))
        }
        (Some(class), _) => Some(Recognized::Class(class)),
        (None, converted) => converted.map(Recognized::Converted),
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered replacement for one region of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Which construct produced the match.
    pub construct: Construct,
    /// The generated TypeScript.
    pub result: String,
    /// Start of the replaced region.
    pub index: usize,
    /// Length of the replaced region. Never zero.
    pub length: usize,
}

impl MatchResult {
    /// Offset just past the replaced region.
    #[inline]
    pub fn end(&self) -> usize {
        self.index + self.length
    }

    /// The replaced region as a span.
    #[inline]
    pub fn span(&self) -> Span {
        Span::from_index_len(self.index, self.length)
    }
}

/// A recognizer hit that has not been rendered yet.
///
/// The coordinator ranks hits before rendering, so that only the winner pays
/// for generation.
#[derive(Debug)]
pub(crate) enum Recognized {
    Class(ParseResult<ClassDecl>),
    /// TypeScript from an earlier pass, rendered unchanged.
    Converted(ParseResult<ConvertedDecl>),
    Property(ParseResult<PropertyDecl>),
    Constructor(ParseResult<ConstructorDecl>),
    Method(ParseResult<MethodDecl>),
    DocComment(ParseResult<DocComment>),
    Attribute(ParseResult<AttributeList>),
    Member(ParseResult<MemberDecl>),
}

impl Recognized {
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Class(r) => r.index,
            Self::Converted(r) => r.index,
            Self::Property(r) => r.index,
            Self::Constructor(r) => r.index,
            Self::Method(r) => r.index,
            Self::DocComment(r) => r.index,
            Self::Attribute(r) => r.index,
            Self::Member(r) => r.index,
        }
    }

    pub(crate) fn adapt(self, options: &Options) -> Option<MatchResult> {
        match self {
            Self::Class(r) => adapt(Construct::Class, Some(r), |d| generate_class(d, options)),
            Self::Converted(r) => adapt(Construct::Class, Some(r), |d| d.text.clone()),
            Self::Property(r) => {
                adapt(Construct::Property, Some(r), |d| generate_property(d, options))
            }
            Self::Constructor(r) => adapt(Construct::Constructor, Some(r), |d| {
                generate_constructor(d, options)
            }),
            Self::Method(r) => adapt(Construct::Method, Some(r), |d| generate_method(d, options)),
            Self::DocComment(r) => adapt(Construct::DocComment, Some(r), |d| {
                generate_doc_comment(d, options)
            }),
            Self::Attribute(r) => {
                adapt(Construct::Attribute, Some(r), |d| generate_attribute(d, options))
            }
            Self::Member(r) => adapt(Construct::Member, Some(r), |d| generate_member(d, options)),
        }
    }
}

/// Turns a recognizer's output into a [`MatchResult`] by rendering it with
/// `generate`.
///
/// `None` stays `None`. A zero-length hit is dropped with a warning, since
/// accepting it would stall the driver.
pub fn adapt<T>(
    construct: Construct,
    parsed: Option<ParseResult<T>>,
    generate: impl FnOnce(&T) -> String,
) -> Option<MatchResult> {
    let parsed = parsed?;
    if parsed.length == 0 {
        tracing::warn!(%construct, index = parsed.index, "dropping zero-length match");
        return None;
    }
    Some(MatchResult {
        construct,
        result: generate(&parsed.data),
        index: parsed.index,
        length: parsed.length,
    })
}
