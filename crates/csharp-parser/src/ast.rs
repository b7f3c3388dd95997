//! Records extracted by the recognizers.
//!
//! These carry just enough of each construct for the generators to render
//! TypeScript. Type references are kept as source text; converting them is the
//! generator's job.

use smol_str::SmolStr;

/// The keyword that introduced a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `class`
    Class,
    /// `struct` or `record struct`
    Struct,
    /// `interface`
    Interface,
    /// `record` or `record class`
    Record,
}

impl TypeKind {
    /// Returns the C# keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
        }
    }
}

/// A class, struct, interface or record declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// Modifiers before the keyword (`public`, `abstract`, ...).
    pub modifiers: Vec<SmolStr>,
    /// The declaration keyword.
    pub kind: TypeKind,
    /// The type name.
    pub name: SmolStr,
    /// Generic parameter names, without angle brackets.
    pub type_params: Vec<SmolStr>,
    /// Base class and interfaces, as written.
    pub bases: Vec<String>,
    /// Text between the braces, or `None` if the closing brace is missing.
    pub body: Option<String>,
    /// Whitespace between the start of the line and the declaration, when
    /// nothing else precedes it on that line.
    pub indent: String,
}

impl ClassDecl {
    /// Returns true if the declaration carries the given modifier.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

/// A TypeScript type declaration left by an earlier conversion
/// (`export class`, `export interface`, `export namespace`, `export enum`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDecl {
    /// The declared name.
    pub name: SmolStr,
    /// The declaration through its closing brace, or the header alone when
    /// the body is not closed.
    pub text: String,
}

/// How a property or field stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// `{ get; set; }` style accessors.
    Auto {
        /// Whether a `set` or `init` accessor is present.
        settable: bool,
    },
    /// `=> expression;`
    Expression,
    /// A plain field.
    Field,
}

/// A property or field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub modifiers: Vec<SmolStr>,
    /// The declared type, as written.
    pub ty: String,
    pub name: SmolStr,
    /// Initializer expression after `=`, without the `;`.
    pub initializer: Option<String>,
    pub kind: PropertyKind,
}

impl PropertyDecl {
    /// Returns true if the value cannot be assigned after construction.
    pub fn is_read_only(&self) -> bool {
        match self.kind {
            PropertyKind::Auto { settable } => !settable,
            PropertyKind::Expression => true,
            PropertyKind::Field => self
                .modifiers
                .iter()
                .any(|m| m == "readonly" || m == "const"),
        }
    }
}

/// A parameter modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterModifier {
    Ref,
    Out,
    In,
    Params,
    This,
}

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub modifier: Option<ParameterModifier>,
    /// The parameter type, as written.
    pub ty: String,
    pub name: SmolStr,
    /// Default value expression, if any.
    pub default: Option<String>,
}

/// The body of a method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    /// A `{ ... }` block, braces included.
    Block(String),
    /// The expression after `=>`, without the `;`.
    Expression(String),
    /// Declaration only (`abstract`, `extern`, interface members).
    None,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub modifiers: Vec<SmolStr>,
    /// The return type, as written.
    pub return_type: String,
    pub name: SmolStr,
    /// Generic parameter names, without angle brackets.
    pub type_params: Vec<SmolStr>,
    pub parameters: Vec<Parameter>,
    pub body: MethodBody,
}

impl MethodDecl {
    /// Returns true if the method is declared `async`.
    pub fn is_async(&self) -> bool {
        self.modifiers.iter().any(|m| m == "async")
    }
}

/// A constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub modifiers: Vec<SmolStr>,
    pub name: SmolStr,
    pub parameters: Vec<Parameter>,
    /// The `base(...)` or `this(...)` call, if any.
    pub initializer: Option<String>,
    pub body: MethodBody,
}

/// A section of an XML doc comment. Inline tags are already rendered to
/// plain text or JSDoc links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSection {
    Summary(String),
    Remarks(String),
    Param { name: SmolStr, text: String },
    TypeParam { name: SmolStr, text: String },
    Returns(String),
    Value(String),
    Exception { cref: SmolStr, text: String },
    Example(String),
    /// `<inheritdoc/>`
    InheritDoc,
}

/// A run of `///` comment lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    /// Whitespace before the first `///`.
    pub indent: String,
    /// Sections in source order.
    pub sections: Vec<DocSection>,
}

/// Where an attribute list sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributePlacement {
    /// On a line of its own; the line break is part of the match.
    OwnLine,
    /// Before a declaration on the same line.
    Inline,
}

/// One or more `[...]` attribute groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeList {
    /// Whitespace before the first `[`.
    pub indent: String,
    /// Group contents, without the brackets.
    pub attributes: Vec<String>,
    pub placement: AttributePlacement,
}

/// A public declaration the specific recognizers did not claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    /// The word after the modifiers (`enum`, `class`, ...).
    pub kind: SmolStr,
    /// The declared name, with generic parameters if present.
    pub name: SmolStr,
}
