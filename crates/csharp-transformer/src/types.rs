//! C# type references to TypeScript types.

use crate::names::trim_postfixes;
use crate::Options;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// A parsed C# type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeRef<'a> {
    /// A name with its generic arguments. The name is the last segment of a
    /// qualified name.
    Named {
        name: &'a str,
        args: Vec<TypeRef<'a>>,
    },
    /// `T[]`; multi-dimensional arrays nest.
    Array(Box<TypeRef<'a>>),
    /// `T?`
    Nullable(Box<TypeRef<'a>>),
    /// `(A, B)`
    Tuple(Vec<TypeRef<'a>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Number,
    String,
    Boolean,
    Any,
    Void,
    Date,
}

static BUILTINS: Lazy<FxHashMap<&'static str, Builtin>> = Lazy::new(|| {
    use Builtin::*;
    [
        ("sbyte", Number),
        ("byte", Number),
        ("short", Number),
        ("ushort", Number),
        ("int", Number),
        ("uint", Number),
        ("long", Number),
        ("ulong", Number),
        ("nint", Number),
        ("nuint", Number),
        ("float", Number),
        ("double", Number),
        ("decimal", Number),
        ("SByte", Number),
        ("Byte", Number),
        ("Int16", Number),
        ("UInt16", Number),
        ("Int32", Number),
        ("UInt32", Number),
        ("Int64", Number),
        ("UInt64", Number),
        ("Single", Number),
        ("Double", Number),
        ("Decimal", Number),
        ("string", String),
        ("String", String),
        ("char", String),
        ("Char", String),
        ("Guid", String),
        ("TimeSpan", String),
        ("TimeOnly", String),
        ("Uri", String),
        ("bool", Boolean),
        ("Boolean", Boolean),
        ("object", Any),
        ("Object", Any),
        ("dynamic", Any),
        ("JObject", Any),
        ("JToken", Any),
        ("JsonElement", Any),
        ("void", Void),
        ("DateTime", Date),
        ("DateTimeOffset", Date),
        ("DateOnly", Date),
    ]
    .into_iter()
    .collect()
});

/// Generic collections rendered as `T[]`.
fn is_list_like(name: &str) -> bool {
    matches!(
        name,
        "List"
            | "IList"
            | "ICollection"
            | "IEnumerable"
            | "IReadOnlyList"
            | "IReadOnlyCollection"
            | "Collection"
            | "ReadOnlyCollection"
            | "ObservableCollection"
            | "HashSet"
            | "ISet"
            | "IReadOnlySet"
            | "SortedSet"
            | "LinkedList"
            | "Queue"
            | "Stack"
            | "IQueryable"
            | "IAsyncEnumerable"
            | "ImmutableArray"
            | "ImmutableList"
            | "ImmutableHashSet"
    )
}

/// Generic maps rendered as index signatures.
fn is_dictionary_like(name: &str) -> bool {
    matches!(
        name,
        "Dictionary"
            | "IDictionary"
            | "IReadOnlyDictionary"
            | "SortedDictionary"
            | "SortedList"
            | "ConcurrentDictionary"
            | "ImmutableDictionary"
    )
}

impl<'a> TypeRef<'a> {
    /// Parses a type reference. Returns `None` for text that is not one.
    pub(crate) fn parse(text: &'a str) -> Option<Self> {
        let mut parser = TypeParser { text, pos: 0 };
        let ty = parser.ty()?;
        parser.skip_ws();
        (parser.pos == text.len()).then_some(ty)
    }

    /// Returns true for `Name` with exactly `arity` generic arguments.
    pub(crate) fn is_named(&self, expected: &str, arity: usize) -> bool {
        matches!(self, Self::Named { name, args } if *name == expected && args.len() == arity)
    }

    /// The first generic argument of a named type.
    pub(crate) fn first_arg(&self) -> Option<&TypeRef<'a>> {
        match self {
            Self::Named { args, .. } => args.first(),
            _ => None,
        }
    }

    /// Renders the TypeScript form.
    pub(crate) fn render(&self, options: &Options) -> String {
        match self {
            Self::Nullable(inner) => format!("{} | null", inner.render(options)),
            Self::Array(inner) => {
                if options.byte_array_to_string && inner.is_named("byte", 0) {
                    return "string".to_string();
                }
                format!("{}[]", parenthesize(inner.render(options)))
            }
            Self::Tuple(items) => format!("[{}]", render_list(items, options)),
            Self::Named { name, args } => render_named(name, args, options),
        }
    }
}

fn render_named(name: &str, args: &[TypeRef<'_>], options: &Options) -> String {
    match (name, args) {
        (_, []) if BUILTINS.contains_key(name) => match BUILTINS[name] {
            Builtin::Number => "number".to_string(),
            Builtin::String => "string".to_string(),
            Builtin::Boolean => "boolean".to_string(),
            Builtin::Any => "any".to_string(),
            Builtin::Void => "void".to_string(),
            Builtin::Date if options.date_to_date_or_string => "Date | string".to_string(),
            Builtin::Date => "Date".to_string(),
        },
        ("Nullable", [inner]) => format!("{} | null", inner.render(options)),
        ("Task" | "ValueTask", []) => "Promise<void>".to_string(),
        ("Task" | "ValueTask", [inner]) => format!("Promise<{}>", inner.render(options)),
        ("KeyValuePair", [key, value]) => format!(
            "{{ key: {}; value: {} }}",
            key.render(options),
            value.render(options)
        ),
        (_, [inner]) if is_list_like(name) => format!("{}[]", parenthesize(inner.render(options))),
        (_, [key, value]) if is_dictionary_like(name) => {
            let key = match key.render(options).as_str() {
                "number" => "number",
                _ => "string",
            };
            format!("{{ [key: {key}]: {} }}", value.render(options))
        }
        (_, []) => trim_postfixes(name, options).to_string(),
        _ => format!(
            "{}<{}>",
            trim_postfixes(name, options),
            render_list(args, options)
        ),
    }
}

fn render_list(items: &[TypeRef<'_>], options: &Options) -> String {
    items
        .iter()
        .map(|item| item.render(options))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wraps union types so that a following `[]` applies to the whole union.
fn parenthesize(ty: String) -> String {
    if ty.contains(" | ") {
        format!("({ty})")
    } else {
        ty
    }
}

/// Converts a C# type reference to TypeScript.
///
/// Text that does not parse as a type is returned trimmed, with postfixes
/// removed.
pub fn convert_type(ty: &str, options: &Options) -> String {
    match TypeRef::parse(ty.trim()) {
        Some(parsed) => parsed.render(options),
        None => trim_postfixes(ty.trim(), options).to_string(),
    }
}

struct TypeParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn ty(&mut self) -> Option<TypeRef<'a>> {
        let mut ty = if self.eat('(') {
            self.tuple()?
        } else {
            self.named()?
        };

        loop {
            if self.eat('?') {
                ty = TypeRef::Nullable(Box::new(ty));
            } else if self.eat('[') {
                let mut rank = 1;
                while self.eat(',') {
                    rank += 1;
                }
                if !self.eat(']') {
                    return None;
                }
                for _ in 0..rank {
                    ty = TypeRef::Array(Box::new(ty));
                }
            } else {
                return Some(ty);
            }
        }
    }

    /// Parses the rest of `(A a, B b)` after the opening parenthesis.
    fn tuple(&mut self) -> Option<TypeRef<'a>> {
        let mut items = Vec::new();
        loop {
            items.push(self.ty()?);
            // Element names carry no type information.
            self.skip_ws();
            self.ident();
            if self.eat(')') {
                return Some(TypeRef::Tuple(items));
            }
            if !self.eat(',') {
                return None;
            }
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '@' | '.' | ':') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        &self.text[start..self.pos]
    }

    fn named(&mut self) -> Option<TypeRef<'a>> {
        self.skip_ws();
        let path = self.ident();
        let name = path.rsplit(|c| c == '.' || c == ':').next()?.trim_start_matches('@');
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.ty()?);
                if self.eat('>') {
                    break;
                }
                if !self.eat(',') {
                    return None;
                }
            }
        }
        Some(TypeRef::Named { name, args })
    }
}
