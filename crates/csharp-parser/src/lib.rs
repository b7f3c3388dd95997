//! Construct recognizers for the C# subset cs2ts converts.
//!
//! Each recognizer finds the leftmost occurrence of one construct in a piece
//! of C# and extracts a record describing it:
//! - classes, structs, interfaces and records
//! - auto, full and expression-bodied properties, and fields
//! - constructors and methods
//! - `///` XML doc comments
//! - attribute lists
//! - a fallback for other `public` declarations with a body
//!
//! Recognizers never validate C#. Text they do not understand is simply not
//! matched. They never report an empty match.
//!
//! # Example
//!
//! ```
//! use csharp_parser::{parse_property, PropertyKind};
//!
//! let code = "    public string Name { get; set; }";
//! let result = parse_property(code).unwrap();
//! assert_eq!(result.index, 4);
//! assert_eq!(result.data.name, "Name");
//! assert_eq!(result.data.kind, PropertyKind::Auto { settable: true });
//! ```

mod ast;
mod attribute;
mod class;
mod doc_comment;
mod lexer;
mod member;
mod method;
mod patterns;
mod property;
pub mod scan;

pub use ast::*;
pub use attribute::parse_attribute;
pub use class::{parse_class, parse_converted};
pub use doc_comment::parse_doc_comment;
pub use lexer::{Lexer, Token, TokenKind};
pub use member::parse_member;
pub use method::{parse_constructor, parse_method};
pub use property::parse_property;
pub use source_map::Span;

/// A recognized construct and the region of text it covers.
///
/// `index` and `length` are byte offsets relative to the text the recognizer
/// was given. `length` is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<T> {
    /// The extracted record.
    pub data: T,
    /// Start of the match.
    pub index: usize,
    /// Length of the match, including any trailing text the construct owns.
    pub length: usize,
}

impl<T> ParseResult<T> {
    /// Creates a parse result covering `index..end`.
    pub fn new(data: T, index: usize, end: usize) -> Self {
        Self {
            data,
            index,
            length: end - index,
        }
    }

    /// Offset just past the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.index + self.length
    }

    /// The match as a span.
    #[inline]
    pub fn span(&self) -> Span {
        Span::from_index_len(self.index, self.length)
    }
}
