//! C# lexer using logos.
//!
//! The recognizers locate constructs with regular expressions, but regexes
//! cannot find where a body or parameter list ends. This lexer only knows
//! enough C# to do that: delimiters, statement terminators, and the tokens
//! that may hide delimiters (string and char literals, comments).

use logos::Logos;
use source_map::Span;
use text_size::TextSize;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span of the token, absolute to the text the lexer was created for.
    pub span: Span,
}

/// Token kinds relevant to delimiter scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `=>`
    #[token("=>")]
    Arrow,

    /// `=`
    #[token("=")]
    Eq,

    /// A regular or interpolated string literal.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#)]
    String,

    /// A verbatim string literal (`@"..."`, `$@"..."`), where `""` escapes a quote.
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"(\$@|@\$)"([^"]|"")*""#)]
    VerbatimString,

    /// A raw string literal (`"""..."""`, `$"""..."""`). The closing run has
    /// as many quotes as the opening one.
    #[regex(r#"\$*"""+"#, lex_raw_string)]
    RawString,

    /// A character literal.
    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    /// `// ...` up to the end of the line.
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// `/* ... */`
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// An identifier or keyword, including `@`-escaped identifiers.
    #[regex(r"[\p{L}_@][\p{L}\p{N}_]*")]
    Ident,

    /// A numeric literal.
    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,

    /// Any other punctuation, one character at a time.
    #[regex(r#"[^ \t\r\n\f\p{L}\p{N}_{}()\[\];,="'/@$]"#)]
    Punct,

    /// A character the lexer could not classify (a lone `/`, `$`, or quote).
    Error,
}

/// Extends a raw string token from its opening quotes through the matching
/// closing run.
fn lex_raw_string(lex: &mut logos::Lexer<'_, TokenKind>) -> bool {
    let quotes = lex.slice().trim_start_matches('$').len();
    let closing = "\"".repeat(quotes);
    match lex.remainder().find(&closing) {
        Some(at) => {
            lex.bump(at + quotes);
            true
        }
        None => false,
    }
}

impl TokenKind {
    /// Returns true for `{`, `(` and `[`.
    pub fn is_open(self) -> bool {
        matches!(self, Self::LBrace | Self::LParen | Self::LBracket)
    }

    /// Returns true for `}`, `)` and `]`.
    pub fn is_close(self) -> bool {
        matches!(self, Self::RBrace | Self::RParen | Self::RBracket)
    }

    /// Returns true for tokens that carry no syntax.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

/// A lexer over a C# fragment.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    base: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    pub fn new(source: &'src str) -> Self {
        Self::at(source, 0)
    }

    /// Creates a lexer that starts at `offset` but reports spans relative to
    /// the whole of `source`.
    pub fn at(source: &'src str, offset: usize) -> Self {
        Self {
            inner: TokenKind::lexer(&source[offset..]),
            base: offset,
        }
    }

    /// Returns the text of the most recent token.
    pub fn slice(&self) -> &'src str {
        self.inner.slice()
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.inner.next()? {
            Ok(kind) => kind,
            Err(()) => TokenKind::Error,
        };
        let range = self.inner.span();
        Some(Token {
            kind,
            span: Span::new(
                TextSize::from((self.base + range.start) as u32),
                TextSize::from((self.base + range.end) as u32),
            ),
        })
    }
}
