//! Span bookkeeping for the cs2ts rewrite engine.
//!
//! The rewrite driver copies some regions of the C# input verbatim and replaces
//! others with generated TypeScript. This crate records which is which, so that
//! positions in the generated output can be traced back to the C# source and
//! so that tests can check that every input byte was consumed exactly once.

mod builder;
mod line_index;
mod span;

pub use builder::{Mapping, MappingKind, SourceMap, SourceMapBuilder};
pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
