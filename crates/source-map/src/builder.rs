//! Source map built while the rewrite driver emits output.

use crate::{ByteOffset, Span};
use text_size::TextSize;

/// Whether a segment of output was copied from the source or generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// Source text copied unchanged.
    Verbatim,
    /// A recognized construct replaced by generated text.
    Replaced,
}

/// A single mapping from a generated region to the source region it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// The span in the generated output.
    pub generated: Span,
    /// The span in the original source.
    pub original: Span,
    /// How the generated text relates to the original.
    pub kind: MappingKind,
}

/// Mappings from generated TypeScript back to the C# source, in emission order.
///
/// Because the driver never backtracks, mappings are sorted by both their
/// generated and their original start offsets.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    mappings: Vec<Mapping>,
}

impl SourceMap {
    /// Creates a new empty source map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of mappings in this source map.
    #[inline]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if this source map has no mappings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Returns an iterator over all mappings.
    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter()
    }

    /// Returns the mappings that came from replaced constructs.
    pub fn replacements(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings
            .iter()
            .filter(|m| m.kind == MappingKind::Replaced)
    }

    /// Finds the original position corresponding to a generated position.
    ///
    /// Positions inside verbatim segments map byte for byte. Positions inside a
    /// replacement map to the start of the replaced construct.
    pub fn original_position(&self, generated: ByteOffset) -> Option<ByteOffset> {
        let mapping = self.find_by(generated, |m| m.generated)?;
        match mapping.kind {
            MappingKind::Verbatim => {
                let offset_in_span = generated - mapping.generated.start;
                Some(mapping.original.start + offset_in_span)
            }
            MappingKind::Replaced => Some(mapping.original.start),
        }
    }

    /// Total number of source bytes covered by the mappings.
    pub fn original_len(&self) -> TextSize {
        self.mappings
            .iter()
            .map(|m| m.original.len())
            .fold(TextSize::from(0), |acc, len| acc + len)
    }

    fn find_by(&self, offset: ByteOffset, key: impl Fn(&Mapping) -> Span) -> Option<&Mapping> {
        let idx = match self
            .mappings
            .binary_search_by(|m| key(m).start.cmp(&offset))
        {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };

        // Empty replacements share a start offset with their successor.
        self.mappings[idx.min(self.mappings.len().saturating_sub(1))..]
            .iter()
            .take_while(|m| key(m).start <= offset)
            .find(|m| key(m).contains(offset))
    }
}

/// Records mappings as the driver appends to its output.
#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    mappings: Vec<Mapping>,
    generated_offset: ByteOffset,
}

impl SourceMapBuilder {
    /// Creates a new source map builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds verbatim source text, creating a 1:1 mapping.
    pub fn add_source(&mut self, original_start: ByteOffset, text: &str) {
        if text.is_empty() {
            return;
        }
        let len = TextSize::from(text.len() as u32);
        self.push(
            Span::new(original_start, original_start + len),
            len,
            MappingKind::Verbatim,
        );
    }

    /// Adds generated text that replaces the `original` span.
    ///
    /// The generated text may be empty (a removed attribute) or longer than the
    /// original; either way the original span is recorded as consumed.
    pub fn add_transformed(&mut self, original: Span, generated_text: &str) {
        let len = TextSize::from(generated_text.len() as u32);
        self.push(original, len, MappingKind::Replaced);
    }

    fn push(&mut self, original: Span, generated_len: TextSize, kind: MappingKind) {
        let generated = Span::new(self.generated_offset, self.generated_offset + generated_len);
        self.mappings.push(Mapping {
            generated,
            original,
            kind,
        });
        self.generated_offset = generated.end;
    }

    /// Builds the final source map.
    pub fn build(self) -> SourceMap {
        SourceMap {
            mappings: self.mappings,
        }
    }
}
