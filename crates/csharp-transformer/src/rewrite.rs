//! Scan coordinator and rewrite driver.

use crate::construct::{Construct, MatchResult};
use crate::Options;
use source_map::{ByteOffset, SourceMap, SourceMapBuilder};

/// Finds the leftmost construct in `code[start..]`.
///
/// Every construct is tried; the smallest index wins and exact ties go to the
/// construct earlier in [`Construct::PRIORITY`]. The returned index is
/// absolute in `code`.
pub fn find_match(code: &str, start: usize, options: &Options) -> Option<MatchResult> {
    let rest = &code[start..];
    let mut hits: Vec<_> = Construct::PRIORITY
        .iter()
        .filter_map(|construct| construct.recognize(rest))
        .collect();
    // Stable, so ties keep priority order.
    hits.sort_by_key(|hit| hit.index());

    let mut found = hits.into_iter().find_map(|hit| hit.adapt(options))?;
    found.index += start;
    Some(found)
}

/// One piece of rewritten output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Input copied unchanged, starting at `offset`.
    Verbatim { text: &'a str, offset: usize },
    /// A construct replaced by generated text.
    Replaced(MatchResult),
}

/// The rewrite driver, as an iterator of output segments.
///
/// Concatenating the segments gives the converted text. The verbatim segments
/// and replaced spans tile the input exactly, in order.
pub struct Segments<'a> {
    code: &'a str,
    options: &'a Options,
    cursor: usize,
    pending: Option<MatchResult>,
}

impl<'a> Segments<'a> {
    /// Starts a pass over `code`.
    pub fn new(code: &'a str, options: &'a Options) -> Self {
        Self {
            code,
            options,
            cursor: 0,
            pending: None,
        }
    }

    fn replaced(&mut self, found: MatchResult) -> Segment<'a> {
        tracing::trace!(
            construct = %found.construct,
            index = found.index,
            length = found.length,
            "replacing construct"
        );
        self.cursor = found.end();
        Segment::Replaced(found)
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(found) = self.pending.take() {
            return Some(self.replaced(found));
        }
        if self.cursor >= self.code.len() {
            return None;
        }

        let offset = self.cursor;
        match find_match(self.code, offset, self.options) {
            None => {
                self.cursor = self.code.len();
                Some(Segment::Verbatim {
                    text: &self.code[offset..],
                    offset,
                })
            }
            Some(found) if found.index > offset => {
                self.cursor = found.index;
                self.pending = Some(found);
                Some(Segment::Verbatim {
                    text: &self.code[offset..self.cursor],
                    offset,
                })
            }
            Some(found) => Some(self.replaced(found)),
        }
    }
}

/// The output of [`rewrite_with_map`].
#[derive(Debug, Clone)]
pub struct RewriteResult {
    /// The converted text.
    pub typescript: String,
    /// Verbatim and replaced regions, in output order.
    pub source_map: SourceMap,
    /// Every replacement, in input order.
    pub matches: Vec<MatchResult>,
}

/// Converts C# to TypeScript. Text that is not a recognized construct is
/// copied unchanged.
pub fn rewrite(code: &str, options: &Options) -> String {
    let mut out = String::with_capacity(code.len());
    let mut replaced = 0usize;
    for segment in Segments::new(code, options) {
        match segment {
            Segment::Verbatim { text, .. } => out.push_str(text),
            Segment::Replaced(found) => {
                out.push_str(&found.result);
                replaced += 1;
            }
        }
    }
    tracing::debug!(
        input_len = code.len(),
        output_len = out.len(),
        replaced,
        "rewrite pass finished"
    );
    out
}

/// Like [`rewrite`], and also records where each part of the output came from.
pub fn rewrite_with_map(code: &str, options: &Options) -> RewriteResult {
    let mut typescript = String::with_capacity(code.len());
    let mut builder = SourceMapBuilder::new();
    let mut matches = Vec::new();

    for segment in Segments::new(code, options) {
        match segment {
            Segment::Verbatim { text, offset } => {
                builder.add_source(ByteOffset::from(offset as u32), text);
                typescript.push_str(text);
            }
            Segment::Replaced(found) => {
                builder.add_transformed(found.span(), &found.result);
                typescript.push_str(&found.result);
                matches.push(found);
            }
        }
    }

    tracing::debug!(
        input_len = code.len(),
        output_len = typescript.len(),
        replaced = matches.len(),
        "rewrite pass finished"
    );
    RewriteResult {
        typescript,
        source_map: builder.build(),
        matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        let options = Options::default();
        assert_eq!(rewrite("", &options), "");
        assert_eq!(Segments::new("", &options).count(), 0);
        assert!(find_match("", 0, &options).is_none());
    }

    #[test]
    fn test_plain_text_is_one_verbatim_segment() {
        let options = Options::default();
        let code = "namespace Demo;\n";
        let segments: Vec<_> = Segments::new(code, &options).collect();
        assert_eq!(segments, vec![Segment::Verbatim { text: code, offset: 0 }]);
    }

    #[test]
    fn test_find_match_offsets_from_start() {
        let options = Options::default();
        let code = "public int A { get; set; }\npublic int B { get; set; }";
        let second = code.find("public int B").unwrap();
        let found = find_match(code, code.find('\n').unwrap(), &options).unwrap();
        assert_eq!(found.index, second);
        assert_eq!(found.construct, Construct::Property);
        assert_eq!(found.result, "b: number;");
    }

    #[test]
    fn test_tie_goes_to_higher_priority() {
        // The member fallback also matches `public int Id {` at the same offset.
        let options = Options::default();
        assert!(Construct::Member
            .attempt("public int Id { get; set; }", &options)
            .is_some());
        let found = find_match("public int Id { get; set; }", 0, &options).unwrap();
        assert_eq!(found.construct, Construct::Property);
    }

    #[test]
    fn test_segments_alternate() {
        let options = Options::default();
        let code = "  [Key]\n  public int Id { get; set; }\n";
        let segments: Vec<_> = Segments::new(code, &options).collect();
        assert_eq!(segments.len(), 4);
        assert!(matches!(segments[0], Segment::Replaced(ref m) if m.construct == Construct::Attribute));
        assert!(matches!(segments[1], Segment::Verbatim { text: "  ", offset: 8 }));
        assert!(matches!(segments[2], Segment::Replaced(ref m) if m.result == "id: number;"));
        assert!(matches!(segments[3], Segment::Verbatim { text: "\n", .. }));
    }

    #[test]
    fn test_rewrite_with_map_records_replacements() {
        let options = Options::default();
        let code = "public int Id { get; set; }";
        let result = rewrite_with_map(code, &options);
        assert_eq!(result.typescript, "id: number;");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.source_map.replacements().count(), 1);
        assert_eq!(u32::from(result.source_map.original_len()) as usize, code.len());
    }
}
