//! Output formatting.

use csharp_transformer::{Construct, RewriteResult};
use serde::Serialize;
use source_map::{LineCol, LineIndex};

/// The JSON report for one converted file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// The input path, or `<stdin>`.
    pub filename: String,
    /// The converted text.
    pub typescript: String,
    /// Every replaced construct, in input order.
    pub replacements: Vec<Replacement>,
}

/// A replaced construct, located in the C# source.
#[derive(Debug, Serialize)]
pub struct Replacement {
    pub construct: Construct,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number, in bytes.
    pub column: u32,
    /// Length of the replaced C# text in bytes.
    pub length: usize,
}

impl FileReport {
    /// Builds a report from a rewrite of `source`.
    pub fn new(filename: impl Into<String>, source: &str, result: RewriteResult) -> Self {
        let line_index = LineIndex::new(source);
        let replacements = result
            .matches
            .iter()
            .map(|found| {
                let start = line_index
                    .line_col((found.index as u32).into())
                    .unwrap_or(LineCol::new(0, 0));
                Replacement {
                    construct: found.construct,
                    line: start.line + 1,
                    column: start.col + 1,
                    length: found.length,
                }
            })
            .collect();

        Self {
            filename: filename.into(),
            typescript: result.typescript,
            replacements,
        }
    }
}

/// Formats reports as a pretty-printed JSON array.
pub fn format_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

/// Formats reports as plain TypeScript. With several files, each one is
/// preceded by a comment naming it.
pub fn format_text(reports: &[FileReport]) -> String {
    match reports {
        [only] => only.typescript.clone(),
        _ => {
            let mut output = String::new();
            for report in reports {
                output.push_str(&format!("// {}\n", report.filename));
                output.push_str(&report.typescript);
                if !report.typescript.ends_with('\n') {
                    output.push('\n');
                }
            }
            output
        }
    }
}

/// Summary of a conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of files converted.
    pub file_count: usize,
    /// Number of constructs replaced across all files.
    pub replacement_count: usize,
    /// Number of files that could not be read or written.
    pub failed_count: usize,
}

impl RunSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        let file_word = if self.file_count == 1 { "file" } else { "files" };
        let construct_word = if self.replacement_count == 1 {
            "construct"
        } else {
            "constructs"
        };
        let mut line = format!(
            "converted {} {} ({} {} replaced)",
            self.file_count, file_word, self.replacement_count, construct_word
        );
        if self.failed_count > 0 {
            line.push_str(&format!(", {} failed", self.failed_count));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csharp_transformer::{rewrite_with_map, Options};
    use pretty_assertions::assert_eq;

    const SOURCE: &str =
        "namespace Demo;\n\npublic class Point\n{\n    public int X { get; set; }\n}\n";

    fn report() -> FileReport {
        FileReport::new(
            "Point.cs",
            SOURCE,
            rewrite_with_map(SOURCE, &Options::default()),
        )
    }

    #[test]
    fn test_report_positions() {
        let report = report();
        assert_eq!(report.replacements.len(), 1);
        let class = &report.replacements[0];
        assert_eq!(class.construct, Construct::Class);
        assert_eq!((class.line, class.column), (3, 1));
        assert_eq!(class.length, SOURCE.len() - "namespace Demo;\n\n".len() - 1);
    }

    #[test]
    fn test_format_json() {
        let output = format_json(&[report()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["filename"], "Point.cs");
        assert_eq!(value[0]["replacements"][0]["construct"], "class");
        assert_eq!(value[0]["replacements"][0]["line"], 3);
        assert!(value[0]["typescript"]
            .as_str()
            .unwrap()
            .contains("export class Point {"));
    }

    #[test]
    fn test_format_text() {
        let single = format_text(&[report()]);
        assert_eq!(
            single,
            "namespace Demo;\n\nexport class Point {\n    x: number;\n}\n"
        );

        let multiple = format_text(&[report(), report()]);
        assert!(multiple.starts_with("// Point.cs\nnamespace Demo;"));
        assert_eq!(multiple.matches("// Point.cs\n").count(), 2);
    }

    #[test]
    fn test_summary() {
        let summary = RunSummary {
            file_count: 1,
            replacement_count: 4,
            failed_count: 0,
        };
        assert_eq!(summary.format(), "converted 1 file (4 constructs replaced)");

        let summary = RunSummary {
            file_count: 3,
            replacement_count: 1,
            failed_count: 2,
        };
        assert_eq!(
            summary.format(),
            "converted 3 files (1 construct replaced), 2 failed"
        );
    }
}
