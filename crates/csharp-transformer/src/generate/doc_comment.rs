use crate::Options;
use csharp_parser::{DocComment, DocSection};

/// Renders `///` XML documentation as a JSDoc block at the same indentation.
///
/// A comment that is a single line of summary text becomes `/** text */`.
pub fn generate_doc_comment(doc: &DocComment, _options: &Options) -> String {
    let lines = jsdoc_lines(&doc.sections);
    let indent = &doc.indent;

    match lines.as_slice() {
        [] => format!("{indent}/** */"),
        [only] if !only.starts_with('@') => format!("{indent}/** {only} */"),
        _ => {
            let mut out = format!("{indent}/**\n");
            for line in &lines {
                if line.is_empty() {
                    out.push_str(&format!("{indent} *\n"));
                } else {
                    out.push_str(&format!("{indent} * {line}\n"));
                }
            }
            out.push_str(&format!("{indent} */"));
            out
        }
    }
}

fn jsdoc_lines(sections: &[DocSection]) -> Vec<String> {
    let mut lines = Vec::new();
    for section in sections {
        match section {
            DocSection::Summary(text) | DocSection::Value(text) => push(&mut lines, None, text),
            DocSection::Remarks(text) => push(&mut lines, Some("@remarks".to_string()), text),
            DocSection::Param { name, text } => {
                push(&mut lines, Some(tagged("@param", name, text)), text)
            }
            DocSection::TypeParam { name, text } => {
                push(&mut lines, Some(tagged("@typeParam", name, text)), text)
            }
            DocSection::Returns(text) => push(&mut lines, Some("@returns".to_string()), text),
            DocSection::Exception { cref, text } => {
                push(&mut lines, Some(format!("@throws {{@link {cref}}}")), text)
            }
            DocSection::Example(text) => {
                lines.push("@example".to_string());
                lines.extend(text.lines().map(str::to_string));
            }
            DocSection::InheritDoc => lines.push("@inheritDoc".to_string()),
        }
    }
    lines
}

/// Appends `text`, with `tag` in front of its first line.
fn push(lines: &mut Vec<String>, tag: Option<String>, text: &str) {
    let mut text_lines = text.lines();
    match (tag, text_lines.next()) {
        (Some(tag), Some(first)) => lines.push(format!("{tag} {first}")),
        (Some(tag), None) => lines.push(tag),
        (None, Some(first)) => lines.push(first.to_string()),
        (None, None) => return,
    }
    lines.extend(text_lines.map(str::to_string));
}

/// `@param name -` when there is a description, `@param name` otherwise.
fn tagged(tag: &str, name: &str, text: &str) -> String {
    if text.is_empty() {
        format!("{tag} {name}")
    } else {
        format!("{tag} {name} -")
    }
}
