//! `///` XML documentation comments.

use crate::ast::{DocComment, DocSection};
use crate::ParseResult;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A run of consecutive `///` lines. The final line break is not included.
static DOC_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?P<indent>[ \t]*)///[^\r\n]*(?:\r?\n[ \t]*///[^\r\n]*)*")
        .expect("doc block regex")
});

static SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<(?P<tag>summary|remarks|returns|value|example|param|typeparam|exception)(?:\s+(?:name|cref)\s*=\s*"(?P<attr>[^"]*)")?\s*>(?P<text>.*?)</(?P<close>summary|remarks|returns|value|example|param|typeparam|exception)\s*>"#,
    )
    .expect("doc section regex")
});

static INHERIT_DOC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<inheritdoc\b[^>]*>").expect("inheritdoc regex"));

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<(?:see|seealso)\s+(?:cref|href)\s*=\s*"(?P<target>[^"]*)"\s*(?:/>|>(?P<label>[\s\S]*?)</(?:see|seealso)\s*>)"#,
    )
    .expect("link regex")
});

static LANGWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<see\s+langword\s*=\s*"(?P<word>[^"]*)"\s*(?:/>|>\s*</see\s*>)"#)
        .expect("langword regex")
});

static NAME_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<(?:paramref|typeparamref)\s+name\s*=\s*"(?P<name>[^"]*)"\s*(?:/>|>\s*</(?:paramref|typeparamref)\s*>)"#,
    )
    .expect("name ref regex")
});

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<code[^>]*>(?P<code>[\s\S]*?)</code\s*>").expect("code regex"));

static CODE_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<c>(?P<code>[\s\S]*?)</c\s*>").expect("inline code regex"));

static PARA: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?para\s*/?>").expect("para regex"));

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br\s*/?>").expect("br regex"));

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("tag regex"));

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("blank lines regex"));

/// Finds the next block of `///` lines and parses its XML sections.
///
/// Text without any section tags becomes the summary.
pub fn parse_doc_comment(code: &str) -> Option<ParseResult<DocComment>> {
    let caps = DOC_BLOCK.captures(code)?;
    let whole = caps.get(0)?;

    let text = whole
        .as_str()
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("///").unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n");

    Some(ParseResult::new(
        DocComment {
            indent: caps.name("indent")?.as_str().to_string(),
            sections: parse_sections(&text),
        },
        whole.start(),
        whole.end(),
    ))
}

fn parse_sections(text: &str) -> Vec<DocSection> {
    let mut sections: Vec<DocSection> = SECTION
        .captures_iter(text)
        .filter_map(|caps| section(&caps))
        .collect();

    if INHERIT_DOC.is_match(text) {
        sections.push(DocSection::InheritDoc);
    } else if sections.is_empty() {
        let summary = render_inline(text);
        if !summary.is_empty() {
            sections.push(DocSection::Summary(summary));
        }
    }
    sections
}

fn section(caps: &Captures<'_>) -> Option<DocSection> {
    let tag = caps.name("tag")?.as_str();
    if caps.name("close")?.as_str() != tag {
        return None;
    }
    let text = render_inline(caps.name("text")?.as_str());
    let attr = caps.name("attr").map(|m| m.as_str());

    Some(match tag {
        "summary" => DocSection::Summary(text),
        "remarks" => DocSection::Remarks(text),
        "returns" => DocSection::Returns(text),
        "value" => DocSection::Value(text),
        "example" => DocSection::Example(text),
        "param" => DocSection::Param {
            name: attr?.into(),
            text,
        },
        "typeparam" => DocSection::TypeParam {
            name: attr?.into(),
            text,
        },
        _ => DocSection::Exception {
            cref: strip_member_prefix(attr?).into(),
            text,
        },
    })
}

/// Strips the `T:`/`M:`/`P:` documentation ID prefix from a cref.
fn strip_member_prefix(cref: &str) -> &str {
    match cref.as_bytes() {
        [kind, b':', ..] if kind.is_ascii_uppercase() => &cref[2..],
        _ => cref,
    }
}

/// Renders inline XML doc tags to plain text with JSDoc links.
fn render_inline(xml: &str) -> String {
    let text = LINK.replace_all(xml, |caps: &Captures<'_>| {
        let target = strip_member_prefix(&caps["target"]);
        match caps.name("label").map(|m| m.as_str().trim()) {
            Some(label) if !label.is_empty() => format!("{{@link {target} | {label}}}"),
            _ => format!("{{@link {target}}}"),
        }
    });
    let text = LANGWORD.replace_all(&text, "${word}");
    let text = NAME_REF.replace_all(&text, "${name}");
    let text = CODE_BLOCK.replace_all(&text, |caps: &Captures<'_>| {
        format!("\n```\n{}\n```\n", caps["code"].trim_matches('\n'))
    });
    let text = CODE_INLINE.replace_all(&text, "`${code}`");
    let text = PARA.replace_all(&text, "\n\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n\n");

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
