//! Attribute lists such as `[Required]` or `[HttpGet("{id}")][Authorize]`.

use crate::ast::{AttributeList, AttributePlacement};
use crate::patterns::find_accepted;
use crate::scan::find_closing;
use crate::ParseResult;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LINE_START_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?P<indent>[ \t]*)\[").expect("attribute regex"));

/// Finds the next attribute list that starts a line.
///
/// An attribute list on a line of its own includes its line break. One that is
/// followed by a declaration on the same line stops at the declaration.
pub fn parse_attribute(code: &str) -> Option<ParseResult<AttributeList>> {
    find_accepted(&LINE_START_BRACKET, code, |caps| accept(code, caps))
}

fn accept(code: &str, caps: &Captures<'_>) -> Option<ParseResult<AttributeList>> {
    let whole = caps.get(0)?;
    let indent = caps.name("indent")?;

    let mut attributes = Vec::new();
    let mut pos = whole.end() - 1;
    loop {
        let close = find_closing(code, pos)?;
        let content = code[pos + 1..close - 1].trim();
        if !content.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            return None;
        }
        attributes.push(content.to_string());

        pos = close + code[close..].len() - code[close..].trim_start_matches([' ', '\t']).len();
        if !code[pos..].starts_with('[') {
            break;
        }
    }

    let rest = &code[pos..];
    let (placement, end) = if rest.is_empty() {
        (AttributePlacement::OwnLine, pos)
    } else if rest.starts_with("\r\n") {
        (AttributePlacement::OwnLine, pos + 2)
    } else if rest.starts_with('\n') {
        (AttributePlacement::OwnLine, pos + 1)
    } else if rest.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        (AttributePlacement::Inline, pos)
    } else {
        return None;
    };

    Some(ParseResult::new(
        AttributeList {
            indent: indent.as_str().to_string(),
            attributes,
            placement,
        },
        whole.start(),
        end,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_own_line_attribute() {
        let code = "    [Required]\n    public string Name { get; set; }";
        let result = parse_attribute(code).unwrap();
        assert_eq!(result.index, 0);
        assert_eq!(result.length, "    [Required]\n".len());
        assert_eq!(
            result.data,
            AttributeList {
                indent: "    ".to_string(),
                attributes: vec!["Required".to_string()],
                placement: AttributePlacement::OwnLine,
            }
        );
    }

    #[test]
    fn test_several_groups_with_crlf() {
        let code = "[HttpGet(\"{id}\")] [Authorize]\r\npublic IActionResult Get(int id) { }";
        let result = parse_attribute(code).unwrap();
        assert_eq!(
            &code[result.index..result.end()],
            "[HttpGet(\"{id}\")] [Authorize]\r\n"
        );
        assert_eq!(result.data.attributes, vec!["HttpGet(\"{id}\")", "Authorize"]);
    }

    #[test]
    fn test_inline_attribute() {
        let code = "  [Key] public int Id { get; set; }";
        let result = parse_attribute(code).unwrap();
        assert_eq!(result.data.placement, AttributePlacement::Inline);
        assert_eq!(&code[result.end()..], "public int Id { get; set; }");
        assert_eq!(result.data.indent, "  ");
    }

    #[test]
    fn test_brackets_in_strings() {
        let code = "[Route(\"api/[controller]\")]\nclass C {}";
        let result = parse_attribute(code).unwrap();
        assert_eq!(result.data.attributes, vec!["Route(\"api/[controller]\")"]);
    }

    #[test]
    fn test_attribute_at_end_of_input() {
        let code = "[assembly: InternalsVisibleTo(\"Tests\")]";
        let result = parse_attribute(code).unwrap();
        assert_eq!(result.length, code.len());
        assert_eq!(result.data.placement, AttributePlacement::OwnLine);
    }

    #[test]
    fn test_not_attributes() {
        assert!(parse_attribute("var x = a[0];").is_none());
        assert!(parse_attribute("    [key: string]: number;").is_none());
        assert!(parse_attribute("[1, 2, 3]\n").is_none());
        assert!(parse_attribute("    [Unclosed\n").is_none());
    }
}
