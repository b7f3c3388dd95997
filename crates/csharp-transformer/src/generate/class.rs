use crate::construct::Construct;
use crate::names::type_name;
use crate::rewrite::{Segment, Segments};
use crate::types::convert_type;
use crate::Options;
use csharp_parser::{ClassDecl, TypeKind};

/// Renders a type declaration and its converted body.
///
/// The body is rewritten with the same driver as the file. Nested type
/// declarations are lifted out of the body into an `export namespace` with
/// the outer type's name, placed right after the closing brace, which is how
/// TypeScript spells nested types.
pub fn generate_class(class: &ClassDecl, options: &Options) -> String {
    let mut out = header(class, options);
    let Some(body) = &class.body else {
        return out;
    };

    let (body, nested) = rewrite_body(body, options);
    out.push_str(&body);
    out.push('}');

    if !nested.is_empty() {
        let indent = &class.indent;
        out.push('\n');
        out.push_str(indent);
        out.push_str("export namespace ");
        out.push_str(&type_name(&class.name, options));
        out.push_str(" {\n");
        out.push_str(&nested.join("\n"));
        out.push('\n');
        out.push_str(indent);
        out.push('}');
    }
    out
}

/// `export class Name<T> extends Base implements IFoo {`
fn header(class: &ClassDecl, options: &Options) -> String {
    let name = type_name(&class.name, options);
    let type_params = if class.type_params.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = class.type_params.iter().map(|t| t.as_str()).collect();
        format!("<{}>", names.join(", "))
    };
    let bases: Vec<String> = class
        .bases
        .iter()
        .map(|base| convert_type(base, options))
        .collect();

    let as_interface = options.class_to_interface || class.kind == TypeKind::Interface;
    if as_interface {
        let extends = if bases.is_empty() {
            String::new()
        } else {
            format!(" extends {}", bases.join(", "))
        };
        return format!("export interface {name}{type_params}{extends} {{");
    }

    let (interfaces, classes): (Vec<&String>, Vec<&String>) =
        bases.iter().partition(|base| is_interface_name(base));
    let mut out = String::from("export ");
    if class.has_modifier("abstract") {
        out.push_str("abstract ");
    }
    out.push_str("class ");
    out.push_str(&name);
    out.push_str(&type_params);
    let mut interfaces = interfaces;
    if let Some((base, rest)) = classes.split_first() {
        out.push_str(" extends ");
        out.push_str(base);
        // TypeScript has single inheritance; any further bases are listed
        // with the interfaces.
        interfaces.extend(rest);
    }
    if !interfaces.is_empty() {
        let names: Vec<&str> = interfaces.iter().map(|s| s.as_str()).collect();
        out.push_str(" implements ");
        out.push_str(&names.join(", "));
    }
    out.push_str(" {");
    out
}

/// The .NET convention: `I` followed by an uppercase letter.
fn is_interface_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Rewrites a class body, returning it without nested types, and the nested
/// types with their original indentation.
fn rewrite_body(body: &str, options: &Options) -> (String, Vec<String>) {
    let mut out = String::with_capacity(body.len());
    let mut nested = Vec::new();
    let mut skip_line_break = false;

    for segment in Segments::new(body, options) {
        match segment {
            Segment::Verbatim { text, .. } => {
                let text = if std::mem::take(&mut skip_line_break) {
                    text.strip_prefix("\r\n")
                        .or_else(|| text.strip_prefix('\n'))
                        .unwrap_or(text)
                } else {
                    text
                };
                out.push_str(text);
            }
            Segment::Replaced(found) if found.construct == Construct::Class => {
                let indent_start = out.trim_end_matches([' ', '\t']).len();
                let indent = out.split_off(indent_start);
                nested.push(format!("{indent}{}", found.result));
                skip_line_break = true;
            }
            Segment::Replaced(found) => out.push_str(&found.result),
        }
    }
    (out, nested)
}
