use crate::names::type_name;
use crate::Options;
use csharp_parser::MemberDecl;

/// Renders the header of a public declaration no other generator handled:
/// `export enum Color {`. Classes, structs and records become interfaces and
/// the base list is dropped.
pub fn generate_member(member: &MemberDecl, options: &Options) -> String {
    let kind = match member.kind.as_str() {
        "class" | "struct" | "record" => "interface",
        kind => kind,
    };
    format!("export {kind} {} {{", type_name(&member.name, options))
}
