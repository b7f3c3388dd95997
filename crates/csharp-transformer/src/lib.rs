//! C# to TypeScript conversion.
//!
//! The engine scans C# for the leftmost recognizable construct, renders it as
//! TypeScript and splices the result in place of the matched text. Text that
//! is not part of a recognized construct is copied unchanged. It handles:
//! - classes, structs, records and interfaces, including nested types
//! - properties and fields
//! - constructors and methods, in three output styles
//! - XML doc comments, rendered as JSDoc
//! - attributes, which are removed
//!
//! # Example
//!
//! ```
//! use csharp_transformer::{resolve, rewrite, Toggles};
//!
//! let options = resolve(Toggles {
//!     class_to_interface: true,
//!     ..Default::default()
//! });
//! let ts = rewrite("public class Address { public int Id {get; set;} }", &options);
//! assert_eq!(ts, "export interface Address { id: number; }");
//! ```

mod construct;
mod generate;
mod names;
mod options;
mod rewrite;
mod types;

pub use construct::{adapt, Construct, MatchResult};
pub use generate::{
    generate_attribute, generate_class, generate_constructor, generate_doc_comment,
    generate_member, generate_method, generate_property,
};
pub use names::{camel_case, member_name, trim_postfixes, type_name};
pub use options::{
    resolve, MethodStyle, NamePattern, OptionOverrides, Options, OptionsError, Toggles,
};
pub use rewrite::{find_match, rewrite, rewrite_with_map, RewriteResult, Segment, Segments};
pub use types::convert_type;
