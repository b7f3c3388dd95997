//! Generators: one per construct, each rendering a recognizer record as
//! TypeScript. Generators are pure functions of the record and the options.

mod attribute;
mod class;
mod doc_comment;
mod member;
mod method;
mod property;

pub use attribute::generate_attribute;
pub use class::generate_class;
pub use doc_comment::generate_doc_comment;
pub use member::generate_member;
pub use method::{generate_constructor, generate_method};
pub use property::generate_property;
