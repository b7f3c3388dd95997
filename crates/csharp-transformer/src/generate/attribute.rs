use crate::Options;
use csharp_parser::{AttributeList, AttributePlacement};

/// Attributes have no TypeScript counterpart. A list on its own line is
/// removed with its line break; an inline list leaves the indentation for the
/// declaration that follows it.
pub fn generate_attribute(attributes: &AttributeList, _options: &Options) -> String {
    match attributes.placement {
        AttributePlacement::OwnLine => String::new(),
        AttributePlacement::Inline => attributes.indent.clone(),
    }
}
