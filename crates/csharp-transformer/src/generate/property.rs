use crate::names::member_name;
use crate::types::convert_type;
use crate::Options;
use csharp_parser::PropertyDecl;

/// Renders a property or field as a class member: `name: Type;`.
///
/// Returns an empty string for members filtered out by
/// `remove_with_modifier` or `remove_name_regex`.
pub fn generate_property(property: &PropertyDecl, options: &Options) -> String {
    if is_removed(property, options) {
        return String::new();
    }

    let mut out = String::new();
    if options.preserve_modifiers {
        let has = |modifier: &str| property.modifiers.iter().any(|m| m == modifier);
        if let Some(access) = ["public", "protected", "private"]
            .into_iter()
            .find(|access| has(access))
        {
            out.push_str(access);
            out.push(' ');
        }
        if has("static") || has("const") {
            out.push_str("static ");
        }
        if property.is_read_only() {
            out.push_str("readonly ");
        }
    }

    out.push_str(&member_name(&property.name, options));
    out.push_str(": ");
    out.push_str(&convert_type(&property.ty, options));

    if !options.ignore_initializer {
        if let Some(initializer) = &property.initializer {
            out.push_str(" = ");
            out.push_str(initializer);
        }
    }
    out.push(';');
    out
}

fn is_removed(property: &PropertyDecl, options: &Options) -> bool {
    let by_modifier = property
        .modifiers
        .iter()
        .any(|m| options.remove_with_modifier.iter().any(|r| r == m));
    let by_name = options
        .remove_name_regex
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(&property.name));
    by_modifier || by_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resolve, OptionOverrides, Toggles};
    use csharp_parser::parse_property;
    use pretty_assertions::assert_eq;

    fn generate(code: &str, options: &Options) -> String {
        generate_property(&parse_property(code).unwrap().data, options)
    }

    fn preserving() -> Options {
        resolve(Toggles {
            preserve_modifiers: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_auto_property() {
        let options = Options::default();
        assert_eq!(generate("public int Id { get; set; }", &options), "id: number;");
        assert_eq!(
            generate("public List<string> Tags { get; set; }", &options),
            "tags: string[];"
        );
        assert_eq!(
            generate("public DateTime? Born { get; set; }", &options),
            "born: Date | string | null;"
        );
    }

    #[test]
    fn test_preserved_modifiers() {
        let options = preserving();
        assert_eq!(
            generate("public string Name { get; private set; }", &options),
            "public name: string;"
        );
        assert_eq!(
            generate("public string Code { get; }", &options),
            "public readonly code: string;"
        );
        assert_eq!(
            generate("private static readonly int _max = 10;", &options),
            "private static readonly _max: number;"
        );
        assert_eq!(
            generate("public const string Key = \"k\";", &options),
            "public static readonly key: string;"
        );
    }

    #[test]
    fn test_initializer_when_not_ignored() {
        let options = Options::default()
            .with_overrides(OptionOverrides {
                ignore_initializer: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            generate("public int Count { get; set; } = 5;", &options),
            "count: number = 5;"
        );
        assert_eq!(generate("public int Count { get; set; }", &options), "count: number;");
    }

    #[test]
    fn test_removed_members() {
        let options = Options::default()
            .with_overrides(OptionOverrides {
                remove_with_modifier: Some(vec!["private".to_string()]),
                remove_name_regex: Some("^Internal".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(generate("private int _count;", &options), "");
        assert_eq!(generate("public int InternalId { get; set; }", &options), "");
        assert_eq!(generate("public int Id { get; set; }", &options), "id: number;");
    }
}
