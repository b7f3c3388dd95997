//! Properties every rewrite must hold, whatever the input and options.

mod common;

use common::{all_toggle_combinations, ORDER_MODEL};
use csharp_transformer::{
    find_match, resolve, rewrite, rewrite_with_map, Construct, MethodStyle, Options, Segment,
    Segments, Toggles,
};
use pretty_assertions::assert_eq;
use source_map::MappingKind;

#[test]
fn text_without_constructs_is_unchanged() {
    let inputs = [
        "",
        "namespace Demo;\n\nusing System;\n",
        "// a regular comment\n/* and a block */\n",
        "int x = 5;\nreturn x;\n",
        "{ } }{ ((",
        "var list = new[] { 1, 2, 3 };",
    ];
    for options in all_toggle_combinations() {
        for input in inputs {
            assert_eq!(rewrite(input, &options), input, "input: {input:?}");
        }
    }
}

#[test]
fn segments_tile_the_input() {
    for options in all_toggle_combinations() {
        let mut expected_offset = 0;
        for segment in Segments::new(ORDER_MODEL, &options) {
            match segment {
                Segment::Verbatim { text, offset } => {
                    assert_eq!(offset, expected_offset);
                    assert_eq!(&ORDER_MODEL[offset..offset + text.len()], text);
                    expected_offset += text.len();
                }
                Segment::Replaced(found) => {
                    assert_eq!(found.index, expected_offset);
                    assert!(found.length > 0);
                    expected_offset = found.end();
                }
            }
        }
        assert_eq!(expected_offset, ORDER_MODEL.len());
    }
}

#[test]
fn source_map_covers_the_input_in_order() {
    let options = Options::default();
    let result = rewrite_with_map(ORDER_MODEL, &options);

    assert_eq!(
        u32::from(result.source_map.original_len()) as usize,
        ORDER_MODEL.len()
    );
    let mut original_end = 0u32;
    let mut generated_end = 0u32;
    for mapping in result.source_map.mappings() {
        assert_eq!(u32::from(mapping.original.start), original_end);
        assert_eq!(u32::from(mapping.generated.start), generated_end);
        original_end = mapping.original.end.into();
        generated_end = mapping.generated.end.into();
    }
    assert_eq!(generated_end as usize, result.typescript.len());
    assert_eq!(
        result.source_map.replacements().count(),
        result.matches.len()
    );
    assert!(result
        .source_map
        .mappings()
        .any(|m| m.kind == MappingKind::Verbatim));
}

#[test]
fn source_map_points_back_to_constructs() {
    let options = Options::default();
    let result = rewrite_with_map(ORDER_MODEL, &options);

    let generated = result.typescript.find("export enum Status").unwrap();
    let original = result
        .source_map
        .original_position((generated as u32).into())
        .unwrap();
    assert_eq!(
        u32::from(original) as usize,
        ORDER_MODEL.find("public enum Status").unwrap()
    );

    let generated = result.typescript.find("namespace Shop.Models").unwrap();
    let original = result
        .source_map
        .original_position((generated as u32).into())
        .unwrap();
    assert_eq!(
        u32::from(original) as usize,
        ORDER_MODEL.find("namespace Shop.Models").unwrap()
    );
}

#[test]
fn leftmost_match_beats_priority() {
    let options = Options::default();
    let code = "public void Run() { }\npublic class Job { }";
    let found = find_match(code, 0, &options).unwrap();
    assert_eq!(found.construct, Construct::Method);
    assert_eq!(found.index, 0);

    let found = find_match(code, found.end(), &options).unwrap();
    assert_eq!(found.construct, Construct::Class);
    assert_eq!(found.index, code.find("public class").unwrap());
}

#[test]
fn matches_are_reported_in_input_order() {
    let result = rewrite_with_map(ORDER_MODEL, &Options::default());
    let constructs: Vec<Construct> = result.matches.iter().map(|m| m.construct).collect();
    assert_eq!(
        constructs,
        vec![
            Construct::DocComment,
            Construct::Attribute,
            Construct::Class,
            Construct::Member,
        ]
    );
    assert!(result
        .matches
        .windows(2)
        .all(|pair| pair[0].end() <= pair[1].index));
}

#[test]
fn degenerate_input_terminates() {
    let inputs = [
        "{{{{{{",
        "}}}}}}",
        "[[[[[[",
        "]]]]]]",
        "    \n\n\t\t\n",
        "((((",
        "<<<>>>",
        "public",
        "public class",
        "public class {",
        "///",
    ];
    for options in all_toggle_combinations() {
        for input in inputs {
            let segments = Segments::new(input, &options).count();
            assert!(segments <= input.len(), "input: {input:?}");
        }
    }
}

#[test]
fn class_to_interface_changes_the_header() {
    let code = "public class Address { public int Id {get; set;} }";
    let classes = rewrite(code, &Options::default());
    let interfaces = rewrite(
        code,
        &resolve(Toggles {
            class_to_interface: true,
            ..Default::default()
        }),
    );
    assert!(classes.starts_with("export class Address {"));
    assert!(interfaces.starts_with("export interface Address {"));
}

#[test]
fn method_styles_differ() {
    let code = "public class Api { public Task<User> GetUser(int id) { return _repo.Find(id); } }";
    let convert = |method_style| {
        rewrite(
            code,
            &resolve(Toggles {
                method_style,
                ..Default::default()
            }),
        )
    };

    let signature = convert(MethodStyle::Signature);
    let lambda = convert(MethodStyle::Lambda);
    let controller = convert(MethodStyle::Controller);

    assert_eq!(
        signature,
        "export class Api { getUser(id: number): Promise<User> { return _repo.Find(id); } }"
    );
    assert_eq!(
        lambda,
        "export class Api { getUser = (id: number): Promise<User> => { return _repo.Find(id); } }"
    );
    assert_eq!(
        controller,
        "export class Api { getUser = async (id: number): Promise<User> => await this.post<User>(\"GetUser\", { id }); }"
    );
}

#[test]
fn rewrite_is_a_fixed_point() {
    for options in all_toggle_combinations() {
        let once = rewrite(ORDER_MODEL, &options);
        let twice = rewrite(&once, &options);
        assert_eq!(twice, once, "options: {options:?}");
    }
}

#[test]
fn method_bodies_are_left_alone_on_a_second_pass() {
    let inputs = [
        "public class A { public int Run() { const int Max = 3; return Max; } }",
        concat!(
            "public class Calculator\n",
            "{\n",
            "    public Calculator(int seed) { const int Offset = 1; _seed = seed + Offset; }\n",
            "\n",
            "    public int Run()\n",
            "    {\n",
            "        const int Max = 3;\n",
            "        int Twice(int x) => x * 2;\n",
            "        static string Label(int value) { return value.ToString(); }\n",
            "        return Twice(Max);\n",
            "    }\n",
            "\n",
            "    public class Step\n",
            "    {\n",
            "        public int Apply(int x) { readonly int Limit = 9; return x; }\n",
            "    }\n",
            "}\n",
        ),
    ];
    for options in all_toggle_combinations() {
        for input in inputs {
            let once = rewrite(input, &options);
            let twice = rewrite(&once, &options);
            assert_eq!(twice, once, "input: {input:?}, options: {options:?}");
        }
    }
}

#[test]
fn preserve_modifiers_keeps_access() {
    let options = resolve(Toggles {
        preserve_modifiers: true,
        ..Default::default()
    });
    let out = rewrite(ORDER_MODEL, &options);
    assert!(out.contains("public id: number;"));
    assert!(out.contains("private readonly _total: number;"));
    assert!(!rewrite(ORDER_MODEL, &Options::default()).contains("public id"));
}
