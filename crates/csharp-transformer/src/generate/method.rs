use crate::names::member_name;
use crate::types::{convert_type, TypeRef};
use crate::{MethodStyle, Options};
use csharp_parser::{ConstructorDecl, MethodBody, MethodDecl, Parameter, ParameterModifier};

/// Renders a method in the configured [`MethodStyle`].
pub fn generate_method(method: &MethodDecl, options: &Options) -> String {
    let name = member_name(&method.name, options);
    let type_params = render_type_params(method);
    let params = render_parameters(&method.parameters, options);

    match options.method_style {
        MethodStyle::Signature => {
            let ret = convert_type(&method.return_type, options);
            match body_text(&method.body, &ret, options) {
                Some(body) => format!("{name}{type_params}({params}): {ret} {body}"),
                None => format!("{name}{type_params}({params}): {ret};"),
            }
        }
        MethodStyle::Lambda => {
            let ret = convert_type(&method.return_type, options);
            match body_text(&method.body, &ret, options) {
                Some(body) => format!("{name} = {type_params}({params}): {ret} => {body}"),
                None => format!("{name}: {type_params}({params}) => {ret};"),
            }
        }
        MethodStyle::Controller => {
            let ret = controller_result(&method.return_type, options);
            let args = method
                .parameters
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let args = if args.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {args} }}")
            };
            format!(
                "{name} = async {type_params}({params}): Promise<{ret}> => await this.post<{ret}>(\"{}\", {args});",
                method.name
            )
        }
    }
}

/// Renders a constructor, or nothing when constructors are removed.
pub fn generate_constructor(constructor: &ConstructorDecl, options: &Options) -> String {
    if options.remove_constructors {
        return String::new();
    }
    let params = render_parameters(&constructor.parameters, options);
    match body_text(&constructor.body, "void", options) {
        Some(body) => format!("constructor({params}) {body}"),
        None => format!("constructor({params});"),
    }
}

fn render_type_params(method: &MethodDecl) -> String {
    if method.type_params.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = method.type_params.iter().map(|t| t.as_str()).collect();
        format!("<{}>", names.join(", "))
    }
}

fn render_parameters(parameters: &[Parameter], options: &Options) -> String {
    parameters
        .iter()
        .map(|p| {
            let ty = convert_type(&p.ty, options);
            match (p.modifier, &p.default) {
                (Some(ParameterModifier::Params), _) => format!("...{}: {ty}", p.name),
                (_, Some(_)) => format!("{}?: {ty}", p.name),
                _ => format!("{}: {ty}", p.name),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The body to emit, or `None` for a declaration only.
fn body_text(body: &MethodBody, ret: &str, options: &Options) -> Option<String> {
    if options.remove_method_bodies {
        return None;
    }
    match body {
        MethodBody::Block(block) => Some(block.clone()),
        MethodBody::Expression(expr) if ret == "void" => Some(format!("{{ {expr}; }}")),
        MethodBody::Expression(expr) => Some(format!("{{ return {expr}; }}")),
        MethodBody::None => None,
    }
}

/// The payload type of a controller action: `Task`, `ValueTask` and
/// `ActionResult` wrappers are removed.
fn controller_result(return_type: &str, options: &Options) -> String {
    let Some(parsed) = TypeRef::parse(return_type.trim()) else {
        return convert_type(return_type, options);
    };

    let mut ty = &parsed;
    for wrapper in ["Task", "ValueTask", "ActionResult"] {
        if ty.is_named(wrapper, 1) {
            ty = ty.first_arg().unwrap_or(ty);
        }
    }

    if ty.is_named("IActionResult", 0) || ty.is_named("ActionResult", 0) {
        "any".to_string()
    } else if ty.is_named("Task", 0) || ty.is_named("ValueTask", 0) {
        "void".to_string()
    } else {
        ty.render(options)
    }
}
