//! Member and type naming.

use crate::Options;

/// Removes configured postfixes from `name`.
///
/// With `recursive_trim_postfixes` trimming repeats until no postfix matches,
/// so `PersonDtoDto` with postfix `Dto` becomes `Person`. A postfix equal to
/// the whole name is never removed.
pub fn trim_postfixes<'a>(name: &'a str, options: &Options) -> &'a str {
    let mut name = name;
    while let Some(rest) = options
        .trim_postfixes
        .iter()
        .filter(|postfix| !postfix.is_empty())
        .find_map(|postfix| {
            name.strip_suffix(postfix.as_str())
                .filter(|rest| !rest.is_empty())
        })
    {
        name = rest;
        if !options.recursive_trim_postfixes {
            break;
        }
    }
    name
}

/// Lowercases the leading uppercase run of `name`, keeping the last capital
/// of an acronym that starts the next word: `Id` -> `id`, `ID` -> `id`,
/// `URLValue` -> `urlValue`.
pub fn camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let upper = chars.iter().take_while(|c| c.is_uppercase()).count();
    let lower = match upper {
        0 => return name.to_string(),
        n if n < chars.len() && n > 1 && chars[n].is_lowercase() => n - 1,
        n => n,
    };

    chars[..lower]
        .iter()
        .flat_map(|c| c.to_lowercase())
        .chain(chars[lower..].iter().copied())
        .collect()
}

/// The TypeScript name for a property, field or method.
pub fn member_name(name: &str, options: &Options) -> String {
    let trimmed = trim_postfixes(name, options);
    if options.properties_to_camel_case {
        camel_case(trimmed)
    } else {
        trimmed.to_string()
    }
}

/// The TypeScript name for a type. Generic arguments, if present, are kept.
pub fn type_name(name: &str, options: &Options) -> String {
    match name.find('<') {
        Some(open) => format!("{}{}", trim_postfixes(&name[..open], options), &name[open..]),
        None => trim_postfixes(name, options).to_string(),
    }
}
