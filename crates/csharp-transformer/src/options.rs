//! Conversion options.
//!
//! Options are resolved once, before a pass starts, and passed by reference to
//! every generator. Nothing mutates them during a pass.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How methods are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MethodStyle {
    /// `name(params): Ret;`
    #[default]
    Signature,
    /// `name = (params): Ret => { ... }`
    Lambda,
    /// `name = async (params): Promise<Ret> => await this.post<Ret>("Name", { ... });`
    Controller,
}

impl MethodStyle {
    /// Returns the name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::Lambda => "lambda",
            Self::Controller => "controller",
        }
    }
}

impl fmt::Display for MethodStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodStyle {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signature" => Ok(Self::Signature),
            "lambda" => Ok(Self::Lambda),
            "controller" => Ok(Self::Controller),
            other => Err(OptionsError::UnknownMethodStyle(other.to_string())),
        }
    }
}

/// Errors raised while building [`Options`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// `remove_name_regex` is not a valid regular expression.
    #[error("invalid remove_name_regex `{pattern}`")]
    InvalidNameRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The method style is not one of the known names.
    #[error("unknown method style `{0}`, expected `signature`, `lambda` or `controller`")]
    UnknownMethodStyle(String),
}

/// A compiled name filter. Compares by pattern text.
#[derive(Debug, Clone)]
pub struct NamePattern(Regex);

impl NamePattern {
    /// Compiles a pattern.
    pub fn new(pattern: &str) -> Result<Self, OptionsError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| OptionsError::InvalidNameRegex {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Returns true if the pattern matches anywhere in `name`.
    pub fn is_match(&self, name: &str) -> bool {
        self.0.is_match(name)
    }

    /// The pattern text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for NamePattern {}

/// The three user-facing toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Toggles {
    /// Carry C# access, `static` and `readonly` modifiers over to properties.
    pub preserve_modifiers: bool,
    pub method_style: MethodStyle,
    /// Emit classes, structs and records as interfaces.
    pub class_to_interface: bool,
}

/// Every option that affects generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// camelCase member names.
    pub properties_to_camel_case: bool,
    /// Suffixes removed from member and type names. Case-sensitive.
    pub trim_postfixes: Vec<String>,
    /// Keep trimming while any postfix still matches.
    pub recursive_trim_postfixes: bool,
    /// Drop property and field initializers.
    pub ignore_initializer: bool,
    /// Drop method and constructor bodies.
    pub remove_method_bodies: bool,
    /// Drop constructors entirely.
    pub remove_constructors: bool,
    pub method_style: MethodStyle,
    /// Render `byte[]` as `string` (its JSON form).
    pub byte_array_to_string: bool,
    /// Render dates as `Date | string` instead of `Date`.
    pub date_to_date_or_string: bool,
    /// Drop properties and fields carrying any of these modifiers.
    pub remove_with_modifier: Vec<String>,
    /// Drop properties and fields whose name matches.
    pub remove_name_regex: Option<NamePattern>,
    pub class_to_interface: bool,
    pub preserve_modifiers: bool,
}

impl Default for Options {
    fn default() -> Self {
        resolve(Toggles::default())
    }
}

/// Builds the options for a pass from the user toggles. Everything else takes
/// its default.
pub fn resolve(toggles: Toggles) -> Options {
    Options {
        properties_to_camel_case: true,
        trim_postfixes: Vec::new(),
        recursive_trim_postfixes: true,
        ignore_initializer: true,
        remove_method_bodies: false,
        remove_constructors: true,
        method_style: toggles.method_style,
        byte_array_to_string: true,
        date_to_date_or_string: true,
        remove_with_modifier: Vec::new(),
        remove_name_regex: None,
        class_to_interface: toggles.class_to_interface,
        preserve_modifiers: toggles.preserve_modifiers,
    }
}

/// Partial options, as read from a config file or the command line. `None`
/// leaves the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct OptionOverrides {
    pub properties_to_camel_case: Option<bool>,
    pub trim_postfixes: Option<Vec<String>>,
    pub recursive_trim_postfixes: Option<bool>,
    pub ignore_initializer: Option<bool>,
    pub remove_method_bodies: Option<bool>,
    pub remove_constructors: Option<bool>,
    pub method_style: Option<String>,
    pub byte_array_to_string: Option<bool>,
    pub date_to_date_or_string: Option<bool>,
    pub remove_with_modifier: Option<Vec<String>>,
    /// An empty pattern clears the filter.
    pub remove_name_regex: Option<String>,
    pub class_to_interface: Option<bool>,
    pub preserve_modifiers: Option<bool>,
}

impl Options {
    /// Applies overrides on top of these options.
    pub fn with_overrides(mut self, overrides: OptionOverrides) -> Result<Self, OptionsError> {
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = overrides.$field {
                    self.$field = value;
                })*
            };
        }
        apply!(
            properties_to_camel_case,
            trim_postfixes,
            recursive_trim_postfixes,
            ignore_initializer,
            remove_method_bodies,
            remove_constructors,
            byte_array_to_string,
            date_to_date_or_string,
            remove_with_modifier,
            class_to_interface,
            preserve_modifiers,
        );

        if let Some(style) = overrides.method_style {
            self.method_style = style.parse()?;
        }
        if let Some(pattern) = overrides.remove_name_regex {
            self.remove_name_regex = if pattern.is_empty() {
                None
            } else {
                Some(NamePattern::new(&pattern)?)
            };
        }
        Ok(self)
    }

    /// Returns the toggles these options were built with.
    pub fn toggles(&self) -> Toggles {
        Toggles {
            preserve_modifiers: self.preserve_modifiers,
            method_style: self.method_style,
            class_to_interface: self.class_to_interface,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.properties_to_camel_case);
        assert!(options.trim_postfixes.is_empty());
        assert!(options.recursive_trim_postfixes);
        assert!(options.ignore_initializer);
        assert!(!options.remove_method_bodies);
        assert!(options.remove_constructors);
        assert!(options.byte_array_to_string);
        assert!(options.date_to_date_or_string);
        assert!(options.remove_with_modifier.is_empty());
        assert!(options.remove_name_regex.is_none());
        assert_eq!(options.toggles(), Toggles::default());
    }

    #[test]
    fn test_resolve_copies_toggles() {
        let toggles = Toggles {
            preserve_modifiers: true,
            method_style: MethodStyle::Controller,
            class_to_interface: true,
        };
        let options = resolve(toggles);
        assert_eq!(options.toggles(), toggles);
        assert_eq!(
            Options {
                method_style: MethodStyle::Signature,
                class_to_interface: false,
                preserve_modifiers: false,
                ..options
            },
            Options::default()
        );
    }

    #[test]
    fn test_method_style_from_str() {
        assert_eq!("lambda".parse::<MethodStyle>().unwrap(), MethodStyle::Lambda);
        assert_eq!(MethodStyle::Controller.to_string(), "controller");
        let err = "arrow".parse::<MethodStyle>().unwrap_err();
        assert!(matches!(err, OptionsError::UnknownMethodStyle(ref s) if s == "arrow"));
    }

    #[test]
    fn test_overrides() {
        let options = Options::default()
            .with_overrides(OptionOverrides {
                trim_postfixes: Some(vec!["Dto".to_string()]),
                ignore_initializer: Some(false),
                method_style: Some("lambda".to_string()),
                remove_name_regex: Some("^_".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(options.trim_postfixes, vec!["Dto"]);
        assert!(!options.ignore_initializer);
        assert_eq!(options.method_style, MethodStyle::Lambda);
        assert!(options.remove_name_regex.unwrap().is_match("_secret"));
    }

    #[test]
    fn test_empty_name_regex_clears_filter() {
        let options = Options::default()
            .with_overrides(OptionOverrides {
                remove_name_regex: Some("x".to_string()),
                ..Default::default()
            })
            .and_then(|o| {
                o.with_overrides(OptionOverrides {
                    remove_name_regex: Some(String::new()),
                    ..Default::default()
                })
            })
            .unwrap();
        assert!(options.remove_name_regex.is_none());
    }

    #[test]
    fn test_invalid_name_regex() {
        let err = Options::default()
            .with_overrides(OptionOverrides {
                remove_name_regex: Some("(".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, OptionsError::InvalidNameRegex { ref pattern, .. } if pattern == "("));
        assert_eq!(err.to_string(), "invalid remove_name_regex `(`");
    }
}
