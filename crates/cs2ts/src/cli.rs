//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use csharp_transformer::{MethodStyle, OptionOverrides};

/// Convert C# models and controllers to TypeScript.
#[derive(Debug, Parser)]
#[command(name = "cs2ts")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// C# files or directories to convert (reads stdin when empty)
    pub paths: Vec<Utf8PathBuf>,

    /// Keep access, static and readonly modifiers on properties
    #[arg(long)]
    pub preserve_modifiers: bool,

    /// How methods are rendered
    #[arg(long, value_enum)]
    pub method_style: Option<MethodStyleArg>,

    /// Emit classes, structs and records as interfaces
    #[arg(long)]
    pub class_to_interface: bool,

    /// Path to a TOML options file (defaults to ./cs2ts.toml when present)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Write `.ts` files under this directory instead of printing
    #[arg(long)]
    pub out_dir: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Re-convert whenever a .cs file changes
    #[arg(long)]
    pub watch: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Glob patterns to ignore when walking directories
    #[arg(long)]
    pub ignore: Vec<String>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The converted TypeScript (default)
    #[default]
    Text,
    /// One JSON report per file, with the replaced constructs
    Json,
}

/// Method style names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum MethodStyleArg {
    /// `name(params): Ret { ... }`
    Signature,
    /// `name = (params): Ret => { ... }`
    Lambda,
    /// Client stubs that post to the controller action
    Controller,
}

impl From<MethodStyleArg> for MethodStyle {
    fn from(style: MethodStyleArg) -> Self {
        match style {
            MethodStyleArg::Signature => MethodStyle::Signature,
            MethodStyleArg::Lambda => MethodStyle::Lambda,
            MethodStyleArg::Controller => MethodStyle::Controller,
        }
    }
}

impl Args {
    /// The toggles given on the command line. Flags that were not passed
    /// leave the config file value in place.
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            preserve_modifiers: self.preserve_modifiers.then_some(true),
            class_to_interface: self.class_to_interface.then_some(true),
            method_style: self
                .method_style
                .map(|style| MethodStyle::from(style).as_str().to_string()),
            ..Default::default()
        }
    }

    /// The default log filter directive.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["cs2ts"]);
        assert!(args.paths.is_empty());
        assert_eq!(args.output, OutputFormat::Text);
        assert!(!args.watch);
        assert_eq!(args.overrides(), OptionOverrides::default());
        assert_eq!(args.log_level(), "info");
    }

    #[test]
    fn test_paths_and_out_dir() {
        let args = Args::parse_from(["cs2ts", "Models", "Api/Users.cs", "--out-dir", "gen"]);
        assert_eq!(
            args.paths,
            vec![Utf8PathBuf::from("Models"), Utf8PathBuf::from("Api/Users.cs")]
        );
        assert_eq!(args.out_dir.as_deref().map(|p| p.as_str()), Some("gen"));
    }

    #[test]
    fn test_toggles_become_overrides() {
        let args = Args::parse_from([
            "cs2ts",
            "--preserve-modifiers",
            "--class-to-interface",
            "--method-style",
            "controller",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.preserve_modifiers, Some(true));
        assert_eq!(overrides.class_to_interface, Some(true));
        assert_eq!(overrides.method_style.as_deref(), Some("controller"));
    }

    #[test]
    fn test_output_and_verbose() {
        let args = Args::parse_from(["cs2ts", "--output", "json", "-v"]);
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn test_unknown_method_style_is_rejected() {
        assert!(Args::try_parse_from(["cs2ts", "--method-style", "arrow"]).is_err());
    }
}
