//! Configuration loading.
//!
//! Options are layered: built-in defaults, then the TOML config file, then
//! the toggles given on the command line.

use crate::error::CliError;
use camino::{Utf8Path, Utf8PathBuf};
use csharp_transformer::{OptionOverrides, Options};
use std::fs;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const CONFIG_FILE: &str = "cs2ts.toml";

/// Finds the config file to use: the explicit path if any, else
/// `cs2ts.toml` in `cwd` when it exists.
pub fn find(explicit: Option<&Utf8Path>, cwd: &Utf8Path) -> Option<Utf8PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = cwd.join(CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}

/// Reads the overrides in a TOML config file.
pub fn read_overrides(path: &Utf8Path) -> Result<OptionOverrides, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_overrides(&content, path)
}

fn parse_overrides(content: &str, path: &Utf8Path) -> Result<OptionOverrides, CliError> {
    toml::from_str(content).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the options for a run.
pub fn load_options(
    config_file: Option<&Utf8Path>,
    cli: OptionOverrides,
) -> Result<Options, CliError> {
    let mut options = Options::default();
    if let Some(path) = config_file {
        tracing::debug!(%path, "loading config file");
        options = options.with_overrides(read_overrides(path)?)?;
    }
    Ok(options.with_overrides(cli)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csharp_transformer::MethodStyle;
    use pretty_assertions::assert_eq;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_parse_overrides() {
        let content = r#"
method_style = "lambda"
trim_postfixes = ["Dto", "Model"]
remove_name_regex = "^Internal"
ignore_initializer = false
"#;
        let overrides = parse_overrides(content, Utf8Path::new("cs2ts.toml")).unwrap();
        assert_eq!(overrides.method_style.as_deref(), Some("lambda"));
        assert_eq!(
            overrides.trim_postfixes,
            Some(vec!["Dto".to_string(), "Model".to_string()])
        );
        assert_eq!(overrides.remove_name_regex.as_deref(), Some("^Internal"));
        assert_eq!(overrides.ignore_initializer, Some(false));
        assert_eq!(overrides.class_to_interface, None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse_overrides("camel_case = true", Utf8Path::new("cs2ts.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_find_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = utf8_dir(&dir);
        assert_eq!(find(None, &cwd), None);

        fs::write(cwd.join(CONFIG_FILE), "").unwrap();
        assert_eq!(find(None, &cwd), Some(cwd.join(CONFIG_FILE)));

        let explicit = Utf8Path::new("other.toml");
        assert_eq!(find(Some(explicit), &cwd), Some(explicit.to_path_buf()));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = utf8_dir(&dir).join(CONFIG_FILE);
        fs::write(
            &path,
            "method_style = \"lambda\"\nclass_to_interface = true\nremove_constructors = false\n",
        )
        .unwrap();

        let cli = OptionOverrides {
            method_style: Some("controller".to_string()),
            ..Default::default()
        };
        let options = load_options(Some(path.as_path()), cli).unwrap();
        assert_eq!(options.method_style, MethodStyle::Controller);
        assert!(options.class_to_interface);
        assert!(!options.remove_constructors);
    }

    #[test]
    fn test_invalid_option_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = utf8_dir(&dir).join(CONFIG_FILE);
        fs::write(&path, "remove_name_regex = \"(\"\n").unwrap();
        let err = load_options(Some(path.as_path()), OptionOverrides::default()).unwrap_err();
        assert!(matches!(err, CliError::Options(_)));
    }

    #[test]
    fn test_no_config_gives_defaults() {
        let options = load_options(None, OptionOverrides::default()).unwrap();
        assert_eq!(options, Options::default());
    }
}
