//! CLI errors.

use camino::Utf8PathBuf;
use csharp_transformer::OptionsError;
use miette::Diagnostic;
use thiserror::Error;

/// Everything that can stop a conversion run.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Failed to read an input file.
    #[error("failed to read {path}")]
    #[diagnostic(code(cs2ts::read))]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read standard input.
    #[error("failed to read stdin")]
    #[diagnostic(code(cs2ts::stdin))]
    Stdin(#[source] std::io::Error),

    /// Failed to write an output file.
    #[error("failed to write {path}")]
    #[diagnostic(code(cs2ts::write))]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("invalid config file {path}")]
    #[diagnostic(
        code(cs2ts::config),
        help("keys are option names in snake_case, e.g. `method_style = \"lambda\"`")
    )]
    Config {
        path: Utf8PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An option value was rejected.
    #[error(transparent)]
    #[diagnostic(code(cs2ts::options))]
    Options(#[from] OptionsError),

    /// An `--ignore` pattern is not a valid glob.
    #[error("invalid glob pattern `{pattern}`")]
    #[diagnostic(code(cs2ts::glob))]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Failed to walk an input directory.
    #[error("failed to walk {path}")]
    #[diagnostic(code(cs2ts::walk))]
    Walk {
        path: Utf8PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A path that is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    #[diagnostic(code(cs2ts::path))]
    NonUtf8Path(String),

    /// The JSON report could not be serialized.
    #[error("failed to serialize the JSON report")]
    #[diagnostic(code(cs2ts::json))]
    Json(#[from] serde_json::Error),

    /// The file watcher failed.
    #[error("watch error")]
    #[diagnostic(code(cs2ts::watch))]
    Watch(#[from] notify::Error),

    /// The file watcher stopped sending events.
    #[error("watch channel closed unexpectedly")]
    #[diagnostic(code(cs2ts::watch))]
    WatchClosed,

    /// Some files could not be converted. Each failure was already logged.
    #[error("{0} file(s) failed to convert")]
    #[diagnostic(code(cs2ts::failed))]
    Failed(usize),
}
