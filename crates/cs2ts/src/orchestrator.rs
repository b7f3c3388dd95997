//! Main orchestration logic.

use crate::cli::{Args, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output::{format_json, format_text, FileReport, RunSummary};
use camino::{Utf8Path, Utf8PathBuf};
use csharp_transformer::{rewrite_with_map, Options};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read, Write};
use std::sync::mpsc;
use walkdir::WalkDir;

/// Directories skipped when walking, on top of `--ignore`.
const DEFAULT_IGNORES: [&str; 2] = ["**/bin/**", "**/obj/**"];

/// A C# file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Where to read it.
    pub path: Utf8PathBuf,
    /// Its path below the input it was found in. Used to place output files.
    pub relative: Utf8PathBuf,
}

impl SourceFile {
    /// The output path below `out_dir`.
    pub fn output_path(&self, out_dir: &Utf8Path) -> Utf8PathBuf {
        out_dir.join(&self.relative).with_extension("ts")
    }
}

/// Runs the conversion described by `args`.
pub fn run(args: &Args) -> Result<RunSummary, CliError> {
    let cwd = current_dir()?;
    let config_file = config::find(args.config.as_deref(), &cwd);
    let options = config::load_options(config_file.as_deref(), args.overrides())?;
    tracing::debug!(?options, "resolved options");

    if args.paths.is_empty() {
        if args.watch {
            tracing::warn!("--watch needs input paths; converting stdin once");
        }
        return run_stdin(args, &options);
    }

    let ignore_set = build_ignore_set(&args.ignore)?;
    let summary = run_once(args, &options, &ignore_set)?;
    if args.watch {
        run_watch_mode(args, &options, &ignore_set)
    } else {
        Ok(summary)
    }
}

fn current_dir() -> Result<Utf8PathBuf, CliError> {
    let dir = std::env::current_dir().map_err(|source| CliError::Read {
        path: Utf8PathBuf::from("."),
        source,
    })?;
    Utf8PathBuf::try_from(dir).map_err(non_utf8)
}

fn non_utf8(err: camino::FromPathBufError) -> CliError {
    CliError::NonUtf8Path(err.into_path_buf().display().to_string())
}

/// Converts stdin to stdout.
fn run_stdin(args: &Args, options: &Options) -> Result<RunSummary, CliError> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .map_err(CliError::Stdin)?;

    let report = FileReport::new("<stdin>", &source, rewrite_with_map(&source, options));
    let summary = RunSummary {
        file_count: 1,
        replacement_count: report.replacements.len(),
        failed_count: 0,
    };
    print_reports(args.output, &[report])?;
    Ok(summary)
}

/// Builds the ignore set from user patterns plus the defaults.
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, CliError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns
        .iter()
        .map(String::as_str)
        .chain(DEFAULT_IGNORES)
    {
        let glob = Glob::new(pattern).map_err(|source| CliError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| CliError::InvalidGlob {
        pattern: patterns.join(", "),
        source,
    })
}

/// Expands the input paths into C# files. Directories are walked for `*.cs`
/// files not matched by `ignore`; files are taken as given.
pub fn collect_files(
    paths: &[Utf8PathBuf],
    ignore: &GlobSet,
) -> Result<Vec<SourceFile>, CliError> {
    let mut files = Vec::new();
    for root in paths {
        if !root.is_dir() {
            let relative = root
                .file_name()
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| root.clone());
            files.push(SourceFile {
                path: root.clone(),
                relative,
            });
            continue;
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| CliError::Walk {
                path: root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = Utf8PathBuf::try_from(entry.into_path()).map_err(non_utf8)?;
            if path.extension() != Some("cs") {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            if ignore.is_match(relative.as_str()) {
                tracing::trace!(%path, "ignored");
                continue;
            }
            files.push(SourceFile { path, relative });
        }
    }
    Ok(files)
}

/// Converts one file, writing it below `out_dir` when given.
pub fn convert_file(
    file: &SourceFile,
    options: &Options,
    out_dir: Option<&Utf8Path>,
) -> Result<FileReport, CliError> {
    let source = fs::read_to_string(&file.path).map_err(|source| CliError::Read {
        path: file.path.clone(),
        source,
    })?;
    let result = rewrite_with_map(&source, options);
    let report = FileReport::new(file.path.as_str(), &source, result);
    tracing::debug!(
        path = %file.path,
        replacements = report.replacements.len(),
        "converted"
    );

    if let Some(out_dir) = out_dir {
        let target = file.output_path(out_dir);
        write_output(&target, &report.typescript)?;
    }
    Ok(report)
}

fn write_output(target: &Utf8Path, typescript: &str) -> Result<(), CliError> {
    let to_error = |source| CliError::Write {
        path: target.to_path_buf(),
        source,
    };
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(target, typescript).map_err(to_error)
}

/// Runs a single conversion pass over every input.
fn run_once(args: &Args, options: &Options, ignore: &GlobSet) -> Result<RunSummary, CliError> {
    let files = collect_files(&args.paths, ignore)?;
    tracing::debug!(count = files.len(), "collected files");

    // Each pass owns its text and only borrows the options.
    let results: Vec<Result<FileReport, CliError>> = files
        .par_iter()
        .map(|file| convert_file(file, options, args.out_dir.as_deref()))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed_count = 0;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                failed_count += 1;
                tracing::error!("{:?}", miette::Report::new(err));
            }
        }
    }

    let summary = RunSummary {
        file_count: reports.len(),
        replacement_count: reports.iter().map(|r| r.replacements.len()).sum(),
        failed_count,
    };

    if args.out_dir.is_none() || args.output == OutputFormat::Json {
        print_reports(args.output, &reports)?;
    }
    tracing::info!("{}", summary.format());

    if failed_count > 0 {
        return Err(CliError::Failed(failed_count));
    }
    Ok(summary)
}

fn print_reports(format: OutputFormat, reports: &[FileReport]) -> Result<(), CliError> {
    let output = match format {
        OutputFormat::Text => format_text(reports),
        OutputFormat::Json => format_json(reports)?,
    };
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| CliError::Write {
            path: Utf8PathBuf::from("<stdout>"),
            source,
        })
}

/// Runs in watch mode.
fn run_watch_mode(
    args: &Args,
    options: &Options,
    ignore: &GlobSet,
) -> Result<RunSummary, CliError> {
    use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
    use std::time::Duration;

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| forward_event(&tx, res),
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    for path in &args.paths {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(path.as_std_path(), mode)?;
    }

    tracing::info!("watching for changes (Ctrl+C to stop)");

    for event in rx {
        let cs_changed = event
            .paths
            .iter()
            .any(|p| p.extension().is_some_and(|ext| ext == "cs"));
        if !cs_changed {
            continue;
        }

        tracing::info!("change detected, converting again");
        // A failed pass is already logged; keep watching.
        if let Err(err) = run_once(args, options, ignore) {
            tracing::error!("{:?}", miette::Report::new(err));
        }
    }

    Err(CliError::WatchClosed)
}

/// Passes a watcher event on to the conversion loop. Watcher errors are
/// logged and dropped.
fn forward_event(tx: &mpsc::Sender<notify::Event>, res: notify::Result<notify::Event>) {
    match res {
        Ok(event) => {
            let _ = tx.send(event);
        }
        Err(err) => tracing::warn!("watch error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
    }

    fn write(path: &Utf8Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_files_walks_and_ignores() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        write(&root.join("Models/User.cs"), "");
        write(&root.join("Models/Order.cs"), "");
        write(&root.join("Models/readme.md"), "");
        write(&root.join("bin/Debug/Generated.cs"), "");
        write(&root.join("obj/Temp.cs"), "");
        write(&root.join("Legacy/Old.cs"), "");

        let ignore = build_ignore_set(&["Legacy/**".to_string()]).unwrap();
        let files = collect_files(&[root.clone()], &ignore).unwrap();
        let relative: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(relative, vec!["Models/Order.cs", "Models/User.cs"]);
    }

    #[test]
    fn test_explicit_file_is_taken_as_given() {
        let ignore = build_ignore_set(&[]).unwrap();
        let files = collect_files(&[Utf8PathBuf::from("src/Point.txt")], &ignore).unwrap();
        assert_eq!(
            files,
            vec![SourceFile {
                path: Utf8PathBuf::from("src/Point.txt"),
                relative: Utf8PathBuf::from("Point.txt"),
            }]
        );
    }

    #[test]
    fn test_invalid_glob() {
        let err = build_ignore_set(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::InvalidGlob { .. }));
    }

    #[test]
    fn test_convert_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        let input = root.join("in/Models/Point.cs");
        write(&input, "public class Point { public int X { get; set; } }");

        let file = SourceFile {
            path: input,
            relative: Utf8PathBuf::from("Models/Point.cs"),
        };
        let out_dir = root.join("out");
        let report = convert_file(&file, &Options::default(), Some(out_dir.as_path())).unwrap();
        assert_eq!(report.typescript, "export class Point { x: number; }");

        let written = fs::read_to_string(out_dir.join("Models/Point.ts")).unwrap();
        assert_eq!(written, report.typescript);
    }

    #[test]
    fn test_watch_errors_are_not_forwarded() {
        let (tx, rx) = mpsc::channel();
        forward_event(&tx, Err(notify::Error::generic("inotify limit reached")));
        assert!(rx.try_recv().is_err());

        let event = notify::Event::new(notify::EventKind::Any).add_path("Models/User.cs".into());
        forward_event(&tx, Ok(event.clone()));
        assert_eq!(rx.try_recv().unwrap(), event);
    }

    #[test]
    fn test_convert_missing_file() {
        let file = SourceFile {
            path: Utf8PathBuf::from("does/not/exist.cs"),
            relative: Utf8PathBuf::from("exist.cs"),
        };
        let err = convert_file(&file, &Options::default(), None).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
