use std::path::{Path, PathBuf};

use mdlfmt_compiler::emit::Config;
use mdlfmt_compiler::events::EventLogError;
use mdlfmt_compiler::{BuildConfig, OutputFormat, Translator};

use super::discover::{check_usage, discover};
use super::event_log::load_events;
use super::output::{output_path, write_output};

/// Exit status when no input file was found.
pub const NO_INPUT: i32 = -1;
/// Exit status of a rejected command line, same as clap usage errors.
pub const USAGE_ERROR: i32 = 0;

pub enum Input {
    /// `--file`: one material file.
    File(PathBuf),
    /// `--path`: a material file or a directory to scan.
    Path(PathBuf),
}

pub struct ConvertArgs {
    /// `--root`, already joined into `input`.
    pub root: Option<PathBuf>,
    pub input: Input,
    pub format: OutputFormat,
    pub media_root: Option<String>,
    pub require_complete_calls: bool,
    pub check_file_namespace: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{0}")]
    Usage(String),

    #[error("failed to scan `{}`: {source}", root.display())]
    Scan {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed event log `{}`: {source}", path.display())]
    EventLog {
        path: PathBuf,
        #[source]
        source: EventLogError,
    },

    #[error("{}: {source}", path.display())]
    Translate {
        path: PathBuf,
        #[source]
        source: mdlfmt_compiler::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Whether the run must stop instead of moving on to the next file.
    pub fn is_fatal(&self) -> bool {
        match self {
            ConvertError::Translate { source, .. } => !source.is_recoverable(),
            _ => false,
        }
    }
}

/// Convert every input file and return the process exit status.
pub fn run(args: ConvertArgs) -> i32 {
    if let Err(err) = check_usage(args.root.as_deref(), &args.input) {
        tracing::error!("{err}");
        return USAGE_ERROR;
    }
    let files = match discover(&args.input) {
        Ok(files) => files,
        Err(err) => {
            tracing::error!("{err}");
            return 1;
        }
    };
    if files.is_empty() {
        tracing::error!("no material files found");
        return NO_INPUT;
    }

    let build = BuildConfig::new()
        .require_complete_calls(args.require_complete_calls)
        .check_file_namespace(args.check_file_namespace);
    let config = Config::new().media_root(args.media_root);
    let mut translator = Translator::new(build, config, args.format);

    let mut failed = 0usize;
    for file in &files {
        match convert_file(&mut translator, file) {
            Ok(output) => tracing::info!("writing {}", output.display()),
            Err(err) if err.is_fatal() => {
                tracing::error!("{err}");
                tracing::error!("aborting");
                return 1;
            }
            Err(err) => {
                tracing::error!("{err}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, total = files.len(), "some files were not converted");
        1
    } else {
        0
    }
}

/// Convert one file and return the path written.
pub fn convert_file(translator: &mut Translator, file: &Path) -> Result<PathBuf, ConvertError> {
    tracing::info!("parsing {}", file.display());
    let events = load_events(file)?;
    let text = translator
        .translate(&file.to_string_lossy(), &events)
        .map_err(|source| ConvertError::Translate {
            path: file.to_path_buf(),
            source,
        })?;

    let output = output_path(file, translator.format());
    write_output(&output, &text)?;
    Ok(output)
}
