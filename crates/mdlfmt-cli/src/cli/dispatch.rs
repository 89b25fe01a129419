//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use mdlfmt_compiler::OutputFormat;

use crate::commands::convert::{ConvertArgs, Input};

pub struct ConvertParams {
    pub file: Option<PathBuf>,
    pub path: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub format: OutputFormat,
    pub media_root: Option<String>,
    pub allow_defaulted_args: bool,
    pub no_namespace_check: bool,
    pub verbose: u8,
}

impl ConvertParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned(),
            path: m.get_one::<PathBuf>("path").cloned(),
            root: m.get_one::<PathBuf>("root").cloned(),
            format: parse_format(m),
            media_root: m.get_one::<String>("media_root").cloned(),
            allow_defaulted_args: m.get_flag("allow_defaulted_args"),
            no_namespace_check: m.get_flag("no_namespace_check"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<ConvertParams> for ConvertArgs {
    fn from(p: ConvertParams) -> Self {
        let root = p.root.clone().unwrap_or_default();
        // clap guarantees exactly one of --file/--path.
        let input = match (p.file, p.path) {
            (Some(file), _) => Input::File(root.join(file)),
            (None, Some(path)) => Input::Path(root.join(path)),
            (None, None) => Input::Path(root),
        };
        Self {
            root: p.root,
            input,
            format: p.format,
            media_root: p.media_root,
            require_complete_calls: !p.allow_defaulted_args,
            check_file_namespace: !p.no_namespace_check,
        }
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Dsl,
    }
}
