//! Argument builders for the `mdlfmt` command.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Single input file (--file).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .long("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Material file to convert")
}

/// Input file or directory (--path).
pub fn path_arg() -> Arg {
    Arg::new("path")
        .long("path")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Material file, or directory searched recursively for .mdl files")
}

/// Prefix for --file and --path (--root).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory that --file and --path are relative to")
}

/// Output form (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("mdl")
        .value_parser(["mdl", "json"])
        .help("Output format")
}

/// Media root stripped from texture paths (--media-root).
pub fn media_root_arg() -> Arg {
    Arg::new("media_root")
        .long("media-root")
        .value_name("DIR")
        .help("Prefix removed from texture paths in the output")
}

/// Accept calls with unfilled slots (--allow-defaulted-args).
pub fn allow_defaulted_args_arg() -> Arg {
    Arg::new("allow_defaulted_args")
        .long("allow-defaulted-args")
        .action(ArgAction::SetTrue)
        .help("Accept calls whose arguments were dropped because they equal the default")
}

/// Skip the material namespace check (--no-namespace-check).
pub fn no_namespace_check_arg() -> Arg {
    Arg::new("no_namespace_check")
        .long("no-namespace-check")
        .action(ArgAction::SetTrue)
        .help("Do not require material namespaces to match the file name")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for info, -vv for debug, -vvv for trace)")
}
