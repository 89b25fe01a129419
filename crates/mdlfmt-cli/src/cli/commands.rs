//! Command builder for the CLI.

use clap::{ArgGroup, Command};

use super::args::*;

/// Build the `mdlfmt` command.
pub fn build_cli() -> Command {
    Command::new("mdlfmt")
        .about("Regenerate material DSL source from recorded parse events")
        .override_usage(
            "\
  mdlfmt --file <FILE> [OPTIONS]
  mdlfmt --path <PATH> [OPTIONS]",
        )
        .after_help(
            r#"Every X.mdl is read through its recorded events in X.mdl.events
(one JSON event per line). The output is written next to it as X_mdl.mdl
or X_mdl.json.

EXAMPLES:
  mdlfmt --file plastic.mdl
  mdlfmt --path materials/ --format json
  mdlfmt --root /assets --path vehicles --media-root /assets"#,
        )
        .arg(file_arg())
        .arg(path_arg())
        .arg(root_arg())
        .arg(format_arg())
        .arg(media_root_arg())
        .arg(allow_defaulted_args_arg())
        .arg(no_namespace_check_arg())
        .arg(verbose_arg())
        .group(
            ArgGroup::new("input")
                .args(["file", "path"])
                .required(true)
                .multiple(false),
        )
}
