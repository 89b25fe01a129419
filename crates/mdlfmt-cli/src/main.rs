mod cli;
mod commands;
mod util;

use cli::{ConvertParams, build_cli};

fn main() {
    // Help, version and usage errors all leave with status 0.
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            std::process::exit(0);
        }
    };

    let params = ConvertParams::from_matches(&matches);
    util::init_tracing(params.verbose);
    std::process::exit(commands::convert::run(params.into()));
}
