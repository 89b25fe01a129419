use std::fs;
use std::path::{Path, PathBuf};

use mdlfmt_compiler::OutputFormat;

use super::convert::ConvertError;

/// Output written next to `source`: `X.mdl` → `X_mdl.mdl` or `X_mdl.json`.
pub fn output_path(source: &Path, format: OutputFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}_mdl.{}", format.extension()))
}

pub fn write_output(path: &Path, text: &str) -> Result<(), ConvertError> {
    fs::write(path, text).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}
