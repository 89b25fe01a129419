use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::convert::{ConvertError, Input};

/// Material files named by `input`, in processing order.
///
/// A directory is scanned recursively for `*.mdl` files. Previous outputs
/// (`*_mdl.mdl`) are skipped.
pub fn discover(input: &Input) -> Result<Vec<PathBuf>, ConvertError> {
    match input {
        Input::File(file) => Ok(vec![file.clone()]),
        Input::Path(path) if path.is_dir() => scan(path),
        Input::Path(path) if path.is_file() => Ok(vec![path.clone()]),
        Input::Path(_) => Ok(Vec::new()),
    }
}

/// Reject a command line whose `--root` or `--file` cannot be used.
pub fn check_usage(root: Option<&Path>, input: &Input) -> Result<(), ConvertError> {
    if let Some(root) = root
        && !root.is_dir()
    {
        return Err(ConvertError::Usage(format!(
            "root `{}` is not a directory",
            root.display()
        )));
    }
    if let Input::File(file) = input {
        if !file.is_file() {
            return Err(ConvertError::Usage(format!(
                "`{}` does not exist",
                file.display()
            )));
        }
        if !file.extension().is_some_and(|ext| ext == "mdl") {
            return Err(ConvertError::Usage(format!(
                "`{}` is not an .mdl file",
                file.display()
            )));
        }
    }
    Ok(())
}

fn scan(root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| ConvertError::Scan {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_material_source(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    tracing::debug!(root = %root.display(), files = files.len(), "scan complete");
    Ok(files)
}

fn is_material_source(path: &Path) -> bool {
    let is_mdl = path.extension().is_some_and(|ext| ext == "mdl");
    let generated = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with("_mdl"));
    is_mdl && !generated
}
