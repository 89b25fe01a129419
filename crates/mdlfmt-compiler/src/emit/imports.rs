use mdlfmt_core::Imports;

/// `import` lines for the file header, grouped by namespace.
///
/// A namespace with `wildcard_threshold` or more names collapses into one
/// `ns::*` import.
pub fn import_lines(imports: &Imports, wildcard_threshold: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (namespace, names) in imports.iter() {
        if names.len() >= wildcard_threshold {
            lines.push(format!("import {namespace}::*;"));
        } else {
            lines.extend(names.iter().map(|name| format!("import {namespace}::{name};")));
        }
    }
    lines
}
