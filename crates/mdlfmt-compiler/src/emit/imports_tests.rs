use mdlfmt_core::Imports;

use super::import_lines;

fn imports(entries: &[(&str, &str)]) -> Imports {
    let mut imports = Imports::new();
    for (namespace, name) in entries {
        imports.insert(namespace, name);
    }
    imports
}

#[test]
fn below_threshold_lists_every_name() {
    let imports = imports(&[
        ("df", "weighted_layer"),
        ("df", "diffuse_reflection_bsdf"),
        ("base", "x"),
    ]);
    assert_eq!(
        import_lines(&imports, 4),
        [
            "import base::x;",
            "import df::diffuse_reflection_bsdf;",
            "import df::weighted_layer;",
        ]
    );
}

#[test]
fn threshold_collapses_namespace() {
    let imports = imports(&[
        ("df", "a"),
        ("df", "b"),
        ("df", "c"),
        ("df", "d"),
        ("tex", "gamma_mode"),
    ]);
    assert_eq!(
        import_lines(&imports, 4),
        ["import df::*;", "import tex::gamma_mode;"]
    );
}

#[test]
fn nothing_to_import() {
    assert!(import_lines(&Imports::new(), 4).is_empty());
}
