use std::fs;
use std::path::{Path, PathBuf};

use indoc::{formatdoc, indoc};
use mdlfmt_compiler::OutputFormat;

use super::convert::{ConvertArgs, ConvertError, Input, NO_INPUT, USAGE_ERROR, run};
use super::discover::{check_usage, discover};
use super::event_log::{load_events, sidecar_path};
use super::output::output_path;

/// Event log of a material named after the file stem.
fn material_log(stem: &str) -> String {
    formatdoc! {r#"
        {{"event":"file_begin","name":"{stem}.mdl"}}
        {{"event":"material_begin","name":"::{stem}::{stem}"}}
        {{"event":"parameter_begin","index":0,"type":"float","name":"roughness"}}
        {{"event":"value_float","value":0.5}}
        {{"event":"parameter_end"}}
        {{"event":"parameter_begin","index":1,"type":"texture_2d","name":"map"}}
        {{"event":"value_texture","path":"/assets/wood.png","gamma":"srgb"}}
        {{"event":"parameter_end"}}
        {{"event":"field_begin","name":"surface"}}
        {{"event":"call_begin","type":"bsdf","name":"::df::diffuse_reflection_bsdf","args":[]}}
        {{"event":"call_end"}}
        {{"event":"field_end"}}
        {{"event":"material_end"}}
        {{"event":"file_end"}}
    "#}
}

/// Write `name` and its event sidecar under `dir`.
fn write_source(dir: &Path, name: &str, log: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "// source\n").unwrap();
    fs::write(sidecar_path(&path), log).unwrap();
    path
}

fn args(input: Input) -> ConvertArgs {
    ConvertArgs {
        root: None,
        input,
        format: OutputFormat::Dsl,
        media_root: None,
        require_complete_calls: true,
        check_file_namespace: true,
    }
}

#[test]
fn converts_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "rough.mdl", &material_log("rough"));

    let mut args = args(Input::File(source.clone()));
    args.media_root = Some("/assets".into());
    assert_eq!(run(args), 0);

    let text = fs::read_to_string(dir.path().join("rough_mdl.mdl")).unwrap();
    insta::assert_snapshot!(text, @r#"
    mdl 1.2;

    import df::diffuse_reflection_bsdf;
    import tex::gamma_mode;

    export material rough(
      float roughness = 0.5f,
      texture_2d map = texture_2d("wood.png", tex::gamma_srgb)
    )
    = material(
      surface : df::diffuse_reflection_bsdf()
    );
    "#);
}

#[test]
fn converts_directory_to_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write_source(dir.path(), "a.mdl", &material_log("a"));
    write_source(&dir.path().join("sub"), "b.mdl", &material_log("b"));

    let mut args = args(Input::Path(dir.path().to_path_buf()));
    args.format = OutputFormat::Json;
    assert_eq!(run(args), 0);

    let text = fs::read_to_string(dir.path().join("sub").join("b_mdl.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["module"], "b");
    assert_eq!(value["materials"][0]["name"], "b");
    assert!(dir.path().join("a_mdl.json").exists());
}

#[test]
fn recoverable_failures_continue() {
    let dir = tempfile::tempdir().unwrap();
    // No sidecar.
    fs::write(dir.path().join("a.mdl"), "").unwrap();
    // Material namespace differs from the file stem.
    write_source(dir.path(), "b.mdl", &material_log("other"));
    write_source(dir.path(), "c.mdl", &material_log("c"));

    assert_eq!(run(args(Input::Path(dir.path().to_path_buf()))), 1);
    assert!(!dir.path().join("b_mdl.mdl").exists());
    assert!(dir.path().join("c_mdl.mdl").exists());
}

#[test]
fn namespace_check_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "b.mdl", &material_log("other"));

    let mut args = args(Input::File(source));
    args.check_file_namespace = false;
    assert_eq!(run(args), 0);
    assert!(dir.path().join("b_mdl.mdl").exists());
}

#[test]
fn contract_violation_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let broken = indoc! {r#"
        {"event":"material_begin","name":"::a::a"}
        {"event":"call_end"}
        {"event":"material_end"}
    "#};
    write_source(dir.path(), "a.mdl", broken);
    write_source(dir.path(), "b.mdl", &material_log("b"));

    assert_eq!(run(args(Input::Path(dir.path().to_path_buf()))), 1);
    assert!(!dir.path().join("b_mdl.mdl").exists());
}

#[test]
fn malformed_log_is_recoverable() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "a.mdl", "{\"event\":\"nope\"}\n");
    write_source(dir.path(), "b.mdl", &material_log("b"));

    assert_eq!(run(args(Input::Path(dir.path().to_path_buf()))), 1);
    assert!(dir.path().join("b_mdl.mdl").exists());
}

#[test]
fn no_input_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();
    assert_eq!(run(args(Input::Path(dir.path().to_path_buf()))), NO_INPUT);
    assert_eq!(
        run(args(Input::Path(dir.path().join("missing")))),
        NO_INPUT
    );
}

#[test]
fn missing_file_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Input::File(dir.path().join("missing.mdl"));
    assert!(matches!(
        check_usage(None, &missing),
        Err(ConvertError::Usage(_))
    ));
    assert_eq!(run(args(missing)), USAGE_ERROR);
}

#[test]
fn non_mdl_file_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let notes = write_source(dir.path(), "notes.txt", &material_log("notes"));

    let err = check_usage(None, &Input::File(notes.clone())).unwrap_err();
    assert!(err.to_string().ends_with("is not an .mdl file"));
    assert_eq!(run(args(Input::File(notes))), USAGE_ERROR);
    assert!(!dir.path().join("notes_mdl.mdl").exists());
}

#[test]
fn root_must_be_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "rough.mdl", &material_log("rough"));
    let input = Input::File(source);

    assert!(check_usage(Some(dir.path()), &input).is_ok());
    let missing = dir.path().join("missing");
    assert!(matches!(
        check_usage(Some(&missing), &input),
        Err(ConvertError::Usage(_))
    ));

    let mut args = args(input);
    args.root = Some(missing);
    assert_eq!(run(args), USAGE_ERROR);
    assert!(!dir.path().join("rough_mdl.mdl").exists());
}

#[test]
fn discovery_is_sorted_and_skips_outputs() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["z.mdl", "a.mdl", "a_mdl.mdl", "a.mdl.events", "m.json"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    let files = discover(&Input::Path(dir.path().to_path_buf())).unwrap();
    assert_eq!(files, vec![dir.path().join("a.mdl"), dir.path().join("z.mdl")]);
}

#[test]
fn recorded_file_events_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "a.mdl", &material_log("a"));
    let events = load_events(&source).unwrap();
    assert_eq!(events.len(), 12);
    assert!(matches!(
        events.first(),
        Some(mdlfmt_compiler::Event::MaterialBegin { .. })
    ));
}

#[test]
fn file_naming() {
    let source = Path::new("lib/plastic.mdl");
    assert_eq!(sidecar_path(source), Path::new("lib/plastic.mdl.events"));
    assert_eq!(
        output_path(source, OutputFormat::Dsl),
        Path::new("lib/plastic_mdl.mdl")
    );
    assert_eq!(
        output_path(source, OutputFormat::Json),
        Path::new("lib/plastic_mdl.json")
    );
}
