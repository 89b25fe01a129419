use indoc::indoc;
use mdlfmt_core::{ContentHash, Expression, Material, MaterialFile, Parameter, TypeRef, Value};

use super::{OutputFormat, Translator, verify};
use crate::Error;
use crate::build::{BuildConfig, BuildError};
use crate::check::CheckError;
use crate::emit::{self, FormatError};
use crate::events::Event;
use crate::test_utils::{call, float, material, plastic_events};

fn roughness_events() -> Vec<Event> {
    material(
        "::pkg::rough",
        vec![
            Event::ParameterBegin {
                index: 0,
                modifier: String::new(),
                type_name: "float".into(),
                name: "roughness".into(),
            },
            float(0.5),
            Event::ParameterEnd,
        ],
    )
}

#[test]
fn dsl_output() {
    let mut translator = Translator::default();
    let text = translator
        .translate("pkg.mdl", &roughness_events())
        .unwrap();
    assert_eq!(
        text,
        indoc! {"
            mdl 1.2;

            export material rough(
              float roughness = 0.5f
            )
            = material();
        "}
    );
}

#[test]
fn json_output() {
    let mut translator = Translator::new(
        BuildConfig::default(),
        emit::Config::default(),
        OutputFormat::Json,
    );
    let text = translator.translate("pkg.mdl", &plastic_events()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["module"], "pkg");
    assert_eq!(value["materials"][0]["name"], "plastic");
    assert_eq!(translator.format().extension(), "json");
}

#[test]
fn recoverable_errors() {
    let mut translator = Translator::default();
    let err = translator
        .translate("other.mdl", &roughness_events())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::NamespaceMismatch { .. })
    ));
    assert!(err.is_recoverable());
}

#[test]
fn contract_violation_then_next_file() {
    let mut translator = Translator::default();
    let err = translator
        .translate("pkg.mdl", &[Event::CallEnd])
        .unwrap_err();
    assert!(!err.is_recoverable());

    // The next file starts from a clean builder.
    assert!(translator.translate("pkg.mdl", &roughness_events()).is_ok());
}

#[test]
fn format_errors_are_fatal() {
    let events = material(
        "::pkg::bad",
        vec![
            Event::FieldBegin {
                name: "ior".into(),
            },
            call("float", "f(float)", &[("float", "x")]),
            Event::ArgumentBegin { index: 0 },
            float(f32::NAN),
            Event::ArgumentEnd,
            Event::CallEnd,
            Event::FieldEnd,
        ],
    );
    let mut translator = Translator::default();
    let err = translator.translate("pkg.mdl", &events).unwrap_err();
    let Error::Format(FormatError::Material { material, .. }) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(material, "bad");
    assert!(!err.is_recoverable());
}

#[test]
fn extensions() {
    assert_eq!(OutputFormat::Dsl.extension(), "mdl");
    assert_eq!(OutputFormat::Json.extension(), "json");
    assert_eq!(OutputFormat::default(), OutputFormat::Dsl);
}

#[test]
fn slot_mismatch_fails_the_file() {
    let mut mat = Material::new("bad", ContentHash::default());
    mat.parameters.push(Parameter {
        index: 0,
        modifier: None,
        ty: TypeRef::local("float"),
        name: "roughness".into(),
        default: Some(Expression::Constant(Value::Bool(true))),
        annotations: Vec::new(),
    });
    let file = MaterialFile {
        materials: vec![mat],
        ..MaterialFile::default()
    };
    let err = verify(&file).unwrap_err();
    let Error::Build(BuildError::Check { context, source }) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(context, "material `bad`, roughness");
    assert!(matches!(source, CheckError::Mismatch { .. }));
    assert!(!err.is_recoverable());

    assert!(verify(&build_plastic()).is_ok());
}

fn build_plastic() -> MaterialFile {
    Translator::default()
        .build("pkg.mdl", &plastic_events())
        .unwrap()
}
