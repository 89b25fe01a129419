use mdlfmt_core::{ContentHash, Expression, Material, MaterialFile, Value};

use super::{Config, FormatError, emit_dsl, emit_json};
use crate::events::Event;
use crate::test_utils::{build_file, call, float, material, plastic_events};

fn dsl(events: &[Event]) -> String {
    let file = build_file("pkg.mdl", events).unwrap();
    emit_dsl(&file, &Config::default()).unwrap()
}

#[test]
fn roughness_example() {
    let events = material(
        "pkg::mat",
        vec![
            Event::ParameterBegin {
                index: 0,
                modifier: String::new(),
                type_name: "float".into(),
                name: "roughness".into(),
            },
            float(0.5),
            Event::ParameterEnd,
            Event::FieldBegin {
                name: "surface".into(),
            },
            call("bsdf", "diffuse_reflection_bsdf", &[]),
            Event::CallEnd,
            Event::FieldEnd,
        ],
    );
    insta::assert_snapshot!(dsl(&events), @r"
    mdl 1.2;

    export material mat(
      float roughness = 0.5f
    )
    = material(
      surface : diffuse_reflection_bsdf()
    );
    ");
}

#[test]
fn plastic_material() {
    insta::assert_snapshot!(dsl(&plastic_events()), @r#"
    mdl 1.2;

    import anno::display_name;
    import df::diffuse_reflection_bsdf;
    import pkg::finish;
    import tex::gamma_mode;

    export material plastic(
      uniform color tint = color(0.8f, 0.1f, 0.1f)
      [[
        anno::display_name(
          name : "Tint"
        )
      ]],
      pkg::finish finish = pkg::glossy,
      texture_2d map = texture_2d("/assets/wood.png", tex::gamma_srgb)
    )
    = let {
      bsdf temporary0 = df::diffuse_reflection_bsdf(
        tint : tint
      );
    } in material(
      geometry : material_geometry(
        normal : float3(0.0f, 0.0f, 1.0f)
      ),
      surface : material_surface(
        scattering : temporary0
      )
    );
    "#);
}

#[test]
fn empty_material_has_empty_lists() {
    let mut events = material("::pkg::a", vec![]);
    events.extend(material("::pkg::b", vec![]));
    insta::assert_snapshot!(dsl(&events), @r"
    mdl 1.2;

    export material a()
    = material();

    export material b()
    = material();
    ");
}

#[test]
fn material_annotations_follow_parameter_list() {
    let events = material(
        "::pkg::mat",
        vec![
            Event::AnnotationBegin {
                name: "::anno::hidden()".into(),
                args: vec![],
            },
            Event::AnnotationEnd,
            Event::AnnotationBegin {
                name: "::anno::author(string)".into(),
                args: crate::test_utils::args(&[("string", "name")]),
            },
            Event::ArgumentBegin { index: 0 },
            Event::ValueString {
                value: r#"A "quoted" \ name"#.into(),
            },
            Event::ArgumentEnd,
            Event::AnnotationEnd,
        ],
    );
    insta::assert_snapshot!(dsl(&events), @r#"
    mdl 1.2;

    import anno::author;
    import anno::hidden;

    export material mat()
    [[
      anno::hidden(),
      anno::author(
        name : "A \"quoted\" \\ name"
      )
    ]]
    = material();
    "#);
}

#[test]
fn config_controls_header_and_layout() {
    let events = material(
        "::pkg::mat",
        vec![
            Event::FieldBegin {
                name: "ior".into(),
            },
            call("float", "::math::max(float,float)", &[("float", "a"), ("float", "b")]),
            Event::ArgumentBegin { index: 0 },
            float(1.0),
            Event::ArgumentEnd,
            Event::ArgumentBegin { index: 1 },
            float(2.0),
            Event::ArgumentEnd,
            Event::CallEnd,
            Event::FieldEnd,
        ],
    );
    let file = build_file("pkg.mdl", &events).unwrap();
    let config = Config::new()
        .language_version("1.3")
        .wildcard_threshold(1)
        .indent("    ");
    insta::assert_snapshot!(emit_dsl(&file, &config).unwrap(), @r"
    mdl 1.3;

    import math::*;

    export material mat()
    = material(
        ior : math::max(
            a : 1.0f,
            b : 2.0f
        )
    );
    ");
}

#[test]
fn format_error_names_material() {
    let mut mat = Material::new("broken", ContentHash::default());
    mat.fields
        .insert("ior".into(), Expression::Constant(Value::Float(f32::NAN)));
    let file = MaterialFile {
        materials: vec![mat],
        ..MaterialFile::default()
    };
    let err = emit_dsl(&file, &Config::default()).unwrap_err();
    assert!(matches!(
        &err,
        FormatError::Material { material, source }
            if material == "broken" && matches!(**source, FormatError::NonFiniteFloat(_))
    ));
    assert_eq!(err.to_string(), "material `broken`: float `NaN` has no literal form");
}

#[test]
fn json_rejects_non_finite_floats() {
    let mut mat = Material::new("broken", ContentHash::default());
    mat.temporaries
        .push(Expression::Constant(Value::Vector(vec![0.0, f32::INFINITY])));
    let file = MaterialFile {
        materials: vec![mat],
        ..MaterialFile::default()
    };
    let err = emit_json(&file).unwrap_err();
    assert!(matches!(
        &err,
        FormatError::Material { material, source }
            if material == "broken" && matches!(**source, FormatError::NonFiniteFloat(_))
    ));
    assert!(emit_dsl(&file, &Config::default()).is_err());
}

#[test]
fn json_form_is_the_whole_tree() {
    let file = build_file("pkg.mdl", &plastic_events()).unwrap();
    let json = emit_json(&file).unwrap();
    let back: MaterialFile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, file);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["module"], "pkg");
    assert_eq!(value["materials"][0]["name"], "plastic");
    assert_eq!(value["imports"]["tex"][0], "gamma_mode");
}
