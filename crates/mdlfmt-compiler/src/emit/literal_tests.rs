use mdlfmt_core::{EnumValue, GammaMode, TextureValue, TypeRef, Value};

use super::{Config, FormatError, format_float, format_value};

fn text(value: Value) -> String {
    format_value(&value, &Config::default()).unwrap()
}

#[test]
fn floats_always_have_fraction_and_suffix() {
    assert_eq!(format_float(0.5).unwrap(), "0.5f");
    assert_eq!(format_float(1.0).unwrap(), "1.0f");
    assert_eq!(format_float(-3.0).unwrap(), "-3.0f");
    assert_eq!(format_float(0.1).unwrap(), "0.1f");
    assert_eq!(format_float(1e-7).unwrap(), "0.0000001f");
    assert!(matches!(
        format_float(f32::INFINITY),
        Err(FormatError::NonFiniteFloat(_))
    ));
}

#[test]
fn scalar_literals() {
    assert_eq!(text(Value::Bool(true)), "true");
    assert_eq!(text(Value::Int(-4)), "-4");
    assert_eq!(text(Value::String("a\"b".into())), r#""a\"b""#);
    assert_eq!(text(Value::Color([1.0, 0.5, 0.0])), "color(1.0f, 0.5f, 0.0f)");
}

#[test]
fn vector_and_matrix_literals() {
    assert_eq!(text(Value::Vector(vec![0.0, 1.0])), "float2(0.0f, 1.0f)");
    assert_eq!(
        text(Value::Matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]])),
        "float3x2(float2(1.0f, 0.0f), float2(0.0f, 1.0f), float2(0.5f, 0.5f))"
    );

    let config = Config::default();
    assert!(matches!(
        format_value(&Value::Matrix(vec![]), &config),
        Err(FormatError::EmptyMatrix)
    ));
    assert!(matches!(
        format_value(&Value::Matrix(vec![vec![1.0], vec![]]), &config),
        Err(FormatError::RaggedMatrix)
    ));
}

#[test]
fn enum_literal_is_namespace_qualified() {
    let value = |namespace: &str| {
        Value::Enum(EnumValue {
            ty: TypeRef::new(namespace, "scatter_mode"),
            symbol: "scatter_reflect".into(),
            ordinal: 0,
        })
    };
    assert_eq!(text(value("df")), "df::scatter_reflect");
    assert_eq!(text(value("")), "scatter_reflect");
}

#[test]
fn texture_paths_are_relative_to_media_root() {
    let texture = Value::Texture(TextureValue {
        path: r"C:\dp\media\textures\wood.png".into(),
        gamma: GammaMode::Linear,
    });
    assert_eq!(
        text(texture.clone()),
        r#"texture_2d("C:/dp/media/textures/wood.png", tex::gamma_linear)"#
    );

    let config = Config::new().media_root(Some(r"C:\dp\media".into()));
    assert_eq!(
        format_value(&texture, &config).unwrap(),
        r#"texture_2d("textures/wood.png", tex::gamma_linear)"#
    );
}

#[test]
fn unset_texture_is_default_constructed() {
    assert_eq!(text(Value::Texture(TextureValue::default())), "texture_2d()");
}
