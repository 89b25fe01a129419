use std::collections::BTreeMap;

use crate::{
    Call, ContentHash, Expression, GammaMode, Imports, Material, MaterialFile, Slot, TextureValue,
    TypeRef, Value,
};

fn sample_call() -> Call {
    let mut call = Call::new(
        TypeRef::local("bsdf"),
        "df",
        "diffuse_reflection_bsdf",
        vec![Slot {
            ty: TypeRef::local("color"),
            name: "tint".into(),
        }],
    );
    call.arguments
        .insert(0, Expression::Constant(Value::Color([0.5, 0.5, 0.5])));
    call
}

#[test]
fn call_sugar_classification() {
    let mut call = sample_call();
    assert!(call.is_complete());
    assert!(!call.is_operator());
    assert_eq!(call.source_name(), "df::diffuse_reflection_bsdf");

    call.name = "operator*".into();
    assert!(call.is_operator());

    call.name = "operator[]@".into();
    assert!(call.is_index());

    call.name = "material_surface.scattering".into();
    assert_eq!(call.member(), Some(".scattering"));

    call.name = "float[2]".into();
    assert!(call.is_positional());
}

#[test]
fn type_ref_spellings() {
    let ty = TypeRef::new("base", "texture_return");
    assert_eq!(ty.to_qualified(), "::base::texture_return");
    assert_eq!(ty.to_source(), "base::texture_return");
    assert_eq!(TypeRef::local("float").to_qualified(), "float");
}

#[test]
fn imports_group_by_namespace() {
    let mut imports = Imports::new();
    assert!(imports.insert("df", "b"));
    assert!(imports.insert("df", "a"));
    assert!(!imports.insert("df", "a"));
    imports.insert("base", "x");

    let grouped: Vec<_> = imports
        .iter()
        .map(|(ns, names)| (ns, names.iter().cloned().collect::<Vec<_>>()))
        .collect();
    assert_eq!(
        grouped,
        vec![
            ("base", vec!["x".to_string()]),
            ("df", vec!["a".to_string(), "b".to_string()]),
        ]
    );
}

#[test]
fn content_hash_display() {
    let hash = ContentHash([1, 0xdead_beef, 0, 0xffff_ffff]);
    assert_eq!(hash.to_string(), "00000001deadbeef00000000ffffffff");
}

#[test]
fn material_file_json_round_trip() {
    let mut material = Material::new("glossy", ContentHash([1, 2, 3, 4]));
    material.fields = BTreeMap::from([("surface".to_string(), Expression::Call(sample_call()))]);
    material.temporaries.push(Expression::Constant(Value::Texture(TextureValue {
        path: "a.png".into(),
        gamma: GammaMode::Srgb,
    })));

    let mut file = MaterialFile {
        module: Some("pkg".into()),
        materials: vec![material],
        ..MaterialFile::default()
    };
    file.imports.insert("df", "diffuse_reflection_bsdf");

    let json = serde_json::to_string(&file).unwrap();
    let back: MaterialFile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, file);
}

#[test]
fn gamma_spelling() {
    assert_eq!(GammaMode::Default.as_str(), "gamma_default");
    assert_eq!(GammaMode::Linear.as_str(), "gamma_linear");
    assert_eq!(GammaMode::Srgb.as_str(), "gamma_srgb");
}
