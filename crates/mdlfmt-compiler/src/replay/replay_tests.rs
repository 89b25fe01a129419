use mdlfmt_core::{Expression, MaterialFile, TextureValue, Value};

use super::replay_file;
use crate::build::{BuildResult, Builder};
use crate::events::{Event, Recorder};
use crate::test_utils::{Refusing, args, build_file, float, material, plastic_events};

fn layered_events() -> Vec<Event> {
    let mut events = vec![
        Event::StructureTypeBegin {
            name: "::pkg::layer".into(),
        },
        Event::StructureTypeElement {
            type_name: "float".into(),
            name: "weight".into(),
        },
        Event::StructureTypeElement {
            type_name: "texture_2d".into(),
            name: "map".into(),
        },
        Event::StructureTypeEnd,
    ];
    events.extend(material(
        "::pkg::layered",
        vec![
            Event::FieldBegin {
                name: "layers".into(),
            },
            Event::ArrayBegin {
                element_type: "::pkg::layer".into(),
                size: 1,
            },
            Event::ArrayElementBegin { index: 0 },
            Event::StructureBegin {
                name: "::pkg::layer".into(),
            },
            Event::StructureMemberBegin { index: 0 },
            float(0.5),
            Event::StructureMemberEnd,
            Event::StructureMemberBegin { index: 1 },
            Event::DefaultRef {
                type_name: "texture_2d".into(),
            },
            Event::StructureMemberEnd,
            Event::StructureEnd,
            Event::ArrayElementEnd,
            Event::ArrayEnd,
            Event::FieldEnd,
            Event::FieldBegin {
                name: "transform".into(),
            },
            Event::MatrixBegin {
                type_name: "float2x2".into(),
            },
            Event::MatrixElementBegin { index: 0 },
            Event::VectorBegin {
                type_name: "float2".into(),
            },
            Event::VectorElementBegin { index: 0 },
            float(1.0),
            Event::VectorElementEnd,
            Event::VectorElementBegin { index: 1 },
            float(0.0),
            Event::VectorElementEnd,
            Event::VectorEnd,
            Event::MatrixElementEnd,
            Event::MatrixElementBegin { index: 1 },
            Event::VectorBegin {
                type_name: "float2".into(),
            },
            Event::VectorElementBegin { index: 0 },
            float(0.0),
            Event::VectorElementEnd,
            Event::VectorElementBegin { index: 1 },
            float(1.0),
            Event::VectorElementEnd,
            Event::VectorEnd,
            Event::MatrixElementEnd,
            Event::MatrixEnd,
            Event::FieldEnd,
        ],
    ));
    events
}

fn rebuild(file: &MaterialFile) -> BuildResult<MaterialFile> {
    let mut builder = Builder::default();
    replay_file(file, &mut builder)?;
    Ok(builder.take_file())
}

#[test]
fn plastic_round_trips() {
    let file = build_file("pkg.mdl", &plastic_events()).unwrap();
    assert_eq!(rebuild(&file).unwrap(), file);
}

#[test]
fn structures_and_matrices_round_trip() {
    let file = build_file("pkg.mdl", &layered_events()).unwrap();
    let rebuilt = rebuild(&file).unwrap();
    assert_eq!(rebuilt, file);

    let Some(Expression::Array(layers)) = rebuilt.materials[0].fields.get("layers") else {
        panic!("layers is not an array");
    };
    let Expression::Call(layer) = &layers.elements[0] else {
        panic!("layer is not a call");
    };
    assert_eq!(
        layer.argument(1),
        Some(&Expression::Constant(Value::Texture(TextureValue::default())))
    );
}

#[test]
fn unset_texture_replays_as_default() {
    let file = build_file("pkg.mdl", &layered_events()).unwrap();
    let mut recorder = Recorder::new();
    replay_file(&file, &mut recorder).unwrap();

    let events = recorder.into_events();
    assert!(events.contains(&Event::DefaultRef {
        type_name: "texture_2d".into(),
    }));
    assert!(!events.iter().any(|e| matches!(e, Event::ValueTexture { .. })));
}

#[test]
fn events_are_requalified() {
    let file = build_file("pkg.mdl", &plastic_events()).unwrap();
    let mut recorder = Recorder::new();
    replay_file(&file, &mut recorder).unwrap();
    let events = recorder.into_events();

    assert_eq!(
        events[0],
        Event::FileBegin {
            name: "pkg.mdl".into(),
        }
    );
    assert_eq!(events.last(), Some(&Event::FileEnd));
    assert!(events.contains(&Event::MaterialBegin {
        name: "::pkg::plastic".into(),
        hash: Default::default(),
    }));
    assert!(events.contains(&Event::AnnotationBegin {
        name: "::anno::display_name".into(),
        args: args(&[("string", "name")]),
    }));
}

#[test]
fn refused_bodies_are_skipped() {
    let file = build_file("pkg.mdl", &layered_events()).unwrap();
    let mut sink = Refusing::default();
    replay_file(&file, &mut sink).unwrap();

    let events = sink.inner.into_events();
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, Event::StructureTypeElement { .. } | Event::StructureTypeEnd))
    );
    assert!(events.contains(&Event::StructureBegin {
        name: "::pkg::layer".into(),
    }));
}

#[test]
fn file_without_module() {
    let file = build_file("", &material("plain", vec![])).unwrap();
    assert_eq!(file.module, None);

    let mut recorder = Recorder::new();
    replay_file(&file, &mut recorder).unwrap();
    assert_eq!(
        recorder.into_events(),
        vec![
            Event::FileBegin { name: "".into() },
            Event::MaterialBegin {
                name: "plain".into(),
                hash: Default::default(),
            },
            Event::MaterialEnd,
            Event::FileEnd,
        ]
    );
}
