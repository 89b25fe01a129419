//! Test utilities.

use mdlfmt_core::{ContentHash, GammaMode, MaterialFile};

use crate::build::{BuildConfig, BuildResult, Builder};
use crate::events::{ArgumentDecl, Event, EventSink, Recorder, drive};

/// Argument declarations from `(type, name)` pairs.
pub fn args(decls: &[(&str, &str)]) -> Vec<ArgumentDecl> {
    decls
        .iter()
        .map(|(ty, name)| ArgumentDecl::new(*ty, *name))
        .collect()
}

/// Builder with a file already open.
pub fn open_file(name: &str) -> Builder {
    open_file_with(BuildConfig::default(), name)
}

pub fn open_file_with(config: BuildConfig, name: &str) -> Builder {
    let mut builder = Builder::new(config);
    assert!(builder.file_begin(name).unwrap());
    builder
}

/// Builder with `pkg.mdl` and material `::pkg::mat` open.
pub fn open_material() -> Builder {
    let mut builder = open_file("pkg.mdl");
    assert!(
        builder
            .material_begin("::pkg::mat", ContentHash::default())
            .unwrap()
    );
    builder
}

/// Feed `events` into a fresh builder between `file_begin` and `file_end`.
pub fn build_file(name: &str, events: &[Event]) -> BuildResult<MaterialFile> {
    build_file_with(BuildConfig::default(), name, events)
}

pub fn build_file_with(
    config: BuildConfig,
    name: &str,
    events: &[Event],
) -> BuildResult<MaterialFile> {
    let mut builder = Builder::new(config);
    builder.file_begin(name)?;
    drive(events, &mut builder)?;
    builder.file_end()?;
    Ok(builder.take_file())
}

pub fn float(value: f32) -> Event {
    Event::ValueFloat { value }
}

pub fn call(ty: &str, name: &str, decls: &[(&str, &str)]) -> Event {
    Event::CallBegin {
        type_name: ty.into(),
        name: name.into(),
        args: args(decls),
    }
}

/// `material_begin`, then `body`, then `material_end`.
pub fn material(name: &str, body: Vec<Event>) -> Vec<Event> {
    let mut events = vec![Event::MaterialBegin {
        name: name.into(),
        hash: ContentHash::default(),
    }];
    events.extend(body);
    events.push(Event::MaterialEnd);
    events
}

/// A material exercising parameters, annotations, temporaries, nested calls,
/// arrays, vectors, enums and textures.
pub fn plastic_events() -> Vec<Event> {
    let mut events = vec![
        Event::EnumTypeBegin {
            name: "::pkg::finish".into(),
            size: 2,
        },
        Event::EnumTypeValue {
            name: "matte".into(),
            value: 0,
        },
        Event::EnumTypeValue {
            name: "glossy".into(),
            value: 1,
        },
        Event::EnumTypeEnd,
    ];
    events.extend(material(
        "::pkg::plastic",
        vec![
            Event::ParameterBegin {
                index: 0,
                modifier: "uniform".into(),
                type_name: "color".into(),
                name: "tint".into(),
            },
            Event::ValueColor {
                value: [0.8, 0.1, 0.1],
            },
            Event::AnnotationBegin {
                name: "::anno::display_name(string)".into(),
                args: args(&[("string", "name")]),
            },
            Event::ArgumentBegin { index: 0 },
            Event::ValueString {
                value: "Tint".into(),
            },
            Event::ArgumentEnd,
            Event::AnnotationEnd,
            Event::ParameterEnd,
            Event::ParameterBegin {
                index: 1,
                modifier: String::new(),
                type_name: "::pkg::finish".into(),
                name: "finish".into(),
            },
            Event::ValueEnum {
                type_name: "::pkg::finish".into(),
                value: 1,
                name: "glossy".into(),
            },
            Event::ParameterEnd,
            Event::ParameterBegin {
                index: 2,
                modifier: String::new(),
                type_name: "texture_2d".into(),
                name: "map".into(),
            },
            Event::ValueTexture {
                path: "/assets/wood.png".into(),
                gamma: GammaMode::Srgb,
            },
            Event::ParameterEnd,
            Event::TemporaryBegin { index: 0 },
            call(
                "bsdf",
                "::df::diffuse_reflection_bsdf(color)",
                &[("color", "tint")],
            ),
            Event::ArgumentBegin { index: 0 },
            Event::ReferenceParameter { index: 0 },
            Event::ArgumentEnd,
            Event::CallEnd,
            Event::TemporaryEnd,
            Event::FieldBegin {
                name: "surface".into(),
            },
            call(
                "material_surface",
                "material_surface(bsdf)",
                &[("bsdf", "scattering")],
            ),
            Event::ArgumentBegin { index: 0 },
            Event::ReferenceTemporary { index: 0 },
            Event::ArgumentEnd,
            Event::CallEnd,
            Event::FieldEnd,
            Event::FieldBegin {
                name: "geometry".into(),
            },
            call(
                "material_geometry",
                "material_geometry(float3)",
                &[("float3", "normal")],
            ),
            Event::ArgumentBegin { index: 0 },
            Event::VectorBegin {
                type_name: "float3".into(),
            },
            Event::VectorElementBegin { index: 0 },
            float(0.0),
            Event::VectorElementEnd,
            Event::VectorElementBegin { index: 1 },
            float(0.0),
            Event::VectorElementEnd,
            Event::VectorElementBegin { index: 2 },
            float(1.0),
            Event::VectorElementEnd,
            Event::VectorEnd,
            Event::ArgumentEnd,
            Event::CallEnd,
            Event::FieldEnd,
        ],
    ));
    events
}

/// Refuses every structure registration, records the rest.
#[derive(Default)]
pub struct Refusing {
    pub inner: Recorder,
}

macro_rules! forward {
    ($($name:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
        $(fn $name(&mut self, $($arg: $ty),*) -> $ret {
            self.inner.$name($($arg),*)
        })*
    };
}

impl EventSink for Refusing {
    fn structure_type_begin(&mut self, _name: &str) -> BuildResult<bool> {
        Ok(false)
    }

    forward! {
        file_begin(name: &str) -> BuildResult<bool>;
        file_end() -> BuildResult<()>;
        material_begin(name: &str, hash: ContentHash) -> BuildResult<bool>;
        material_end() -> BuildResult<()>;
        parameter_begin(index: u32, modifier: &str, type_name: &str, name: &str) -> BuildResult<bool>;
        parameter_end() -> BuildResult<()>;
        annotation_begin(name: &str, args: &[ArgumentDecl]) -> BuildResult<bool>;
        annotation_end() -> BuildResult<()>;
        field_begin(name: &str) -> BuildResult<bool>;
        field_end() -> BuildResult<()>;
        temporary_begin(index: u32) -> BuildResult<bool>;
        temporary_end() -> BuildResult<()>;
        call_begin(type_name: &str, name: &str, args: &[ArgumentDecl]) -> BuildResult<bool>;
        call_end() -> BuildResult<()>;
        argument_begin(index: usize) -> BuildResult<bool>;
        argument_end() -> BuildResult<()>;
        array_begin(element_type: &str, size: usize) -> BuildResult<bool>;
        array_end() -> BuildResult<()>;
        array_element_begin(index: usize) -> BuildResult<bool>;
        array_element_end() -> BuildResult<()>;
        vector_begin(type_name: &str) -> BuildResult<bool>;
        vector_end() -> BuildResult<()>;
        vector_element_begin(index: usize) -> BuildResult<bool>;
        vector_element_end() -> BuildResult<()>;
        matrix_begin(type_name: &str) -> BuildResult<bool>;
        matrix_end() -> BuildResult<()>;
        matrix_element_begin(index: usize) -> BuildResult<bool>;
        matrix_element_end() -> BuildResult<()>;
        structure_begin(name: &str) -> BuildResult<bool>;
        structure_end() -> BuildResult<()>;
        structure_member_begin(index: usize) -> BuildResult<bool>;
        structure_member_end() -> BuildResult<()>;
        structure_type_element(type_name: &str, name: &str) -> BuildResult<()>;
        structure_type_end() -> BuildResult<()>;
        enum_type_begin(name: &str, size: usize) -> BuildResult<bool>;
        enum_type_value(name: &str, value: i32) -> BuildResult<()>;
        enum_type_end() -> BuildResult<()>;
        reference_parameter(index: u32) -> BuildResult<()>;
        reference_temporary(index: u32) -> BuildResult<()>;
        default_ref(type_name: &str) -> BuildResult<()>;
        value_bool(value: bool) -> BuildResult<()>;
        value_int(value: i32) -> BuildResult<()>;
        value_float(value: f32) -> BuildResult<()>;
        value_string(value: &str) -> BuildResult<()>;
        value_color(rgb: [f32; 3]) -> BuildResult<()>;
        value_enum(type_name: &str, value: i32, name: &str) -> BuildResult<()>;
        value_texture(path: &str, gamma: GammaMode) -> BuildResult<()>;
        value_bsdf_measurement(path: &str) -> BuildResult<()>;
        value_light_profile(path: &str) -> BuildResult<()>;
    }
}
