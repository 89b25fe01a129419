//! Recorded form of the event protocol.

use mdlfmt_core::{ContentHash, GammaMode};

use super::{ArgumentDecl, EventSink};
use crate::build::BuildResult;

/// How an event affects nesting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nesting {
    Open,
    Close,
    Leaf,
}

/// One protocol event. Serialized as a JSON object tagged by `"event"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    FileBegin {
        name: String,
    },
    FileEnd,
    MaterialBegin {
        name: String,
        #[serde(default)]
        hash: ContentHash,
    },
    MaterialEnd,
    ParameterBegin {
        index: u32,
        #[serde(default)]
        modifier: String,
        #[serde(rename = "type")]
        type_name: String,
        name: String,
    },
    ParameterEnd,
    AnnotationBegin {
        name: String,
        #[serde(default)]
        args: Vec<ArgumentDecl>,
    },
    AnnotationEnd,
    FieldBegin {
        name: String,
    },
    FieldEnd,
    TemporaryBegin {
        index: u32,
    },
    TemporaryEnd,
    CallBegin {
        #[serde(rename = "type")]
        type_name: String,
        name: String,
        #[serde(default)]
        args: Vec<ArgumentDecl>,
    },
    CallEnd,
    ArgumentBegin {
        index: usize,
    },
    ArgumentEnd,
    ArrayBegin {
        #[serde(rename = "type")]
        element_type: String,
        size: usize,
    },
    ArrayEnd,
    ArrayElementBegin {
        index: usize,
    },
    ArrayElementEnd,
    VectorBegin {
        #[serde(rename = "type")]
        type_name: String,
    },
    VectorEnd,
    VectorElementBegin {
        index: usize,
    },
    VectorElementEnd,
    MatrixBegin {
        #[serde(rename = "type")]
        type_name: String,
    },
    MatrixEnd,
    MatrixElementBegin {
        index: usize,
    },
    MatrixElementEnd,
    StructureBegin {
        name: String,
    },
    StructureEnd,
    StructureMemberBegin {
        index: usize,
    },
    StructureMemberEnd,
    StructureTypeBegin {
        name: String,
    },
    StructureTypeElement {
        #[serde(rename = "type")]
        type_name: String,
        name: String,
    },
    StructureTypeEnd,
    EnumTypeBegin {
        name: String,
        size: usize,
    },
    EnumTypeValue {
        name: String,
        value: i32,
    },
    EnumTypeEnd,
    ReferenceParameter {
        index: u32,
    },
    ReferenceTemporary {
        index: u32,
    },
    DefaultRef {
        #[serde(rename = "type")]
        type_name: String,
    },
    ValueBool {
        value: bool,
    },
    ValueInt {
        value: i32,
    },
    ValueFloat {
        value: f32,
    },
    ValueString {
        value: String,
    },
    ValueColor {
        value: [f32; 3],
    },
    ValueEnum {
        #[serde(rename = "type")]
        type_name: String,
        value: i32,
        name: String,
    },
    ValueTexture {
        path: String,
        #[serde(default)]
        gamma: GammaMode,
    },
    ValueBsdfMeasurement {
        path: String,
    },
    ValueLightProfile {
        path: String,
    },
}

impl Event {
    pub fn nesting(&self) -> Nesting {
        use Event::*;
        match self {
            FileBegin { .. }
            | MaterialBegin { .. }
            | ParameterBegin { .. }
            | AnnotationBegin { .. }
            | FieldBegin { .. }
            | TemporaryBegin { .. }
            | CallBegin { .. }
            | ArgumentBegin { .. }
            | ArrayBegin { .. }
            | ArrayElementBegin { .. }
            | VectorBegin { .. }
            | VectorElementBegin { .. }
            | MatrixBegin { .. }
            | MatrixElementBegin { .. }
            | StructureBegin { .. }
            | StructureMemberBegin { .. }
            | StructureTypeBegin { .. }
            | EnumTypeBegin { .. } => Nesting::Open,

            FileEnd | MaterialEnd | ParameterEnd | AnnotationEnd | FieldEnd | TemporaryEnd
            | CallEnd | ArgumentEnd | ArrayEnd | ArrayElementEnd | VectorEnd
            | VectorElementEnd | MatrixEnd | MatrixElementEnd | StructureEnd
            | StructureMemberEnd | StructureTypeEnd | EnumTypeEnd => Nesting::Close,

            StructureTypeElement { .. }
            | EnumTypeValue { .. }
            | ReferenceParameter { .. }
            | ReferenceTemporary { .. }
            | DefaultRef { .. }
            | ValueBool { .. }
            | ValueInt { .. }
            | ValueFloat { .. }
            | ValueString { .. }
            | ValueColor { .. }
            | ValueEnum { .. }
            | ValueTexture { .. }
            | ValueBsdfMeasurement { .. }
            | ValueLightProfile { .. } => Nesting::Leaf,
        }
    }

    /// Deliver this event to `sink`. Returns the descend flag, which is `true`
    /// for everything but a refused begin-event.
    pub fn apply<S: EventSink + ?Sized>(&self, sink: &mut S) -> BuildResult<bool> {
        use Event::*;
        match self {
            FileBegin { name } => sink.file_begin(name),
            FileEnd => sink.file_end().map(|()| true),
            MaterialBegin { name, hash } => sink.material_begin(name, *hash),
            MaterialEnd => sink.material_end().map(|()| true),
            ParameterBegin {
                index,
                modifier,
                type_name,
                name,
            } => sink.parameter_begin(*index, modifier, type_name, name),
            ParameterEnd => sink.parameter_end().map(|()| true),
            AnnotationBegin { name, args } => sink.annotation_begin(name, args),
            AnnotationEnd => sink.annotation_end().map(|()| true),
            FieldBegin { name } => sink.field_begin(name),
            FieldEnd => sink.field_end().map(|()| true),
            TemporaryBegin { index } => sink.temporary_begin(*index),
            TemporaryEnd => sink.temporary_end().map(|()| true),
            CallBegin {
                type_name,
                name,
                args,
            } => sink.call_begin(type_name, name, args),
            CallEnd => sink.call_end().map(|()| true),
            ArgumentBegin { index } => sink.argument_begin(*index),
            ArgumentEnd => sink.argument_end().map(|()| true),
            ArrayBegin { element_type, size } => sink.array_begin(element_type, *size),
            ArrayEnd => sink.array_end().map(|()| true),
            ArrayElementBegin { index } => sink.array_element_begin(*index),
            ArrayElementEnd => sink.array_element_end().map(|()| true),
            VectorBegin { type_name } => sink.vector_begin(type_name),
            VectorEnd => sink.vector_end().map(|()| true),
            VectorElementBegin { index } => sink.vector_element_begin(*index),
            VectorElementEnd => sink.vector_element_end().map(|()| true),
            MatrixBegin { type_name } => sink.matrix_begin(type_name),
            MatrixEnd => sink.matrix_end().map(|()| true),
            MatrixElementBegin { index } => sink.matrix_element_begin(*index),
            MatrixElementEnd => sink.matrix_element_end().map(|()| true),
            StructureBegin { name } => sink.structure_begin(name),
            StructureEnd => sink.structure_end().map(|()| true),
            StructureMemberBegin { index } => sink.structure_member_begin(*index),
            StructureMemberEnd => sink.structure_member_end().map(|()| true),
            StructureTypeBegin { name } => sink.structure_type_begin(name),
            StructureTypeElement { type_name, name } => sink
                .structure_type_element(type_name, name)
                .map(|()| true),
            StructureTypeEnd => sink.structure_type_end().map(|()| true),
            EnumTypeBegin { name, size } => sink.enum_type_begin(name, *size),
            EnumTypeValue { name, value } => sink.enum_type_value(name, *value).map(|()| true),
            EnumTypeEnd => sink.enum_type_end().map(|()| true),
            ReferenceParameter { index } => sink.reference_parameter(*index).map(|()| true),
            ReferenceTemporary { index } => sink.reference_temporary(*index).map(|()| true),
            DefaultRef { type_name } => sink.default_ref(type_name).map(|()| true),
            ValueBool { value } => sink.value_bool(*value).map(|()| true),
            ValueInt { value } => sink.value_int(*value).map(|()| true),
            ValueFloat { value } => sink.value_float(*value).map(|()| true),
            ValueString { value } => sink.value_string(value).map(|()| true),
            ValueColor { value } => sink.value_color(*value).map(|()| true),
            ValueEnum {
                type_name,
                value,
                name,
            } => sink.value_enum(type_name, *value, name).map(|()| true),
            ValueTexture { path, gamma } => sink.value_texture(path, *gamma).map(|()| true),
            ValueBsdfMeasurement { path } => sink.value_bsdf_measurement(path).map(|()| true),
            ValueLightProfile { path } => sink.value_light_profile(path).map(|()| true),
        }
    }
}
