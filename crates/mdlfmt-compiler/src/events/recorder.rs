use mdlfmt_core::{ContentHash, GammaMode};

use super::{ArgumentDecl, Event, EventSink};
use crate::build::BuildResult;

/// Sink that records every event and always descends.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    fn open(&mut self, event: Event) -> BuildResult<bool> {
        self.events.push(event);
        Ok(true)
    }

    fn push(&mut self, event: Event) -> BuildResult<()> {
        self.events.push(event);
        Ok(())
    }
}

impl EventSink for Recorder {
    fn file_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.open(Event::FileBegin { name: name.into() })
    }

    fn file_end(&mut self) -> BuildResult<()> {
        self.push(Event::FileEnd)
    }

    fn material_begin(&mut self, name: &str, hash: ContentHash) -> BuildResult<bool> {
        self.open(Event::MaterialBegin {
            name: name.into(),
            hash,
        })
    }

    fn material_end(&mut self) -> BuildResult<()> {
        self.push(Event::MaterialEnd)
    }

    fn parameter_begin(
        &mut self,
        index: u32,
        modifier: &str,
        type_name: &str,
        name: &str,
    ) -> BuildResult<bool> {
        self.open(Event::ParameterBegin {
            index,
            modifier: modifier.into(),
            type_name: type_name.into(),
            name: name.into(),
        })
    }

    fn parameter_end(&mut self) -> BuildResult<()> {
        self.push(Event::ParameterEnd)
    }

    fn annotation_begin(&mut self, name: &str, args: &[ArgumentDecl]) -> BuildResult<bool> {
        self.open(Event::AnnotationBegin {
            name: name.into(),
            args: args.to_vec(),
        })
    }

    fn annotation_end(&mut self) -> BuildResult<()> {
        self.push(Event::AnnotationEnd)
    }

    fn field_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.open(Event::FieldBegin { name: name.into() })
    }

    fn field_end(&mut self) -> BuildResult<()> {
        self.push(Event::FieldEnd)
    }

    fn temporary_begin(&mut self, index: u32) -> BuildResult<bool> {
        self.open(Event::TemporaryBegin { index })
    }

    fn temporary_end(&mut self) -> BuildResult<()> {
        self.push(Event::TemporaryEnd)
    }

    fn call_begin(
        &mut self,
        type_name: &str,
        name: &str,
        args: &[ArgumentDecl],
    ) -> BuildResult<bool> {
        self.open(Event::CallBegin {
            type_name: type_name.into(),
            name: name.into(),
            args: args.to_vec(),
        })
    }

    fn call_end(&mut self) -> BuildResult<()> {
        self.push(Event::CallEnd)
    }

    fn argument_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open(Event::ArgumentBegin { index })
    }

    fn argument_end(&mut self) -> BuildResult<()> {
        self.push(Event::ArgumentEnd)
    }

    fn array_begin(&mut self, element_type: &str, size: usize) -> BuildResult<bool> {
        self.open(Event::ArrayBegin {
            element_type: element_type.into(),
            size,
        })
    }

    fn array_end(&mut self) -> BuildResult<()> {
        self.push(Event::ArrayEnd)
    }

    fn array_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open(Event::ArrayElementBegin { index })
    }

    fn array_element_end(&mut self) -> BuildResult<()> {
        self.push(Event::ArrayElementEnd)
    }

    fn vector_begin(&mut self, type_name: &str) -> BuildResult<bool> {
        self.open(Event::VectorBegin {
            type_name: type_name.into(),
        })
    }

    fn vector_end(&mut self) -> BuildResult<()> {
        self.push(Event::VectorEnd)
    }

    fn vector_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open(Event::VectorElementBegin { index })
    }

    fn vector_element_end(&mut self) -> BuildResult<()> {
        self.push(Event::VectorElementEnd)
    }

    fn matrix_begin(&mut self, type_name: &str) -> BuildResult<bool> {
        self.open(Event::MatrixBegin {
            type_name: type_name.into(),
        })
    }

    fn matrix_end(&mut self) -> BuildResult<()> {
        self.push(Event::MatrixEnd)
    }

    fn matrix_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open(Event::MatrixElementBegin { index })
    }

    fn matrix_element_end(&mut self) -> BuildResult<()> {
        self.push(Event::MatrixElementEnd)
    }

    fn structure_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.open(Event::StructureBegin { name: name.into() })
    }

    fn structure_end(&mut self) -> BuildResult<()> {
        self.push(Event::StructureEnd)
    }

    fn structure_member_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open(Event::StructureMemberBegin { index })
    }

    fn structure_member_end(&mut self) -> BuildResult<()> {
        self.push(Event::StructureMemberEnd)
    }

    fn structure_type_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.open(Event::StructureTypeBegin { name: name.into() })
    }

    fn structure_type_element(&mut self, type_name: &str, name: &str) -> BuildResult<()> {
        self.push(Event::StructureTypeElement {
            type_name: type_name.into(),
            name: name.into(),
        })
    }

    fn structure_type_end(&mut self) -> BuildResult<()> {
        self.push(Event::StructureTypeEnd)
    }

    fn enum_type_begin(&mut self, name: &str, size: usize) -> BuildResult<bool> {
        self.open(Event::EnumTypeBegin {
            name: name.into(),
            size,
        })
    }

    fn enum_type_value(&mut self, name: &str, value: i32) -> BuildResult<()> {
        self.push(Event::EnumTypeValue {
            name: name.into(),
            value,
        })
    }

    fn enum_type_end(&mut self) -> BuildResult<()> {
        self.push(Event::EnumTypeEnd)
    }

    fn reference_parameter(&mut self, index: u32) -> BuildResult<()> {
        self.push(Event::ReferenceParameter { index })
    }

    fn reference_temporary(&mut self, index: u32) -> BuildResult<()> {
        self.push(Event::ReferenceTemporary { index })
    }

    fn default_ref(&mut self, type_name: &str) -> BuildResult<()> {
        self.push(Event::DefaultRef {
            type_name: type_name.into(),
        })
    }

    fn value_bool(&mut self, value: bool) -> BuildResult<()> {
        self.push(Event::ValueBool { value })
    }

    fn value_int(&mut self, value: i32) -> BuildResult<()> {
        self.push(Event::ValueInt { value })
    }

    fn value_float(&mut self, value: f32) -> BuildResult<()> {
        self.push(Event::ValueFloat { value })
    }

    fn value_string(&mut self, value: &str) -> BuildResult<()> {
        self.push(Event::ValueString {
            value: value.into(),
        })
    }

    fn value_color(&mut self, rgb: [f32; 3]) -> BuildResult<()> {
        self.push(Event::ValueColor { value: rgb })
    }

    fn value_enum(&mut self, type_name: &str, value: i32, name: &str) -> BuildResult<()> {
        self.push(Event::ValueEnum {
            type_name: type_name.into(),
            value,
            name: name.into(),
        })
    }

    fn value_texture(&mut self, path: &str, gamma: GammaMode) -> BuildResult<()> {
        self.push(Event::ValueTexture {
            path: path.into(),
            gamma,
        })
    }

    fn value_bsdf_measurement(&mut self, path: &str) -> BuildResult<()> {
        self.push(Event::ValueBsdfMeasurement { path: path.into() })
    }

    fn value_light_profile(&mut self, path: &str) -> BuildResult<()> {
        self.push(Event::ValueLightProfile { path: path.into() })
    }
}
