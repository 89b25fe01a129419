use mdlfmt_core::{ContentHash, GammaMode, Value};

use super::Builder;
use super::error::{BuildError, BuildResult};
use crate::events::{ArgumentDecl, EventSink};

impl EventSink for Builder {
    /// Starts a new file. Drops leftovers of the previous one, including a
    /// poisoned state.
    fn file_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.clear();
        self.guarded(|b| b.on_file_begin(name))
    }

    fn file_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_file_end)
    }

    fn material_begin(&mut self, name: &str, hash: ContentHash) -> BuildResult<bool> {
        self.guarded(|b| b.on_material_begin(name, hash))
    }

    fn material_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_material_end)
    }

    fn parameter_begin(
        &mut self,
        index: u32,
        modifier: &str,
        type_name: &str,
        name: &str,
    ) -> BuildResult<bool> {
        self.guarded(|b| b.on_parameter_begin(index, modifier, type_name, name))
    }

    fn parameter_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_parameter_end)
    }

    fn annotation_begin(&mut self, name: &str, args: &[ArgumentDecl]) -> BuildResult<bool> {
        self.guarded(|b| b.on_annotation_begin(name, args))
    }

    fn annotation_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_annotation_end)
    }

    fn field_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.guarded(|b| b.on_field_begin(name))
    }

    fn field_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_field_end)
    }

    fn temporary_begin(&mut self, index: u32) -> BuildResult<bool> {
        self.guarded(|b| b.on_temporary_begin(index))
    }

    fn temporary_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_temporary_end)
    }

    fn call_begin(
        &mut self,
        type_name: &str,
        name: &str,
        args: &[ArgumentDecl],
    ) -> BuildResult<bool> {
        self.guarded(|b| b.on_call_begin(type_name, name, args))
    }

    fn call_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_call_end)
    }

    fn argument_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.guarded(|b| b.on_argument_begin(index))
    }

    fn argument_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_argument_end)
    }

    fn array_begin(&mut self, element_type: &str, size: usize) -> BuildResult<bool> {
        self.guarded(|b| b.on_array_begin(element_type, size))
    }

    fn array_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_array_end)
    }

    fn array_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.guarded(|b| b.on_array_element_begin(index))
    }

    fn array_element_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_array_element_end)
    }

    fn vector_begin(&mut self, type_name: &str) -> BuildResult<bool> {
        self.guarded(|b| b.on_vector_begin(type_name))
    }

    fn vector_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_vector_end)
    }

    fn vector_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.guarded(|b| b.on_vector_element_begin(index))
    }

    fn vector_element_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_vector_element_end)
    }

    fn matrix_begin(&mut self, type_name: &str) -> BuildResult<bool> {
        self.guarded(|b| b.on_matrix_begin(type_name))
    }

    fn matrix_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_matrix_end)
    }

    fn matrix_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.guarded(|b| b.on_matrix_element_begin(index))
    }

    fn matrix_element_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_matrix_element_end)
    }

    fn structure_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.guarded(|b| b.on_structure_begin(name))
    }

    fn structure_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_structure_end)
    }

    fn structure_member_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.guarded(|b| b.on_structure_member_begin(index))
    }

    fn structure_member_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_structure_member_end)
    }

    fn structure_type_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.guarded(|b| b.on_structure_type_begin(name))
    }

    fn structure_type_element(&mut self, type_name: &str, name: &str) -> BuildResult<()> {
        self.guarded(|b| b.on_structure_type_element(type_name, name))
    }

    fn structure_type_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_structure_type_end)
    }

    fn enum_type_begin(&mut self, name: &str, size: usize) -> BuildResult<bool> {
        self.guarded(|b| b.on_enum_type_begin(name, size))
    }

    fn enum_type_value(&mut self, name: &str, value: i32) -> BuildResult<()> {
        self.guarded(|b| b.on_enum_type_value(name, value))
    }

    fn enum_type_end(&mut self) -> BuildResult<()> {
        self.guarded(Self::on_enum_type_end)
    }

    fn reference_parameter(&mut self, index: u32) -> BuildResult<()> {
        self.guarded(|b| b.on_reference_parameter(index))
    }

    fn reference_temporary(&mut self, index: u32) -> BuildResult<()> {
        self.guarded(|b| b.on_reference_temporary(index))
    }

    fn default_ref(&mut self, type_name: &str) -> BuildResult<()> {
        self.guarded(|b| b.on_default_ref(type_name))
    }

    fn value_bool(&mut self, value: bool) -> BuildResult<()> {
        self.guarded(|b| b.on_value("value_bool", Value::Bool(value)))
    }

    fn value_int(&mut self, value: i32) -> BuildResult<()> {
        self.guarded(|b| b.on_value("value_int", Value::Int(value)))
    }

    fn value_float(&mut self, value: f32) -> BuildResult<()> {
        self.guarded(|b| b.on_value("value_float", Value::Float(value)))
    }

    fn value_string(&mut self, value: &str) -> BuildResult<()> {
        self.guarded(|b| b.on_value("value_string", Value::String(value.to_string())))
    }

    fn value_color(&mut self, rgb: [f32; 3]) -> BuildResult<()> {
        self.guarded(|b| b.on_value("value_color", Value::Color(rgb)))
    }

    fn value_enum(&mut self, type_name: &str, value: i32, name: &str) -> BuildResult<()> {
        self.guarded(|b| b.on_value_enum(type_name, value, name))
    }

    fn value_texture(&mut self, path: &str, gamma: GammaMode) -> BuildResult<()> {
        self.guarded(|b| b.on_value_texture(path, gamma))
    }

    /// Measured BSDF data has no representation in the tree.
    fn value_bsdf_measurement(&mut self, path: &str) -> BuildResult<()> {
        self.guarded(|_| Err(BuildError::Unsupported(format!("measured BSDF (`{path}`)"))))
    }

    /// Light profiles have no representation in the tree.
    fn value_light_profile(&mut self, path: &str) -> BuildResult<()> {
        self.guarded(|_| Err(BuildError::Unsupported(format!("light profile (`{path}`)"))))
    }
}
