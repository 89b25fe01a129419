//! Replay a completed tree as protocol events.
//!
//! The inverse of the builder: registered types first, then every material
//! with its parameters, annotations, temporaries and fields. Names are
//! re-qualified with the global root so a fresh builder resolves them to the
//! same types and imports.

#[cfg(test)]
mod replay_tests;

use mdlfmt_core::{
    ArrayExpr, Call, EnumType, Expression, GammaMode, Material, MaterialFile, StructureType, Value,
};

use crate::build::{BuildResult, type_key};
use crate::events::{ArgumentDecl, EventSink};

/// Feed `file` into `sink`, from `file_begin` to `file_end`.
pub fn replay_file<S: EventSink + ?Sized>(file: &MaterialFile, sink: &mut S) -> BuildResult<()> {
    Replay { file, sink }.file()
}

fn qualified_call(call: &Call) -> String {
    if call.namespace.is_empty() {
        call.name.clone()
    } else {
        format!("::{}::{}", call.namespace, call.name)
    }
}

fn declarations(call: &Call) -> Vec<ArgumentDecl> {
    call.slots
        .iter()
        .map(|slot| ArgumentDecl::new(slot.ty.to_qualified(), slot.name.clone()))
        .collect()
}

struct Replay<'a, S: ?Sized> {
    file: &'a MaterialFile,
    sink: &'a mut S,
}

impl<S: EventSink + ?Sized> Replay<'_, S> {
    fn file(&mut self) -> BuildResult<()> {
        let file = self.file;
        let name = file
            .module
            .as_deref()
            .map(|module| format!("{module}.mdl"))
            .unwrap_or_default();
        if !self.sink.file_begin(&name)? {
            return Ok(());
        }
        for enum_type in file.enums.values() {
            self.enum_type(enum_type)?;
        }
        for structure in file.structures.values() {
            self.structure_type(structure)?;
        }
        for material in &file.materials {
            self.material(material)?;
        }
        self.sink.file_end()
    }

    fn enum_type(&mut self, enum_type: &EnumType) -> BuildResult<()> {
        let name = enum_type.ty.to_qualified();
        if self.sink.enum_type_begin(&name, enum_type.members.len())? {
            for member in &enum_type.members {
                self.sink.enum_type_value(&member.name, member.value)?;
            }
            self.sink.enum_type_end()?;
        }
        Ok(())
    }

    fn structure_type(&mut self, structure: &StructureType) -> BuildResult<()> {
        let name = structure.ty.to_qualified();
        if self.sink.structure_type_begin(&name)? {
            for member in &structure.members {
                self.sink
                    .structure_type_element(&member.ty.to_qualified(), &member.name)?;
            }
            self.sink.structure_type_end()?;
        }
        Ok(())
    }

    fn material(&mut self, material: &Material) -> BuildResult<()> {
        let name = match &self.file.module {
            Some(module) => format!("::{module}::{}", material.name),
            None => material.name.clone(),
        };
        if !self.sink.material_begin(&name, material.hash)? {
            return Ok(());
        }

        for param in &material.parameters {
            let modifier = param.modifier.as_deref().unwrap_or_default();
            let descend = self.sink.parameter_begin(
                param.index,
                modifier,
                &param.ty.to_qualified(),
                &param.name,
            )?;
            if !descend {
                continue;
            }
            if let Some(default) = &param.default {
                self.expression(default)?;
            }
            for annotation in &param.annotations {
                self.annotation(annotation)?;
            }
            self.sink.parameter_end()?;
        }

        for annotation in &material.annotations {
            self.annotation(annotation)?;
        }

        for (index, temporary) in material.temporaries.iter().enumerate() {
            if self.sink.temporary_begin(index as u32)? {
                self.expression(temporary)?;
                self.sink.temporary_end()?;
            }
        }

        for (field, expr) in &material.fields {
            if self.sink.field_begin(field)? {
                self.expression(expr)?;
                self.sink.field_end()?;
            }
        }

        self.sink.material_end()
    }

    fn annotation(&mut self, call: &Call) -> BuildResult<()> {
        if self
            .sink
            .annotation_begin(&qualified_call(call), &declarations(call))?
        {
            self.arguments(call)?;
            self.sink.annotation_end()?;
        }
        Ok(())
    }

    fn arguments(&mut self, call: &Call) -> BuildResult<()> {
        for (&index, argument) in &call.arguments {
            if self.sink.argument_begin(index)? {
                self.expression(argument)?;
                self.sink.argument_end()?;
            }
        }
        Ok(())
    }

    /// A call that constructs a registered structure.
    fn is_structure_instance(&self, call: &Call) -> bool {
        call.result.namespace == call.namespace
            && call.result.name == call.name
            && self
                .file
                .structures
                .get(&type_key(&call.result.to_qualified()))
                .is_some_and(|structure| structure.members == call.slots)
    }

    fn expression(&mut self, expr: &Expression) -> BuildResult<()> {
        match expr {
            Expression::Constant(value) => self.value(value),
            Expression::Call(call) if self.is_structure_instance(call) => {
                if self.sink.structure_begin(&call.result.to_qualified())? {
                    for (&index, member) in &call.arguments {
                        if self.sink.structure_member_begin(index)? {
                            self.expression(member)?;
                            self.sink.structure_member_end()?;
                        }
                    }
                    self.sink.structure_end()?;
                }
                Ok(())
            }
            Expression::Call(call) => {
                let descend = self.sink.call_begin(
                    &call.result.to_qualified(),
                    &qualified_call(call),
                    &declarations(call),
                )?;
                if descend {
                    self.arguments(call)?;
                    self.sink.call_end()?;
                }
                Ok(())
            }
            Expression::Array(array) => self.array(array),
            Expression::Parameter(index) => self.sink.reference_parameter(*index),
            Expression::Temporary(index) => self.sink.reference_temporary(*index),
        }
    }

    fn array(&mut self, array: &ArrayExpr) -> BuildResult<()> {
        let element = array.element.to_qualified();
        if self.sink.array_begin(&element, array.elements.len())? {
            for (index, item) in array.elements.iter().enumerate() {
                if self.sink.array_element_begin(index)? {
                    self.expression(item)?;
                    self.sink.array_element_end()?;
                }
            }
            self.sink.array_end()?;
        }
        Ok(())
    }

    fn vector(&mut self, components: &[f32]) -> BuildResult<()> {
        if self.sink.vector_begin(&format!("float{}", components.len()))? {
            for (index, &component) in components.iter().enumerate() {
                if self.sink.vector_element_begin(index)? {
                    self.sink.value_float(component)?;
                    self.sink.vector_element_end()?;
                }
            }
            self.sink.vector_end()?;
        }
        Ok(())
    }

    fn value(&mut self, value: &Value) -> BuildResult<()> {
        match value {
            Value::Bool(v) => self.sink.value_bool(*v),
            Value::Int(v) => self.sink.value_int(*v),
            Value::Float(v) => self.sink.value_float(*v),
            Value::String(v) => self.sink.value_string(v),
            Value::Color(rgb) => self.sink.value_color(*rgb),
            Value::Enum(e) => self
                .sink
                .value_enum(&e.ty.to_qualified(), e.ordinal, &e.symbol),
            Value::Texture(t) if t.is_unset() && t.gamma == GammaMode::Default => {
                self.sink.default_ref("texture_2d")
            }
            Value::Texture(t) => self.sink.value_texture(&t.path, t.gamma),
            Value::Vector(components) => self.vector(components),
            Value::Matrix(columns) => {
                let rows = columns.first().map_or(0, Vec::len);
                if self.sink.matrix_begin(&format!("float{}x{rows}", columns.len()))? {
                    for (index, column) in columns.iter().enumerate() {
                        if self.sink.matrix_element_begin(index)? {
                            self.vector(column)?;
                            self.sink.matrix_element_end()?;
                        }
                    }
                    self.sink.matrix_end()?;
                }
                Ok(())
            }
        }
    }
}
