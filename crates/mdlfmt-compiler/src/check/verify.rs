//! Slot verification.
//!
//! `verify_slot` runs on every slot assignment while a tree is built.
//! `verify_material` re-walks a finished material and collects every mismatch
//! with a path to the offending slot.

use mdlfmt_core::resolver::split_array_suffix;
use mdlfmt_core::{Call, Expression, Material, Value};

use super::shape::{Shape, constant_type, matrix_size, vector_size};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("expected `{expected}`, found `{found}`")]
    Mismatch { expected: String, found: String },

    #[error("reference to undeclared parameter {0}")]
    UnknownParameter(u32),

    #[error("reference to undeclared temporary {0}")]
    UnknownTemporary(u32),

    #[error("argument {index} has no declared slot ({len} declared)")]
    SlotOutOfRange { index: usize, len: usize },
}

/// Mismatch found by `verify_material`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {error}")]
pub struct SlotError {
    pub path: String,
    #[source]
    pub error: CheckError,
}

/// Declarations visible to references inside a material.
pub trait Scope {
    fn parameter_type(&self, index: u32) -> Option<&str>;
    fn temporary(&self, index: u32) -> Option<&Expression>;
}

impl Scope for Material {
    fn parameter_type(&self, index: u32) -> Option<&str> {
        self.parameter(index).map(|p| p.ty.name.as_str())
    }

    fn temporary(&self, index: u32) -> Option<&Expression> {
        Material::temporary(self, index)
    }
}

/// Check that `shape` may be placed into a slot declared as `expected`.
///
/// References are resolved through `scope`: a parameter by its declared type,
/// a temporary by re-checking its expression.
pub fn verify_slot(
    expected: &str,
    shape: Shape<'_>,
    scope: &dyn Scope,
) -> Result<(), CheckError> {
    let compatible = match shape {
        Shape::Constant(value) => constant_matches(expected, value),
        Shape::Call { result } => types_match(expected, result),
        Shape::Array { element } => match split_array_suffix(expected) {
            (base, suffix) if !suffix.is_empty() => base == element,
            _ => false,
        },
        Shape::Vector { len } => vector_size(expected) == Some(len),
        Shape::Matrix { columns, rows } => {
            rows.is_some_and(|rows| matrix_size(expected) == Some((columns, rows)))
        }
        Shape::Parameter(index) => {
            let declared = scope
                .parameter_type(index)
                .ok_or(CheckError::UnknownParameter(index))?;
            if !types_match(expected, declared) {
                return Err(CheckError::Mismatch {
                    expected: expected.to_string(),
                    found: declared.to_string(),
                });
            }
            true
        }
        Shape::Temporary(index) => {
            let expr = scope
                .temporary(index)
                .ok_or(CheckError::UnknownTemporary(index))?;
            return verify_slot(expected, Shape::of(expr), scope);
        }
    };

    if compatible {
        Ok(())
    } else {
        Err(CheckError::Mismatch {
            expected: expected.to_string(),
            found: shape.describe(),
        })
    }
}

fn constant_matches(expected: &str, value: &Value) -> bool {
    match value {
        Value::Vector(components) => vector_size(expected) == Some(components.len()),
        Value::Matrix(columns) => {
            matches!(Shape::matrix(columns), Shape::Matrix { columns, rows: Some(rows) }
                if matrix_size(expected) == Some((columns, rows)))
        }
        other => expected == constant_type(other),
    }
}

/// Exact match, except that an unsized array slot accepts any size.
fn types_match(expected: &str, found: &str) -> bool {
    if expected == found {
        return true;
    }
    let (expected_base, expected_suffix) = split_array_suffix(expected);
    let (found_base, found_suffix) = split_array_suffix(found);
    expected_suffix == "[]" && !found_suffix.is_empty() && expected_base == found_base
}

/// Re-verify every slot of a finished material.
pub fn verify_material(material: &Material) -> Vec<SlotError> {
    let mut errors = Vec::new();
    let mut path = String::new();

    for param in &material.parameters {
        path.clear();
        path.push_str(&param.name);
        if let Some(default) = &param.default {
            record(
                verify_slot(&param.ty.name, Shape::of(default), material),
                &path,
                &mut errors,
            );
            verify_children(default, material, &mut path, &mut errors);
        }
        for annotation in &param.annotations {
            verify_call(annotation, material, &mut path, &mut errors);
        }
    }

    path.clear();
    for annotation in &material.annotations {
        verify_call(annotation, material, &mut path, &mut errors);
    }

    for (i, temporary) in material.temporaries.iter().enumerate() {
        path.clear();
        path.push_str(&format!("temporary{i}"));
        verify_root(temporary, material, &mut path, &mut errors);
    }

    for (name, expr) in &material.fields {
        path.clear();
        path.push_str(name);
        verify_root(expr, material, &mut path, &mut errors);
    }

    errors
}

fn record(result: Result<(), CheckError>, path: &str, errors: &mut Vec<SlotError>) {
    if let Err(error) = result {
        errors.push(SlotError {
            path: path.to_string(),
            error,
        });
    }
}

/// Expression in a position without a declared type.
fn verify_root(
    expr: &Expression,
    scope: &dyn Scope,
    path: &mut String,
    errors: &mut Vec<SlotError>,
) {
    match expr {
        Expression::Parameter(index) if scope.parameter_type(*index).is_none() => {
            record(Err(CheckError::UnknownParameter(*index)), path, errors);
        }
        Expression::Temporary(index) if scope.temporary(*index).is_none() => {
            record(Err(CheckError::UnknownTemporary(*index)), path, errors);
        }
        _ => verify_children(expr, scope, path, errors),
    }
}

fn verify_children(
    expr: &Expression,
    scope: &dyn Scope,
    path: &mut String,
    errors: &mut Vec<SlotError>,
) {
    match expr {
        Expression::Call(call) => verify_call(call, scope, path, errors),
        Expression::Array(array) => {
            for (i, element) in array.elements.iter().enumerate() {
                let prev_len = path.len();
                path.push_str(&format!("[{i}]"));
                record(
                    verify_slot(&array.element.name, Shape::of(element), scope),
                    path,
                    errors,
                );
                verify_children(element, scope, path, errors);
                path.truncate(prev_len);
            }
        }
        Expression::Constant(_) | Expression::Parameter(_) | Expression::Temporary(_) => {}
    }
}

fn verify_call(call: &Call, scope: &dyn Scope, path: &mut String, errors: &mut Vec<SlotError>) {
    for (&index, argument) in &call.arguments {
        let prev_len = path.len();
        match call.slots.get(index) {
            Some(slot) => {
                path.push_str(&format!(".{}({})", call.name, slot.name));
                record(
                    verify_slot(&slot.ty.name, Shape::of(argument), scope),
                    path,
                    errors,
                );
            }
            None => {
                path.push_str(&format!(".{}({index})", call.name));
                record(
                    Err(CheckError::SlotOutOfRange {
                        index,
                        len: call.slots.len(),
                    }),
                    path,
                    errors,
                );
            }
        }
        verify_children(argument, scope, path, errors);
        path.truncate(prev_len);
    }
}
