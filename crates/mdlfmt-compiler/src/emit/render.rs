//! Expression rendering.
//!
//! Calls pick one of four surface forms from their stored name: subscript
//! (`base[index]`), operator (`-a`, `a + b`, `a ? b : c`), member access
//! (`base.member`) or the general named-argument form.

use mdlfmt_core::resolver::OPERATOR_PREFIX;
use mdlfmt_core::utils::is_positional_placeholder;
use mdlfmt_core::{ArrayExpr, Call, Expression, Material, Value};

use super::literal::format_value;
use super::{Emitter, FormatError};
use crate::check::Shape;

/// Declared type spelling of `expr` inside `material`.
pub fn type_of(expr: &Expression, material: &Material) -> Result<String, FormatError> {
    Ok(match expr {
        Expression::Call(call) => call.result.to_source(),
        Expression::Array(array) => format!(
            "{}[{}]",
            array.element.to_source(),
            array.elements.len()
        ),
        Expression::Parameter(index) => material
            .parameter(*index)
            .ok_or(FormatError::DanglingParameter(*index))?
            .ty
            .to_source(),
        Expression::Temporary(index) => {
            let temporary = material
                .temporary(*index)
                .ok_or(FormatError::DanglingTemporary(*index))?;
            type_of(temporary, material)?
        }
        Expression::Constant(Value::Enum(e)) => e.ty.to_source(),
        Expression::Constant(Value::Matrix(columns)) => match Shape::matrix(columns) {
            Shape::Matrix {
                columns,
                rows: Some(rows),
            } => format!("float{columns}x{rows}"),
            _ if columns.is_empty() => return Err(FormatError::EmptyMatrix),
            _ => return Err(FormatError::RaggedMatrix),
        },
        Expression::Constant(value) => Shape::Constant(value).describe(),
    })
}

impl Emitter<'_> {
    pub(super) fn indent(&self, level: usize) -> String {
        self.config.indent.repeat(level)
    }

    /// Render `expr` as it appears at indentation `level`.
    pub(super) fn expression(
        &self,
        material: &Material,
        expr: &Expression,
        level: usize,
    ) -> Result<String, FormatError> {
        match expr {
            Expression::Constant(value) => format_value(value, self.config),
            Expression::Call(call) => self.call(material, call, level),
            Expression::Array(array) => self.array(material, array, level),
            Expression::Parameter(index) => Ok(material
                .parameter(*index)
                .ok_or(FormatError::DanglingParameter(*index))?
                .name
                .clone()),
            Expression::Temporary(index) => {
                if material.temporary(*index).is_none() {
                    return Err(FormatError::DanglingTemporary(*index));
                }
                Ok(format!("temporary{index}"))
            }
        }
    }

    fn array(
        &self,
        material: &Material,
        array: &ArrayExpr,
        level: usize,
    ) -> Result<String, FormatError> {
        let elements = array
            .elements
            .iter()
            .map(|e| self.expression(material, e, level))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!(
            "{}[]({})",
            array.element.to_source(),
            elements.join(", ")
        ))
    }

    pub(super) fn call(
        &self,
        material: &Material,
        call: &Call,
        level: usize,
    ) -> Result<String, FormatError> {
        if call.is_index() {
            let base = self.operand(material, call, 0, level)?;
            let index = self.expression(material, required(call, 1)?, level)?;
            return Ok(format!("{base}[{index}]"));
        }
        if call.is_operator() {
            return self.operator(material, call, level);
        }
        if let Some(member) = call.member() {
            let base = self.operand(material, call, 0, level)?;
            return Ok(format!("{base}{member}"));
        }
        self.general_call(material, call, level)
    }

    fn operator(
        &self,
        material: &Material,
        call: &Call,
        level: usize,
    ) -> Result<String, FormatError> {
        let op = call
            .name
            .strip_prefix(OPERATOR_PREFIX)
            .unwrap_or(&call.name);
        match (call.arguments.len(), op) {
            (1, _) => Ok(format!("{op}{}", self.operand(material, call, 0, level)?)),
            (2, _) => Ok(format!(
                "{} {op} {}",
                self.operand(material, call, 0, level)?,
                self.operand(material, call, 1, level)?
            )),
            (3, "?") => Ok(format!(
                "{} ? {} : {}",
                self.operand(material, call, 0, level)?,
                self.operand(material, call, 1, level)?,
                self.operand(material, call, 2, level)?
            )),
            (arity, _) => Err(FormatError::UnsupportedArity {
                call: call.source_name(),
                arity,
            }),
        }
    }

    /// Operand of a sugared call, parenthesized when it is an operator itself.
    fn operand(
        &self,
        material: &Material,
        call: &Call,
        index: usize,
        level: usize,
    ) -> Result<String, FormatError> {
        let expr = required(call, index)?;
        let text = self.expression(material, expr, level)?;
        if expr.is_operator_call() {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }

    fn general_call(
        &self,
        material: &Material,
        call: &Call,
        level: usize,
    ) -> Result<String, FormatError> {
        let name = call.source_name();
        if call.arguments.is_empty() {
            return Ok(format!("{name}()"));
        }

        let positional = call.is_positional();
        let inner = self.indent(level + 1);
        let mut arguments = Vec::with_capacity(call.arguments.len());
        for (&index, argument) in &call.arguments {
            let slot = call.slots.get(index).ok_or(FormatError::SlotOutOfRange {
                call: name.clone(),
                index,
            })?;
            let value = self.expression(material, argument, level + 1)?;
            if positional {
                if !is_positional_placeholder(&slot.name) {
                    return Err(FormatError::NonNumericPositional {
                        call: name,
                        name: slot.name.clone(),
                    });
                }
                arguments.push(format!("{inner}{value}"));
            } else {
                arguments.push(format!("{inner}{} : {value}", slot.name));
            }
        }
        Ok(format!(
            "{name}(\n{}\n{})",
            arguments.join(",\n"),
            self.indent(level)
        ))
    }
}

fn required(call: &Call, index: usize) -> Result<&Expression, FormatError> {
    call.argument(index).ok_or_else(|| FormatError::MissingOperand {
        call: call.source_name(),
        index,
    })
}
