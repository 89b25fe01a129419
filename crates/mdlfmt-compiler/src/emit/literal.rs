//! Literal text of constant values.

use mdlfmt_core::utils::{quote, relative_resource_path};
use mdlfmt_core::{Call, EnumValue, Expression, Material, TextureValue, Value};

use super::{Config, FormatError};

/// Float literal: shortest round-trip decimal, always with a fractional part,
/// plus the `f` suffix.
pub fn format_float(value: f32) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NonFiniteFloat(value));
    }
    let mut out = value.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    out.push('f');
    Ok(out)
}

fn format_floats(values: &[f32]) -> Result<String, FormatError> {
    let parts = values
        .iter()
        .map(|&v| format_float(v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(", "))
}

fn format_vector(components: &[f32]) -> Result<String, FormatError> {
    Ok(format!(
        "float{}({})",
        components.len(),
        format_floats(components)?
    ))
}

fn format_matrix(columns: &[Vec<f32>]) -> Result<String, FormatError> {
    let rows = columns.first().ok_or(FormatError::EmptyMatrix)?.len();
    if rows == 0 {
        return Err(FormatError::EmptyMatrix);
    }
    if columns.iter().any(|c| c.len() != rows) {
        return Err(FormatError::RaggedMatrix);
    }
    let parts = columns
        .iter()
        .map(|c| format_vector(c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("float{}x{rows}({})", columns.len(), parts.join(", ")))
}

fn format_enum(value: &EnumValue) -> String {
    if value.ty.namespace.is_empty() {
        value.symbol.clone()
    } else {
        format!("{}::{}", value.ty.namespace, value.symbol)
    }
}

fn format_texture(texture: &TextureValue, config: &Config) -> String {
    if texture.is_unset() {
        return "texture_2d()".to_string();
    }
    let path = relative_resource_path(&texture.path, config.media_root.as_deref());
    format!("texture_2d({}, tex::{})", quote(&path), texture.gamma.as_str())
}

/// Literal text of a constant.
pub fn format_value(value: &Value, config: &Config) -> Result<String, FormatError> {
    Ok(match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f)?,
        Value::String(s) => quote(s),
        Value::Color(rgb) => format!("color({})", format_floats(rgb)?),
        Value::Enum(e) => format_enum(e),
        Value::Texture(t) => format_texture(t, config),
        Value::Vector(components) => format_vector(components)?,
        Value::Matrix(columns) => format_matrix(columns)?,
    })
}

/// Fail on the first float in `material` that has no literal form.
pub fn ensure_finite(material: &Material) -> Result<(), FormatError> {
    for param in &material.parameters {
        if let Some(default) = &param.default {
            finite_expression(default)?;
        }
        param.annotations.iter().try_for_each(finite_call)?;
    }
    material.annotations.iter().try_for_each(finite_call)?;
    material.temporaries.iter().try_for_each(finite_expression)?;
    material.fields.values().try_for_each(finite_expression)
}

fn finite_expression(expr: &Expression) -> Result<(), FormatError> {
    match expr {
        Expression::Constant(value) => finite_value(value),
        Expression::Call(call) => finite_call(call),
        Expression::Array(array) => array.elements.iter().try_for_each(finite_expression),
        Expression::Parameter(_) | Expression::Temporary(_) => Ok(()),
    }
}

fn finite_call(call: &Call) -> Result<(), FormatError> {
    call.arguments.values().try_for_each(finite_expression)
}

fn finite_value(value: &Value) -> Result<(), FormatError> {
    let floats: &[f32] = match value {
        Value::Float(v) => std::slice::from_ref(v),
        Value::Color(rgb) => rgb,
        Value::Vector(components) => components,
        Value::Matrix(columns) => return columns.iter().try_for_each(|c| finite_floats(c)),
        _ => &[],
    };
    finite_floats(floats)
}

fn finite_floats(values: &[f32]) -> Result<(), FormatError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&v) => Err(FormatError::NonFiniteFloat(v)),
        None => Ok(()),
    }
}
