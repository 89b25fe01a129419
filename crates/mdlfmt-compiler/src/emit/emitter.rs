//! Core emitter struct and material layout.

use mdlfmt_core::{Call, Material, MaterialFile, Parameter};

use super::imports::import_lines;
use super::literal::ensure_finite;
use super::render::type_of;
use super::{Config, FormatError};

/// DSL emitter for one material file.
pub struct Emitter<'a> {
    pub(super) file: &'a MaterialFile,
    pub(super) config: &'a Config,
    /// Output buffer
    pub(super) output: String,
}

impl<'a> Emitter<'a> {
    pub fn new(file: &'a MaterialFile, config: &'a Config) -> Self {
        Self {
            file,
            config,
            output: String::new(),
        }
    }

    /// Emit the whole file.
    pub fn emit(mut self) -> Result<String, FormatError> {
        self.output
            .push_str(&format!("mdl {};\n\n", self.config.language_version));

        let imports = import_lines(&self.file.imports, self.config.wildcard_threshold);
        if !imports.is_empty() {
            for line in imports {
                self.output.push_str(&line);
                self.output.push('\n');
            }
            self.output.push('\n');
        }

        for material in &self.file.materials {
            let text = self
                .material(material)
                .map_err(|source| FormatError::Material {
                    material: material.name.clone(),
                    source: Box::new(source),
                })?;
            self.output.push_str(&text);
            self.output.push('\n');
            tracing::debug!(material = %material.name, "material emitted");
        }

        // Exactly one trailing newline
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        Ok(self.output)
    }

    fn material(&self, material: &Material) -> Result<String, FormatError> {
        let mut out = format!("export material {}(", material.name);

        if !material.parameters.is_empty() {
            let parameters = material
                .parameters
                .iter()
                .map(|p| self.parameter(material, p))
                .collect::<Result<Vec<_>, _>>()?;
            out.push('\n');
            out.push_str(&parameters.join(",\n"));
            out.push('\n');
        }
        out.push(')');

        if !material.annotations.is_empty() {
            out.push('\n');
            out.push_str(&self.annotation_block(material, &material.annotations, 0)?);
        }

        out.push_str("\n= ");
        if !material.temporaries.is_empty() {
            out.push_str("let {\n");
            for (i, temporary) in material.temporaries.iter().enumerate() {
                out.push_str(&format!(
                    "{}{} temporary{i} = {};\n",
                    self.indent(1),
                    type_of(temporary, material)?,
                    self.expression(material, temporary, 1)?
                ));
            }
            out.push_str("} in ");
        }

        out.push_str("material(");
        if !material.fields.is_empty() {
            let fields = material
                .fields
                .iter()
                .map(|(name, expr)| {
                    Ok(format!(
                        "{}{name} : {}",
                        self.indent(1),
                        self.expression(material, expr, 1)?
                    ))
                })
                .collect::<Result<Vec<_>, FormatError>>()?;
            out.push('\n');
            out.push_str(&fields.join(",\n"));
            out.push('\n');
        }
        out.push_str(");\n");
        Ok(out)
    }

    fn parameter(&self, material: &Material, param: &Parameter) -> Result<String, FormatError> {
        let mut out = self.indent(1);
        if let Some(modifier) = &param.modifier {
            out.push_str(modifier);
            out.push(' ');
        }
        out.push_str(&format!("{} {}", param.ty.to_source(), param.name));
        if let Some(default) = &param.default {
            out.push_str(" = ");
            out.push_str(&self.expression(material, default, 1)?);
        }
        if !param.annotations.is_empty() {
            out.push('\n');
            out.push_str(&self.annotation_block(material, &param.annotations, 1)?);
        }
        Ok(out)
    }

    /// `[[ ... ]]` with the brackets at `level` and one annotation per line.
    fn annotation_block(
        &self,
        material: &Material,
        annotations: &[Call],
        level: usize,
    ) -> Result<String, FormatError> {
        let inner = self.indent(level + 1);
        let items = annotations
            .iter()
            .map(|a| Ok(format!("{inner}{}", self.call(material, a, level + 1)?)))
            .collect::<Result<Vec<_>, FormatError>>()?;
        let outer = self.indent(level);
        Ok(format!("{outer}[[\n{}\n{outer}]]", items.join(",\n")))
    }
}

/// Regenerate DSL source text for `file`.
pub fn emit_dsl(file: &MaterialFile, config: &Config) -> Result<String, FormatError> {
    Emitter::new(file, config).emit()
}

/// Structured interchange form: the whole tree as pretty-printed JSON.
///
/// Floats follow the same rule as the DSL form: non-finite values are
/// rejected instead of being encoded as `null`.
pub fn emit_json(file: &MaterialFile) -> Result<String, FormatError> {
    for material in &file.materials {
        ensure_finite(material).map_err(|source| FormatError::Material {
            material: material.name.clone(),
            source: Box::new(source),
        })?;
    }
    let mut out = serde_json::to_string_pretty(file)?;
    out.push('\n');
    Ok(out)
}
