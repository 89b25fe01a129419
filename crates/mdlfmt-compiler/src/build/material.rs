//! File, material and top-level container events, plus type registrations.

use std::collections::BTreeMap;
use std::path::Path;

use mdlfmt_core::resolver::{GLOBAL_ROOT, LIBRARY_ROOT, SEPARATOR};
use mdlfmt_core::{Call, ContentHash, Expression, Material, Parameter, Slot, TypeRef};

use super::arena::{CallOrigin, Node};
use super::error::{BuildError, BuildResult};
use super::expression::Construct;
use super::Builder;
use crate::check;
use crate::events::ArgumentDecl;

/// Split a material name into its enclosing namespace segment and local name.
///
/// `::pkg::sub::mat` → `(Some("sub"), "mat")`, `mat` → `(None, "mat")`.
pub(super) fn split_material_name(name: &str) -> (Option<&str>, &str) {
    let path = name
        .strip_prefix(GLOBAL_ROOT)
        .or_else(|| name.strip_prefix(LIBRARY_ROOT))
        .unwrap_or(name);
    let mut segments = path.rsplit(SEPARATOR);
    let local = segments.next().unwrap_or(path);
    (segments.next(), local)
}

/// File stem of a source path, independent of the separator convention.
pub(super) fn module_of(file: &str) -> Option<String> {
    let normalized = file.replace('\\', "/");
    Path::new(&normalized)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

impl Builder {
    pub(super) fn on_file_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.module = module_of(name);
        tracing::debug!(file = name, module = ?self.module, "file begin");
        Ok(true)
    }

    pub(super) fn on_file_end(&mut self) -> BuildResult<()> {
        if self.material.is_some() {
            return Err(BuildError::StillOpen {
                event: "file_end",
                open: "a material",
            });
        }
        self.ensure_no_container("file_end")?;
        tracing::debug!(materials = self.materials.len(), "file end");
        Ok(())
    }

    pub(super) fn on_material_begin(
        &mut self,
        name: &str,
        hash: ContentHash,
    ) -> BuildResult<bool> {
        if self.material.is_some() {
            return Err(BuildError::StillOpen {
                event: "material_begin",
                open: "a material",
            });
        }
        self.ensure_no_container("material_begin")?;

        let (enclosing, local) = split_material_name(name);
        if self.config.check_file_namespace
            && let (Some(namespace), Some(module)) = (enclosing, self.module.as_deref())
            && namespace != module
        {
            return Err(BuildError::NamespaceMismatch {
                material: name.to_string(),
                namespace: namespace.to_string(),
                module: module.to_string(),
            });
        }
        if self.materials.iter().any(|m| m.name == local) {
            return Err(BuildError::DuplicateMaterial(local.to_string()));
        }

        tracing::debug!(material = local, %hash, "material begin");
        self.material = Some(Material::new(local, hash));
        Ok(true)
    }

    pub(super) fn on_material_end(&mut self) -> BuildResult<()> {
        self.ensure_no_container("material_end")?;
        let material = self.material.take().ok_or(BuildError::Outside {
            event: "material_end",
            scope: "a material",
        })?;
        self.arena.clear();
        tracing::debug!(
            material = %material.name,
            parameters = material.parameters.len(),
            temporaries = material.temporaries.len(),
            fields = material.fields.len(),
            "material end"
        );
        self.materials.push(material);
        Ok(())
    }

    pub(super) fn on_parameter_begin(
        &mut self,
        index: u32,
        modifier: &str,
        type_name: &str,
        name: &str,
    ) -> BuildResult<bool> {
        self.ensure_no_container("parameter_begin")?;
        let material = self.current_material("parameter_begin")?;

        let expected = material.parameters.len() as u32;
        if index != expected {
            return Err(BuildError::IndexOutOfOrder {
                kind: "parameter",
                index,
                expected,
            });
        }
        if !name.is_empty() && material.parameters.iter().any(|p| p.name == name) {
            return Err(BuildError::DuplicateParameter(name.to_string()));
        }

        let ty = self.resolver.resolve_type(type_name);
        self.parameter = Some(Parameter {
            index,
            modifier: (!modifier.is_empty()).then(|| modifier.to_string()),
            ty,
            name: name.to_string(),
            default: None,
            annotations: Vec::new(),
        });
        Ok(true)
    }

    pub(super) fn on_parameter_end(&mut self) -> BuildResult<()> {
        let Some(mut parameter) = self.parameter.take() else {
            return Err(BuildError::Outside {
                event: "parameter_end",
                scope: "a parameter",
            });
        };

        match self.frames.len() {
            0 => {}
            1 => {
                let node = self.pop_sealed("parameter_end")?;
                let scope = self.current_material("parameter_end")?;
                check::verify_slot(&parameter.ty.name, self.arena.shape(node)?, scope).map_err(
                    |source| BuildError::Check {
                        context: format!("default of parameter `{}`", parameter.name),
                        source,
                    },
                )?;
                parameter.default = Some(self.arena.take_tree(node)?);
            }
            depth => {
                return Err(BuildError::Unbalanced {
                    event: "parameter_end",
                    depth,
                });
            }
        }

        self.arena.clear();
        self.current_material_mut("parameter_end")?
            .parameters
            .push(parameter);
        Ok(())
    }

    pub(super) fn on_field_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.ensure_no_container("field_begin")?;
        if self.current_material("field_begin")?.fields.contains_key(name) {
            return Err(BuildError::DuplicateField(name.to_string()));
        }
        self.field = Some(name.to_string());
        Ok(true)
    }

    pub(super) fn on_field_end(&mut self) -> BuildResult<()> {
        let Some(name) = self.field.take() else {
            return Err(BuildError::Outside {
                event: "field_end",
                scope: "a field",
            });
        };
        let expr = self.finish_expression("field_end")?;
        self.current_material_mut("field_end")?
            .fields
            .insert(name, expr);
        Ok(())
    }

    pub(super) fn on_temporary_begin(&mut self, index: u32) -> BuildResult<bool> {
        self.ensure_no_container("temporary_begin")?;
        let expected = self.current_material("temporary_begin")?.temporaries.len() as u32;
        if index != expected {
            return Err(BuildError::IndexOutOfOrder {
                kind: "temporary",
                index,
                expected,
            });
        }
        self.temporary = Some(index);
        Ok(true)
    }

    pub(super) fn on_temporary_end(&mut self) -> BuildResult<()> {
        if self.temporary.take().is_none() {
            return Err(BuildError::Outside {
                event: "temporary_end",
                scope: "a temporary",
            });
        }
        let expr = self.finish_expression("temporary_end")?;
        self.current_material_mut("temporary_end")?
            .temporaries
            .push(expr);
        Ok(())
    }

    pub(super) fn on_annotation_begin(
        &mut self,
        name: &str,
        args: &[ArgumentDecl],
    ) -> BuildResult<bool> {
        const EVENT: &str = "annotation_begin";
        self.current_material(EVENT)?;
        if self.field.is_some() {
            return Err(BuildError::StillOpen {
                event: EVENT,
                open: "a field",
            });
        }
        if self.temporary.is_some() {
            return Err(BuildError::StillOpen {
                event: EVENT,
                open: "a temporary",
            });
        }
        // A parameter may already hold its completed default.
        let attachable = match self.frames.top() {
            None => true,
            Some(top) => self.parameter.is_some() && self.frames.len() == 1 && top.sealed,
        };
        if !attachable {
            return Err(BuildError::Unbalanced {
                event: EVENT,
                depth: self.frames.len(),
            });
        }

        let (namespace, local) = self.resolver.resolve_call(name);
        let slots = self.resolve_slots(args);
        let call = Call::new(TypeRef::local("void"), namespace, local, slots);
        let id = self.arena.alloc(Node::Call {
            call,
            origin: CallOrigin::Annotation,
            arguments: BTreeMap::new(),
        });
        self.frames.push_open(id);
        Ok(true)
    }

    pub(super) fn on_annotation_end(&mut self) -> BuildResult<()> {
        let node = self.seal("annotation_end", Construct::Call(CallOrigin::Annotation))?;
        self.frames.pop();
        let call = self.arena.take_call(node)?;
        if self.frames.is_empty() {
            self.arena.clear();
        }
        match self.parameter.as_mut() {
            Some(parameter) => parameter.annotations.push(call),
            None => self
                .current_material_mut("annotation_end")?
                .annotations
                .push(call),
        }
        Ok(())
    }

    // Type registrations may appear anywhere in the stream and never touch
    // the construction stack.

    pub(super) fn on_structure_type_begin(&mut self, name: &str) -> BuildResult<bool> {
        let ty = self.resolver.resolve_type(name);
        let descend = self.registry.begin_structure(name, ty);
        if !descend {
            tracing::trace!(name, "structure type already registered");
        }
        Ok(descend)
    }

    pub(super) fn on_structure_type_element(
        &mut self,
        type_name: &str,
        name: &str,
    ) -> BuildResult<()> {
        let ty = self.resolver.resolve_type(type_name);
        self.registry.add_member(Slot {
            ty,
            name: name.to_string(),
        })
    }

    pub(super) fn on_structure_type_end(&mut self) -> BuildResult<()> {
        self.registry.end_structure()
    }

    pub(super) fn on_enum_type_begin(&mut self, name: &str, size: usize) -> BuildResult<bool> {
        let ty = self.resolver.resolve_type(name);
        let descend = self.registry.begin_enum(name, ty, size);
        if !descend {
            tracing::trace!(name, "enum type already registered");
        }
        Ok(descend)
    }

    pub(super) fn on_enum_type_value(&mut self, name: &str, value: i32) -> BuildResult<()> {
        self.registry.add_enum_value(name, value)
    }

    pub(super) fn on_enum_type_end(&mut self) -> BuildResult<()> {
        self.registry.end_enum()
    }

    pub(super) fn resolve_slots(&mut self, args: &[ArgumentDecl]) -> Vec<Slot> {
        args.iter()
            .map(|arg| Slot {
                ty: self.resolver.resolve_type(&arg.type_name),
                name: arg.name.clone(),
            })
            .collect()
    }

    /// No parameter, field or temporary open and nothing under construction.
    fn ensure_no_container(&self, event: &'static str) -> BuildResult<()> {
        let open = if self.parameter.is_some() {
            Some("a parameter")
        } else if self.field.is_some() {
            Some("a field")
        } else if self.temporary.is_some() {
            Some("a temporary")
        } else {
            None
        };
        if let Some(open) = open {
            return Err(BuildError::StillOpen { event, open });
        }
        if !self.frames.is_empty() {
            return Err(BuildError::Unbalanced {
                event,
                depth: self.frames.len(),
            });
        }
        Ok(())
    }

    /// Pop the single completed top-level expression of a field or temporary.
    fn finish_expression(&mut self, event: &'static str) -> BuildResult<Expression> {
        match self.frames.len() {
            0 => Err(BuildError::MissingExpression { event }),
            1 => {
                let node = self.pop_sealed(event)?;
                let expr = self.arena.take_tree(node)?;
                self.arena.clear();
                Ok(expr)
            }
            depth => Err(BuildError::Unbalanced { event, depth }),
        }
    }
}
