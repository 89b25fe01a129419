//! Per-file registries of user structure and enum types.
//!
//! Registration is idempotent: a type whose canonical qualified key is known
//! (or currently being registered) is refused, and the caller skips its body.

use indexmap::IndexMap;
use mdlfmt_core::resolver::{canonical_type_name, namespace_of};
use mdlfmt_core::{EnumMember, EnumType, Slot, StructureType, TypeRef};

use super::error::{BuildError, BuildResult};

/// Canonical registry key: `ns::local`, or `local` for unqualified names.
pub fn type_key(name: &str) -> String {
    let namespace = namespace_of(name);
    let local = canonical_type_name(name);
    if namespace.is_empty() {
        local
    } else {
        format!("{namespace}::{local}")
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    structures: IndexMap<String, StructureType>,
    enums: IndexMap<String, EnumType>,
    /// Registrations in progress; nested types stack up.
    pending_structures: Vec<(String, StructureType)>,
    pending_enums: Vec<(String, EnumType, usize)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structures(&self) -> &IndexMap<String, StructureType> {
        &self.structures
    }

    pub fn enums(&self) -> &IndexMap<String, EnumType> {
        &self.enums
    }

    pub fn structure(&self, name: &str) -> Option<&StructureType> {
        self.structures.get(&type_key(name))
    }

    pub fn is_pending(&self) -> bool {
        !self.pending_structures.is_empty() || !self.pending_enums.is_empty()
    }

    fn knows(&self, key: &str) -> bool {
        self.structures.contains_key(key)
            || self.enums.contains_key(key)
            || self.pending_structures.iter().any(|(k, _)| k == key)
            || self.pending_enums.iter().any(|(k, ..)| k == key)
    }

    /// Open a structure registration. Returns `false` if the type is known.
    pub fn begin_structure(&mut self, name: &str, ty: TypeRef) -> bool {
        let key = type_key(name);
        if self.knows(&key) {
            return false;
        }
        self.pending_structures.push((
            key,
            StructureType {
                ty,
                members: Vec::new(),
            },
        ));
        true
    }

    pub fn add_member(&mut self, member: Slot) -> BuildResult<()> {
        let Some((_, st)) = self.pending_structures.last_mut() else {
            return Err(BuildError::Outside {
                event: "structure_type_element",
                scope: "a structure type",
            });
        };
        st.members.push(member);
        Ok(())
    }

    pub fn end_structure(&mut self) -> BuildResult<()> {
        let Some((key, st)) = self.pending_structures.pop() else {
            return Err(BuildError::Outside {
                event: "structure_type_end",
                scope: "a structure type",
            });
        };
        tracing::trace!(%key, members = st.members.len(), "structure type registered");
        self.structures.insert(key, st);
        Ok(())
    }

    /// Open an enum registration. Returns `false` if the type is known.
    pub fn begin_enum(&mut self, name: &str, ty: TypeRef, size: usize) -> bool {
        let key = type_key(name);
        if self.knows(&key) {
            return false;
        }
        self.pending_enums.push((
            key,
            EnumType {
                ty,
                members: Vec::new(),
            },
            size,
        ));
        true
    }

    pub fn add_enum_value(&mut self, name: &str, value: i32) -> BuildResult<()> {
        let Some((_, en, _)) = self.pending_enums.last_mut() else {
            return Err(BuildError::Outside {
                event: "enum_type_value",
                scope: "an enum type",
            });
        };
        if en.members.iter().any(|m| m.value == value) {
            return Err(BuildError::DuplicateEnumValue {
                ty: en.ty.to_source(),
                value,
            });
        }
        en.members.push(EnumMember {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    pub fn end_enum(&mut self) -> BuildResult<()> {
        let Some((key, en, size)) = self.pending_enums.pop() else {
            return Err(BuildError::Outside {
                event: "enum_type_end",
                scope: "an enum type",
            });
        };
        if en.members.len() != size {
            return Err(BuildError::SizeMismatch {
                owner: en.ty.to_source(),
                expected: size,
                found: en.members.len(),
            });
        }
        tracing::trace!(%key, values = size, "enum type registered");
        self.enums.insert(key, en);
        Ok(())
    }

    /// Hand out the finished registries, leaving everything empty.
    pub fn take(&mut self) -> (IndexMap<String, StructureType>, IndexMap<String, EnumType>) {
        self.pending_structures.clear();
        self.pending_enums.clear();
        (
            std::mem::take(&mut self.structures),
            std::mem::take(&mut self.enums),
        )
    }

    pub fn clear(&mut self) {
        self.take();
    }
}
