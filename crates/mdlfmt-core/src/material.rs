//! Completed material tree.
//!
//! Produced by the builder once a material closes, consumed read-only by the
//! serializers. Nothing in here refers back to construction state.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::resolver::{INDEX_MARKER, MEMBER_SEPARATOR, OPERATOR_PREFIX};
use crate::types::{EnumType, Imports, Slot, StructureType, TypeRef};
use crate::value::{ContentHash, Value};

/// Call of a function, structure constructor or annotation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Call {
    /// Declared result type.
    pub result: TypeRef,
    pub namespace: String,
    pub name: String,
    /// Declared argument slots, in order.
    pub slots: Vec<Slot>,
    /// Filled slots keyed by slot index.
    pub arguments: BTreeMap<usize, Expression>,
}

impl Call {
    pub fn new(
        result: TypeRef,
        namespace: impl Into<String>,
        name: impl Into<String>,
        slots: Vec<Slot>,
    ) -> Self {
        Self {
            result,
            namespace: namespace.into(),
            name: name.into(),
            slots,
            arguments: BTreeMap::new(),
        }
    }

    pub fn argument(&self, index: usize) -> Option<&Expression> {
        self.arguments.get(&index)
    }

    /// `true` if every declared slot has an argument.
    pub fn is_complete(&self) -> bool {
        self.arguments.len() == self.slots.len()
    }

    /// Operator call (`operator+`, `operator?`, ...).
    pub fn is_operator(&self) -> bool {
        self.name.starts_with(OPERATOR_PREFIX)
    }

    /// Subscript sugar: the name carries the trailing index marker.
    pub fn is_index(&self) -> bool {
        self.name.ends_with(INDEX_MARKER)
    }

    /// Member access sugar: `base.member`.
    pub fn member(&self) -> Option<&str> {
        self.name.find(MEMBER_SEPARATOR).map(|dot| &self.name[dot..])
    }

    /// Bracket construction (`float[2]`): arguments are positional.
    pub fn is_positional(&self) -> bool {
        self.name.contains('[')
    }

    /// Qualified name as it appears in source.
    pub fn source_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

/// Array constructor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrayExpr {
    pub element: TypeRef,
    pub elements: Vec<Expression>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Constant(Value),
    Call(Call),
    Array(ArrayExpr),
    /// Index into the owning material's parameters.
    Parameter(u32),
    /// Index into the owning material's temporaries.
    Temporary(u32),
}

impl Expression {
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expression::Call(call) => Some(call),
            _ => None,
        }
    }

    /// `true` for calls rendered with operator syntax.
    pub fn is_operator_call(&self) -> bool {
        self.as_call().is_some_and(Call::is_operator)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    pub index: u32,
    pub modifier: Option<String>,
    pub ty: TypeRef,
    pub name: String,
    pub default: Option<Expression>,
    pub annotations: Vec<Call>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    pub name: String,
    pub hash: ContentHash,
    pub parameters: Vec<Parameter>,
    pub annotations: Vec<Call>,
    pub temporaries: Vec<Expression>,
    /// Field assignments in stable (sorted) order.
    pub fields: BTreeMap<String, Expression>,
}

impl Material {
    pub fn new(name: impl Into<String>, hash: ContentHash) -> Self {
        Self {
            name: name.into(),
            hash,
            parameters: Vec::new(),
            annotations: Vec::new(),
            temporaries: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn parameter(&self, index: u32) -> Option<&Parameter> {
        self.parameters.get(index as usize)
    }

    pub fn temporary(&self, index: u32) -> Option<&Expression> {
        self.temporaries.get(index as usize)
    }
}

/// Everything one source file produced.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialFile {
    /// Stem of the source file, which is also the module the materials live in.
    pub module: Option<String>,
    pub materials: Vec<Material>,
    /// Registered structure types keyed by `ns::name`, in discovery order.
    pub structures: IndexMap<String, StructureType>,
    /// Registered enum types keyed by `ns::name`, in discovery order.
    pub enums: IndexMap<String, EnumType>,
    pub imports: Imports,
}

impl MaterialFile {
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }
}
