//! Type references, user type registries and the import table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A type or call name split into its namespace and canonical local name.
///
/// The local name keeps any array suffix (`float[4]`), so a declared slot type
/// can be compared against an array's element type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TypeRef {
    pub namespace: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Type without a namespace.
    pub fn local(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }

    /// Spelling accepted back by the resolver: `::ns::name`, or the bare name.
    pub fn to_qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("::{}::{}", self.namespace, self.name)
        }
    }

    /// Source spelling: `ns::name`, or the bare name.
    pub fn to_source(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

/// Declared argument or member position.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    pub ty: TypeRef,
    pub name: String,
}

/// User-defined structure type.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StructureType {
    pub ty: TypeRef,
    pub members: Vec<Slot>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i32,
}

/// User-defined enum type.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnumType {
    pub ty: TypeRef,
    pub members: Vec<EnumMember>,
}

/// Referenced names grouped by namespace, in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Imports(BTreeMap<String, BTreeSet<String>>);

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `namespace::name`. Returns `false` if it was already present.
    pub fn insert(&mut self, namespace: &str, name: &str) -> bool {
        self.0
            .entry(namespace.to_string())
            .or_default()
            .insert(name.to_string())
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.0.get(namespace).is_some_and(|names| names.contains(name))
    }

    pub fn names(&self, namespace: &str) -> Option<&BTreeSet<String>> {
        self.0.get(namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(ns, names)| (ns.as_str(), names))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of namespaces.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
