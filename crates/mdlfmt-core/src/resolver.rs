//! Name and type resolution.
//!
//! Qualified names arrive in one of two rooted forms: `::a::b::name` (global
//! root) or `mdl::a::b::name` (library root). Anything else is unqualified and
//! has an empty namespace. Function names may carry a signature in parentheses,
//! which is ignored for resolution.

use std::collections::BTreeSet;

use crate::types::{Imports, TypeRef};

pub const GLOBAL_ROOT: &str = "::";
pub const LIBRARY_ROOT: &str = "mdl::";
pub const SEPARATOR: &str = "::";

/// Prefix of operator call names. Operators are never importable.
pub const OPERATOR_PREFIX: &str = "operator";
/// Trailing marker of subscript call names.
pub const INDEX_MARKER: char = '@';
pub const MEMBER_SEPARATOR: char = '.';

/// Type spellings that never need an import.
pub const DEFAULT_BUILTIN_TYPES: &[&str] = &[
    "bool",
    "color",
    "float",
    "float2",
    "float3",
    "int",
    "string",
    "texture_2d",
];

fn without_signature(name: &str) -> &str {
    name.find('(').map_or(name, |paren| &name[..paren])
}

/// Namespace of a rooted qualified name.
///
/// # Examples
/// ```
/// use mdlfmt_core::resolver::namespace_of;
/// assert_eq!(namespace_of("::base::file_texture(texture_2d)"), "base");
/// assert_eq!(namespace_of("mdl::df::diffuse_reflection_bsdf"), "df");
/// assert_eq!(namespace_of("::nvidia::core_definitions::flex"), "nvidia::core_definitions");
/// assert_eq!(namespace_of("::foo"), "");
/// assert_eq!(namespace_of("df::bsdf"), "");
/// ```
pub fn namespace_of(name: &str) -> &str {
    if !name.starts_with(GLOBAL_ROOT) && !name.starts_with(LIBRARY_ROOT) {
        return "";
    }
    let Some(root) = name.find(SEPARATOR) else {
        return "";
    };
    let start = root + SEPARATOR.len();
    match without_signature(name).rfind(SEPARATOR) {
        Some(last) if last > start => &name[start..last],
        _ => "",
    }
}

/// Last path segment, without any signature.
pub fn local_name_of(name: &str) -> &str {
    let head = without_signature(name);
    head.rfind(':').map_or(head, |colon| &head[colon + 1..])
}

/// Canonical local spelling of a type name.
///
/// Case-folds and flattens generic size annotations: `Float<3>` → `float3`,
/// `float<4,4>` → `float4x4`.
pub fn canonical_type_name(name: &str) -> String {
    let local = local_name_of(name);
    let mut out = String::with_capacity(local.len());
    for c in local.chars() {
        match c {
            '<' | '>' | ' ' => {}
            ',' => out.push('x'),
            _ => out.push(c.to_ascii_lowercase()),
        }
    }
    out
}

/// Split `T[N]` into `("T", "[N]")`. Names without a suffix return `""`.
pub fn split_array_suffix(name: &str) -> (&str, &str) {
    name.find('[').map_or((name, ""), |bracket| name.split_at(bracket))
}

/// Resolver configuration.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    pub(crate) builtin_types: BTreeSet<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            builtin_types: DEFAULT_BUILTIN_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ResolverConfig {
    /// Create a new config with the default built-in set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in type set.
    pub fn builtin_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builtin_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Add one built-in type spelling.
    pub fn with_builtin(mut self, name: impl Into<String>) -> Self {
        self.builtin_types.insert(name.into());
        self
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin_types.contains(name)
    }
}

/// Stateful half of resolution: records every cross-namespace reference so the
/// serializer can emit a minimal import block.
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    config: ResolverConfig,
    imports: Imports,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            imports: Imports::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn imports(&self) -> &Imports {
        &self.imports
    }

    /// Hand out the collected imports, leaving the table empty.
    pub fn take_imports(&mut self) -> Imports {
        std::mem::take(&mut self.imports)
    }

    pub fn clear(&mut self) {
        self.imports.clear();
    }

    /// Record `namespace::name` for import generation.
    ///
    /// Unqualified names and operators are skipped. Returns `true` only when the
    /// reference is new.
    pub fn register_import(&mut self, namespace: &str, name: &str) -> bool {
        if namespace.is_empty() || name.starts_with(OPERATOR_PREFIX) {
            return false;
        }
        let added = self.imports.insert(namespace, name);
        if added {
            tracing::trace!(namespace, name, "import registered");
        }
        added
    }

    /// Register a type reference and return its bare canonical local name.
    ///
    /// Any array suffix is dropped. Built-in spellings are returned unchanged and
    /// never recorded.
    pub fn register_type(&mut self, name: &str) -> String {
        let (base, _) = split_array_suffix(name);
        if self.config.is_builtin(base) {
            return base.to_string();
        }
        let local = canonical_type_name(base);
        self.register_import(namespace_of(base), &local);
        local
    }

    /// Register a declared type, keeping its array suffix in the local name.
    pub fn resolve_type(&mut self, name: &str) -> TypeRef {
        let (base, suffix) = split_array_suffix(name);
        let local = self.register_type(base);
        TypeRef::new(namespace_of(base), format!("{local}{suffix}"))
    }

    /// Register a function reference and return `(namespace, local name)`.
    ///
    /// A member access (`type.member`) imports the structure type it reads from.
    pub fn resolve_call(&mut self, name: &str) -> (String, String) {
        let namespace = namespace_of(name);
        let local = local_name_of(name);
        let imported = local
            .split_once(MEMBER_SEPARATOR)
            .map_or(local, |(structure, _)| structure);
        self.register_import(namespace, imported);
        (namespace.to_string(), local.to_string())
    }
}
