#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for mdlfmt.
//!
//! Two layers:
//! - **Tree layer**: the completed material tree handed from the builder to
//!   the serializers (`Material`, `Expression`, `Value`, registries)
//! - **Resolution layer**: qualified-name splitting, type canonicalization and
//!   the import table (`resolver`)

pub mod material;
pub mod resolver;
pub mod types;
pub mod utils;
pub mod value;

#[cfg(test)]
mod lib_tests;

pub use material::{ArrayExpr, Call, Expression, Material, MaterialFile, Parameter};
pub use resolver::{Resolver, ResolverConfig};
pub use types::{EnumMember, EnumType, Imports, Slot, StructureType, TypeRef};
pub use value::{ContentHash, EnumValue, GammaMode, TextureValue, Value};
