//! Material file serialization.
//!
//! Two output forms of a completed `MaterialFile`:
//! - `emit_dsl` regenerates DSL source text: header, import block, then one
//!   `export material` declaration per material
//! - `emit_json` writes the structured interchange form
//!
//! Formatting is a pure function of the tree. Anything that has no surface
//! form aborts with a `FormatError`; no partial output is produced.

mod config;
mod emitter;
mod error;
mod imports;
mod literal;
mod render;

#[cfg(test)]
mod emit_tests;
#[cfg(test)]
mod imports_tests;
#[cfg(test)]
mod literal_tests;

pub use config::Config;
pub use emitter::{Emitter, emit_dsl, emit_json};
pub use error::FormatError;
pub use imports::import_lines;
pub use literal::{ensure_finite, format_float, format_value};
pub use render::type_of;
