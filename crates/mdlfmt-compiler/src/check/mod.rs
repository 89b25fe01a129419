//! Structural type compatibility.
//!
//! Every expression placed into a declared slot (parameter default, call
//! argument, array element, structure member) is matched against the slot's
//! declared type spelling. The check always runs; a mismatch is an error, not
//! an assertion.

mod shape;
mod verify;


pub use shape::{Shape, matrix_size, vector_size};
pub use verify::{CheckError, Scope, SlotError, verify_material, verify_slot};
