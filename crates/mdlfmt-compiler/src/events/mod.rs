//! Parse event protocol.
//!
//! The external parser reports a material file as a sequence of begin/end
//! pairs (one per production), slot events that open a numbered position
//! inside a production, and single-shot leaf events. Every begin-event returns
//! a descend flag: when it is `false` the producer skips the body and does not
//! report the matching end-event.
//!
//! - `EventSink` - the consumer side, implemented by the builder and `Recorder`
//! - `Event` - the same protocol as data, for logs and replay
//! - `drive` - feeds recorded events into a sink, honoring the descend flag

mod event;
mod log;
mod recorder;


use std::borrow::Borrow;

use mdlfmt_core::{ContentHash, GammaMode};

use crate::build::BuildResult;

pub use event::{Event, Nesting};
pub use log::{EventLogError, parse_event_log, to_event_log};
pub use recorder::Recorder;

/// Declared argument of a call or annotation: `(type, name)`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArgumentDecl {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
}

impl ArgumentDecl {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// Consumer of the event protocol.
///
/// Begin-methods return the descend flag. Any error is final for the current
/// file.
pub trait EventSink {
    fn file_begin(&mut self, name: &str) -> BuildResult<bool>;
    fn file_end(&mut self) -> BuildResult<()>;

    fn material_begin(&mut self, name: &str, hash: ContentHash) -> BuildResult<bool>;
    fn material_end(&mut self) -> BuildResult<()>;

    fn parameter_begin(
        &mut self,
        index: u32,
        modifier: &str,
        type_name: &str,
        name: &str,
    ) -> BuildResult<bool>;
    fn parameter_end(&mut self) -> BuildResult<()>;

    fn annotation_begin(&mut self, name: &str, args: &[ArgumentDecl]) -> BuildResult<bool>;
    fn annotation_end(&mut self) -> BuildResult<()>;

    fn field_begin(&mut self, name: &str) -> BuildResult<bool>;
    fn field_end(&mut self) -> BuildResult<()>;

    fn temporary_begin(&mut self, index: u32) -> BuildResult<bool>;
    fn temporary_end(&mut self) -> BuildResult<()>;

    fn call_begin(
        &mut self,
        type_name: &str,
        name: &str,
        args: &[ArgumentDecl],
    ) -> BuildResult<bool>;
    fn call_end(&mut self) -> BuildResult<()>;
    fn argument_begin(&mut self, index: usize) -> BuildResult<bool>;
    fn argument_end(&mut self) -> BuildResult<()>;

    fn array_begin(&mut self, element_type: &str, size: usize) -> BuildResult<bool>;
    fn array_end(&mut self) -> BuildResult<()>;
    fn array_element_begin(&mut self, index: usize) -> BuildResult<bool>;
    fn array_element_end(&mut self) -> BuildResult<()>;

    fn vector_begin(&mut self, type_name: &str) -> BuildResult<bool>;
    fn vector_end(&mut self) -> BuildResult<()>;
    fn vector_element_begin(&mut self, index: usize) -> BuildResult<bool>;
    fn vector_element_end(&mut self) -> BuildResult<()>;

    fn matrix_begin(&mut self, type_name: &str) -> BuildResult<bool>;
    fn matrix_end(&mut self) -> BuildResult<()>;
    fn matrix_element_begin(&mut self, index: usize) -> BuildResult<bool>;
    fn matrix_element_end(&mut self) -> BuildResult<()>;

    fn structure_begin(&mut self, name: &str) -> BuildResult<bool>;
    fn structure_end(&mut self) -> BuildResult<()>;
    fn structure_member_begin(&mut self, index: usize) -> BuildResult<bool>;
    fn structure_member_end(&mut self) -> BuildResult<()>;

    fn structure_type_begin(&mut self, name: &str) -> BuildResult<bool>;
    fn structure_type_element(&mut self, type_name: &str, name: &str) -> BuildResult<()>;
    fn structure_type_end(&mut self) -> BuildResult<()>;

    fn enum_type_begin(&mut self, name: &str, size: usize) -> BuildResult<bool>;
    fn enum_type_value(&mut self, name: &str, value: i32) -> BuildResult<()>;
    fn enum_type_end(&mut self) -> BuildResult<()>;

    fn reference_parameter(&mut self, index: u32) -> BuildResult<()>;
    fn reference_temporary(&mut self, index: u32) -> BuildResult<()>;
    fn default_ref(&mut self, type_name: &str) -> BuildResult<()>;

    fn value_bool(&mut self, value: bool) -> BuildResult<()>;
    fn value_int(&mut self, value: i32) -> BuildResult<()>;
    fn value_float(&mut self, value: f32) -> BuildResult<()>;
    fn value_string(&mut self, value: &str) -> BuildResult<()>;
    fn value_color(&mut self, rgb: [f32; 3]) -> BuildResult<()>;
    fn value_enum(&mut self, type_name: &str, value: i32, name: &str) -> BuildResult<()>;
    fn value_texture(&mut self, path: &str, gamma: GammaMode) -> BuildResult<()>;
    fn value_bsdf_measurement(&mut self, path: &str) -> BuildResult<()>;
    fn value_light_profile(&mut self, path: &str) -> BuildResult<()>;
}

/// Feed recorded events into `sink`.
///
/// When a begin-event is refused, everything up to and including its matching
/// end-event is skipped, the same way a live producer would not report it.
pub fn drive<I, E, S>(events: I, sink: &mut S) -> BuildResult<()>
where
    I: IntoIterator<Item = E>,
    E: Borrow<Event>,
    S: EventSink + ?Sized,
{
    let mut skip_depth = 0usize;
    for event in events {
        let event = event.borrow();
        let nesting = event.nesting();

        if skip_depth > 0 {
            match nesting {
                Nesting::Open => skip_depth += 1,
                Nesting::Close => skip_depth -= 1,
                Nesting::Leaf => {}
            }
            continue;
        }

        let descend = event.apply(sink)?;
        if !descend && nesting == Nesting::Open {
            tracing::trace!(?event, "body skipped");
            skip_depth = 1;
        }
    }
    Ok(())
}
