//! mdlfmt compiler: event-driven tree builder, type checker and serializer.
//!
//! Module organization:
//! - `events` the parse event protocol, its recorded form and replay driver
//! - `build` the builder that turns events into a `MaterialFile`
//! - `check` structural type compatibility of slot assignments
//! - `emit` DSL and JSON serialization
//! - `replay` the inverse of `build`: a tree back into events
//! - `translate` events to rendered text in one call

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
pub mod check;
pub mod emit;
pub mod events;
pub mod replay;
pub mod translate;

#[cfg(test)]
pub mod test_utils;

pub use build::{BuildConfig, BuildError, BuildResult, Builder};
pub use emit::FormatError;
pub use events::{Event, EventSink, Recorder, drive};
pub use replay::replay_file;
pub use translate::{OutputFormat, Translator};

/// Errors from building or rendering a material file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl Error {
    /// Whether the caller may continue with the next file.
    ///
    /// Contract violations mean the producer and the builder disagree on the
    /// grammar; a formatting failure means the tree has no surface form.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Build(e) => !e.is_contract_violation(),
            Error::Format(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
