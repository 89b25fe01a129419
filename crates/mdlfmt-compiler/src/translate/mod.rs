//! Events in, text out.

#[cfg(test)]
mod translate_tests;

use mdlfmt_core::MaterialFile;

use crate::Result;
use crate::build::{BuildConfig, BuildError, Builder};
use crate::check::verify_material;
use crate::emit::{self, emit_dsl, emit_json};
use crate::events::{Event, EventSink, drive};

/// Re-check every slot of a finished tree. The first mismatch fails the file.
fn verify(file: &MaterialFile) -> Result<()> {
    for material in &file.materials {
        if let Some(mismatch) = verify_material(material).into_iter().next() {
            return Err(BuildError::Check {
                context: format!("material `{}`, {}", material.name, mismatch.path),
                source: mismatch.error,
            }
            .into());
        }
    }
    Ok(())
}

/// Rendered form of a material file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Dsl,
    Json,
}

impl OutputFormat {
    /// File extension of the rendered output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Dsl => "mdl",
            OutputFormat::Json => "json",
        }
    }
}

/// One builder plus the output settings, reused across files.
#[derive(Debug, Default)]
pub struct Translator {
    builder: Builder,
    config: emit::Config,
    format: OutputFormat,
}

impl Translator {
    pub fn new(build: BuildConfig, config: emit::Config, format: OutputFormat) -> Self {
        Self {
            builder: Builder::new(build),
            config,
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Build the tree for the events of `file_name`.
    ///
    /// `events` is the body of the file: everything between `file_begin` and
    /// `file_end`, which are issued here.
    pub fn build(&mut self, file_name: &str, events: &[Event]) -> Result<MaterialFile> {
        let result = self.run(file_name, events);
        if result.is_err() {
            self.builder.clear();
        }
        result
    }

    fn run(&mut self, file_name: &str, events: &[Event]) -> Result<MaterialFile> {
        if self.builder.file_begin(file_name)? {
            drive(events, &mut self.builder)?;
        }
        self.builder.file_end()?;
        let file = self.builder.take_file();
        verify(&file)?;
        Ok(file)
    }

    /// Render a completed tree in the configured format.
    pub fn render(&self, file: &MaterialFile) -> Result<String> {
        let text = match self.format {
            OutputFormat::Dsl => emit_dsl(file, &self.config)?,
            OutputFormat::Json => emit_json(file)?,
        };
        Ok(text)
    }

    pub fn translate(&mut self, file_name: &str, events: &[Event]) -> Result<String> {
        let file = self.build(file_name, events)?;
        self.render(&file)
    }
}
