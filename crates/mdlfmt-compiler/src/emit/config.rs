//! Configuration for DSL emission.

/// Configuration for DSL emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Version written to the `mdl` header
    pub(crate) language_version: String,
    /// Namespaces with at least this many imported names get a wildcard import
    pub(crate) wildcard_threshold: usize,
    /// Prefix stripped from texture paths
    pub(crate) media_root: Option<String>,
    /// One indentation level
    pub(crate) indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_version: "1.2".to_string(),
            wildcard_threshold: 4,
            media_root: None,
            indent: "  ".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language version of the header line.
    pub fn language_version(mut self, value: impl Into<String>) -> Self {
        self.language_version = value.into();
        self
    }

    /// Set the import count at which a namespace is imported with `::*`.
    pub fn wildcard_threshold(mut self, value: usize) -> Self {
        self.wildcard_threshold = value;
        self
    }

    /// Set the installation media directory stripped from texture paths.
    pub fn media_root(mut self, value: Option<String>) -> Self {
        self.media_root = value;
        self
    }

    pub fn indent(mut self, value: impl Into<String>) -> Self {
        self.indent = value.into();
        self
    }
}
