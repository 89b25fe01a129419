//! Configuration for the builder.

use mdlfmt_core::ResolverConfig;

#[derive(Clone, Debug)]
pub struct BuildConfig {
    pub(crate) resolver: ResolverConfig,
    /// Reject calls that close with unfilled slots
    pub(crate) require_complete_calls: bool,
    /// Require the namespace enclosing a material to equal the file stem
    pub(crate) check_file_namespace: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            require_complete_calls: true,
            check_file_namespace: true,
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolver(mut self, value: ResolverConfig) -> Self {
        self.resolver = value;
        self
    }

    /// Set whether calls must fill every declared slot.
    ///
    /// Producers that drop arguments equal to their declared default need this
    /// turned off.
    pub fn require_complete_calls(mut self, value: bool) -> Self {
        self.require_complete_calls = value;
        self
    }

    /// Set whether a material's enclosing namespace is checked against the file stem.
    pub fn check_file_namespace(mut self, value: bool) -> Self {
        self.check_file_namespace = value;
        self
    }
}
