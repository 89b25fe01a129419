//! Event-driven material tree builder.
//!
//! The builder consumes the event protocol for one file at a time:
//! - `arena` - nodes of the expression under construction
//! - `frame` - the construction frame stack over those nodes
//! - `registry` - structure and enum type registrations
//! - `material` - file, material, parameter, field, temporary and annotation events
//! - `expression` - constructors, slots and leaf values
//!
//! Contract violations poison the builder: every later event fails until
//! `clear()` or the next `file_begin`.

mod arena;
mod config;
mod error;
mod expression;
mod frame;
mod material;
mod registry;
mod sink;


use mdlfmt_core::{Imports, Material, MaterialFile, Parameter, Resolver};

pub use arena::{Arena, CallOrigin, Node, NodeId};
pub use config::BuildConfig;
pub use error::{BuildError, BuildResult};
pub use frame::{Frame, FrameStack};
pub use registry::{Registry, type_key};

#[derive(Debug)]
pub struct Builder {
    config: BuildConfig,
    resolver: Resolver,
    registry: Registry,
    /// Stem of the current file.
    module: Option<String>,
    /// Materials completed in the current file.
    materials: Vec<Material>,
    material: Option<Material>,
    parameter: Option<Parameter>,
    field: Option<String>,
    temporary: Option<u32>,
    arena: Arena,
    frames: FrameStack,
    poisoned: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}

impl Builder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            resolver: Resolver::new(config.resolver.clone()),
            config,
            registry: Registry::new(),
            module: None,
            materials: Vec::new(),
            material: None,
            parameter: None,
            field: None,
            temporary: None,
            arena: Arena::new(),
            frames: FrameStack::new(),
            poisoned: false,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn frames(&self) -> &FrameStack {
        &self.frames
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn imports(&self) -> &Imports {
        self.resolver.imports()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Materials completed so far in the current file.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// `true` when no material is open and nothing is under construction.
    pub fn is_idle(&self) -> bool {
        self.material.is_none() && self.frames.is_empty() && self.arena.is_empty()
    }

    /// Hand out everything the current file produced and reset the builder.
    pub fn take_file(&mut self) -> MaterialFile {
        let (structures, enums) = self.registry.take();
        let file = MaterialFile {
            module: self.module.take(),
            materials: std::mem::take(&mut self.materials),
            structures,
            enums,
            imports: self.resolver.take_imports(),
        };
        self.clear();
        file
    }

    /// Drop all per-file state, including a poisoned state.
    pub fn clear(&mut self) {
        self.resolver.clear();
        self.registry.clear();
        self.module = None;
        self.materials.clear();
        self.material = None;
        self.parameter = None;
        self.field = None;
        self.temporary = None;
        self.arena.clear();
        self.frames.clear();
        self.poisoned = false;
    }

    /// Run one event handler, poisoning the builder on a contract violation.
    fn guarded<T>(&mut self, handler: impl FnOnce(&mut Self) -> BuildResult<T>) -> BuildResult<T> {
        if self.poisoned {
            return Err(BuildError::Poisoned);
        }
        let result = handler(self);
        if let Err(err) = &result
            && err.is_contract_violation()
        {
            tracing::debug!(error = %err, "builder poisoned");
            self.poisoned = true;
        }
        result
    }

    fn current_material(&self, event: &'static str) -> BuildResult<&Material> {
        self.material.as_ref().ok_or(BuildError::Outside {
            event,
            scope: "a material",
        })
    }

    fn current_material_mut(&mut self, event: &'static str) -> BuildResult<&mut Material> {
        self.material.as_mut().ok_or(BuildError::Outside {
            event,
            scope: "a material",
        })
    }
}
