//! Plugin registry - name-keyed stage constructors
//!
//! The registry maps `(category, name)` to a constructor closure. Resolving a
//! name always invokes the constructor, so every pipeline gets its own stage
//! instances and never shares mutable stage state with another pipeline.
//!
//! # Registration policy
//!
//! Names are unique within a category. Registering a name that already exists
//! replaces the previous constructor (last registration wins) and logs a
//! warning. This lets an application override a built-in, e.g. swap the
//! `console` sink for one writing JSON.
//!
//! Registration takes `&mut self`: fill the registry first, then share it
//! (`&Registry` or `Arc<Registry>`) for assembly. Once shared it is read-only.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = Registry::with_builtins();
//! registry.register_sink("memory", move || Box::new(MemorySink::new(delivered.clone())));
//!
//! let source = registry.resolve_source("hello")?;
//! ```

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::plugins::{self, OutputFormat};
use crate::stage::{Sink, Source, StageCategory, Status, Transform};

pub type SourceConstructor = Box<dyn Fn() -> Box<dyn Source> + Send + Sync>;
pub type TransformConstructor = Box<dyn Fn() -> Box<dyn Transform> + Send + Sync>;
pub type SinkConstructor = Box<dyn Fn() -> Box<dyn Sink> + Send + Sync>;

/// A constructor tagged with the category it produces
pub enum Constructor {
    Source(SourceConstructor),
    Transform(TransformConstructor),
    Sink(SinkConstructor),
}

impl Constructor {
    pub fn category(&self) -> StageCategory {
        match self {
            Self::Source(_) => StageCategory::Source,
            Self::Transform(_) => StageCategory::Transform,
            Self::Sink(_) => StageCategory::Sink,
        }
    }
}

impl std::fmt::Debug for Constructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Constructor::{:?}", self.category())
    }
}

/// A live plugin instance of any category
pub enum Plugin {
    Source(Box<dyn Source>),
    Transform(Box<dyn Transform>),
    Sink(Box<dyn Sink>),
}

impl Plugin {
    pub fn category(&self) -> StageCategory {
        match self {
            Self::Source(_) => StageCategory::Source,
            Self::Transform(_) => StageCategory::Transform,
            Self::Sink(_) => StageCategory::Sink,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Source(s) => s.name(),
            Self::Transform(t) => t.name(),
            Self::Sink(s) => s.name(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Source(s) => s.status(),
            Self::Transform(t) => t.status(),
            Self::Sink(s) => s.status(),
        }
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("category", &self.category())
            .field("name", &self.name())
            .field("status", &self.status())
            .finish()
    }
}

/// Name-keyed constructors for each stage category
#[derive(Default)]
pub struct Registry {
    sources: HashMap<String, SourceConstructor>,
    transforms: HashMap<String, TransformConstructor>,
    sinks: HashMap<String, SinkConstructor>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in plugin
    pub fn with_builtins() -> Self {
        Self::with_console_format(OutputFormat::Text)
    }

    /// Built-in registry whose `console` sink renders in `format`
    pub fn with_console_format(format: OutputFormat) -> Self {
        let mut registry = Self::new();
        plugins::register_builtins(&mut registry, format);
        registry
    }

    /// Register a constructor under `name`, replacing any previous entry in
    /// the same category
    pub fn register(&mut self, name: impl Into<String>, constructor: Constructor) {
        let name = name.into();
        let category = constructor.category();
        debug!(%category, %name, "Registry::register: called");
        let replaced = match constructor {
            Constructor::Source(c) => self.sources.insert(name.clone(), c).is_some(),
            Constructor::Transform(c) => self.transforms.insert(name.clone(), c).is_some(),
            Constructor::Sink(c) => self.sinks.insert(name.clone(), c).is_some(),
        };
        if replaced {
            warn!(%category, %name, "Registry::register: replaced existing plugin");
        }
    }

    pub fn register_source<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Source> + Send + Sync + 'static,
    {
        self.register(name, Constructor::Source(Box::new(constructor)));
    }

    pub fn register_transform<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Transform> + Send + Sync + 'static,
    {
        self.register(name, Constructor::Transform(Box::new(constructor)));
    }

    pub fn register_sink<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Sink> + Send + Sync + 'static,
    {
        self.register(name, Constructor::Sink(Box::new(constructor)));
    }

    /// Build a fresh instance of `(category, name)`
    ///
    /// # Errors
    /// `PipelineError::UnknownPlugin` if nothing is registered under that name
    pub fn resolve(&self, category: StageCategory, name: &str) -> Result<Plugin> {
        debug!(%category, %name, "Registry::resolve: called");
        match category {
            StageCategory::Source => self.resolve_source(name).map(Plugin::Source),
            StageCategory::Transform => self.resolve_transform(name).map(Plugin::Transform),
            StageCategory::Sink => self.resolve_sink(name).map(Plugin::Sink),
        }
    }

    pub fn resolve_source(&self, name: &str) -> Result<Box<dyn Source>> {
        let constructor = self
            .sources
            .get(name)
            .ok_or_else(|| self.unknown(StageCategory::Source, name))?;
        Ok(constructor())
    }

    pub fn resolve_transform(&self, name: &str) -> Result<Box<dyn Transform>> {
        let constructor = self
            .transforms
            .get(name)
            .ok_or_else(|| self.unknown(StageCategory::Transform, name))?;
        Ok(constructor())
    }

    pub fn resolve_sink(&self, name: &str) -> Result<Box<dyn Sink>> {
        let constructor = self
            .sinks
            .get(name)
            .ok_or_else(|| self.unknown(StageCategory::Sink, name))?;
        Ok(constructor())
    }

    fn unknown(&self, category: StageCategory, name: &str) -> PipelineError {
        debug!(%category, %name, "Registry::resolve: unknown plugin");
        PipelineError::UnknownPlugin {
            category,
            name: name.to_string(),
            available: self.names(category),
        }
    }

    /// Check if `(category, name)` is registered
    pub fn contains(&self, category: StageCategory, name: &str) -> bool {
        match category {
            StageCategory::Source => self.sources.contains_key(name),
            StageCategory::Transform => self.transforms.contains_key(name),
            StageCategory::Sink => self.sinks.contains_key(name),
        }
    }

    /// Registered names in `category`, sorted
    pub fn names(&self, category: StageCategory) -> Vec<String> {
        let mut names: Vec<String> = match category {
            StageCategory::Source => self.sources.keys().cloned().collect(),
            StageCategory::Transform => self.transforms.keys().cloned().collect(),
            StageCategory::Sink => self.sinks.keys().cloned().collect(),
        };
        names.sort();
        names
    }

    /// Total number of registered plugins across all categories
    pub fn len(&self) -> usize {
        self.sources.len() + self.transforms.len() + self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("sources", &self.names(StageCategory::Source))
            .field("transforms", &self.names(StageCategory::Transform))
            .field("sinks", &self.names(StageCategory::Sink))
            .finish()
    }
}
