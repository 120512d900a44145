//! Per-category factories over a [`Registry`]
//!
//! A factory is a borrowed view of the registry scoped to one category. It
//! turns a [`PluginConfig`] into a live stage instance.

use tracing::debug;

use crate::config::PluginConfig;
use crate::error::Result;
use crate::registry::Registry;
use crate::stage::{Sink, Source, StageCategory, Transform};

/// Creates stage instances of a single category from configuration
pub trait Factory {
    type Output;

    fn category(&self) -> StageCategory;

    /// Resolve `conf.name` into a new instance
    fn create(&self, conf: &PluginConfig) -> Result<Self::Output>;
}

#[derive(Debug, Clone, Copy)]
pub struct SourceFactory<'r> {
    registry: &'r Registry,
}

#[derive(Debug, Clone, Copy)]
pub struct TransformFactory<'r> {
    registry: &'r Registry,
}

#[derive(Debug, Clone, Copy)]
pub struct SinkFactory<'r> {
    registry: &'r Registry,
}

impl Factory for SourceFactory<'_> {
    type Output = Box<dyn Source>;

    fn category(&self) -> StageCategory {
        StageCategory::Source
    }

    fn create(&self, conf: &PluginConfig) -> Result<Self::Output> {
        debug!(name = %conf.name, "SourceFactory::create: called");
        self.registry.resolve_source(&conf.name)
    }
}

impl Factory for TransformFactory<'_> {
    type Output = Box<dyn Transform>;

    fn category(&self) -> StageCategory {
        StageCategory::Transform
    }

    fn create(&self, conf: &PluginConfig) -> Result<Self::Output> {
        debug!(name = %conf.name, "TransformFactory::create: called");
        self.registry.resolve_transform(&conf.name)
    }
}

impl Factory for SinkFactory<'_> {
    type Output = Box<dyn Sink>;

    fn category(&self) -> StageCategory {
        StageCategory::Sink
    }

    fn create(&self, conf: &PluginConfig) -> Result<Self::Output> {
        debug!(name = %conf.name, "SinkFactory::create: called");
        self.registry.resolve_sink(&conf.name)
    }
}

impl Registry {
    pub fn source_factory(&self) -> SourceFactory<'_> {
        SourceFactory { registry: self }
    }

    pub fn transform_factory(&self) -> TransformFactory<'_> {
        TransformFactory { registry: self }
    }

    pub fn sink_factory(&self) -> SinkFactory<'_> {
        SinkFactory { registry: self }
    }
}
