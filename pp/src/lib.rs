//! plugpipe - plugin-driven message pipeline
//!
//! A pipeline is three stages, source -> transform -> sink, whose concrete
//! implementations are picked by name from a [`PipelineConfig`] and built
//! through a [`Registry`] of constructor closures.
//!
//! # Flow
//!
//! ```text
//! Config ──> Pipeline::of ──> start() ──> exec() * N ──> stop()
//!               │
//!               └─ Registry: (category, name) -> fresh stage instance
//! ```
//!
//! # Modules
//!
//! - [`message`] - the value passed between stages
//! - [`stage`] - Source / Transform / Sink contracts and lifecycle
//! - [`registry`] - name-keyed constructors
//! - [`factory`] - per-category adapters over the registry
//! - [`pipeline`] - assembly, lifecycle and execution
//! - [`plugins`] - built-in stage implementations
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//!
//! # Example
//!
//! ```ignore
//! use plugpipe::{Pipeline, PipelineConfig, Registry};
//!
//! let registry = Registry::with_builtins();
//! let mut pipeline = Pipeline::of(&registry, &PipelineConfig::default())?;
//! pipeline.start()?;
//! pipeline.exec()?; // prints "[content=text] HELLO WORLD"
//! pipeline.stop()?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod factory;
pub mod message;
pub mod pipeline;
pub mod plugins;
pub mod registry;
pub mod stage;

// Re-export commonly used types
pub use config::{Config, PipelineConfig, PluginConfig};
pub use error::{PipelineError, Result};
pub use factory::{Factory, SinkFactory, SourceFactory, TransformFactory};
pub use message::{Body, Header, Message, MessageBuilder};
pub use pipeline::Pipeline;
pub use plugins::{ConsoleSink, Delivered, LiteralSource, MemorySink, NoopTransform, OutputFormat, UpperTransform};
pub use registry::{Constructor, Plugin, Registry};
pub use stage::{Lifecycle, Sink, Source, Stage, StageCategory, Status, Transform};
