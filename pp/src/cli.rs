//! CLI argument parsing for plugpipe

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::plugins::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pp")]
#[command(author, version, about = "Plugin-driven source/transform/sink pipeline", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the pipeline, start it, push messages through, stop it
    Run {
        /// Number of messages to execute
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Source plugin (overrides config)
        #[arg(long)]
        source: Option<String>,

        /// Transform plugin (overrides config)
        #[arg(long)]
        transform: Option<String>,

        /// Sink plugin (overrides config)
        #[arg(long)]
        sink: Option<String>,

        /// Console sink output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List registered plugins per category
    Plugins,

    /// Print the effective configuration as YAML
    Config,
}

/// Apply `--source/--transform/--sink` overrides on top of `base`
pub fn apply_overrides(
    base: &PipelineConfig,
    source: Option<String>,
    transform: Option<String>,
    sink: Option<String>,
) -> PipelineConfig {
    let mut config = base.clone();
    if let Some(name) = source {
        config.source.name = name;
    }
    if let Some(name) = transform {
        config.transform.name = name;
    }
    if let Some(name) = sink {
        config.sink.name = name;
    }
    config
}
