//! plugpipe - plugin-driven message pipeline
//!
//! CLI entry point: assemble a pipeline from configuration and drive it.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use plugpipe::cli::{Cli, Command, apply_overrides};
use plugpipe::config::Config;
use plugpipe::{OutputFormat, Pipeline, PipelineConfig, Registry, StageCategory};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    // stdout belongs to the console sink
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize logging: {}", e))?;

    debug!(%level, "setup_logging: initialized");
    Ok(())
}

fn run(count: usize, pipeline_config: PipelineConfig, format: OutputFormat) -> Result<()> {
    let registry = Registry::with_console_format(format);
    let mut pipeline = Pipeline::of(&registry, &pipeline_config).context("Failed to assemble pipeline")?;

    pipeline.start().context("Failed to start pipeline")?;
    let result = pipeline.run(count);
    let stopped = pipeline.stop();
    let delivered = result.context("Pipeline execution failed")?;
    stopped.context("Failed to stop pipeline")?;

    info!(%delivered, "run complete");
    eprintln!(
        "{} Delivered {} message(s) via {} -> {} -> {}",
        "✓".green(),
        delivered,
        pipeline_config.source.name.cyan(),
        pipeline_config.transform.name.cyan(),
        pipeline_config.sink.name.cyan()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Read before logging: the file may set the log level
    let config_source = Config::locate(cli.config.as_ref());
    let config = Config::load_from(config_source.as_deref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("plugpipe starting");
    match &config_source {
        Some(path) => info!(path = %path.display(), "Loaded config"),
        None => info!("No config file found, using defaults"),
    }

    match cli.command {
        Command::Run {
            count,
            source,
            transform,
            sink,
            format,
        } => {
            let pipeline_config = apply_overrides(&config.pipeline, source, transform, sink);
            let format = format.unwrap_or(config.format);
            run(count, pipeline_config, format)?;
        }
        Command::Plugins => {
            let registry = Registry::with_console_format(config.format);
            for category in StageCategory::ALL {
                println!("{}:", category.to_string().cyan());
                for name in registry.names(category) {
                    println!("  {}", name);
                }
            }
        }
        Command::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
