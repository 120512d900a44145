//! Sinks: console output and in-memory capture

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::message::Message;
use crate::stage::{Lifecycle, Sink, Stage, StageCategory, Status};

/// How the console sink renders a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[key=value ...] record, record`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes each delivered message as one line
pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    format: OutputFormat,
    lifecycle: Lifecycle,
}

impl ConsoleSink {
    pub const NAME: &'static str = "console";

    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(Box::new(std::io::stdout()), format)
    }

    fn render(&self, msg: &Message) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(render_text(msg)),
            OutputFormat::Json => {
                serde_json::to_string(msg).map_err(|e| PipelineError::failed(StageCategory::Sink, Self::NAME, e))
            }
        }
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("format", &self.format)
            .field("status", &self.lifecycle.status())
            .finish()
    }
}

fn render_text(msg: &Message) -> String {
    let header = msg
        .header
        .items
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{}] {}", header, msg.body.items.join(", "))
}

impl Stage for ConsoleSink {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> StageCategory {
        StageCategory::Sink
    }

    fn start(&mut self) -> Result<()> {
        self.lifecycle.start(StageCategory::Sink, Self::NAME);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let was_started = self.lifecycle.status() == Status::Started;
        // Always end up stopped, even if the final flush fails
        self.lifecycle.stop(StageCategory::Sink, Self::NAME);
        if was_started {
            self.writer
                .flush()
                .map_err(|e| PipelineError::failed(StageCategory::Sink, Self::NAME, e))?;
        }
        Ok(())
    }

    fn status(&self) -> Status {
        self.lifecycle.status()
    }
}

impl Sink for ConsoleSink {
    fn send(&mut self, msg: Message) -> Result<()> {
        debug!(format = ?self.format, "ConsoleSink::send: called");
        self.lifecycle.ensure_started(StageCategory::Sink, Self::NAME)?;
        let line = self.render(&msg)?;
        writeln!(self.writer, "{}", line).map_err(|e| PipelineError::failed(StageCategory::Sink, Self::NAME, e))
    }
}

/// Shared handle to the messages a [`MemorySink`] has received
#[derive(Debug, Clone, Default)]
pub struct Delivered(Arc<Mutex<Vec<Message>>>);

impl Delivered {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far
    pub fn messages(&self) -> Vec<Message> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, msg: Message) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).push(msg);
    }
}

/// Records delivered messages into a [`Delivered`] handle
///
/// Not registered by default; register it with a constructor that clones the
/// handle you want to observe.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Delivered,
    lifecycle: Lifecycle,
}

impl MemorySink {
    pub const NAME: &'static str = "memory";

    pub fn new(delivered: Delivered) -> Self {
        Self {
            delivered,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl Stage for MemorySink {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> StageCategory {
        StageCategory::Sink
    }

    fn start(&mut self) -> Result<()> {
        self.lifecycle.start(StageCategory::Sink, Self::NAME);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.lifecycle.stop(StageCategory::Sink, Self::NAME);
        Ok(())
    }

    fn status(&self) -> Status {
        self.lifecycle.status()
    }
}

impl Sink for MemorySink {
    fn send(&mut self, msg: Message) -> Result<()> {
        self.lifecycle.ensure_started(StageCategory::Sink, Self::NAME)?;
        self.delivered.push(msg);
        Ok(())
    }
}
