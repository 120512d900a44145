//! Pipeline - one source, one transform, one sink
//!
//! # Lifecycle
//!
//! ```text
//! of() ──> Stopped ──start()──> Started ──stop()──> Stopped
//! ```
//!
//! `start()` brings stages up sink first, then transform, then source, so
//! nothing is emitted before its consumer is ready. `stop()` uses the same
//! order. Both are no-ops when the pipeline is already in the target state.
//!
//! The stages are owned privately and only change state through these calls,
//! so [`Pipeline::status`] always agrees with every stage's own status.
//!
//! # Stopped policy
//!
//! `exec()` on a stopped pipeline fails with `StageNotReady` naming the
//! source. Each stage enforces the same rule on its own when called directly.

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::factory::Factory;
use crate::registry::Registry;
use crate::stage::{Sink, Source, Stage, StageCategory, Status, Transform};

/// An assembled source -> transform -> sink chain
#[derive(Debug)]
pub struct Pipeline {
    status: Status,
    config: PipelineConfig,
    source: Box<dyn Source>,
    transform: Box<dyn Transform>,
    sink: Box<dyn Sink>,
}

impl Pipeline {
    /// Assemble a pipeline from `config`, resolving each stage through the
    /// registry's factories
    ///
    /// All-or-nothing: the first unknown plugin is returned as an error and
    /// no pipeline is produced.
    pub fn of(registry: &Registry, config: &PipelineConfig) -> Result<Self> {
        debug!(?config, "Pipeline::of: called");
        let source = registry.source_factory().create(&config.source)?;
        let transform = registry.transform_factory().create(&config.transform)?;
        let sink = registry.sink_factory().create(&config.sink)?;

        info!(
            source = %config.source.name,
            transform = %config.transform.name,
            sink = %config.sink.name,
            "Pipeline assembled"
        );
        Ok(Self {
            status: Status::Stopped,
            config: config.clone(),
            source,
            transform,
            sink,
        })
    }

    /// Start every stage, sink first
    ///
    /// If a stage fails to start, the stages already started are stopped
    /// again and the pipeline stays `Stopped`.
    pub fn start(&mut self) -> Result<()> {
        debug!(status = %self.status, "Pipeline::start: called");
        if self.status == Status::Started {
            debug!("Pipeline::start: already started");
            return Ok(());
        }

        if let Err(e) = self.sink.start() {
            rollback(self.sink.as_mut());
            return Err(e);
        }
        if let Err(e) = self.transform.start() {
            rollback(self.transform.as_mut());
            rollback(self.sink.as_mut());
            return Err(e);
        }
        if let Err(e) = self.source.start() {
            rollback(self.source.as_mut());
            rollback(self.transform.as_mut());
            rollback(self.sink.as_mut());
            return Err(e);
        }

        self.status = Status::Started;
        info!("Pipeline started");
        Ok(())
    }

    /// Stop every stage, sink first
    ///
    /// Every stage is asked to stop even if an earlier one fails; the first
    /// failure is returned. The pipeline ends `Stopped` either way.
    pub fn stop(&mut self) -> Result<()> {
        debug!(status = %self.status, "Pipeline::stop: called");
        if self.status == Status::Stopped {
            debug!("Pipeline::stop: already stopped");
            return Ok(());
        }

        let results = [self.sink.stop(), self.transform.stop(), self.source.stop()];
        self.status = Status::Stopped;
        info!("Pipeline stopped");

        results.into_iter().collect::<Result<Vec<()>>>().map(|_| ())
    }

    /// Move one message from source through transform into sink
    pub fn exec(&mut self) -> Result<()> {
        debug!("Pipeline::exec: called");
        if self.status != Status::Started {
            debug!("Pipeline::exec: rejecting, pipeline stopped");
            return Err(PipelineError::not_ready(
                StageCategory::Source,
                self.config.source.name.clone(),
            ));
        }

        let msg = self.source.receive()?;
        let msg = self.transform.process(msg)?;
        self.sink.send(msg)
    }

    /// Call [`exec`](Self::exec) `count` times, stopping at the first error
    pub fn run(&mut self, count: usize) -> Result<usize> {
        debug!(%count, "Pipeline::run: called");
        for _ in 0..count {
            self.exec()?;
        }
        Ok(count)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Status reported by each stage, in data-flow order
    pub fn stage_statuses(&self) -> [(StageCategory, Status); 3] {
        [
            (self.source.category(), self.source.status()),
            (self.transform.category(), self.transform.status()),
            (self.sink.category(), self.sink.status()),
        ]
    }

    /// Configuration this pipeline was assembled from
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

}

/// Stop a stage after a failed start; its own stop error is only logged
fn rollback<S: Stage + ?Sized>(stage: &mut S) {
    if let Err(e) = stage.stop() {
        warn!(
            category = %stage.category(),
            name = %stage.name(),
            error = %e,
            "Pipeline::start: rollback stop failed"
        );
    }
}
