//! Body-rewriting transforms

use tracing::debug;

use crate::error::Result;
use crate::message::Message;
use crate::stage::{Lifecycle, Stage, StageCategory, Status, Transform};

/// Uppercases every body record
#[derive(Debug, Default)]
pub struct UpperTransform {
    lifecycle: Lifecycle,
}

impl UpperTransform {
    pub const NAME: &'static str = "upper";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for UpperTransform {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> StageCategory {
        StageCategory::Transform
    }

    fn start(&mut self) -> Result<()> {
        self.lifecycle.start(StageCategory::Transform, Self::NAME);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.lifecycle.stop(StageCategory::Transform, Self::NAME);
        Ok(())
    }

    fn status(&self) -> Status {
        self.lifecycle.status()
    }
}

impl Transform for UpperTransform {
    fn process(&mut self, mut msg: Message) -> Result<Message> {
        debug!(records = %msg.body.items.len(), "UpperTransform::process: called");
        self.lifecycle.ensure_started(StageCategory::Transform, Self::NAME)?;
        for item in msg.body.items.iter_mut() {
            *item = item.to_uppercase();
        }
        Ok(msg)
    }
}

/// Passes messages through untouched
#[derive(Debug, Default)]
pub struct NoopTransform {
    lifecycle: Lifecycle,
}

impl NoopTransform {
    pub const NAME: &'static str = "noop";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for NoopTransform {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> StageCategory {
        StageCategory::Transform
    }

    fn start(&mut self) -> Result<()> {
        self.lifecycle.start(StageCategory::Transform, Self::NAME);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.lifecycle.stop(StageCategory::Transform, Self::NAME);
        Ok(())
    }

    fn status(&self) -> Status {
        self.lifecycle.status()
    }
}

impl Transform for NoopTransform {
    fn process(&mut self, msg: Message) -> Result<Message> {
        self.lifecycle.ensure_started(StageCategory::Transform, Self::NAME)?;
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn test_upper_rewrites_every_record() {
        let mut transform = UpperTransform::new();
        transform.start().unwrap();

        let msg = Message::builder()
            .with_header_item("content", "text")
            .with_body_item("Hello World")
            .with_body_item("ümlaut")
            .build();
        let out = transform.process(msg).unwrap();

        assert_eq!(out.body.items, vec!["HELLO WORLD", "ÜMLAUT"]);
        assert_eq!(out.header_item("content"), Some("text"));
    }

    #[test]
    fn test_upper_rejects_when_stopped() {
        let mut transform = UpperTransform::new();
        let msg = Message::builder().with_body_item("x").build();

        let err = transform.process(msg).unwrap_err();
        assert!(matches!(err, PipelineError::StageNotReady { category: StageCategory::Transform, .. }));
    }

    #[test]
    fn test_noop_passes_through() {
        let mut transform = NoopTransform::new();
        transform.start().unwrap();

        let msg = Message::builder().with_body_item("Keep Me").build();
        assert_eq!(transform.process(msg.clone()).unwrap(), msg);
    }
}
