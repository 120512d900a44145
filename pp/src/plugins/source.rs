//! Literal sources

use tracing::debug;

use crate::error::Result;
use crate::message::Message;
use crate::stage::{Lifecycle, Source, Stage, StageCategory, Status};

/// Emits the same single-record message on every receive
#[derive(Debug)]
pub struct LiteralSource {
    name: &'static str,
    text: &'static str,
    lifecycle: Lifecycle,
}

impl LiteralSource {
    pub const HELLO: &'static str = "hello";
    pub const MSG: &'static str = "msg";

    pub fn new(name: &'static str, text: &'static str) -> Self {
        Self {
            name,
            text,
            lifecycle: Lifecycle::new(),
        }
    }

    /// `hello` source: "Hello World"
    pub fn hello() -> Self {
        Self::new(Self::HELLO, "Hello World")
    }

    /// `msg` source: "Msg Send"
    pub fn msg() -> Self {
        Self::new(Self::MSG, "Msg Send")
    }
}

impl Stage for LiteralSource {
    fn name(&self) -> &str {
        self.name
    }

    fn category(&self) -> StageCategory {
        StageCategory::Source
    }

    fn start(&mut self) -> Result<()> {
        self.lifecycle.start(StageCategory::Source, self.name);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.lifecycle.stop(StageCategory::Source, self.name);
        Ok(())
    }

    fn status(&self) -> Status {
        self.lifecycle.status()
    }
}

impl Source for LiteralSource {
    fn receive(&mut self) -> Result<Message> {
        debug!(name = %self.name, "LiteralSource::receive: called");
        self.lifecycle.ensure_started(StageCategory::Source, self.name)?;
        Ok(Message::builder()
            .with_header_item("content", "text")
            .with_body_item(self.text)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn test_hello_emits_literal() {
        let mut source = LiteralSource::hello();
        source.start().unwrap();

        let msg = source.receive().unwrap();
        assert_eq!(msg.body.items, vec!["Hello World"]);
        assert_eq!(msg.header_item("content"), Some("text"));
    }

    #[test]
    fn test_msg_emits_literal() {
        let mut source = LiteralSource::msg();
        source.start().unwrap();

        assert!(source.receive().unwrap().body_contains("Msg Send"));
    }

    #[test]
    fn test_receive_while_stopped_is_rejected() {
        let mut source = LiteralSource::hello();

        let err = source.receive().unwrap_err();
        assert!(matches!(err, PipelineError::StageNotReady { category: StageCategory::Source, .. }));

        source.start().unwrap();
        source.stop().unwrap();
        assert!(source.receive().is_err());
    }
}
