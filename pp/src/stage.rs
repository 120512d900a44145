//! Stage capability contracts
//!
//! A pipeline is made of exactly one [`Source`], one [`Transform`] and one
//! [`Sink`]. All three share the [`Stage`] lifecycle: a stage is created
//! `Stopped`, must be started before it accepts work, and rejects work with
//! [`PipelineError::StageNotReady`] while stopped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::message::Message;

/// Lifecycle state of a stage or pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Stopped,
    Started,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Started => write!(f, "started"),
        }
    }
}

/// The three stage categories a plugin can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageCategory {
    Source,
    Transform,
    Sink,
}

impl StageCategory {
    /// All categories in data-flow order
    pub const ALL: [StageCategory; 3] = [Self::Source, Self::Transform, Self::Sink];
}

impl std::fmt::Display for StageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Transform => write!(f, "transform"),
            Self::Sink => write!(f, "sink"),
        }
    }
}

impl std::str::FromStr for StageCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" => Ok(Self::Source),
            "transform" => Ok(Self::Transform),
            "sink" => Ok(Self::Sink),
            _ => Err(format!("Unknown stage category: {}", s)),
        }
    }
}

/// Lifecycle operations shared by every stage
pub trait Stage: std::fmt::Debug + Send {
    /// Plugin name used in logs and errors
    fn name(&self) -> &str;

    /// Category this stage implements
    fn category(&self) -> StageCategory;

    /// Move to `Started`. Starting a started stage is a no-op.
    fn start(&mut self) -> Result<()>;

    /// Move to `Stopped`. Stopping a stopped stage is a no-op.
    fn stop(&mut self) -> Result<()>;

    fn status(&self) -> Status;
}

/// Produces messages
pub trait Source: Stage {
    fn receive(&mut self) -> Result<Message>;
}

/// Maps one message to another
pub trait Transform: Stage {
    fn process(&mut self, msg: Message) -> Result<Message>;
}

/// Consumes messages
pub trait Sink: Stage {
    fn send(&mut self, msg: Message) -> Result<()>;
}

/// Status bookkeeping embedded by plugins that have no start/stop side effects
#[derive(Debug, Clone, Copy, Default)]
pub struct Lifecycle {
    status: Status,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, category: StageCategory, name: &str) {
        debug!(%category, %name, from = %self.status, "Lifecycle::start: called");
        self.status = Status::Started;
    }

    pub fn stop(&mut self, category: StageCategory, name: &str) {
        debug!(%category, %name, from = %self.status, "Lifecycle::stop: called");
        self.status = Status::Stopped;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Reject work unless started
    pub fn ensure_started(&self, category: StageCategory, name: &str) -> Result<()> {
        match self.status {
            Status::Started => Ok(()),
            Status::Stopped => {
                debug!(%category, %name, "Lifecycle::ensure_started: rejecting, stage stopped");
                Err(PipelineError::not_ready(category, name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_stopped() {
        assert_eq!(Status::default(), Status::Stopped);
        assert_eq!(Lifecycle::new().status(), Status::Stopped);
    }

    #[test]
    fn test_category_display_and_parse() {
        for category in StageCategory::ALL {
            let parsed: StageCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert_eq!("SINK".parse::<StageCategory>().unwrap(), StageCategory::Sink);
        assert!("filter".parse::<StageCategory>().is_err());
    }

    #[test]
    fn test_lifecycle_rejects_when_stopped() {
        let mut lifecycle = Lifecycle::new();
        let err = lifecycle.ensure_started(StageCategory::Source, "hello").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::StageNotReady { category: StageCategory::Source, ref name } if name == "hello"
        ));

        lifecycle.start(StageCategory::Source, "hello");
        assert!(lifecycle.ensure_started(StageCategory::Source, "hello").is_ok());

        lifecycle.stop(StageCategory::Source, "hello");
        assert!(lifecycle.ensure_started(StageCategory::Source, "hello").is_err());
    }

    #[test]
    fn test_lifecycle_transitions_are_idempotent() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.start(StageCategory::Sink, "console");
        lifecycle.start(StageCategory::Sink, "console");
        assert_eq!(lifecycle.status(), Status::Started);

        lifecycle.stop(StageCategory::Sink, "console");
        lifecycle.stop(StageCategory::Sink, "console");
        assert_eq!(lifecycle.status(), Status::Stopped);
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&Status::Started).unwrap();
        assert_eq!(json, "\"started\"");

        let category: StageCategory = serde_json::from_str("\"transform\"").unwrap();
        assert_eq!(category, StageCategory::Transform);
    }
}
