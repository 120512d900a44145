//! Pipeline error types

use thiserror::Error;

use crate::stage::StageCategory;

/// Errors raised while assembling or driving a pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unknown {category} plugin '{name}', available: [{}]", .available.join(", "))]
    UnknownPlugin {
        category: StageCategory,
        name: String,
        available: Vec<String>,
    },

    #[error("{category} plugin '{name}' is not started")]
    StageNotReady { category: StageCategory, name: String },

    #[error("{category} plugin '{name}' failed: {reason}")]
    StageFailed {
        category: StageCategory,
        name: String,
        reason: String,
    },
}

impl PipelineError {
    pub fn not_ready(category: StageCategory, name: impl Into<String>) -> Self {
        Self::StageNotReady {
            category,
            name: name.into(),
        }
    }

    pub fn failed(category: StageCategory, name: impl Into<String>, reason: impl ToString) -> Self {
        Self::StageFailed {
            category,
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Category of the stage the error refers to
    pub fn category(&self) -> StageCategory {
        match self {
            Self::UnknownPlugin { category, .. }
            | Self::StageNotReady { category, .. }
            | Self::StageFailed { category, .. } => *category,
        }
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, PipelineError>;
