/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::data_structures::InlineString;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulator errors with serialization support
///
/// Every failure is detected before an algorithm starts, so an error never
/// comes with a partial result.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Invalid input: {0}")]
    #[diagnostic(
        code(sim::invalid_input),
        help("Check collection sizes, numeric bounds, identifier uniqueness and edge references.")
    )]
    InvalidInput(InlineString),

    #[error("Unknown policy: {0}")]
    #[diagnostic(
        code(sim::unknown_policy),
        help("Scheduling: fcfs, sjf, priority, rr. Page replacement: fifo, lru, optimal.")
    )]
    UnknownPolicy(InlineString),
}

impl SimError {
    pub fn invalid_input(msg: impl Into<InlineString>) -> Self {
        SimError::InvalidInput(msg.into())
    }

    pub fn unknown_policy(msg: impl Into<InlineString>) -> Self {
        SimError::UnknownPolicy(msg.into())
    }

    /// Stable snake_case name of the error kind
    pub const fn kind(&self) -> &'static str {
        match self {
            SimError::InvalidInput(_) => "invalid_input",
            SimError::UnknownPolicy(_) => "unknown_policy",
        }
    }
}

/// Serializable error representation for API responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: InlineString,
    pub message: InlineString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<InlineString>,
}

impl SerializableError {
    pub fn new(error_type: impl Into<InlineString>, message: impl Into<InlineString>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_type: impl Into<InlineString>,
        message: impl Into<InlineString>,
        details: impl Into<InlineString>,
    ) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl From<SimError> for SerializableError {
    fn from(err: SimError) -> Self {
        let details = match &err {
            SimError::InvalidInput(d) | SimError::UnknownPolicy(d) => d.clone(),
        };
        SerializableError::with_details(err.kind(), err.to_string(), details)
    }
}
