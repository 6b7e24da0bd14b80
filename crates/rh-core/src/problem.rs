//! Problem and error types reported by the generator
//!
//! Recoverable per-device conditions accumulate as [`GenerationProblem`]s so
//! one bad device never aborts generation for its siblings. Only structural
//! defects in the input collection itself surface as [`EngineError`] and fail
//! the whole invocation.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::Capability;

/// Recoverable per-device condition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProblemKind {
    #[error("device has no remote hub reference")]
    MissingHub,

    #[error("device has no learned commands")]
    NoCommands,

    #[error("command set matches no known capability")]
    Unclassifiable,

    #[error("no usable commands for a {capability} entity")]
    NoUsableCommands { capability: Capability },
}

/// A (device, reason) pair accumulated during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationProblem {
    pub device_id: String,
    pub kind: ProblemKind,
}

impl GenerationProblem {
    pub fn new(device_id: impl Into<String>, kind: ProblemKind) -> Self {
        Self {
            device_id: device_id.into(),
            kind,
        }
    }

    /// Human-readable reason string, as surfaced to the caller.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for GenerationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.device_id, self.kind)
    }
}

// Serialized as {device, reason} so the problem list reads as plain pairs in
// the output document.
impl Serialize for GenerationProblem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("GenerationProblem", 2)?;
        s.serialize_field("device", &self.device_id)?;
        s.serialize_field("reason", &self.reason())?;
        s.end()
    }
}

/// Structural defect in the input collection. Indicates the calling
/// collaborator handed over a malformed device set, not a normal edge case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("device at index {index} has an empty identifier")]
    MissingDeviceId { index: usize },

    #[error("duplicate device identifier '{id}'")]
    DuplicateDeviceId { id: String },
}
