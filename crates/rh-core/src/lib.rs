//! Core types for the remote-hub entity generator
//!
//! This crate provides the fundamental types shared by the generation
//! pipeline: EntityId, Device, Command, Capability, and the problem/error
//! types the engine reports through.

mod capability;
mod device;
mod entity_id;
mod problem;

pub use capability::Capability;
pub use device::{Command, CommandKind, Device, Transport};
pub use entity_id::{slugify, EntityId, EntityIdError};
pub use problem::{EngineError, GenerationProblem, ProblemKind};

/// Fixed helper-id suffixes, one per facet that stores state between actions.
pub mod suffixes {
    /// Power state flag (`input_boolean`)
    pub const STATE: &str = "_state";

    /// Fan speed selection (`input_select`)
    pub const SPEED: &str = "_speed";

    /// Light brightness value (`input_number`)
    pub const BRIGHTNESS: &str = "_brightness";

    /// Light color temperature value (`input_number`)
    pub const COLOR_TEMP: &str = "_color_temp";

    /// Climate target temperature value (`input_number`)
    pub const TEMPERATURE: &str = "_temperature";

    /// Fan rotation direction (`input_select`)
    pub const DIRECTION: &str = "_direction";
}
