//! Entity generation engine
//!
//! Turns a device's learned command set into template entity blocks plus the
//! input helpers backing them. The engine is a pure, synchronous
//! transformation: one invocation walks the device collection in order,
//! accumulates per-device problems instead of aborting, and returns the full
//! replacement output for the set.
//!
//! Pipeline, leaf-first: [`Vocabulary`] → [`classify`]/[`families`] →
//! [`SpeedMap`] → [`build`] → [`generate`].

mod assemble;
mod builder;
mod classify;
mod helpers;
mod speed;
mod vocab;

pub use assemble::{generate, Generation};
pub use builder::{build, BuiltEntity, Facet};
pub use classify::{classify, families, infer, CommandFamilies};
pub use speed::SpeedMap;
pub use vocab::{DirectionRole, PresetLevel, StepDirection, TempStep, Vocabulary};
