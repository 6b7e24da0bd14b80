//! Generated platform configuration types
//!
//! The generator emits two documents: template entity blocks and the input
//! helpers backing them. This crate defines their serde shapes; all decision
//! logic lives in `rh-engine`.

mod action;
mod entity;
mod helpers;

pub use action::{Action, ChooseAction, ChooseOption, IfAction, ServiceAction, Target};
pub use entity::{EntitiesDocument, EntityBlock};
pub use helpers::{
    HelperConfig, HelpersDocument, InputBooleanConfig, InputNumberConfig, InputSelectConfig,
};
