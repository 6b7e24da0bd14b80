//! Capability category for generated entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity capability category recorded on a device.
///
/// `Unclassified` is the explicit "not yet tagged" state: devices carrying it
/// go through command-name inference. Inference is advisory only and never
/// overrides one of the classified variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Switch,
    Fan,
    Light,
    Climate,
    #[default]
    Unclassified,
}

impl Capability {
    /// Platform domain for a classified capability, `None` for `Unclassified`.
    pub fn domain(self) -> Option<&'static str> {
        match self {
            Capability::Switch => Some("switch"),
            Capability::Fan => Some("fan"),
            Capability::Light => Some("light"),
            Capability::Climate => Some("climate"),
            Capability::Unclassified => None,
        }
    }

    /// Whether this is one of the concrete categories.
    pub fn is_classified(self) -> bool {
        !matches!(self, Capability::Unclassified)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain().unwrap_or("unclassified"))
    }
}
