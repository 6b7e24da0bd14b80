//! Device and command input model
//!
//! Devices are created and edited by the device manager; the generator reads
//! them and never writes back. Command names are the map keys, so they are
//! unique within a device by construction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Capability;

/// Transmit transport for a learned command set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// Commands learned into and replayed by a local hub.
    LocalHub,

    /// Commands resolved from an imported vendor profile.
    VendorProfile { profile: String },
}

/// Kind of radio a payload is transmitted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Infrared,
    Radio,
}

/// A learned command payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Base64 packet as captured during learning
    pub data: String,

    /// Transport tag
    pub kind: CommandKind,
}

impl Command {
    pub fn infrared(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            kind: CommandKind::Infrared,
        }
    }

    pub fn radio(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            kind: CommandKind::Radio,
        }
    }
}

/// A device with its learned command set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique key within the device collection
    pub id: String,

    /// Display name; also the source of the generated object_id
    pub name: String,

    /// Explicit capability, or `Unclassified` to request inference
    #[serde(default)]
    pub capability: Capability,

    /// How learned payloads reach the air
    pub transport: Transport,

    /// Entity id of the sending hardware (e.g. "remote.bedroom_hub")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<String>,

    /// Area the device lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Icon shown for the generated entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Command name -> learned payload
    #[serde(default)]
    pub commands: IndexMap<String, Command>,
}

impl Device {
    /// Create a device with no commands, local-hub transport and inference
    /// requested. Fields are public; adjust them directly.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capability: Capability::Unclassified,
            transport: Transport::LocalHub,
            hub: None,
            area: None,
            icon: None,
            commands: IndexMap::new(),
        }
    }

    /// Hub reference, treating an empty string as absent.
    pub fn hub_ref(&self) -> Option<&str> {
        self.hub.as_deref().filter(|h| !h.is_empty())
    }

    /// Iterate learned command names in insertion order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}
