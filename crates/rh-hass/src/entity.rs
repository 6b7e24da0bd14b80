//! Generated template entity blocks
//!
//! One block per entity, grouped into the document by capability domain.
//! Every facet is optional; a block with zero action facets is invalid and
//! the engine never emits one.

use indexmap::IndexMap;
use rh_core::Capability;
use serde::{Deserialize, Serialize};

use crate::Action;

/// One generated template entity.
///
/// Templates are emitted as strings for the platform to evaluate; the
/// generator itself never renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityBlock {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    /// Icon template (literal icon name wrapped for the schema)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_template: Option<String>,

    /// State-derivation expression; reads the power-state helper
    pub value_template: String,

    /// Current speed as a percentage (fans)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_template: Option<String>,

    /// Current brightness level (lights)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_template: Option<String>,

    /// Current color/target temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_template: Option<String>,

    /// Current rotation direction (fans)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_template: Option<String>,

    /// Number of distinct speeds a fan supports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub turn_on: Vec<Action>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub turn_off: Vec<Action>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_percentage: Vec<Action>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_level: Vec<Action>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_temperature: Vec<Action>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_direction: Vec<Action>,
}

impl EntityBlock {
    /// Create a block with only its state expression set.
    pub fn new(value_template: impl Into<String>) -> Self {
        Self {
            friendly_name: None,
            icon_template: None,
            value_template: value_template.into(),
            percentage_template: None,
            level_template: None,
            temperature_template: None,
            direction_template: None,
            speed_count: None,
            turn_on: Vec::new(),
            turn_off: Vec::new(),
            set_percentage: Vec::new(),
            set_level: Vec::new(),
            set_temperature: Vec::new(),
            set_direction: Vec::new(),
        }
    }

    /// Number of action facets with at least one step.
    pub fn facet_count(&self) -> usize {
        [
            &self.turn_on,
            &self.turn_off,
            &self.set_percentage,
            &self.set_level,
            &self.set_temperature,
            &self.set_direction,
        ]
        .iter()
        .filter(|seq| !seq.is_empty())
        .count()
    }
}

/// Entities document, one group per capability domain, keyed by object id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitiesDocument {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub switch: IndexMap<String, EntityBlock>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fan: IndexMap<String, EntityBlock>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub light: IndexMap<String, EntityBlock>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub climate: IndexMap<String, EntityBlock>,
}

impl EntitiesDocument {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.switch.len() + self.fan.len() + self.light.len() + self.climate.len()
    }

    /// Insert a block under its capability group. Returns false (and leaves
    /// the document untouched) for `Unclassified`, which has no group.
    pub fn insert(
        &mut self,
        capability: Capability,
        object_id: impl Into<String>,
        block: EntityBlock,
    ) -> bool {
        let group = match capability {
            Capability::Switch => &mut self.switch,
            Capability::Fan => &mut self.fan,
            Capability::Light => &mut self.light,
            Capability::Climate => &mut self.climate,
            Capability::Unclassified => return false,
        };
        group.insert(object_id.into(), block);
        true
    }

    /// Look up a block by capability and object id.
    pub fn get(&self, capability: Capability, object_id: &str) -> Option<&EntityBlock> {
        match capability {
            Capability::Switch => self.switch.get(object_id),
            Capability::Fan => self.fan.get(object_id),
            Capability::Light => self.light.get(object_id),
            Capability::Climate => self.climate.get(object_id),
            Capability::Unclassified => None,
        }
    }
}
