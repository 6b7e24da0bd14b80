//! Emitted script-action types
//!
//! The generator builds every entity action as a typed tree of these values
//! and serializes it into the platform's script schema. Only the action forms
//! the builder actually emits are modeled: service calls, choose branches and
//! if/else. Conditions are always template strings here; the generated logic
//! never needs structured condition objects.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field that can be either a single string or an array of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        String(String),
        Vec(Vec<String>),
    }

    match StringOrVec::deserialize(deserializer)? {
        StringOrVec::String(s) => Ok(vec![s]),
        StringOrVec::Vec(v) => Ok(v),
    }
}

/// Target specification for service calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Target {
    /// Target entity IDs
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_or_vec"
    )]
    pub entity_id: Vec<String>,
}

impl Target {
    pub fn entity(id: impl Into<String>) -> Self {
        Self {
            entity_id: vec![id.into()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entity_id.is_empty()
    }
}

/// One step in a generated action sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    /// Call a service
    Service(ServiceAction),

    /// Conditional branching, first matching option wins
    Choose(ChooseAction),

    /// If/then/else
    If(IfAction),
}

impl Action {
    /// Shorthand for a bare service call with no target or data.
    pub fn service(service: impl Into<String>) -> Self {
        Action::Service(ServiceAction::new(service))
    }

    /// Shorthand for a choose with the given options and no default.
    pub fn choose(options: Vec<ChooseOption>) -> Self {
        Action::Choose(ChooseAction {
            choose: options,
            default: Vec::new(),
        })
    }

    /// Shorthand for an if/then/else block.
    pub fn if_else(condition: impl Into<String>, then: Vec<Action>, r#else: Vec<Action>) -> Self {
        Action::If(IfAction {
            r#if: condition.into(),
            then,
            r#else,
        })
    }
}

/// Service call action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAction {
    /// Service to call (e.g., "remote.send_command")
    pub service: String,

    /// Target entities
    #[serde(default, skip_serializing_if = "Target::is_empty")]
    pub target: Target,

    /// Service data; ordered so output is deterministic
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub data: IndexMap<String, serde_json::Value>,
}

impl ServiceAction {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            target: Target::default(),
            data: IndexMap::new(),
        }
    }

    pub fn target_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.target.entity_id.push(entity_id.into());
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

impl From<ServiceAction> for Action {
    fn from(action: ServiceAction) -> Self {
        Action::Service(action)
    }
}

/// Choose action (if/elseif/else over template conditions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChooseAction {
    /// Choices, evaluated in order
    pub choose: Vec<ChooseOption>,

    /// Sequence to run when no condition matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default: Vec<Action>,
}

/// A single option in a choose action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChooseOption {
    /// Template condition that must render true
    pub conditions: String,

    /// Actions to execute if the condition matches
    pub sequence: Vec<Action>,
}

impl ChooseOption {
    pub fn new(conditions: impl Into<String>, sequence: Vec<Action>) -> Self {
        Self {
            conditions: conditions.into(),
            sequence,
        }
    }
}

/// If action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfAction {
    /// Template condition to evaluate
    pub r#if: String,

    /// Actions if the condition is true
    pub then: Vec<Action>,

    /// Actions if the condition is false
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub r#else: Vec<Action>,
}
