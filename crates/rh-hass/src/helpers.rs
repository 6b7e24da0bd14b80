//! Input helper configuration types
//!
//! Helpers are the backing state variables generated entities read and
//! write: a boolean flag, a fixed option list, or a bounded number. They are
//! always derived by the engine, never user-authored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Input boolean configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBooleanConfig {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Icon (e.g., "mdi:fan")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Initial state (default: false/off)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<bool>,
}

/// Input select configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSelectConfig {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Ordered option set
    pub options: Vec<String>,

    /// Initial selection; must be one of `options`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
}

/// Input number configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputNumberConfig {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Minimum value
    pub min: f64,

    /// Maximum value
    pub max: f64,

    /// Step value (default: 1)
    #[serde(default = "default_step")]
    pub step: f64,

    /// Initial value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<f64>,

    /// Unit of measurement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<String>,

    /// Display mode (slider or box)
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_step() -> f64 {
    1.0
}

fn default_mode() -> String {
    "slider".to_string()
}

/// A helper of any shape, tagged by kind for routing into the document.
#[derive(Debug, Clone, PartialEq)]
pub enum HelperConfig {
    Boolean(InputBooleanConfig),
    Select(InputSelectConfig),
    Number(InputNumberConfig),
}

impl HelperConfig {
    /// Platform domain this helper is registered under.
    pub fn domain(&self) -> &'static str {
        match self {
            HelperConfig::Boolean(_) => "input_boolean",
            HelperConfig::Select(_) => "input_select",
            HelperConfig::Number(_) => "input_number",
        }
    }
}

/// Helpers document, grouped by helper kind.
///
/// Keys are helper object ids derived from the owning entity's object id
/// plus a fixed per-facet suffix, so re-running generation replaces entries
/// instead of duplicating them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HelpersDocument {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub input_boolean: IndexMap<String, InputBooleanConfig>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub input_select: IndexMap<String, InputSelectConfig>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub input_number: IndexMap<String, InputNumberConfig>,
}

impl HelpersDocument {
    pub fn is_empty(&self) -> bool {
        self.input_boolean.is_empty()
            && self.input_select.is_empty()
            && self.input_number.is_empty()
    }

    pub fn len(&self) -> usize {
        self.input_boolean.len() + self.input_select.len() + self.input_number.len()
    }

    /// Route a helper into its kind group, replacing any previous entry
    /// under the same id.
    pub fn insert(&mut self, id: impl Into<String>, helper: HelperConfig) {
        let id = id.into();
        match helper {
            HelperConfig::Boolean(config) => {
                self.input_boolean.insert(id, config);
            }
            HelperConfig::Select(config) => {
                self.input_select.insert(id, config);
            }
            HelperConfig::Number(config) => {
                self.input_number.insert(id, config);
            }
        }
    }

    /// Whether any group contains the given helper id.
    pub fn contains(&self, id: &str) -> bool {
        self.input_boolean.contains_key(id)
            || self.input_select.contains_key(id)
            || self.input_number.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_number_defaults_on_deserialize() {
        let config: InputNumberConfig =
            serde_json::from_value(json!({"min": 0, "max": 100})).unwrap();
        assert_eq!(config.step, 1.0);
        assert_eq!(config.mode, "slider");
        assert_eq!(config.initial, None);
    }

    #[test]
    fn test_select_serializes_options_in_order() {
        let config = InputSelectConfig {
            name: None,
            icon: None,
            options: vec!["off".into(), "1".into(), "2".into(), "3".into()],
            initial: Some("off".into()),
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["options"], json!(["off", "1", "2", "3"]));
    }

    #[test]
    fn test_document_routes_by_kind() {
        let mut doc = HelpersDocument::default();
        doc.insert(
            "bedroom_fan_state",
            HelperConfig::Boolean(InputBooleanConfig {
                name: Some("Bedroom Fan state".into()),
                icon: None,
                initial: Some(false),
            }),
        );
        doc.insert(
            "bedroom_fan_brightness",
            HelperConfig::Number(InputNumberConfig {
                name: None,
                icon: None,
                min: 0.0,
                max: 100.0,
                step: 1.0,
                initial: Some(50.0),
                unit_of_measurement: None,
                mode: "slider".into(),
            }),
        );

        assert_eq!(doc.len(), 2);
        assert!(doc.contains("bedroom_fan_state"));
        assert!(doc.input_boolean.contains_key("bedroom_fan_state"));
        assert!(doc.input_number.contains_key("bedroom_fan_brightness"));
        assert!(doc.input_select.is_empty());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut doc = HelpersDocument::default();
        for initial in [false, true] {
            doc.insert(
                "fan_state",
                HelperConfig::Boolean(InputBooleanConfig {
                    name: None,
                    icon: None,
                    initial: Some(initial),
                }),
            );
        }
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.input_boolean["fan_state"].initial, Some(true));
    }

    #[test]
    fn test_empty_groups_skipped_in_yaml() {
        let mut doc = HelpersDocument::default();
        doc.insert(
            "fan_state",
            HelperConfig::Boolean(InputBooleanConfig {
                name: None,
                icon: None,
                initial: Some(false),
            }),
        );

        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert!(yaml.contains("input_boolean:"));
        assert!(!yaml.contains("input_select"));
        assert!(!yaml.contains("input_number"));
    }
}
