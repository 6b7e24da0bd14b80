//! Schema compatibility tests
//!
//! The emitted documents must round-trip through the platform's
//! configuration schema: what we serialize is what a user could have
//! written by hand. These tests parse hand-written platform-shaped JSON
//! into our types and serialize back.

use rh_hass::{Action, EntitiesDocument, EntityBlock, HelpersDocument};
use serde_json::json;

#[test]
fn test_parse_handwritten_service_sequence() {
    let config = json!([
        {
            "service": "remote.send_command",
            "target": {"entity_id": "remote.bedroom_hub"},
            "data": {"command": "b64:JgBQAAA="}
        },
        {
            "service": "input_boolean.turn_on",
            "target": {"entity_id": ["input_boolean.bedroom_fan_state"]}
        }
    ]);

    let actions: Vec<Action> = serde_json::from_value(config).unwrap();
    assert_eq!(actions.len(), 2);
    assert!(matches!(actions[0], Action::Service(_)));
}

#[test]
fn test_parse_handwritten_choose() {
    let config = json!({
        "choose": [
            {
                "conditions": "{{ percentage | int == 0 }}",
                "sequence": [
                    {"service": "input_boolean.turn_off",
                     "target": {"entity_id": "input_boolean.fan_state"}}
                ]
            },
            {
                "conditions": "{{ percentage | int <= 50 }}",
                "sequence": [
                    {"service": "remote.send_command",
                     "data": {"command": "b64:AAA="}}
                ]
            }
        ],
        "default": [
            {"service": "remote.send_command", "data": {"command": "b64:BBB="}}
        ]
    });

    let action: Action = serde_json::from_value(config).unwrap();
    let Action::Choose(choose) = action else {
        panic!("expected a choose action");
    };
    assert_eq!(choose.choose.len(), 2);
    assert_eq!(choose.default.len(), 1);
}

#[test]
fn test_parse_handwritten_entity_block() {
    let config = json!({
        "friendly_name": "Bedroom Fan",
        "value_template": "{{ is_state('input_boolean.bedroom_fan_state', 'on') }}",
        "percentage_template": "{% if is_state('input_select.bedroom_fan_speed', 'off') %}0{% else %}{{ (states('input_select.bedroom_fan_speed') | int) * 100 // 3 }}{% endif %}",
        "speed_count": 3,
        "turn_on": [
            {"service": "remote.send_command", "data": {"command": "b64:AAA="}}
        ],
        "turn_off": [
            {"service": "remote.send_command", "data": {"command": "b64:BBB="}}
        ]
    });

    let block: EntityBlock = serde_json::from_value(config).unwrap();
    assert_eq!(block.friendly_name.as_deref(), Some("Bedroom Fan"));
    assert_eq!(block.speed_count, Some(3));
    assert_eq!(block.facet_count(), 2);
    assert!(block.set_percentage.is_empty());
}

#[test]
fn test_entities_document_round_trip() {
    let config = json!({
        "fan": {
            "bedroom_fan": {
                "value_template": "{{ is_state('input_boolean.bedroom_fan_state', 'on') }}",
                "turn_on": [{"service": "remote.send_command"}]
            }
        }
    });

    let document: EntitiesDocument = serde_json::from_value(config.clone()).unwrap();
    assert_eq!(document.len(), 1);

    let back = serde_json::to_value(&document).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_helpers_document_round_trip() {
    let config = json!({
        "input_boolean": {
            "bedroom_fan_state": {"name": "Bedroom Fan power", "initial": false}
        },
        "input_select": {
            "bedroom_fan_speed": {
                "name": "Bedroom Fan speed",
                "options": ["off", "1", "2", "3"],
                "initial": "off"
            }
        },
        "input_number": {
            "desk_lamp_brightness": {
                "name": "Desk Lamp brightness",
                "min": 0.0,
                "max": 100.0,
                "step": 1.0,
                "initial": 50.0,
                "mode": "slider"
            }
        }
    });

    let document: HelpersDocument = serde_json::from_value(config.clone()).unwrap();
    assert_eq!(document.len(), 3);

    let back = serde_json::to_value(&document).unwrap();
    assert_eq!(back, config);
}
