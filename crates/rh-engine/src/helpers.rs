//! Helper synthesizer
//!
//! Builds the input helper backing each facet the entity builder emits.
//! The builder calls these as it folds over facet slots, so the helper set
//! always matches the actions that read and write it: no extras, no
//! omissions.

use rh_hass::{HelperConfig, InputBooleanConfig, InputNumberConfig, InputSelectConfig};

/// Boolean power-state flag, initial off.
pub fn power_helper(device_name: &str) -> HelperConfig {
    HelperConfig::Boolean(InputBooleanConfig {
        name: Some(format!("{device_name} power")),
        icon: None,
        initial: Some(false),
    })
}

/// Speed selection: "off" plus the sequential indexes 1..=N. The options
/// are always contiguous even when the learned ordinals are not; mapping
/// back to commands goes through the speed map.
pub fn speed_helper(device_name: &str, count: usize) -> HelperConfig {
    let mut options = Vec::with_capacity(count + 1);
    options.push("off".to_string());
    options.extend((1..=count).map(|index| index.to_string()));

    HelperConfig::Select(InputSelectConfig {
        name: Some(format!("{device_name} speed")),
        icon: None,
        options,
        initial: Some("off".to_string()),
    })
}

/// Brightness value, 0-100.
pub fn brightness_helper(device_name: &str) -> HelperConfig {
    HelperConfig::Number(InputNumberConfig {
        name: Some(format!("{device_name} brightness")),
        icon: None,
        min: 0.0,
        max: 100.0,
        step: 1.0,
        initial: Some(50.0),
        unit_of_measurement: None,
        mode: "slider".to_string(),
    })
}

/// Color temperature in mireds, 153-500, starting mid-range.
pub fn color_temp_helper(device_name: &str) -> HelperConfig {
    HelperConfig::Number(InputNumberConfig {
        name: Some(format!("{device_name} color temperature")),
        icon: None,
        min: 153.0,
        max: 500.0,
        step: 1.0,
        initial: Some(326.0),
        unit_of_measurement: Some("mired".to_string()),
        mode: "slider".to_string(),
    })
}

/// Climate target temperature in degrees Celsius.
pub fn temperature_helper(device_name: &str) -> HelperConfig {
    HelperConfig::Number(InputNumberConfig {
        name: Some(format!("{device_name} target temperature")),
        icon: None,
        min: 16.0,
        max: 30.0,
        step: 1.0,
        initial: Some(22.0),
        unit_of_measurement: Some("°C".to_string()),
        mode: "slider".to_string(),
    })
}

/// Rotation direction, forward/reverse.
pub fn direction_helper(device_name: &str) -> HelperConfig {
    HelperConfig::Select(InputSelectConfig {
        name: Some(format!("{device_name} direction")),
        icon: None,
        options: vec!["forward".to_string(), "reverse".to_string()],
        initial: Some("forward".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_helper_starts_off() {
        let HelperConfig::Boolean(config) = power_helper("Bedroom Fan") else {
            panic!("expected boolean helper");
        };
        assert_eq!(config.initial, Some(false));
        assert_eq!(config.name.as_deref(), Some("Bedroom Fan power"));
    }

    #[test]
    fn test_speed_helper_options_are_sequential() {
        let HelperConfig::Select(config) = speed_helper("Fan", 3) else {
            panic!("expected select helper");
        };
        assert_eq!(config.options, vec!["off", "1", "2", "3"]);
        assert_eq!(config.initial.as_deref(), Some("off"));
    }

    #[test]
    fn test_numeric_helper_ranges() {
        let HelperConfig::Number(brightness) = brightness_helper("Lamp") else {
            panic!("expected number helper");
        };
        assert_eq!((brightness.min, brightness.max), (0.0, 100.0));
        assert_eq!(brightness.initial, Some(50.0));

        let HelperConfig::Number(color_temp) = color_temp_helper("Lamp") else {
            panic!("expected number helper");
        };
        assert_eq!((color_temp.min, color_temp.max), (153.0, 500.0));
        assert_eq!(color_temp.initial, Some(326.0));

        let HelperConfig::Number(temperature) = temperature_helper("AC") else {
            panic!("expected number helper");
        };
        assert_eq!((temperature.min, temperature.max), (16.0, 30.0));
        assert_eq!(temperature.initial, Some(22.0));
    }

    #[test]
    fn test_direction_helper_defaults_forward() {
        let HelperConfig::Select(config) = direction_helper("Fan") else {
            panic!("expected select helper");
        };
        assert_eq!(config.options, vec!["forward", "reverse"]);
        assert_eq!(config.initial.as_deref(), Some("forward"));
    }
}
