//! Command classifier
//!
//! Buckets a device's command names into feature families and infers a
//! capability category for devices that carry the explicit `Unclassified`
//! tag. Fan patterns are checked before the generic on/off rule: a device
//! with "on/off" plus speed commands is a fan, not a plain switch.

use rh_core::{Capability, Device};
use tracing::debug;

use crate::vocab::{DirectionRole, PresetLevel, StepDirection, TempStep, Vocabulary};

/// A device's commands bucketed by feature family.
///
/// Each command lands in at most one family; names matching nothing are
/// ignored (the payload can still be sent manually, it just grows no entity
/// logic). Single-slot families keep the first match; later duplicates are
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct CommandFamilies {
    pub power_on: Option<String>,
    pub power_off: Option<String>,

    /// Speed commands as (ordinal, command name), in device order
    pub speeds: Vec<(u8, String)>,

    pub level_up: Option<String>,
    pub level_down: Option<String>,
    pub preset_bright: Option<String>,
    pub preset_dim: Option<String>,

    pub ct_cooler: Option<String>,
    pub ct_warmer: Option<String>,

    pub temp_up: Option<String>,
    pub temp_down: Option<String>,

    pub dir_forward: Option<String>,
    pub dir_reverse: Option<String>,
    pub dir_toggle: Option<String>,
}

impl CommandFamilies {
    pub fn has_speeds(&self) -> bool {
        !self.speeds.is_empty()
    }

    pub fn has_level_steps(&self) -> bool {
        self.level_up.is_some() || self.level_down.is_some()
    }

    pub fn has_level_presets(&self) -> bool {
        self.preset_bright.is_some() || self.preset_dim.is_some()
    }

    pub fn has_color_temp(&self) -> bool {
        self.ct_cooler.is_some() || self.ct_warmer.is_some()
    }

    pub fn has_temperature_steps(&self) -> bool {
        self.temp_up.is_some() || self.temp_down.is_some()
    }

    pub fn has_direction(&self) -> bool {
        self.dir_forward.is_some() || self.dir_reverse.is_some() || self.dir_toggle.is_some()
    }

    pub fn has_power_pair(&self) -> bool {
        self.power_on.is_some() && self.power_off.is_some()
    }
}

/// Bucket every command on a device into its feature family.
pub fn families(device: &Device, vocab: &Vocabulary) -> CommandFamilies {
    let mut families = CommandFamilies::default();

    for name in device.command_names() {
        // Speed first: fan forms like "fan_off" are filtered out by the
        // vocabulary before this match, so ordering here only decides
        // precedence between genuinely ambiguous names.
        if let Some(ordinal) = vocab.speed_ordinal(name) {
            families.speeds.push((ordinal, name.to_string()));
        } else if vocab.is_power_on(name) {
            set_once(&mut families.power_on, name, device);
        } else if vocab.is_power_off(name) {
            set_once(&mut families.power_off, name, device);
        } else if let Some(step) = vocab.level_step(name) {
            match step {
                StepDirection::Up => set_once(&mut families.level_up, name, device),
                StepDirection::Down => set_once(&mut families.level_down, name, device),
            }
        } else if let Some(preset) = vocab.level_preset(name) {
            match preset {
                PresetLevel::Bright => set_once(&mut families.preset_bright, name, device),
                PresetLevel::Dim => set_once(&mut families.preset_dim, name, device),
            }
        } else if let Some(step) = vocab.color_temp_step(name) {
            match step {
                TempStep::Cooler => set_once(&mut families.ct_cooler, name, device),
                TempStep::Warmer => set_once(&mut families.ct_warmer, name, device),
            }
        } else if let Some(step) = vocab.temperature_step(name) {
            match step {
                StepDirection::Up => set_once(&mut families.temp_up, name, device),
                StepDirection::Down => set_once(&mut families.temp_down, name, device),
            }
        } else if let Some(role) = vocab.direction_role(name) {
            match role {
                DirectionRole::Forward => set_once(&mut families.dir_forward, name, device),
                DirectionRole::Reverse => set_once(&mut families.dir_reverse, name, device),
                DirectionRole::Toggle => set_once(&mut families.dir_toggle, name, device),
            }
        } else {
            debug!(device = %device.id, command = %name, "command matches no known family");
        }
    }

    families
}

fn set_once(slot: &mut Option<String>, name: &str, device: &Device) {
    if slot.is_none() {
        *slot = Some(name.to_string());
    } else {
        debug!(device = %device.id, command = %name, "duplicate command for family, keeping first");
    }
}

/// Infer a capability from bucketed families. Fan wins over light wins over
/// switch; a device matching nothing stays `Unclassified`.
pub fn infer(families: &CommandFamilies) -> Capability {
    if families.has_speeds() {
        Capability::Fan
    } else if families.has_level_steps() || families.has_level_presets() || families.has_color_temp()
    {
        Capability::Light
    } else if families.has_power_pair() {
        Capability::Switch
    } else {
        Capability::Unclassified
    }
}

/// Classify a device. An explicit capability always wins; inference runs
/// only for `Unclassified` and never yields `Climate` (no reliable
/// command-name family exists for it).
pub fn classify(device: &Device, vocab: &Vocabulary) -> Capability {
    if device.capability.is_classified() {
        return device.capability;
    }
    infer(&families(device, vocab))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rh_core::Command;

    fn device_with(names: &[&str]) -> Device {
        let mut device = Device::new("d1", "Test Device");
        for name in names {
            device
                .commands
                .insert(name.to_string(), Command::infrared("JgBQ"));
        }
        device
    }

    #[test]
    fn test_speed_commands_infer_fan() {
        let vocab = Vocabulary::default();
        let device = device_with(&["speed_1", "speed_2", "fan_off"]);
        assert_eq!(classify(&device, &vocab), Capability::Fan);
    }

    #[test]
    fn test_fan_wins_over_switch() {
        // On/off plus speeds must not collapse into a plain switch.
        let vocab = Vocabulary::default();
        let device = device_with(&["on", "off", "speed_low", "speed_high"]);
        assert_eq!(classify(&device, &vocab), Capability::Fan);
    }

    #[test]
    fn test_brightness_infers_light() {
        let vocab = Vocabulary::default();
        assert_eq!(
            classify(&device_with(&["brightness_up", "brightness_down"]), &vocab),
            Capability::Light
        );
        assert_eq!(
            classify(&device_with(&["bright", "dim"]), &vocab),
            Capability::Light
        );
        assert_eq!(
            classify(&device_with(&["cooler", "warmer"]), &vocab),
            Capability::Light
        );
    }

    #[test]
    fn test_on_off_pair_infers_switch() {
        let vocab = Vocabulary::default();
        assert_eq!(
            classify(&device_with(&["on", "off"]), &vocab),
            Capability::Switch
        );
        // A lone "on" is not a pair
        assert_eq!(
            classify(&device_with(&["on"]), &vocab),
            Capability::Unclassified
        );
    }

    #[test]
    fn test_explicit_capability_wins() {
        let vocab = Vocabulary::default();
        let mut device = device_with(&["speed_1", "speed_2"]);
        device.capability = Capability::Light;
        assert_eq!(classify(&device, &vocab), Capability::Light);
    }

    #[test]
    fn test_climate_never_inferred() {
        let vocab = Vocabulary::default();
        let device = device_with(&["temp_up", "temp_down"]);
        assert_eq!(classify(&device, &vocab), Capability::Unclassified);
    }

    #[test]
    fn test_families_bucketing() {
        let vocab = Vocabulary::default();
        let device = device_with(&[
            "on",
            "fan_off",
            "speed_low",
            "speed_high",
            "reverse",
            "unrelated_button",
        ]);
        let families = families(&device, &vocab);

        assert_eq!(families.power_on.as_deref(), Some("on"));
        assert_eq!(families.power_off.as_deref(), Some("fan_off"));
        assert_eq!(
            families.speeds,
            vec![(1, "speed_low".to_string()), (5, "speed_high".to_string())]
        );
        assert_eq!(families.dir_reverse.as_deref(), Some("reverse"));
        assert!(families.dir_forward.is_none());
    }

    #[test]
    fn test_duplicate_family_keeps_first() {
        let vocab = Vocabulary::default();
        let device = device_with(&["off", "power_off"]);
        let families = families(&device, &vocab);
        assert_eq!(families.power_off.as_deref(), Some("off"));
    }
}
