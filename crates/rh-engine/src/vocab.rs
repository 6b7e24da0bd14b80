//! Command-name vocabulary
//!
//! The classifier and mapper consult an injected vocabulary instead of
//! hard-coded tables, so tests (and non-English command sets) can supply
//! their own. Lookups normalize names first: lowercase, with dashes and
//! spaces mapped to underscores, so `speed_lowMedium` and `speed_low-medium`
//! resolve the same way.

use regex::Regex;
use std::collections::HashMap;

/// Direction of an incremental step command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Preset brightness level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetLevel {
    Bright,
    Dim,
}

/// Direction of a color-temperature step, in mireds (cooler = lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempStep {
    Cooler,
    Warmer,
}

/// Role a direction command plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionRole {
    Forward,
    Reverse,
    /// A single command that flips between the two
    Toggle,
}

/// Versioned lookup tables for command-name interpretation.
///
/// All list fields hold normalized names. Start from [`Vocabulary::default`]
/// and edit the public fields to inject a custom vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Table version, bumped whenever entries change meaning
    pub version: u32,

    /// Speed synonym -> ordinal (underscores stripped before lookup)
    pub speed_synonyms: HashMap<String, u8>,

    pub power_on: Vec<String>,
    pub power_off: Vec<String>,

    pub level_up: Vec<String>,
    pub level_down: Vec<String>,
    pub preset_bright: Vec<String>,
    pub preset_dim: Vec<String>,

    pub ct_cooler: Vec<String>,
    pub ct_warmer: Vec<String>,

    pub temp_up: Vec<String>,
    pub temp_down: Vec<String>,

    pub dir_forward: Vec<String>,
    pub dir_reverse: Vec<String>,
    pub dir_toggle: Vec<String>,

    speed_pattern: Regex,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Vocabulary {
    /// The built-in table, version 1.
    pub fn builtin() -> Self {
        let speed_synonyms = [
            ("low", 1),
            ("lowmedium", 2),
            ("medium", 3),
            ("mediumhigh", 4),
            ("high", 5),
        ]
        .into_iter()
        .map(|(name, ordinal)| (name.to_string(), ordinal))
        .collect();

        Self {
            version: 1,
            speed_synonyms,
            power_on: strings(&["on", "power_on", "turn_on", "power"]),
            power_off: strings(&["off", "power_off", "turn_off", "fan_off", "speed_off"]),
            level_up: strings(&["brightness_up", "level_up"]),
            level_down: strings(&["brightness_down", "level_down"]),
            preset_bright: strings(&["bright"]),
            preset_dim: strings(&["dim"]),
            ct_cooler: strings(&["cooler"]),
            ct_warmer: strings(&["warmer"]),
            temp_up: strings(&["temp_up", "temperature_up"]),
            temp_down: strings(&["temp_down", "temperature_down"]),
            dir_forward: strings(&["forward", "direction_forward"]),
            dir_reverse: strings(&["reverse", "direction_reverse"]),
            dir_toggle: strings(&["direction"]),
            // speed_3, speed3, fan_2: numbered speed and directional-fan forms
            speed_pattern: Regex::new(r"^(?:speed|fan)_?([0-9]{1,2})$")
                .expect("builtin speed pattern is valid"),
        }
    }

    /// Resolve a command name to a speed ordinal, either numerically
    /// (`speed_3`, `fan_2`) or through the synonym table (`speed_low`,
    /// `lowMedium`, `high`). Returns `None` for everything else, including
    /// off-style names.
    pub fn speed_ordinal(&self, name: &str) -> Option<u8> {
        let name = normalize(name);

        if let Some(captures) = self.speed_pattern.captures(&name) {
            let ordinal: u8 = captures[1].parse().ok()?;
            return (ordinal > 0).then_some(ordinal);
        }

        let rest = name
            .strip_prefix("speed_")
            .or_else(|| name.strip_prefix("fan_"))
            .unwrap_or(&name);
        let key: String = rest.chars().filter(|c| *c != '_').collect();
        self.speed_synonyms.get(&key).copied()
    }

    pub fn is_power_on(&self, name: &str) -> bool {
        self.power_on.contains(&normalize(name))
    }

    pub fn is_power_off(&self, name: &str) -> bool {
        self.power_off.contains(&normalize(name))
    }

    pub fn level_step(&self, name: &str) -> Option<StepDirection> {
        let name = normalize(name);
        if self.level_up.contains(&name) {
            Some(StepDirection::Up)
        } else if self.level_down.contains(&name) {
            Some(StepDirection::Down)
        } else {
            None
        }
    }

    pub fn level_preset(&self, name: &str) -> Option<PresetLevel> {
        let name = normalize(name);
        if self.preset_bright.contains(&name) {
            Some(PresetLevel::Bright)
        } else if self.preset_dim.contains(&name) {
            Some(PresetLevel::Dim)
        } else {
            None
        }
    }

    pub fn color_temp_step(&self, name: &str) -> Option<TempStep> {
        let name = normalize(name);
        if self.ct_cooler.contains(&name) {
            Some(TempStep::Cooler)
        } else if self.ct_warmer.contains(&name) {
            Some(TempStep::Warmer)
        } else {
            None
        }
    }

    pub fn temperature_step(&self, name: &str) -> Option<StepDirection> {
        let name = normalize(name);
        if self.temp_up.contains(&name) {
            Some(StepDirection::Up)
        } else if self.temp_down.contains(&name) {
            Some(StepDirection::Down)
        } else {
            None
        }
    }

    pub fn direction_role(&self, name: &str) -> Option<DirectionRole> {
        let name = normalize(name);
        if self.dir_forward.contains(&name) {
            Some(DirectionRole::Forward)
        } else if self.dir_reverse.contains(&name) {
            Some(DirectionRole::Reverse)
        } else if self.dir_toggle.contains(&name) {
            Some(DirectionRole::Toggle)
        } else {
            None
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
