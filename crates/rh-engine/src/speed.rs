//! Speed mapper
//!
//! Resolves a fan's speed-family commands into an ascending ordinal scale
//! and a percentage banding function. The ordinal list is whatever was
//! actually learned and may be non-contiguous (`[1, 3, 5]` when the user
//! taught low/medium/high); the option-list helper is backed by a separate
//! strictly sequential index `1..=N`. Command lookup always goes sequential
//! index → actual ordinal → command name; indexing commands by the
//! sequential position directly silently drops middle speeds on gapped
//! scales.

use std::collections::HashMap;
use tracing::debug;

/// An ordered speed scale recovered from command names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedMap {
    /// Actual ordinals, ascending, deduplicated
    ordinals: Vec<u8>,

    /// Ordinal -> originating command name
    commands: HashMap<u8, String>,
}

impl SpeedMap {
    /// Build a map from `(ordinal, command name)` pairs as bucketed by the
    /// classifier. Returns `None` when the family is empty. Duplicate
    /// ordinals keep the first command seen.
    pub fn resolve(speeds: &[(u8, String)]) -> Option<Self> {
        if speeds.is_empty() {
            return None;
        }

        let mut commands: HashMap<u8, String> = HashMap::new();
        for (ordinal, name) in speeds {
            if commands.contains_key(ordinal) {
                debug!(command = %name, ordinal, "duplicate speed ordinal, keeping first command");
            } else {
                commands.insert(*ordinal, name.clone());
            }
        }

        let mut ordinals: Vec<u8> = commands.keys().copied().collect();
        ordinals.sort_unstable();

        Some(Self { ordinals, commands })
    }

    /// Number of distinct speeds.
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// The actual ordinals, ascending.
    pub fn ordinals(&self) -> &[u8] {
        &self.ordinals
    }

    /// Actual ordinal at a 1-based sequential index.
    pub fn ordinal_at(&self, index: usize) -> Option<u8> {
        (1..=self.len()).contains(&index).then(|| self.ordinals[index - 1])
    }

    /// Command name for an actual ordinal.
    pub fn command_for_ordinal(&self, ordinal: u8) -> Option<&str> {
        self.commands.get(&ordinal).map(String::as_str)
    }

    /// Command name for a 1-based sequential index, resolved through the
    /// actual ordinal at that position.
    pub fn command_for_index(&self, index: usize) -> Option<&str> {
        self.command_for_ordinal(self.ordinal_at(index)?)
    }

    /// Upper percentage bound owned by the k-th (1-based) sequential index.
    /// Integer arithmetic: `k * 100 / N`, so three speeds band as
    /// 33 / 66 / 100.
    pub fn band_upper(&self, index: usize) -> u8 {
        (index * 100 / self.len()) as u8
    }

    /// Sequential index owning a requested percentage: thresholds are tested
    /// ascending and the first band whose upper bound is >= the request
    /// wins. Zero maps to `None` (off).
    pub fn index_for_percentage(&self, percentage: u8) -> Option<usize> {
        if percentage == 0 {
            return None;
        }
        let percentage = percentage.min(100);
        (1..=self.len()).find(|&index| self.band_upper(index) >= percentage)
    }

    /// Default turn-on index: the median position `(N + 1) / 2`.
    pub fn default_index(&self) -> usize {
        (self.len() + 1) / 2
    }

    /// Default turn-on ordinal (median learned speed).
    pub fn default_ordinal(&self) -> u8 {
        self.ordinals[self.default_index() - 1]
    }

    /// Command transmitted for a bare power-on.
    pub fn default_command(&self) -> &str {
        self.command_for_ordinal(self.default_ordinal())
            .expect("default ordinal always has a command")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(u8, &str)]) -> SpeedMap {
        let speeds: Vec<(u8, String)> = pairs
            .iter()
            .map(|(ordinal, name)| (*ordinal, name.to_string()))
            .collect();
        SpeedMap::resolve(&speeds).unwrap()
    }

    #[test]
    fn test_empty_family_resolves_to_none() {
        assert_eq!(SpeedMap::resolve(&[]), None);
    }

    #[test]
    fn test_ordinals_sorted_and_deduped() {
        let map = map(&[(5, "speed_high"), (1, "speed_low"), (5, "high")]);
        assert_eq!(map.ordinals(), &[1, 5]);
        assert_eq!(map.command_for_ordinal(5), Some("speed_high"));
    }

    #[test]
    fn test_non_contiguous_scale_keeps_actual_ordinals() {
        // low/medium/high resolve to 1/3/5: the scale has gaps and the
        // sequential index must not be used as an ordinal.
        let map = map(&[(1, "speed_low"), (3, "speed_medium"), (5, "speed_high")]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.ordinal_at(2), Some(3));
        assert_eq!(map.command_for_index(2), Some("speed_medium"));
        // The shortcut would have looked up ordinal 2 and found nothing:
        assert_eq!(map.command_for_ordinal(2), None);
    }

    #[test]
    fn test_bands_partition_the_range() {
        let map = map(&[(1, "speed_low"), (3, "speed_medium"), (5, "speed_high")]);
        assert_eq!(map.band_upper(1), 33);
        assert_eq!(map.band_upper(2), 66);
        assert_eq!(map.band_upper(3), 100);

        assert_eq!(map.index_for_percentage(0), None);
        assert_eq!(map.index_for_percentage(1), Some(1));
        assert_eq!(map.index_for_percentage(33), Some(1));
        assert_eq!(map.index_for_percentage(34), Some(2));
        assert_eq!(map.index_for_percentage(66), Some(2));
        assert_eq!(map.index_for_percentage(67), Some(3));
        assert_eq!(map.index_for_percentage(100), Some(3));
    }

    #[test]
    fn test_every_band_resolves_to_original_command() {
        let map = map(&[(1, "speed_low"), (3, "speed_medium"), (5, "speed_high")]);
        for percentage in 1..=100u8 {
            let index = map.index_for_percentage(percentage).unwrap();
            let command = map.command_for_index(index).unwrap();
            assert!(
                ["speed_low", "speed_medium", "speed_high"].contains(&command),
                "{percentage}% resolved to {command}"
            );
        }
    }

    #[test]
    fn test_default_is_median() {
        let map = map(&[(1, "speed_low"), (3, "speed_medium"), (5, "speed_high")]);
        assert_eq!(map.default_index(), 2);
        assert_eq!(map.default_ordinal(), 3);
        assert_eq!(map.default_command(), "speed_medium");
    }

    #[test]
    fn test_default_for_small_scales() {
        let one = map(&[(4, "speed_4")]);
        assert_eq!(one.default_index(), 1);
        assert_eq!(one.default_ordinal(), 4);

        let two = map(&[(1, "speed_low"), (5, "speed_high")]);
        assert_eq!(two.default_index(), 1);
        assert_eq!(two.default_command(), "speed_low");
    }

    #[test]
    fn test_percentage_above_hundred_clamps() {
        let map = map(&[(1, "speed_low"), (5, "speed_high")]);
        assert_eq!(map.index_for_percentage(200), Some(2));
    }
}
