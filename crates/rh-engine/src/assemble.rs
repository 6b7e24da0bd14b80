//! Document assembler
//!
//! Walks the device collection in order and merges every successful build
//! into the two output documents. Recoverable conditions are recorded as
//! problems and the loop continues; one malformed device never blanks the
//! output for an otherwise-valid set. Identifiers derive deterministically
//! from the devices, so re-running replaces prior output instead of
//! duplicating it.

use std::collections::HashSet;

use rh_core::{Device, EngineError, GenerationProblem, ProblemKind, Transport};
use rh_hass::{EntitiesDocument, HelpersDocument};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::builder::{self, BuiltEntity};
use crate::classify;
use crate::vocab::Vocabulary;

/// Full output of one generation run. The problem list is always present,
/// empty on full success.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Generation {
    pub entities: EntitiesDocument,
    pub helpers: HelpersDocument,
    pub problems: Vec<GenerationProblem>,
}

impl Generation {
    /// True only when not a single entity was producible.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Generate entity and helper documents for a device collection.
///
/// Structural defects in the collection itself (empty or duplicate
/// identifiers) fail the invocation; everything else accumulates as
/// per-device problems.
pub fn generate(devices: &[Device], vocab: &Vocabulary) -> Result<Generation, EngineError> {
    let mut seen = HashSet::new();
    for (index, device) in devices.iter().enumerate() {
        if device.id.is_empty() {
            return Err(EngineError::MissingDeviceId { index });
        }
        if !seen.insert(device.id.as_str()) {
            return Err(EngineError::DuplicateDeviceId {
                id: device.id.clone(),
            });
        }
    }

    let mut generation = Generation::default();

    for device in devices {
        if device.commands.is_empty() {
            record(&mut generation, device, ProblemKind::NoCommands);
            continue;
        }
        if matches!(device.transport, Transport::LocalHub) && device.hub_ref().is_none() {
            record(&mut generation, device, ProblemKind::MissingHub);
            continue;
        }

        let capability = classify::classify(device, vocab);
        if !capability.is_classified() {
            record(&mut generation, device, ProblemKind::Unclassifiable);
            continue;
        }

        let families = classify::families(device, vocab);
        match builder::build(device, capability, &families) {
            Ok(built) => {
                let BuiltEntity {
                    entity_id,
                    capability,
                    block,
                    helpers,
                } = built;
                debug!(device = %device.id, entity = %entity_id, "generated entity");
                generation
                    .entities
                    .insert(capability, entity_id.object_id(), block);
                for (id, helper) in helpers {
                    generation.helpers.insert(id, helper);
                }
            }
            Err(kind) => record(&mut generation, device, kind),
        }
    }

    info!(
        entities = generation.entities.len(),
        helpers = generation.helpers.len(),
        problems = generation.problems.len(),
        "entity generation finished"
    );
    if generation.is_empty() {
        warn!("no entities were producible from the device set");
    }

    Ok(generation)
}

fn record(generation: &mut Generation, device: &Device, kind: ProblemKind) {
    warn!(device = %device.id, %kind, "skipping device");
    generation
        .problems
        .push(GenerationProblem::new(device.id.as_str(), kind));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rh_core::Command;

    fn hubbed(id: &str, name: &str, commands: &[&str]) -> Device {
        let mut device = Device::new(id, name);
        device.hub = Some("remote.test_hub".to_string());
        for command in commands {
            device
                .commands
                .insert(command.to_string(), Command::infrared("JgBQ"));
        }
        device
    }

    #[test]
    fn test_empty_collection_generates_empty_documents() {
        let generation = generate(&[], &Vocabulary::default()).unwrap();
        assert!(generation.is_empty());
        assert!(generation.helpers.is_empty());
        assert!(generation.problems.is_empty());
    }

    #[test]
    fn test_missing_device_id_is_structural() {
        let device = Device::new("", "Nameless");
        let err = generate(&[device], &Vocabulary::default()).unwrap_err();
        assert_eq!(err, EngineError::MissingDeviceId { index: 0 });
    }

    #[test]
    fn test_duplicate_device_id_is_structural() {
        let devices = vec![
            hubbed("d1", "Fan A", &["on", "off"]),
            hubbed("d1", "Fan B", &["on", "off"]),
        ];
        let err = generate(&devices, &Vocabulary::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateDeviceId {
                id: "d1".to_string()
            }
        );
    }

    #[test]
    fn test_no_commands_is_a_problem_not_an_error() {
        let device = hubbed("d1", "Empty", &[]);
        let generation = generate(&[device], &Vocabulary::default()).unwrap();
        assert_eq!(generation.problems.len(), 1);
        assert_eq!(generation.problems[0].kind, ProblemKind::NoCommands);
    }

    #[test]
    fn test_missing_hub_only_for_local_transport() {
        let mut local = hubbed("d1", "Fan", &["on", "off"]);
        local.hub = None;

        let mut vendor = hubbed("d2", "TV", &["on", "off"]);
        vendor.hub = None;
        vendor.transport = Transport::VendorProfile {
            profile: "acme_tv".to_string(),
        };

        let generation = generate(&[local, vendor], &Vocabulary::default()).unwrap();
        assert_eq!(generation.problems.len(), 1);
        assert_eq!(generation.problems[0].device_id, "d1");
        assert_eq!(generation.problems[0].kind, ProblemKind::MissingHub);
        assert_eq!(generation.entities.len(), 1);
        assert!(generation.entities.switch.contains_key("tv"));
    }

    #[test]
    fn test_unclassifiable_device_is_recorded() {
        let device = hubbed("d1", "Mystery", &["weird_button"]);
        let generation = generate(&[device], &Vocabulary::default()).unwrap();
        assert!(generation.is_empty());
        assert_eq!(generation.problems[0].kind, ProblemKind::Unclassifiable);
    }

    #[test]
    fn test_helpers_land_in_kind_groups() {
        let device = hubbed("d1", "Bedroom Fan", &["speed_low", "speed_high", "fan_off"]);
        let generation = generate(&[device], &Vocabulary::default()).unwrap();

        assert!(generation
            .helpers
            .input_boolean
            .contains_key("bedroom_fan_state"));
        assert!(generation
            .helpers
            .input_select
            .contains_key("bedroom_fan_speed"));
        assert!(generation.helpers.input_number.is_empty());
    }
}
