//! Template entity builder
//!
//! Assembles the per-capability entity block: a state-derivation template
//! plus one action sequence per present facet. Facets are a fixed slot set
//! and the builder folds over the slots available to the capability, so the
//! presence or absence of one facet cannot perturb another.
//!
//! Every action that moves a continuous value to a non-zero target also
//! flips the power helper on in the same sequence, and moving it to
//! zero/off flips it off; the stored state never diverges from what the
//! actions transmitted.
//!
//! Brightness, color temperature and climate setpoint only have step
//! commands, so their actions compare the requested target with the
//! helper's current value, transmit a single step in that direction and
//! persist the target. One command per request; the stored value converges
//! over repeated requests rather than in a loop.

use rh_core::{slugify, suffixes, Capability, Device, EntityId, ProblemKind, Transport};
use rh_hass::{Action, ChooseAction, ChooseOption, EntityBlock, HelperConfig, ServiceAction};
use serde_json::json;

use crate::classify::CommandFamilies;
use crate::helpers;
use crate::speed::SpeedMap;

/// Controllable facet slots, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Power,
    Speed,
    Level,
    Temperature,
    Direction,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Power,
        Facet::Speed,
        Facet::Level,
        Facet::Temperature,
        Facet::Direction,
    ];

    /// Slots a capability can expose.
    pub fn available(capability: Capability) -> &'static [Facet] {
        match capability {
            Capability::Switch => &[Facet::Power],
            Capability::Fan => &[Facet::Power, Facet::Speed, Facet::Direction],
            Capability::Light => &[Facet::Power, Facet::Level, Facet::Temperature],
            Capability::Climate => &[Facet::Power, Facet::Temperature],
            Capability::Unclassified => &[],
        }
    }
}

/// A fully built entity with the helpers its actions read and write.
#[derive(Debug, Clone)]
pub struct BuiltEntity {
    pub entity_id: EntityId,
    pub capability: Capability,
    pub block: EntityBlock,

    /// Helper object id -> config, in emission order
    pub helpers: Vec<(String, HelperConfig)>,
}

/// Build the entity block and helper set for a classified device.
///
/// Returns `NoUsableCommands` when no action facet is derivable: an entity
/// with zero actions is invalid and must not be emitted.
pub fn build(
    device: &Device,
    capability: Capability,
    families: &CommandFamilies,
) -> Result<BuiltEntity, ProblemKind> {
    let Some(domain) = capability.domain() else {
        return Err(ProblemKind::Unclassifiable);
    };

    let speed_map = if capability == Capability::Fan {
        SpeedMap::resolve(&families.speeds)
    } else {
        None
    };

    let builder = Builder {
        device,
        capability,
        families,
        speed_map,
        object_id: derive_object_id(device),
    };

    let mut block = EntityBlock::new(builder.state_template());
    block.friendly_name = Some(device.name.clone());
    block.icon_template = device.icon.clone();

    // The state template reads the power helper, so every emitted entity
    // gets one regardless of which facets follow.
    let mut helper_list = vec![(
        builder.helper_id(suffixes::STATE),
        helpers::power_helper(&device.name),
    )];

    for facet in Facet::available(capability) {
        match facet {
            Facet::Power => builder.apply_power(&mut block),
            Facet::Speed => builder.apply_speed(&mut block, &mut helper_list),
            Facet::Level => builder.apply_level(&mut block, &mut helper_list),
            Facet::Temperature => builder.apply_temperature(&mut block, &mut helper_list),
            Facet::Direction => builder.apply_direction(&mut block, &mut helper_list),
        }
    }

    if block.facet_count() == 0 {
        return Err(ProblemKind::NoUsableCommands { capability });
    }

    let entity_id = EntityId::new(domain, &builder.object_id)
        .expect("slugified object ids are always valid");

    Ok(BuiltEntity {
        entity_id,
        capability,
        block,
        helpers: helper_list,
    })
}

fn derive_object_id(device: &Device) -> String {
    let slug = slugify(&device.name);
    if !slug.is_empty() {
        return slug;
    }
    let slug = slugify(&device.id);
    if !slug.is_empty() {
        return slug;
    }
    "device".to_string()
}

struct Builder<'a> {
    device: &'a Device,
    capability: Capability,
    families: &'a CommandFamilies,
    speed_map: Option<SpeedMap>,
    object_id: String,
}

impl Builder<'_> {
    fn helper_id(&self, suffix: &str) -> String {
        format!("{}{}", self.object_id, suffix)
    }

    fn helper_entity(&self, domain: &str, suffix: &str) -> String {
        format!("{domain}.{}{suffix}", self.object_id)
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    fn state_template(&self) -> String {
        format!(
            "{{{{ is_state('{}', 'on') }}}}",
            self.helper_entity("input_boolean", suffixes::STATE)
        )
    }

    fn percentage_template(&self, count: usize) -> String {
        let speed = self.helper_entity("input_select", suffixes::SPEED);
        format!(
            "{{% if is_state('{speed}', 'off') %}}0{{% else %}}{{{{ (states('{speed}') | int) * 100 // {count} }}}}{{% endif %}}"
        )
    }

    fn number_template(&self, suffix: &str, cast: &str) -> String {
        format!(
            "{{{{ states('{}') | {cast} }}}}",
            self.helper_entity("input_number", suffix)
        )
    }

    fn direction_template(&self) -> String {
        format!(
            "{{{{ states('{}') }}}}",
            self.helper_entity("input_select", suffixes::DIRECTION)
        )
    }

    /// `{{ <var> | <cast> <op> states('input_number.…<suffix>') | <cast> }}`
    fn compare_condition(&self, var: &str, cast: &str, op: &str, suffix: &str) -> String {
        format!(
            "{{{{ {var} | {cast} {op} states('{}') | {cast} }}}}",
            self.helper_entity("input_number", suffix)
        )
    }

    // ------------------------------------------------------------------
    // Primitive actions
    // ------------------------------------------------------------------

    /// Transmit a learned command through the device's transport.
    fn transmit(&self, command: &str) -> Action {
        let mut action = ServiceAction::new("remote.send_command");
        if let Some(hub) = self.device.hub_ref() {
            action = action.target_entity(hub);
        }
        match &self.device.transport {
            Transport::LocalHub => {
                let payload = self
                    .device
                    .commands
                    .get(command)
                    .expect("family commands exist on the device");
                action = action.data("command", format!("b64:{}", payload.data));
            }
            Transport::VendorProfile { profile } => {
                action = action.data("device", profile.clone()).data("command", command);
            }
        }
        action.into()
    }

    fn set_power(&self, on: bool) -> Action {
        let service = if on {
            "input_boolean.turn_on"
        } else {
            "input_boolean.turn_off"
        };
        ServiceAction::new(service)
            .target_entity(self.helper_entity("input_boolean", suffixes::STATE))
            .into()
    }

    fn select_option(&self, suffix: &str, option: &str) -> Action {
        ServiceAction::new("input_select.select_option")
            .target_entity(self.helper_entity("input_select", suffix))
            .data("option", option)
            .into()
    }

    fn set_number(&self, suffix: &str, value: serde_json::Value) -> Action {
        ServiceAction::new("input_number.set_value")
            .target_entity(self.helper_entity("input_number", suffix))
            .data("value", value)
            .into()
    }

    // ------------------------------------------------------------------
    // Facets
    // ------------------------------------------------------------------

    fn apply_power(&self, block: &mut EntityBlock) {
        let mut on_seq = Vec::new();
        if let Some(map) = &self.speed_map {
            // Bare power-on picks the median learned speed, not an
            // arbitrary first command.
            on_seq.push(self.transmit(map.default_command()));
            on_seq.push(self.select_option(suffixes::SPEED, &map.default_index().to_string()));
        } else if let Some(command) = &self.families.power_on {
            on_seq.push(self.transmit(command));
        } else if self.capability == Capability::Light {
            if let Some(command) = &self.families.preset_bright {
                on_seq.push(self.transmit(command));
                on_seq.push(self.set_number(suffixes::BRIGHTNESS, json!(100)));
            }
        }
        if !on_seq.is_empty() {
            on_seq.push(self.set_power(true));
            block.turn_on = on_seq;
        }

        if let Some(command) = &self.families.power_off {
            let mut off_seq = vec![self.transmit(command), self.set_power(false)];
            if self.speed_map.is_some() {
                off_seq.push(self.select_option(suffixes::SPEED, "off"));
            }
            block.turn_off = off_seq;
        }
    }

    fn apply_speed(&self, block: &mut EntityBlock, helper_list: &mut Vec<(String, HelperConfig)>) {
        let Some(map) = &self.speed_map else {
            return;
        };

        block.percentage_template = Some(self.percentage_template(map.len()));
        block.speed_count = Some(map.len() as u32);

        // Zero first, then bands ascending: the platform runs the first
        // matching option, so threshold order is load-bearing.
        let mut options = Vec::with_capacity(map.len() + 1);
        let mut off_seq = Vec::new();
        if let Some(command) = &self.families.power_off {
            off_seq.push(self.transmit(command));
        }
        off_seq.push(self.select_option(suffixes::SPEED, "off"));
        off_seq.push(self.set_power(false));
        options.push(ChooseOption::new("{{ percentage | int == 0 }}", off_seq));

        for index in 1..=map.len() {
            let command = map
                .command_for_index(index)
                .expect("sequential indexes resolve through the ordinal list");
            options.push(ChooseOption::new(
                format!("{{{{ percentage | int <= {} }}}}", map.band_upper(index)),
                vec![
                    self.transmit(command),
                    self.select_option(suffixes::SPEED, &index.to_string()),
                    self.set_power(true),
                ],
            ));
        }

        block.set_percentage = vec![Action::choose(options)];
        helper_list.push((
            self.helper_id(suffixes::SPEED),
            helpers::speed_helper(&self.device.name, map.len()),
        ));
    }

    fn apply_level(&self, block: &mut EntityBlock, helper_list: &mut Vec<(String, HelperConfig)>) {
        let families = self.families;
        if !families.has_level_steps() && !families.has_level_presets() {
            return;
        }

        block.level_template = Some(self.number_template(suffixes::BRIGHTNESS, "int"));

        let mut zero_seq = Vec::new();
        if let Some(command) = &self.families.power_off {
            zero_seq.push(self.transmit(command));
        }
        zero_seq.push(self.set_number(suffixes::BRIGHTNESS, json!(0)));
        zero_seq.push(self.set_power(false));
        let zero_option = ChooseOption::new("{{ level | int == 0 }}", zero_seq);

        let persist = vec![
            self.set_number(suffixes::BRIGHTNESS, json!("{{ level | int }}")),
            self.set_power(true),
        ];

        let ramp = match (families.level_up.as_deref(), families.level_down.as_deref()) {
            (Some(up), Some(down)) => Some(Action::if_else(
                self.compare_condition("level", "int", ">", suffixes::BRIGHTNESS),
                vec![self.transmit(up)],
                vec![self.transmit(down)],
            )),
            (Some(up), None) => Some(Action::if_else(
                self.compare_condition("level", "int", ">", suffixes::BRIGHTNESS),
                vec![self.transmit(up)],
                Vec::new(),
            )),
            (None, Some(down)) => Some(Action::if_else(
                self.compare_condition("level", "int", "<", suffixes::BRIGHTNESS),
                vec![self.transmit(down)],
                Vec::new(),
            )),
            (None, None) => None,
        };

        let action = if let Some(ramp) = ramp {
            // Step family: single-step approximation toward the target.
            let mut default = vec![ramp];
            default.extend(persist);
            ChooseAction {
                choose: vec![zero_option],
                default,
            }
        } else {
            // Preset family: threshold selection, no stored-value
            // comparison.
            let mut choose = vec![zero_option];
            if let Some(bright) = &families.preset_bright {
                let mut seq = vec![self.transmit(bright)];
                seq.extend(persist.clone());
                choose.push(ChooseOption::new("{{ level | int > 50 }}", seq));
            }
            let default = if let Some(dim) = &families.preset_dim {
                let mut seq = vec![self.transmit(dim)];
                seq.extend(persist);
                seq
            } else {
                persist
            };
            ChooseAction { choose, default }
        };

        block.set_level = vec![Action::Choose(action)];
        helper_list.push((
            self.helper_id(suffixes::BRIGHTNESS),
            helpers::brightness_helper(&self.device.name),
        ));
    }

    fn apply_temperature(
        &self,
        block: &mut EntityBlock,
        helper_list: &mut Vec<(String, HelperConfig)>,
    ) {
        let families = self.families;
        match self.capability {
            Capability::Light if families.has_color_temp() => {
                // Color temperature in mireds: cooler steps down, warmer up.
                let ramp = match (families.ct_cooler.as_deref(), families.ct_warmer.as_deref()) {
                    (Some(cooler), Some(warmer)) => Action::if_else(
                        self.compare_condition("color_temp", "int", "<", suffixes::COLOR_TEMP),
                        vec![self.transmit(cooler)],
                        vec![self.transmit(warmer)],
                    ),
                    (Some(cooler), None) => Action::if_else(
                        self.compare_condition("color_temp", "int", "<", suffixes::COLOR_TEMP),
                        vec![self.transmit(cooler)],
                        Vec::new(),
                    ),
                    (None, Some(warmer)) => Action::if_else(
                        self.compare_condition("color_temp", "int", ">", suffixes::COLOR_TEMP),
                        vec![self.transmit(warmer)],
                        Vec::new(),
                    ),
                    (None, None) => return,
                };

                block.temperature_template =
                    Some(self.number_template(suffixes::COLOR_TEMP, "int"));
                block.set_temperature = vec![
                    ramp,
                    self.set_number(suffixes::COLOR_TEMP, json!("{{ color_temp | int }}")),
                    self.set_power(true),
                ];
                helper_list.push((
                    self.helper_id(suffixes::COLOR_TEMP),
                    helpers::color_temp_helper(&self.device.name),
                ));
            }
            Capability::Climate if families.has_temperature_steps() => {
                let ramp = match (families.temp_up.as_deref(), families.temp_down.as_deref()) {
                    (Some(up), Some(down)) => Action::if_else(
                        self.compare_condition("temperature", "float", ">", suffixes::TEMPERATURE),
                        vec![self.transmit(up)],
                        vec![self.transmit(down)],
                    ),
                    (Some(up), None) => Action::if_else(
                        self.compare_condition("temperature", "float", ">", suffixes::TEMPERATURE),
                        vec![self.transmit(up)],
                        Vec::new(),
                    ),
                    (None, Some(down)) => Action::if_else(
                        self.compare_condition("temperature", "float", "<", suffixes::TEMPERATURE),
                        vec![self.transmit(down)],
                        Vec::new(),
                    ),
                    (None, None) => return,
                };

                block.temperature_template =
                    Some(self.number_template(suffixes::TEMPERATURE, "float"));
                block.set_temperature = vec![
                    ramp,
                    self.set_number(suffixes::TEMPERATURE, json!("{{ temperature | float }}")),
                    self.set_power(true),
                ];
                helper_list.push((
                    self.helper_id(suffixes::TEMPERATURE),
                    helpers::temperature_helper(&self.device.name),
                ));
            }
            _ => {}
        }
    }

    fn apply_direction(
        &self,
        block: &mut EntityBlock,
        helper_list: &mut Vec<(String, HelperConfig)>,
    ) {
        let families = self.families;
        if !families.has_direction() {
            return;
        }

        // A lone "direction" toggle serves both values.
        let forward = families
            .dir_forward
            .as_deref()
            .or(families.dir_toggle.as_deref());
        let reverse = families
            .dir_reverse
            .as_deref()
            .or(families.dir_toggle.as_deref());

        let mut options = Vec::new();
        if let Some(command) = forward {
            options.push(ChooseOption::new(
                "{{ direction == 'forward' }}",
                vec![
                    self.transmit(command),
                    self.select_option(suffixes::DIRECTION, "forward"),
                ],
            ));
        }
        if let Some(command) = reverse {
            options.push(ChooseOption::new(
                "{{ direction == 'reverse' }}",
                vec![
                    self.transmit(command),
                    self.select_option(suffixes::DIRECTION, "reverse"),
                ],
            ));
        }
        if options.is_empty() {
            return;
        }

        block.direction_template = Some(self.direction_template());
        block.set_direction = vec![Action::choose(options)];
        helper_list.push((
            self.helper_id(suffixes::DIRECTION),
            helpers::direction_helper(&self.device.name),
        ));
    }
}
