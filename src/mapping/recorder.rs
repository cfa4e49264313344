//! Interactive recording of bindings from live controller state.
//!
//! Each call to [`Recorder::record`] looks at the controller once. Axes simulated by
//! two buttons need two calls: the first press is remembered as the positive
//! button, the next press for the same configured input becomes the reverse button.
//!
//! ```text
//!              press A                     press B (≠ A)
//! NothingDone ─────────► NeedSecondButton ──────────────► Recorded
//!                            │      ▲
//!                            └──────┘
//!                    nothing pressed / B rejected
//!                        (NotAddedNeedButton)
//! ```

use crate::config::MappingSettings;
use crate::controller::{Controller, PovDirection};
use crate::mapping::binding::{Binding, BindingSet};
use crate::mapping::configured::{ConfiguredInput, InputKind};
use std::collections::HashMap;
use tracing::{debug, info};

/// Highest button and axis index probed while recording.
/// Some gamepads report buttons in the 90..107 range.
pub const MAX_SCANNED_INDEX: u32 = 500;

/// Outcome of a single recording attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordResult {
    /// A binding was added.
    Recorded,
    /// Nothing usable was pressed or moved.
    NothingDone,
    /// Input was found but conflicts with an existing binding.
    NotAdded,
    /// First button of a two-button axis taken; call again with the reverse button pressed.
    NeedSecondButton,
    /// Still waiting for a valid reverse button.
    NotAddedNeedButton,
}

/// Lowest pressed button index, if any.
pub fn find_pressed_button<C: Controller + ?Sized>(controller: &C) -> Option<u32> {
    (0..=MAX_SCANNED_INDEX).find(|index| controller.button(*index))
}

/// Axis with the highest deflection inside `[threshold, max_accepted]`.
/// On equal deflection the lower index wins.
pub fn find_high_axis_value<C: Controller + ?Sized>(
    controller: &C,
    threshold: f32,
    max_accepted: f32,
) -> Option<u32> {
    let mut highest = 0.0;
    let mut found = None;

    for index in 0..=MAX_SCANNED_INDEX {
        let abs = controller.axis(index).abs();
        if abs > highest && abs >= threshold && abs <= max_accepted {
            highest = abs;
            found = Some(index);
        }
    }

    found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAxis {
    configured_id: i32,
    first_button: u32,
}

/// Holds the "waiting for reverse button" state between calls, per controller.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pending: HashMap<String, PendingAxis>,
}

impl Recorder {
    pub(crate) fn clear(&mut self, controller_name: &str) {
        if self.pending.remove(controller_name).is_some() {
            debug!("Dropped pending two-button axis for {}", controller_name);
        }
    }

    /// Configured id waiting for its reverse button on this controller.
    pub(crate) fn pending_axis(&self, controller_name: &str) -> Option<i32> {
        self.pending.get(controller_name).map(|p| p.configured_id)
    }

    pub(crate) fn record<C: Controller + ?Sized>(
        &mut self,
        bindings: &mut BindingSet,
        input: ConfiguredInput,
        controller: &C,
        settings: &MappingSettings,
    ) -> RecordResult {
        match input.kind {
            InputKind::Button => record_button(bindings, input.id, controller),
            InputKind::Axis | InputKind::DigitalAxis => {
                self.record_digital(bindings, input.id, controller, settings)
            }
            InputKind::AnalogAxis => record_analog(bindings, input.id, controller, settings),
        }
    }

    fn record_digital<C: Controller + ?Sized>(
        &mut self,
        bindings: &mut BindingSet,
        configured_id: i32,
        controller: &C,
        settings: &MappingSettings,
    ) -> RecordResult {
        let controller_name = controller.name();
        let pending = self
            .pending
            .get(controller_name)
            .copied()
            .filter(|p| p.configured_id == configured_id);

        if let Some(button) = find_pressed_button(controller) {
            if let Some(pending) = pending {
                let binding = Binding::button_pair(configured_id, pending.first_button, button);
                return match bindings.put_mapping(binding) {
                    Ok(()) => {
                        self.pending.remove(controller_name);
                        info!(
                            "Recorded buttons {}/{} for axis {} on {}",
                            pending.first_button, button, configured_id, controller_name
                        );
                        RecordResult::Recorded
                    }
                    Err(e) => {
                        debug!("Reverse button {} rejected: {}", button, e);
                        RecordResult::NotAddedNeedButton
                    }
                };
            }

            if bindings.is_button_bound(button) {
                debug!("Button {} is already bound on {}", button, controller_name);
                return RecordResult::NotAdded;
            }

            self.pending.insert(
                controller_name.to_string(),
                PendingAxis {
                    configured_id,
                    first_button: button,
                },
            );
            debug!(
                "Button {} taken as positive direction of axis {}, waiting for reverse button",
                button, configured_id
            );
            return RecordResult::NeedSecondButton;
        }

        if pending.is_some() {
            return RecordResult::NotAddedNeedButton;
        }

        // only the first POV is probed
        let direction = controller.pov(0);
        if direction.is_diagonal() {
            debug!("Diagonal POV directions can not be recorded");
            return RecordResult::NotAdded;
        }
        let vertical = match direction {
            PovDirection::East | PovDirection::West => Some(false),
            PovDirection::North | PovDirection::South => Some(true),
            _ => None,
        };

        match vertical {
            Some(vertical) => insert(bindings, Binding::pov(configured_id, 0, vertical)),
            None => record_analog(bindings, configured_id, controller, settings),
        }
    }
}

fn record_button<C: Controller + ?Sized>(
    bindings: &mut BindingSet,
    configured_id: i32,
    controller: &C,
) -> RecordResult {
    match find_pressed_button(controller) {
        Some(button) => insert(bindings, Binding::button(configured_id, button)),
        None => RecordResult::NothingDone,
    }
}

fn record_analog<C: Controller + ?Sized>(
    bindings: &mut BindingSet,
    configured_id: i32,
    controller: &C,
    settings: &MappingSettings,
) -> RecordResult {
    match find_high_axis_value(
        controller,
        settings.analog_to_digital_threshold,
        settings.max_accepted_analog_value,
    ) {
        Some(axis) => insert(bindings, Binding::axis(configured_id, axis)),
        None => RecordResult::NothingDone,
    }
}

fn insert(bindings: &mut BindingSet, binding: Binding) -> RecordResult {
    match bindings.put_mapping(binding) {
        Ok(()) => {
            info!(
                "Recorded {:?} for configured input {} on {}",
                binding.primary,
                binding.configured_id,
                bindings.controller_name()
            );
            RecordResult::Recorded
        }
        Err(e) => {
            debug!("Binding not added: {}", e);
            RecordResult::NotAdded
        }
    }
}
