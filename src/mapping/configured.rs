//! Inputs defined by the application, independent of any hardware.

use std::collections::BTreeMap;
use tracing::warn;

/// Semantic type of a configured input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pressed or not pressed. Only ever bound to a physical button.
    Button,
    /// Analog or digital. Accepts an analog axis (raw value), a POV orientation or
    /// a pair of buttons (-1, 0, +1).
    Axis,
    /// Only accepts a physical analog axis, reports its raw value.
    AnalogAxis,
    /// Reports -1, 0 or +1. Accepts buttons, POV or an analog axis collapsed
    /// by the analog-to-digital threshold.
    DigitalAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfiguredInput {
    pub id: i32,
    pub kind: InputKind,
}

impl ConfiguredInput {
    pub fn new(kind: InputKind, id: i32) -> Self {
        Self { id, kind }
    }

    pub fn button(id: i32) -> Self {
        Self::new(InputKind::Button, id)
    }

    pub fn axis(id: i32) -> Self {
        Self::new(InputKind::Axis, id)
    }

    pub fn analog_axis(id: i32) -> Self {
        Self::new(InputKind::AnalogAxis, id)
    }

    pub fn digital_axis(id: i32) -> Self {
        Self::new(InputKind::DigitalAxis, id)
    }
}

/// The set of configured inputs, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InputRegistry {
    inputs: BTreeMap<i32, ConfiguredInput>,
}

impl InputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, input: ConfiguredInput) {
        if let Some(previous) = self.inputs.insert(input.id, input) {
            warn!(
                "Configured input {} redefined: {:?} -> {:?}",
                input.id, previous.kind, input.kind
            );
        }
    }

    pub fn get(&self, id: i32) -> Option<&ConfiguredInput> {
        self.inputs.get(&id)
    }

    pub fn kind(&self, id: i32) -> Option<InputKind> {
        self.inputs.get(&id).map(|input| input.kind)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.inputs.contains_key(&id)
    }

    /// Configured inputs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfiguredInput> {
        self.inputs.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.inputs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
