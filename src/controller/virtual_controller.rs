use crate::controller::controller::{Controller, PovDirection};
use std::collections::{HashMap, HashSet};

/// In-memory controller whose state is set by hand.
///
/// Useful for scripted recording sessions, replaying stored input and tests.
#[derive(Debug, Clone, Default)]
pub struct VirtualController {
    name: String,
    pressed: HashSet<u32>,
    axes: HashMap<u32, f32>,
    povs: HashMap<u32, PovDirection>,
}

impl VirtualController {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn press_button(&mut self, button: u32) {
        self.pressed.insert(button);
    }

    pub fn release_button(&mut self, button: u32) {
        self.pressed.remove(&button);
    }

    /// Releases everything and presses only `button`.
    pub fn press_only(&mut self, button: u32) {
        self.pressed.clear();
        self.pressed.insert(button);
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    pub fn set_axis(&mut self, axis: u32, value: f32) {
        self.axes.insert(axis, value);
    }

    pub fn set_pov(&mut self, pov: u32, direction: PovDirection) {
        self.povs.insert(pov, direction);
    }

    /// Resets buttons, axes and POVs to their neutral state.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.axes.clear();
        self.povs.clear();
    }
}

impl Controller for VirtualController {
    fn button(&self, index: u32) -> bool {
        self.pressed.contains(&index)
    }

    fn axis(&self, index: u32) -> f32 {
        self.axes.get(&index).copied().unwrap_or(0.0)
    }

    fn pov(&self, index: u32) -> PovDirection {
        self.povs.get(&index).copied().unwrap_or_default()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
