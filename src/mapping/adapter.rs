//! Push-side resolution: physical events → configured input events.
//!
//! ```text
//! PhysicalEvent ──► MappedControllerAdapter ──► ConfiguredInputListener
//!                        │
//!                   BindingSet lookup
//!                   (button / reverse button / axis / POV)
//! ```
//!
//! Bindings are looked up on every event, so rebinding takes effect immediately.

use crate::controller::{PhysicalEvent, PovDirection};
use crate::mapping::configured::InputKind;
use crate::mapping::mappings::{Committed, ControllerMappings};
use crate::mapping::resolver::digital_value;
use tracing::{debug, warn};

/// Receives configured input events. Every method returns whether the event was handled.
pub trait ConfiguredInputListener {
    fn configured_button_down(&mut self, _controller: &str, _configured_id: i32) -> bool {
        false
    }

    fn configured_button_up(&mut self, _controller: &str, _configured_id: i32) -> bool {
        false
    }

    fn configured_axis_moved(&mut self, _controller: &str, _configured_id: i32, _value: f32) -> bool {
        false
    }
}

/// Which orientations of a POV event reached a listener that handled them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PovHandled {
    pub horizontal: bool,
    pub vertical: bool,
}

impl PovHandled {
    pub fn any(self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Forwards physical events of any controller to a listener, translated through
/// the controller's bindings.
pub struct MappedControllerAdapter<L: ConfiguredInputListener> {
    listener: L,
    analog_to_digital_threshold: f32,
}

impl<L: ConfiguredInputListener> MappedControllerAdapter<L> {
    pub fn new(listener: L, mappings: &ControllerMappings<Committed>) -> Self {
        Self {
            listener,
            analog_to_digital_threshold: mappings.settings().analog_to_digital_threshold,
        }
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    pub fn handle_event(
        &mut self,
        mappings: &mut ControllerMappings<Committed>,
        controller: &str,
        event: &PhysicalEvent,
    ) -> bool {
        match *event {
            PhysicalEvent::ButtonDown { button } => {
                self.button_down(mappings, controller, button)
            }
            PhysicalEvent::ButtonUp { button } => self.button_up(mappings, controller, button),
            PhysicalEvent::AxisMoved { axis, value } => {
                self.axis_moved(mappings, controller, axis, value)
            }
            PhysicalEvent::PovMoved { pov, direction } => {
                self.pov_moved(mappings, controller, pov, direction).any()
            }
        }
    }

    pub fn button_down(
        &mut self,
        mappings: &mut ControllerMappings<Committed>,
        controller: &str,
        button: u32,
    ) -> bool {
        self.button_change(mappings, controller, button, true)
    }

    pub fn button_up(
        &mut self,
        mappings: &mut ControllerMappings<Committed>,
        controller: &str,
        button: u32,
    ) -> bool {
        self.button_change(mappings, controller, button, false)
    }

    fn button_change(
        &mut self,
        mappings: &mut ControllerMappings<Committed>,
        controller: &str,
        button: u32,
        is_down: bool,
    ) -> bool {
        let Some(bindings) = mappings.controller_mapping(controller) else {
            return false;
        };

        let (configured_id, is_reverse) = match bindings.configured_from_button(button) {
            Some(id) => (id, false),
            None => match bindings.configured_from_reverse_button(button) {
                Some(id) => (id, true),
                None => return false,
            },
        };

        match mappings.configured_input(configured_id).map(|input| input.kind) {
            Some(InputKind::Button) => {
                if is_down {
                    self.listener.configured_button_down(controller, configured_id)
                } else {
                    self.listener.configured_button_up(controller, configured_id)
                }
            }
            Some(InputKind::Axis | InputKind::DigitalAxis) => {
                let value = match (is_down, is_reverse) {
                    (false, _) => 0.0,
                    (true, false) => 1.0,
                    (true, true) => -1.0,
                };
                self.listener
                    .configured_axis_moved(controller, configured_id, value)
            }
            Some(InputKind::AnalogAxis) => {
                warn!(
                    "Button {} mapped to analog axis {} is not allowed",
                    button, configured_id
                );
                false
            }
            None => {
                debug!("Button {} bound to unknown configured input {}", button, configured_id);
                false
            }
        }
    }

    pub fn axis_moved(
        &mut self,
        mappings: &mut ControllerMappings<Committed>,
        controller: &str,
        axis: u32,
        value: f32,
    ) -> bool {
        let Some(configured_id) = mappings
            .controller_mapping(controller)
            .and_then(|bindings| bindings.configured_from_axis(axis))
        else {
            return false;
        };

        match mappings.configured_input(configured_id).map(|input| input.kind) {
            Some(InputKind::Axis | InputKind::AnalogAxis) => {
                self.listener
                    .configured_axis_moved(controller, configured_id, value)
            }
            Some(InputKind::DigitalAxis) => self.listener.configured_axis_moved(
                controller,
                configured_id,
                digital_value(value, self.analog_to_digital_threshold),
            ),
            Some(InputKind::Button) => {
                warn!(
                    "Axis {} mapped to button {} is not allowed",
                    axis, configured_id
                );
                false
            }
            None => {
                debug!("Axis {} bound to unknown configured input {}", axis, configured_id);
                false
            }
        }
    }

    /// Splits the direction into its horizontal and vertical part and forwards each
    /// to the configured axis bound to that orientation.
    pub fn pov_moved(
        &mut self,
        mappings: &mut ControllerMappings<Committed>,
        controller: &str,
        pov: u32,
        direction: PovDirection,
    ) -> PovHandled {
        let Some(bindings) = mappings.controller_mapping(controller) else {
            return PovHandled::default();
        };
        let horizontal_id = bindings.configured_from_pov(pov, false);
        let vertical_id = bindings.configured_from_pov(pov, true);

        PovHandled {
            horizontal: self.pov_axis(mappings, controller, horizontal_id, direction.horizontal()),
            vertical: self.pov_axis(mappings, controller, vertical_id, direction.vertical()),
        }
    }

    fn pov_axis(
        &mut self,
        mappings: &ControllerMappings<Committed>,
        controller: &str,
        configured_id: Option<i32>,
        value: f32,
    ) -> bool {
        let Some(configured_id) = configured_id else {
            return false;
        };

        match mappings.configured_input(configured_id).map(|input| input.kind) {
            Some(InputKind::Axis | InputKind::DigitalAxis) => {
                self.listener
                    .configured_axis_moved(controller, configured_id, value)
            }
            Some(kind) => {
                warn!(
                    "POV mapped to {:?} {} is not allowed",
                    kind, configured_id
                );
                false
            }
            None => false,
        }
    }
}
