//! Poll-side resolution: live controller state → configured input values.

use crate::controller::Controller;
use crate::mapping::binding::{BindingSet, PhysicalInput};
use crate::mapping::configured::{InputKind, InputRegistry};
use crate::mapping::mappings::{Committed, ControllerMappings};
use std::sync::Arc;
use tracing::warn;

/// Collapses an analog value to -1, 0 or +1.
pub fn digital_value(value: f32, threshold: f32) -> f32 {
    if value == 0.0 || value.abs() < threshold {
        0.0
    } else {
        value.signum()
    }
}

/// Current value of a configured axis.
///
/// Unbound or unknown ids resolve to 0. An `AnalogAxis` only ever reads a physical
/// axis, never buttons or POV.
pub fn resolve_axis_value<C: Controller + ?Sized>(
    registry: &InputRegistry,
    bindings: &BindingSet,
    configured_id: i32,
    controller: &C,
    threshold: f32,
) -> f32 {
    let (Some(binding), Some(kind)) = (bindings.binding(configured_id), registry.kind(configured_id))
    else {
        return 0.0;
    };

    match binding.primary {
        PhysicalInput::Axis(axis) => {
            let value = controller.axis(axis);
            if kind == InputKind::DigitalAxis {
                digital_value(value, threshold)
            } else {
                value
            }
        }
        _ if kind == InputKind::AnalogAxis => 0.0,
        PhysicalInput::Button(button) => {
            if controller.button(button) {
                1.0
            } else if binding
                .secondary_button
                .is_some_and(|reverse| controller.button(reverse))
            {
                -1.0
            } else {
                0.0
            }
        }
        PhysicalInput::Pov { index, vertical } => controller.pov(index).axis_value(vertical),
    }
}

/// Whether a configured button is held. Only button bindings can be pressed.
pub fn resolve_button_pressed<C: Controller + ?Sized>(
    bindings: &BindingSet,
    configured_id: i32,
    controller: &C,
) -> bool {
    bindings
        .binding(configured_id)
        .and_then(|binding| binding.button_index())
        .is_some_and(|button| controller.button(button))
}

/// A physical controller viewed through its bindings.
///
/// Holds a copy of the controller's binding set. After the mappings were reset or
/// restored, call [`MappedController::refresh_mapping_cache`] to pick up the change.
pub struct MappedController<C: Controller> {
    controller: C,
    registry: Arc<InputRegistry>,
    bindings: Option<BindingSet>,
    analog_to_digital_threshold: f32,
}

impl<C: Controller> MappedController<C> {
    pub fn new(controller: C, mappings: &mut ControllerMappings<Committed>) -> Self {
        let mut mapped = Self {
            controller,
            registry: mappings.registry(),
            bindings: None,
            analog_to_digital_threshold: mappings.settings().analog_to_digital_threshold,
        };
        mapped.refresh_mapping_cache(mappings);
        mapped
    }

    pub fn refresh_mapping_cache(&mut self, mappings: &mut ControllerMappings<Committed>) {
        self.bindings = mappings.controller_mapping(self.controller.name()).cloned();

        let complete = self
            .bindings
            .as_ref()
            .is_some_and(|bindings| bindings.is_complete(&self.registry));
        if !complete {
            warn!(
                "MappedController for {} created with incomplete configuration",
                self.controller.name()
            );
        }
    }

    pub fn is_button_pressed(&self, configured_id: i32) -> bool {
        self.bindings.as_ref().is_some_and(|bindings| {
            resolve_button_pressed(bindings, configured_id, &self.controller)
        })
    }

    pub fn configured_axis_value(&self, configured_id: i32) -> f32 {
        match &self.bindings {
            Some(bindings) => resolve_axis_value(
                &self.registry,
                bindings,
                configured_id,
                &self.controller,
                self.analog_to_digital_threshold,
            ),
            None => 0.0,
        }
    }

    pub fn controller_name(&self) -> &str {
        self.controller.name()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Live controller, e.g. to replace a captured snapshot each frame.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digital_value_collapses_by_threshold() {
        assert_eq!(digital_value(-0.7, 0.5), -1.0);
        assert_eq!(digital_value(-0.2, 0.5), 0.0);
        assert_eq!(digital_value(0.5, 0.5), 1.0);
        assert_eq!(digital_value(0.0, 0.0), 0.0);
        assert_eq!(digital_value(-0.0, 0.0), 0.0);
    }
}
