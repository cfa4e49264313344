//! gilrs backend for the [`Controller`] capability.
//!
//! gilrs names its inputs (`Button::South`, `Axis::LeftStickX`, ...) rather than
//! exposing raw indices, so this module fixes an index order for them. The d-pad is
//! only exposed as POV 0, never as buttons, so recording a directional pad always
//! yields a POV binding.
//!
//! ```text
//! Gilrs ──► GamepadCollector ──► PhysicalEvent   (push)
//!                   │
//!                   └──────────► GamepadSnapshot (poll, implements Controller)
//! ```

use crate::controller::controller::{Controller, PhysicalEvent, PovDirection};
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use statum::{machine, state};
use tracing::{debug, error, info, warn};

/// Button index order. Position in this table is the physical button index.
pub const BUTTONS: [Button; 15] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::C,
    Button::Z,
    Button::LeftTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
];

/// Axis index order. Position in this table is the physical axis index.
pub const AXES: [Axis; 6] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::RightZ,
];

pub fn button_index(button: Button) -> Option<u32> {
    BUTTONS.iter().position(|b| *b == button).map(|i| i as u32)
}

pub fn axis_index(axis: Axis) -> Option<u32> {
    AXES.iter().position(|a| *a == axis).map(|i| i as u32)
}

fn is_dpad(button: Button) -> bool {
    matches!(
        button,
        Button::DPadUp | Button::DPadDown | Button::DPadLeft | Button::DPadRight
    )
}

fn dpad_direction(gamepad: &Gamepad<'_>) -> PovDirection {
    PovDirection::from_dpad(
        gamepad.is_pressed(Button::DPadUp),
        gamepad.is_pressed(Button::DPadDown),
        gamepad.is_pressed(Button::DPadLeft),
        gamepad.is_pressed(Button::DPadRight),
    )
}

/// Owned copy of one gamepad's state at a point in time.
#[derive(Debug, Clone, Default)]
pub struct GamepadSnapshot {
    name: String,
    buttons: Vec<bool>,
    axes: Vec<f32>,
    pov: PovDirection,
}

impl GamepadSnapshot {
    pub fn capture(gamepad: &Gamepad<'_>) -> Self {
        Self {
            name: gamepad.name().to_string(),
            buttons: BUTTONS.iter().map(|b| gamepad.is_pressed(*b)).collect(),
            axes: AXES.iter().map(|a| gamepad.value(*a)).collect(),
            pov: dpad_direction(gamepad),
        }
    }
}

impl Controller for GamepadSnapshot {
    fn button(&self, index: u32) -> bool {
        self.buttons.get(index as usize).copied().unwrap_or(false)
    }

    fn axis(&self, index: u32) -> f32 {
        self.axes.get(index as usize).copied().unwrap_or(0.0)
    }

    fn pov(&self, index: u32) -> PovDirection {
        if index == 0 {
            self.pov
        } else {
            PovDirection::Center
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Converts a gilrs event into a physical event.
///
/// `gamepad` must already reflect the event (gilrs updates its state before
/// handing the event out), it is read to compose the d-pad direction.
pub fn convert_gilrs_event(event: &EventType, gamepad: &Gamepad<'_>) -> Option<PhysicalEvent> {
    match event {
        EventType::ButtonPressed(button, _) if is_dpad(*button) => Some(PhysicalEvent::PovMoved {
            pov: 0,
            direction: dpad_direction(gamepad),
        }),
        EventType::ButtonReleased(button, _) if is_dpad(*button) => {
            Some(PhysicalEvent::PovMoved {
                pov: 0,
                direction: dpad_direction(gamepad),
            })
        }
        EventType::ButtonPressed(button, _) => {
            button_index(*button).map(|button| PhysicalEvent::ButtonDown { button })
        }
        EventType::ButtonReleased(button, _) => {
            button_index(*button).map(|button| PhysicalEvent::ButtonUp { button })
        }
        EventType::AxisChanged(axis, value, _) => axis_index(*axis).map(|axis| {
            PhysicalEvent::AxisMoved {
                axis,
                value: *value,
            }
        }),
        EventType::Connected => {
            info!("Controller connected: {}", gamepad.name());
            None
        }
        EventType::Disconnected => {
            warn!("Controller disconnected: {}", gamepad.name());
            None
        }
        _ => {
            debug!("Unhandled gilrs event: {:?}", event);
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Failed to initialize gilrs: {0}")]
    InitializationError(String),

    #[error("No gamepad connected")]
    NoGamepad,
}

#[state]
#[derive(Debug, Clone)]
pub enum CollectionState {
    Initializing,
    Collecting,
}

#[machine]
#[derive(Debug)]
pub struct GamepadCollector<S: CollectionState> {
    gilrs: Gilrs,
    active_gamepad: Option<GamepadId>,
}

impl GamepadCollector<Initializing> {
    pub fn create() -> Result<Self, CollectorError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => g,
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(CollectorError::InitializationError(e.to_string()));
            }
        };

        Ok(Self::new(gilrs, None))
    }

    /// Selects the first connected gamepad and starts collecting.
    pub fn initialize(mut self) -> Result<GamepadCollector<Collecting>, CollectorError> {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self
            .gilrs
            .gamepads()
            .filter(|(_, gp)| gp.is_connected())
            .collect();

        if gamepads.is_empty() {
            return Err(CollectorError::NoGamepad);
        }

        info!("Found {} gamepads:", gamepads.len());
        for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
            info!("  [{}] ID: {}, Name: {}", idx, id, gamepad.name());
        }

        let (id, gamepad) = &gamepads[0];
        info!("Selected gamepad: {} ({})", gamepad.name(), id);
        let id = *id;
        drop(gamepads);
        self.active_gamepad = Some(id);

        Ok(self.transition())
    }
}

impl GamepadCollector<Collecting> {
    /// Drains pending gilrs events of the active gamepad.
    pub fn collect_events(&mut self) -> Vec<PhysicalEvent> {
        let mut events = Vec::new();

        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            if Some(id) != self.active_gamepad {
                debug!("Skipping event from non-active gamepad: {:?}", id);
                continue;
            }

            let gamepad = self.gilrs.gamepad(id);
            if let Some(physical) = convert_gilrs_event(&event, &gamepad) {
                debug!("Captured event: {:?}", physical);
                events.push(physical);
            }
        }

        events
    }

    /// Current state of the active gamepad, `None` once it is disconnected.
    pub fn snapshot(&self) -> Option<GamepadSnapshot> {
        let id = self.active_gamepad?;
        let gamepad = self.gilrs.connected_gamepad(id)?;
        Some(GamepadSnapshot::capture(&gamepad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_tables_are_stable() {
        assert_eq!(button_index(Button::South), Some(0));
        assert_eq!(button_index(Button::RightThumb), Some(14));
        assert_eq!(button_index(Button::DPadUp), None);
        assert_eq!(axis_index(Axis::LeftStickY), Some(1));
        assert_eq!(axis_index(Axis::RightZ), Some(5));
        assert_eq!(axis_index(Axis::DPadX), None);
    }

    #[test]
    fn snapshot_reads_out_of_range_as_neutral() {
        let snapshot = GamepadSnapshot::default();
        assert!(!snapshot.button(3));
        assert_eq!(snapshot.axis(400), 0.0);
        assert_eq!(snapshot.pov(1), PovDirection::Center);
    }
}
