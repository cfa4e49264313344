//! Physical controller side of the mapping.
//!
//! Everything the mapping needs from a device is the [`Controller`] capability
//! (buttons, axes and POV hats by index) plus [`PhysicalEvent`]s for push delivery.
//!
//! ```text
//! gilrs ──► GamepadCollector ──► GamepadSnapshot (poll)
//!                          └───► PhysicalEvent   (push)
//! ```

pub mod controller;
pub mod gamepad;
pub mod virtual_controller;

pub use controller::{Controller, PhysicalEvent, PovDirection};
pub use gamepad::{GamepadCollector, GamepadSnapshot};
pub use virtual_controller::VirtualController;
