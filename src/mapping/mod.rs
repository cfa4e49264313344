//! Mapping of physical controller inputs onto application-defined configured inputs.
//!
//! ```text
//! ControllerMappings<Configuring> ──(commit)──► ControllerMappings<Committed>
//!                                                   │
//!            ┌──────────────────┬───────────────────┼──────────────────┐
//!            ▼                  ▼                   ▼                  ▼
//!        Recorder        MappedController   MappedControllerAdapter  serializer
//!   (interactive binds)      (poll)              (push)            (JSON store)
//! ```
//!
//! All of them share one [`BindingSet`] per controller name.

pub mod adapter;
pub mod binding;
pub mod configured;
pub mod error;
pub mod mappings;
pub mod recorder;
pub mod resolver;
pub mod serializer;

pub use adapter::{ConfiguredInputListener, MappedControllerAdapter, PovHandled};
pub use binding::{Binding, BindingSet, PhysicalInput};
pub use configured::{ConfiguredInput, InputKind, InputRegistry};
pub use error::{BindingError, MappingError};
pub use mappings::{Committed, Configuring, ControllerMappings, DefaultMapping};
pub use recorder::{RecordResult, MAX_SCANNED_INDEX};
pub use resolver::MappedController;
