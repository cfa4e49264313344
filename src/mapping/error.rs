//! Error definitions for the mapping module

use thiserror::Error;

/// Why a binding could not be added to a binding set.
///
/// Nothing is changed when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("configured input {0} is already bound")]
    ConfiguredInputBound(i32),

    #[error("button {0} is already bound")]
    ButtonInUse(u32),

    #[error("reverse button {0} is the same as the primary button")]
    ReverseIsPrimary(u32),

    #[error("a reverse button needs a button as primary input")]
    ReverseWithoutButton,

    #[error("axis {0} is already bound")]
    AxisInUse(u32),

    #[error("POV {index} is already bound (vertical: {vertical})")]
    PovInUse { index: u32, vertical: bool },
}

/// Errors raised while restoring or storing mappings and settings
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("malformed mapping data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid binding for configured input {configured_id} of controller {controller}: {reason}")]
    InvalidRecord {
        controller: String,
        configured_id: i32,
        reason: String,
    },

    #[error("conflicting binding for controller {controller}: {source}")]
    Conflict {
        controller: String,
        #[source]
        source: BindingError,
    },

    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("could not serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),
}
