use crate::mapping::MappingError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ANALOG_TO_DIGITAL_THRESHOLD: f32 = 0.5;
/// Some gamepads report analog values slightly above 1.0.
pub const DEFAULT_MAX_ACCEPTED_ANALOG_VALUE: f32 = 1.1;

/// Thresholds applied while recording and resolving.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct MappingSettings {
    /// Magnitude from which an analog value counts as a digital +1/-1,
    /// and the minimum deflection for an axis to be recorded.
    pub analog_to_digital_threshold: f32,
    /// Axes reporting a larger magnitude are ignored while recording.
    pub max_accepted_analog_value: f32,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            analog_to_digital_threshold: DEFAULT_ANALOG_TO_DIGITAL_THRESHOLD,
            max_accepted_analog_value: DEFAULT_MAX_ACCEPTED_ANALOG_VALUE,
        }
    }
}

impl MappingSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, MappingError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, MappingError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = MappingSettings::from_toml_str("analog_to_digital_threshold = 0.3\n").unwrap();
        assert_eq!(settings.analog_to_digital_threshold, 0.3);
        assert_eq!(settings.max_accepted_analog_value, 1.1);

        assert_eq!(MappingSettings::from_toml_str("").unwrap(), MappingSettings::default());
    }

    #[test]
    fn settings_survive_toml() {
        let settings = MappingSettings {
            analog_to_digital_threshold: 0.25,
            max_accepted_analog_value: 1.5,
        };
        let text = settings.to_toml_string().unwrap();
        assert_eq!(MappingSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(MappingSettings::from_toml_str("analog_to_digital_threshold = \"high\"").is_err());
    }
}
