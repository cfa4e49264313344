//! Persisted layout of recorded bindings.
//!
//! ```json
//! [ { "name": "Pad", "mapping": [
//!       { "confId": 1, "button": 3 },
//!       { "confId": 2, "button": 0, "buttonR": 1 },
//!       { "confId": 3, "axis": 2 },
//!       { "confId": 4, "pov": 0, "vertical": true } ] } ]
//! ```
//!
//! The binding kind is given by which fields are present, checked in the order
//! `axis`, `pov`, `buttonR`, `button`.

use crate::mapping::binding::{Binding, BindingSet, PhysicalInput};
use crate::mapping::configured::InputRegistry;
use crate::mapping::error::MappingError;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ControllerRecord {
    name: String,
    mapping: Vec<BindingRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BindingRecord {
    conf_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    axis: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pov: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vertical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    button: Option<u32>,
    #[serde(default, rename = "buttonR", skip_serializing_if = "Option::is_none")]
    button_r: Option<u32>,
}

impl From<&Binding> for BindingRecord {
    fn from(binding: &Binding) -> Self {
        let mut record = BindingRecord {
            conf_id: binding.configured_id,
            ..Default::default()
        };
        match binding.primary {
            PhysicalInput::Axis(axis) => record.axis = Some(axis),
            PhysicalInput::Pov { index, vertical } => {
                record.pov = Some(index);
                record.vertical = Some(vertical);
            }
            PhysicalInput::Button(button) => {
                record.button = Some(button);
                record.button_r = binding.secondary_button;
            }
        }
        record
    }
}

impl BindingRecord {
    fn into_binding(self, controller: &str) -> Result<Binding, MappingError> {
        let invalid = |reason: &str| MappingError::InvalidRecord {
            controller: controller.to_string(),
            configured_id: self.conf_id,
            reason: reason.to_string(),
        };

        if let Some(axis) = self.axis {
            Ok(Binding::axis(self.conf_id, axis))
        } else if let Some(pov) = self.pov {
            let vertical = self
                .vertical
                .ok_or_else(|| invalid("POV binding without \"vertical\""))?;
            Ok(Binding::pov(self.conf_id, pov, vertical))
        } else if let Some(reverse) = self.button_r {
            let button = self
                .button
                .ok_or_else(|| invalid("\"buttonR\" without \"button\""))?;
            Ok(Binding::button_pair(self.conf_id, button, reverse))
        } else if let Some(button) = self.button {
            Ok(Binding::button(self.conf_id, button))
        } else {
            Err(invalid("no physical input"))
        }
    }
}

/// Serializes the binding sets flagged as recorded.
pub fn to_json<'a>(
    binding_sets: impl IntoIterator<Item = &'a BindingSet>,
) -> Result<serde_json::Value, MappingError> {
    let records: Vec<ControllerRecord> = binding_sets
        .into_iter()
        .filter(|set| set.recorded)
        .map(|set| ControllerRecord {
            name: set.controller_name().to_string(),
            mapping: set.bindings().map(BindingRecord::from).collect(),
        })
        .collect();

    Ok(serde_json::to_value(&records)?)
}

/// Parses binding sets, all marked as recorded. Fails as a whole on the first bad record.
pub fn from_json(
    json: &serde_json::Value,
    registry: &InputRegistry,
) -> Result<Vec<BindingSet>, MappingError> {
    let records = Vec::<ControllerRecord>::deserialize(json)?;
    build(records, registry)
}

pub fn from_str(json: &str, registry: &InputRegistry) -> Result<Vec<BindingSet>, MappingError> {
    let records: Vec<ControllerRecord> = serde_json::from_str(json)?;
    build(records, registry)
}

fn build(
    records: Vec<ControllerRecord>,
    registry: &InputRegistry,
) -> Result<Vec<BindingSet>, MappingError> {
    let mut sets = Vec::with_capacity(records.len());

    for record in records {
        let mut set = BindingSet::new(&record.name);
        set.recorded = true;

        for binding_record in record.mapping {
            let binding = binding_record.into_binding(&record.name)?;
            if !registry.contains(binding.configured_id) {
                warn!(
                    "Mapping for {} binds unknown configured input {}",
                    record.name, binding.configured_id
                );
            }
            set.put_mapping(binding)
                .map_err(|source| MappingError::Conflict {
                    controller: record.name.clone(),
                    source,
                })?;
        }

        sets.push(set);
    }

    Ok(sets)
}
