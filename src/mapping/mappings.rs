//! Owner of the configured inputs and of every controller's bindings.
//!
//! The lifecycle is a statum state machine with compile-time state safety:
//!
//! ```text
//! Configuring ──(commit)──► Committed
//!  add inputs               record / reset / resolve / (de)serialize
//!  thresholds
//!  default mapping
//! ```
//!
//! The set of configured inputs can only change while configuring, and nothing can be
//! recorded or resolved before it is committed.

use crate::config::MappingSettings;
use crate::controller::Controller;
use crate::mapping::binding::BindingSet;
use crate::mapping::configured::{ConfiguredInput, InputRegistry};
use crate::mapping::error::MappingError;
use crate::mapping::recorder::{RecordResult, Recorder};
use crate::mapping::serializer;
use statum::{machine, state};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Fills an empty binding set for a controller seen for the first time.
/// Returns `true` if the bindings should be used.
pub type DefaultMapping = Box<dyn Fn(&mut BindingSet) -> bool + Send + Sync>;

#[state]
#[derive(Debug, Clone)]
pub enum MappingsState {
    Configuring,
    Committed,
}

#[machine]
pub struct ControllerMappings<S: MappingsState> {
    registry: Arc<InputRegistry>,
    settings: MappingSettings,
    default_mapping: Option<DefaultMapping>,
    /// Bindings per controller name
    binding_sets: BTreeMap<String, BindingSet>,
    recorder: Recorder,
}

impl<S: MappingsState> ControllerMappings<S> {
    pub fn settings(&self) -> &MappingSettings {
        &self.settings
    }

    pub fn configured_input(&self, id: i32) -> Option<&ConfiguredInput> {
        self.registry.get(id)
    }
}

impl ControllerMappings<Configuring> {
    pub fn create() -> Self {
        Self::new(
            Arc::new(InputRegistry::new()),
            MappingSettings::default(),
            None,
            BTreeMap::new(),
            Recorder::default(),
        )
    }

    pub fn add_configured_input(&mut self, input: ConfiguredInput) -> &mut Self {
        Arc::make_mut(&mut self.registry).insert(input);
        self
    }

    pub fn set_settings(&mut self, settings: MappingSettings) -> &mut Self {
        self.settings = settings;
        self
    }

    pub fn set_default_mapping<F>(&mut self, default_mapping: F) -> &mut Self
    where
        F: Fn(&mut BindingSet) -> bool + Send + Sync + 'static,
    {
        self.default_mapping = Some(Box::new(default_mapping));
        self
    }

    /// Freezes the configured inputs.
    pub fn commit(self) -> ControllerMappings<Committed> {
        info!("Committing {} configured inputs", self.registry.len());
        self.transition()
    }
}

impl ControllerMappings<Committed> {
    pub fn registry(&self) -> Arc<InputRegistry> {
        Arc::clone(&self.registry)
    }

    /// Records one configured input from the controller's current state.
    ///
    /// Call at most once per frame while the user is asked to press the input.
    ///
    /// # Panics
    /// If `configured_id` was never added as a configured input.
    pub fn record_mapping<C: Controller + ?Sized>(
        &mut self,
        controller: &C,
        configured_id: i32,
    ) -> RecordResult {
        let input = match self.registry.get(configured_id) {
            Some(input) => *input,
            None => panic!("configured input {configured_id} was never added"),
        };

        let name = controller.name();
        let bindings = self
            .binding_sets
            .entry(name.to_string())
            .or_insert_with(|| BindingSet::new(name));
        bindings.recorded = true;

        let result = self
            .recorder
            .record(bindings, input, controller, &self.settings);
        debug!(
            "Recording configured input {} on {}: {:?}",
            configured_id, name, result
        );
        result
    }

    /// Removes all bindings of the controller and any pending two-button recording.
    ///
    /// Existing [`MappedController`](crate::mapping::MappedController)s keep their
    /// copy until refreshed.
    pub fn reset_mappings(&mut self, controller_name: &str) {
        if self.binding_sets.remove(controller_name).is_some() {
            info!("Mappings reset for {}", controller_name);
        }
        self.recorder.clear(controller_name);
    }

    /// Configured id waiting for its reverse button on this controller, if any.
    pub fn pending_axis(&self, controller_name: &str) -> Option<i32> {
        self.recorder.pending_axis(controller_name)
    }

    /// Bindings of a controller, created from the default mapping on first use.
    pub fn controller_mapping(&mut self, controller_name: &str) -> Option<&BindingSet> {
        if !self.binding_sets.contains_key(controller_name) {
            let default_mapping = self.default_mapping.as_ref()?;
            let mut defaults = BindingSet::new(controller_name);
            if !default_mapping(&mut defaults) {
                return None;
            }
            debug!(
                "Using {} default bindings for {}",
                defaults.len(),
                controller_name
            );
            self.binding_sets.insert(controller_name.to_string(), defaults);
        }

        self.binding_sets.get(controller_name)
    }

    /// Bindings of a controller without falling back to the default mapping.
    pub fn binding_set(&self, controller_name: &str) -> Option<&BindingSet> {
        self.binding_sets.get(controller_name)
    }

    pub fn binding_sets(&self) -> impl Iterator<Item = &BindingSet> {
        self.binding_sets.values()
    }

    /// All recorded bindings in the persisted JSON layout.
    pub fn to_json(&self) -> Result<serde_json::Value, MappingError> {
        serializer::to_json(self.binding_sets.values())
    }

    pub fn to_json_string(&self) -> Result<String, MappingError> {
        Ok(serde_json::to_string_pretty(&self.to_json()?)?)
    }

    /// Replaces the bindings of every controller listed in `json`.
    ///
    /// Either all listed controllers are restored or nothing changes.
    pub fn fill_from_json(&mut self, json: &serde_json::Value) -> Result<(), MappingError> {
        let restored = serializer::from_json(json, &self.registry)?;
        self.install(restored);
        Ok(())
    }

    pub fn fill_from_str(&mut self, json: &str) -> Result<(), MappingError> {
        let restored = serializer::from_str(json, &self.registry)?;
        self.install(restored);
        Ok(())
    }

    fn install(&mut self, restored: Vec<BindingSet>) {
        for bindings in restored {
            let name = bindings.controller_name().to_string();
            info!("Restored {} bindings for {}", bindings.len(), name);
            self.binding_sets.insert(name, bindings);
        }
    }
}
