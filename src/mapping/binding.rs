//! Bindings between configured inputs and physical inputs, per controller.
//!
//! A [`BindingSet`] keeps four lookup indices next to the bindings themselves:
//!
//! ```text
//! configured id ──► Binding
//! button index  ──► configured id   (primary and reverse buttons)
//! axis index    ──► configured id
//! (POV, vertical) ──► configured id
//! ```
//!
//! Every physical input appears in at most one binding and every configured id
//! in at most one binding. Inserts that would break this are rejected as a whole.

use crate::mapping::configured::InputRegistry;
use crate::mapping::error::BindingError;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalInput {
    Button(u32),
    Axis(u32),
    /// One orientation of a POV pad, treated as its own virtual axis.
    Pov { index: u32, vertical: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub configured_id: i32,
    pub primary: PhysicalInput,
    /// Negative direction of an axis simulated by two buttons.
    pub secondary_button: Option<u32>,
}

impl Binding {
    pub fn button(configured_id: i32, button: u32) -> Self {
        Self {
            configured_id,
            primary: PhysicalInput::Button(button),
            secondary_button: None,
        }
    }

    /// An axis driven by two buttons: `positive` reports +1, `negative` -1.
    pub fn button_pair(configured_id: i32, positive: u32, negative: u32) -> Self {
        Self {
            configured_id,
            primary: PhysicalInput::Button(positive),
            secondary_button: Some(negative),
        }
    }

    pub fn axis(configured_id: i32, axis: u32) -> Self {
        Self {
            configured_id,
            primary: PhysicalInput::Axis(axis),
            secondary_button: None,
        }
    }

    pub fn pov(configured_id: i32, index: u32, vertical: bool) -> Self {
        Self {
            configured_id,
            primary: PhysicalInput::Pov { index, vertical },
            secondary_button: None,
        }
    }

    pub fn button_index(&self) -> Option<u32> {
        match self.primary {
            PhysicalInput::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn axis_index(&self) -> Option<u32> {
        match self.primary {
            PhysicalInput::Axis(axis) => Some(axis),
            _ => None,
        }
    }
}

/// All bindings of one physical controller.
#[derive(Debug, Clone, Default)]
pub struct BindingSet {
    controller_name: String,
    /// Set when the bindings were recorded or restored, as opposed to defaults.
    pub recorded: bool,
    by_configured: BTreeMap<i32, Binding>,
    by_button: HashMap<u32, i32>,
    by_axis: HashMap<u32, i32>,
    by_pov: HashMap<(u32, bool), i32>,
}

impl BindingSet {
    pub fn new(controller_name: &str) -> Self {
        Self {
            controller_name: controller_name.to_string(),
            ..Default::default()
        }
    }

    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    /// Adds a binding, or leaves the set untouched if it would alias an existing one.
    pub fn put_mapping(&mut self, binding: Binding) -> Result<(), BindingError> {
        if self.by_configured.contains_key(&binding.configured_id) {
            return Err(BindingError::ConfiguredInputBound(binding.configured_id));
        }

        match binding.primary {
            PhysicalInput::Button(button) => {
                if self.by_button.contains_key(&button) {
                    return Err(BindingError::ButtonInUse(button));
                }
                if let Some(reverse) = binding.secondary_button {
                    if reverse == button {
                        return Err(BindingError::ReverseIsPrimary(button));
                    }
                    if self.by_button.contains_key(&reverse) {
                        return Err(BindingError::ButtonInUse(reverse));
                    }
                    self.by_button.insert(reverse, binding.configured_id);
                }
                self.by_button.insert(button, binding.configured_id);
            }
            PhysicalInput::Axis(axis) => {
                if binding.secondary_button.is_some() {
                    return Err(BindingError::ReverseWithoutButton);
                }
                if self.by_axis.contains_key(&axis) {
                    return Err(BindingError::AxisInUse(axis));
                }
                self.by_axis.insert(axis, binding.configured_id);
            }
            PhysicalInput::Pov { index, vertical } => {
                if binding.secondary_button.is_some() {
                    return Err(BindingError::ReverseWithoutButton);
                }
                if self.by_pov.contains_key(&(index, vertical)) {
                    return Err(BindingError::PovInUse { index, vertical });
                }
                self.by_pov.insert((index, vertical), binding.configured_id);
            }
        }

        self.by_configured.insert(binding.configured_id, binding);
        Ok(())
    }

    pub fn binding(&self, configured_id: i32) -> Option<&Binding> {
        self.by_configured.get(&configured_id)
    }

    /// Bindings in ascending configured id order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.by_configured.values()
    }

    pub fn len(&self) -> usize {
        self.by_configured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_configured.is_empty()
    }

    pub fn is_button_bound(&self, button: u32) -> bool {
        self.by_button.contains_key(&button)
    }

    /// Configured id whose primary button is `button`.
    pub fn configured_from_button(&self, button: u32) -> Option<i32> {
        let id = *self.by_button.get(&button)?;
        let binding = self.by_configured.get(&id)?;
        (binding.secondary_button != Some(button)).then_some(id)
    }

    /// Configured id whose reverse button is `button`.
    pub fn configured_from_reverse_button(&self, button: u32) -> Option<i32> {
        let id = *self.by_button.get(&button)?;
        let binding = self.by_configured.get(&id)?;
        (binding.secondary_button == Some(button)).then_some(id)
    }

    pub fn configured_from_axis(&self, axis: u32) -> Option<i32> {
        self.by_axis.get(&axis).copied()
    }

    pub fn configured_from_pov(&self, index: u32, vertical: bool) -> Option<i32> {
        self.by_pov.get(&(index, vertical)).copied()
    }

    /// True when every configured input of `registry` has a binding.
    pub fn is_complete(&self, registry: &InputRegistry) -> bool {
        registry.ids().all(|id| self.by_configured.contains_key(&id))
    }

    /// Configured ids of `registry` without a binding, ascending.
    pub fn missing_inputs(&self, registry: &InputRegistry) -> Vec<i32> {
        registry
            .ids()
            .filter(|id| !self.by_configured.contains_key(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::configured::ConfiguredInput;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn rejects_second_binding_for_configured_input() {
        let mut set = BindingSet::new("pad");
        set.put_mapping(Binding::button(1, 3)).unwrap();

        assert_eq!(
            set.put_mapping(Binding::axis(1, 0)),
            Err(BindingError::ConfiguredInputBound(1))
        );
        assert_eq!(set.configured_from_axis(0), None);
    }

    #[test]
    fn reverse_buttons_share_the_button_index() {
        let mut set = BindingSet::new("pad");
        set.put_mapping(Binding::button_pair(5, 1, 4)).unwrap();

        assert_eq!(
            set.put_mapping(Binding::button(6, 4)),
            Err(BindingError::ButtonInUse(4))
        );
        assert_eq!(
            set.put_mapping(Binding::button_pair(7, 2, 1)),
            Err(BindingError::ButtonInUse(1))
        );
        assert_eq!(set.configured_from_button(1), Some(5));
        assert_eq!(set.configured_from_button(4), None);
        assert_eq!(set.configured_from_reverse_button(4), Some(5));
        assert_eq!(set.configured_from_reverse_button(1), None);
    }

    #[test]
    fn failed_pair_insert_leaves_no_trace() {
        let mut set = BindingSet::new("pad");
        set.put_mapping(Binding::button(1, 8)).unwrap();

        // primary is free, reverse is taken
        assert!(set.put_mapping(Binding::button_pair(2, 3, 8)).is_err());
        assert!(!set.is_button_bound(3));
        assert!(set.binding(2).is_none());

        assert_eq!(
            set.put_mapping(Binding::button_pair(2, 3, 3)),
            Err(BindingError::ReverseIsPrimary(3))
        );
        assert!(!set.is_button_bound(3));
    }

    #[test]
    fn pov_orientations_are_separate_keys() {
        let mut set = BindingSet::new("pad");
        set.put_mapping(Binding::pov(5, 0, false)).unwrap();
        set.put_mapping(Binding::pov(7, 0, true)).unwrap();

        assert_eq!(
            set.put_mapping(Binding::pov(8, 0, true)),
            Err(BindingError::PovInUse {
                index: 0,
                vertical: true
            })
        );
        assert_eq!(set.configured_from_pov(0, false), Some(5));
        assert_eq!(set.configured_from_pov(0, true), Some(7));
        assert_eq!(set.configured_from_pov(1, true), None);
    }

    #[test]
    fn large_pov_indices_stay_distinct() {
        let mut set = BindingSet::new("pad");
        set.put_mapping(Binding::pov(1, 500_000_000, false)).unwrap();
        set.put_mapping(Binding::pov(2, u32::MAX, true)).unwrap();
        set.put_mapping(Binding::pov(3, 0, false)).unwrap();

        assert_eq!(set.configured_from_pov(500_000_000, false), Some(1));
        assert_eq!(set.configured_from_pov(u32::MAX, true), Some(2));
        assert_eq!(set.configured_from_pov(u32::MAX, false), None);
        assert_eq!(set.configured_from_pov(0, false), Some(3));
    }

    #[test]
    fn reverse_button_requires_button_primary() {
        let mut set = BindingSet::new("pad");
        let binding = Binding {
            configured_id: 1,
            primary: PhysicalInput::Axis(2),
            secondary_button: Some(3),
        };
        assert_eq!(
            set.put_mapping(binding),
            Err(BindingError::ReverseWithoutButton)
        );
        assert!(set.is_empty());
    }

    #[test]
    fn completeness_follows_registry() {
        let mut registry = InputRegistry::new();
        registry.insert(ConfiguredInput::button(1));
        registry.insert(ConfiguredInput::axis(2));

        let mut set = BindingSet::new("pad");
        set.put_mapping(Binding::button(1, 0)).unwrap();
        assert!(!set.is_complete(&registry));
        assert_eq!(set.missing_inputs(&registry), vec![2]);

        set.put_mapping(Binding::axis(2, 0)).unwrap();
        assert!(set.is_complete(&registry));
    }

    fn random_binding(rng: &mut StdRng) -> Binding {
        let id = rng.gen_range(0..20);
        match rng.gen_range(0..4) {
            0 => Binding::button(id, rng.gen_range(0..12)),
            1 => Binding::button_pair(id, rng.gen_range(0..12), rng.gen_range(0..12)),
            2 => Binding::axis(id, rng.gen_range(0..6)),
            _ => Binding::pov(id, rng.gen_range(0..2), rng.gen_bool(0.5)),
        }
    }

    #[test]
    fn random_insert_sequences_never_alias() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut set = BindingSet::new("pad");
            let mut accepted = 0;

            for _ in 0..60 {
                let before = set.len();
                match set.put_mapping(random_binding(&mut rng)) {
                    Ok(()) => {
                        accepted += 1;
                        assert_eq!(set.len(), before + 1);
                    }
                    Err(_) => assert_eq!(set.len(), before),
                }
            }
            assert_eq!(set.len(), accepted);

            let mut buttons = HashSet::new();
            let mut axes = HashSet::new();
            let mut povs = HashSet::new();
            let mut ids = HashSet::new();
            for binding in set.bindings() {
                assert!(ids.insert(binding.configured_id));
                match binding.primary {
                    PhysicalInput::Button(button) => assert!(buttons.insert(button)),
                    PhysicalInput::Axis(axis) => assert!(axes.insert(axis)),
                    PhysicalInput::Pov { index, vertical } => {
                        assert!(povs.insert((index, vertical)))
                    }
                }
                if let Some(reverse) = binding.secondary_button {
                    assert!(buttons.insert(reverse));
                }
            }
            assert_eq!(buttons.len(), set.by_button.len());
            assert_eq!(axes.len(), set.by_axis.len());
            assert_eq!(povs.len(), set.by_pov.len());
        }
    }
}
