use padmap::controller::{PovDirection, VirtualController};
use padmap::mapping::{
    Binding, ConfiguredInput, ControllerMappings, MappedController, MappingError, RecordResult,
};
use serde_json::json;

#[test]
fn round_trips_through_reset() {
    let mut mappings = ControllerMappings::create();
    mappings
        .add_configured_input(ConfiguredInput::button(1))
        .add_configured_input(ConfiguredInput::axis(2))
        .add_configured_input(ConfiguredInput::axis(3))
        .add_configured_input(ConfiguredInput::axis(4));
    let mut mappings = mappings.commit();

    let mut pad = VirtualController::new("TEST");
    pad.set_axis(0, 1.0);
    assert_eq!(mappings.record_mapping(&pad, 2), RecordResult::Recorded);
    pad.press_only(2);
    assert_eq!(mappings.record_mapping(&pad, 1), RecordResult::Recorded);
    pad.press_only(1);
    assert_eq!(mappings.record_mapping(&pad, 3), RecordResult::NeedSecondButton);
    pad.press_only(0);
    assert_eq!(mappings.record_mapping(&pad, 3), RecordResult::Recorded);
    pad.release_all();
    pad.set_pov(0, PovDirection::East);
    assert_eq!(mappings.record_mapping(&pad, 4), RecordResult::Recorded);

    let json = mappings.to_json().unwrap();
    assert_eq!(
        json,
        json!([{ "name": "TEST", "mapping": [
            { "confId": 1, "button": 2 },
            { "confId": 2, "axis": 0 },
            { "confId": 3, "button": 1, "buttonR": 0 },
            { "confId": 4, "pov": 0, "vertical": false }
        ]}])
    );

    let mut mapped = MappedController::new(pad, &mut mappings);
    mappings.reset_mappings("TEST");
    mapped.refresh_mapping_cache(&mut mappings);
    assert_eq!(mapped.configured_axis_value(4), 0.0);

    mappings.fill_from_json(&json).unwrap();
    mapped.refresh_mapping_cache(&mut mappings);

    assert_eq!(mapped.configured_axis_value(4), 1.0);
    mapped.controller_mut().press_only(2);
    assert!(mapped.is_button_pressed(1));
    mapped.controller_mut().press_only(1);
    assert_eq!(mapped.configured_axis_value(3), 1.0);
    assert!(mappings.binding_set("TEST").unwrap().recorded);
}

#[test]
fn default_bindings_are_not_written() {
    let mut mappings = ControllerMappings::create();
    mappings
        .add_configured_input(ConfiguredInput::axis(0))
        .add_configured_input(ConfiguredInput::button(1))
        .set_default_mapping(|set| {
            set.put_mapping(Binding::axis(0, 5)).is_ok()
                && set.put_mapping(Binding::button(1, 2)).is_ok()
        });
    let mut mappings = mappings.commit();

    assert!(mappings.controller_mapping("TEST").is_some());
    assert_eq!(mappings.to_json_string().unwrap(), "[]");
}

#[test]
fn loading_replaces_only_listed_controllers() {
    let mut mappings = ControllerMappings::create();
    mappings.add_configured_input(ConfiguredInput::button(1));
    let mut mappings = mappings.commit();

    let mut first = VirtualController::new("first");
    let mut second = VirtualController::new("second");
    first.press_only(3);
    second.press_only(4);
    mappings.record_mapping(&first, 1);
    mappings.record_mapping(&second, 1);

    mappings
        .fill_from_str(r#"[{ "name": "first", "mapping": [{ "confId": 1, "button": 7 }] }]"#)
        .unwrap();

    let first_set = mappings.binding_set("first").unwrap();
    assert_eq!(first_set.len(), 1);
    assert_eq!(first_set.configured_from_button(7), Some(1));
    assert_eq!(first_set.configured_from_button(3), None);
    assert_eq!(
        mappings.binding_set("second").unwrap().configured_from_button(4),
        Some(1)
    );
}

#[test]
fn later_duplicate_controller_wins() {
    let mut mappings = ControllerMappings::create();
    mappings.add_configured_input(ConfiguredInput::button(1));
    let mut mappings = mappings.commit();

    mappings
        .fill_from_json(&json!([
            { "name": "pad", "mapping": [{ "confId": 1, "button": 1 }] },
            { "name": "pad", "mapping": [{ "confId": 1, "button": 2 }] }
        ]))
        .unwrap();

    assert_eq!(
        mappings.binding_set("pad").unwrap().binding(1),
        Some(&Binding::button(1, 2))
    );
}

#[test]
fn failed_load_changes_nothing() {
    let mut mappings = ControllerMappings::create();
    mappings.add_configured_input(ConfiguredInput::button(1));
    let mut mappings = mappings.commit();

    let mut pad = VirtualController::new("pad");
    pad.press_only(5);
    mappings.record_mapping(&pad, 1);

    let result = mappings.fill_from_json(&json!([
        { "name": "pad", "mapping": [{ "confId": 1, "button": 9 }] },
        { "name": "other", "mapping": [{ "confId": 1 }] }
    ]));
    assert!(matches!(result, Err(MappingError::InvalidRecord { .. })));
    assert_eq!(
        mappings.binding_set("pad").unwrap().binding(1),
        Some(&Binding::button(1, 5))
    );
    assert!(mappings.binding_set("other").is_none());

    assert!(matches!(
        mappings.fill_from_str("not json"),
        Err(MappingError::Json(_))
    ));
}

#[test]
fn unknown_configured_ids_are_kept() {
    let mut mappings = ControllerMappings::create();
    mappings.add_configured_input(ConfiguredInput::button(1));
    let mut mappings = mappings.commit();

    mappings
        .fill_from_json(&json!([{ "name": "pad", "mapping": [{ "confId": 99, "axis": 2 }] }]))
        .unwrap();

    let registry = mappings.registry();
    let set = mappings.binding_set("pad").unwrap();
    assert_eq!(set.configured_from_axis(2), Some(99));
    assert_eq!(set.missing_inputs(&registry), vec![1]);
}
