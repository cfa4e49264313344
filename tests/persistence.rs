use padmap::config::MappingSettings;
use padmap::controller::VirtualController;
use padmap::mapping::{Binding, ConfiguredInput, ControllerMappings, RecordResult};
use padmap::persistence::MappingStore;
use tempfile::TempDir;

fn committed() -> ControllerMappings<padmap::mapping::Committed> {
    let mut mappings = ControllerMappings::create();
    mappings
        .add_configured_input(ConfiguredInput::button(1))
        .add_configured_input(ConfiguredInput::axis(2));
    mappings.commit()
}

#[tokio::test]
async fn missing_files_are_not_errors() {
    let dir = TempDir::new().unwrap();
    let store = MappingStore::at(dir.path().join("padmap"));

    assert_eq!(store.load_settings().await.unwrap(), MappingSettings::default());

    let mut mappings = committed();
    assert!(!store.load_mappings(&mut mappings).await.unwrap());
    assert_eq!(mappings.binding_sets().count(), 0);
}

#[tokio::test]
async fn mappings_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let store = MappingStore::at(dir.path().join("nested").join("padmap"));

    let mut mappings = committed();
    let mut pad = VirtualController::new("pad");
    pad.press_only(3);
    assert_eq!(mappings.record_mapping(&pad, 1), RecordResult::Recorded);
    pad.press_only(4);
    assert_eq!(mappings.record_mapping(&pad, 2), RecordResult::NeedSecondButton);
    pad.press_only(5);
    assert_eq!(mappings.record_mapping(&pad, 2), RecordResult::Recorded);

    store.save_mappings(&mappings).await.unwrap();
    assert!(store.mappings_path().exists());

    let mut restored = committed();
    assert!(store.load_mappings(&mut restored).await.unwrap());
    let set = restored.binding_set("pad").unwrap();
    assert!(set.recorded);
    assert_eq!(set.binding(1), Some(&Binding::button(1, 3)));
    assert_eq!(set.binding(2), Some(&Binding::button_pair(2, 4, 5)));
}

#[tokio::test]
async fn settings_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let store = MappingStore::at(dir.path());
    let settings = MappingSettings {
        analog_to_digital_threshold: 0.3,
        max_accepted_analog_value: 1.2,
    };

    store.save_settings(&settings).await.unwrap();
    assert_eq!(store.load_settings().await.unwrap(), settings);
}

#[tokio::test]
async fn corrupt_mappings_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = MappingStore::at(dir.path());
    tokio::fs::write(store.mappings_path(), "[{\"name\": 5}]")
        .await
        .unwrap();

    let mut mappings = committed();
    assert!(store.load_mappings(&mut mappings).await.is_err());
    assert!(mappings.binding_set("pad").is_none());
}
