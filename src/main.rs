use color_eyre::{eyre::eyre, Result};
use padmap::controller::gamepad::Collecting;
use padmap::controller::{Controller, GamepadCollector, GamepadSnapshot, PovDirection};
use padmap::mapping::recorder::{find_high_axis_value, find_pressed_button};
use padmap::mapping::{
    Binding, BindingSet, Committed, ConfiguredInput, ConfiguredInputListener, ControllerMappings,
    InputKind, MappedController, MappedControllerAdapter, RecordResult,
};
use padmap::persistence::MappingStore;
use std::time::Duration;
use tokio::time::{interval, Interval};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const POLL_INTERVAL_MS: u64 = 20;

/// Inputs of the demo application with the label shown while recording.
const INPUTS: [(ConfiguredInput, &str); 6] = [
    (ConfiguredInput { id: 1, kind: InputKind::Button }, "Jump"),
    (ConfiguredInput { id: 2, kind: InputKind::Button }, "Fire"),
    (ConfiguredInput { id: 3, kind: InputKind::Axis }, "Move left/right"),
    (ConfiguredInput { id: 4, kind: InputKind::Axis }, "Move up/down"),
    (ConfiguredInput { id: 5, kind: InputKind::AnalogAxis }, "Throttle"),
    (ConfiguredInput { id: 6, kind: InputKind::DigitalAxis }, "Menu left/right"),
];

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let store = MappingStore::default();
    let settings = store.load_settings().await?;

    let mut mappings = ControllerMappings::create();
    mappings.set_settings(settings).set_default_mapping(default_gamepad_mapping);
    for (input, _) in INPUTS {
        mappings.add_configured_input(input);
    }
    let mut mappings = mappings.commit();
    store.load_mappings(&mut mappings).await?;

    let mut collector = GamepadCollector::create()?.initialize()?;
    let mut ticker = interval(Duration::from_millis(POLL_INTERVAL_MS));

    collector.collect_events();
    let snapshot = collector
        .snapshot()
        .ok_or_else(|| eyre!("Gamepad disconnected before recording"))?;
    let controller_name = snapshot.name().to_string();

    if std::env::args().any(|arg| arg == "--record") {
        mappings.reset_mappings(&controller_name);
        record_all(&mut mappings, &mut collector, &mut ticker).await?;
        store.save_mappings(&mappings).await?;
    } else if mappings.binding_set(&controller_name).is_none() {
        info!(
            "No recorded mappings for {}, using defaults. Start with --record to record them",
            controller_name
        );
    }

    let mut mapped = MappedController::new(snapshot, &mut mappings);
    let mut adapter = MappedControllerAdapter::new(EventLogger, &mappings);

    info!("Forwarding configured events, press Ctrl-C to quit");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                for event in collector.collect_events() {
                    adapter.handle_event(&mut mappings, &controller_name, &event);
                }
                match collector.snapshot() {
                    Some(snapshot) => *mapped.controller_mut() = snapshot,
                    None => {
                        warn!("Gamepad {} disconnected", controller_name);
                        break;
                    }
                }
                debug!(
                    "Polled: move ({:.2}, {:.2}), throttle {:.2}",
                    mapped.configured_axis_value(3),
                    mapped.configured_axis_value(4),
                    mapped.configured_axis_value(5)
                );
            }
        }
    }

    info!("Shutting down");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

/// Layout used for gamepads nobody recorded yet (gilrs button/axis tables).
fn default_gamepad_mapping(set: &mut BindingSet) -> bool {
    [
        Binding::button(1, 0),
        Binding::button(2, 1),
        Binding::axis(3, 0),
        Binding::axis(4, 1),
        Binding::axis(5, 5),
        Binding::pov(6, 0, false),
    ]
    .into_iter()
    .all(|binding| set.put_mapping(binding).is_ok())
}

async fn record_all(
    mappings: &mut ControllerMappings<Committed>,
    collector: &mut GamepadCollector<Collecting>,
    ticker: &mut Interval,
) -> Result<()> {
    let threshold = mappings.settings().analog_to_digital_threshold;

    for (input, label) in INPUTS {
        wait_for_release(collector, ticker, threshold).await?;
        info!("Press the control for \"{}\"", label);

        loop {
            ticker.tick().await;
            collector.collect_events();
            let snapshot = current_snapshot(collector)?;

            match mappings.record_mapping(&snapshot, input.id) {
                RecordResult::Recorded => break,
                RecordResult::NeedSecondButton => {
                    info!("Now press the button for the opposite direction of \"{}\"", label);
                    wait_for_release(collector, ticker, threshold).await?;
                }
                RecordResult::NotAdded => {
                    warn!("That control is already in use, try another one");
                    wait_for_release(collector, ticker, threshold).await?;
                }
                RecordResult::NothingDone | RecordResult::NotAddedNeedButton => {}
            }
        }
    }

    info!("All inputs recorded");
    Ok(())
}

async fn wait_for_release(
    collector: &mut GamepadCollector<Collecting>,
    ticker: &mut Interval,
    threshold: f32,
) -> Result<()> {
    loop {
        ticker.tick().await;
        collector.collect_events();
        let snapshot = current_snapshot(collector)?;

        if find_pressed_button(&snapshot).is_none()
            && find_high_axis_value(&snapshot, threshold, f32::MAX).is_none()
            && snapshot.pov(0) == PovDirection::Center
        {
            return Ok(());
        }
    }
}

fn current_snapshot(
    collector: &GamepadCollector<Collecting>,
) -> Result<GamepadSnapshot> {
    collector
        .snapshot()
        .ok_or_else(|| eyre!("Gamepad disconnected while recording"))
}

struct EventLogger;

impl ConfiguredInputListener for EventLogger {
    fn configured_button_down(&mut self, controller: &str, configured_id: i32) -> bool {
        info!("{}: {} pressed", controller, label(configured_id));
        true
    }

    fn configured_button_up(&mut self, controller: &str, configured_id: i32) -> bool {
        info!("{}: {} released", controller, label(configured_id));
        true
    }

    fn configured_axis_moved(&mut self, controller: &str, configured_id: i32, value: f32) -> bool {
        info!("{}: {} = {:.2}", controller, label(configured_id), value);
        true
    }
}

fn label(configured_id: i32) -> &'static str {
    INPUTS
        .iter()
        .find(|(input, _)| input.id == configured_id)
        .map(|(_, label)| *label)
        .unwrap_or("unknown input")
}
