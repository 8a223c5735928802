//! Monitoring: sampling cadence, display refresh, RFID comfort bias.

use comfortctl::app::events::AppEvent;
use comfortctl::app::ports::Lamp;
use comfortctl::app::service::Controller;
use comfortctl::comfort::Actuation;
use comfortctl::config::SystemConfig;
use comfortctl::error::SensorError;
use comfortctl::fsm::Mode;
use comfortctl::identity::IdentityClass;
use comfortctl::sensors::SensorSample;

use crate::mock_hw::{ActuatorCall, MockBoard, RecordingSink};

const RAISE: [u8; 4] = [0xE6, 0xC5, 0xD4, 0x38];
const LOWER: [u8; 4] = [0xE1, 0xB8, 0xAA, 0x00];

fn logged_in() -> (Controller<MockBoard>, MockBoard, RecordingSink) {
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::default();
    let mut ctl = Controller::new(SystemConfig::default());
    ctl.start(&mut hw, &mut sink);
    hw.type_keys("1234*");
    for _ in 0..5 {
        ctl.tick(&mut hw, &mut sink);
    }
    assert_eq!(ctl.mode(), Mode::Monitoring);
    (ctl, hw, sink)
}

/// Run passes `step_ms` apart until `duration_ms` of virtual time elapsed.
fn run_for(
    ctl: &mut Controller<MockBoard>,
    hw: &mut MockBoard,
    sink: &mut RecordingSink,
    duration_ms: u64,
    step_ms: u64,
) {
    let end = hw.now_ms + duration_ms;
    while hw.now_ms < end {
        hw.advance(step_ms);
        ctl.tick(hw, sink);
    }
}

#[test]
fn raise_tag_sets_pmv_and_runs_fan_for_five_seconds() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.present_tag(RAISE);
    ctl.tick(&mut hw, &mut sink);

    assert_eq!(ctl.pmv(), 2.0);
    assert_eq!(
        hw.span(ActuatorCall::Fan(true), ActuatorCall::Fan(false)),
        Some(5_000)
    );
    assert!(!hw.is_on(ActuatorCall::Fan(true)));
    assert!(sink.contains(&AppEvent::IdentityRead {
        uid: RAISE,
        class: IdentityClass::Raise
    }));
    assert!(sink.contains(&AppEvent::ComfortUpdated { pmv: 2.0 }));
    assert!(sink.contains(&AppEvent::Actuation(Actuation::Fan { dwell_ms: 5_000 })));
    assert_eq!(ctl.mode(), Mode::Monitoring);
}

#[test]
fn lower_tag_lights_blue_and_red_for_four_seconds() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.present_tag(LOWER);
    ctl.tick(&mut hw, &mut sink);

    assert_eq!(ctl.pmv(), -2.0);
    assert_eq!(
        hw.span(
            ActuatorCall::Lamp(Lamp::Blue, true),
            ActuatorCall::Lamp(Lamp::Blue, false)
        ),
        Some(4_000)
    );
    assert_eq!(
        hw.span(
            ActuatorCall::Lamp(Lamp::Red, true),
            ActuatorCall::Lamp(Lamp::Red, false)
        ),
        Some(4_000)
    );
    assert!(!hw.is_on(ActuatorCall::Lamp(Lamp::Blue, true)));
    assert!(!hw.is_on(ActuatorCall::Lamp(Lamp::Red, true)));
    // Status lamp is untouched by the cooling burst.
    assert!(hw.is_on(ActuatorCall::Lamp(Lamp::Green, true)));
}

#[test]
fn no_tag_never_changes_pmv() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.present_tag(RAISE);
    ctl.tick(&mut hw, &mut sink);
    let fan_runs = hw.count(ActuatorCall::Fan(true));

    run_for(&mut ctl, &mut hw, &mut sink, 20_000, 100);
    assert_eq!(ctl.pmv(), 2.0);
    assert_eq!(hw.count(ActuatorCall::Fan(true)), fan_runs);
}

#[test]
fn unknown_tag_is_neutral_and_session_closed() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.present_tag([0x01, 0x02, 0x03, 0x04]);
    ctl.tick(&mut hw, &mut sink);

    assert_eq!(ctl.pmv(), 0.0);
    assert_eq!(hw.halts, 1);
    assert_eq!(hw.count(ActuatorCall::Fan(true)), 0);
    assert!(sink.contains(&AppEvent::IdentityRead {
        uid: [0x01, 0x02, 0x03, 0x04],
        class: IdentityClass::Neutral
    }));
}

#[test]
fn one_identity_transaction_per_pass() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.present_tag(LOWER);
    hw.present_tag(RAISE);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(hw.halts, 1);
    assert_eq!(ctl.pmv(), -2.0);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(hw.halts, 2);
    assert_eq!(ctl.pmv(), 2.0);
}

#[test]
fn sensors_sample_on_their_own_cadence() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    sink.events.clear();
    run_for(&mut ctl, &mut hw, &mut sink, 6_000, 10);

    let light = sink.count_where(|e| matches!(e, AppEvent::Sample(SensorSample::Light(_))));
    let temp = sink.count_where(|e| matches!(e, AppEvent::Sample(SensorSample::Temperature(_))));
    let hum = sink.count_where(|e| matches!(e, AppEvent::Sample(SensorSample::Humidity(_))));
    assert_eq!((light, temp, hum), (6, 4, 3));
}

#[test]
fn display_refreshes_every_three_seconds() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    let clears = hw.clears;
    run_for(&mut ctl, &mut hw, &mut sink, 2_900, 100);
    assert_eq!(hw.clears, clears);

    run_for(&mut ctl, &mut hw, &mut sink, 100, 100);
    assert_eq!(hw.clears, clears + 1);
    let text = hw.screen_text();
    assert!(text.contains("T:"));
    assert!(text.contains("22.0"));
    assert!(text.contains("L:"));
    assert!(text.contains("600"));
}

#[test]
fn failed_sensor_shows_no_data() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.temperature = Err(SensorError::ChecksumMismatch);
    run_for(&mut ctl, &mut hw, &mut sink, 3_000, 100);

    assert!(sink.contains(&AppEvent::Sample(SensorSample::Temperature(None))));
    assert!(hw.screen_text().contains("--"));
    assert_eq!(ctl.build_telemetry(hw.now_ms).temperature_c, None);
}
