//! Keypad access: login, rejection, lockout on repeated wrong codes.

use comfortctl::app::events::AppEvent;
use comfortctl::app::ports::Lamp;
use comfortctl::app::service::Controller;
use comfortctl::config::SystemConfig;
use comfortctl::fsm::Mode;

use crate::mock_hw::{ActuatorCall, MockBoard, RecordingSink};

fn started(config: SystemConfig) -> (Controller<MockBoard>, MockBoard, RecordingSink) {
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::default();
    let mut ctl = Controller::new(config);
    ctl.start(&mut hw, &mut sink);
    (ctl, hw, sink)
}

/// Feed `keys` and run one pass per key.
fn enter(ctl: &mut Controller<MockBoard>, hw: &mut MockBoard, sink: &mut RecordingSink, keys: &str) {
    hw.type_keys(keys);
    for _ in keys.chars() {
        ctl.tick(hw, sink);
    }
}

#[test]
fn boot_prompts_for_code_with_outputs_off() {
    let (ctl, hw, sink) = started(SystemConfig::default());
    assert_eq!(ctl.mode(), Mode::Init);
    assert!(hw.screen_text().contains("Enter code:"));
    assert_eq!(hw.calls.first().map(|c| c.call), Some(ActuatorCall::AllOff));
    assert!(sink.contains(&AppEvent::Started(Mode::Init)));
}

#[test]
fn correct_code_grants_access() {
    let (mut ctl, mut hw, mut sink) = started(SystemConfig::default());
    enter(&mut ctl, &mut hw, &mut sink, "1234*");

    assert_eq!(ctl.mode(), Mode::Monitoring);
    assert_eq!(ctl.failures(), 0);
    assert!(sink.contains(&AppEvent::AccessGranted));
    assert!(hw.is_on(ActuatorCall::Lamp(Lamp::Green, true)));
}

#[test]
fn typed_keys_are_never_echoed_in_clear() {
    let (mut ctl, mut hw, mut sink) = started(SystemConfig::default());
    enter(&mut ctl, &mut hw, &mut sink, "123");
    let text = hw.screen_text();
    assert!(!text.contains('1'));
    assert_eq!(text.matches('*').count(), 3);
}

#[test]
fn wrong_code_counts_and_reprompts() {
    let (mut ctl, mut hw, mut sink) = started(SystemConfig::default());
    let before = hw.now_ms;
    enter(&mut ctl, &mut hw, &mut sink, "4321*");

    assert_eq!(ctl.mode(), Mode::Init);
    assert_eq!(ctl.failures(), 1);
    assert!(sink.contains(&AppEvent::AccessDenied { failures: 1 }));
    assert!(hw.screen_text().contains("Enter code:"));
    assert!(hw.now_ms - before >= 2_000);
}

#[test]
fn third_consecutive_mismatch_locks() {
    let (mut ctl, mut hw, mut sink) = started(SystemConfig::default());
    enter(&mut ctl, &mut hw, &mut sink, "1111*");
    enter(&mut ctl, &mut hw, &mut sink, "2222*");
    assert_eq!(ctl.mode(), Mode::Init);
    enter(&mut ctl, &mut hw, &mut sink, "3333*");

    assert_eq!(ctl.mode(), Mode::Locked);
    assert!(sink.contains(&AppEvent::LockedOut));
}

#[test]
fn success_between_failures_resets_count() {
    let (mut ctl, mut hw, mut sink) = started(SystemConfig::default());
    enter(&mut ctl, &mut hw, &mut sink, "1111*");
    enter(&mut ctl, &mut hw, &mut sink, "2222*");
    assert_eq!(ctl.failures(), 2);
    enter(&mut ctl, &mut hw, &mut sink, "1234*");
    assert_eq!(ctl.failures(), 0);
    assert_eq!(ctl.mode(), Mode::Monitoring);
}

#[test]
fn eight_char_code_and_ignored_ninth_key() {
    let mut config = SystemConfig::default();
    config.credential.clear();
    let _ = config.credential.push_str("1A2B3C4D");
    let (mut ctl, mut hw, mut sink) = started(config);

    // Ninth key '9' is dropped; the full eight are compared.
    enter(&mut ctl, &mut hw, &mut sink, "1A2B3C4D9*");
    assert_eq!(ctl.mode(), Mode::Monitoring);
}

#[test]
fn lockout_runs_full_window_then_returns_to_prompt() {
    let (mut ctl, mut hw, mut sink) = started(SystemConfig::default());
    enter(&mut ctl, &mut hw, &mut sink, "0*0*0*");
    assert_eq!(ctl.mode(), Mode::Locked);

    let start = hw.now_ms;
    ctl.tick(&mut hw, &mut sink);

    assert_eq!(hw.now_ms - start, 7_000);
    assert_eq!(ctl.mode(), Mode::Init);
    assert_eq!(ctl.failures(), 0);
    assert_eq!(ctl.alarm_count(), 0);
    assert!(hw.screen_text().contains("Enter code:"));

    let episode = hw.calls_since(start);
    let blue_flashes = episode
        .iter()
        .filter(|c| c.call == ActuatorCall::Lamp(Lamp::Blue, true))
        .count();
    assert_eq!(blue_flashes, 7);
    // Green is held high for the whole episode, never dropped mid-window.
    assert!(
        !episode
            .iter()
            .any(|c| c.call == ActuatorCall::Lamp(Lamp::Green, false))
    );
    assert!(
        episode
            .iter()
            .filter(|c| c.call == ActuatorCall::Lamp(Lamp::Green, true))
            .count()
            >= 14
    );
    assert!(!hw.is_on(ActuatorCall::Lamp(Lamp::Green, true)));
}

#[test]
fn keypad_is_dead_during_lockout() {
    let (mut ctl, mut hw, mut sink) = started(SystemConfig::default());
    enter(&mut ctl, &mut hw, &mut sink, "0*0*0*");
    hw.type_keys("1234*");
    ctl.tick(&mut hw, &mut sink);
    // The lockout pass consumed no keys.
    assert_eq!(hw.keys.len(), 5);
    assert_eq!(ctl.mode(), Mode::Init);

    for _ in 0..5 {
        ctl.tick(&mut hw, &mut sink);
    }
    assert_eq!(ctl.mode(), Mode::Monitoring);
}
