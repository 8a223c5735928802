//! Hot-and-dark alarm episodes and escalation to lockout.

use comfortctl::app::events::AppEvent;
use comfortctl::app::ports::Lamp;
use comfortctl::app::service::Controller;
use comfortctl::config::SystemConfig;
use comfortctl::error::SensorError;
use comfortctl::fsm::Mode;

use crate::mock_hw::{ActuatorCall, MockBoard, RecordingSink};

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

/// Make the room hot and dark and let both sensors sample it.
fn hot_and_dark(ctl: &mut Controller<MockBoard>, hw: &mut MockBoard, sink: &mut RecordingSink) {
    hw.set_room(27.0, 50);
    hw.advance(1_500);
    ctl.tick(hw, sink);
}

#[test]
fn hot_and_dark_enters_alarm_on_next_pass() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hot_and_dark(&mut ctl, &mut hw, &mut sink);

    assert_eq!(ctl.mode(), Mode::Alarm);
    assert_eq!(ctl.alarm_count(), 1);
    assert!(sink.contains(&AppEvent::AlarmRaised { count: 1 }));
    assert!(sink.contains(&AppEvent::ModeChanged {
        from: Mode::Monitoring,
        to: Mode::Alarm
    }));
}

#[test]
fn hot_but_bright_or_dark_but_cool_is_quiet() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.set_room(30.0, 500);
    hw.advance(1_500);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(ctl.mode(), Mode::Monitoring);

    hw.set_room(20.0, 10);
    hw.advance(1_500);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(ctl.mode(), Mode::Monitoring);
}

#[test]
fn failed_temperature_read_cannot_confirm_alarm() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hw.light = 10;
    hw.temperature = Err(SensorError::NoResponse);
    for _ in 0..20 {
        hw.advance(500);
        ctl.tick(&mut hw, &mut sink);
    }
    assert_eq!(ctl.mode(), Mode::Monitoring);
}

#[test]
fn alarm_episode_pattern_and_return() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hot_and_dark(&mut ctl, &mut hw, &mut sink);
    // Room recovers before the episode ends.
    hw.set_room(22.0, 600);

    let start = hw.now_ms;
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(hw.now_ms - start, 3_000);
    assert_eq!(ctl.mode(), Mode::Monitoring);

    let episode = hw.calls_since(start);
    let buzzes: Vec<u64> = episode
        .iter()
        .filter(|c| c.call == ActuatorCall::Buzzer(true))
        .map(|c| c.at_ms - start)
        .collect();
    assert_eq!(buzzes, vec![0, 1_000, 2_000]);
    let first_off = episode
        .iter()
        .find(|c| c.call == ActuatorCall::Buzzer(false))
        .map(|c| c.at_ms - start);
    assert_eq!(first_off, Some(800));
    assert_eq!(
        episode
            .iter()
            .filter(|c| c.call == ActuatorCall::Lamp(Lamp::Red, true))
            .count(),
        3
    );
    assert!(!hw.is_on(ActuatorCall::Buzzer(true)));
    assert!(hw.is_on(ActuatorCall::Lamp(Lamp::Green, true)));
}

#[test]
fn three_alarms_without_login_lock_and_reset() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hot_and_dark(&mut ctl, &mut hw, &mut sink);

    // Room stays hot and dark: episode, back to monitoring, re-alarm.
    let mut guard = 0;
    while ctl.mode() != Mode::Locked {
        ctl.tick(&mut hw, &mut sink);
        guard += 1;
        assert!(guard < 20, "never locked");
    }
    assert_eq!(ctl.alarm_count(), 3);
    assert_eq!(
        sink.count_where(|e| matches!(e, AppEvent::AlarmRaised { .. })),
        3
    );

    ctl.tick(&mut hw, &mut sink);
    assert_eq!(ctl.mode(), Mode::Init);
    assert_eq!(ctl.alarm_count(), 0);
    assert_eq!(ctl.failures(), 0);
}

#[test]
fn recovering_room_keeps_alarm_count_until_login() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hot_and_dark(&mut ctl, &mut hw, &mut sink);
    ctl.tick(&mut hw, &mut sink); // episode 1 -> Monitoring
    ctl.tick(&mut hw, &mut sink); // stale hot reading -> Alarm 2
    assert_eq!(ctl.alarm_count(), 2);
    hw.set_room(22.0, 600);
    ctl.tick(&mut hw, &mut sink); // episode 2 -> Monitoring
    hw.advance(1_500);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(ctl.mode(), Mode::Monitoring);
    assert_eq!(ctl.alarm_count(), 2);
}

#[test]
fn telemetry_reports_mode_and_counters() {
    let (mut ctl, mut hw, mut sink) = logged_in();
    hot_and_dark(&mut ctl, &mut hw, &mut sink);
    let t = ctl.build_telemetry(hw.now_ms);
    assert_eq!(t.mode, Mode::Alarm);
    assert_eq!(t.alarm_count, 1);
    assert_eq!(t.temperature_c, Some(27.0));
    assert_eq!(t.light_level, Some(50));
}
