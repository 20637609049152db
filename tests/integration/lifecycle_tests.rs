//! Start / reset / shutdown behaviour and the configured boot program.

use eglang::app::events::EngineEvent;
use eglang::config::EngineConfig;
use eglang::error::Error;
use eglang::pins::PinRoles;
use eglang::RuleEngine;

use super::mock_hw::{MockLines, PortCall, RecordingSink};

#[test]
fn start_configures_lines_once() {
    let mut engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut hw = MockLines::new();
    let mut sink = RecordingSink::new();

    engine.start(&mut hw, &mut sink);
    let first = hw.calls.clone();
    engine.start(&mut hw, &mut sink);

    assert!(engine.is_started());
    assert_eq!(hw.calls, first);
    assert_eq!(
        &first[..6],
        &[3, 5, 7, 9, 11, 13].map(PortCall::ConfigureInput)[..]
    );
    assert_eq!(
        &first[6..],
        &[2, 4, 6, 8, 10, 12].map(PortCall::ConfigureDisabled)[..]
    );
    assert_eq!(sink.events, vec![EngineEvent::Started]);
}

#[test]
fn shutdown_releases_outputs_and_forgets_levels() {
    let mut engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut hw = MockLines::new();
    let mut sink = RecordingSink::new();
    engine.start(&mut hw, &mut sink);
    engine.register("2,1", &mut sink).unwrap();
    engine.register("4,1", &mut sink).unwrap();
    engine.tick(&mut hw, &mut sink);
    assert_eq!(engine.output_state(2), Some(true));
    hw.clear_calls();

    engine.shutdown(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        [2, 4, 6, 8, 10, 12].map(PortCall::ConfigureDisabled).to_vec()
    );
    assert_eq!(engine.output_state(2), None);
    assert_eq!(engine.output_state(4), None);
    assert_eq!(engine.cursor(), 0);
    assert!(engine.rules().iter().all(|r| !r.is_done()));
    assert_eq!(sink.events.last(), Some(&EngineEvent::ShutdownComplete));
}

#[test]
fn shutdown_is_repeatable() {
    let mut engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut hw = MockLines::new();
    let mut sink = RecordingSink::new();
    engine.start(&mut hw, &mut sink);

    engine.shutdown(&mut hw, &mut sink);
    let once = hw.calls.len();
    engine.shutdown(&mut hw, &mut sink);

    assert_eq!(hw.calls.len() - once, 6);
    assert_eq!(sink.count(|e| *e == EngineEvent::ShutdownComplete), 2);
}

#[test]
fn rules_rewrite_lines_after_shutdown() {
    let mut engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut hw = MockLines::new();
    let mut sink = RecordingSink::new();
    engine.start(&mut hw, &mut sink);
    engine.register("2,1", &mut sink).unwrap();
    engine.tick(&mut hw, &mut sink);
    engine.shutdown(&mut hw, &mut sink);

    engine.tick(&mut hw, &mut sink);

    assert_eq!(hw.writes_to(2), vec![true, true]);
    assert!(hw.calls.ends_with(&[
        PortCall::ConfigureOutput(2),
        PortCall::Write { pin: 2, high: true }
    ]));
}

#[test]
fn reset_rearms_but_keeps_cached_levels() {
    let mut engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut hw = MockLines::new();
    let mut sink = RecordingSink::new();
    engine.start(&mut hw, &mut sink);
    engine.register("2,1", &mut sink).unwrap();
    engine.register("4,1", &mut sink).unwrap();
    engine.tick(&mut hw, &mut sink);
    assert_eq!(engine.cursor(), 1);

    engine.reset();

    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.output_state(2), Some(true));
    engine.tick(&mut hw, &mut sink);
    assert_eq!(hw.writes_to(2), vec![true]);
}

#[test]
fn configured_program_skips_bad_rules() {
    let json = r#"{
        "pins": { "inputs": [3, 5, 7, 9, 11, 13], "outputs": [2, 4, 6, 8, 10, 12] },
        "tick_interval_ms": 20,
        "rules": ["2,1", "3,1", "?5,1!4,1", "[7:]"]
    }"#;
    let config = EngineConfig::from_json(json).unwrap();
    let mut engine = RuleEngine::new(config).unwrap();
    let mut hw = MockLines::new();
    let mut sink = RecordingSink::new();
    engine.start(&mut hw, &mut sink);

    assert_eq!(engine.register_configured(&mut sink), 2);
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.rules()[1].source(), "?5,1!4,1");
    assert_eq!(sink.count(|e| matches!(e, EngineEvent::RuleRejected(_))), 2);
    assert_eq!(engine.config().tick_interval_ms, 20);
}

#[test]
fn custom_pin_table_changes_roles() {
    let json = r#"{
        "pins": { "inputs": [0, 1, 2, 3, 4, 5], "outputs": [10, 11, 12, 13, 14, 15] },
        "tick_interval_ms": 50
    }"#;
    let mut engine = RuleEngine::new(EngineConfig::from_json(json).unwrap()).unwrap();
    let mut sink = RecordingSink::new();

    assert!(!engine.try_register("2,1", &mut sink));
    assert!(engine.try_register("15,1", &mut sink));
    assert!(engine.try_register("?0,1!14,1", &mut sink));
}

#[test]
fn overlapping_pin_table_is_refused() {
    let mut config = EngineConfig::default();
    config.pins = PinRoles::new([2, 5, 7, 9, 11, 13], [2, 4, 6, 8, 10, 12]);

    assert_eq!(
        RuleEngine::new(config).err(),
        Some(Error::Config("a pin cannot be both input and output"))
    );
}
