//! Loop rules driven end to end through the engine.

use eglang::app::events::EngineEvent;
use eglang::config::EngineConfig;
use eglang::rule::{LoopPhase, ParsedRule};
use eglang::RuleEngine;

use super::mock_hw::{MockLines, RecordingSink};

fn engine_with(rule: &str) -> (RuleEngine, MockLines, RecordingSink) {
    let mut engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut hw = MockLines::new();
    let mut sink = RecordingSink::new();
    engine.start(&mut hw, &mut sink);
    engine.register(rule, &mut sink).unwrap();
    hw.clear_calls();
    sink.events.clear();
    (engine, hw, sink)
}

#[test]
fn idle_gate_keeps_loop_quiet() {
    let (mut engine, mut hw, mut sink) = engine_with("[5:2,1;2,0]");
    for _ in 0..5 {
        engine.tick(&mut hw, &mut sink);
    }
    assert!(hw.writes().is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn alternating_loop_blinks_while_gated() {
    let (mut engine, mut hw, mut sink) = engine_with("[5:2,1;2,0]");

    hw.press(5);
    for _ in 0..3 {
        engine.tick(&mut hw, &mut sink);
    }
    assert_eq!(hw.writes_to(2), vec![true, false, true, false, true, false]);
    assert_eq!(engine.rules()[0].loop_phase(), LoopPhase::Active);

    hw.release(5);
    engine.tick(&mut hw, &mut sink);
    assert_eq!(engine.rules()[0].loop_phase(), LoopPhase::Idle);
    assert_eq!(engine.output_state(2), Some(false));
    // Line already low: the off-write is absorbed by the cache.
    assert_eq!(hw.writes_to(2).len(), 6);
    assert_eq!(
        sink.count(|e| matches!(e, EngineEvent::LoopEntered { gate: 5 })),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, EngineEvent::LoopExited { gate: 5 })), 1);
}

#[test]
fn single_command_loop_fires_on_entry_and_clears_on_release() {
    let (mut engine, mut hw, mut sink) = engine_with("[5:2,1]");

    hw.press(5);
    for _ in 0..4 {
        engine.tick(&mut hw, &mut sink);
    }
    assert_eq!(hw.writes_to(2), vec![true]);

    hw.release(5);
    engine.tick(&mut hw, &mut sink);
    engine.tick(&mut hw, &mut sink);
    assert_eq!(hw.writes_to(2), vec![true, false]);
}

#[test]
fn identical_commands_do_not_refire() {
    let (mut engine, mut hw, mut sink) = engine_with("[7:6,1;6,1]");
    match engine.rules()[0].parsed() {
        ParsedRule::Loop(program) => assert!(!program.alternating),
        other => panic!("expected a loop, got {:?}", other),
    }

    hw.press(7);
    engine.tick(&mut hw, &mut sink);
    engine.tick(&mut hw, &mut sink);
    assert_eq!(hw.writes_to(6), vec![true]);
}

#[test]
fn loop_off_sequence_releases_every_line() {
    let (mut engine, mut hw, mut sink) = engine_with("[9:8,1;10,1;12,1]");

    hw.press(9);
    engine.tick(&mut hw, &mut sink);
    hw.release(9);
    engine.tick(&mut hw, &mut sink);

    assert_eq!(
        hw.writes(),
        vec![(8, true), (10, true), (12, true), (8, false), (10, false), (12, false)]
    );
}

#[test]
fn loop_reenters_on_next_press() {
    let (mut engine, mut hw, mut sink) = engine_with("[5:2,1]");

    for _ in 0..2 {
        hw.press(5);
        engine.tick(&mut hw, &mut sink);
        hw.release(5);
        engine.tick(&mut hw, &mut sink);
    }
    assert_eq!(hw.writes_to(2), vec![true, false, true, false]);
}

#[test]
fn repeated_pin_is_switched_off_once() {
    let (mut engine, mut hw, mut sink) = engine_with("[5:2,1;4,1;2,1]");

    hw.press(5);
    engine.tick(&mut hw, &mut sink);
    hw.release(5);
    engine.tick(&mut hw, &mut sink);

    assert_eq!(hw.writes_to(2), vec![true, false]);
    assert_eq!(hw.writes_to(4), vec![true, false]);
}
