//! Record/replay cycles driven end to end with scripted collaborators

use crossterm::event::KeyCode;
use retrace::config::KeyBindings;
use retrace::core::{record_then_replay, Prototype};
use retrace::harness::scripted::{ScriptedClock, ScriptedWindow};
use retrace::harness::{HarnessError, LiveDriver, PlaybackDriver, RunContext, Tape};
use retrace::{InputEvent, Mode};

use super::common::fixtures::{ms, press, release, up_press_scenario, Scenario};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_up_press_scenario_records_expected_streams() {
    let (report, ctx, _) = up_press_scenario().run();
    let tape = ctx.tape();

    assert_eq!(tape.tick_durations.entries(), &[ms(100), ms(100), ms(100)]);
    assert_eq!(
        tape.input_events.slots(),
        &[None, Some(InputEvent::press(KeyCode::Up)), None]
    );
    assert_eq!(tape.close_queries.entries(), &[false, false, true]);

    let [x, y, z] = report.recorded_trace[1];
    assert_eq!((x, z), (0.0, 0.0));
    assert!(approx(y, 0.1));
    assert!(approx(report.final_recorded[1], 0.2));
}

#[test]
fn test_up_press_scenario_replays_identically() {
    let (report, ctx, _) = up_press_scenario().run();

    assert_eq!(ctx.mode(), Mode::Playback);
    assert_eq!(report.ticks_recorded, 3);
    assert_eq!(report.ticks_replayed, 3);
    assert!(report.identical);
    assert_eq!(report.first_divergence, None);
    assert_eq!(report.recorded_trace, report.replayed_trace);

    let [x, y, z] = report.final_replayed;
    assert_eq!((x, z), (0.0, 0.0));
    assert!(approx(y, 0.2));
}

#[test]
fn test_playback_bypasses_real_collaborators() {
    let (_, ctx, prototype) = up_press_scenario().run();
    let window = prototype.window();

    // Only the recording run touched the real poll and close query.
    assert_eq!(window.polls(), 3);
    assert_eq!(window.close_queries(), 3);
    assert_eq!(ctx.tape().close_queries.cursor(), 0);

    // Both runs rendered every tick.
    let modes: Vec<Mode> = window.frames().iter().map(|f| f.mode).collect();
    assert_eq!(
        modes,
        vec![
            Mode::Recording,
            Mode::Recording,
            Mode::Recording,
            Mode::Playback,
            Mode::Playback,
            Mode::Playback,
        ]
    );
}

#[test]
fn test_press_and_release_replay_identically() {
    let scenario = Scenario::ticks(
        vec![press(KeyCode::Right), None, release(KeyCode::Right), None],
        vec![ms(250); 4],
    );
    let (report, _, _) = scenario.run();

    assert!(report.identical);
    assert_eq!(report.final_replayed, [0.5, 0.0, 0.0]);
}

#[test]
fn test_uneven_durations_replay_identically() {
    let scenario = Scenario::ticks(
        vec![
            press(KeyCode::Char('w')),
            press(KeyCode::Char('d')),
            None,
            release(KeyCode::Char('w')),
            press(KeyCode::Char(' ')),
            None,
        ],
        vec![ms(16), ms(17), ms(33), ms(16), ms(21), ms(5)],
    );
    let (report, ctx, _) = scenario.run();

    assert!(report.identical);
    assert_eq!(report.ticks_replayed, 6);
    assert_eq!(ctx.tape().input_events.cursor(), 6);
    assert_eq!(ctx.tape().tick_durations.cursor(), 6);
}

#[test]
fn test_tick_limit_stops_recording() {
    let scenario = Scenario {
        events: vec![press(KeyCode::Left)],
        closes: vec![false; 10],
        durations: vec![ms(100); 10],
        max_ticks: Some(4),
    };
    let (report, ctx, _) = scenario.run();

    assert_eq!(report.ticks_recorded, 4);
    assert_eq!(report.ticks_replayed, 4);
    // The close query is still evaluated on the tick that hits the limit.
    assert_eq!(ctx.tape().close_queries.len(), 4);
    assert!(report.identical);
}

#[test]
fn test_playback_runs_every_recorded_tick_despite_close_requests() {
    let tape = Tape::from_parts(vec![None; 5], vec![true], vec![ms(10); 5]);
    let mut ctx = RunContext::playback(tape);
    let window = ScriptedWindow::new().with_close_values(vec![true; 5]);
    let mut prototype = Prototype::new(window, KeyBindings::default()).with_max_ticks(Some(1));

    let ticks = PlaybackDriver::new().run(&mut ctx, &mut prototype).unwrap();

    assert_eq!(ticks, 5);
    assert_eq!(prototype.ticks(), 5);
    assert_eq!(prototype.window().close_queries(), 0);
    assert_eq!(ctx.tape().close_queries.cursor(), 0);
}

#[test]
fn test_short_input_stream_exhausts_playback() {
    let tape = Tape::from_parts(vec![None], vec![false, true], vec![ms(10); 2]);
    let mut ctx = RunContext::playback(tape);
    let mut prototype = Prototype::new(ScriptedWindow::new(), KeyBindings::default());

    let err = PlaybackDriver::new()
        .run(&mut ctx, &mut prototype)
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::StreamExhausted {
            stream: "input_events",
            cursor: 1,
            len: 1,
        }
    ));
    assert_eq!(prototype.window().polls(), 0);
}

#[test]
fn test_live_driver_rejects_playback_context() {
    let mut ctx = RunContext::playback(Tape::new());
    let mut prototype = Prototype::new(ScriptedWindow::new(), KeyBindings::default());

    let err = LiveDriver::new(ScriptedClock::new(vec![ms(10)]))
        .run(&mut ctx, &mut prototype)
        .unwrap_err();

    assert!(err.is_mode_violation());
    assert!(ctx.tape().tick_durations.is_empty());
}

#[test]
fn test_playback_driver_rejects_recording_context() {
    let mut ctx = RunContext::new();
    let mut prototype = Prototype::new(ScriptedWindow::new(), KeyBindings::default());

    let err = PlaybackDriver::new()
        .run(&mut ctx, &mut prototype)
        .unwrap_err();
    assert!(err.is_mode_violation());
}

#[test]
fn test_cycle_cannot_run_twice_on_one_context() {
    let scenario = up_press_scenario();
    let (_, mut ctx, _) = scenario.run();

    let mut prototype = scenario.prototype();
    let err = record_then_replay(&mut ctx, &mut prototype, scenario.clock()).unwrap_err();
    assert!(err.is_mode_violation());
}

#[test]
fn test_recording_after_playback_is_a_mode_violation() {
    let (_, mut ctx, _) = up_press_scenario().run();

    let err = ctx.record_close(true).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::ModeViolation {
            expected: Mode::Recording,
            actual: Mode::Playback,
            ..
        }
    ));
    assert_eq!(ctx.tape().close_queries.len(), 3);
}

#[test]
fn test_playback_context_cannot_grow_its_recording() {
    let tape = Tape::from_parts(vec![None], vec![true], vec![ms(10)]);
    let mut ctx = RunContext::playback(tape);

    let err = ctx.record_input(None).unwrap_err();
    assert!(err.is_mode_violation());
    assert_eq!(ctx.tape().input_events.len(), 1);

    // Playback still sees exactly the one recorded slot.
    assert_eq!(ctx.replay_input().unwrap(), None);
    assert!(ctx.replay_input().unwrap_err().is_stream_exhausted());
}
