//! Property tests for slot alignment, replay fidelity and stream discipline

use std::time::Duration;

use crossterm::event::KeyCode;
use proptest::prelude::*;
use retrace::harness::{RunContext, Tape};
use retrace::sim::{InputEvent, KeyAction};

use super::common::fixtures::Scenario;

fn event_strategy() -> impl Strategy<Value = Option<InputEvent>> {
    let code = prop_oneof![
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Char('w')),
        Just(KeyCode::Char(' ')),
        Just(KeyCode::Char('x')),
    ];
    let action = prop_oneof![
        Just(KeyAction::Press),
        Just(KeyAction::Release),
        Just(KeyAction::Repeat),
    ];
    proptest::option::of((code, action).prop_map(|(code, action)| InputEvent::new(code, action)))
}

/// Poll results and tick durations for a session of 1..40 ticks.
fn session_strategy() -> impl Strategy<Value = (Vec<Option<InputEvent>>, Vec<Duration>)> {
    (1usize..40).prop_flat_map(|n| {
        (
            prop::collection::vec(event_strategy(), n),
            prop::collection::vec((0u64..50_000).prop_map(Duration::from_micros), n),
        )
    })
}

proptest! {
    #[test]
    fn prop_replay_matches_recording((events, durations) in session_strategy()) {
        let ticks = durations.len();
        let (report, _, _) = Scenario::ticks(events, durations).run();

        prop_assert_eq!(report.ticks_recorded, ticks as u64);
        prop_assert_eq!(report.ticks_replayed, ticks as u64);
        prop_assert!(report.identical);
        prop_assert_eq!(report.recorded_trace, report.replayed_trace);
    }

    #[test]
    fn prop_one_slot_per_poll((events, durations) in session_strategy()) {
        let ticks = durations.len();
        let populated = events.iter().filter(|e| e.is_some()).count();
        let (_, ctx, prototype) = Scenario::ticks(events.clone(), durations).run();
        let inputs = &ctx.tape().input_events;

        prop_assert_eq!(prototype.window().polls(), ticks);
        prop_assert_eq!(inputs.len(), ticks);
        prop_assert_eq!(inputs.event_count(), populated);
        prop_assert_eq!(inputs.cursor(), ticks);
        prop_assert_eq!(inputs.slots(), events.as_slice());
    }

    #[test]
    fn prop_replay_past_end_is_exhausted(values in prop::collection::vec(any::<bool>(), 0..20)) {
        let mut ctx = RunContext::playback(Tape::from_parts(Vec::new(), values.clone(), Vec::new()));
        for expected in &values {
            prop_assert_eq!(ctx.replay_close().unwrap(), *expected);
        }
        let err = ctx.replay_close().unwrap_err();
        prop_assert!(err.is_stream_exhausted());
        prop_assert_eq!(ctx.tape().close_queries.cursor(), values.len());
    }

    #[test]
    fn prop_wrong_mode_is_rejected(slots in prop::collection::vec(event_strategy(), 0..10)) {
        let mut playback = RunContext::playback(Tape::from_parts(slots.clone(), Vec::new(), Vec::new()));
        let err = playback.record_input(None).unwrap_err();
        prop_assert!(err.is_mode_violation());
        prop_assert_eq!(playback.tape().input_events.len(), slots.len());
        prop_assert_eq!(playback.tape().input_events.cursor(), 0);

        let mut recording = RunContext::new();
        let err = recording.replay_input().unwrap_err();
        prop_assert!(err.is_mode_violation());
        prop_assert!(recording.tape().input_events.is_empty());
    }
}
