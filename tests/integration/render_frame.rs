//! Frames recorded by the prototype, drawn on a test terminal

use glam::Vec3;
use ratatui::layout::Rect;
use retrace::harness::{FrameView, Mode};
use retrace::sim::KeyState;

use super::common::fixtures::up_press_scenario;
use super::common::terminal::{
    assert_buffer_contains, buffer_to_trimmed_string, find_symbol, render_view,
};

#[test]
fn test_recorded_and_replayed_frames_draw_the_same_field() {
    let (_, _, prototype) = up_press_scenario().run();
    let frames = prototype.window().frames();
    assert_eq!(frames.len(), 6);

    let (recorded, replayed) = frames.split_at(3);
    for (live, replay) in recorded.iter().zip(replayed) {
        assert_eq!(live.tick, replay.tick);
        assert_eq!(live.position, replay.position);
        assert_eq!(live.keys, replay.keys);

        let live_term = render_view(40, 10, live);
        let replay_term = render_view(40, 10, replay);
        assert_eq!(
            find_symbol(live_term.backend().buffer(), "@"),
            find_symbol(replay_term.backend().buffer(), "@")
        );
    }
}

#[test]
fn test_frame_title_and_status_follow_mode() {
    let view = FrameView {
        mode: Mode::Recording,
        tick: 7,
        position: Vec3::new(1.0, -0.5, 0.0),
        keys: KeyState {
            right: true,
            down: true,
            ..KeyState::default()
        },
    };
    let terminal = render_view(40, 8, &view);
    let buffer = terminal.backend().buffer();

    assert_buffer_contains(buffer, Rect::new(0, 0, 40, 1), " REC ");
    assert_buffer_contains(buffer, Rect::new(0, 7, 40, 1), "REC t=7 (1.00, -0.50) .v.>");

    let replay = FrameView {
        mode: Mode::Playback,
        ..view
    };
    let terminal = render_view(40, 8, &replay);
    let text = buffer_to_trimmed_string(terminal.backend().buffer());
    assert!(text.starts_with("┌ PLAY ─"));
}

#[test]
fn test_entity_moves_right_and_down_on_screen() {
    let origin = FrameView {
        mode: Mode::Recording,
        tick: 0,
        position: Vec3::ZERO,
        keys: KeyState::default(),
    };
    let moved = FrameView {
        position: Vec3::new(1.0, -1.0, 0.0),
        ..origin
    };

    let a = render_view(40, 12, &origin);
    let b = render_view(40, 12, &moved);
    let (ax, ay) = find_symbol(a.backend().buffer(), "@").unwrap();
    let (bx, by) = find_symbol(b.backend().buffer(), "@").unwrap();

    assert_eq!(bx, ax + 4);
    assert_eq!(by, ay + 2);
}
