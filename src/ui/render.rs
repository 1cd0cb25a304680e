//! Frame drawing. Pure over [`FrameView`], so it renders the same on a real
//! terminal and on ratatui's `TestBackend`.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::harness::{FrameView, Mode};
use crate::sim::KeyState;

/// Terminal cells per world unit. Rows are roughly twice as tall as columns.
const COLS_PER_UNIT: f32 = 4.0;
const ROWS_PER_UNIT: f32 = 2.0;

const ENTITY: &str = "@";

pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Recording => "REC",
        Mode::Playback => "PLAY",
    }
}

fn mode_style(mode: Mode) -> Style {
    let color = match mode {
        Mode::Recording => Color::Red,
        Mode::Playback => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// `^v<>` for held keys, `.` for released ones.
pub fn key_glyphs(keys: &KeyState) -> String {
    [
        (keys.up, '^'),
        (keys.down, 'v'),
        (keys.left, '<'),
        (keys.right, '>'),
    ]
    .iter()
    .map(|&(held, glyph)| if held { glyph } else { '.' })
    .collect()
}

/// Cell holding the entity inside `field`. The world origin sits at the
/// field's center, +y points up, and positions off the field are pinned to
/// its edge.
pub fn entity_cell(field: Rect, view: &FrameView) -> Option<(u16, u16)> {
    if field.width == 0 || field.height == 0 {
        return None;
    }
    let center_x = i32::from(field.x) + i32::from(field.width / 2);
    let center_y = i32::from(field.y) + i32::from(field.height / 2);
    let dx = (view.position.x * COLS_PER_UNIT).round() as i32;
    let dy = (view.position.y * ROWS_PER_UNIT).round() as i32;

    let x = (center_x + dx).clamp(i32::from(field.x), i32::from(field.right()) - 1);
    let y = (center_y - dy).clamp(i32::from(field.y), i32::from(field.bottom()) - 1);
    Some((x as u16, y as u16))
}

pub fn status_line(view: &FrameView) -> Line<'static> {
    Line::from(vec![
        Span::styled(mode_label(view.mode), mode_style(view.mode)),
        Span::raw(format!(
            " t={} ({:.2}, {:.2}) {}",
            view.tick,
            view.position.x,
            view.position.y,
            key_glyphs(&view.keys)
        )),
    ])
}

/// Draw one frame: a bordered field with the entity in it and a one-line
/// status bar underneath.
pub fn draw_frame(f: &mut Frame, view: &FrameView) {
    let [field_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(f.area());

    let block = Block::bordered()
        .title(format!(" {} ", mode_label(view.mode)))
        .border_style(Style::default().fg(Color::DarkGray));
    let field = block.inner(field_area);
    f.render_widget(block, field_area);

    if let Some((x, y)) = entity_cell(field, view) {
        let entity = Paragraph::new(ENTITY).style(mode_style(view.mode));
        f.render_widget(entity, Rect::new(x, y, 1, 1));
    }

    f.render_widget(Paragraph::new(status_line(view)), status_area);
}
