//! TUI testing utilities using Ratatui's TestBackend
//!
//! Renders frames to a test buffer and converts the output to strings.

use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
use retrace::harness::FrameView;
use retrace::ui::draw_frame;

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Draw a single frame into a fresh test terminal
pub fn render_view(width: u16, height: u16, view: &FrameView) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal
        .draw(|f| draw_frame(f, view))
        .expect("Failed to draw frame");
    terminal
}

/// Convert a buffer to a string, one line per row
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Convert buffer to string, trimming trailing whitespace per line
pub fn buffer_to_trimmed_string(buffer: &Buffer) -> String {
    buffer_to_string(buffer)
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract a specific region of the buffer as a string
pub fn buffer_region_to_string(buffer: &Buffer, area: Rect) -> String {
    let mut output = String::new();

    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        if y < area.y + area.height - 1 {
            output.push('\n');
        }
    }

    output
}

/// Assert that a specific region of the buffer contains expected text
pub fn assert_buffer_contains(buffer: &Buffer, area: Rect, expected: &str) {
    let actual = buffer_region_to_string(buffer, area);

    assert!(
        actual.contains(expected),
        "Buffer region does not contain expected text.\nExpected: {}\nActual:\n{}",
        expected,
        actual
    );
}

/// Position of the first cell holding `symbol`
pub fn find_symbol(buffer: &Buffer, symbol: &str) -> Option<(u16, u16)> {
    let area = buffer.area;
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if buffer.cell((x, y)).is_some_and(|cell| cell.symbol() == symbol) {
                return Some((x, y));
            }
        }
    }
    None
}
