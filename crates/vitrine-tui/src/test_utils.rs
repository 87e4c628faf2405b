//! Test utilities for TUI rendering verification
//!
//! Wraps ratatui's `TestBackend` so widget and full-screen tests can render
//! and search the resulting buffer.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Test utility wrapper around a `TestBackend` terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// 80x24 terminal
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere (rows joined by `\n`)
    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        let buffer = self.buffer();
        if line >= buffer.area.height {
            return false;
        }
        let content: String = (0..buffer.area.width)
            .map(|x| buffer[(x, line)].symbol())
            .collect();
        content.contains(text)
    }

    /// Symbol of one cell, `None` outside the terminal
    pub fn cell_at(&self, x: u16, y: u16) -> Option<&str> {
        let buffer = self.buffer();
        (x < buffer.area.width && y < buffer.area.height).then(|| buffer[(x, y)].symbol())
    }

    /// Whole buffer as text, one line per row
    pub fn content(&self) -> String {
        let buffer = self.buffer();
        let mut result = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_creation() {
        let term = TestTerminal::new();
        assert_eq!(term.area(), Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
    }

    #[test]
    fn test_buffer_queries() {
        let mut term = TestTerminal::with_size(20, 3);
        term.render_widget(Paragraph::new("hello vitrine"), Rect::new(0, 1, 20, 1));

        assert!(term.buffer_contains("hello vitrine"));
        assert!(term.line_contains(1, "hello"));
        assert!(!term.line_contains(0, "hello"));
        assert_eq!(term.cell_at(0, 1), Some("h"));
        assert_eq!(term.cell_at(20, 1), None);
    }
}
