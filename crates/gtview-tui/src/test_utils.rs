//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend` and
//! asserted on as plain text.

use gtview_app::AppState;
use gtview_core::{DetailKind, FileDetailRow, IndentationRun, Run, ThreeWayViewPayload};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Wrapper around a `TestBackend` terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with standard dimensions (80x24)
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

    /// Draw a full frame, e.g. `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// All content as a string (for debugging failed assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

// ─────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────

pub fn test_run(id: &str, percentage: f64) -> Run {
    Run {
        id: id.to_string(),
        description: Some(format!("desc {id}")),
        files_processed: 3,
        total_paragraphs: 100,
        content_matches: percentage as u64,
        content_match_percentage: percentage,
        ..Default::default()
    }
}

pub fn test_indentation_run(id: &str) -> IndentationRun {
    IndentationRun {
        id: id.to_string(),
        files_processed: 2,
        total_rows: 40,
        row_match_percentage: 87.5,
        ..Default::default()
    }
}

pub fn test_detail_row(file: &str, page: &str) -> FileDetailRow {
    FileDetailRow {
        file_name: file.to_string(),
        page_num: page.to_string(),
        total_paragraphs: Some(10),
        content_matches: Some(9),
        content_match_percentage: Some(90.0),
        tp_superscript: Some(2),
        fp_superscript: Some(0),
        fn_superscript: Some(1),
        superscript_matches: Some(8),
        superscript_match_percentage: Some(80.0),
        ..Default::default()
    }
}

/// State with lists loaded and the mount fetch already issued
pub fn loaded_state() -> AppState {
    let mut state = AppState::new();
    let _ = gtview_app::process::run_update(&mut state, gtview_app::Message::Tick);
    state.runs = vec![
        test_run("2024-01-01_10-00-00", 97.0),
        test_run("2024-01-02_11-30-00", 72.0),
    ];
    state.indentation_runs = vec![test_indentation_run("2024-02-01_09-00-00")];
    state
}

/// State showing the three-way viewer for `doc_1` page 1
pub fn viewer_state() -> AppState {
    use gtview_app::view::FileKey;
    use gtview_app::viewer::PaneVisibility;
    use gtview_core::ComparisonRow;
    use serde_json::json;

    let mut state = loaded_state();
    state
        .view
        .open_file("2024-01-01_10-00-00".into(), "doc_1".into(), 1);
    let key = FileKey {
        run_id: "2024-01-01_10-00-00".into(),
        file_name: "doc_1".into(),
        page: 1,
        kind: DetailKind::Content,
    };
    let payload = ThreeWayViewPayload {
        file_name: "doc_1".into(),
        page_num: "1".into(),
        pagination: gtview_core::Pagination {
            current_page: 1,
            total_pages: 4,
            ..Default::default()
        },
        comparison_data: vec![ComparisonRow {
            content_output: json!("Hello world"),
            content_gt: json!("Hello world"),
            content_match: true,
            font_size_output: json!(12),
            font_size_gt: json!(11),
            font_size_match: false,
            ..Default::default()
        }],
        pdf_view_base64: Some("JVBERi0xLjQK".into()),
        html_view_content: Some("<p>Rendered <b>page</b></p>".into()),
    };
    state.viewer = Some(gtview_app::ThreeWayViewer::new(
        key,
        payload,
        PaneVisibility::default(),
    ));
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_creation() {
        let term = TestTerminal::new();
        assert_eq!(term.area().width, TEST_WIDTH);
        assert_eq!(term.area().height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_contains() {
        use ratatui::widgets::Paragraph;

        let mut term = TestTerminal::with_size(20, 5);
        term.render_widget(Paragraph::new("Hello World"), term.area());

        assert!(term.buffer_contains("Hello World"));
        assert!(!term.buffer_contains("Goodbye"));
        assert!(term.line_contains(0, "Hello"));
    }
}
