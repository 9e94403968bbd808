//! One-row status bar: last status message on the left, run counts on the right

use gtview_app::state::{StatusLevel, StatusMessage};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

pub struct StatusBar<'a> {
    status: Option<&'a StatusMessage>,
    run_count: usize,
    indentation_run_count: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: Option<&'a StatusMessage>) -> Self {
        Self {
            status,
            run_count: 0,
            indentation_run_count: 0,
        }
    }

    pub fn counts(mut self, runs: usize, indentation_runs: usize) -> Self {
        self.run_count = runs;
        self.indentation_run_count = indentation_runs;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let counts = Line::from(vec![
            Span::styled(format!("{} runs", self.run_count), styles::text_muted()),
            Span::styled(" · ", styles::text_muted()),
            Span::styled(
                format!("{} indentation ", self.indentation_run_count),
                styles::text_muted(),
            ),
        ]);
        let counts_width = counts.width() as u16;

        let message_width = if counts_width + 10 <= area.width {
            let x = area.x + area.width - counts_width;
            buf.set_line(x, area.y, &counts, counts_width);
            area.width - counts_width - 1
        } else {
            area.width
        };

        if let Some(status) = self.status {
            let (icon, style) = match status.level {
                StatusLevel::Info => ("●", styles::status_green()),
                StatusLevel::Error => ("✗", styles::status_red()),
            };
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(icon, style),
                Span::raw(" "),
                Span::styled(status.text.as_str(), styles::text_primary()),
            ]);
            buf.set_line(area.x, area.y, &line, message_width);
        }
    }
}
