//! Header bar: app title, current view, API base URL and loading indicator

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use gtview_app::View;

use crate::theme::{palette, styles};

/// Main header showing app title, the current view and backend state
pub struct MainHeader<'a> {
    api_url: &'a str,
    view: View,
    loading: bool,
    dirty: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(api_url: &'a str, view: View) -> Self {
        Self {
            api_url,
            view,
            loading: false,
            dirty: false,
        }
    }

    /// Show the spinner glyph while any fetch is in flight
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Mark unsaved viewer edits
    pub fn dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (status_icon, status_style) = if self.loading {
            ("↻", styles::status_yellow())
        } else {
            ("●", styles::status_green())
        };

        let mut left = vec![
            Span::raw(" "),
            Span::styled(status_icon, status_style),
            Span::raw(" "),
            Span::styled("GT Comparison", styles::accent_bold()),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(self.view.title(), styles::text_secondary()),
        ];
        if self.dirty {
            left.push(Span::styled(" [modified]", styles::status_yellow()));
        }
        if self.loading {
            left.push(Span::styled("  Loading…", styles::text_muted()));
        }
        let left_line = Line::from(left);
        let left_width = left_line.width() as u16;
        buf.set_line(inner.x, inner.y, &left_line, inner.width);

        // right-aligned API URL, dropped when it would overlap the title
        let url_line = Line::from(vec![
            Span::styled("API ", styles::text_muted()),
            Span::styled(self.api_url, styles::accent()),
            Span::raw(" "),
        ]);
        let url_width = url_line.width() as u16;
        if left_width + url_width + 2 <= inner.width {
            let x = inner.x + inner.width - url_width;
            buf.set_line(x, inner.y, &url_line, url_width);
        }
    }
}
