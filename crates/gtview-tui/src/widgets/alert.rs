//! Blocking alert (three-way load failures)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

pub struct AlertDialog<'a> {
    text: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::prepare_modal(buf, area, 64, 10);
        let block = styles::modal_block("Error").border_style(styles::status_red());
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [text_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let lines: Vec<Line> = self
            .text
            .lines()
            .enumerate()
            .map(|(i, l)| {
                let style = if i == 0 {
                    styles::text_bright()
                } else {
                    styles::text_secondary()
                };
                Line::styled(l, style)
            })
            .collect();
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        Paragraph::new(Line::from(vec![Span::styled(
            "press any key",
            styles::text_muted(),
        )]))
        .alignment(Alignment::Center)
        .render(hint_area, buf);
    }
}
