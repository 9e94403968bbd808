//! Confirmation dialog widget (discard edits, delete run)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use gtview_app::confirm_dialog::ConfirmDialogState;

use super::modal_overlay;
use crate::theme::styles;

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::prepare_modal(buf, area, 56, 9);
        let block = styles::modal_block(&self.state.title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [_, message_area, buttons_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .style(styles::status_yellow())
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        let mut buttons = Vec::new();
        for (i, (label, _)) in self.state.options.iter().enumerate() {
            if i > 0 {
                buttons.push(Span::raw("   "));
            }
            let style = if i == self.state.selected {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            buttons.push(Span::styled(format!(" {label} "), style));
        }
        Paragraph::new(Line::from(buttons))
            .alignment(Alignment::Center)
            .render(buttons_area, buf);

        let hint = Line::from(vec![
            Span::styled("y", styles::keybinding()),
            Span::styled(" confirm  ", styles::text_muted()),
            Span::styled("n/Esc", styles::keybinding()),
            Span::styled(" cancel  ", styles::text_muted()),
            Span::styled("←→ Enter", styles::keybinding()),
            Span::styled(" choose", styles::text_muted()),
        ]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(hint_area, buf);
    }
}
