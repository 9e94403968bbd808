//! Sidebar: display flags as checkboxes, the column toggle and key hints

use gtview_app::view::DisplayFlag;
use gtview_app::{View, ViewState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

pub struct Sidebar<'a> {
    view_state: &'a ViewState,
    view: View,
}

impl<'a> Sidebar<'a> {
    pub fn new(view_state: &'a ViewState, view: View) -> Self {
        Self { view_state, view }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.view {
            View::ThreeWay => &[
                ("←↑↓→", "cell"),
                ("space", "toggle match"),
                ("[ ]", "page"),
                ("t h p", "panes"),
                ("s", "save"),
                ("e", "export pdf"),
                ("esc", "close"),
            ],
            View::RunDetails => &[
                ("↑↓", "move"),
                ("enter", "view file"),
                ("space", "select file"),
                ("d", "delete run"),
                ("esc", "back"),
            ],
            _ => &[
                ("↑↓", "move"),
                ("enter", "open"),
                ("space", "select"),
                ("d", "delete run"),
                ("r", "reload"),
                ("n / N", "compare"),
            ],
        }
    }
}

fn hint(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {key:<6}"), styles::keybinding()),
        Span::styled(label, styles::text_muted()),
    ])
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = styles::glass_block(false).title(" Display ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        for (i, flag) in DisplayFlag::ALL.iter().enumerate() {
            let checked = self.view_state.flag(*flag);
            let (mark, style) = if checked {
                ("[x]", styles::accent())
            } else {
                ("[ ]", styles::text_muted())
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {}", i + 1), styles::keybinding()),
                Span::raw(" "),
                Span::styled(mark, style),
                Span::raw(" "),
                Span::styled(flag.label(), styles::text_primary()),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(" c", styles::keybinding()),
            Span::styled(" Columns: ", styles::text_secondary()),
            Span::styled(self.view_state.column_toggle().label(), styles::accent_bold()),
        ]));

        if let Some(run_id) = self.view_state.selected_run_id() {
            lines.push(Line::from(vec![
                Span::styled(" Run: ", styles::text_secondary()),
                Span::styled(run_id.to_string(), styles::text_primary()),
            ]));
        }

        lines.push(Line::default());
        lines.extend(self.hints().iter().map(|(k, l)| hint(k, l)));
        lines.push(hint("q", "quit"));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_sidebar_renders_flags_as_checkboxes() {
        let mut term = TestTerminal::new();
        let state = ViewState::default();
        term.render_widget(Sidebar::new(&state, View::FinalSummary), Rect::new(0, 0, 28, 20));

        assert!(term.buffer_contains("[x] Final Summary"));
        assert!(term.buffer_contains("[ ] Indentation"));
        assert!(term.buffer_contains("[ ] Run Summary"));
        assert!(term.buffer_contains("[ ] File Diff"));
    }

    #[test]
    fn test_sidebar_shows_column_toggle() {
        let mut term = TestTerminal::new();
        let mut state = ViewState::default();
        state.cycle_columns();
        term.render_widget(Sidebar::new(&state, View::FinalSummary), Rect::new(0, 0, 28, 20));
        assert!(term.buffer_contains("Columns: superscript"));
    }

    #[test]
    fn test_sidebar_hints_follow_view() {
        let mut term = TestTerminal::new();
        let state = ViewState::default();
        term.render_widget(Sidebar::new(&state, View::ThreeWay), Rect::new(0, 0, 28, 22));
        assert!(term.buffer_contains("toggle match"));
        assert!(!term.buffer_contains("reload"));
    }

    #[test]
    fn test_sidebar_zero_width_is_noop() {
        let mut term = TestTerminal::new();
        let state = ViewState::default();
        term.render_widget(Sidebar::new(&state, View::Welcome), Rect::new(0, 0, 0, 20));
        assert!(!term.buffer_contains("Display"));
    }
}
