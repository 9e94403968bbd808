//! Comparison submission forms (local archives, server folders)

use gtview_app::submit_dialog::{
    FolderList, LocalField, LocalSubmitForm, ServerField, ServerSubmitForm, SubmitDialog,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::modal_overlay;
use crate::theme::{palette, styles};

pub struct SubmitDialogWidget<'a> {
    dialog: &'a SubmitDialog,
}

impl<'a> SubmitDialogWidget<'a> {
    pub fn new(dialog: &'a SubmitDialog) -> Self {
        Self { dialog }
    }
}

impl Widget for SubmitDialogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.dialog {
            SubmitDialog::Local(form) => render_local(form, area, buf),
            SubmitDialog::Server(form) => render_server(form, area, buf),
        }
    }
}

/// Labelled single-line input
fn render_input(label: &str, value: &str, focused: bool, area: Rect, buf: &mut Buffer) {
    let [label_area, input_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let label_style = if focused {
        styles::accent_bold()
    } else {
        styles::text_secondary()
    };
    buf.set_line(
        label_area.x,
        label_area.y,
        &Line::styled(label, label_style),
        label_area.width,
    );

    let bg = if focused {
        palette::INPUT_ACTIVE_BG
    } else {
        palette::INPUT_INACTIVE_BG
    };
    let mut spans = vec![Span::raw(" "), Span::styled(value, styles::text_primary())];
    if focused {
        spans.push(Span::styled("▏", styles::accent()));
    }
    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(bg))
        .render(input_area, buf);
}

/// Footer: error or in-flight state, then key hints
fn render_footer(
    error: Option<&str>,
    submitting: bool,
    hints: Line<'static>,
    area: Rect,
    buf: &mut Buffer,
) {
    let [status_area, hint_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let status = if submitting {
        Line::styled("Running comparison…", styles::status_yellow())
    } else if let Some(error) = error {
        Line::styled(error.to_string(), styles::status_red())
    } else {
        Line::default()
    };
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .render(status_area, buf);
    Paragraph::new(hints)
        .alignment(Alignment::Center)
        .render(hint_area, buf);
}

fn hints(extra: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in extra
        .iter()
        .chain(&[("Tab", "next field"), ("Enter", "submit"), ("Esc", "cancel")])
    {
        spans.push(Span::styled(*key, styles::keybinding()));
        spans.push(Span::styled(format!(" {label}  "), styles::text_muted()));
    }
    Line::from(spans)
}

fn render_local(form: &LocalSubmitForm, area: Rect, buf: &mut Buffer) {
    let modal = modal_overlay::prepare_modal(buf, area, 70, 12);
    let block = styles::modal_block("Run Comparison (local archives)");
    let inner = block.inner(modal);
    block.render(modal, buf);

    let [gt_area, _, output_area, _, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(inner);

    render_input(
        "Ground-truth archive (.zip)",
        &form.gt_archive,
        form.focus == LocalField::GtArchive,
        gt_area,
        buf,
    );
    render_input(
        "Output archive (.zip)",
        &form.output_archive,
        form.focus == LocalField::OutputArchive,
        output_area,
        buf,
    );
    render_footer(
        form.error.as_deref(),
        form.submitting,
        hints(&[]),
        footer_area,
        buf,
    );
}

fn render_folder_list(title: &str, list: &FolderList, focused: bool, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            styles::border_active()
        } else {
            styles::border_inactive()
        })
        .title(format!(" {title} "));
    let inner = block.inner(area);
    block.render(area, buf);

    let placeholder = if list.loading {
        Some(Line::styled("Loading…", styles::text_muted()))
    } else if let Some(error) = &list.error {
        Some(Line::styled(error.clone(), styles::status_red()))
    } else if list.items.is_empty() {
        Some(Line::styled("No unprocessed folders", styles::text_muted()))
    } else {
        None
    };
    if let Some(line) = placeholder {
        Paragraph::new(line).render(inner, buf);
        return;
    }

    let items = list.items.iter().enumerate().map(|(i, name)| {
        let mark = if list.selected == Some(i) { "(•) " } else { "( ) " };
        ListItem::new(format!("{mark}{name}"))
    });
    let highlight = if focused {
        styles::focused_selected()
    } else {
        styles::row_highlight()
    };
    let mut state = ListState::default().with_selected(Some(list.cursor));
    StatefulWidget::render(
        List::new(items).highlight_style(highlight),
        inner,
        buf,
        &mut state,
    );
}

fn render_server(form: &ServerSubmitForm, area: Rect, buf: &mut Buffer) {
    let modal = modal_overlay::prepare_modal(buf, area, 76, 20);
    let block = styles::modal_block("Run Comparison (server folders)");
    let inner = block.inner(modal);
    block.render(modal, buf);

    let [lists_area, description_area, footer_area] = Layout::vertical([
        Constraint::Min(4),
        Constraint::Length(2),
        Constraint::Length(2),
    ])
    .areas(inner);
    let [gt_area, output_area] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(lists_area);

    render_folder_list(
        "GT folder",
        &form.gt_folders,
        form.focus == ServerField::GtFolder,
        gt_area,
        buf,
    );
    render_folder_list(
        "Output folder",
        &form.output_folders,
        form.focus == ServerField::OutputFolder,
        output_area,
        buf,
    );
    render_input(
        "Description",
        &form.description,
        form.focus == ServerField::Description,
        description_area,
        buf,
    );
    render_footer(
        form.error.as_deref(),
        form.submitting,
        hints(&[("↑↓", "move"), ("space", "pick")]),
        footer_area,
        buf,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_local_form_renders_fields() {
        let mut term = TestTerminal::new();
        let dialog = SubmitDialog::Local(LocalSubmitForm {
            gt_archive: "/data/gt.zip".into(),
            ..Default::default()
        });
        term.render_widget(SubmitDialogWidget::new(&dialog), term.area());

        assert!(term.buffer_contains("local archives"));
        assert!(term.buffer_contains("/data/gt.zip"));
        assert!(term.buffer_contains("Output archive"));
    }

    #[test]
    fn test_local_form_shows_error_and_progress() {
        let mut term = TestTerminal::new();
        let dialog = SubmitDialog::Local(LocalSubmitForm {
            error: Some("Select both a GT archive and an output archive".into()),
            ..Default::default()
        });
        term.render_widget(SubmitDialogWidget::new(&dialog), term.area());
        assert!(term.buffer_contains("Select both"));

        let mut term = TestTerminal::new();
        let dialog = SubmitDialog::Local(LocalSubmitForm {
            submitting: true,
            ..Default::default()
        });
        term.render_widget(SubmitDialogWidget::new(&dialog), term.area());
        assert!(term.buffer_contains("Running comparison"));
    }

    #[test]
    fn test_server_form_lists_folders() {
        let mut term = TestTerminal::new();
        let mut form = ServerSubmitForm::default();
        form.gt_folders = FolderList {
            items: vec!["gt_batch_1".into(), "gt_batch_2".into()],
            selected: Some(1),
            ..Default::default()
        };

        let dialog = SubmitDialog::Server(form);
        term.render_widget(SubmitDialogWidget::new(&dialog), term.area());

        assert!(term.buffer_contains("( ) gt_batch_1"));
        assert!(term.buffer_contains("(•) gt_batch_2"));
        // output list is still loading
        assert!(term.buffer_contains("Loading…"));
        assert!(term.buffer_contains("Run from UI"));
    }

    #[test]
    fn test_server_form_folder_error() {
        let mut term = TestTerminal::new();
        let mut form = ServerSubmitForm::default();
        form.output_folders.set_error("Failed to fetch unprocessed output folders".into());
        let dialog = SubmitDialog::Server(form);
        term.render_widget(SubmitDialogWidget::new(&dialog), term.area());
        assert!(term.buffer_contains("Failed to fetch"));
    }
}
