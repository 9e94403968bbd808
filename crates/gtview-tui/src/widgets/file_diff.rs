//! Paragraph diff of the selected file

use gtview_app::view::FileSelection;
use gtview_core::FileDiffRow;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table, Widget},
};

use super::{card, render_placeholder};
use crate::theme::styles;

pub struct FileDiffCard<'a> {
    selection: &'a FileSelection,
    rows: &'a [FileDiffRow],
    loading: bool,
}

impl<'a> FileDiffCard<'a> {
    pub fn new(selection: &'a FileSelection, rows: &'a [FileDiffRow]) -> Self {
        Self {
            selection,
            rows,
            loading: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for FileDiffCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mismatches = self.rows.iter().filter(|r| !r.is_match()).count();
        let title = format!(
            "File Diff · {}_{} · {} of {} differ",
            self.selection.file_name,
            self.selection.suffix,
            mismatches,
            self.rows.len()
        );
        let block = card(title, true);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            let text = if self.loading {
                "Loading diff…"
            } else {
                "No paragraphs to compare."
            };
            render_placeholder(text, inner, buf);
            return;
        }

        let rows = self.rows.iter().map(|r| {
            let (mark, style) = if r.is_match() {
                ("=", styles::status_green())
            } else {
                ("≠", styles::status_red())
            };
            Row::new([
                Cell::from(r.index.to_string()),
                Cell::from(Span::styled(mark, style)),
                Cell::from(r.content_output.as_str()),
                Cell::from(r.content_gt.as_str()),
            ])
        });

        Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ],
        )
        .header(Row::new(["#", "", "Output", "Ground truth"]).style(styles::table_header()))
        .column_spacing(1)
        .render(inner, buf);
    }
}
