//! Per-file results of the selected run

use gtview_app::view::ColumnToggle;
use gtview_core::{format_run_datetime, FileResult};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use super::{card, percent_cell, render_placeholder};
use crate::theme::styles;

pub struct RunSummaryCard<'a> {
    run_id: &'a str,
    results: &'a [FileResult],
    cursor: usize,
    columns: ColumnToggle,
    selected_file: Option<(&'a str, &'a str)>,
    loading: bool,
}

impl<'a> RunSummaryCard<'a> {
    pub fn new(run_id: &'a str, results: &'a [FileResult]) -> Self {
        Self {
            run_id,
            results,
            cursor: 0,
            columns: ColumnToggle::All,
            selected_file: None,
            loading: false,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn columns(mut self, columns: ColumnToggle) -> Self {
        self.columns = columns;
        self
    }

    pub fn selected_file(mut self, selected: Option<(&'a str, &'a str)>) -> Self {
        self.selected_file = selected;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for RunSummaryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card(format!("Run Summary · {}", format_run_datetime(self.run_id)), true);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.results.is_empty() {
            let text = if self.loading {
                "Loading run summary…"
            } else {
                "No results for this run."
            };
            render_placeholder(text, inner, buf);
            return;
        }

        let superscript = self.columns.shows_superscript();
        let font_info = self.columns.shows_font_info();

        let mut header = vec!["", "File", "Page", "Paragraphs", "Matches", "Content"];
        let mut widths = vec![
            Constraint::Length(1),
            Constraint::Min(14),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(9),
        ];
        if superscript {
            header.extend(["Sup TP", "Sup FP", "Sup FN"]);
            widths.extend([Constraint::Length(6); 3]);
        }
        if font_info {
            header.extend(["Font TP", "Font FP", "Font FN"]);
            widths.extend([Constraint::Length(7); 3]);
        }

        let rows = self.results.iter().map(|r| {
            let marker = if self.selected_file == Some((r.file_name.as_str(), r.page_num.as_str()))
            {
                Span::styled("●", styles::accent())
            } else {
                Span::raw(" ")
            };
            let mut cells = vec![
                Cell::from(marker),
                Cell::from(r.file_name.as_str()),
                Cell::from(r.page_num.as_str()),
                Cell::from(r.total_paragraphs.to_string()),
                Cell::from(r.content_matches.to_string()),
                percent_cell(r.content_match_percentage),
            ];
            if superscript {
                cells.extend([
                    Cell::from(r.tp_superscript.to_string()),
                    Cell::from(r.fp_superscript.to_string()),
                    Cell::from(r.fn_superscript.to_string()),
                ]);
            }
            if font_info {
                cells.extend([
                    Cell::from(r.tp_font_info.to_string()),
                    Cell::from(r.fp_font_info.to_string()),
                    Cell::from(r.fn_font_info.to_string()),
                ]);
            }
            Row::new(cells)
        });

        let table = Table::new(rows, widths)
            .header(Row::new(header).style(styles::table_header()))
            .row_highlight_style(styles::row_highlight())
            .column_spacing(1);

        let mut table_state = TableState::default().with_selected(Some(self.cursor));
        StatefulWidget::render(table, inner, buf, &mut table_state);
    }
}
