//! All-runs and indentation-runs tables

use gtview_app::view::ColumnToggle;
use gtview_core::{format_run_datetime, IndentationRun, Run};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use super::{card, percent_cell, render_placeholder};
use crate::theme::styles;

/// Content runs, newest first as the backend sends them
pub struct RunsTable<'a> {
    runs: &'a [Run],
    cursor: usize,
    selected_run_id: Option<&'a str>,
    columns: ColumnToggle,
    loading: bool,
}

impl<'a> RunsTable<'a> {
    pub fn new(runs: &'a [Run], cursor: usize) -> Self {
        Self {
            runs,
            cursor,
            selected_run_id: None,
            columns: ColumnToggle::All,
            loading: false,
        }
    }

    /// Mark the run the summary views belong to
    pub fn selected(mut self, run_id: Option<&'a str>) -> Self {
        self.selected_run_id = run_id;
        self
    }

    pub fn columns(mut self, columns: ColumnToggle) -> Self {
        self.columns = columns;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for RunsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card(format!("All Runs ({})", self.runs.len()), true);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.runs.is_empty() {
            let text = if self.loading {
                "Loading runs…"
            } else {
                "No runs yet. Press n to run a comparison."
            };
            render_placeholder(text, inner, buf);
            return;
        }

        let superscript = self.columns.shows_superscript();

        let mut header = vec!["", "Date / Time", "Description", "Files", "Paragraphs", "Content"];
        let mut widths = vec![
            Constraint::Length(1),
            Constraint::Length(22),
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(9),
        ];
        if superscript {
            header.extend(["TP", "FP", "FN", "Superscript"]);
            widths.extend([
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(11),
            ]);
        }

        let rows = self.runs.iter().map(|run| {
            let marker = if Some(run.id.as_str()) == self.selected_run_id {
                Span::styled("●", styles::accent())
            } else {
                Span::raw(" ")
            };
            let mut cells = vec![
                Cell::from(marker),
                Cell::from(format_run_datetime(&run.id)),
                Cell::from(run.description.clone().unwrap_or_default()),
                Cell::from(run.files_processed.to_string()),
                Cell::from(run.total_paragraphs.to_string()),
                percent_cell(run.content_match_percentage),
            ];
            if superscript {
                cells.extend([
                    Cell::from(run.tp_superscript.to_string()),
                    Cell::from(run.fp_superscript.to_string()),
                    Cell::from(run.fn_superscript.to_string()),
                    percent_cell(run.superscript_match_percentage),
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

/// Indentation runs
pub struct IndentationRunsTable<'a> {
    runs: &'a [IndentationRun],
    cursor: usize,
    loading: bool,
}

impl<'a> IndentationRunsTable<'a> {
    pub fn new(runs: &'a [IndentationRun], cursor: usize) -> Self {
        Self {
            runs,
            cursor,
            loading: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for IndentationRunsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card(format!("Indentation Runs ({})", self.runs.len()), true);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.runs.is_empty() {
            let text = if self.loading {
                "Loading indentation runs…"
            } else {
                "No indentation runs."
            };
            render_placeholder(text, inner, buf);
            return;
        }

        let header = Row::new([
            "Date / Time",
            "Description",
            "Files",
            "Rows",
            "Row",
            "Level",
            "Parent",
            "Data",
        ])
        .style(styles::table_header());

        let rows = self.runs.iter().map(|run| {
            Row::new([
                Cell::from(format_run_datetime(&run.id)),
                Cell::from(run.description.clone().unwrap_or_default()),
                Cell::from(run.files_processed.to_string()),
                Cell::from(run.total_rows.to_string()),
                percent_cell(run.row_match_percentage),
                percent_cell(run.indentation_level_match_percentage),
                percent_cell(run.parent_text_match_percentage),
                percent_cell(run.row_data_match_percentage),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(22),
                Constraint::Min(12),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .row_highlight_style(styles::row_highlight())
        .column_spacing(1);

        let mut table_state = TableState::default().with_selected(Some(self.cursor));
        StatefulWidget::render(table, inner, buf, &mut table_state);
    }
}
