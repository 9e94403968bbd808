//! File-by-file listing of one run, with totals above the table

use gtview_app::state::RunDetails;
use gtview_app::view::ColumnToggle;
use gtview_core::{format_run_datetime, DetailKind, DetailSummary, FileDetailRow};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use super::{card, opt_count_cell, opt_percent_cell, render_placeholder};
use crate::theme::styles;

pub struct RunDetailsTable<'a> {
    run_id: &'a str,
    kind: DetailKind,
    details: Option<&'a RunDetails>,
    cursor: usize,
    columns: ColumnToggle,
    selected_file: Option<(&'a str, &'a str)>,
}

impl<'a> RunDetailsTable<'a> {
    /// `details` is `None` while the listing for `run_id` is loading
    pub fn new(run_id: &'a str, kind: DetailKind, details: Option<&'a RunDetails>) -> Self {
        Self {
            run_id,
            kind,
            details,
            cursor: 0,
            columns: ColumnToggle::All,
            selected_file: None,
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

    /// Mark the (file name, suffix) the diff view belongs to
    pub fn selected_file(mut self, selected: Option<(&'a str, &'a str)>) -> Self {
        self.selected_file = selected;
        self
    }

    fn summary_lines(&self, summary: &DetailSummary) -> Vec<Line<'static>> {
        let label = |s: &'static str| Span::styled(s, styles::text_secondary());
        let value = |s: String| Span::styled(s, styles::text_bright());

        match self.kind {
            DetailKind::Content => {
                let mut first = vec![
                    label(" Files "),
                    value(summary.total_files.to_string()),
                    label("  Paragraphs "),
                    value(summary.total_paragraphs.to_string()),
                    label("  Matches "),
                    value(summary.total_content_matches.to_string()),
                    label("  Content "),
                    Span::styled(
                        format!("{:.2}%", summary.content_match_overall),
                        styles::grade(summary.content_match_overall),
                    ),
                ];
                if self.columns.shows_superscript() {
                    first.extend([
                        label("  Superscript "),
                        Span::styled(
                            format!("{:.2}%", summary.superscript_match_overall),
                            styles::grade(summary.superscript_match_overall),
                        ),
                    ]);
                }
                let mut lines = vec![Line::from(first)];
                if self.columns.shows_superscript() {
                    lines.push(Line::from(vec![
                        label(" TP "),
                        value(summary.total_tp_superscript.to_string()),
                        label("  FP "),
                        value(summary.total_fp_superscript.to_string()),
                        label("  FN "),
                        value(summary.total_fn_superscript.to_string()),
                        label("  Superscript matches "),
                        value(summary.total_superscript_matches.to_string()),
                    ]));
                }
                lines
            }
            DetailKind::Indentation => vec![Line::from(vec![
                label(" Files "),
                value(summary.total_files.to_string()),
                label("  Rows "),
                value(summary.total_rows.to_string()),
                label("  Average row match "),
                Span::styled(
                    format!("{:.2}%", summary.average_row_match),
                    styles::grade(summary.average_row_match),
                ),
            ])],
        }
    }

    fn content_table(&self, rows: &'a [FileDetailRow]) -> Table<'a> {
        let superscript = self.columns.shows_superscript();
        let mut header = vec!["", "File", "Page", "Paragraphs", "Matches", "Content"];
        let mut widths = vec![
            Constraint::Length(1),
            Constraint::Min(16),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(9),
        ];
        if superscript {
            header.extend(["TP", "FP", "FN", "Sup. matches", "Superscript"]);
            widths.extend([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(12),
                Constraint::Length(11),
            ]);
        }

        let rows = rows.iter().map(|row| {
            let selected = self.selected_file
                == Some((row.file_name.as_str(), row.page_num.as_str()));
            let marker = if selected {
                Span::styled("●", styles::accent())
            } else {
                Span::raw(" ")
            };
            let mut cells = vec![
                Cell::from(marker),
                Cell::from(row.file_name.as_str()),
                Cell::from(row.page_num.as_str()),
                opt_count_cell(row.total_paragraphs),
                opt_count_cell(row.content_matches),
                opt_percent_cell(row.content_match_percentage),
            ];
            if superscript {
                cells.extend([
                    opt_count_cell(row.tp_superscript),
                    opt_count_cell(row.fp_superscript),
                    opt_count_cell(row.fn_superscript),
                    opt_count_cell(row.superscript_matches),
                    opt_percent_cell(row.superscript_match_percentage),
                ]);
            }
            Row::new(cells)
        });

        Table::new(rows, widths).header(Row::new(header).style(styles::table_header()))
    }

    fn indentation_table(&self, rows: &'a [FileDetailRow]) -> Table<'a> {
        let header = Row::new([
            "File", "Table", "Page", "Rows", "GT rows", "Row", "Level", "Parent", "Data",
        ])
        .style(styles::table_header());

        let rows = rows.iter().map(|row| {
            Row::new([
                Cell::from(row.file_name.as_str()),
                Cell::from(row.table_num.clone().unwrap_or_default()),
                Cell::from(row.page_num.as_str()),
                opt_count_cell(row.total_rows),
                opt_count_cell(row.gt_rows),
                opt_percent_cell(row.row_match_percentage),
                opt_percent_cell(row.indentation_level_match_percentage),
                opt_percent_cell(row.parent_text_match_percentage),
                opt_percent_cell(row.row_data_match_percentage),
            ])
        });

        Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
            ],
        )
        .header(header)
    }
}

impl Widget for RunDetailsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            "{} · {}",
            self.kind.title(),
            format_run_datetime(self.run_id)
        );
        let block = card(title, true);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(details) = self.details else {
            render_placeholder("Loading run details…", inner, buf);
            return;
        };
        if details.rows.is_empty() {
            render_placeholder("This run has no files.", inner, buf);
            return;
        }

        let summary = DetailSummary::from_rows(&details.rows);
        let summary_lines = self.summary_lines(&summary);
        let [summary_area, table_area] = Layout::vertical([
            Constraint::Length(summary_lines.len() as u16 + 1),
            Constraint::Min(1),
        ])
        .areas(inner);
        Paragraph::new(summary_lines).render(summary_area, buf);

        let table = match self.kind {
            DetailKind::Content => self.content_table(&details.rows),
            DetailKind::Indentation => self.indentation_table(&details.rows),
        }
        .row_highlight_style(styles::row_highlight())
        .column_spacing(1);

        let mut table_state = TableState::default().with_selected(Some(self.cursor));
        StatefulWidget::render(table, table_area, buf, &mut table_state);
    }
}
