//! Three-way viewer: comparison table, HTML text and PDF page panes

use gtview_app::view::ColumnToggle;
use gtview_app::viewer::{Pane, PdfPage};
use gtview_app::ThreeWayViewer;
use gtview_core::{format_value, ComparisonRow, MatchField};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};

use super::{card, render_placeholder, truncate_to_width};
use crate::layout::pane_columns;
use crate::theme::styles;

/// Width of one comparison table column before the content column
const FIELD_COLUMN_WIDTH: u16 = 14;

pub struct ThreeWayView<'a> {
    viewer: &'a ThreeWayViewer,
    columns: ColumnToggle,
    loading: bool,
}

impl<'a> ThreeWayView<'a> {
    pub fn new(viewer: &'a ThreeWayViewer) -> Self {
        Self {
            viewer,
            columns: ColumnToggle::All,
            loading: false,
        }
    }

    pub fn columns(mut self, columns: ColumnToggle) -> Self {
        self.columns = columns;
        self
    }

    /// A different page is being fetched; the current one stays on screen
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn visible_fields(&self) -> Vec<MatchField> {
        MatchField::ALL
            .into_iter()
            .filter(|f| match f {
                MatchField::Content => true,
                MatchField::Superscript => self.columns.shows_superscript(),
                f => f.is_font_info() && self.columns.shows_font_info(),
            })
            .collect()
    }

    fn title_line(&self) -> Line<'static> {
        let viewer = self.viewer;
        let pagination = &viewer.payload().pagination;
        let mut spans = vec![
            Span::styled(format!(" {} ", viewer.file_name()), styles::accent_bold()),
            Span::styled(
                format!("page {} of {}", viewer.current_page(), viewer.total_pages()),
                styles::text_secondary(),
            ),
        ];
        if viewer.is_dirty() {
            spans.push(Span::styled("  ● unsaved", styles::status_yellow()));
        }
        if self.loading {
            spans.push(Span::styled("  loading…", styles::text_muted()));
        }
        if let Some(prev) = &pagination.prev_file {
            spans.push(Span::styled(format!("  ‹ {prev}"), styles::text_muted()));
        }
        if let Some(next) = &pagination.next_file {
            spans.push(Span::styled(format!("  {next} ›"), styles::text_muted()));
        }

        let panes = viewer.panes();
        spans.push(Span::raw("   "));
        for (key, pane) in [("t", Pane::Table), ("h", Pane::Html), ("p", Pane::Pdf)] {
            let style = if panes.is_visible(pane) {
                styles::accent()
            } else {
                styles::text_muted()
            };
            spans.push(Span::styled(format!("[{key}]{} ", pane_short(pane)), style));
        }
        Line::from(spans)
    }

    fn render_table_pane(&self, area: Rect, buf: &mut Buffer) {
        let block = card(Pane::Table.title().to_string(), true);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self.viewer.rows();
        if rows.is_empty() {
            render_placeholder("No comparison rows on this page.", inner, buf);
            return;
        }

        let fields = self.visible_fields();
        let (cursor_row, cursor_field) = self.viewer.cursor();

        let [table_area, detail_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(fields.len() as u16 + 1),
        ])
        .areas(inner);

        let header = Row::new(
            std::iter::once("#")
                .chain(fields.iter().map(|f| f.header()))
                .collect::<Vec<_>>(),
        )
        .style(styles::table_header());

        let body = rows.iter().enumerate().map(|(i, row)| {
            let cells = std::iter::once(Cell::from(i.to_string())).chain(fields.iter().map(
                |field| {
                    let focused = i == cursor_row && *field == cursor_field;
                    match_cell(*field, row, focused)
                },
            ));
            Row::new(cells.collect::<Vec<_>>())
        });

        let widths = std::iter::once(Constraint::Length(3))
            .chain(fields.iter().map(|f| match f {
                MatchField::Content => Constraint::Min(FIELD_COLUMN_WIDTH),
                _ => Constraint::Length(FIELD_COLUMN_WIDTH),
            }))
            .collect::<Vec<_>>();

        let table = Table::new(body, widths)
            .header(header)
            .row_highlight_style(Style::default().bg(crate::theme::palette::ROW_SELECTED_BG))
            .column_spacing(1);
        let mut table_state = TableState::default().with_selected(Some(cursor_row));
        StatefulWidget::render(table, table_area, buf, &mut table_state);

        if let Some(row) = rows.get(cursor_row) {
            focused_row_detail(row, &fields, cursor_field, detail_area.width)
                .render(detail_area, buf);
        }
    }

    fn render_html_pane(&self, area: Rect, buf: &mut Buffer) {
        let block = card(Pane::Html.title().to_string(), false);
        let inner = block.inner(area);
        block.render(area, buf);

        let text = self.viewer.html_text();
        if text.is_empty() {
            render_placeholder("No HTML for this page.", inner, buf);
            return;
        }
        Paragraph::new(text)
            .style(styles::text_primary())
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_pdf_pane(&self, area: Rect, buf: &mut Buffer) {
        let block = card(Pane::Pdf.title().to_string(), false);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match self.viewer.pdf() {
            PdfPage::Missing => {
                render_placeholder("No PDF for this page.", inner, buf);
                return;
            }
            PdfPage::Invalid(e) => vec![
                Line::styled(" PDF data could not be decoded", styles::status_red()),
                Line::styled(format!(" {e}"), styles::text_muted()),
            ],
            PdfPage::Decoded(bytes) => {
                let version = self
                    .viewer
                    .pdf()
                    .version()
                    .unwrap_or_else(|| "unknown".to_string());
                vec![
                    Line::from(vec![
                        Span::styled(" Version ", styles::text_secondary()),
                        Span::styled(version, styles::text_bright()),
                    ]),
                    Line::from(vec![
                        Span::styled(" Size    ", styles::text_secondary()),
                        Span::styled(format_size(bytes.len()), styles::text_bright()),
                    ]),
                    Line::default(),
                    Line::from(vec![
                        Span::styled(" e", styles::keybinding()),
                        Span::styled(" export page to save dir", styles::text_muted()),
                    ]),
                ]
            }
        };
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

fn pane_short(pane: Pane) -> &'static str {
    match pane {
        Pane::Table => "table",
        Pane::Html => "html",
        Pane::Pdf => "pdf",
    }
}

/// Match glyph followed by the output value
fn match_cell(field: MatchField, row: &ComparisonRow, focused: bool) -> Cell<'static> {
    let matched = field.is_match(row);
    let glyph = if matched { "✓" } else { "✗" };
    let value = format_value(field, field.output(row));
    if focused {
        return Cell::from(format!("{glyph} {value}")).style(styles::focused_selected());
    }
    Cell::from(Line::from(vec![
        Span::styled(glyph, styles::match_flag(matched)),
        Span::raw(" "),
        Span::raw(value),
    ]))
}

/// Output vs ground truth of every visible field of the focused row
fn focused_row_detail(
    row: &ComparisonRow,
    fields: &[MatchField],
    cursor_field: MatchField,
    width: u16,
) -> Paragraph<'static> {
    // label column and separator take 16 cells, the rest is split
    let value_width = (width as usize).saturating_sub(16) / 2;
    let mut lines = vec![Line::styled(
        " Output │ Ground truth",
        styles::text_muted(),
    )];
    for field in fields {
        let label_style = if *field == cursor_field {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<12}", field.header()), label_style),
            Span::styled(
                truncate_to_width(&format_value(*field, field.output(row)), value_width),
                styles::text_primary(),
            ),
            Span::styled(" │ ", styles::text_muted()),
            Span::styled(
                truncate_to_width(&format_value(*field, field.ground_truth(row)), value_width),
                styles::match_flag(field.is_match(row)),
            ),
        ]));
    }
    Paragraph::new(lines)
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

impl Widget for ThreeWayView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }
        let [title_area, panes_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);
        buf.set_line(title_area.x, title_area.y, &self.title_line(), title_area.width);

        let visible = self.viewer.panes().visible();
        if visible.is_empty() {
            render_placeholder(
                "All panes hidden. Press t, h or p to show one.",
                panes_area,
                buf,
            );
            return;
        }

        for (pane, rect) in visible.iter().zip(pane_columns(panes_area, visible.len())) {
            match pane {
                Pane::Table => self.render_table_pane(rect, buf),
                Pane::Html => self.render_html_pane(rect, buf),
                Pane::Pdf => self.render_pdf_pane(rect, buf),
            }
        }
    }
}
