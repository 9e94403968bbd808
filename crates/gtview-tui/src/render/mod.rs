//! Main render/view function (View in TEA pattern)


use gtview_app::effects::FetchRule;
use gtview_app::state::{AppState, UiMode};
use gtview_app::View;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::{palette, styles};

/// Render the complete UI
///
/// Pure with respect to state: everything drawn is derived from `state`,
/// and the main content is chosen solely by the effective view.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    let current = state.effective_view();

    frame.render_widget(
        widgets::MainHeader::new(&state.settings.api.base_url, current)
            .loading(state.any_loading())
            .dirty(state.has_unsaved_edits()),
        areas.header,
    );
    frame.render_widget(widgets::Sidebar::new(&state.view, current), areas.sidebar);

    render_content(frame, state, current, areas.content);

    frame.render_widget(
        widgets::StatusBar::new(state.status.as_ref())
            .counts(state.runs.len(), state.indentation_runs.len()),
        areas.status,
    );

    render_overlays(frame, state, area);
}

fn render_content(frame: &mut Frame, state: &AppState, current: View, area: Rect) {
    let columns = state.view.column_toggle();
    let selection = state.view.file_selection();

    match current {
        View::ThreeWay => match &state.viewer {
            Some(viewer) => {
                let stale = state.view.file_key().as_ref() != Some(viewer.key());
                frame.render_widget(
                    widgets::ThreeWayView::new(viewer)
                        .columns(columns)
                        .loading(stale || state.is_loading(FetchRule::ThreeWay)),
                    area,
                );
            }
            None => render_message(frame, area, "File Viewer", "Loading page…"),
        },

        View::RunDetails => {
            let Some((run_id, kind)) = state.view.active_detail() else {
                return;
            };
            let selected = selection
                .as_ref()
                .filter(|s| s.run_id == run_id)
                .map(|s| (s.file_name.as_str(), s.suffix.as_str()));
            frame.render_widget(
                widgets::RunDetailsTable::new(run_id, kind, state.active_details())
                    .cursor(state.cursors.details)
                    .columns(columns)
                    .selected_file(selected),
                area,
            );
        }

        View::IndentationSummary => frame.render_widget(
            widgets::IndentationRunsTable::new(
                &state.indentation_runs,
                state.cursors.indentation_runs,
            )
            .loading(state.is_loading(FetchRule::RunLists)),
            area,
        ),

        View::RunSummary => {
            let Some(run_id) = state.view.selected_run_id() else {
                return;
            };
            let selected = selection
                .as_ref()
                .map(|s| (s.file_name.as_str(), s.suffix.as_str()));
            frame.render_widget(
                widgets::RunSummaryCard::new(run_id, &state.run_results)
                    .cursor(state.cursors.run_results)
                    .columns(columns)
                    .selected_file(selected)
                    .loading(state.is_loading(FetchRule::RunResults)),
                area,
            );
        }

        View::FileDiff => {
            let Some(selection) = selection.as_ref() else {
                return;
            };
            frame.render_widget(
                widgets::FileDiffCard::new(selection, &state.file_diff)
                    .loading(state.is_loading(FetchRule::FileDiff)),
                area,
            );
        }

        View::FinalSummary => frame.render_widget(
            widgets::RunsTable::new(&state.runs, state.cursors.runs)
                .selected(state.view.selected_run_id())
                .columns(columns)
                .loading(state.is_loading(FetchRule::RunLists)),
            area,
        ),

        View::Welcome => render_message(
            frame,
            area,
            "Welcome",
            "Nothing selected. Press 1 for all runs or 2 for indentation runs.",
        ),
    }
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let block = styles::glass_block(true).title(Line::from(vec![Span::styled(
        format!(" {title} "),
        styles::accent_bold(),
    )]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top = inner.height / 2;
    frame.render_widget(
        Paragraph::new(text)
            .style(styles::text_muted())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        Rect::new(inner.x, inner.y + top, inner.width, inner.height - top),
    );
}

/// Modal overlays; the submission form stays underneath a confirm or alert
fn render_overlays(frame: &mut Frame, state: &AppState, area: Rect) {
    if let Some(dialog) = &state.submit_dialog {
        frame.render_widget(widgets::SubmitDialogWidget::new(dialog), area);
    }

    match state.ui_mode {
        UiMode::ConfirmDialog => {
            if let Some(dialog_state) = &state.confirm_dialog_state {
                frame.render_widget(widgets::ConfirmDialog::new(dialog_state), area);
            }
        }
        UiMode::Alert => {
            if let Some(text) = &state.alert {
                frame.render_widget(widgets::AlertDialog::new(text), area);
            }
        }
        UiMode::Normal | UiMode::SubmitDialog => {}
    }
}
