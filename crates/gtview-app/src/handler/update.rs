//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in sibling modules:
//! - `fetch`: gateway results
//! - `viewer`: three-way viewer edits, paging and save
//! - `submit`: comparison submission dialogs

use gtview_core::{content_file_identifier, indentation_file_identifier, DetailKind};
use tracing::{debug, info};

use crate::confirm_dialog::ConfirmDialogState;
use crate::message::Message;
use crate::state::{AppState, UiMode};
use crate::view::{FileSelection, View};

use super::{fetch, keys::handle_key, submit, viewer, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => UpdateResult::none(),

        Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Quit => {
            state.force_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // View-State Intents
        // ─────────────────────────────────────────────────────────
        Message::ToggleFlag(flag) => {
            state.view.toggle_flag(flag);
            UpdateResult::none()
        }

        Message::CycleColumns => {
            state.view.cycle_columns();
            UpdateResult::none()
        }

        Message::MoveCursor(delta) => {
            handle_move_cursor(state, delta);
            UpdateResult::none()
        }

        Message::ActivateRow => match activate_row(state) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::SelectRow => match select_row(state) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::SelectRun(run_id) => {
            state.set_status(format!("Selected run {run_id}"));
            state.view.select_run(Some(run_id));
            state.cursors.run_results = 0;
            UpdateResult::none()
        }

        Message::SelectFile(FileSelection {
            run_id,
            file_name,
            suffix,
        }) => {
            state.set_status(format!("Selected {file_name} page {suffix}"));
            state.view.select_file(run_id, file_name, suffix);
            UpdateResult::none()
        }

        Message::OpenRunDetail(run_id) => {
            state.view.open_run_detail(run_id);
            state.cursors.details = 0;
            UpdateResult::none()
        }

        Message::OpenIndentationDetail(run_id) => {
            state.view.open_indentation_detail(run_id);
            state.cursors.details = 0;
            UpdateResult::none()
        }

        Message::CloseDetail => {
            state.view.close_detail();
            UpdateResult::none()
        }

        Message::OpenFile {
            run_id,
            file_name,
            page,
        } => {
            debug!("Opening {file_name} page {page} of run {run_id}");
            state.view.open_file(run_id, file_name, page);
            UpdateResult::none()
        }

        Message::RequestCloseFile => {
            if state.has_unsaved_edits() && state.settings.ui.confirm_discard {
                state.show_confirm(ConfirmDialogState::discard_changes(Message::CloseFile));
                UpdateResult::none()
            } else {
                UpdateResult::message(Message::CloseFile)
            }
        }

        Message::CloseFile => {
            state.view.close_file();
            state.viewer = None;
            UpdateResult::none()
        }

        Message::Reload => {
            info!("Reloading run lists");
            state.effects.remount();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Viewer Messages
        // ─────────────────────────────────────────────────────────
        Message::ToggleMatch { row, field } => viewer::handle_toggle_match(state, row, field),
        Message::ToggleFocusedMatch => viewer::handle_toggle_focused(state),
        Message::MoveCell { rows, fields } => viewer::handle_move_cell(state, rows, fields),
        Message::TogglePane(pane) => viewer::handle_toggle_pane(state, pane),
        Message::RequestPageStep(delta) => viewer::handle_page_step(state, delta),
        Message::ConfirmPageChange(page) => viewer::handle_confirm_page_change(state, page),
        Message::SaveViewer => viewer::handle_save(state),
        Message::SaveFinished { key, result } => viewer::handle_save_finished(state, key, result),
        Message::ExportPdf => viewer::handle_export_pdf(state),
        Message::PdfExported(result) => viewer::handle_pdf_exported(state, result),

        // ─────────────────────────────────────────────────────────
        // Fetch Results
        // ─────────────────────────────────────────────────────────
        Message::RunListsLoaded {
            ticket,
            runs,
            indentation_runs,
        } => fetch::handle_run_lists_loaded(state, ticket, runs, indentation_runs),
        Message::RunDetailLoaded {
            ticket,
            run_id,
            kind,
            result,
        } => fetch::handle_run_detail_loaded(state, ticket, run_id, kind, result),
        Message::ThreeWayLoaded {
            ticket,
            key,
            result,
        } => fetch::handle_three_way_loaded(state, ticket, key, result),
        Message::RunResultsLoaded {
            ticket,
            run_id,
            result,
        } => fetch::handle_run_results_loaded(state, ticket, run_id, result),
        Message::FileDiffLoaded {
            ticket,
            selection,
            result,
        } => fetch::handle_file_diff_loaded(state, ticket, selection, result),

        // ─────────────────────────────────────────────────────────
        // Run Deletion
        // ─────────────────────────────────────────────────────────
        Message::RequestDeleteRun(run_id) => {
            if state.pending_delete.is_some() {
                state.set_error("A deletion is already in progress");
            } else {
                state.show_confirm(ConfirmDialogState::delete_run(&run_id));
            }
            UpdateResult::none()
        }

        Message::DeleteRun(run_id) => {
            info!("Deleting run {run_id}");
            state.set_status(format!("Deleting run {run_id}..."));
            state.pending_delete = Some(run_id.clone());
            UpdateResult::action(UpdateAction::DeleteRun { run_id })
        }

        Message::RunDeleted { run_id, result } => {
            handle_run_deleted(state, run_id, result);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Dialogs
        // ─────────────────────────────────────────────────────────
        Message::ConfirmDialogNext => {
            if let Some(dialog) = state.confirm_dialog_state.as_mut() {
                dialog.select_next();
            }
            UpdateResult::none()
        }

        Message::ConfirmDialogPrevious => {
            if let Some(dialog) = state.confirm_dialog_state.as_mut() {
                dialog.select_previous();
            }
            UpdateResult::none()
        }

        Message::ConfirmDialogSelect => {
            match state.close_confirm().and_then(|dialog| dialog.chosen()) {
                Some(msg) => UpdateResult::message(msg),
                None => UpdateResult::none(),
            }
        }

        Message::ConfirmDialogAccept => {
            match state.close_confirm().and_then(|dialog| dialog.affirmative()) {
                Some(msg) => UpdateResult::message(msg),
                None => UpdateResult::none(),
            }
        }

        Message::ConfirmDialogDismiss => {
            if state.ui_mode == UiMode::ConfirmDialog {
                state.close_confirm();
            }
            UpdateResult::none()
        }

        Message::DismissAlert => {
            state.dismiss_alert();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Comparison Submission
        // ─────────────────────────────────────────────────────────
        Message::OpenLocalSubmit => submit::handle_open_local(state),
        Message::OpenServerSubmit => submit::handle_open_server(state),
        Message::CloseSubmitDialog => submit::handle_close(state),
        Message::SubmitDialogInput(c) => submit::handle_input(state, c),
        Message::SubmitDialogBackspace => submit::handle_backspace(state),
        Message::SubmitDialogNextField => submit::handle_next_field(state),
        Message::SubmitDialogPreviousField => submit::handle_previous_field(state),
        Message::SubmitDialogMove(delta) => submit::handle_move(state, delta),
        Message::SubmitDialogSelect => submit::handle_select(state),
        Message::SubmitDialogSubmit => submit::handle_submit(state),
        Message::FoldersLoaded { kind, result } => {
            submit::handle_folders_loaded(state, kind, result)
        }
        Message::ComparisonSubmitted(result) => submit::handle_submitted(state, result),
    }
}

/// Move the cursor of the table on screen
fn handle_move_cursor(state: &mut AppState, delta: isize) {
    let (cursor, len) = match state.effective_view() {
        View::FinalSummary => (&mut state.cursors.runs, state.runs.len()),
        View::IndentationSummary => (
            &mut state.cursors.indentation_runs,
            state.indentation_runs.len(),
        ),
        View::RunDetails => {
            let len = state.active_details().map_or(0, |d| d.rows.len());
            (&mut state.cursors.details, len)
        }
        View::RunSummary => (&mut state.cursors.run_results, state.run_results.len()),
        View::ThreeWay | View::FileDiff | View::Welcome => return,
    };
    if len == 0 {
        *cursor = 0;
        return;
    }
    *cursor = cursor.saturating_add_signed(delta).min(len - 1);
}

/// Enter on the highlighted row: drill down one level
fn activate_row(state: &AppState) -> Option<Message> {
    match state.effective_view() {
        View::FinalSummary => state
            .highlighted_run()
            .map(|run| Message::OpenRunDetail(run.id.clone())),
        View::IndentationSummary => state
            .highlighted_indentation_run()
            .map(|run| Message::OpenIndentationDetail(run.id.clone())),
        View::RunDetails => {
            let details = state.active_details()?;
            let row = state.highlighted_detail()?;
            let target = match details.kind {
                DetailKind::Content => content_file_identifier(&row.file_name, &row.page_num),
                DetailKind::Indentation => indentation_file_identifier(
                    &row.file_name,
                    row.table_num.as_deref(),
                    &row.page_num,
                ),
            };
            Some(Message::OpenFile {
                run_id: details.run_id.clone(),
                file_name: target.identifier,
                page: target.page,
            })
        }
        View::RunSummary => select_row(state),
        View::ThreeWay | View::FileDiff | View::Welcome => None,
    }
}

/// Space on the highlighted row: select it for the run summary or file diff
fn select_row(state: &AppState) -> Option<Message> {
    match state.effective_view() {
        View::FinalSummary => state
            .highlighted_run()
            .map(|run| Message::SelectRun(run.id.clone())),
        View::RunDetails => {
            let details = state.active_details()?;
            if details.kind != DetailKind::Content {
                return None;
            }
            let row = state.highlighted_detail()?;
            Some(Message::SelectFile(FileSelection {
                run_id: details.run_id.clone(),
                file_name: row.file_name.clone(),
                suffix: row.page_num.clone(),
            }))
        }
        View::RunSummary => {
            let run_id = state.view.selected_run_id()?;
            let row = state.run_results.get(state.cursors.run_results)?;
            Some(Message::SelectFile(FileSelection {
                run_id: run_id.to_string(),
                file_name: row.file_name.clone(),
                suffix: row.page_num.clone(),
            }))
        }
        View::ThreeWay => Some(Message::ToggleFocusedMatch),
        View::IndentationSummary | View::FileDiff | View::Welcome => None,
    }
}

fn handle_run_deleted(state: &mut AppState, run_id: String, result: Result<(), String>) {
    if state.pending_delete.as_deref() == Some(run_id.as_str()) {
        state.pending_delete = None;
    }
    match result {
        Ok(()) => {
            info!("Run {run_id} deleted");
            state.runs.retain(|run| run.id != run_id);
            state.indentation_runs.retain(|run| run.id != run_id);
            if state.details.as_ref().is_some_and(|d| d.run_id == run_id) {
                state.details = None;
            }
            if state.viewer.as_ref().is_some_and(|v| v.key().run_id == run_id) {
                state.viewer = None;
            }
            state.view.forget_run(&run_id);
            state.clamp_cursors();
            state.set_status(format!("Deleted run {run_id}"));
        }
        Err(e) => {
            state.set_error(e);
        }
    }
}
