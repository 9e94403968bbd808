//! Three-way viewer handlers

use std::path::PathBuf;

use gtview_core::MatchField;
use tracing::{debug, error, info};

use crate::confirm_dialog::ConfirmDialogState;
use crate::message::Message;
use crate::state::AppState;
use crate::view::FileKey;
use crate::viewer::{Pane, PageChange};

use super::{UpdateAction, UpdateResult};

pub fn handle_toggle_match(state: &mut AppState, row: usize, field: MatchField) -> UpdateResult {
    if let Some(viewer) = state.viewer.as_mut() {
        if !viewer.toggle_match(row, field) {
            debug!("No comparison row {row} to toggle");
        }
    }
    UpdateResult::none()
}

pub fn handle_toggle_focused(state: &mut AppState) -> UpdateResult {
    if let Some(viewer) = state.viewer.as_mut() {
        viewer.toggle_focused();
    }
    UpdateResult::none()
}

pub fn handle_move_cell(state: &mut AppState, rows: isize, fields: isize) -> UpdateResult {
    if let Some(viewer) = state.viewer.as_mut() {
        viewer.move_cursor(rows, fields);
    }
    UpdateResult::none()
}

pub fn handle_toggle_pane(state: &mut AppState, pane: Pane) -> UpdateResult {
    if let Some(viewer) = state.viewer.as_mut() {
        viewer.toggle_pane(pane);
    }
    UpdateResult::none()
}

/// `[`/`]`: navigate, asking first when there are unsaved edits
pub fn handle_page_step(state: &mut AppState, delta: i64) -> UpdateResult {
    let Some(viewer) = state.viewer.as_ref() else {
        return UpdateResult::none();
    };
    match viewer.request_page_step(delta) {
        PageChange::OutOfRange | PageChange::Unchanged => UpdateResult::none(),
        PageChange::NeedsConfirm(page) => {
            state.show_confirm(ConfirmDialogState::discard_changes(
                Message::ConfirmPageChange(page),
            ));
            UpdateResult::none()
        }
        PageChange::Go(page) => UpdateResult::message(Message::ConfirmPageChange(page)),
    }
}

pub fn handle_confirm_page_change(state: &mut AppState, page: u32) -> UpdateResult {
    if state.view.file_key().is_some() {
        debug!("Navigating to page {page}");
        state.view.set_file_page(page);
    }
    UpdateResult::none()
}

/// Hand the edited rows to persistence; the viewer counts as saved until
/// persistence reports otherwise
pub fn handle_save(state: &mut AppState) -> UpdateResult {
    let save_dir = state.settings.viewer.save_dir.clone();
    let Some(viewer) = state.viewer.as_mut() else {
        return UpdateResult::none();
    };
    let payload = viewer.save_payload();
    let key = viewer.key().clone();
    viewer.mark_saved();
    info!(
        "Saving {} rows of {} page {}",
        payload.comparison_data.len(),
        payload.file_name,
        payload.page
    );
    state.set_status("Saving changes...");
    UpdateResult::action(UpdateAction::PersistChanges {
        key,
        payload,
        save_dir,
    })
}

pub fn handle_save_finished(
    state: &mut AppState,
    key: FileKey,
    result: Result<PathBuf, String>,
) -> UpdateResult {
    match result {
        Ok(path) => {
            info!("Saved changes to {}", path.display());
            state.set_status(format!("Saved changes to {}", path.display()));
        }
        Err(e) => {
            error!("Failed to save changes: {e}");
            if let Some(viewer) = state.viewer.as_mut().filter(|v| *v.key() == key) {
                viewer.mark_dirty();
            }
            state.set_error(format!("Failed to save changes: {e}"));
        }
    }
    UpdateResult::none()
}

pub fn handle_export_pdf(state: &mut AppState) -> UpdateResult {
    let save_dir = state.settings.viewer.save_dir.clone();
    let Some(viewer) = state.viewer.as_ref() else {
        return UpdateResult::none();
    };
    match viewer.pdf().bytes() {
        Some(bytes) => UpdateResult::action(UpdateAction::ExportPdf {
            key: viewer.key().clone(),
            bytes: bytes.to_vec(),
            save_dir,
        }),
        None => {
            state.set_error("No PDF available for this page");
            UpdateResult::none()
        }
    }
}

pub fn handle_pdf_exported(state: &mut AppState, result: Result<PathBuf, String>) -> UpdateResult {
    match result {
        Ok(path) => state.set_status(format!("Exported PDF to {}", path.display())),
        Err(e) => {
            error!("Failed to export PDF: {e}");
            state.set_error(format!("Failed to export PDF: {e}"));
        }
    }
    UpdateResult::none()
}
