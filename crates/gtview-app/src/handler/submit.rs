//! Comparison submission dialog handlers

use gtview_core::{ComparisonSubmitted, FolderKind};
use tracing::{error, info, warn};

use crate::state::{AppState, UiMode};
use crate::submit_dialog::{LocalSubmitForm, ServerSubmitForm, SubmitDialog};

use super::{UpdateAction, UpdateResult};

pub fn handle_open_local(state: &mut AppState) -> UpdateResult {
    state.submit_dialog = Some(SubmitDialog::Local(LocalSubmitForm::default()));
    state.ui_mode = UiMode::SubmitDialog;
    UpdateResult::none()
}

pub fn handle_open_server(state: &mut AppState) -> UpdateResult {
    state.submit_dialog = Some(SubmitDialog::Server(ServerSubmitForm::default()));
    state.ui_mode = UiMode::SubmitDialog;
    UpdateResult::action(UpdateAction::LoadFolders)
}

pub fn handle_close(state: &mut AppState) -> UpdateResult {
    state.submit_dialog = None;
    if state.ui_mode == UiMode::SubmitDialog {
        state.ui_mode = UiMode::Normal;
    }
    UpdateResult::none()
}

pub fn handle_input(state: &mut AppState, c: char) -> UpdateResult {
    match state.submit_dialog.as_mut() {
        Some(SubmitDialog::Local(form)) => form.input_char(c),
        Some(SubmitDialog::Server(form)) => form.input_char(c),
        None => {}
    }
    UpdateResult::none()
}

pub fn handle_backspace(state: &mut AppState) -> UpdateResult {
    match state.submit_dialog.as_mut() {
        Some(SubmitDialog::Local(form)) => form.backspace(),
        Some(SubmitDialog::Server(form)) => form.backspace(),
        None => {}
    }
    UpdateResult::none()
}

pub fn handle_next_field(state: &mut AppState) -> UpdateResult {
    match state.submit_dialog.as_mut() {
        Some(SubmitDialog::Local(form)) => form.next_field(),
        Some(SubmitDialog::Server(form)) => form.next_field(),
        None => {}
    }
    UpdateResult::none()
}

pub fn handle_previous_field(state: &mut AppState) -> UpdateResult {
    match state.submit_dialog.as_mut() {
        // two fields: previous is next
        Some(SubmitDialog::Local(form)) => form.next_field(),
        Some(SubmitDialog::Server(form)) => form.previous_field(),
        None => {}
    }
    UpdateResult::none()
}

pub fn handle_move(state: &mut AppState, delta: isize) -> UpdateResult {
    if let Some(SubmitDialog::Server(form)) = state.submit_dialog.as_mut() {
        form.move_cursor(delta);
    }
    UpdateResult::none()
}

pub fn handle_select(state: &mut AppState) -> UpdateResult {
    if let Some(SubmitDialog::Server(form)) = state.submit_dialog.as_mut() {
        form.select_cursor();
    }
    UpdateResult::none()
}

/// Validate the open form and start the submission
///
/// Ignored while a submission is already in flight.
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let Some(dialog) = state.submit_dialog.as_mut() else {
        return UpdateResult::none();
    };
    if dialog.is_submitting() {
        return UpdateResult::none();
    }

    let action = match &*dialog {
        SubmitDialog::Local(form) => form.validate().map(|(gt_archive, output_archive)| {
            UpdateAction::SubmitLocal {
                gt_archive,
                output_archive,
            }
        }),
        SubmitDialog::Server(form) => form.validate().map(UpdateAction::SubmitServer),
    };

    match action {
        Ok(action) => {
            dialog.set_error(None);
            dialog.set_submitting(true);
            UpdateResult::action(action)
        }
        Err(e) => {
            warn!("Submission rejected: {e}");
            dialog.set_error(Some(e.to_string()));
            UpdateResult::none()
        }
    }
}

pub fn handle_folders_loaded(
    state: &mut AppState,
    kind: FolderKind,
    result: Result<Vec<String>, String>,
) -> UpdateResult {
    let Some(SubmitDialog::Server(form)) = state.submit_dialog.as_mut() else {
        return UpdateResult::none();
    };
    let list = form.folders_mut(kind);
    match result {
        Ok(folders) => list.set_items(folders),
        Err(e) => {
            error!("Error fetching {} folders: {e}", kind.label());
            list.set_error(e);
        }
    }
    UpdateResult::none()
}

/// Backend accepted (or rejected) a comparison
///
/// Success closes the dialog and reloads the run lists.
pub fn handle_submitted(
    state: &mut AppState,
    result: Result<ComparisonSubmitted, String>,
) -> UpdateResult {
    match result {
        Ok(response) => {
            let text = match (&response.run_id, &response.message) {
                (Some(run_id), _) => format!("Comparison completed. Run ID: {run_id}"),
                (None, Some(message)) => message.clone(),
                (None, None) => "Comparison completed".to_string(),
            };
            info!("{text}");
            handle_close(state);
            state.set_status(text);
            state.effects.remount();
        }
        Err(e) => {
            error!("Comparison failed: {e}");
            match state.submit_dialog.as_mut() {
                Some(dialog) => {
                    dialog.set_submitting(false);
                    dialog.set_error(Some(e));
                }
                None => state.set_error(e),
            }
        }
    }
    UpdateResult::none()
}
