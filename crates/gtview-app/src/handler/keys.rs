//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};
use crate::submit_dialog::{ServerField, SubmitDialog};
use crate::view::{DisplayFlag, View};
use crate::viewer::Pane;

/// Rows moved by PageUp/PageDown in tables
const PAGE_ROWS: isize = 10;

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::ConfirmDialog => handle_key_confirm_dialog(key),
        UiMode::Alert => handle_key_alert(key),
        UiMode::SubmitDialog => handle_key_submit_dialog(state, key),
        UiMode::Normal if state.effective_view() == View::ThreeWay => {
            handle_key_viewer(key)
        }
        UiMode::Normal => handle_key_normal(state, key),
    }
}

fn handle_key_confirm_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Left | InputKey::BackTab | InputKey::Char('h') => {
            Some(Message::ConfirmDialogPrevious)
        }
        InputKey::Right | InputKey::Tab | InputKey::Char('l') => Some(Message::ConfirmDialogNext),
        InputKey::Enter => Some(Message::ConfirmDialogSelect),
        InputKey::Char('y' | 'Y') => Some(Message::ConfirmDialogAccept),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::ConfirmDialogDismiss),
        // Force quit with Ctrl+C even in dialog
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Any key dismisses the alert
fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => Some(Message::DismissAlert),
    }
}

fn handle_key_submit_dialog(state: &AppState, key: InputKey) -> Option<Message> {
    // space picks a folder on the server form's folder lists
    let on_folder_list = matches!(
        &state.submit_dialog,
        Some(SubmitDialog::Server(form)) if form.focus != ServerField::Description
    );
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Esc => Some(Message::CloseSubmitDialog),
        InputKey::Enter => Some(Message::SubmitDialogSubmit),
        InputKey::Tab => Some(Message::SubmitDialogNextField),
        InputKey::BackTab => Some(Message::SubmitDialogPreviousField),
        InputKey::Up => Some(Message::SubmitDialogMove(-1)),
        InputKey::Down => Some(Message::SubmitDialogMove(1)),
        InputKey::Backspace => Some(Message::SubmitDialogBackspace),
        InputKey::Char(' ') if on_folder_list => Some(Message::SubmitDialogSelect),
        InputKey::Char('k') if on_folder_list => Some(Message::SubmitDialogMove(-1)),
        InputKey::Char('j') if on_folder_list => Some(Message::SubmitDialogMove(1)),
        InputKey::Char(c) => Some(Message::SubmitDialogInput(c)),
        _ => None,
    }
}

fn handle_key_viewer(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('q') => Some(Message::RequestQuit),
        InputKey::Esc => Some(Message::RequestCloseFile),

        // Cell cursor
        InputKey::Up | InputKey::Char('k') => Some(Message::MoveCell { rows: -1, fields: 0 }),
        InputKey::Down | InputKey::Char('j') => Some(Message::MoveCell { rows: 1, fields: 0 }),
        InputKey::Left => Some(Message::MoveCell { rows: 0, fields: -1 }),
        InputKey::Right => Some(Message::MoveCell { rows: 0, fields: 1 }),
        InputKey::Char(' ') | InputKey::Enter => Some(Message::ToggleFocusedMatch),

        // Pages
        InputKey::Char('[') | InputKey::PageUp => Some(Message::RequestPageStep(-1)),
        InputKey::Char(']') | InputKey::PageDown => Some(Message::RequestPageStep(1)),

        // Panes
        InputKey::Char('t') => Some(Message::TogglePane(Pane::Table)),
        InputKey::Char('h') => Some(Message::TogglePane(Pane::Html)),
        InputKey::Char('p') => Some(Message::TogglePane(Pane::Pdf)),

        InputKey::Char('s') => Some(Message::SaveViewer),
        InputKey::Char('e') => Some(Message::ExportPdf),
        InputKey::Char('c') => Some(Message::CycleColumns),
        _ => None,
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('q') => Some(Message::RequestQuit),
        InputKey::Esc => match state.effective_view() {
            View::RunDetails => Some(Message::CloseDetail),
            _ => None,
        },

        // Table navigation
        InputKey::Up | InputKey::Char('k') => Some(Message::MoveCursor(-1)),
        InputKey::Down | InputKey::Char('j') => Some(Message::MoveCursor(1)),
        InputKey::PageUp => Some(Message::MoveCursor(-PAGE_ROWS)),
        InputKey::PageDown => Some(Message::MoveCursor(PAGE_ROWS)),
        InputKey::Home | InputKey::Char('g') => Some(Message::MoveCursor(isize::MIN)),
        InputKey::End | InputKey::Char('G') => Some(Message::MoveCursor(isize::MAX)),
        InputKey::Enter => Some(Message::ActivateRow),
        InputKey::Char(' ') => Some(Message::SelectRow),

        // Display flags
        InputKey::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Some(Message::ToggleFlag(DisplayFlag::ALL[index]))
        }
        InputKey::Char('c') => Some(Message::CycleColumns),

        InputKey::Char('r') => Some(Message::Reload),
        InputKey::Char('n') => Some(Message::OpenLocalSubmit),
        InputKey::Char('N') => Some(Message::OpenServerSubmit),
        InputKey::Char('d') => deletable_run(state).map(Message::RequestDeleteRun),
        _ => None,
    }
}

/// Run the `d` key would delete: the highlighted run on the all-runs table,
/// or the open content detail's run
fn deletable_run(state: &AppState) -> Option<String> {
    match state.effective_view() {
        View::FinalSummary => state.highlighted_run().map(|run| run.id.clone()),
        View::RunDetails => state.view.detail_run_id().map(str::to_string),
        _ => None,
    }
}
