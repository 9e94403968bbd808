//! Confirm dialog state.
//!
//! Data model for confirmation dialogs. The rendering widget
//! lives in gtview-tui's widgets/confirm_dialog.rs.

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// Button label and the message it sends; the last option cancels
    pub options: Vec<(String, Message)>,
    pub selected: usize,
}

impl ConfirmDialogState {
    /// Create a generic confirmation dialog
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
            selected: 0,
        }
    }

    /// Ask before dropping unsaved viewer edits
    pub fn discard_changes(on_discard: Message) -> Self {
        Self::new(
            "Unsaved Changes",
            "You have unsaved changes. Do you want to discard them and proceed?",
            vec![
                ("Discard", on_discard),
                ("Cancel", Message::ConfirmDialogDismiss),
            ],
        )
    }

    /// Ask before deleting a run on the backend
    pub fn delete_run(run_id: &str) -> Self {
        Self::new(
            "Delete Run?",
            format!("Run {run_id} and all of its results will be removed."),
            vec![
                ("Delete", Message::DeleteRun(run_id.to_string())),
                ("Cancel", Message::ConfirmDialogDismiss),
            ],
        )
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    /// Message of the highlighted option
    pub fn chosen(&self) -> Option<Message> {
        self.options.get(self.selected).map(|(_, msg)| msg.clone())
    }

    /// Message of the first (affirmative) option
    pub fn affirmative(&self) -> Option<Message> {
        self.options.first().map(|(_, msg)| msg.clone())
    }
}
