//! Comparison submission forms
//!
//! Two flavours: upload two local archives, or compare two folders that are
//! already on the server. Both guard their submit on complete input and stay
//! locked while a submission is in flight.

use std::path::PathBuf;

use gtview_core::{Error, FolderKind, Result};

pub const DEFAULT_DESCRIPTION: &str = "Run from UI";

/// Open submission form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDialog {
    Local(LocalSubmitForm),
    Server(ServerSubmitForm),
}

impl SubmitDialog {
    pub fn is_submitting(&self) -> bool {
        match self {
            SubmitDialog::Local(form) => form.submitting,
            SubmitDialog::Server(form) => form.submitting,
        }
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        match self {
            SubmitDialog::Local(form) => form.submitting = submitting,
            SubmitDialog::Server(form) => form.submitting = submitting,
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        match self {
            SubmitDialog::Local(form) => form.error = error,
            SubmitDialog::Server(form) => form.error = error,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitDialog::Local(form) => form.error.as_deref(),
            SubmitDialog::Server(form) => form.error.as_deref(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Local upload
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalField {
    #[default]
    GtArchive,
    OutputArchive,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalSubmitForm {
    pub gt_archive: String,
    pub output_archive: String,
    pub focus: LocalField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LocalSubmitForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LocalField::GtArchive => &mut self.gt_archive,
            LocalField::OutputArchive => &mut self.output_archive,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.focused_mut().push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LocalField::GtArchive => LocalField::OutputArchive,
            LocalField::OutputArchive => LocalField::GtArchive,
        };
    }

    /// Both archive paths, or an input error
    pub fn validate(&self) -> Result<(PathBuf, PathBuf)> {
        let gt = self.gt_archive.trim();
        let output = self.output_archive.trim();
        if gt.is_empty() || output.is_empty() {
            return Err(Error::invalid_input(
                "Select both a GT archive and an output archive",
            ));
        }
        Ok((PathBuf::from(gt), PathBuf::from(output)))
    }
}

// ─────────────────────────────────────────────────────────────────
// Server folders
// ─────────────────────────────────────────────────────────────────

/// Pickable list of unprocessed folders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FolderList {
    pub items: Vec<String>,
    pub cursor: usize,
    pub selected: Option<usize>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FolderList {
    fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.cursor = 0;
        self.selected = None;
        self.loading = false;
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.items.clear();
        self.selected = None;
        self.loading = false;
        self.error = Some(error);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let max = self.items.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    pub fn select_cursor(&mut self) {
        if self.cursor < self.items.len() {
            self.selected = Some(self.cursor);
        }
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerField {
    #[default]
    GtFolder,
    OutputFolder,
    Description,
}

/// Validated server comparison request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSubmission {
    pub gt_folder: String,
    pub output_folder: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSubmitForm {
    pub gt_folders: FolderList,
    pub output_folders: FolderList,
    pub description: String,
    pub focus: ServerField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl Default for ServerSubmitForm {
    fn default() -> Self {
        Self {
            gt_folders: FolderList::loading(),
            output_folders: FolderList::loading(),
            description: DEFAULT_DESCRIPTION.to_string(),
            focus: ServerField::GtFolder,
            submitting: false,
            error: None,
        }
    }
}

impl ServerSubmitForm {
    pub fn folders_mut(&mut self, kind: FolderKind) -> &mut FolderList {
        match kind {
            FolderKind::Gt => &mut self.gt_folders,
            FolderKind::Output => &mut self.output_folders,
        }
    }

    fn focused_list(&mut self) -> Option<&mut FolderList> {
        match self.focus {
            ServerField::GtFolder => Some(&mut self.gt_folders),
            ServerField::OutputFolder => Some(&mut self.output_folders),
            ServerField::Description => None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ServerField::GtFolder => ServerField::OutputFolder,
            ServerField::OutputFolder => ServerField::Description,
            ServerField::Description => ServerField::GtFolder,
        };
    }

    pub fn previous_field(&mut self) {
        self.focus = match self.focus {
            ServerField::GtFolder => ServerField::Description,
            ServerField::OutputFolder => ServerField::GtFolder,
            ServerField::Description => ServerField::OutputFolder,
        };
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(list) = self.focused_list() {
            list.move_cursor(delta);
        }
    }

    /// Space on a folder list picks the highlighted folder
    pub fn select_cursor(&mut self) {
        if let Some(list) = self.focused_list() {
            list.select_cursor();
            self.error = None;
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.focus == ServerField::Description {
            self.description.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == ServerField::Description {
            self.description.pop();
        }
    }

    pub fn validate(&self) -> Result<ServerSubmission> {
        match (
            self.gt_folders.selected_item(),
            self.output_folders.selected_item(),
        ) {
            (Some(gt), Some(output)) => Ok(ServerSubmission {
                gt_folder: gt.to_string(),
                output_folder: output.to_string(),
                description: self.description.trim().to_string(),
            }),
            _ => Err(Error::invalid_input(
                "Select both a GT folder and an output folder",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_form_requires_both_paths() {
        let mut form = LocalSubmitForm::default();
        for c in "gt.zip".chars() {
            form.input_char(c);
        }
        assert!(matches!(form.validate(), Err(Error::InvalidInput { .. })));

        form.next_field();
        for c in "out.zip".chars() {
            form.input_char(c);
        }
        let (gt, out) = form.validate().unwrap();
        assert_eq!(gt, PathBuf::from("gt.zip"));
        assert_eq!(out, PathBuf::from("out.zip"));
    }

    #[test]
    fn test_local_form_backspace_edits_focused_field() {
        let mut form = LocalSubmitForm {
            gt_archive: "ab".into(),
            output_archive: "cd".into(),
            focus: LocalField::OutputArchive,
            ..Default::default()
        };
        form.backspace();
        assert_eq!(form.gt_archive, "ab");
        assert_eq!(form.output_archive, "c");
    }

    #[test]
    fn test_server_form_defaults() {
        let form = ServerSubmitForm::default();
        assert_eq!(form.description, "Run from UI");
        assert!(form.gt_folders.loading);
        assert!(form.output_folders.loading);
    }

    #[test]
    fn test_server_form_requires_both_folders() {
        let mut form = ServerSubmitForm::default();
        form.folders_mut(FolderKind::Gt)
            .set_items(vec!["gt_a".into(), "gt_b".into()]);
        form.folders_mut(FolderKind::Output)
            .set_items(vec!["out_a".into()]);

        form.move_cursor(1);
        form.select_cursor();
        assert!(form.validate().is_err());

        form.next_field();
        form.select_cursor();
        let submission = form.validate().unwrap();
        assert_eq!(submission.gt_folder, "gt_b");
        assert_eq!(submission.output_folder, "out_a");
        assert_eq!(submission.description, "Run from UI");
    }

    #[test]
    fn test_description_only_edited_when_focused() {
        let mut form = ServerSubmitForm::default();
        form.input_char('x');
        assert_eq!(form.description, "Run from UI");

        form.previous_field();
        assert_eq!(form.focus, ServerField::Description);
        form.backspace();
        form.input_char('!');
        assert_eq!(form.description, "Run from U!");
    }

    #[test]
    fn test_folder_error_clears_items() {
        let mut list = FolderList::default();
        list.set_items(vec!["a".into()]);
        list.select_cursor();
        list.set_error("boom".into());
        assert!(list.items.is_empty());
        assert!(list.selected_item().is_none());
        assert!(!list.loading);
    }
}
