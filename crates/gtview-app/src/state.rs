//! Application state (Model in TEA pattern)

use gtview_core::{DetailKind, FileDetailRow, FileDiffRow, FileResult, IndentationRun, Run};

use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::effects::{Effects, FetchRule};
use crate::message::Message;
use crate::submit_dialog::SubmitDialog;
use crate::view::{View, ViewState};
use crate::viewer::ThreeWayViewer;

/// Current UI mode (which overlay receives keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Main content receives keys
    #[default]
    Normal,

    /// Confirmation dialog (discard edits, delete run, quit)
    ConfirmDialog,

    /// Blocking notification; any key dismisses
    Alert,

    /// Comparison submission form
    SubmitDialog,
}

/// Cached detail rows and the run they belong to
#[derive(Debug, Clone, PartialEq)]
pub struct RunDetails {
    pub run_id: String,
    pub kind: DetailKind,
    pub rows: Vec<FileDetailRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line status shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Highlighted row per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursors {
    pub runs: usize,
    pub indentation_runs: usize,
    pub details: usize,
    pub run_results: usize,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,

    /// Display flags and selections; the view on screen derives from it
    pub view: ViewState,

    /// Fetch rule bookkeeping
    pub effects: Effects,

    pub ui_mode: UiMode,

    // ─────────────────────────────────────────────────────────
    // Fetched data (replaced wholesale per fetch)
    // ─────────────────────────────────────────────────────────
    pub runs: Vec<Run>,
    pub indentation_runs: Vec<IndentationRun>,
    pub details: Option<RunDetails>,
    pub run_results: Vec<FileResult>,
    pub file_diff: Vec<FileDiffRow>,
    pub viewer: Option<ThreeWayViewer>,

    pub cursors: Cursors,
    pub status: Option<StatusMessage>,
    pub alert: Option<String>,
    pub confirm_dialog_state: Option<ConfirmDialogState>,
    pub submit_dialog: Option<SubmitDialog>,

    /// Run whose deletion is in flight
    pub pending_delete: Option<String>,

    quitting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        let view = ViewState::new(
            settings.ui.show_final_summary,
            settings.ui.show_indentation_result,
        );
        Self {
            settings,
            view,
            effects: Effects::new(),
            ui_mode: UiMode::Normal,
            runs: Vec::new(),
            indentation_runs: Vec::new(),
            details: None,
            run_results: Vec::new(),
            file_diff: Vec::new(),
            viewer: None,
            cursors: Cursors::default(),
            status: None,
            alert: None,
            confirm_dialog_state: None,
            submit_dialog: None,
            pending_delete: None,
            quitting: false,
        }
    }

    pub fn effective_view(&self) -> View {
        self.view.effective_view()
    }

    // ─────────────────────────────────────────────────────────
    // Quit
    // ─────────────────────────────────────────────────────────

    /// Quit, asking first when the viewer holds unsaved edits
    pub fn request_quit(&mut self) {
        if self.has_unsaved_edits() && self.settings.ui.confirm_discard {
            self.show_confirm(ConfirmDialogState::discard_changes(Message::Quit));
        } else {
            self.quitting = true;
        }
    }

    pub fn force_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    // ─────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────

    pub fn show_confirm(&mut self, dialog: ConfirmDialogState) {
        self.confirm_dialog_state = Some(dialog);
        self.ui_mode = UiMode::ConfirmDialog;
    }

    pub fn close_confirm(&mut self) -> Option<ConfirmDialogState> {
        self.ui_mode = self.base_mode();
        self.confirm_dialog_state.take()
    }

    pub fn show_alert(&mut self, text: impl Into<String>) {
        self.alert = Some(text.into());
        self.ui_mode = UiMode::Alert;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.ui_mode = self.base_mode();
    }

    /// Mode to return to when an overlay on top closes
    fn base_mode(&self) -> UiMode {
        if self.submit_dialog.is_some() {
            UiMode::SubmitDialog
        } else {
            UiMode::Normal
        }
    }

    // ─────────────────────────────────────────────────────────
    // Status
    // ─────────────────────────────────────────────────────────

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Info,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Error,
        });
    }

    // ─────────────────────────────────────────────────────────
    // Derived data
    // ─────────────────────────────────────────────────────────

    pub fn has_unsaved_edits(&self) -> bool {
        self.viewer.as_ref().is_some_and(ThreeWayViewer::is_dirty)
    }

    pub fn is_loading(&self, rule: FetchRule) -> bool {
        self.effects.in_flight(rule)
    }

    pub fn any_loading(&self) -> bool {
        [
            FetchRule::RunLists,
            FetchRule::RunDetail,
            FetchRule::IndentationDetail,
            FetchRule::ThreeWay,
            FetchRule::RunResults,
            FetchRule::FileDiff,
        ]
        .into_iter()
        .any(|rule| self.is_loading(rule))
    }

    /// Detail rows for the open listing; rows cached for another run are hidden
    pub fn active_details(&self) -> Option<&RunDetails> {
        let (run_id, kind) = self.view.active_detail()?;
        self.details
            .as_ref()
            .filter(|d| d.run_id == run_id && d.kind == kind)
    }

    pub fn highlighted_run(&self) -> Option<&Run> {
        self.runs.get(self.cursors.runs)
    }

    pub fn highlighted_indentation_run(&self) -> Option<&IndentationRun> {
        self.indentation_runs.get(self.cursors.indentation_runs)
    }

    pub fn highlighted_detail(&self) -> Option<&FileDetailRow> {
        self.active_details()?.rows.get(self.cursors.details)
    }

    /// Keep cursors inside their tables after data changes
    pub fn clamp_cursors(&mut self) {
        fn clamp(cursor: &mut usize, len: usize) {
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
        clamp(&mut self.cursors.runs, self.runs.len());
        clamp(&mut self.cursors.indentation_runs, self.indentation_runs.len());
        let details = self.details.as_ref().map_or(0, |d| d.rows.len());
        clamp(&mut self.cursors.details, details);
        clamp(&mut self.cursors.run_results, self.run_results.len());
    }
}
