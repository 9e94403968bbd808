//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use gtview_core::{
    ComparisonSubmitted, DetailKind, FileDetailRow, FileDiffRow, FileResult, FolderKind,
    IndentationRun, MatchField, Run, ThreeWayViewPayload,
};

use crate::effects::Ticket;
use crate::input_key::InputKey;
use crate::view::{DisplayFlag, FileKey, FileSelection};
use crate::viewer::Pane;

/// All possible messages/actions in the application
///
/// Fetch results carry errors as display strings so messages stay `Clone`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Request to quit (asks first if the viewer has unsaved edits)
    RequestQuit,

    /// Force quit without confirmation (Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // View-State Intents
    // ─────────────────────────────────────────────────────────
    /// Flip one of the sidebar display checkboxes
    ToggleFlag(DisplayFlag),
    /// Cycle all → superscript → font_info
    CycleColumns,
    /// Move the highlighted row of the current table
    MoveCursor(isize),
    /// Enter on the highlighted row
    ActivateRow,
    /// Space on the highlighted row
    SelectRow,
    /// Select a run for the run summary view
    SelectRun(String),
    /// Select a file for the file diff view
    SelectFile(FileSelection),
    OpenRunDetail(String),
    OpenIndentationDetail(String),
    /// Back from the detail listing
    CloseDetail,
    /// Open the three-way viewer
    OpenFile {
        run_id: String,
        file_name: String,
        page: u32,
    },
    /// Esc in the viewer (asks first if dirty)
    RequestCloseFile,
    CloseFile,
    /// Re-run the list fetch
    Reload,

    // ─────────────────────────────────────────────────────────
    // Viewer Messages
    // ─────────────────────────────────────────────────────────
    ToggleMatch {
        row: usize,
        field: MatchField,
    },
    /// Toggle the match flag under the cursor
    ToggleFocusedMatch,
    MoveCell {
        rows: isize,
        fields: isize,
    },
    TogglePane(Pane),
    /// Ask for a relative page move
    RequestPageStep(i64),
    /// Navigate, discarding any unsaved edits
    ConfirmPageChange(u32),
    SaveViewer,
    SaveFinished {
        key: FileKey,
        result: Result<PathBuf, String>,
    },
    ExportPdf,
    PdfExported(Result<PathBuf, String>),

    // ─────────────────────────────────────────────────────────
    // Fetch Results
    // ─────────────────────────────────────────────────────────
    RunListsLoaded {
        ticket: Ticket,
        runs: Result<Vec<Run>, String>,
        indentation_runs: Result<Vec<IndentationRun>, String>,
    },
    RunDetailLoaded {
        ticket: Ticket,
        run_id: String,
        kind: DetailKind,
        result: Result<Vec<FileDetailRow>, String>,
    },
    ThreeWayLoaded {
        ticket: Ticket,
        key: FileKey,
        result: Result<ThreeWayViewPayload, String>,
    },
    RunResultsLoaded {
        ticket: Ticket,
        run_id: String,
        result: Result<Vec<FileResult>, String>,
    },
    FileDiffLoaded {
        ticket: Ticket,
        selection: FileSelection,
        result: Result<Vec<FileDiffRow>, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Run Deletion
    // ─────────────────────────────────────────────────────────
    /// `d` on a run: opens the confirm dialog
    RequestDeleteRun(String),
    /// Confirmed: issue the backend delete
    DeleteRun(String),
    RunDeleted {
        run_id: String,
        result: Result<(), String>,
    },

    // ─────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────
    ConfirmDialogNext,
    ConfirmDialogPrevious,
    /// Pick the highlighted option
    ConfirmDialogSelect,
    /// Pick the affirmative option directly (`y`)
    ConfirmDialogAccept,
    ConfirmDialogDismiss,
    DismissAlert,

    // ─────────────────────────────────────────────────────────
    // Comparison Submission
    // ─────────────────────────────────────────────────────────
    OpenLocalSubmit,
    OpenServerSubmit,
    CloseSubmitDialog,
    SubmitDialogInput(char),
    SubmitDialogBackspace,
    SubmitDialogNextField,
    SubmitDialogPreviousField,
    SubmitDialogMove(isize),
    SubmitDialogSelect,
    SubmitDialogSubmit,
    FoldersLoaded {
        kind: FolderKind,
        result: Result<Vec<String>, String>,
    },
    ComparisonSubmitted(Result<ComparisonSubmitted, String>),
}
