//! View-state store
//!
//! One record holds every display flag and selection id. The view on
//! screen is never stored: [`ViewState::effective_view`] derives it from the
//! record in a fixed priority order, so clearing an id can never leave a
//! stale view behind.

use gtview_core::DetailKind;

/// The top-level view on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Three-way viewer for one (run, file, page)
    ThreeWay,
    /// File-by-file listing of a content or indentation run
    RunDetails,
    /// All indentation runs
    IndentationSummary,
    /// Per-file results of the selected run
    RunSummary,
    /// Paragraph diff of the selected file
    FileDiff,
    /// All content runs
    FinalSummary,
    /// Nothing selected
    Welcome,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::ThreeWay => "File Viewer",
            View::RunDetails => "Run Details",
            View::IndentationSummary => "Indentation Summary",
            View::RunSummary => "Run Summary",
            View::FileDiff => "File Diff",
            View::FinalSummary => "All Runs",
            View::Welcome => "Welcome",
        }
    }
}

/// Which optional metric columns the tables show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnToggle {
    #[default]
    All,
    Superscript,
    FontInfo,
}

impl ColumnToggle {
    pub fn cycle(self) -> Self {
        match self {
            ColumnToggle::All => ColumnToggle::Superscript,
            ColumnToggle::Superscript => ColumnToggle::FontInfo,
            ColumnToggle::FontInfo => ColumnToggle::All,
        }
    }

    pub fn shows_superscript(&self) -> bool {
        matches!(self, ColumnToggle::All | ColumnToggle::Superscript)
    }

    pub fn shows_font_info(&self) -> bool {
        matches!(self, ColumnToggle::All | ColumnToggle::FontInfo)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColumnToggle::All => "all",
            ColumnToggle::Superscript => "superscript",
            ColumnToggle::FontInfo => "font_info",
        }
    }
}

/// The four operator-controlled display checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFlag {
    FinalSummary,
    IndentationResult,
    RunSummary,
    FileDiff,
}

impl DisplayFlag {
    pub const ALL: [DisplayFlag; 4] = [
        DisplayFlag::FinalSummary,
        DisplayFlag::IndentationResult,
        DisplayFlag::RunSummary,
        DisplayFlag::FileDiff,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DisplayFlag::FinalSummary => "Final Summary",
            DisplayFlag::IndentationResult => "Indentation Result",
            DisplayFlag::RunSummary => "Run Summary",
            DisplayFlag::FileDiff => "File Diff",
        }
    }
}

/// Identity of a three-way view request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub run_id: String,
    pub file_name: String,
    pub page: u32,
    pub kind: DetailKind,
}

/// Operator selection for the file diff view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSelection {
    pub run_id: String,
    pub file_name: String,
    pub suffix: String,
}

/// Process-wide view state
///
/// Fields are private to the crate; all mutation goes through the methods
/// below so the page-reset and fall-back rules hold everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub(crate) column_toggle: ColumnToggle,
    pub(crate) selected_run_id: Option<String>,
    pub(crate) selected_file_name: Option<String>,
    pub(crate) selected_file_suffix: Option<String>,
    pub(crate) show_final_summary: bool,
    pub(crate) show_indentation_result: bool,
    pub(crate) show_run_summary: bool,
    pub(crate) show_file_diff: bool,
    pub(crate) detail_run_id: Option<String>,
    pub(crate) indentation_detail_run_id: Option<String>,
    pub(crate) file_detail_run_id: Option<String>,
    pub(crate) file_detail_file_name: Option<String>,
    pub(crate) file_detail_page: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            column_toggle: ColumnToggle::All,
            selected_run_id: None,
            selected_file_name: None,
            selected_file_suffix: None,
            show_final_summary: true,
            show_indentation_result: false,
            show_run_summary: false,
            show_file_diff: false,
            detail_run_id: None,
            indentation_detail_run_id: None,
            file_detail_run_id: None,
            file_detail_file_name: None,
            file_detail_page: 1,
        }
    }
}

impl ViewState {
    pub fn new(show_final_summary: bool, show_indentation_result: bool) -> Self {
        Self {
            show_final_summary,
            show_indentation_result,
            ..Default::default()
        }
    }

    /// Derive the view on screen; first matching rule wins
    pub fn effective_view(&self) -> View {
        if self.file_detail_file_name.is_some() && self.file_detail_run_id.is_some() {
            View::ThreeWay
        } else if self.detail_run_id.is_some() || self.indentation_detail_run_id.is_some() {
            View::RunDetails
        } else if self.show_indentation_result {
            View::IndentationSummary
        } else if self.show_run_summary && self.selected_run_id.is_some() {
            View::RunSummary
        } else if self.show_file_diff && self.file_selection().is_some() {
            View::FileDiff
        } else if self.show_final_summary {
            View::FinalSummary
        } else {
            View::Welcome
        }
    }

    // ─────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────

    pub fn column_toggle(&self) -> ColumnToggle {
        self.column_toggle
    }

    pub fn flag(&self, flag: DisplayFlag) -> bool {
        match flag {
            DisplayFlag::FinalSummary => self.show_final_summary,
            DisplayFlag::IndentationResult => self.show_indentation_result,
            DisplayFlag::RunSummary => self.show_run_summary,
            DisplayFlag::FileDiff => self.show_file_diff,
        }
    }

    pub fn selected_run_id(&self) -> Option<&str> {
        self.selected_run_id.as_deref()
    }

    pub fn detail_run_id(&self) -> Option<&str> {
        self.detail_run_id.as_deref()
    }

    pub fn indentation_detail_run_id(&self) -> Option<&str> {
        self.indentation_detail_run_id.as_deref()
    }

    /// The open detail listing, content taking precedence
    pub fn active_detail(&self) -> Option<(&str, DetailKind)> {
        if let Some(id) = self.detail_run_id.as_deref() {
            Some((id, DetailKind::Content))
        } else {
            self.indentation_detail_run_id
                .as_deref()
                .map(|id| (id, DetailKind::Indentation))
        }
    }

    pub fn file_detail_page(&self) -> u32 {
        self.file_detail_page
    }

    /// Complete three-way request key, if a file is open
    ///
    /// The indentation variant is used while an indentation detail is open.
    pub fn file_key(&self) -> Option<FileKey> {
        let run_id = self.file_detail_run_id.clone()?;
        let file_name = self.file_detail_file_name.clone()?;
        let kind = if self.indentation_detail_run_id.is_some() {
            DetailKind::Indentation
        } else {
            DetailKind::Content
        };
        Some(FileKey {
            run_id,
            file_name,
            page: self.file_detail_page,
            kind,
        })
    }

    pub fn file_selection(&self) -> Option<FileSelection> {
        Some(FileSelection {
            run_id: self.selected_run_id.clone()?,
            file_name: self.selected_file_name.clone()?,
            suffix: self.selected_file_suffix.clone()?,
        })
    }

    // ─────────────────────────────────────────────────────────
    // Display flags
    // ─────────────────────────────────────────────────────────

    pub fn set_flag(&mut self, flag: DisplayFlag, value: bool) {
        match flag {
            DisplayFlag::FinalSummary => self.show_final_summary = value,
            DisplayFlag::IndentationResult => self.show_indentation_result = value,
            DisplayFlag::RunSummary => self.show_run_summary = value,
            DisplayFlag::FileDiff => self.show_file_diff = value,
        }
    }

    pub fn toggle_flag(&mut self, flag: DisplayFlag) {
        let current = self.flag(flag);
        self.set_flag(flag, !current);
    }

    pub fn cycle_columns(&mut self) {
        self.column_toggle = self.column_toggle.cycle();
    }

    // ─────────────────────────────────────────────────────────
    // Selections
    // ─────────────────────────────────────────────────────────

    /// Select a run for the run summary; a different run drops the file selection
    pub fn select_run(&mut self, run_id: Option<String>) {
        if self.selected_run_id != run_id {
            self.selected_file_name = None;
            self.selected_file_suffix = None;
        }
        self.selected_run_id = run_id;
    }

    pub fn select_file(&mut self, run_id: String, file_name: String, suffix: String) {
        self.selected_run_id = Some(run_id);
        self.selected_file_name = Some(file_name);
        self.selected_file_suffix = Some(suffix);
    }

    pub fn clear_file_selection(&mut self) {
        self.selected_file_name = None;
        self.selected_file_suffix = None;
    }

    // ─────────────────────────────────────────────────────────
    // Detail drill-down
    // ─────────────────────────────────────────────────────────

    pub fn open_run_detail(&mut self, run_id: String) {
        self.indentation_detail_run_id = None;
        self.detail_run_id = Some(run_id);
    }

    pub fn open_indentation_detail(&mut self, run_id: String) {
        self.detail_run_id = None;
        self.indentation_detail_run_id = Some(run_id);
    }

    /// Leave the detail listing for the summary it was opened from
    pub fn close_detail(&mut self) {
        if self.detail_run_id.take().is_some() {
            self.fall_back_to_final_summary();
        }
        if self.indentation_detail_run_id.take().is_some() {
            self.fall_back_to_indentation_summary();
        }
    }

    /// Show the all-runs summary, dropping the flags that outrank it
    pub fn fall_back_to_final_summary(&mut self) {
        self.show_final_summary = true;
        self.show_indentation_result = false;
        self.show_run_summary = false;
        self.show_file_diff = false;
    }

    pub fn fall_back_to_indentation_summary(&mut self) {
        self.show_indentation_result = true;
    }

    // ─────────────────────────────────────────────────────────
    // File detail (three-way viewer)
    // ─────────────────────────────────────────────────────────

    pub fn open_file(&mut self, run_id: String, file_name: String, page: u32) {
        self.file_detail_run_id = Some(run_id);
        self.file_detail_file_name = Some(file_name);
        self.file_detail_page = page.max(1);
    }

    pub fn set_file_page(&mut self, page: u32) {
        self.file_detail_page = page.max(1);
    }

    pub fn set_file_detail_run_id(&mut self, run_id: Option<String>) {
        if run_id.is_none() {
            self.file_detail_page = 1;
        }
        self.file_detail_run_id = run_id;
    }

    pub fn set_file_detail_file_name(&mut self, file_name: Option<String>) {
        if file_name.is_none() {
            self.file_detail_page = 1;
        }
        self.file_detail_file_name = file_name;
    }

    /// Close the viewer: both file fields cleared, page back to 1
    pub fn close_file(&mut self) {
        self.file_detail_run_id = None;
        self.file_detail_file_name = None;
        self.file_detail_page = 1;
    }

    // ─────────────────────────────────────────────────────────
    // Deletion
    // ─────────────────────────────────────────────────────────

    /// Drop every reference to a deleted run
    ///
    /// Returns true if something referencing the run was cleared. When the
    /// run was selected or shown in a detail listing or the viewer, the view
    /// falls back to the all-runs summary.
    pub fn forget_run(&mut self, run_id: &str) -> bool {
        let mut was_open = false;

        if self.selected_run_id.as_deref() == Some(run_id) {
            self.selected_run_id = None;
            self.clear_file_selection();
            was_open = true;
        }
        if self.detail_run_id.as_deref() == Some(run_id) {
            self.detail_run_id = None;
            was_open = true;
        }
        if self.indentation_detail_run_id.as_deref() == Some(run_id) {
            self.indentation_detail_run_id = None;
            was_open = true;
        }
        if self.file_detail_run_id.as_deref() == Some(run_id) {
            self.close_file();
            was_open = true;
        }

        if was_open {
            self.fall_back_to_final_summary();
        }
        was_open
    }
}
