//! Three-way file viewer state
//!
//! Holds an editable copy of the fetched comparison rows. Edits only touch
//! the copy and set the dirty flag; the fetched payload stays as received.
//! A new payload always replaces the copy and clears the flag.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gtview_core::{ComparisonRow, MatchField, SavePayload, ThreeWayViewPayload};
use scraper::Html;

use crate::config::ViewerSettings;
use crate::view::FileKey;

/// One of the viewer's three panes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Table,
    Html,
    Pdf,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Table, Pane::Html, Pane::Pdf];

    pub fn title(&self) -> &'static str {
        match self {
            Pane::Table => "JSON GT Comparison",
            Pane::Html => "HTML View",
            Pane::Pdf => "PDF View",
        }
    }
}

/// Independent visibility of the three panes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneVisibility {
    pub table: bool,
    pub html: bool,
    pub pdf: bool,
}

impl Default for PaneVisibility {
    fn default() -> Self {
        Self {
            table: true,
            html: true,
            pdf: true,
        }
    }
}

impl From<&ViewerSettings> for PaneVisibility {
    fn from(settings: &ViewerSettings) -> Self {
        Self {
            table: settings.show_table,
            html: settings.show_html,
            pdf: settings.show_pdf,
        }
    }
}

impl PaneVisibility {
    pub fn is_visible(&self, pane: Pane) -> bool {
        match pane {
            Pane::Table => self.table,
            Pane::Html => self.html,
            Pane::Pdf => self.pdf,
        }
    }

    pub fn toggle(&mut self, pane: Pane) {
        match pane {
            Pane::Table => self.table = !self.table,
            Pane::Html => self.html = !self.html,
            Pane::Pdf => self.pdf = !self.pdf,
        }
    }

    /// Visible panes in display order
    pub fn visible(&self) -> Vec<Pane> {
        Pane::ALL
            .into_iter()
            .filter(|p| self.is_visible(*p))
            .collect()
    }
}

/// Outcome of asking to move to another page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// Outside `1..=total_pages`; ignored
    OutOfRange,
    /// Already on that page
    Unchanged,
    /// Unsaved edits: the operator must confirm discarding them first
    NeedsConfirm(u32),
    /// Navigate now
    Go(u32),
}

/// Decoded PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfPage {
    Missing,
    Decoded(Vec<u8>),
    Invalid(String),
}

impl PdfPage {
    fn decode(encoded: Option<&str>) -> Self {
        let Some(encoded) = encoded.map(str::trim).filter(|s| !s.is_empty()) else {
            return PdfPage::Missing;
        };
        // tolerate a data URL prefix
        let data = encoded
            .split_once("base64,")
            .map(|(_, rest)| rest)
            .unwrap_or(encoded);
        match STANDARD.decode(data) {
            Ok(bytes) => PdfPage::Decoded(bytes),
            Err(e) => PdfPage::Invalid(e.to_string()),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            PdfPage::Decoded(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// PDF version from the `%PDF-x.y` header, if present
    pub fn version(&self) -> Option<String> {
        let bytes = self.bytes()?;
        let header = bytes.get(..8)?;
        let text = std::str::from_utf8(header).ok()?;
        text.strip_prefix("%PDF-").map(str::to_string)
    }
}

/// Visible text of the rendered HTML, one text run per line
pub fn html_to_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Viewer state for one (run, file, page) visit
#[derive(Debug, Clone)]
pub struct ThreeWayViewer {
    key: FileKey,
    payload: ThreeWayViewPayload,
    rows: Vec<ComparisonRow>,
    dirty: bool,
    panes: PaneVisibility,
    cursor_row: usize,
    cursor_field: usize,
    html_text: String,
    pdf: PdfPage,
}

impl ThreeWayViewer {
    pub fn new(key: FileKey, payload: ThreeWayViewPayload, panes: PaneVisibility) -> Self {
        let mut viewer = Self {
            key: key.clone(),
            payload: ThreeWayViewPayload::default(),
            rows: Vec::new(),
            dirty: false,
            panes,
            cursor_row: 0,
            cursor_field: 0,
            html_text: String::new(),
            pdf: PdfPage::Missing,
        };
        viewer.replace_payload(key, payload);
        viewer
    }

    /// Take a freshly fetched payload; local edits are discarded
    pub fn replace_payload(&mut self, key: FileKey, payload: ThreeWayViewPayload) {
        self.rows = payload.comparison_data.clone();
        self.html_text = payload
            .html_view_content
            .as_deref()
            .map(html_to_text)
            .unwrap_or_default();
        self.pdf = PdfPage::decode(payload.pdf_view_base64.as_deref());
        self.payload = payload;
        self.key = key;
        self.dirty = false;
        self.cursor_row = self.cursor_row.min(self.rows.len().saturating_sub(1));
    }

    // ─────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────

    pub fn key(&self) -> &FileKey {
        &self.key
    }

    pub fn payload(&self) -> &ThreeWayViewPayload {
        &self.payload
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn panes(&self) -> PaneVisibility {
        self.panes
    }

    pub fn html_text(&self) -> &str {
        &self.html_text
    }

    pub fn pdf(&self) -> &PdfPage {
        &self.pdf
    }

    pub fn current_page(&self) -> u32 {
        self.payload.pagination.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.payload.pagination.total_pages
    }

    /// Name shown in the header; the backend's file name when it sent one
    pub fn file_name(&self) -> &str {
        if self.payload.file_name.is_empty() {
            &self.key.file_name
        } else {
            &self.payload.file_name
        }
    }

    pub fn cursor(&self) -> (usize, MatchField) {
        (self.cursor_row, MatchField::ALL[self.cursor_field])
    }

    // ─────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────

    /// Flip one row's match flag in the local copy
    ///
    /// Returns false if the row doesn't exist.
    pub fn toggle_match(&mut self, row: usize, field: MatchField) -> bool {
        let Some(target) = self.rows.get_mut(row) else {
            return false;
        };
        let value = field.is_match(target);
        field.set_match(target, !value);
        self.dirty = true;
        true
    }

    pub fn toggle_focused(&mut self) -> bool {
        let (row, field) = self.cursor();
        self.toggle_match(row, field)
    }

    pub fn move_cursor(&mut self, rows: isize, fields: isize) {
        if !self.rows.is_empty() {
            let max = self.rows.len() as isize - 1;
            self.cursor_row = (self.cursor_row as isize + rows).clamp(0, max) as usize;
        }
        let max = MatchField::ALL.len() as isize - 1;
        self.cursor_field = (self.cursor_field as isize + fields).clamp(0, max) as usize;
    }

    pub fn toggle_pane(&mut self, pane: Pane) {
        self.panes.toggle(pane);
    }

    // ─────────────────────────────────────────────────────────
    // Navigation & save
    // ─────────────────────────────────────────────────────────

    pub fn request_page_change(&self, target: u32) -> PageChange {
        if target < 1 || target > self.total_pages() {
            PageChange::OutOfRange
        } else if target == self.current_page() {
            PageChange::Unchanged
        } else if self.dirty {
            PageChange::NeedsConfirm(target)
        } else {
            PageChange::Go(target)
        }
    }

    /// Relative move from the server-reported current page
    pub fn request_page_step(&self, delta: i64) -> PageChange {
        let target = self.current_page() as i64 + delta;
        if target < 1 || target > u32::MAX as i64 {
            return PageChange::OutOfRange;
        }
        self.request_page_change(target as u32)
    }

    /// Snapshot of the local rows for persistence
    pub fn save_payload(&self) -> SavePayload {
        SavePayload {
            run_id: self.key.run_id.clone(),
            file_name: self.file_name().to_string(),
            page: self.key.page,
            comparison_data: self.rows.clone(),
        }
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Persistence failed; the edits are unsaved again
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
