//! Domain types consumed from the comparison backend
//!
//! Field names follow the backend's JSON keys (`Date_Time`, `File_Name`,
//! `Page_Num`, ...), so most structs carry explicit serde renames.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ─────────────────────────────────────────────────────────────────
// Wire helpers
// ─────────────────────────────────────────────────────────────────

/// A label the backend sends either as a string or as a number
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawLabel {
    fn into_string(self) -> String {
        match self {
            RawLabel::Text(s) => s,
            RawLabel::Int(n) => n.to_string(),
            RawLabel::Float(f) if f.fract() == 0.0 => format!("{}", f as i64),
            RawLabel::Float(f) => f.to_string(),
        }
    }
}

fn de_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawLabel>::deserialize(deserializer)?
        .map(RawLabel::into_string)
        .unwrap_or_default())
}

fn de_opt_label<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawLabel>::deserialize(deserializer)?
        .map(RawLabel::into_string)
        .filter(|s| !s.is_empty()))
}

/// Page numbers: missing, null, zero or unparsable all mean page 1
fn de_page<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawLabel>::deserialize(deserializer)?;
    Ok(raw
        .map(RawLabel::into_string)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1))
}

fn de_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn first_page() -> u32 {
    1
}

// ─────────────────────────────────────────────────────────────────
// Runs
// ─────────────────────────────────────────────────────────────────

/// A completed content-comparison run
///
/// Identified by its timestamp-derived `Date_Time` string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Run {
    #[serde(rename = "Date_Time")]
    pub id: String,
    #[serde(rename = "Changes_Description", default)]
    pub description: Option<String>,
    #[serde(rename = "No_of_Files_Processed", default)]
    pub files_processed: u64,
    #[serde(default)]
    pub total_paragraphs: u64,
    #[serde(default)]
    pub content_matches: u64,
    #[serde(default)]
    pub content_match_percentage: f64,
    #[serde(rename = "TP_superscript", default)]
    pub tp_superscript: u64,
    #[serde(rename = "FN_superscript", default)]
    pub fn_superscript: u64,
    #[serde(rename = "FP_superscript", default)]
    pub fp_superscript: u64,
    #[serde(default)]
    pub superscript_matches: u64,
    #[serde(default)]
    pub superscript_match_percentage: f64,
}

/// A completed indentation-comparison run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndentationRun {
    #[serde(rename = "Date_Time")]
    pub id: String,
    #[serde(rename = "Changes_Description", default)]
    pub description: Option<String>,
    #[serde(rename = "No_of_Files_Processed", default)]
    pub files_processed: u64,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub row_match_percentage: f64,
    #[serde(default)]
    pub indentation_level_match_percentage: f64,
    #[serde(default)]
    pub parent_text_match_percentage: f64,
    #[serde(default)]
    pub row_data_match_percentage: f64,
}

/// Which family of run a detail listing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    Content,
    Indentation,
}

impl DetailKind {
    pub fn title(&self) -> &'static str {
        match self {
            DetailKind::Content => "Content Run Details",
            DetailKind::Indentation => "Indentation Run Details",
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Detail rows
// ─────────────────────────────────────────────────────────────────

/// One (file, page) row of a run's detail listing
///
/// Content and indentation listings share this shape; the metrics the
/// other family uses are simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileDetailRow {
    #[serde(rename = "File_Name", default)]
    pub file_name: String,
    #[serde(rename = "Page_Num", default, deserialize_with = "de_label")]
    pub page_num: String,
    #[serde(
        rename = "Table_Num",
        default,
        deserialize_with = "de_opt_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_num: Option<String>,

    // content metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_paragraphs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_matches: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_match_percentage: Option<f64>,
    #[serde(
        rename = "TP_superscript",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tp_superscript: Option<u64>,
    #[serde(
        rename = "FP_superscript",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fp_superscript: Option<u64>,
    #[serde(
        rename = "FN_superscript",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fn_superscript: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superscript_matches: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superscript_match_percentage: Option<f64>,

    // indentation metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_match_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indentation_level_match_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_text_match_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_data_match_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt_rows: Option<u64>,
}

impl FileDetailRow {
    /// Indentation rows are recognised by carrying a row count
    pub fn is_indentation(&self) -> bool {
        self.total_rows.is_some()
    }
}

/// Per-file result shown in the run summary view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileResult {
    #[serde(default)]
    pub file_name: String,
    #[serde(default, deserialize_with = "de_label")]
    pub page_num: String,
    #[serde(default)]
    pub total_paragraphs: u64,
    #[serde(default)]
    pub content_matches: u64,
    #[serde(default)]
    pub content_match_percentage: f64,
    #[serde(default)]
    pub tp_superscript: u64,
    #[serde(default)]
    pub fp_superscript: u64,
    #[serde(default)]
    pub fn_superscript: u64,
    #[serde(default)]
    pub tp_font_info: u64,
    #[serde(default)]
    pub fp_font_info: u64,
    #[serde(default)]
    pub fn_font_info: u64,
}

/// One paragraph of a per-file content diff
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileDiffRow {
    #[serde(default)]
    pub index: u64,
    #[serde(default)]
    pub content_output: String,
    #[serde(default)]
    pub content_gt: String,
}

impl FileDiffRow {
    pub fn is_match(&self) -> bool {
        self.content_output == self.content_gt
    }
}

// ─────────────────────────────────────────────────────────────────
// Three-way view
// ─────────────────────────────────────────────────────────────────

/// One content unit within a page: output vs ground-truth values per field
///
/// Keys this type does not model are kept in `extra` and written back
/// unchanged when the row is saved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(default)]
    pub content_output: Value,
    #[serde(default)]
    pub content_gt: Value,
    #[serde(default, deserialize_with = "de_flag")]
    pub content_match: bool,

    #[serde(default)]
    pub superscript_output: Value,
    #[serde(default)]
    pub superscript_in_gt: Value,
    #[serde(default, deserialize_with = "de_flag")]
    pub superscript_match: bool,

    #[serde(default)]
    pub font_size_output: Value,
    #[serde(default)]
    pub font_size_gt: Value,
    #[serde(default, deserialize_with = "de_flag")]
    pub font_size_match: bool,

    #[serde(default)]
    pub font_style_output: Value,
    #[serde(default)]
    pub font_style_gt: Value,
    #[serde(default, deserialize_with = "de_flag")]
    pub font_style_match: bool,

    #[serde(default)]
    pub font_color_output: Value,
    #[serde(default)]
    pub font_color_gt: Value,
    #[serde(default, deserialize_with = "de_flag")]
    pub font_color_match: bool,

    #[serde(default)]
    pub font_name_output: Value,
    #[serde(default)]
    pub font_name_gt: Value,
    #[serde(default, deserialize_with = "de_flag")]
    pub font_name_match: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The six compared fields of a [`ComparisonRow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Content,
    Superscript,
    FontSize,
    FontStyle,
    FontColor,
    FontName,
}

impl MatchField {
    pub const ALL: [MatchField; 6] = [
        MatchField::Content,
        MatchField::Superscript,
        MatchField::FontSize,
        MatchField::FontStyle,
        MatchField::FontColor,
        MatchField::FontName,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            MatchField::Content => "Content",
            MatchField::Superscript => "Superscript",
            MatchField::FontSize => "Font Size",
            MatchField::FontStyle => "Font Style",
            MatchField::FontColor => "Font Color",
            MatchField::FontName => "Font Name",
        }
    }

    /// Superscript and font-info columns are hidden by the column toggle
    pub fn is_font_info(&self) -> bool {
        matches!(
            self,
            MatchField::FontSize | MatchField::FontStyle | MatchField::FontColor | MatchField::FontName
        )
    }

    pub fn output<'a>(&self, row: &'a ComparisonRow) -> &'a Value {
        match self {
            MatchField::Content => &row.content_output,
            MatchField::Superscript => &row.superscript_output,
            MatchField::FontSize => &row.font_size_output,
            MatchField::FontStyle => &row.font_style_output,
            MatchField::FontColor => &row.font_color_output,
            MatchField::FontName => &row.font_name_output,
        }
    }

    pub fn ground_truth<'a>(&self, row: &'a ComparisonRow) -> &'a Value {
        match self {
            MatchField::Content => &row.content_gt,
            MatchField::Superscript => &row.superscript_in_gt,
            MatchField::FontSize => &row.font_size_gt,
            MatchField::FontStyle => &row.font_style_gt,
            MatchField::FontColor => &row.font_color_gt,
            MatchField::FontName => &row.font_name_gt,
        }
    }

    pub fn is_match(&self, row: &ComparisonRow) -> bool {
        *self.flag(row)
    }

    pub fn set_match(&self, row: &mut ComparisonRow, value: bool) {
        *self.flag_mut(row) = value;
    }

    fn flag<'a>(&self, row: &'a ComparisonRow) -> &'a bool {
        match self {
            MatchField::Content => &row.content_match,
            MatchField::Superscript => &row.superscript_match,
            MatchField::FontSize => &row.font_size_match,
            MatchField::FontStyle => &row.font_style_match,
            MatchField::FontColor => &row.font_color_match,
            MatchField::FontName => &row.font_name_match,
        }
    }

    fn flag_mut<'a>(&self, row: &'a mut ComparisonRow) -> &'a mut bool {
        match self {
            MatchField::Content => &mut row.content_match,
            MatchField::Superscript => &mut row.superscript_match,
            MatchField::FontSize => &mut row.font_size_match,
            MatchField::FontStyle => &mut row.font_style_match,
            MatchField::FontColor => &mut row.font_color_match,
            MatchField::FontName => &mut row.font_name_match,
        }
    }
}

/// Maximum displayed length of a content value before truncation
pub const CONTENT_DISPLAY_LIMIT: usize = 80;

/// Render a comparison value for a table cell
///
/// Booleans read `True`/`False`, null is blank, and content strings longer
/// than [`CONTENT_DISPLAY_LIMIT`] characters are cut to 77 plus `...`.
pub fn format_value(field: MatchField, value: &Value) -> String {
    match value {
        Value::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Value::Null => String::new(),
        Value::String(s) if field == MatchField::Content => {
            if s.chars().count() > CONTENT_DISPLAY_LIMIT {
                let head: String = s.chars().take(CONTENT_DISPLAY_LIMIT - 3).collect();
                format!("{head}...")
            } else {
                s.clone()
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pagination descriptor attached to a three-way view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page", deserialize_with = "de_page")]
    pub current_page: u32,
    #[serde(default = "first_page", deserialize_with = "de_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub prev_file: Option<String>,
    #[serde(default)]
    pub next_file: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            prev_file: None,
            next_file: None,
        }
    }
}

/// Everything the file viewer shows for one (run, file, page)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreeWayViewPayload {
    #[serde(rename = "File_Name", default)]
    pub file_name: String,
    #[serde(rename = "Page_Num", default, deserialize_with = "de_label")]
    pub page_num: String,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub comparison_data: Vec<ComparisonRow>,
    #[serde(default)]
    pub pdf_view_base64: Option<String>,
    #[serde(default)]
    pub html_view_content: Option<String>,
}

/// Edited comparison rows handed to persistence on save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    #[serde(rename = "Run_Id")]
    pub run_id: String,
    #[serde(rename = "File_Name")]
    pub file_name: String,
    #[serde(rename = "Page_Num")]
    pub page: u32,
    pub comparison_data: Vec<ComparisonRow>,
}

// ─────────────────────────────────────────────────────────────────
// Submission
// ─────────────────────────────────────────────────────────────────

/// Which side of a comparison an unprocessed folder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderKind {
    Gt,
    Output,
}

impl FolderKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            FolderKind::Gt => "gt",
            FolderKind::Output => "output",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FolderKind::Gt => "GT",
            FolderKind::Output => "output",
        }
    }
}

/// Backend acknowledgement of a started comparison
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonSubmitted {
    #[serde(rename = "runId", alias = "run_id", default)]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
