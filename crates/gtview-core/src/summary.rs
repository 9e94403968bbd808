//! Aggregates shown above a run's detail listing

use crate::types::FileDetailRow;

/// Colour band for a match percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchGrade {
    Success,
    Warning,
    Danger,
}

impl MatchGrade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 95.0 {
            MatchGrade::Success
        } else if percentage >= 80.0 {
            MatchGrade::Warning
        } else {
            MatchGrade::Danger
        }
    }
}

/// Totals over the rows of one detail listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailSummary {
    pub total_files: usize,
    pub total_paragraphs: u64,
    pub total_content_matches: u64,
    pub content_match_overall: f64,
    pub total_tp_superscript: u64,
    pub total_fp_superscript: u64,
    pub total_fn_superscript: u64,
    pub total_superscript_matches: u64,
    pub superscript_match_overall: f64,
    pub total_rows: u64,
    /// Mean of the per-row `row_match_percentage`; 0 for an empty listing
    pub average_row_match: f64,
}

impl DetailSummary {
    pub fn from_rows(rows: &[FileDetailRow]) -> Self {
        let sum = |f: fn(&FileDetailRow) -> Option<u64>| rows.iter().filter_map(f).sum::<u64>();

        let total_paragraphs = sum(|r| r.total_paragraphs);
        let total_content_matches = sum(|r| r.content_matches);
        let total_superscript_matches = sum(|r| r.superscript_matches);

        let ratio = |n: u64| {
            if total_paragraphs > 0 {
                n as f64 / total_paragraphs as f64 * 100.0
            } else {
                0.0
            }
        };

        let average_row_match = if rows.is_empty() {
            0.0
        } else {
            rows.iter()
                .map(|r| r.row_match_percentage.unwrap_or(0.0))
                .sum::<f64>()
                / rows.len() as f64
        };

        Self {
            total_files: rows.len(),
            total_paragraphs,
            total_content_matches,
            content_match_overall: ratio(total_content_matches),
            total_tp_superscript: sum(|r| r.tp_superscript),
            total_fp_superscript: sum(|r| r.fp_superscript),
            total_fn_superscript: sum(|r| r.fn_superscript),
            total_superscript_matches,
            superscript_match_overall: ratio(total_superscript_matches),
            total_rows: sum(|r| r.total_rows),
            average_row_match,
        }
    }
}
