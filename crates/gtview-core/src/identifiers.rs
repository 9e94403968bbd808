//! File identifiers and run timestamp formatting
//!
//! The backend addresses a page of a file by an identifier built from the
//! detail row: `{file}_{page}` for content runs and
//! `{file}_table_{table}_{page}` for indentation rows that carry a table
//! number. Indentation three-way requests drop the trailing page segment.

use chrono::NaiveDateTime;

/// Format of the `Date_Time` run identifier
pub const RUN_ID_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Identifier and starting page for opening a detail row in the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub identifier: String,
    pub page: u32,
}

/// Content detail rows always open the viewer at page 1
pub fn content_file_identifier(file_name: &str, page_num: &str) -> FileTarget {
    FileTarget {
        identifier: format!("{file_name}_{page_num}"),
        page: 1,
    }
}

/// Indentation detail rows open at their own page
///
/// The page label is parsed as a number; anything unparsable opens page 1.
pub fn indentation_file_identifier(
    file_name: &str,
    table_num: Option<&str>,
    page_num: &str,
) -> FileTarget {
    let identifier = match table_num.map(str::trim).filter(|t| !t.is_empty()) {
        Some(table) => format!("{file_name}_table_{table}_{page_num}"),
        None => format!("{file_name}_{page_num}"),
    };
    let page = page_num
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|p| *p > 0)
        .unwrap_or(1);
    FileTarget { identifier, page }
}

/// Remove the last `_`-delimited segment
///
/// `"doc_table_2_3"` becomes `"doc_table_2"`. An identifier without `_` is
/// returned unchanged.
pub fn strip_last_segment(identifier: &str) -> &str {
    match identifier.rfind('_') {
        Some(idx) => &identifier[..idx],
        None => identifier,
    }
}

/// Render a run id like `2024-01-01_10-00-00` as `Jan 1, 2024, 10:00 AM`
///
/// Ids that are not timestamps are returned as-is.
pub fn format_run_datetime(run_id: &str) -> String {
    match NaiveDateTime::parse_from_str(run_id, RUN_ID_FORMAT) {
        Ok(dt) => dt.format("%b %-d, %Y, %-I:%M %p").to_string(),
        Err(_) => run_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_identifier_opens_page_one() {
        let target = content_file_identifier("doc", "1");
        assert_eq!(target.identifier, "doc_1");
        assert_eq!(target.page, 1);

        let target = content_file_identifier("report", "7");
        assert_eq!(target.identifier, "report_7");
        assert_eq!(target.page, 1);
    }

    #[test]
    fn test_indentation_identifier_with_table() {
        let target = indentation_file_identifier("doc", Some("2"), "3");
        assert_eq!(target.identifier, "doc_table_2_3");
        assert_eq!(target.page, 3);
    }

    #[test]
    fn test_indentation_identifier_without_table() {
        let target = indentation_file_identifier("doc", None, "4");
        assert_eq!(target.identifier, "doc_4");
        assert_eq!(target.page, 4);

        let target = indentation_file_identifier("doc", Some(""), "4");
        assert_eq!(target.identifier, "doc_4");
    }

    #[test]
    fn test_indentation_identifier_bad_page_falls_back() {
        let target = indentation_file_identifier("doc", None, "n/a");
        assert_eq!(target.page, 1);
    }

    #[test]
    fn test_strip_last_segment() {
        assert_eq!(strip_last_segment("doc_table_2_3"), "doc_table_2");
        assert_eq!(strip_last_segment("doc_1"), "doc");
        assert_eq!(strip_last_segment("doc"), "doc");
        assert_eq!(strip_last_segment("my_report_12"), "my_report");
    }

    #[test]
    fn test_format_run_datetime() {
        assert_eq!(
            format_run_datetime("2024-01-01_10-00-00"),
            "Jan 1, 2024, 10:00 AM"
        );
        assert_eq!(
            format_run_datetime("2023-11-20_15-04-59"),
            "Nov 20, 2023, 3:04 PM"
        );
    }

    #[test]
    fn test_format_run_datetime_passthrough() {
        assert_eq!(format_run_datetime("run-42"), "run-42");
        assert_eq!(format_run_datetime(""), "");
    }
}
