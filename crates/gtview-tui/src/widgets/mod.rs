//! Custom widget components

mod alert;
mod confirm_dialog;
mod file_diff;
mod header;
pub mod modal_overlay;
mod run_details;
mod run_lists;
mod run_summary;
mod sidebar;
mod status_bar;
mod submit_dialog;
mod three_way;

pub use alert::AlertDialog;
pub use confirm_dialog::ConfirmDialog;
pub use file_diff::FileDiffCard;
pub use header::MainHeader;
pub use run_details::RunDetailsTable;
pub use run_lists::{IndentationRunsTable, RunsTable};
pub use run_summary::RunSummaryCard;
pub use sidebar::Sidebar;
pub use status_bar::StatusBar;
pub use submit_dialog::SubmitDialogWidget;
pub use three_way::ThreeWayView;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Cell, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::styles;

/// Percentage cell coloured by match grade
pub(crate) fn percent_cell(percentage: f64) -> Cell<'static> {
    Cell::from(Span::styled(
        format!("{percentage:.2}%"),
        styles::grade(percentage),
    ))
}

/// Optional percentage; blank when the backend omitted it
pub(crate) fn opt_percent_cell(percentage: Option<f64>) -> Cell<'static> {
    percentage.map(percent_cell).unwrap_or_default()
}

pub(crate) fn opt_count_cell(count: Option<u64>) -> Cell<'static> {
    Cell::from(count.map(|n| n.to_string()).unwrap_or_default())
}

/// Bordered card with a title
pub(crate) fn card(title: String, focused: bool) -> Block<'static> {
    styles::glass_block(focused)
        .title(format!(" {title} "))
        .title_style(if focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        })
}

/// Centered one-line placeholder for empty or loading tables
pub(crate) fn render_placeholder(text: &str, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    Paragraph::new(text)
        .style(styles::text_muted())
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, y, area.width, 1), buf);
}

/// Collapse whitespace onto one line and cut to `max` display columns
pub(crate) fn truncate_to_width(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.width() <= max {
        return flat;
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
