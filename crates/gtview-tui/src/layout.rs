//! Screen layout definitions for the TUI
//!
//! The main screen is a header, a body split into sidebar and content, and
//! a one-row status bar. The three-way viewer further splits its content
//! area into equal-width panes.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the sidebar column (flags, column toggle, key hints)
pub const SIDEBAR_WIDTH: u16 = 28;

/// Below this terminal width the sidebar is hidden
pub const SIDEBAR_MIN_TOTAL_WIDTH: u16 = 70;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, API URL and loading indicator
    pub header: Rect,

    /// Display flags; zero-sized on narrow terminals
    pub sidebar: Rect,

    /// Whatever the effective view renders
    pub content: Rect,

    /// Last status message
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let (sidebar, content) = if area.width >= SIDEBAR_MIN_TOTAL_WIDTH {
        let [sidebar, content] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
                .areas(body);
        (sidebar, content)
    } else {
        (Rect::new(body.x, body.y, 0, body.height), body)
    };

    ScreenAreas {
        header,
        sidebar,
        content,
        status,
    }
}

/// Split `area` into `count` equal-width columns
///
/// Zero panes yields no rects; otherwise the columns cover the area exactly.
pub fn pane_columns(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::horizontal(constraints).split(area).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout_standard_terminal() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 23);
        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.content.x, SIDEBAR_WIDTH);
        assert_eq!(layout.content.width, 80 - SIDEBAR_WIDTH);
        assert_eq!(layout.content.height, 20);
    }

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = create(area);
        assert_eq!(
            layout.header.height + layout.content.height + layout.status.height,
            area.height
        );
        assert_eq!(layout.sidebar.width + layout.content.width, area.width);
    }

    #[test]
    fn test_narrow_terminal_hides_sidebar() {
        let layout = create(Rect::new(0, 0, 40, 12));
        assert_eq!(layout.sidebar.width, 0);
        assert_eq!(layout.content.width, 40);
    }

    #[test]
    fn test_pane_columns_none() {
        assert!(pane_columns(Rect::new(0, 0, 90, 10), 0).is_empty());
    }

    #[test]
    fn test_pane_columns_single_fills_area() {
        let area = Rect::new(5, 2, 90, 10);
        assert_eq!(pane_columns(area, 1), vec![area]);
    }

    #[test]
    fn test_pane_columns_equal_widths() {
        let area = Rect::new(0, 0, 90, 10);
        let panes = pane_columns(area, 3);
        assert_eq!(panes.len(), 3);
        assert!(panes.iter().all(|p| p.width == 30 && p.height == 10));
        assert_eq!(panes[1].x, 30);
        assert_eq!(panes[2].x, 60);
    }

    #[test]
    fn test_pane_columns_cover_area_with_remainder() {
        let area = Rect::new(0, 0, 91, 10);
        let panes = pane_columns(area, 2);
        let total: u16 = panes.iter().map(|p| p.width).sum();
        assert_eq!(total, 91);
        assert!(panes[0].width.abs_diff(panes[1].width) <= 1);
    }
}
