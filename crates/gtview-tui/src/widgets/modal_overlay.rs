//! Dimmed backdrop, drop shadow and cleared frame for dialogs

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// `width` x `height` centered in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    rect
}

/// Dim the whole screen and return the cleared dialog rect
///
/// The shadow is one cell wide along the right and bottom edges and is
/// clipped to the screen.
pub fn prepare_modal(buf: &mut Buffer, area: Rect, width: u16, height: u16) -> Rect {
    buf.set_style(
        area,
        Style::default()
            .fg(palette::TEXT_MUTED)
            .bg(palette::DEEPEST_BG),
    );

    let modal = centered_rect(width, height, area);
    let shadow = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);
    let right = Rect::new(modal.right(), modal.y + 1, 1, modal.height);
    let bottom = Rect::new(modal.x + 1, modal.bottom(), modal.width, 1);
    for edge in [right, bottom] {
        buf.set_style(edge.intersection(buf.area), shadow);
    }

    Clear.render(modal, buf);
    modal
}
