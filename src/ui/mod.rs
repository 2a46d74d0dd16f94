//! Terminal rendering using ratatui.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ header: overall status, counts, updated  │
//! │ tabs:   Grid | List | Problems           │
//! │                                          │
//! │ content (current view)                   │
//! │                                          │
//! │ status bar: source, controls, messages   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! The detail and help overlays are drawn on top of the content.

pub mod common;
pub mod detail;
pub mod grid;
pub mod list;
pub mod theme;

pub use theme::{Appearance, Theme};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 50;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 12;

/// Draw the whole screen for the current state.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, app, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    if app.load_error.is_some() {
        common::render_load_failed(frame, app, chunks[2]);
    } else {
        match app.current_view {
            View::Grid => grid::render(frame, app, chunks[2]),
            View::List | View::Problems => list::render(frame, app, chunks[2]),
        }
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

fn render_too_small(frame: &mut Frame, app: &App, area: Rect) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme().unknown));
    let top = (area.height / 2).saturating_sub(2);
    let centered = Rect::new(area.x, area.y + top, area.width, 5.min(area.height - top));
    frame.render_widget(paragraph, centered);
}

/// Row of the first content line on screen (below header, tabs and border).
pub const CONTENT_START_ROW: u16 = 3;

/// Height of the content area, borders included, on a screen `height` rows tall.
pub fn content_height(height: u16) -> u16 {
    // Header, tabs and status bar take one row each
    height.saturating_sub(3)
}

/// First line to draw so that line `selected` is inside a window of
/// `visible` lines. Views scroll only as far as the selection needs.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    (selected + 1).saturating_sub(visible)
}
