//! Grid view rendering.
//!
//! One fixed-width tile per endpoint, laid out left to right and wrapped to
//! the terminal width. Tiles are colored by status.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::filter_info;
use super::scroll_offset;
use crate::app::App;

/// Width of one tile, including the gap to the next.
pub const TILE_WIDTH: u16 = 26;

/// Number of tiles per row for a grid whose outer width is `width`.
pub fn columns_for(width: u16) -> usize {
    (width.saturating_sub(2) / TILE_WIDTH).max(1) as usize
}

/// Map a click inside the grid to a tile index.
///
/// `row` is the grid row (scroll offset already added) and `column` is
/// relative to the first content cell inside the border.
pub fn index_at(width: u16, row: usize, column: u16) -> usize {
    let columns = columns_for(width);
    let col = ((column / TILE_WIDTH) as usize).min(columns - 1);
    row * columns + col
}

/// First grid row drawn for a grid `height` rows tall, borders included.
pub fn scroll_for(selected_index: usize, width: u16, height: u16) -> usize {
    let visible_rows = height.saturating_sub(2) as usize;
    scroll_offset(selected_index / columns_for(width), visible_rows)
}

/// Render the Grid view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let endpoints = app.visible_endpoints();
    let total = app.data.as_ref().map_or(0, |d| d.endpoints.len());

    let title = format!(" Endpoints ({}/{}){} ", endpoints.len(), total, filter_info(app));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    if endpoints.is_empty() {
        let message = if app.data.is_none() {
            "  Waiting for data..."
        } else if app.filter_text.is_empty() {
            "  No endpoints configured"
        } else {
            "  No endpoints match the filter"
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().add_modifier(Modifier::DIM))),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let columns = columns_for(area.width);
    let label_width = TILE_WIDTH as usize - 2;

    let lines: Vec<Line> = endpoints
        .chunks(columns)
        .enumerate()
        .map(|(row, chunk)| {
            let mut spans = Vec::with_capacity(chunk.len() * 2);
            for (col, endpoint) in chunk.iter().enumerate() {
                let index = row * columns + col;
                let symbol = theme.status_symbol(endpoint.status_class);
                let label = truncate(&format!("{} {}", symbol, endpoint.name), label_width);

                let mut style = theme.status_style(endpoint.status_class);
                if index == app.selected_index {
                    style = style.patch(theme.selected);
                }

                spans.push(Span::styled(format!("{:<width$}", label, width = label_width), style));
                spans.push(Span::raw("  "));
            }
            Line::from(spans)
        })
        .collect();

    // Keep the selected row on screen
    let scroll = scroll_for(app.selected_index, area.width, area.height);

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_for() {
        assert_eq!(columns_for(10), 1);
        assert_eq!(columns_for(80), 3);
        assert_eq!(columns_for(2 + TILE_WIDTH * 4), 4);
    }

    #[test]
    fn test_index_at() {
        // 3 columns at width 80
        assert_eq!(index_at(80, 0, 0), 0);
        assert_eq!(index_at(80, 0, TILE_WIDTH + 1), 1);
        assert_eq!(index_at(80, 1, 0), 3);
        // Past the last column clamps to it
        assert_eq!(index_at(80, 0, 79), 2);
    }

    #[test]
    fn test_scroll_for() {
        // 3 columns, 5 visible rows inside the border
        assert_eq!(scroll_for(0, 80, 7), 0);
        assert_eq!(scroll_for(14, 80, 7), 0);
        assert_eq!(scroll_for(15, 80, 7), 1);
        assert_eq!(scroll_for(29, 80, 7), 5);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-endpoint-name", 8), "a-very-…");
    }
}
