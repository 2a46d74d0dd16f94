//! List and Problems view rendering.
//!
//! A table with one row per endpoint: status, name, group, HTTP status,
//! response time and last check. The Problems view shows the same table
//! restricted to unhealthy and unknown endpoints.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::common::filter_info;
use super::scroll_offset;
use crate::app::{App, View};

const EMPTY: &str = "-";

/// Render the List or Problems view, depending on the current view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let endpoints = app.visible_endpoints();

    let (name, total) = match (&app.data, app.current_view) {
        (Some(data), View::Problems) => ("Problems", data.problems().count()),
        (Some(data), _) => ("Endpoints", data.endpoints.len()),
        (None, _) => ("Endpoints", 0),
    };

    let position_info = if !endpoints.is_empty() {
        format!(" [{}/{}]", app.selected_index + 1, endpoints.len())
    } else {
        String::new()
    };
    let title = format!(
        " {} ({}/{}){}{} ",
        name,
        endpoints.len(),
        total,
        filter_info(app),
        position_info
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    if endpoints.is_empty() {
        let message = match (app.data.is_some(), app.current_view) {
            (false, _) => "  Waiting for data...",
            (true, View::Problems) if app.filter_text.is_empty() => "  All endpoints are healthy",
            (true, _) if app.filter_text.is_empty() => "  No endpoints configured",
            _ => "  No endpoints match the filter",
        };
        let style = if message.contains("healthy") {
            Style::default().fg(theme.healthy)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let empty = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(message, style))])
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Status"),
        Cell::from("Name"),
        Cell::from("Group"),
        Cell::from("HTTP"),
        Cell::from("Time"),
        Cell::from("Checked"),
    ])
    .height(1)
    .style(theme.header);

    let rows: Vec<Row> = endpoints
        .iter()
        .map(|e| {
            let status_style = theme.status_style(e.status_class);
            let result = e.result.as_ref();

            Row::new(vec![
                Cell::from(theme.status_symbol(e.status_class)).style(status_style),
                Cell::from(e.name.clone()),
                Cell::from(e.group.clone().unwrap_or_else(|| EMPTY.to_string())),
                Cell::from(
                    result
                        .and_then(|r| r.http_status)
                        .map(|code| code.to_string())
                        .unwrap_or_else(|| EMPTY.to_string()),
                ),
                Cell::from(
                    result.map(|r| r.formatted_duration.clone()).unwrap_or_else(|| EMPTY.into()),
                ),
                Cell::from(
                    result.map(|r| r.formatted_timestamp.clone()).unwrap_or_else(|| EMPTY.into()),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(7), // Status symbol
        Constraint::Fill(3),   // Name
        Constraint::Fill(2),   // Group
        Constraint::Length(5), // HTTP
        Constraint::Length(8), // Duration
        Constraint::Fill(2),   // Timestamp
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.selected)
        .highlight_symbol("▶ ");

    let selected = app.selected_index.min(endpoints.len() - 1);
    let mut state = TableState::default()
        .with_offset(scroll_for(selected, area.height))
        .with_selected(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

/// First table row drawn for a table `height` rows tall, borders and
/// header included.
pub fn scroll_for(selected_index: usize, height: u16) -> usize {
    scroll_offset(selected_index, height.saturating_sub(3) as usize)
}
