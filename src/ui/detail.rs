//! Detail overlay rendering.
//!
//! Displays a modal overlay with the latest result of the selected endpoint
//! and the outcome of each of its conditions.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::EndpointView;
use crate::ui::Theme;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 40;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 12;

/// Render the endpoint detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(endpoint) = app.selected_endpoint() else {
        return;
    };
    let theme = app.theme();

    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = (area.height * 80 / 100).clamp(MIN_OVERLAY_HEIGHT, 40);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(7), // Endpoint info
        Constraint::Min(3),    // Conditions
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let header_block = Block::default()
        .title(" Endpoint Detail ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight));

    let header = Paragraph::new(info_lines(endpoint, theme)).block(header_block);
    frame.render_widget(header, chunks[0]);

    // ===== CONDITIONS =====
    let conditions = endpoint.result.as_ref().map(|r| r.conditions.as_slice()).unwrap_or(&[]);

    let block = Block::default()
        .title(format!(" Conditions ({}) ", conditions.len()))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let lines: Vec<Line> = if conditions.is_empty() {
        vec![Line::from(Span::styled(
            "  No conditions reported",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        conditions
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(c.icon, theme.condition_style(c.success)),
                    Span::raw(" "),
                    Span::raw(c.condition.clone()),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}

fn info_lines<'a>(endpoint: &'a EndpointView, theme: &Theme) -> Vec<Line<'a>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let status_style = theme.status_style(endpoint.status_class);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", endpoint.display_name()), bold),
            Span::styled(
                format!("{} {}", theme.status_symbol(endpoint.status_class), endpoint.status_label),
                status_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(" key: {}", endpoint.key),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
    ];

    let Some(ref result) = endpoint.result else {
        lines.push(Line::from(" No results yet"));
        return lines;
    };

    let http = result.http_status.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
    lines.push(Line::from(vec![
        Span::raw(" HTTP: "),
        Span::styled(http, bold),
        Span::raw("    Response time: "),
        Span::styled(result.formatted_duration.clone(), bold),
        Span::raw("    Checked: "),
        Span::styled(result.formatted_timestamp.clone(), bold),
    ]));
    if let Some(ref hostname) = result.hostname {
        lines.push(Line::from(format!(" Host: {}", hostname)));
    }

    lines
}
