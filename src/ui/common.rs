//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, help overlay,
//! and the message shown when statuses could not be loaded.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, View, LOAD_FAILED_MESSAGE};

const TITLE: &str = "GATUS ";

/// Render the header bar with the overall status.
///
/// Displays: status indicator, endpoint counts by status, last update.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(format!(" {}", TITLE), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let summary = &data.summary;
    let overall = summary.overall();

    let count = |n: usize, style: Style| {
        if n > 0 {
            Span::styled(n.to_string(), style)
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", theme.status_symbol(overall)), theme.status_style(overall)),
        Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count(summary.healthy, Style::default().fg(theme.healthy)),
        Span::raw(" up "),
        count(summary.unhealthy, theme.status_style(crate::data::StatusClass::Unhealthy)),
        Span::raw(" down "),
        count(summary.unknown, Style::default().fg(theme.unknown)),
        Span::raw(" unknown │ "),
        Span::styled(summary.total.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" endpoints │ "),
        Span::raw(format!("Updated {}", summary.last_updated)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let views = [View::Grid, View::List, View::Problems];
    let titles: Vec<Line> = views
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!(" {}:{} ", i + 1, v.label())))
        .collect();

    let selected = views.iter().position(|v| *v == app.current_view).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme().tab_inactive)
        .highlight_style(app.theme().tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the data source, the active theme, and available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme().highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let config = app.appearance().config();
    let status = if app.load_error.is_some() {
        format!(" {} | r:retry q:quit", app.source_description())
    } else if app.data.is_some() {
        let controls = if app.filter_active {
            "Type to search | Enter:apply Esc:cancel"
        } else {
            "/:search Tab:switch Enter:detail t:theme m:mode ?:help q:quit"
        };
        format!(
            " {} | {}/{} | {}",
            app.source_description(),
            config.theme,
            config.color_mode,
            controls
        )
    } else {
        format!(" {} | Loading... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the fixed message shown while statuses cannot be loaded.
pub fn render_load_failed(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            LOAD_FAILED_MESSAGE,
            Style::default().fg(theme.unhealthy).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(ref err) = app.load_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Grid / List / Problems"),
        Line::from("  ↑/↓ j/k     Move selection"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Endpoint detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Search"),
        Line::from("  /           Start filter"),
        Line::from("  c           Clear filter"),
        Line::from(""),
        section(" Appearance"),
        Line::from("  t           Cycle theme"),
        Line::from("  m           Cycle color mode"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Refresh now"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay, shrinking on small terminals
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Title suffix describing the filter state, e.g. ` /api_`.
pub fn filter_info(app: &App) -> String {
    if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    }
}
