use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use ratatui::layout::Size;

use crate::app::{App, View};
use crate::ui::{self, grid, list};

/// File written by the `e` key.
pub const EXPORT_FILE: &str = "gatus_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Step through endpoints while the overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Grid),
        KeyCode::Char('2') => app.set_view(View::List),
        KeyCode::Char('3') => app.set_view(View::Problems),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Fetch now
        KeyCode::Char('r') => app.refresh(),

        // Appearance
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('m') => app.cycle_color_mode(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Filter (start typing to filter)
        KeyCode::Char('/') => app.start_filter(),

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
///
/// `content_start_row` is the first screen row of view content and `screen`
/// the terminal size, used to map clicks onto grid tiles and table rows the
/// same way the views scrolled them.
pub fn handle_mouse_event(
    app: &mut App,
    mouse: MouseEvent,
    content_start_row: u16,
    screen: Size,
) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tab bar sits right below the header
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Grid (0-9), List (10-19), Problems (20-33)
                if col < 10 {
                    app.set_view(View::Grid);
                } else if col < 20 {
                    app.set_view(View::List);
                } else if col < 34 {
                    app.set_view(View::Problems);
                }
                return;
            }

            if app.show_detail_overlay || clicked_row < content_start_row {
                return;
            }

            let count = app.visible_endpoints().len();
            let selected = app.selected_index.min(count.saturating_sub(1));
            let height = ui::content_height(screen.height);
            // Rows inside the border; the bottom border and status bar are not content
            let row = (clicked_row - content_start_row) as usize;
            let inner_rows = height.saturating_sub(2) as usize;
            if row >= inner_rows {
                return;
            }

            let index = match app.current_view {
                View::Grid => {
                    let scroll = grid::scroll_for(selected, screen.width, height);
                    grid::index_at(screen.width, scroll + row, mouse.column.saturating_sub(1))
                }
                // Tables have a header row
                View::List | View::Problems => {
                    if row == 0 {
                        return;
                    }
                    list::scroll_for(selected, height) + row - 1
                }
            };
            if index < count {
                app.selected_index = index;
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
