//! Theme configuration for the TUI.
//!
//! Each visual theme (`gatus`, `github`, `tui`) comes in a light and a dark
//! palette. The `system` color mode picks one by probing the terminal
//! background.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::StatusClass;
use crate::prefs::{ColorMode, PresentationTarget, ThemeConfig, ThemeName};

/// Color and style theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Which visual theme this palette belongs to.
    pub name: ThemeName,
    /// Whether this is the dark variant.
    pub dark: bool,
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for healthy endpoints and passed conditions.
    pub healthy: Color,
    /// Color for unhealthy endpoints and failed conditions.
    pub unhealthy: Color,
    /// Color for endpoints without results.
    pub unknown: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Build the palette for `name` in the light or dark variant.
    pub fn new(name: ThemeName, dark: bool) -> Self {
        match name {
            ThemeName::Gatus => Self::gatus(dark),
            ThemeName::Github => Self::github(dark),
            ThemeName::Tui => Self::tui(dark),
        }
    }

    /// Build the palette for a full configuration, probing the terminal
    /// when the color mode is `system`.
    pub fn resolve(config: ThemeConfig) -> Self {
        let dark = match config.color_mode {
            ColorMode::Light => false,
            ColorMode::Dark => true,
            ColorMode::System => detect_dark(),
        };
        Self::new(config.theme, dark)
    }

    /// Default look: rounded borders, plain ANSI green/red.
    fn gatus(dark: bool) -> Self {
        let highlight = if dark { Color::Cyan } else { Color::Blue };
        Self {
            name: ThemeName::Gatus,
            dark,
            highlight,
            healthy: Color::Green,
            unhealthy: Color::Red,
            unknown: if dark { Color::Gray } else { Color::DarkGray },
            border: if dark { Color::Gray } else { Color::DarkGray },
            header: Style::default().fg(highlight).add_modifier(Modifier::BOLD),
            selected: Style::default()
                .bg(if dark { Color::DarkGray } else { Color::LightBlue })
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(highlight).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(if dark { Color::Gray } else { Color::DarkGray }),
            border_type: BorderType::Rounded,
        }
    }

    /// GitHub Primer palette with square borders.
    fn github(dark: bool) -> Self {
        let (healthy, unhealthy, unknown, highlight, border, selected_bg) = if dark {
            (
                Color::Rgb(0x3f, 0xb9, 0x50),
                Color::Rgb(0xf8, 0x51, 0x49),
                Color::Rgb(0x8b, 0x94, 0x9e),
                Color::Rgb(0x58, 0xa6, 0xff),
                Color::Rgb(0x30, 0x36, 0x3d),
                Color::Rgb(0x16, 0x1b, 0x22),
            )
        } else {
            (
                Color::Rgb(0x1a, 0x7f, 0x37),
                Color::Rgb(0xcf, 0x22, 0x2e),
                Color::Rgb(0x65, 0x6d, 0x76),
                Color::Rgb(0x09, 0x69, 0xda),
                Color::Rgb(0xd0, 0xd7, 0xde),
                Color::Rgb(0xdd, 0xf4, 0xff),
            )
        };
        Self {
            name: ThemeName::Github,
            dark,
            highlight,
            healthy,
            unhealthy,
            unknown,
            border,
            header: Style::default().fg(unknown).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(selected_bg),
            tab_active: Style::default().fg(highlight).add_modifier(Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(unknown),
            border_type: BorderType::Plain,
        }
    }

    /// Retro terminal look: double borders, reverse-video selection.
    fn tui(dark: bool) -> Self {
        let highlight = if dark { Color::Yellow } else { Color::Magenta };
        Self {
            name: ThemeName::Tui,
            dark,
            highlight,
            healthy: if dark { Color::LightGreen } else { Color::Green },
            unhealthy: if dark { Color::LightRed } else { Color::Red },
            unknown: Color::Yellow,
            border: highlight,
            header: Style::default()
                .fg(highlight)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            tab_active: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            tab_inactive: Style::default(),
            border_type: BorderType::Double,
        }
    }

    /// Foreground color for a status.
    pub fn status_color(&self, status: StatusClass) -> Color {
        match status {
            StatusClass::Healthy => self.healthy,
            StatusClass::Unhealthy => self.unhealthy,
            StatusClass::Unknown => self.unknown,
        }
    }

    /// Get style for a status
    pub fn status_style(&self, status: StatusClass) -> Style {
        let style = Style::default().fg(self.status_color(status));
        match status {
            StatusClass::Unhealthy => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }

    /// Short status marker used in the grid and tables.
    pub fn status_symbol(&self, status: StatusClass) -> &'static str {
        match (self.name, status) {
            (ThemeName::Gatus, _) => "●",
            (ThemeName::Github, StatusClass::Healthy) => "✓",
            (ThemeName::Github, StatusClass::Unhealthy) => "✗",
            (ThemeName::Github, StatusClass::Unknown) => "○",
            (ThemeName::Tui, StatusClass::Healthy) => "[ OK ]",
            (ThemeName::Tui, StatusClass::Unhealthy) => "[FAIL]",
            (ThemeName::Tui, StatusClass::Unknown) => "[ ?? ]",
        }
    }

    /// Style for a condition icon.
    pub fn condition_style(&self, success: bool) -> Style {
        if success {
            Style::default().fg(self.healthy)
        } else {
            Style::default().fg(self.unhealthy).add_modifier(Modifier::BOLD)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::default(), true)
    }
}

/// Query the terminal background; dark unless it is clearly light.
pub fn detect_dark() -> bool {
    // Use terminal-light crate to detect background luminance
    !matches!(terminal_light::luma(), Ok(luma) if luma > 0.5)
}

/// The live look of the dashboard.
///
/// Receives preference changes and keeps the resolved [`Theme`] in sync.
/// The terminal is queried at most once, the first time `system` is applied.
#[derive(Debug, Clone, Default)]
pub struct Appearance {
    config: ThemeConfig,
    theme: Theme,
    system_dark: Option<bool>,
}

impl Appearance {
    /// Create an appearance that resolves `system` to `system_dark`
    /// instead of probing the terminal.
    pub fn with_system_dark(system_dark: bool) -> Self {
        Self {
            system_dark: Some(system_dark),
            ..Self::default()
        }
    }

    /// The configuration last applied.
    pub fn config(&self) -> ThemeConfig {
        self.config
    }

    /// The resolved palette.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn rebuild(&mut self) {
        let dark = match self.config.color_mode {
            ColorMode::Light => false,
            ColorMode::Dark => true,
            ColorMode::System => *self.system_dark.get_or_insert_with(detect_dark),
        };
        self.theme = Theme::new(self.config.theme, dark);
    }
}

impl PresentationTarget for Appearance {
    fn set_theme(&mut self, theme: ThemeName) {
        self.config.theme = theme;
        self.rebuild();
    }

    fn set_color_mode(&mut self, mode: ColorMode) {
        self.config.color_mode = mode;
        self.rebuild();
    }
}
