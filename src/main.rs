use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gatus_tui::events;
use gatus_tui::prefs::{FileStore, MemoryStore, PreferenceStore};
use gatus_tui::settings::Settings;
use gatus_tui::source::{DataSource, FileSource, HttpSource, StatusClient, StatusSnapshot};
use gatus_tui::ui::{self, CONTENT_START_ROW};
use gatus_tui::{App, ProcessedEndpoints};

#[derive(Parser, Debug)]
#[command(name = "gatus-tui")]
#[command(about = "Terminal dashboard for Gatus endpoint statuses")]
struct Args {
    /// Base URL of the Gatus server [default: http://localhost:8080]
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Read statuses from a JSON file instead of a server
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Refresh interval (e.g. "30s", "1m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Request timeout (e.g. "10s", "500ms")
    #[arg(long)]
    timeout: Option<String>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preferences file for theme and color mode
    #[arg(long, conflicts_with = "no_persist")]
    prefs: Option<PathBuf>,

    /// Keep theme and color mode changes for this session only
    #[arg(long)]
    no_persist: bool,

    /// Theme to use and remember (gatus, github, tui)
    #[arg(long)]
    theme: Option<String>,

    /// Color mode to use and remember (light, dark, system)
    #[arg(long)]
    color_mode: Option<String>,

    /// Export current statuses to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(ref url) = args.url {
        settings.url = url.clone();
    }
    if let Some(ref refresh) = args.refresh {
        settings.refresh = refresh.clone();
    }
    if let Some(ref timeout) = args.timeout {
        settings.timeout = timeout.clone();
    }
    if let Some(ref prefs) = args.prefs {
        settings.preferences = Some(prefs.clone());
    }
    let refresh = settings.refresh_interval()?;
    let timeout = settings.request_timeout()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&args, &settings, timeout, export_path);
    }

    let prefs = open_preferences(&args, &settings)?;

    match args.file {
        Some(ref path) => {
            // File changes are cheap to detect, so check often
            let source = Box::new(FileSource::new(path));
            run_tui(source, prefs, &args, Duration::from_secs(1))
        }
        None => run_with_http(&settings.url, prefs, &args, refresh, timeout),
    }
}

/// Send tracing output to `path`; stdout belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_preferences(args: &Args, settings: &Settings) -> Result<PreferenceStore> {
    if args.no_persist {
        return Ok(PreferenceStore::new(MemoryStore::new()));
    }

    let path = match settings.preferences {
        Some(ref path) => path.clone(),
        None => FileStore::default_path()?,
    };
    info!(path = %path.display(), "using preferences file");
    Ok(PreferenceStore::new(FileStore::open(path)))
}

/// Run with a live Gatus server
fn run_with_http(
    url: &str,
    prefs: PreferenceStore,
    args: &Args,
    refresh: Duration,
    timeout: Duration,
) -> Result<()> {
    // The runtime drives the polling task while the TUI owns the main thread
    let rt = tokio::runtime::Runtime::new()?;

    let client = StatusClient::new(url, timeout)?;
    let source = {
        let _guard = rt.enter();
        HttpSource::spawn(client, refresh)
    };

    run_tui(Box::new(source), prefs, args, Duration::from_millis(250))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    prefs: PreferenceStore,
    args: &Args,
    refresh_interval: Duration,
) -> Result<()> {
    // Create app before raw mode so a `system` color mode can query the terminal
    let mut app = App::new(source, prefs);
    if let Some(ref theme) = args.theme {
        if !app.set_theme(theme) {
            warn!(theme = %theme, "unknown theme, keeping saved preference");
        }
    }
    if let Some(ref mode) = args.color_mode {
        if !app.set_color_mode(mode) {
            warn!(mode = %mode, "unknown color mode, keeping saved preference");
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let _ = app.reload_data();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_poll = std::time::Instant::now();

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    let screen = terminal.size()?;
                    events::handle_mouse_event(app, mouse, CONTENT_START_ROW, screen);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        if last_poll.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_poll = std::time::Instant::now();
        }

        // Keep "2m ago" style timestamps moving between fetches
        app.tick();
    }

    Ok(())
}

/// Fetch statuses once and write the transformed view models to a file
fn export_to_file(
    args: &Args,
    settings: &Settings,
    timeout: Duration,
    export_path: &Path,
) -> Result<()> {
    let snapshot: StatusSnapshot = match args.file {
        Some(ref path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)?
        }
        None => {
            let client = StatusClient::new(&settings.url, timeout)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(client.fetch())?
        }
    };

    let processed = gatus_tui::preprocess_endpoints(&snapshot);
    write_export(&processed, export_path)?;

    println!("Exported endpoint statuses to: {}", export_path.display());
    Ok(())
}

fn write_export(processed: &ProcessedEndpoints, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(processed)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "gatus-tui",
            "--url",
            "https://status.example.com",
            "--refresh",
            "1m",
            "--theme",
            "github",
        ]);
        assert_eq!(args.url.as_deref(), Some("https://status.example.com"));
        assert_eq!(args.refresh.as_deref(), Some("1m"));
        assert_eq!(args.theme.as_deref(), Some("github"));
        assert!(!args.no_persist);
    }

    #[test]
    fn test_url_conflicts_with_file() {
        let result = Args::try_parse_from(["gatus-tui", "--url", "http://x", "--file", "s.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("statuses.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, r#"[{"name":"API","key":"api","results":[]}]"#).unwrap();

        let args = Args::parse_from(["gatus-tui", "--file", input.to_str().unwrap()]);
        export_to_file(&args, &Settings::default(), Duration::from_secs(1), &output).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["summary"]["unknown"], 1);
        assert_eq!(value["endpoints"][0]["name"], "API");
    }
}
