mod app;
mod chart;
mod export;
mod format;
mod logging;
mod report;
mod ui;

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use app::App;
use chart::build_report;
use export::export_json;
use logging::LoggingGuard;
use report::{DriveSource, PayloadSource};
use ui::{handle_key, ColorScheme};

#[derive(Parser, Debug)]
#[command(name = "storage-report")]
#[command(version)]
#[command(
    about = "Storage-usage report for a drive: category bar, largest directories and files",
    long_about = None
)]
struct Args {
    /// Analysis payload file (single analysis or drive bundle)
    payload: PathBuf,

    /// Drive to preselect (TUI) or to export (--json)
    #[arg(short, long)]
    drive: Option<String>,

    /// Print datasets and summary for one drive as JSON and exit
    #[arg(long, conflicts_with = "list_drives")]
    json: bool,

    /// Print drive identifiers, one per line, and exit
    #[arg(long)]
    list_drives: bool,

    /// Start analysis of the selected drive immediately
    #[arg(long)]
    analyze: bool,

    /// Color scheme: default, dark, light, colorblind
    #[arg(long, default_value = "default")]
    color_scheme: String,

    /// Ignore --color-scheme and use the default scheme
    #[arg(long)]
    no_color: bool,

    /// Write log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let interactive = !args.json && !args.list_drives;
    let _guard = init_logging(&args, interactive)?;

    let source = PayloadSource::new(&args.payload);
    info!(payload = %source.path().display(), "using analysis payload");

    if args.list_drives {
        return run_list_mode(&source);
    }

    if args.json {
        return run_json_mode(&source, args.drive.as_deref());
    }

    let color_scheme = if args.no_color {
        ColorScheme::default()
    } else {
        args.color_scheme
            .parse::<ColorScheme>()
            .map_err(anyhow::Error::msg)?
    };

    run_tui_mode(Arc::new(source), color_scheme, args.drive.as_deref(), args.analyze)
}

/// The TUI only logs when given a file; the one-shot modes log to stderr.
fn init_logging(args: &Args, interactive: bool) -> Result<Option<LoggingGuard>> {
    match &args.log_file {
        Some(path) => {
            let guard = logging::init_file_logging(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Ok(Some(guard))
        }
        None if interactive => Ok(None),
        None => {
            logging::init_stderr_logging();
            Ok(None)
        }
    }
}

fn run_list_mode(source: &dyn DriveSource) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for drive in source.list_drives()? {
        writeln!(stdout, "{}", drive)?;
    }
    Ok(())
}

fn run_json_mode(source: &dyn DriveSource, drive: Option<&str>) -> Result<()> {
    let drive = match drive {
        Some(drive) => drive.to_string(),
        None => source
            .list_drives()?
            .into_iter()
            .next()
            .context("payload lists no drives")?,
    };

    let analysis = source.analyze_drive(&drive)?;
    let report = build_report(&analysis, &Local);

    let mut stdout = io::stdout();
    export_json(&drive, &report, &mut stdout)?;
    println!(); // Final newline

    Ok(())
}

fn run_tui_mode(
    source: Arc<dyn DriveSource>,
    color_scheme: ColorScheme,
    drive: Option<&str>,
    analyze: bool,
) -> Result<()> {
    let mut app = App::new(source, color_scheme);
    if let Some(drive) = drive {
        if !app.select_drive(drive) {
            bail!("unknown drive: {}", drive);
        }
    }
    if analyze {
        app.start_analysis();
    }

    // Set up panic handler to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);

        // Call the original panic handler
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear screen to ensure clean state
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Return the first error if any
    result.and(cleanup_result)
}

/// Clean up terminal state.
fn cleanup_terminal<B: ratatui::backend::Backend + Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Collect a finished analysis, advance the spinner
        app.update();

        terminal.draw(|frame| {
            ui::render_ui(frame, app);
        })?;

        // Handle input with timeout (for animations)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press, not release
                    if key.kind == KeyEventKind::Press {
                        let command = handle_key(key, &app.input_mode);
                        app.handle_command(command);
                    }
                }
                Event::Mouse(mouse_event) => {
                    use crossterm::event::{MouseButton, MouseEventKind};
                    let x = mouse_event.column;
                    let y = mouse_event.row;

                    match mouse_event.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            app.handle_click(x, y);
                        }
                        MouseEventKind::Moved => {
                            // Track mouse position for hover tooltips
                            app.update_mouse_pos(x, y);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
