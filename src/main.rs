use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use dogview::app::App;
use dogview::config::Config;
use dogview::services::tracing_setup;
use ratatui::DefaultTerminal;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// A themed terminal greeting card with a random dog photo fetcher
#[derive(Parser, Debug)]
#[command(name = "dogview")]
#[command(about = "Renders a themed greeting and toggles between palettes", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Palette to start with ("light" or "dark")
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Disable the startup image fetch
    #[arg(long)]
    no_fetch: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("dogview.log"));
    if tracing_setup::init_global(&log_path).is_none() {
        eprintln!("warning: could not set up logging at {}", log_path.display());
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path).context("Failed to load configuration")?,
        None => Config::load_default(),
    };
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    if args.no_fetch {
        config.dog.fetch_on_start = false;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting dogview");

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture).context("Failed to enable mouse capture")?;

    let mut app = App::new(config);
    app.mount();

    let result = run_event_loop(&mut app, &mut terminal);

    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();

    result.context("Event loop returned an error")
}

/// Main event loop
fn run_event_loop(app: &mut App, terminal: &mut DefaultTerminal) -> Result<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps
    let mut last_render = Instant::now();
    let mut needs_render = true;

    loop {
        // Deliver results from background work (the image fetch).
        if app.process_async_messages() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            Duration::from_millis(50)
        };

        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) {
                    needs_render = true;
                }
            }
            Event::Mouse(mouse) => {
                if app.handle_mouse(mouse) {
                    needs_render = true;
                }
            }
            Event::Resize(..) => {
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}
