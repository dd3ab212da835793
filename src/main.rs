mod app;
mod config;
mod engine;
mod keypad;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use engine::{Engine, Key};

#[derive(Parser, Debug)]
#[command(name = "dentaku")]
#[command(version = "0.1.0")]
#[command(about = "A keypad calculator for the terminal")]
struct Args {
    /// Feed a key sequence and print the result without the TUI,
    /// e.g. --keys "6/4="
    #[arg(short, long)]
    keys: Option<String>,

    /// With --keys, print the final state as JSON
    #[arg(short, long)]
    json: bool,

    /// Use an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle CLI-only mode
    if let Some(sequence) = args.keys {
        return feed_keys(&sequence, args.json);
    }

    let config = match args.config {
        Some(path) => AppConfig::load_from(&path),
        None => AppConfig::load().unwrap_or_default(),
    };

    run_tui(config)
}

/// Run a key sequence through a fresh engine and print where it ends
/// up, as the bare display string or as JSON.
fn feed_keys(sequence: &str, json: bool) -> Result<()> {
    let mut engine = Engine::new();
    for key in Key::parse_sequence(sequence)? {
        engine.press(key);
    }

    if json {
        let output = serde_json::json!({
            "display": engine.display(),
            "first": engine.first_operand(),
            "second": engine.second_operand(),
            "operator": engine.operator().map(|op| op.symbol().to_string()),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", engine.display());
    }
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    tracing::info!("Starting dentaku");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                    KeyCode::Char('c')
                        if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                    {
                        return Ok(())
                    }
                    _ => app.handle_key(key),
                },
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let chunks = ui::screen_layout(
                        Rect::new(0, 0, size.width, size.height),
                        app.config.show_footer,
                    );
                    app.handle_mouse(mouse, chunks.keypad);
                }
                _ => {}
            }
        }

        app.tick();
    }
}
