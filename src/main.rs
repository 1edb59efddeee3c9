use conceptviz::app::{App, AppMessage};
use conceptviz::cli::{parse_args, CliCommand};
use conceptviz::config::GeminiConfig;
use conceptviz::terminal::{setup_panic_hook, TerminalManager};
use conceptviz::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set up file-based logging.
///
/// The alternate screen owns stdout, so diagnostics go to a log file under
/// the platform data directory. Logging being unavailable is not fatal.
fn init_logging() {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("conceptviz");
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }

    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("conceptviz.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("conceptviz {}", VERSION);
            return Ok(());
        }
        CliCommand::RunTui => {}
    }

    init_logging();

    let config = GeminiConfig::from_env();
    if !config.has_api_key() {
        // Startup diagnostic only; each generation call fails fast with a
        // configuration error until the key is provided.
        tracing::warn!(
            "GEMINI_API_KEY is not set; generation requests will fail until it is configured"
        );
    }
    tracing::info!(model = %config.model, "starting conceptviz {}", VERSION);

    setup_panic_hook();
    let mut term_manager = TerminalManager::new()?;

    let mut app = App::new(config);
    let result = run_app(term_manager.terminal(), &mut app).await;

    drop(term_manager);
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    // Take the message receiver from the app (select! needs ownership).
    let mut message_rx: mpsc::UnboundedReceiver<AppMessage> = app.take_message_rx();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::render(frame, app))?;
            app.needs_redraw = false;
        }

        let tick = tokio::time::sleep(std::time::Duration::from_millis(80));

        tokio::select! {
            // Spinner animation while a request is in flight.
            _ = tick => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if app.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        app.mark_dirty();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "terminal event stream error");
                    }
                    None => return Ok(()),
                }
            }

            message = message_rx.recv() => {
                if let Some(message) = message {
                    app.handle_message(message);
                }
            }
        }
    }
}
