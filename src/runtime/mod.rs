use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::clock::PlaybackClock;
use crate::visualizer::Visualizer;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    if let Err(e) = logging::init_logging(&settings.logging) {
        eprintln!("nada: logging disabled: {e}");
    }

    // Report a bad player configuration before the terminal is taken over.
    let mut clock = PlaybackClock::from_settings(&settings.player)?;
    let clock_events = clock.subscribe();

    let cli_catalog = env::args_os().nth(1).map(PathBuf::from);
    let (catalog, source) = startup::load_catalog(cli_catalog.as_deref(), &settings.catalog);

    let now = Instant::now();
    let mut app = startup::build_app(catalog, source, &settings, now);

    let mut rng = rand::rng();
    let mut visualizer = Visualizer::new(
        settings.ui.visualizer_bars,
        Duration::from_millis(settings.ui.visualizer_refresh_ms),
        now,
        &mut rng,
    );

    info!(
        title = %clock.state().title,
        duration = %clock.formatted_duration(),
        "starting"
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut clock,
            &clock_events,
            &mut visualizer,
            &mut rng,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
