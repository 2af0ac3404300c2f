use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioEngine;
use crate::contact::{FormTransport, HttpTransport, Submitter};
use crate::ui::Page;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let log_path = logging::init_logging(&settings.logging);

    let site_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::info!(
        site = %site_dir.display(),
        log = ?log_path,
        endpoint = %settings.contact.endpoint,
        "starting bandstand"
    );

    let (engine, audio_rx) = AudioEngine::new(settings.audio.clone());
    let mut app = startup::build_app(&settings, &site_dir, &engine)?;
    let page = Page::from_settings(&settings, &settings.site.hero_image);

    let transport: Arc<dyn FormTransport> = Arc::new(HttpTransport::new());
    let (submitter, submit_rx) = Submitter::new(transport, settings.contact.endpoint.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();

        event_loop::run(
            &mut terminal,
            &settings,
            &page,
            &mut app,
            &engine,
            &audio_rx,
            &submitter,
            &submit_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("bye");

    run_result
}
