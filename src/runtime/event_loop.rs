use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Focus};
use crate::audio::{AudioEngine, AudioEvent};
use crate::config;
use crate::contact::{FormField, SubmitOutcome, Submitter};
use crate::ui::{self, HitMap, Page};

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Progress bar areas of the last drawn frame, for mouse seeking.
    pub hits: HitMap,
}

/// Main terminal event loop: drains engine and submission events, draws the
/// page and handles input. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    page: &Page,
    app: &mut App,
    engine: &AudioEngine,
    audio_rx: &mpsc::Receiver<AudioEvent>,
    submitter: &Submitter,
    submit_rx: &mpsc::Receiver<SubmitOutcome>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = audio_rx.try_recv() {
            app.route_audio_event(ev);
        }

        while let Ok(outcome) = submit_rx.try_recv() {
            app.on_submit_result(outcome);
        }

        terminal.draw(|f| state.hits = ui::draw(f, app, page))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, submitter) {
                        engine.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, &state.hits),
                _ => {}
            }
        }
    }
}

fn handle_mouse_event(mouse: MouseEvent, app: &mut App, hits: &HitMap) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some((id, fraction)) = hits.hit(mouse.column, mouse.row) else {
        return;
    };

    if let Some(idx) = app.players.iter().position(|p| p.id() == id) {
        app.selected = idx;
        app.focus = Focus::Playlist;
    }
    if let Some(panel) = app.player_mut(id).and_then(|p| p.audio_mut()) {
        panel.on_seek(fraction);
    }
}

/// Returns true when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    submitter: &Submitter,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.focus == Focus::Contact && !app.submitted {
        handle_form_key(key, settings, app, submitter);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('p') | KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(panel) = app.selected_player_mut().and_then(|p| p.audio_mut()) {
                panel.toggle_play();
            }
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            if let Some(panel) = app.selected_player_mut().and_then(|p| p.audio_mut()) {
                panel.scrub(secs);
            }
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            if let Some(panel) = app.selected_player_mut().and_then(|p| p.audio_mut()) {
                panel.scrub(-secs);
            }
        }
        KeyCode::Char(c @ '0'..='9') => {
            let fraction = f64::from(c.to_digit(10).unwrap_or(0)) / 10.0;
            if let Some(panel) = app.selected_player_mut().and_then(|p| p.audio_mut()) {
                panel.on_seek(fraction);
            }
        }
        _ => {}
    }

    false
}

fn handle_form_key(key: KeyEvent, settings: &config::Settings, app: &mut App, submitter: &Submitter) {
    match key.code {
        KeyCode::Esc => app.toggle_focus(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_contact_form(&settings.contact, submitter);
        }
        KeyCode::Tab | KeyCode::Down => app.contact.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.contact.focus_prev(),
        KeyCode::Enter => {
            if app.contact.focus == FormField::Send {
                app.submit_contact_form(&settings.contact, submitter);
            } else {
                app.contact.focus_next();
            }
        }
        KeyCode::Backspace => app.contact.pop_char(),
        KeyCode::Char(c) if !c.is_control() => app.contact.push_char(c),
        _ => {}
    }
}
