use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::debug;

use crate::app::{Activation, App, InputMode};
use crate::clock::{ClockEvent, PlaybackClock, TimeSource};
use crate::config;
use crate::ui;
use crate::visualizer::Visualizer;

/// Upper bound on how long the loop sleeps waiting for input.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Something visible changed since the last draw.
    pub dirty: bool,
    /// Terminal area of the last draw; used to hit-test mouse clicks.
    pub last_area: Rect,
    /// Whether the last draw showed the fade-in.
    pub was_loading: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            dirty: true,
            last_area: Rect::default(),
            was_loading: false,
        }
    }
}

/// Main terminal event loop: drives the playback clock and visualizer,
/// draws the page and dispatches input. Returns `Ok(())` when the user quits.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    clock: &mut PlaybackClock,
    clock_events: &Receiver<ClockEvent>,
    visualizer: &mut Visualizer,
    rng: &mut impl Rng,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        clock.poll();
        for ev in clock_events.try_iter() {
            debug!(event = ?ev, "clock");
            state.dirty = true;
        }

        let now = Instant::now();
        if visualizer.poll(now, clock.is_advancing(), rng) {
            state.dirty = true;
        }
        let loading = app.is_loading(now);
        if loading != state.was_loading {
            state.was_loading = loading;
            state.dirty = true;
        }

        if state.dirty {
            let completed = terminal.draw(|f| {
                ui::draw(
                    f,
                    app,
                    clock,
                    visualizer,
                    &settings.ui,
                    &settings.controls,
                    now,
                )
            })?;
            state.last_area = completed.area;
            state.dirty = false;
        }

        let mut timeout = POLL_INTERVAL.min(visualizer.until_refresh(now));
        if let Some(until_tick) = clock.until_next_tick() {
            timeout = timeout.min(until_tick);
        }

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    state.dirty = true;
                    if handle_key_event(key, settings, app, clock) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    if handle_mouse_event(mouse, app, clock, state.last_area) {
                        state.dirty = true;
                    }
                }
                Event::Resize(..) => state.dirty = true,
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub fn handle_key_event<T: TimeSource>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    clock: &mut PlaybackClock<T>,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // Notices behave like alerts: any key closes them and does nothing else.
    if app.notice.is_some() {
        app.dismiss_notice();
        return false;
    }

    if app.input_mode != InputMode::Browse {
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.pop_input_char(),
            KeyCode::Enter => app.submit_input(),
            KeyCode::Char(c)
                if !c.is_control()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                app.push_input_char(c)
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.next_section(),
        KeyCode::BackTab => app.prev_section(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            if let Activation::Play(song) = app.activate() {
                clock.select_track(song.title, song.artist);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => clock.toggle(),
        KeyCode::Char(d @ '0'..='9') => {
            let tenths = d.to_digit(10).unwrap_or(0);
            clock.seek(f64::from(tenths) / 10.0);
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            clock.seek_by(secs);
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            clock.seek_by(-secs);
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume_up(settings.controls.volume_step),
        KeyCode::Char('-') => app.volume_down(settings.controls.volume_step),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('n') => app.begin_newsletter(),
        _ => {}
    }

    false
}

/// Left clicks on a nav tab jump to that section; on the progress bar they
/// seek to the clicked position. Returns `true` when the click changed something.
pub fn handle_mouse_event<T: TimeSource>(
    mouse: MouseEvent,
    app: &mut App,
    clock: &mut PlaybackClock<T>,
    area: Rect,
) -> bool {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return false;
    }
    if app.notice.is_some() || app.input_mode != InputMode::Browse {
        return false;
    }

    let areas = ui::page_layout(area);
    if let Some(section) = ui::nav_hit(areas.nav, mouse.column, mouse.row) {
        app.jump_to(section);
        return true;
    }

    let track = ui::progress_track(areas.progress);
    match ui::seek_fraction(track, mouse.column, mouse.row) {
        Some(fraction) => {
            clock.seek(fraction);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Section};
    use crate::clock::{ManualTime, TrackState};

    fn setup() -> (App, PlaybackClock<ManualTime>, config::Settings) {
        let track = TrackState::new("Song Title", "Artist Name", 200);
        let clock =
            PlaybackClock::with_time_source(track, Duration::from_secs(1), ManualTime::new())
                .unwrap();
        (App::new(Catalog::builtin()), clock, config::Settings::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn space_toggles_playback_and_q_quits() {
        let (mut app, mut clock, settings) = setup();
        assert!(!handle_key_event(press(KeyCode::Char(' ')), &settings, &mut app, &mut clock));
        assert!(clock.is_advancing());
        assert!(!handle_key_event(press(KeyCode::Char('p')), &settings, &mut app, &mut clock));
        assert!(!clock.is_advancing());
        assert!(handle_key_event(press(KeyCode::Char('q')), &settings, &mut app, &mut clock));
    }

    #[test]
    fn enter_on_a_song_card_selects_it() {
        let (mut app, mut clock, settings) = setup();
        clock.seek(0.5);
        handle_key_event(press(KeyCode::Char('j')), &settings, &mut app, &mut clock);
        handle_key_event(press(KeyCode::Enter), &settings, &mut app, &mut clock);

        let expected = &app.catalog.trending[1];
        assert_eq!(clock.state().title, expected.title);
        assert_eq!(clock.state().artist, expected.artist);
        assert_eq!(clock.position_secs(), 0);
        assert!(clock.is_advancing());
    }

    #[test]
    fn enter_on_a_genre_leaves_playback_alone() {
        let (mut app, mut clock, settings) = setup();
        handle_key_event(press(KeyCode::Tab), &settings, &mut app, &mut clock);
        assert_eq!(app.section, Section::Genres);
        handle_key_event(press(KeyCode::Enter), &settings, &mut app, &mut clock);
        assert!(app.notice.is_some());
        assert!(!clock.is_advancing());

        // The next key only closes the notice.
        handle_key_event(press(KeyCode::Char(' ')), &settings, &mut app, &mut clock);
        assert!(app.notice.is_none());
        assert!(!clock.is_advancing());
    }

    #[test]
    fn digits_and_scrub_keys_seek() {
        let (mut app, mut clock, settings) = setup();
        handle_key_event(press(KeyCode::Char('5')), &settings, &mut app, &mut clock);
        assert_eq!(clock.position_secs(), 100);
        handle_key_event(press(KeyCode::Char('L')), &settings, &mut app, &mut clock);
        assert_eq!(clock.position_secs(), 105);
        handle_key_event(press(KeyCode::Char('H')), &settings, &mut app, &mut clock);
        handle_key_event(press(KeyCode::Char('H')), &settings, &mut app, &mut clock);
        assert_eq!(clock.position_secs(), 95);
        handle_key_event(press(KeyCode::Char('0')), &settings, &mut app, &mut clock);
        assert_eq!(clock.position_secs(), 0);
    }

    #[test]
    fn typing_in_a_form_does_not_trigger_shortcuts() {
        let (mut app, mut clock, settings) = setup();
        handle_key_event(press(KeyCode::Char('/')), &settings, &mut app, &mut clock);
        for c in "q p".chars() {
            assert!(!handle_key_event(press(KeyCode::Char(c)), &settings, &mut app, &mut clock));
        }
        assert_eq!(app.input, "q p");
        assert!(!clock.is_advancing());

        handle_key_event(press(KeyCode::Esc), &settings, &mut app, &mut clock);
        assert_eq!(app.input_mode, InputMode::Browse);
    }

    #[test]
    fn modified_keys_do_not_type_into_a_form() {
        let (mut app, mut clock, settings) = setup();
        handle_key_event(press(KeyCode::Char('n')), &settings, &mut app, &mut clock);
        handle_key_event(press(KeyCode::Char('a')), &settings, &mut app, &mut clock);

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        handle_key_event(ctrl_u, &settings, &mut app, &mut clock);
        handle_key_event(alt_x, &settings, &mut app, &mut clock);
        assert_eq!(app.input, "a");

        let shifted = KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT);
        handle_key_event(shifted, &settings, &mut app, &mut clock);
        assert_eq!(app.input, "aB");
    }

    #[test]
    fn clicking_the_progress_bar_seeks() {
        let (mut app, mut clock, _) = setup();
        let area = Rect::new(0, 0, 102, 40);
        let track = ui::progress_track(ui::page_layout(area).progress);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: track.x + 25,
            row: track.y,
            modifiers: KeyModifiers::NONE,
        };
        assert!(handle_mouse_event(click, &mut app, &mut clock, area));
        assert_eq!(clock.position_secs(), 50);

        let elsewhere = MouseEvent { row: 0, ..click };
        assert!(!handle_mouse_event(elsewhere, &mut app, &mut clock, area));
        assert_eq!(clock.position_secs(), 50);
    }

    #[test]
    fn clicking_a_nav_tab_jumps_to_its_section() {
        let (mut app, mut clock, _) = setup();
        let area = Rect::new(0, 0, 80, 40);
        let nav = ui::page_layout(area).nav;

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 13,
            row: nav.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        assert!(handle_mouse_event(click, &mut app, &mut clock, area));
        assert_eq!(app.section, Section::Genres);
    }
}
