use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::PlayerSettings;

use super::error::ClockError;
use super::state::{TrackState, duration_from_secs_f64, format_mmss};
use super::tick::{MonotonicClock, RepeatingTick, TimeSource};

/// Notifications published to subscribers after the clock changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    Started,
    Paused,
    Position { position_secs: u64, duration_secs: u64 },
    /// The track ran to its end; the clock reset to 0 and went idle.
    Finished,
    TrackChanged { title: String, artist: String },
}

/// Result of a single `tick()`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock was not advancing; nothing changed.
    Idle,
    Advanced,
    Finished,
}

/// Owns the current `TrackState` and the repeating tick that advances it.
///
/// Two states: idle (no tick handle) and advancing (exactly one handle).
/// Every transition goes through `start_tick`/`stop_tick` so the flag and
/// the handle never disagree.
pub struct PlaybackClock<T: TimeSource = MonotonicClock> {
    state: TrackState,
    period: Duration,
    ticker: Option<RepeatingTick>,
    time: T,
    subscribers: Vec<Sender<ClockEvent>>,
}

impl PlaybackClock<MonotonicClock> {
    pub fn new(track: TrackState, period: Duration) -> Result<Self, ClockError> {
        Self::with_time_source(track, period, MonotonicClock)
    }

    /// Build the placeholder track described by `settings`, validating the
    /// configured duration and tick period.
    pub fn from_settings(settings: &PlayerSettings) -> Result<Self, ClockError> {
        let duration_secs = duration_from_secs_f64(settings.duration_secs)?;
        let track = TrackState::new(
            settings.default_title.as_str(),
            settings.default_artist.as_str(),
            duration_secs,
        );
        Self::new(track, Duration::from_millis(settings.tick_ms))
    }
}

impl<T: TimeSource> PlaybackClock<T> {
    pub fn with_time_source(
        mut track: TrackState,
        period: Duration,
        time: T,
    ) -> Result<Self, ClockError> {
        if period.is_zero() {
            return Err(ClockError::ZeroTickPeriod);
        }
        track.position_secs = track.position_secs.min(track.duration_secs);

        let mut clock = Self {
            state: track,
            period,
            ticker: None,
            time,
            subscribers: Vec::new(),
        };
        if clock.state.is_advancing {
            clock.start_tick();
        }
        Ok(clock)
    }

    /// Register a new listener. Dropped receivers are pruned on the next event.
    pub fn subscribe(&mut self) -> Receiver<ClockEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn is_advancing(&self) -> bool {
        self.state.is_advancing
    }

    pub fn position_secs(&self) -> u64 {
        self.state.position_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.state.duration_secs
    }

    pub fn formatted_position(&self) -> String {
        format_mmss(self.state.position_secs)
    }

    pub fn formatted_duration(&self) -> String {
        format_mmss(self.state.duration_secs)
    }

    pub fn position_percent(&self) -> f64 {
        self.state.percent()
    }

    /// Time until the next tick is due, or `None` while idle.
    pub fn until_next_tick(&self) -> Option<Duration> {
        let now = self.time.now();
        self.ticker.as_ref().map(|t| t.until_due(now))
    }

    /// Play/pause.
    pub fn toggle(&mut self) {
        if self.state.is_advancing {
            self.stop_tick();
            info!(position = self.state.position_secs, "playback paused");
            self.emit(ClockEvent::Paused);
        } else {
            self.start_tick();
            info!(position = self.state.position_secs, "playback started");
            self.emit(ClockEvent::Started);
        }
    }

    /// Advance the position by one second. At the end of the track the
    /// position wraps to 0 and the clock goes idle; there is no next track.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_advancing {
            return TickOutcome::Idle;
        }

        self.state.position_secs = self.state.position_secs.saturating_add(1);
        let outcome = if self.state.position_secs >= self.state.duration_secs {
            self.state.position_secs = 0;
            self.stop_tick();
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        };

        debug!(position = self.state.position_secs, "tick");
        self.emit_position();
        if outcome == TickOutcome::Finished {
            info!(title = %self.state.title, "reached end of track");
            self.emit(ClockEvent::Finished);
        }
        outcome
    }

    /// Run every tick that has come due since the last call, in order.
    /// Returns how many ticks fired.
    pub fn poll(&mut self) -> usize {
        let now = self.time.now();
        let mut fired = 0;
        while self.ticker.as_mut().is_some_and(|t| t.fire_if_due(now)) {
            self.tick();
            fired += 1;
        }
        fired
    }

    /// Jump to `fraction` of the track. Out-of-range fractions are clamped to
    /// `[0, 1]`; NaN is ignored. While advancing the tick restarts so the next
    /// increment lands a full period after the jump.
    pub fn seek(&mut self, fraction: f64) {
        if fraction.is_nan() {
            warn!("ignoring seek to NaN");
            return;
        }

        let fraction = fraction.clamp(0.0, 1.0);
        let target = (fraction * self.state.duration_secs as f64).floor() as u64;
        debug!(fraction, target, "seek");
        self.jump_to(target);
    }

    /// Move `delta_secs` forwards or backwards, clamped to the track.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let target = self.state.position_secs.saturating_add_signed(delta_secs);
        debug!(delta_secs, target, "scrub");
        self.jump_to(target);
    }

    fn jump_to(&mut self, target_secs: u64) {
        self.state.position_secs = target_secs.min(self.state.duration_secs);
        if self.state.is_advancing {
            self.stop_tick();
            self.start_tick();
        }
        self.emit_position();
    }

    /// Make `title` by `artist` the current track and start it from 0.
    pub fn select_track(&mut self, title: impl Into<String>, artist: impl Into<String>) {
        self.state.title = title.into();
        self.state.artist = artist.into();
        self.state.position_secs = 0;
        self.start_tick();

        info!(title = %self.state.title, artist = %self.state.artist, "track selected");
        self.emit(ClockEvent::TrackChanged {
            title: self.state.title.clone(),
            artist: self.state.artist.clone(),
        });
        self.emit_position();
    }

    // Replacing the handle drops any previous schedule first.
    fn start_tick(&mut self) {
        self.ticker = Some(RepeatingTick::start(self.time.now(), self.period));
        self.state.is_advancing = true;
    }

    fn stop_tick(&mut self) {
        self.ticker = None;
        self.state.is_advancing = false;
    }

    fn emit_position(&mut self) {
        self.emit(ClockEvent::Position {
            position_secs: self.state.position_secs,
            duration_secs: self.state.duration_secs,
        });
    }

    fn emit(&mut self, event: ClockEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
