//! Simulated playback clock.
//!
//! `PlaybackClock` owns the state of the currently selected song and the one
//! repeating tick that moves its position forward while it is advancing.
//! Nothing here touches audio; the clock only counts seconds.

mod error;
mod player;
mod state;
mod tick;

pub use player::{ClockEvent, PlaybackClock};
pub use state::{duration_from_secs_f64, format_mmss};
pub use tick::{RepeatingTick, TimeSource};

#[cfg(test)]
pub use state::TrackState;
#[cfg(test)]
pub use tick::ManualTime;
