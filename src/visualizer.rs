//! Decorative bar visualizer.
//!
//! Bars get random heights on a fixed cadence while the player is advancing
//! and freeze while it is idle. The heights mean nothing; there is no audio.

use std::ops::Range;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::clock::RepeatingTick;

/// Heights each bar can take.
pub const BAR_HEIGHTS: Range<u64> = 5..25;

pub struct Visualizer {
    bars: Vec<u64>,
    refresh: RepeatingTick,
}

impl Visualizer {
    pub fn new(count: usize, refresh_every: Duration, now: Instant, rng: &mut impl Rng) -> Self {
        let mut visualizer = Self {
            bars: vec![BAR_HEIGHTS.start; count],
            refresh: RepeatingTick::start(now, refresh_every),
        };
        visualizer.reroll(rng);
        visualizer
    }

    pub fn bars(&self) -> &[u64] {
        &self.bars
    }

    /// Give every bar a fresh random height.
    pub fn reroll(&mut self, rng: &mut impl Rng) {
        for bar in &mut self.bars {
            *bar = rng.random_range(BAR_HEIGHTS);
        }
    }

    /// Consume due refreshes; re-roll once if any were due and `playing`.
    /// Returns whether the bars changed.
    pub fn poll(&mut self, now: Instant, playing: bool, rng: &mut impl Rng) -> bool {
        let mut due = false;
        while self.refresh.fire_if_due(now) {
            due = true;
        }
        if due && playing {
            self.reroll(rng);
            return true;
        }
        false
    }

    pub fn until_refresh(&self, now: Instant) -> Duration {
        self.refresh.until_due(now)
    }
}
