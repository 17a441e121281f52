use super::error::ClockError;

/// The currently selected song and how far into it the clock is.
///
/// `position_secs` never exceeds `duration_secs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackState {
    pub title: String,
    pub artist: String,
    pub duration_secs: u64,
    pub position_secs: u64,
    pub is_advancing: bool,
}

impl TrackState {
    /// A fresh, idle track positioned at the start.
    pub fn new(title: impl Into<String>, artist: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            duration_secs,
            position_secs: 0,
            is_advancing: false,
        }
    }

    /// Position as a percentage of the duration (0 for empty tracks).
    pub fn percent(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.position_secs as f64 / self.duration_secs as f64 * 100.0
    }
}

/// Format whole seconds as `m:ss`.
pub fn format_mmss(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Validate a configured duration and convert it to whole seconds.
pub fn duration_from_secs_f64(secs: f64) -> Result<u64, ClockError> {
    if !secs.is_finite() {
        return Err(ClockError::NonFiniteDuration(secs));
    }
    if secs < 0.0 {
        return Err(ClockError::NegativeDuration(secs));
    }
    if secs.fract() != 0.0 {
        return Err(ClockError::FractionalDuration(secs));
    }
    // `u64::MAX as f64` rounds up to 2^64, which is itself out of range.
    if secs >= u64::MAX as f64 {
        return Err(ClockError::DurationTooLong(secs));
    }
    Ok(secs as u64)
}
