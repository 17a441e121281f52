use thiserror::Error;

/// Construction-time errors for the playback clock.
#[derive(Debug, Error, PartialEq)]
pub enum ClockError {
    #[error("track duration must be finite, got {0}")]
    NonFiniteDuration(f64),
    #[error("track duration must not be negative, got {0}")]
    NegativeDuration(f64),
    #[error("track duration must be a whole number of seconds, got {0}")]
    FractionalDuration(f64),
    #[error("track duration is too long, got {0}")]
    DurationTooLong(f64),
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,
}
