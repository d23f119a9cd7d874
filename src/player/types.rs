//! Small player types: transport status, errors, clock and formatting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Transport state of the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no tracks in playlist")]
    NoTracks,
    #[error("audio output unavailable")]
    AudioUnavailable,
    #[error("track index {index} out of range ({len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot play {path}: {message}")]
    Playback { path: PathBuf, message: String },
}

/// Monotonic time source, injectable so tests can drive elapsed time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock monotonic time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Display values polled by the host once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// One-line summary, e.g. `Playing: track.mp3`.
    pub line: String,
    /// Elapsed time as `MM:SS`.
    pub elapsed: String,
    /// Track duration as `MM:SS`.
    pub total: String,
    /// Progress percent in `[0, 100]`.
    pub progress: u8,
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
