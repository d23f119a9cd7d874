//! The transport state machine.
//!
//! Elapsed time is derived from a wall-clock anchor: playing measures
//! `now - anchor`, pausing freezes the measured value and resuming moves
//! the anchor back so the measurement continues seamlessly.

use std::path::PathBuf;
use std::time::Duration;

use super::backend::AudioBackend;
use super::playlist::{Track, scan_music_dir};
use super::types::{Clock, PlayerError, PlayerStatus, StatusSnapshot, format_mmss};

/// Auto-advance fires just short of 100% as a tolerance for imprecise
/// duration estimates (the fallback duration in particular).
const AUTO_ADVANCE_PCT: u8 = 99;

pub struct PlayerModel<B, C> {
    backend: Option<B>,
    clock: C,
    music_dir: PathBuf,
    playlist: Vec<Track>,
    current: usize,
    status: PlayerStatus,
    anchor: Option<std::time::Instant>,
    paused_elapsed: Duration,
    duration: Duration,
    fallback_duration: Duration,
    volume: f32,
}

impl<B: AudioBackend, C: Clock> PlayerModel<B, C> {
    /// Create a player bound to `music_dir` and scan it once. `backend`
    /// is `None` when no audio device could be opened; transport
    /// operations then fail with [`PlayerError::AudioUnavailable`] while
    /// the rest of the application stays usable.
    pub fn new(
        backend: Option<B>,
        clock: C,
        music_dir: impl Into<PathBuf>,
        fallback_duration: Duration,
    ) -> Self {
        let mut player = Self {
            backend,
            clock,
            music_dir: music_dir.into(),
            playlist: Vec::new(),
            current: 0,
            status: PlayerStatus::Stopped,
            anchor: None,
            paused_elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            fallback_duration,
            volume: 1.0,
        };
        player.refresh_playlist();
        player
    }

    /// Rescan the music directory and reset the cursor to the first
    /// track. Playback is stopped first so the index reset can never
    /// disagree with what the device is playing.
    pub fn refresh_playlist(&mut self) -> usize {
        if self.status != PlayerStatus::Stopped {
            self.stop();
        }
        self.playlist = scan_music_dir(&self.music_dir);
        self.current = 0;
        tracing::info!(tracks = self.playlist.len(), dir = %self.music_dir.display(), "playlist refreshed");
        self.playlist.len()
    }

    /// Start the track at `index`, or at the current cursor when `None`.
    pub fn play(&mut self, index: Option<usize>) -> Result<(), PlayerError> {
        if self.playlist.is_empty() {
            return Err(PlayerError::NoTracks);
        }
        let Some(backend) = self.backend.as_mut() else {
            return Err(PlayerError::AudioUnavailable);
        };

        if let Some(index) = index {
            if index >= self.playlist.len() {
                return Err(PlayerError::IndexOutOfRange {
                    index,
                    len: self.playlist.len(),
                });
            }
            self.current = index;
        }

        let track = &self.playlist[self.current];
        if let Err(e) = backend.load_and_play(&track.path) {
            // Status is deliberately left as-is; a failed load must not
            // pretend to be playing.
            return Err(PlayerError::Playback {
                path: track.path.clone(),
                message: e.to_string(),
            });
        }

        self.duration = backend
            .probe_duration(&track.path)
            .filter(|d| !d.is_zero())
            .unwrap_or(self.fallback_duration);
        self.status = PlayerStatus::Playing;
        self.anchor = Some(self.clock.now());
        self.paused_elapsed = Duration::ZERO;
        tracing::info!(track = %track.display, duration_secs = self.duration.as_secs(), "playing");
        Ok(())
    }

    /// Freeze playback. No-op unless currently playing.
    pub fn pause(&mut self) {
        if self.status != PlayerStatus::Playing {
            return;
        }
        self.paused_elapsed = self.elapsed();
        self.status = PlayerStatus::Paused;
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.pause() {
                tracing::debug!(error = %e, "backend pause ignored");
            }
        }
    }

    /// Continue after a pause. No-op unless currently paused.
    pub fn resume(&mut self) {
        if self.status != PlayerStatus::Paused {
            return;
        }
        // Shift the anchor so elapsed picks up where the pause left it.
        self.anchor = Some(self.clock.now() - self.paused_elapsed);
        self.status = PlayerStatus::Playing;
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.resume() {
                tracing::debug!(error = %e, "backend resume ignored");
            }
        }
    }

    /// Stop unconditionally; elapsed resets to zero.
    pub fn stop(&mut self) {
        self.status = PlayerStatus::Stopped;
        self.anchor = None;
        self.paused_elapsed = Duration::ZERO;
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.stop() {
                tracing::debug!(error = %e, "backend stop ignored");
            }
        }
    }

    /// Advance to the next track (wrapping) and play it.
    pub fn next(&mut self) -> Result<(), PlayerError> {
        if self.playlist.is_empty() {
            return Err(PlayerError::NoTracks);
        }
        self.current = (self.current + 1) % self.playlist.len();
        self.play(None)
    }

    /// Step back to the previous track (wrapping) and play it.
    pub fn prev(&mut self) -> Result<(), PlayerError> {
        if self.playlist.is_empty() {
            return Err(PlayerError::NoTracks);
        }
        self.current = (self.current + self.playlist.len() - 1) % self.playlist.len();
        self.play(None)
    }

    /// One transport button: play when stopped, pause when playing,
    /// resume when paused.
    pub fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        match self.status {
            PlayerStatus::Stopped => self.play(None),
            PlayerStatus::Playing => {
                self.pause();
                Ok(())
            }
            PlayerStatus::Paused => {
                self.resume();
                Ok(())
            }
        }
    }

    /// Store `volume` clamped to `[0, 1]` and forward it best-effort.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.set_volume(self.volume) {
                tracing::debug!(error = %e, "backend set_volume ignored");
            }
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Seconds into the current track: zero when stopped, frozen while
    /// paused, wall-clock delta while playing.
    pub fn elapsed(&self) -> Duration {
        match self.status {
            PlayerStatus::Stopped => Duration::ZERO,
            PlayerStatus::Paused => self.paused_elapsed,
            PlayerStatus::Playing => match self.anchor {
                Some(anchor) => self.clock.now().saturating_duration_since(anchor),
                None => Duration::ZERO,
            },
        }
    }

    /// Progress percent in `[0, 100]`.
    pub fn progress(&self) -> u8 {
        if self.duration.is_zero() {
            return 0;
        }
        let pct = (self.elapsed().as_secs_f64() / self.duration.as_secs_f64() * 100.0).floor();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Periodic (~1 s) host callback: fires auto-advance when the track
    /// is effectively over.
    pub fn tick(&mut self) {
        if self.status == PlayerStatus::Playing
            && self.backend.is_some()
            && self.progress() >= AUTO_ADVANCE_PCT
        {
            if let Err(e) = self.next() {
                tracing::warn!(error = %e, "auto-advance failed");
            }
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn audio_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn track_count(&self) -> usize {
        self.playlist.len()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current)
    }

    /// Display tuple for the host's periodic refresh.
    pub fn snapshot(&self) -> StatusSnapshot {
        let Some(track) = self.current_track() else {
            return StatusSnapshot {
                line: "No tracks in playlist".to_string(),
                elapsed: format_mmss(Duration::ZERO),
                total: format_mmss(Duration::ZERO),
                progress: 0,
            };
        };

        let line = if !self.audio_available() {
            "Audio unavailable".to_string()
        } else {
            let state = match self.status {
                PlayerStatus::Stopped => "Stopped",
                PlayerStatus::Playing => "Playing",
                PlayerStatus::Paused => "Paused",
            };
            format!("{state}: {}", track.display)
        };

        StatusSnapshot {
            line,
            elapsed: format_mmss(self.elapsed()),
            total: format_mmss(self.duration),
            progress: self.progress(),
        }
    }
}
