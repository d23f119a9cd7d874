//! Audio output collaborator.
//!
//! `RodioBackend` is the production implementation: one output stream
//! for the process, a fresh `Sink` per track. Every call returns fast;
//! the transport model treats pause/resume/stop/set_volume as
//! best-effort and may discard their results.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, StreamError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no active sink")]
    NoSink,
}

/// The single shared audio device, seen from the player model.
pub trait AudioBackend {
    /// Replace whatever is playing with `path` and start it.
    fn load_and_play(&mut self, path: &Path) -> Result<(), BackendError>;
    fn pause(&mut self) -> Result<(), BackendError>;
    fn resume(&mut self) -> Result<(), BackendError>;
    fn stop(&mut self) -> Result<(), BackendError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), BackendError>;
    /// Best-effort track length; `None` when the file cannot be probed.
    fn probe_duration(&self, path: &Path) -> Option<Duration>;
}

pub struct RodioBackend {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioBackend {
    /// Open the default output device. Failure disables playback but is
    /// not fatal to the application.
    pub fn open() -> Result<Self, StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn load_and_play(&mut self, path: &Path) -> Result<(), BackendError> {
        let file = File::open(path).map_err(|source| BackendError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| BackendError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.set_volume(self.volume);
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), BackendError> {
        let sink = self.sink.as_ref().ok_or(BackendError::NoSink)?;
        sink.pause();
        Ok(())
    }

    fn resume(&mut self) -> Result<(), BackendError> {
        let sink = self.sink.as_ref().ok_or(BackendError::NoSink)?;
        sink.play();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), BackendError> {
        let sink = self.sink.take().ok_or(BackendError::NoSink)?;
        sink.stop();
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), BackendError> {
        // Remember the level so the next sink starts at it too.
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
        Ok(())
    }

    fn probe_duration(&self, path: &Path) -> Option<Duration> {
        lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration())
    }
}
