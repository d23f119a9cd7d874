use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to launch {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open {url}: {source}")]
    OpenUrl {
        url: String,
        #[source]
        source: io::Error,
    },
}

/// What a successful dispatch did, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A child process was started (absolute path of the launched file).
    Started(PathBuf),
    /// A URL was handed to the platform handler.
    Opened(String),
    /// Informational text for the host to display.
    Shown(String),
}

/// Collaborator that performs the I/O behind leaf menu items.
///
/// All launches are fire-and-forget: the implementation must return
/// promptly and never await child completion.
pub trait ActionExecutor {
    fn run_script(&mut self, path: &Path) -> Result<DispatchOutcome, ActionError>;
    fn run_executable(&mut self, path: &Path) -> Result<DispatchOutcome, ActionError>;
    fn open_url(&mut self, url: &str) -> Result<DispatchOutcome, ActionError>;
    /// Purely informational; always succeeds.
    fn show_message(&mut self, text: &str) -> DispatchOutcome;
}

/// Production executor: `std::process` for launches, the `open` crate
/// for URLs. Relative action paths are resolved against `base_dir`.
pub struct SystemExecutor {
    base_dir: PathBuf,
}

impl SystemExecutor {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve `path` against the base directory and require it to exist.
    fn resolve(&self, path: &Path) -> Result<PathBuf, ActionError> {
        let full = self.base_dir.join(path);
        if full.is_file() {
            Ok(full)
        } else {
            Err(ActionError::FileNotFound(full))
        }
    }

    fn spawn(&self, mut command: Command, full: PathBuf) -> Result<DispatchOutcome, ActionError> {
        if let Some(parent) = full.parent() {
            command.current_dir(parent);
        }
        // Detach from the TUI's terminal; the child keeps running after we drop it.
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        match command.spawn() {
            Ok(child) => {
                tracing::info!(path = %full.display(), pid = child.id(), "launched");
                Ok(DispatchOutcome::Started(full))
            }
            Err(source) => Err(ActionError::Launch { path: full, source }),
        }
    }
}

impl ActionExecutor for SystemExecutor {
    fn run_script(&mut self, path: &Path) -> Result<DispatchOutcome, ActionError> {
        let full = self.resolve(path)?;
        let mut command = Command::new("sh");
        command.arg(&full);
        self.spawn(command, full)
    }

    fn run_executable(&mut self, path: &Path) -> Result<DispatchOutcome, ActionError> {
        let full = self.resolve(path)?;
        let command = Command::new(&full);
        self.spawn(command, full)
    }

    fn open_url(&mut self, url: &str) -> Result<DispatchOutcome, ActionError> {
        match open::that_detached(url) {
            Ok(()) => {
                tracing::info!(%url, "opened URL");
                Ok(DispatchOutcome::Opened(url.to_string()))
            }
            Err(source) => Err(ActionError::OpenUrl {
                url: url.to_string(),
                source,
            }),
        }
    }

    fn show_message(&mut self, text: &str) -> DispatchOutcome {
        DispatchOutcome::Shown(text.to_string())
    }
}
