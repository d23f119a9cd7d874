use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config;

use super::Session;

/// Set up file-based logging. The terminal belongs to the TUI, so log
/// lines go to `<base_dir>/flashdeck.log` (or the configured path); if
/// the file cannot be opened, logging is simply disabled.
pub fn init_logging(settings: &config::Settings) {
    let path = settings.log.file(&settings.paths.base_dir);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log.filter.clone()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Apply player defaults from settings once the session exists.
pub fn apply_player_defaults(session: &mut Session, settings: &config::Settings) {
    session.player.set_volume(settings.player.volume);
    tracing::info!(
        tracks = session.player.track_count(),
        audio = session.player.audio_available(),
        "startup complete"
    );
}
