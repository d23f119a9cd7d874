//! The `AppSession` model.

use time::OffsetDateTime;
use time::macros::format_description;

use crate::actions::{ActionExecutor, DispatchOutcome};
use crate::menu::{NavController, NavEvent};
use crate::player::{AudioBackend, Clock, PlayerModel, PlayerStatus};

/// A modal text overlay (informational messages and dispatch errors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub text: String,
}

/// Everything the UI renders and the event loop mutates. Constructed
/// once at startup and passed down explicitly; there is no global
/// application state.
pub struct AppSession<E, B, C> {
    pub nav: NavController,
    pub player: PlayerModel<B, C>,
    executor: E,
    /// Cursor over the visible menu rows (the back row included).
    pub selected: usize,
    /// Timestamped status line, e.g. `12:01:07 | Navigated back`.
    pub status: String,
    pub popup: Option<Popup>,
    volume_step: f32,
}

impl<E: ActionExecutor, B: AudioBackend, C: Clock> AppSession<E, B, C> {
    pub fn new(nav: NavController, player: PlayerModel<B, C>, executor: E) -> Self {
        let mut session = Self {
            nav,
            player,
            executor,
            selected: 0,
            status: String::new(),
            popup: None,
            volume_step: 0.05,
        };
        session.set_status("Ready | Select an option from the menu");
        session
    }

    pub fn with_volume_step(mut self, step: f32) -> Self {
        self.volume_step = step.max(0.01);
        self
    }

    /// Whether a synthetic "back" row is shown above the menu items.
    pub fn has_back_row(&self) -> bool {
        self.nav.depth() > 0
    }

    /// Number of selectable menu rows.
    pub fn row_count(&self) -> usize {
        self.nav.current_children().len() + usize::from(self.has_back_row())
    }

    pub fn move_up(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        self.selected = (self.selected + rows - 1) % rows;
    }

    pub fn move_down(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        self.selected = (self.selected + 1) % rows;
    }

    /// Activate the highlighted row: back, submenu, or leaf dispatch.
    pub fn activate_selected(&mut self) {
        if self.has_back_row() && self.selected == 0 {
            self.go_back();
            return;
        }

        let index = self.selected - usize::from(self.has_back_row());
        match self.nav.select(index, &mut self.executor) {
            Ok(NavEvent::Entered { name }) => {
                self.selected = 0;
                self.set_status(format!("Navigated to: {name}"));
            }
            Ok(NavEvent::Dispatched { name, outcome }) => match outcome {
                Ok(DispatchOutcome::Started(path)) => {
                    self.set_status(format!("Started: {}", path.display()));
                }
                Ok(DispatchOutcome::Opened(url)) => {
                    self.set_status(format!("Opened URL: {url}"));
                }
                Ok(DispatchOutcome::Shown(text)) => {
                    self.popup = Some(Popup { title: name, text });
                }
                Err(e) => {
                    self.popup = Some(Popup {
                        title: "Error".to_string(),
                        text: format!("Failed to execute {name}: {e}"),
                    });
                    self.set_status(format!("Error executing: {name}"));
                }
            },
            Err(e) => {
                // The UI only offers valid rows, so this is a defect.
                tracing::error!(error = %e, "menu selection rejected");
                debug_assert!(false, "menu selection rejected: {e}");
                self.set_status(format!("Internal error: {e}"));
            }
        }
    }

    pub fn go_back(&mut self) {
        if self.nav.go_back() {
            self.selected = 0;
            self.set_status("Navigated back");
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let was = self.player.status();
        match self.player.toggle_play_pause() {
            Ok(()) => {
                let msg = match (was, self.player.status()) {
                    (PlayerStatus::Playing, PlayerStatus::Paused) => "Music paused".to_string(),
                    (PlayerStatus::Paused, PlayerStatus::Playing) => "Music resumed".to_string(),
                    _ => match self.player.current_track() {
                        Some(track) => format!("Playing: {}", track.display),
                        None => "Playing".to_string(),
                    },
                };
                self.set_status(msg);
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn stop_playback(&mut self) {
        self.player.stop();
        self.set_status("Music stopped");
    }

    pub fn next_track(&mut self) {
        match self.player.next() {
            Ok(()) => {
                let name = self.current_track_name();
                self.set_status(format!("Next track: {name}"));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn prev_track(&mut self) {
        match self.player.prev() {
            Ok(()) => {
                let name = self.current_track_name();
                self.set_status(format!("Previous track: {name}"));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn volume_up(&mut self) {
        self.change_volume(self.volume_step);
    }

    pub fn volume_down(&mut self) {
        self.change_volume(-self.volume_step);
    }

    fn change_volume(&mut self, delta: f32) {
        self.player.set_volume(self.player.volume() + delta);
        let pct = (self.player.volume() * 100.0).round() as u8;
        self.set_status(format!("Volume: {pct}%"));
    }

    pub fn refresh_playlist(&mut self) {
        let count = self.player.refresh_playlist();
        self.set_status(format!("Playlist refreshed: {count} tracks"));
    }

    /// ~1 s host tick, forwarded to the player (auto-advance lives there).
    pub fn tick(&mut self) {
        self.player.tick();
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    /// Stamp `message` with the wall-clock time and make it the status line.
    pub fn set_status(&mut self, message: impl Into<String>) {
        let format = format_description!("[hour]:[minute]:[second]");
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let stamp = now.format(&format).unwrap_or_default();
        self.status = format!("{stamp} | {}", message.into());
    }

    fn current_track_name(&self) -> String {
        self.player
            .current_track()
            .map(|t| t.display.clone())
            .unwrap_or_default()
    }
}
