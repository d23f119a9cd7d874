use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::PlayerStatus;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

use super::Session;

/// Cadence of the periodic player refresh (progress + auto-advance).
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// When the player last received a tick.
    pub last_tick: Instant,
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlayerStatus,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `session`.
    pub fn new(session: &Session) -> Self {
        Self {
            last_tick: Instant::now(),
            last_mpris_index: None,
            last_mpris_playback: session.player.status(),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, the ~1 s player
/// tick and MPRIS sync. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if state.last_tick.elapsed() >= TICK_INTERVAL {
            session.tick();
            state.last_tick = Instant::now();
        }

        // Keep MPRIS in sync even when playback changes come from media keys
        // or auto-advance.
        let playback = session.player.status();
        let index = if playback == PlayerStatus::Stopped {
            None
        } else {
            Some(session.player.current_index())
        };
        if index != state.last_mpris_index || playback != state.last_mpris_playback {
            update_mpris(mpris, session);
            state.last_mpris_index = index;
            state.last_mpris_playback = playback;
        }

        terminal.draw(|f| ui::draw(f, session, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, session) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, session, control_tx) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one transport command. Returns `true` on quit.
fn handle_control_cmd(cmd: ControlCmd, session: &mut Session) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => match session.player.status() {
            PlayerStatus::Stopped | PlayerStatus::Paused => session.toggle_play_pause(),
            PlayerStatus::Playing => {}
        },
        ControlCmd::Pause => {
            if session.player.status() == PlayerStatus::Playing {
                session.toggle_play_pause();
            }
        }
        ControlCmd::PlayPause => session.toggle_play_pause(),
        ControlCmd::Stop => session.stop_playback(),
        ControlCmd::Next => session.next_track(),
        ControlCmd::Prev => session.prev_track(),
    }

    false
}

/// Apply one key press. Returns `true` on quit.
fn handle_key_event(
    key: KeyEvent,
    session: &mut Session,
    control_tx: &mpsc::Sender<ControlCmd>,
) -> bool {
    // A popup is modal: dismiss it before anything else happens.
    if session.popup.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => session.close_popup(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => session.move_down(),
        KeyCode::Char('k') | KeyCode::Up => session.move_up(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => session.activate_selected(),
        KeyCode::Char('h') | KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
            session.go_back();
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('x') => {
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Char(']') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('[') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => session.volume_up(),
        KeyCode::Char('-') => session.volume_down(),
        KeyCode::Char('R') => session.refresh_playlist(),
        _ => {}
    }

    false
}
