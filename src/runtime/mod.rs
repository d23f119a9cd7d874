use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::actions::SystemExecutor;
use crate::app::AppSession;
use crate::menu::{NavController, main_menu};
use crate::mpris::ControlCmd;
use crate::player::{PlayerModel, RodioBackend, SystemClock};

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

/// The concrete session type wired up at startup.
pub type Session = AppSession<SystemExecutor, RodioBackend, SystemClock>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    startup::init_logging(&settings);

    let backend = match RodioBackend::open() {
        Ok(backend) => Some(backend),
        Err(e) => {
            // Playback becomes unavailable; the launcher itself stays usable.
            tracing::warn!(error = %e, "no audio output device, playback disabled");
            None
        }
    };

    let player = PlayerModel::new(
        backend,
        SystemClock,
        settings.paths.music_dir(),
        Duration::from_secs(settings.player.fallback_duration_secs),
    );
    let nav = NavController::new(main_menu());
    let executor = SystemExecutor::new(settings.paths.base_dir.clone());

    let mut session =
        AppSession::new(nav, player, executor).with_volume_step(settings.player.volume_step);
    startup::apply_player_defaults(&mut session, &settings);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &session);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&session);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut session,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
