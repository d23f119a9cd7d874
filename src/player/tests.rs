use super::*;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tempfile::{TempDir, tempdir};

/// Test clock advanced by hand.
#[derive(Clone)]
struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    fn start() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    fn advance(&self, d: Duration) {
        self.0.set(self.0.get() + d);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

/// Call log shared between a [`FakeBackend`] and the test body.
#[derive(Default, Clone)]
struct BackendLog {
    played: Rc<RefCell<Vec<PathBuf>>>,
    volumes: Rc<RefCell<Vec<f32>>>,
    stops: Rc<Cell<usize>>,
}

/// Records every call; optionally fails loads and reports a fixed duration.
#[derive(Default)]
struct FakeBackend {
    log: BackendLog,
    fail_loads: bool,
    probe: Option<Duration>,
}

impl AudioBackend for FakeBackend {
    fn load_and_play(&mut self, path: &Path) -> Result<(), BackendError> {
        if self.fail_loads {
            return Err(BackendError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::other("simulated device error"),
            });
        }
        self.log.played.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn pause(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn resume(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), BackendError> {
        self.log.stops.set(self.log.stops.get() + 1);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), BackendError> {
        self.log.volumes.borrow_mut().push(volume);
        Ok(())
    }

    fn probe_duration(&self, _path: &Path) -> Option<Duration> {
        self.probe
    }
}

fn music_dir(names: &[&str]) -> TempDir {
    let dir = tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(name), b"not real audio").unwrap();
    }
    dir
}

fn player(
    names: &[&str],
    backend: Option<FakeBackend>,
) -> (PlayerModel<FakeBackend, ManualClock>, ManualClock, TempDir) {
    let dir = music_dir(names);
    let clock = ManualClock::start();
    let model = PlayerModel::new(
        backend,
        clock.clone(),
        dir.path().to_path_buf(),
        Duration::from_secs(180),
    );
    (model, clock, dir)
}

#[test]
fn empty_playlist_fails_all_transport_and_stays_stopped() {
    let (mut p, _clock, _dir) = player(&[], Some(FakeBackend::default()));

    assert!(matches!(p.play(None), Err(PlayerError::NoTracks)));
    assert!(matches!(p.next(), Err(PlayerError::NoTracks)));
    assert!(matches!(p.prev(), Err(PlayerError::NoTracks)));
    assert_eq!(p.status(), PlayerStatus::Stopped);
}

#[test]
fn missing_backend_reports_audio_unavailable() {
    let (mut p, _clock, _dir) = player(&["a.mp3"], None);

    assert!(matches!(p.play(None), Err(PlayerError::AudioUnavailable)));
    assert_eq!(p.status(), PlayerStatus::Stopped);
}

#[test]
fn play_out_of_range_index_is_an_error_with_no_state_change() {
    let (mut p, _clock, _dir) = player(&["a.mp3", "b.mp3"], Some(FakeBackend::default()));

    let err = p.play(Some(5)).unwrap_err();
    assert!(matches!(err, PlayerError::IndexOutOfRange { index: 5, len: 2 }));
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.status(), PlayerStatus::Stopped);
}

#[test]
fn failed_load_leaves_status_unchanged() {
    let backend = FakeBackend {
        fail_loads: true,
        ..FakeBackend::default()
    };
    let (mut p, _clock, _dir) = player(&["a.mp3"], Some(backend));

    assert!(matches!(p.play(None), Err(PlayerError::Playback { .. })));
    assert_eq!(p.status(), PlayerStatus::Stopped);
    assert_eq!(p.elapsed(), Duration::ZERO);
}

#[test]
fn next_and_prev_wrap_around_modulo_playlist_length() {
    let (mut p, _clock, _dir) = player(&["a.mp3", "b.mp3", "c.mp3"], Some(FakeBackend::default()));

    p.play(None).unwrap();
    assert_eq!(p.current_index(), 0);

    p.next().unwrap();
    p.next().unwrap();
    p.next().unwrap();
    assert_eq!(p.current_index(), 0);

    p.prev().unwrap();
    assert_eq!(p.current_index(), 2);
}

#[test]
fn duration_falls_back_when_probe_fails() {
    let (mut p, _clock, _dir) = player(&["a.mp3"], Some(FakeBackend::default()));

    p.play(None).unwrap();
    assert_eq!(p.snapshot().total, "03:00");
}

#[test]
fn elapsed_follows_the_clock_while_playing() {
    let backend = FakeBackend {
        probe: Some(Duration::from_secs(100)),
        ..FakeBackend::default()
    };
    let (mut p, clock, _dir) = player(&["a.mp3"], Some(backend));

    p.play(None).unwrap();
    assert_eq!(p.elapsed(), Duration::ZERO);

    clock.advance(Duration::from_secs(12));
    assert_eq!(p.elapsed(), Duration::from_secs(12));
    assert_eq!(p.progress(), 12);
}

#[test]
fn pause_freezes_elapsed_and_resume_does_not_leak_time() {
    let backend = FakeBackend {
        probe: Some(Duration::from_secs(100)),
        ..FakeBackend::default()
    };
    let (mut p, clock, _dir) = player(&["a.mp3"], Some(backend));

    p.play(None).unwrap();
    clock.advance(Duration::from_secs(30));
    p.pause();
    assert_eq!(p.status(), PlayerStatus::Paused);

    // Arbitrary wall time passes while paused.
    clock.advance(Duration::from_secs(1000));
    assert_eq!(p.elapsed(), Duration::from_secs(30));

    p.resume();
    assert_eq!(p.status(), PlayerStatus::Playing);
    assert_eq!(p.elapsed(), Duration::from_secs(30));

    clock.advance(Duration::from_secs(5));
    assert_eq!(p.elapsed(), Duration::from_secs(35));
}

#[test]
fn pause_and_resume_are_noops_outside_their_source_state() {
    let (mut p, _clock, _dir) = player(&["a.mp3"], Some(FakeBackend::default()));

    p.pause();
    assert_eq!(p.status(), PlayerStatus::Stopped);
    p.resume();
    assert_eq!(p.status(), PlayerStatus::Stopped);
}

#[test]
fn stop_resets_elapsed_unconditionally() {
    let backend = FakeBackend {
        probe: Some(Duration::from_secs(100)),
        ..FakeBackend::default()
    };
    let (mut p, clock, _dir) = player(&["a.mp3"], Some(backend));

    p.play(None).unwrap();
    clock.advance(Duration::from_secs(42));
    p.stop();

    assert_eq!(p.status(), PlayerStatus::Stopped);
    assert_eq!(p.elapsed(), Duration::ZERO);
    assert_eq!(p.progress(), 0);
}

#[test]
fn progress_is_monotonic_and_bounded_while_playing() {
    let backend = FakeBackend {
        probe: Some(Duration::from_secs(60)),
        ..FakeBackend::default()
    };
    let (mut p, clock, _dir) = player(&["a.mp3"], Some(backend));

    p.play(None).unwrap();
    let mut last = p.progress();
    for _ in 0..80 {
        clock.advance(Duration::from_secs(1));
        let pct = p.progress();
        assert!(pct >= last);
        assert!(pct <= 100);
        last = pct;
    }
    // Well past the end the value saturates instead of overflowing.
    assert_eq!(last, 100);
}

#[test]
fn set_volume_clamps_into_unit_range_and_forwards() {
    let backend = FakeBackend::default();
    let log = backend.log.clone();
    let (mut p, _clock, _dir) = player(&["a.mp3"], Some(backend));

    p.set_volume(-0.5);
    assert_eq!(p.volume(), 0.0);
    p.set_volume(1.7);
    assert_eq!(p.volume(), 1.0);
    p.set_volume(0.7);
    assert_eq!(p.volume(), 0.7);

    // The backend always sees the clamped value.
    assert_eq!(&*log.volumes.borrow(), &[0.0, 1.0, 0.7]);
}

#[test]
fn tick_auto_advances_near_the_end_and_keeps_playing() {
    let backend = FakeBackend {
        probe: Some(Duration::from_secs(100)),
        ..FakeBackend::default()
    };
    let log = backend.log.clone();
    let (mut p, clock, _dir) = player(&["a.mp3", "b.mp3"], Some(backend));

    p.play(None).unwrap();
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.status(), PlayerStatus::Playing);

    clock.advance(Duration::from_secs(99));
    p.tick();

    assert_eq!(p.current_index(), 1);
    assert_eq!(p.status(), PlayerStatus::Playing);
    // The new track starts from zero.
    assert_eq!(p.elapsed(), Duration::ZERO);

    let played = log.played.borrow();
    assert_eq!(played.len(), 2);
    assert!(played[1].ends_with("b.mp3"));
}

#[test]
fn tick_does_nothing_mid_track_or_when_paused() {
    let backend = FakeBackend {
        probe: Some(Duration::from_secs(100)),
        ..FakeBackend::default()
    };
    let (mut p, clock, _dir) = player(&["a.mp3", "b.mp3"], Some(backend));

    p.play(None).unwrap();
    clock.advance(Duration::from_secs(50));
    p.tick();
    assert_eq!(p.current_index(), 0);

    clock.advance(Duration::from_secs(49));
    p.pause();
    p.tick();
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.status(), PlayerStatus::Paused);
}

#[test]
fn refresh_rescans_extension_filtered_and_resets_index() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("song.wav"), b"x").unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();
    fs::write(dir.path().join("track.flac"), b"x").unwrap();

    let backend = FakeBackend::default();
    let log = backend.log.clone();
    let mut p = PlayerModel::new(
        Some(backend),
        ManualClock::start(),
        dir.path().to_path_buf(),
        Duration::from_secs(180),
    );

    assert_eq!(p.track_count(), 2);

    p.play(Some(1)).unwrap();
    fs::write(dir.path().join("extra.mp3"), b"x").unwrap();
    let count = p.refresh_playlist();

    assert_eq!(count, 3);
    assert_eq!(p.current_index(), 0);
    // Refresh stops playback before rebinding indices.
    assert_eq!(p.status(), PlayerStatus::Stopped);
    assert_eq!(log.stops.get(), 1);
}

#[test]
fn snapshot_reports_state_track_and_times() {
    let backend = FakeBackend {
        probe: Some(Duration::from_secs(90)),
        ..FakeBackend::default()
    };
    let (mut p, clock, _dir) = player(&["a.mp3"], Some(backend));

    let idle = p.snapshot();
    assert_eq!(idle.line, "Stopped: a.mp3");
    assert_eq!(idle.elapsed, "00:00");

    p.play(None).unwrap();
    clock.advance(Duration::from_secs(65));
    let snap = p.snapshot();
    assert_eq!(snap.line, "Playing: a.mp3");
    assert_eq!(snap.elapsed, "01:05");
    assert_eq!(snap.total, "01:30");
    assert_eq!(snap.progress, 72);
}

#[test]
fn snapshot_with_empty_playlist_is_the_no_tracks_line() {
    let (p, _clock, _dir) = player(&[], Some(FakeBackend::default()));

    let snap = p.snapshot();
    assert_eq!(snap.line, "No tracks in playlist");
    assert_eq!(snap.progress, 0);
}

#[test]
fn toggle_cycles_stopped_playing_paused() {
    let (mut p, _clock, _dir) = player(&["a.mp3"], Some(FakeBackend::default()));

    p.toggle_play_pause().unwrap();
    assert_eq!(p.status(), PlayerStatus::Playing);
    p.toggle_play_pause().unwrap();
    assert_eq!(p.status(), PlayerStatus::Paused);
    p.toggle_play_pause().unwrap();
    assert_eq!(p.status(), PlayerStatus::Playing);
}

#[test]
fn format_mmss_pads_minutes_and_seconds() {
    assert_eq!(format_mmss(Duration::ZERO), "00:00");
    assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
    assert_eq!(format_mmss(Duration::from_secs(3600)), "60:00");
}
