use crate::mpris::MprisHandle;
use crate::player::PlayerStatus;

use super::Session;

pub fn update_mpris(mpris: &MprisHandle, session: &Session) {
    let index = if session.player.status() == PlayerStatus::Stopped {
        None
    } else {
        Some(session.player.current_index())
    };

    let track = index.and_then(|_| session.player.current_track());
    mpris.set_track_metadata(index, track);
    mpris.set_playback(session.player.status());
}
