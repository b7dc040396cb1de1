use crate::engine::EngineSnapshot;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, snapshot: &EngineSnapshot) {
    let now_playing = snapshot
        .current_row()
        .map(|row| (row.title.as_str(), row.artist.as_str()));
    mpris.set_now_playing(now_playing);
    mpris.set_playback(snapshot.state);
}
