//! The combined recordable stream.

use crate::track::{Track, TrackSet};

/// The single stream handed to the encoder: the screen handle's video
/// tracks plus the microphone handle's audio tracks.
///
/// Screen audio, if the platform offers it, is excluded — screen capture
/// is video-only here.
#[derive(Debug, Clone)]
pub struct CombinedStream {
    video: Vec<Track>,
    audio: Vec<Track>,
}

impl CombinedStream {
    /// Build the combined stream from the two acquired handles.
    ///
    /// Built once per session; the tracks are clones sharing state with the
    /// handles, so the session's teardown stops these too.
    pub fn combine(screen: &TrackSet, microphone: &TrackSet) -> Self {
        Self {
            video: screen.video_tracks(),
            audio: microphone.audio_tracks(),
        }
    }

    pub fn video_tracks(&self) -> &[Track] {
        &self.video
    }

    pub fn audio_tracks(&self) -> &[Track] {
        &self.audio
    }

    pub fn track_count(&self) -> usize {
        self.video.len() + self.audio.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castrec_core::TrackKind;

    #[test]
    fn combine_takes_screen_video_and_mic_audio_only() {
        // Screen handle that also offers a system-audio track.
        let screen = TrackSet::new(vec![
            Track::new(TrackKind::Video, "display-0"),
            Track::new(TrackKind::Audio, "system-audio"),
        ]);
        let mic = TrackSet::new(vec![Track::new(TrackKind::Audio, "mic-0")]);

        let combined = CombinedStream::combine(&screen, &mic);
        assert_eq!(combined.video_tracks().len(), 1);
        assert_eq!(combined.audio_tracks().len(), 1);
        assert_eq!(combined.audio_tracks()[0].label(), "mic-0");
    }

    #[test]
    fn combined_tracks_share_state_with_handles() {
        let screen = TrackSet::new(vec![Track::new(TrackKind::Video, "display-0")]);
        let mic = TrackSet::new(vec![Track::new(TrackKind::Audio, "mic-0")]);
        let combined = CombinedStream::combine(&screen, &mic);

        screen.stop_all();
        mic.stop_all();
        assert!(combined.video_tracks().iter().all(|t| !t.is_live()));
        assert!(combined.audio_tracks().iter().all(|t| !t.is_live()));
    }
}
