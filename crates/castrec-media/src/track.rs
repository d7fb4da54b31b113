//! Media tracks and track sets.
//!
//! A [`Track`] models one live media stream of one kind within an acquired
//! capture handle. Clones share the underlying `live` / `enabled` flags, so
//! a track cloned into a [`crate::CombinedStream`] or a test probe observes
//! the same liveness as the original — stopping any clone stops them all.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use castrec_core::TrackKind;
use tracing::debug;

// ── Track ─────────────────────────────────────────────────────────────────────

/// One media track (video or audio) within a capture handle.
#[derive(Debug, Clone)]
pub struct Track {
    kind:    TrackKind,
    label:   String,
    live:    Arc<AtomicBool>,
    enabled: Arc<AtomicBool>,
}

impl Track {
    pub fn new(kind: TrackKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label:   label.into(),
            live:    Arc::new(AtomicBool::new(true)),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the underlying source is still held. `false` after [`stop`](Self::stop).
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Whether the track currently contributes data (mute toggles this).
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Enable or disable the track without releasing the source, so
    /// re-enabling is instantaneous.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        debug!("track '{}' enabled={}", self.label, enabled);
    }

    /// Release the underlying source. Idempotent.
    pub fn stop(&self) {
        if self.live.swap(false, Ordering::SeqCst) {
            debug!("track '{}' stopped", self.label);
        }
    }
}

// ── TrackSet ──────────────────────────────────────────────────────────────────

/// The set of tracks offered by one acquired capture handle.
#[derive(Debug, Clone, Default)]
pub struct TrackSet {
    tracks: Vec<Track>,
}

impl TrackSet {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn video_tracks(&self) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.kind() == TrackKind::Video)
            .cloned()
            .collect()
    }

    pub fn audio_tracks(&self) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.kind() == TrackKind::Audio)
            .cloned()
            .collect()
    }

    /// First audio track, if any — the one mute/unmute operates on.
    pub fn first_audio(&self) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind() == TrackKind::Audio)
    }

    /// Stop every track in the set. Idempotent.
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }

    /// True when every track has been stopped.
    pub fn all_stopped(&self) -> bool {
        self.tracks.iter().all(|t| !t.is_live())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_liveness_and_enabled_flags() {
        let track = Track::new(TrackKind::Audio, "mic-0");
        let clone = track.clone();

        clone.set_enabled(false);
        assert!(!track.is_enabled());

        track.stop();
        assert!(!clone.is_live());
    }

    #[test]
    fn stop_all_is_idempotent() {
        let set = TrackSet::new(vec![
            Track::new(TrackKind::Video, "display-0"),
            Track::new(TrackKind::Audio, "mic-0"),
        ]);
        set.stop_all();
        set.stop_all();
        assert!(set.all_stopped());
    }

    #[test]
    fn first_audio_skips_video_tracks() {
        let set = TrackSet::new(vec![
            Track::new(TrackKind::Video, "display-0"),
            Track::new(TrackKind::Audio, "mic-0"),
        ]);
        assert_eq!(set.first_audio().unwrap().label(), "mic-0");
    }
}
