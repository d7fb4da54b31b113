//! `CaptureSession` — owns one recording lifecycle end to end.
//!
//! ```text
//! request_start ─► AwaitingPermission ─ confirm_start ─► Recording ⇄ Paused
//!        ▲                │ cancel_start                     │ stop
//!        └── Stopped ◄────┴───────── Idle ◄── (any start failure, rolled back)
//! ```
//!
//! Single-threaded, event-driven: every transition runs on one logical
//! control flow against `&mut self`; the only suspension point is stream
//! acquisition inside [`CaptureSession::confirm_start`], during which the
//! session stays in `AwaitingPermission`. Encoder output is pumped from the
//! event channel on each transition (and via [`CaptureSession::pump`]), and
//! accepted only while Recording or Paused.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use castrec_core::{RecorderConfig, SessionError, SessionState, SourceKind};
use castrec_media::{CombinedStream, Encoder, EncoderEvent, MediaPlatform, TrackSet};
use tracing::{debug, info, warn};

use crate::artifact::Artifact;
use crate::chunks::ChunkBuffer;
use crate::clock::ElapsedClock;

// ── CaptureHandles ────────────────────────────────────────────────────────────

/// The two acquired capture handles plus the stream derived from them,
/// exclusively owned by the session for its lifetime.
///
/// Dropping the struct stops every track, so no exit path — stop, start
/// rollback, or discarding the session — leaves hardware held.
struct CaptureHandles {
    screen: TrackSet,
    microphone: TrackSet,
    combined: CombinedStream,
}

impl CaptureHandles {
    /// Stop all tracks on both handles. Idempotent.
    fn release(&self) {
        self.screen.stop_all();
        self.microphone.stop_all();
    }
}

impl Drop for CaptureHandles {
    fn drop(&mut self) {
        self.release();
    }
}

// ── CaptureSession ────────────────────────────────────────────────────────────

/// Screen + microphone capture session.
///
/// At most one recording is in progress per instance; after `stop` the
/// instance can be reused — `request_start` is accepted again from
/// `Stopped` and the chunk buffer is already empty.
pub struct CaptureSession {
    platform: Box<dyn MediaPlatform>,
    config: RecorderConfig,
    state: SessionState,
    muted: bool,
    /// Label for the current attempt; fresh per `request_start`.
    label: Option<String>,
    session_id: Option<String>,
    handles: Option<CaptureHandles>,
    encoder: Option<Box<dyn Encoder>>,
    chunks: ChunkBuffer,
    clock: ElapsedClock,
    last_artifact: Option<Artifact>,
}

impl CaptureSession {
    pub fn new(platform: Box<dyn MediaPlatform>, config: RecorderConfig) -> Self {
        Self {
            platform,
            config,
            state: SessionState::Idle,
            muted: false,
            label: None,
            session_id: None,
            handles: None,
            encoder: None,
            chunks: ChunkBuffer::new(),
            clock: ElapsedClock::new(),
            last_artifact: None,
        }
    }

    // ── Observable state ──────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Artifact of the most recently completed session, until the next
    /// finalize replaces it.
    pub fn last_artifact(&self) -> Option<&Artifact> {
        self.last_artifact.as_ref()
    }

    /// Id of the recording in progress, for log correlation.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Idle/Stopped → AwaitingPermission. The caller shows the
    /// permission/name prompt; nothing is acquired yet.
    ///
    /// Returns `false` when ignored.
    pub fn request_start(&mut self) -> bool {
        match self.state {
            SessionState::Idle | SessionState::Stopped => {
                self.label = None;
                self.state = SessionState::AwaitingPermission;
                info!("start requested, awaiting permission");
                true
            }
            other => {
                debug!("request_start ignored in state {other}");
                false
            }
        }
    }

    /// AwaitingPermission → Idle without acquiring anything.
    pub fn cancel_start(&mut self) -> bool {
        if self.state != SessionState::AwaitingPermission {
            debug!("cancel_start ignored in state {}", self.state);
            return false;
        }
        self.label = None;
        self.state = SessionState::Idle;
        info!("start cancelled before acquisition");
        true
    }

    /// AwaitingPermission → Recording: acquire both streams, build the
    /// combined stream, start the encoder and the elapsed clock.
    ///
    /// All-or-nothing: on any failure every already-acquired handle is
    /// released, the session returns to `Idle`, and the error surfaces.
    /// Ignored (returns `Ok(false)`) outside `AwaitingPermission`.
    pub async fn confirm_start(&mut self, label: &str) -> Result<bool, SessionError> {
        if self.state != SessionState::AwaitingPermission {
            debug!("confirm_start ignored in state {}", self.state);
            return Ok(false);
        }

        let screen = match self.platform.acquire_screen_video().await {
            Ok(set) => set,
            Err(e) => {
                self.state = SessionState::Idle;
                warn!("screen acquisition failed: {e}");
                return Err(SessionError::PermissionDenied { kind: SourceKind::Screen, source: e });
            }
        };

        let microphone = match self.platform.acquire_microphone_audio().await {
            Ok(set) => set,
            Err(e) => {
                screen.stop_all();
                self.state = SessionState::Idle;
                warn!("microphone acquisition failed after screen was granted: {e}");
                return Err(SessionError::AcquisitionPartial {
                    acquired: SourceKind::Screen,
                    failed: SourceKind::Microphone,
                    source: e,
                });
            }
        };

        let combined = CombinedStream::combine(&screen, &microphone);
        let mut encoder = match self.platform.create_encoder(&combined, self.config.format) {
            Ok(enc) => enc,
            Err(e) => {
                screen.stop_all();
                microphone.stop_all();
                self.state = SessionState::Idle;
                warn!("encoder creation failed: {e}");
                return Err(SessionError::EncoderUnavailable(e));
            }
        };

        encoder.start();
        self.clock.start();
        self.muted = false;
        self.label = Some(label.to_owned());
        self.session_id = Some(format!("castrec-{}", ts_ms()));
        self.handles = Some(CaptureHandles { screen, microphone, combined });
        self.encoder = Some(encoder);
        self.state = SessionState::Recording;
        info!(
            "recording started (session {}, {} tracks combined)",
            self.session_id.as_deref().unwrap_or("?"),
            self.handles.as_ref().map(|h| h.combined.track_count()).unwrap_or(0),
        );
        Ok(true)
    }

    /// Recording → Paused. Streams stay live.
    pub fn pause(&mut self) -> bool {
        self.pump();
        if self.state != SessionState::Recording {
            debug!("pause ignored in state {}", self.state);
            return false;
        }
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.pause();
        }
        self.clock.pause();
        self.state = SessionState::Paused;
        info!("recording paused at {:?}", self.clock.elapsed());
        true
    }

    /// Paused → Recording.
    pub fn resume(&mut self) -> bool {
        self.pump();
        if self.state != SessionState::Paused {
            debug!("resume ignored in state {}", self.state);
            return false;
        }
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.resume();
        }
        self.clock.resume();
        self.state = SessionState::Recording;
        info!("recording resumed");
        true
    }

    /// Recording/Paused → Stopped: stop the encoder, stop every track on
    /// both handles, then finalize the artifact once the encoder confirms
    /// it produced its last chunk.
    ///
    /// Track teardown and finalization are independent and both always run;
    /// finalization waits for the encoder's own stop-completion signal, not
    /// the caller's request. Returns `None` when ignored.
    pub async fn stop(&mut self) -> Option<Artifact> {
        if !self.state.is_capturing() {
            debug!("stop ignored in state {}", self.state);
            return None;
        }
        self.pump();

        if let Some(encoder) = self.encoder.as_mut() {
            encoder.stop();
        }
        if let Some(handles) = self.handles.as_ref() {
            handles.release();
        }

        // Drain the encoder's final flush; chunks before its Stopped signal
        // belong to the artifact, the signal itself triggers finalization.
        if let Some(encoder) = self.encoder.as_mut() {
            loop {
                match encoder.next_event().await {
                    Some(EncoderEvent::Chunk(chunk)) => self.chunks.append(chunk),
                    Some(EncoderEvent::Stopped) => break,
                    None => {
                        warn!("encoder channel closed before stop confirmation");
                        break;
                    }
                }
            }
        }

        let label = self.label.take().unwrap_or_default();
        let artifact = Artifact::new(self.config.artifact_name(&label), self.chunks.finalize());
        info!(
            "session {} finalized: {}",
            self.session_id.as_deref().unwrap_or("?"),
            artifact,
        );

        self.encoder = None;
        self.handles = None;
        self.session_id = None;
        self.muted = false;
        self.clock.reset();
        self.state = SessionState::Stopped;
        self.last_artifact = Some(artifact.clone());
        Some(artifact)
    }

    /// Disable the first microphone track. No-op unless capturing and
    /// currently unmuted.
    pub fn mute(&mut self) -> bool {
        self.set_muted(true)
    }

    /// Re-enable the first microphone track. Instantaneous — the track was
    /// never stopped, only disabled.
    pub fn unmute(&mut self) -> bool {
        self.set_muted(false)
    }

    fn set_muted(&mut self, muted: bool) -> bool {
        if !self.state.is_capturing() || self.muted == muted {
            debug!("mute({muted}) ignored in state {}", self.state);
            return false;
        }
        let Some(track) = self.handles.as_ref().and_then(|h| h.microphone.first_audio()) else {
            debug!("mute({muted}) ignored: no microphone track");
            return false;
        };
        track.set_enabled(!muted);
        self.muted = muted;
        info!("microphone {}", if muted { "muted" } else { "unmuted" });
        true
    }

    // ── Encoder events ────────────────────────────────────────────────────

    /// Drain pending encoder events. Chunks are buffered only while
    /// Recording or Paused; anything else is discarded.
    ///
    /// Called internally on every transition; hosts with their own event
    /// loop may also call it periodically.
    pub fn pump(&mut self) {
        let Some(encoder) = self.encoder.as_mut() else {
            return;
        };
        while let Some(event) = encoder.try_next_event() {
            match event {
                EncoderEvent::Chunk(chunk) if self.state.is_capturing() => {
                    self.chunks.append(chunk);
                }
                EncoderEvent::Chunk(_) => {
                    debug!("chunk discarded in state {}", self.state);
                }
                EncoderEvent::Stopped => {
                    warn!("unsolicited encoder stop signal in state {}", self.state);
                }
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ts_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
