//! Platform capability seams.
//!
//! These traits stand in for the OS / browser capture and encoding
//! primitives. The session only ever talks to a `Box<dyn MediaPlatform>`
//! and a `Box<dyn Encoder>`, so real backends and the simulated one in
//! [`crate::sim`] are interchangeable.

use async_trait::async_trait;
use bytes::Bytes;
use castrec_core::{CaptureError, ContainerFormat, EncoderError};

use crate::stream::CombinedStream;
use crate::track::TrackSet;

// ── EncoderEvent ──────────────────────────────────────────────────────────────

/// Event emitted by a running encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderEvent {
    /// One encoded data chunk. Arrival order is the artifact's byte order.
    Chunk(Bytes),
    /// The encoder has flushed its last chunk. Emitted exactly once,
    /// only after a stop request; finalization must wait for it.
    Stopped,
}

// ── Encoder ───────────────────────────────────────────────────────────────────

/// A running platform encoder consuming a [`CombinedStream`].
///
/// Control calls are fire-and-forget; output is pulled through the event
/// methods, mirroring an appsink → channel bridge.
#[async_trait]
pub trait Encoder: Send {
    fn start(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);

    /// Request stop. The encoder keeps delivering any in-flight chunks and
    /// then emits [`EncoderEvent::Stopped`].
    fn stop(&mut self);

    /// Non-blocking pump of the event channel.
    fn try_next_event(&mut self) -> Option<EncoderEvent>;

    /// Await the next event. `None` means the channel closed without a
    /// `Stopped` event (encoder task died).
    async fn next_event(&mut self) -> Option<EncoderEvent>;
}

// ── MediaPlatform ─────────────────────────────────────────────────────────────

/// The platform capabilities the session consumes.
///
/// Acquisition is async: it may be pending for an arbitrary, user-dependent
/// time while a permission prompt is up.
#[async_trait]
pub trait MediaPlatform: Send {
    /// Acquire the screen's video tracks (video-only by design; any audio
    /// track the platform offers alongside is ignored downstream).
    async fn acquire_screen_video(&mut self) -> Result<TrackSet, CaptureError>;

    /// Acquire the microphone's audio tracks.
    async fn acquire_microphone_audio(&mut self) -> Result<TrackSet, CaptureError>;

    /// Create an encoder for the combined stream in the given container
    /// format. The encoder is not started.
    fn create_encoder(
        &mut self,
        stream: &CombinedStream,
        format: ContainerFormat,
    ) -> Result<Box<dyn Encoder>, EncoderError>;
}
