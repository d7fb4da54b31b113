//! Simulated platform backend.
//!
//! `SimPlatform` implements the [`MediaPlatform`] seam entirely in-process:
//! deterministic track sets, a channel-backed encoder, and a [`SimProbe`]
//! handle that stays usable after the platform has been boxed into a
//! session. Tests use the probe to flip denial flags, inject encoder
//! chunks, and observe track liveness; the demo binary uses the optional
//! chunk ticker to produce synthetic output in real time.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use castrec_core::{CaptureError, ContainerFormat, EncoderError, SourceKind, TrackKind};
use tokio::sync::mpsc;
use tracing::debug;

use crate::platform::{Encoder, EncoderEvent, MediaPlatform};
use crate::stream::CombinedStream;
use crate::track::{Track, TrackSet};

// ── SimPlatform ───────────────────────────────────────────────────────────────

/// In-process [`MediaPlatform`] implementation.
pub struct SimPlatform {
    probe: SimProbe,
    /// When set, started encoders tick out a synthetic chunk per interval.
    chunk_interval: Option<Duration>,
}

impl SimPlatform {
    pub fn new() -> Self {
        Self { probe: SimProbe::default(), chunk_interval: None }
    }

    /// Platform whose encoders produce a synthetic chunk every `interval`.
    pub fn with_chunk_interval(interval: Duration) -> Self {
        Self { probe: SimProbe::default(), chunk_interval: Some(interval) }
    }

    /// Shared observation/control handle. Clone before boxing the platform
    /// into a session.
    pub fn probe(&self) -> SimProbe {
        self.probe.clone()
    }
}

impl Default for SimPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaPlatform for SimPlatform {
    async fn acquire_screen_video(&mut self) -> Result<TrackSet, CaptureError> {
        if self.probe.deny_screen.load(Ordering::SeqCst) {
            return Err(CaptureError::PermissionDenied { kind: SourceKind::Screen });
        }
        // Offers a system-audio track alongside the video track; the
        // combined stream must leave it behind.
        let set = TrackSet::new(vec![
            Track::new(TrackKind::Video, "sim-display-0"),
            Track::new(TrackKind::Audio, "sim-system-audio"),
        ]);
        *self.probe.screen.lock().unwrap() = Some(set.clone());
        Ok(set)
    }

    async fn acquire_microphone_audio(&mut self) -> Result<TrackSet, CaptureError> {
        if self.probe.deny_microphone.load(Ordering::SeqCst) {
            return Err(CaptureError::PermissionDenied { kind: SourceKind::Microphone });
        }
        let set = TrackSet::new(vec![Track::new(TrackKind::Audio, "sim-mic-0")]);
        *self.probe.microphone.lock().unwrap() = Some(set.clone());
        Ok(set)
    }

    fn create_encoder(
        &mut self,
        stream: &CombinedStream,
        format: ContainerFormat,
    ) -> Result<Box<dyn Encoder>, EncoderError> {
        if self.probe.deny_encoder.load(Ordering::SeqCst) {
            return Err(EncoderError::UnsupportedFormat { format: format.mime().to_owned() });
        }
        debug!(
            "sim encoder created: {} video + {} audio tracks, format {}",
            stream.video_tracks().len(),
            stream.audio_tracks().len(),
            format,
        );
        let encoder = SimEncoder::new(self.chunk_interval);
        *self.probe.encoder.lock().unwrap() = Some(encoder.handle());
        Ok(Box::new(encoder))
    }
}

// ── SimProbe ──────────────────────────────────────────────────────────────────

/// Shared view into a [`SimPlatform`] that outlives boxing it away.
#[derive(Clone, Default)]
pub struct SimProbe {
    deny_screen:     Arc<AtomicBool>,
    deny_microphone: Arc<AtomicBool>,
    deny_encoder:    Arc<AtomicBool>,
    screen:     Arc<Mutex<Option<TrackSet>>>,
    microphone: Arc<Mutex<Option<TrackSet>>>,
    encoder:    Arc<Mutex<Option<SimEncoderHandle>>>,
}

impl SimProbe {
    pub fn deny_screen(&self, deny: bool) {
        self.deny_screen.store(deny, Ordering::SeqCst);
    }

    pub fn deny_microphone(&self, deny: bool) {
        self.deny_microphone.store(deny, Ordering::SeqCst);
    }

    pub fn deny_encoder(&self, deny: bool) {
        self.deny_encoder.store(deny, Ordering::SeqCst);
    }

    /// Screen track set from the most recent acquisition, if any.
    pub fn screen(&self) -> Option<TrackSet> {
        self.screen.lock().unwrap().clone()
    }

    /// Microphone track set from the most recent acquisition, if any.
    pub fn microphone(&self) -> Option<TrackSet> {
        self.microphone.lock().unwrap().clone()
    }

    /// Handle to the most recently created encoder, if any.
    pub fn encoder(&self) -> Option<SimEncoderHandle> {
        self.encoder.lock().unwrap().clone()
    }
}

// ── SimEncoder ────────────────────────────────────────────────────────────────

struct EncShared {
    running: AtomicBool,
    paused:  AtomicBool,
    seq:     AtomicU64,
}

/// Channel-backed [`Encoder`].
///
/// Without a tick interval it emits only what [`SimEncoderHandle::push_chunk`]
/// injects, and `stop()` enqueues `Stopped` synchronously — fully
/// deterministic for tests.
pub struct SimEncoder {
    shared: Arc<EncShared>,
    tx: mpsc::UnboundedSender<EncoderEvent>,
    rx: mpsc::UnboundedReceiver<EncoderEvent>,
    tick_interval: Option<Duration>,
}

impl SimEncoder {
    fn new(tick_interval: Option<Duration>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(EncShared {
            running: AtomicBool::new(false),
            paused:  AtomicBool::new(false),
            seq:     AtomicU64::new(0),
        });
        Self { shared, tx, rx, tick_interval }
    }

    fn handle(&self) -> SimEncoderHandle {
        SimEncoderHandle { shared: Arc::clone(&self.shared), tx: self.tx.clone() }
    }
}

#[async_trait]
impl Encoder for SimEncoder {
    fn start(&mut self) {
        self.shared.running.store(true, Ordering::SeqCst);
        self.shared.paused.store(false, Ordering::SeqCst);
        if let Some(interval) = self.tick_interval {
            let shared = Arc::clone(&self.shared);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(interval).await;
                    if !shared.running.load(Ordering::SeqCst) {
                        let _ = tx.send(EncoderEvent::Stopped);
                        break;
                    }
                    if shared.paused.load(Ordering::SeqCst) {
                        continue;
                    }
                    let n = shared.seq.fetch_add(1, Ordering::SeqCst);
                    let chunk = Bytes::from(format!("sim-chunk-{n:04};"));
                    if tx.send(EncoderEvent::Chunk(chunk)).is_err() {
                        break;
                    }
                }
            });
        }
    }

    fn pause(&mut self) {
        self.shared.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&mut self) {
        self.shared.paused.store(false, Ordering::SeqCst);
    }

    fn stop(&mut self) {
        let was_running = self.shared.running.swap(false, Ordering::SeqCst);
        // Tickerless mode has no task to emit the completion signal.
        if self.tick_interval.is_none() && was_running {
            let _ = self.tx.send(EncoderEvent::Stopped);
        }
    }

    fn try_next_event(&mut self) -> Option<EncoderEvent> {
        self.rx.try_recv().ok()
    }

    async fn next_event(&mut self) -> Option<EncoderEvent> {
        self.rx.recv().await
    }
}

// ── SimEncoderHandle ──────────────────────────────────────────────────────────

/// Test-side handle to a [`SimEncoder`]: inject chunks, inspect flags.
#[derive(Clone)]
pub struct SimEncoderHandle {
    shared: Arc<EncShared>,
    tx: mpsc::UnboundedSender<EncoderEvent>,
}

impl SimEncoderHandle {
    /// Queue one encoded chunk for delivery. Returns `false` once the
    /// encoder has been dropped.
    pub fn push_chunk(&self, data: impl Into<Bytes>) -> bool {
        self.tx.send(EncoderEvent::Chunk(data.into())).is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn denied_screen_surfaces_permission_error() {
        let mut platform = SimPlatform::new();
        platform.probe().deny_screen(true);
        let err = platform.acquire_screen_video().await.unwrap_err();
        assert!(matches!(err, CaptureError::PermissionDenied { kind: SourceKind::Screen }));
        assert!(platform.probe().screen().is_none());
    }

    #[tokio::test]
    async fn scripted_encoder_delivers_chunks_then_stopped() {
        let mut platform = SimPlatform::new();
        let probe = platform.probe();

        let screen = platform.acquire_screen_video().await.unwrap();
        let mic = platform.acquire_microphone_audio().await.unwrap();
        let combined = CombinedStream::combine(&screen, &mic);
        let mut encoder = platform
            .create_encoder(&combined, ContainerFormat::Webm)
            .unwrap();

        encoder.start();
        let handle = probe.encoder().unwrap();
        assert!(handle.is_running());
        assert!(handle.push_chunk(&b"one"[..]));
        assert!(handle.push_chunk(&b"two"[..]));
        encoder.stop();

        assert_eq!(encoder.try_next_event(), Some(EncoderEvent::Chunk(Bytes::from_static(b"one"))));
        assert_eq!(encoder.try_next_event(), Some(EncoderEvent::Chunk(Bytes::from_static(b"two"))));
        assert_eq!(encoder.next_event().await, Some(EncoderEvent::Stopped));
        assert!(encoder.try_next_event().is_none());
    }

    #[tokio::test]
    async fn ticking_encoder_produces_chunks_and_completion() {
        let mut platform = SimPlatform::with_chunk_interval(Duration::from_millis(5));
        let screen = platform.acquire_screen_video().await.unwrap();
        let mic = platform.acquire_microphone_audio().await.unwrap();
        let combined = CombinedStream::combine(&screen, &mic);
        let mut encoder = platform
            .create_encoder(&combined, ContainerFormat::Webm)
            .unwrap();

        encoder.start();
        tokio::time::sleep(Duration::from_millis(30)).await;
        encoder.stop();

        let mut chunks = 0;
        loop {
            match encoder.next_event().await {
                Some(EncoderEvent::Chunk(_)) => chunks += 1,
                Some(EncoderEvent::Stopped) => break,
                None => panic!("encoder channel closed without Stopped"),
            }
        }
        assert!(chunks >= 1, "ticker produced no chunks");
    }
}
