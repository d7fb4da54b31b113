//! castrec-session — the capture session state machine.
//!
//! One [`CaptureSession`] owns the whole lifecycle of a screen + microphone
//! recording: it acquires the capture handles, drives the encoder, buffers
//! encoded chunks, and finalizes the artifact on stop.
//!
//! # States and transitions
//!
//! ```text
//! | From              | Event         | To                | Side effect                      |
//! |-------------------|---------------|-------------------|----------------------------------|
//! | Idle / Stopped    | request_start | AwaitingPermission| prompt shown by the caller       |
//! | AwaitingPermission| confirm_start | Recording         | acquire streams, start encoder   |
//! | AwaitingPermission| cancel_start  | Idle              | nothing acquired                 |
//! | Recording         | pause         | Paused            | pause encoder + clock            |
//! | Paused            | resume        | Recording         | resume encoder + clock           |
//! | Recording/Paused  | stop          | Stopped           | stop tracks, finalize artifact   |
//! | Recording/Paused  | mute/unmute   | (same)            | toggle mic track enabled flag    |
//! ```
//!
//! Transitions requested in any other state are no-ops, never errors.
//! Acquisition is all-or-nothing: if the microphone (or the encoder) fails
//! after the screen was granted, the screen tracks are stopped before the
//! error surfaces and the session is back in `Idle` holding nothing.

pub mod artifact;
pub mod chunks;
pub mod clock;
pub mod session;

pub use artifact::Artifact;
pub use chunks::ChunkBuffer;
pub use clock::ElapsedClock;
pub use session::CaptureSession;
