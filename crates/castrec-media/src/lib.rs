//! castrec-media — media plumbing for the castrec recorder.
//!
//! # Architecture
//!
//! ```text
//! MediaPlatform ──► TrackSet (screen)  ─┐
//!               ──► TrackSet (mic)     ─┤
//!                                       ▼
//!                     CombinedStream (screen video + mic audio)
//!                                       │
//!                                       ▼
//!                     Encoder ──► EncoderEvent channel ──► session
//! ```
//!
//! The [`MediaPlatform`] and [`Encoder`] traits are the seams behind which
//! real OS capture / encoding primitives live; [`sim::SimPlatform`] is the
//! in-process implementation used by tests and the demo binary.

pub mod platform;
pub mod sim;
pub mod stream;
pub mod track;

pub use platform::{Encoder, EncoderEvent, MediaPlatform};
pub use stream::CombinedStream;
pub use track::{Track, TrackSet};
