use serde::{Deserialize, Serialize};

// MARK: - SessionState

/// Lifecycle state of a capture session.
///
/// Exactly one state is active at any time; invalid transition requests
/// leave the state untouched (see `castrec-session`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session in progress, no resources held.
    Idle,
    /// Start requested; waiting on the permission / name prompt.
    /// No streams have been acquired yet.
    AwaitingPermission,
    /// Streams acquired, encoder running.
    Recording,
    /// Encoder paused; streams stay live so resume is instantaneous.
    Paused,
    /// Encoder stopped, tracks released, artifact finalized.
    Stopped,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle               => "Idle",
            Self::AwaitingPermission => "Awaiting permission",
            Self::Recording          => "Recording",
            Self::Paused             => "Paused",
            Self::Stopped            => "Stopped",
        }
    }

    /// True while capture handles exist (Recording or Paused).
    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Recording | Self::Paused)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// MARK: - SourceKind

/// Which capture source a handle or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Screen,
    Microphone,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Screen     => write!(f, "screen"),
            Self::Microphone => write!(f, "microphone"),
        }
    }
}

// MARK: - TrackKind

/// Kind of a single media track within a track set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

// MARK: - ContainerFormat

/// Output container for the finalized artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    Webm,
    Mp4,
}

impl ContainerFormat {
    /// MIME type handed to the platform encoder.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Webm => "video/webm; codecs=vp8,opus",
            Self::Mp4  => "video/mp4; codecs=avc1,mp4a",
        }
    }

    /// File extension of the artifact (no leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4  => "mp4",
        }
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
