use thiserror::Error;

use crate::types::SourceKind;

/// Failure acquiring a capture source.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Permission denied: {kind}")]
    PermissionDenied { kind: SourceKind },

    #[error("Capture source unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Failure creating or driving the platform encoder.
#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("Encoding format unsupported: {format}")]
    UnsupportedFormat { format: String },

    #[error("Encoder failed: {reason}")]
    Failed { reason: String },
}

/// Error surfaced at the session start boundary.
///
/// All variants leave the session back in `Idle` with no resources held;
/// the caller must re-initiate, nothing is retried automatically.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{kind} acquisition refused")]
    PermissionDenied {
        kind: SourceKind,
        #[source]
        source: CaptureError,
    },

    #[error("{failed} acquisition failed after {acquired} was granted (rolled back)")]
    AcquisitionPartial {
        acquired: SourceKind,
        failed: SourceKind,
        #[source]
        source: CaptureError,
    },

    #[error("Encoder unavailable")]
    EncoderUnavailable(#[from] EncoderError),
}
