//! The finalized recording artifact.

use bytes::Bytes;

/// A finalized recording: one named binary container, assembled from every
/// chunk the encoder produced, handed to the caller for persistence.
///
/// Cloning is cheap — the payload is a shared [`Bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    file_name: String,
    data: Bytes,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, data: Bytes) -> Self {
        Self { file_name: file_name.into(), data }
    }

    /// `<label or default>.<container-extension>`
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes)", self.file_name, self.data.len())
    }
}
