//! Append-only buffer of encoded chunks.

use bytes::{Bytes, BytesMut};

/// Ordered sequence of encoder output chunks.
///
/// Chunks are appended in arrival order and consumed exactly once by
/// [`finalize`](ChunkBuffer::finalize); the artifact's byte content is their
/// concatenation, so nothing here may drop, reorder, or duplicate.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<Bytes>,
    byte_len: usize,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk. Empty chunks are discarded.
    pub fn append(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.byte_len += chunk.len();
        self.chunks.push(chunk);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Concatenate all chunks into one contiguous payload and clear the
    /// buffer, so the next session starts empty.
    pub fn finalize(&mut self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.byte_len);
        for chunk in self.chunks.drain(..) {
            out.extend_from_slice(&chunk);
        }
        self.byte_len = 0;
        out.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_arrival_order() {
        let mut buf = ChunkBuffer::new();
        buf.append(Bytes::from_static(b"aa"));
        buf.append(Bytes::from_static(b"bb"));
        buf.append(Bytes::from_static(b"cc"));
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.byte_len(), 6);
        assert_eq!(buf.finalize(), Bytes::from_static(b"aabbcc"));
    }

    #[test]
    fn finalize_clears_for_next_session() {
        let mut buf = ChunkBuffer::new();
        buf.append(Bytes::from_static(b"first"));
        let _ = buf.finalize();
        assert!(buf.is_empty());
        assert_eq!(buf.byte_len(), 0);

        buf.append(Bytes::from_static(b"second"));
        assert_eq!(buf.finalize(), Bytes::from_static(b"second"));
    }

    #[test]
    fn empty_chunks_are_discarded() {
        let mut buf = ChunkBuffer::new();
        buf.append(Bytes::new());
        buf.append(Bytes::from_static(b"x"));
        buf.append(Bytes::new());
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.finalize(), Bytes::from_static(b"x"));
    }
}
