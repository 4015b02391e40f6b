//! Error types for ring buffer operations.

use thiserror::Error;

/// Ring buffer operation error.
///
/// Every failure is surfaced synchronously to the caller; the buffer never
/// retries internally, and a failed operation leaves the buffer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Storage could not be allocated at construction.
    ///
    /// Raised for an empty shape, a zero dimension, an element count that
    /// overflows `usize`, or an allocation the system refuses. No partial
    /// buffer exists after this error.
    #[error("buffer: cannot allocate storage for shape {shape:?}")]
    Allocation { shape: Vec<usize> },

    /// A write would overwrite frames the slowest reader has not consumed.
    ///
    /// The write was rejected before touching storage; `writable` is the
    /// largest frame count the buffer would currently accept.
    #[error("buffer: writing {requested} frames would overwrite unread data (room for {writable})")]
    Overwrite { requested: usize, writable: usize },

    /// An operation referenced a reader name that was never registered.
    #[error("buffer: unknown reader {0:?}")]
    UnknownReader(String),

    /// Data length does not form whole frames of the buffer's frame shape.
    #[error("buffer: data length {len} is not a multiple of frame length {frame_len}")]
    FrameMismatch { len: usize, frame_len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_display() {
        let err = BufferError::Allocation {
            shape: vec![0, 2, 2],
        };
        assert_eq!(
            format!("{}", err),
            "buffer: cannot allocate storage for shape [0, 2, 2]"
        );
    }

    #[test]
    fn test_overwrite_display() {
        let err = BufferError::Overwrite {
            requested: 12,
            writable: 4,
        };
        assert_eq!(
            format!("{}", err),
            "buffer: writing 12 frames would overwrite unread data (room for 4)"
        );
    }

    #[test]
    fn test_unknown_reader_display() {
        let err = BufferError::UnknownReader("slow".to_string());
        assert_eq!(format!("{}", err), "buffer: unknown reader \"slow\"");
    }

    #[test]
    fn test_frame_mismatch_display() {
        let err = BufferError::FrameMismatch {
            len: 7,
            frame_len: 4,
        };
        assert_eq!(
            format!("{}", err),
            "buffer: data length 7 is not a multiple of frame length 4"
        );
    }
}
