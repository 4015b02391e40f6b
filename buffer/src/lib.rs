//! Fixed-capacity multi-reader ring buffer for streaming frame data.
//!
//! This crate provides [`RingBuffer<T>`], a circular buffer that decouples
//! one producer from any number of consumers reading the same stream at
//! their own pace. Frames are appended along a circular leading dimension;
//! each consumer owns a named cursor and sees every frame exactly once,
//! without the history ever being copied as a whole.
//!
//! # Shape
//!
//! A buffer is constructed from a shape whose first component is the
//! capacity (frame slots along the circular dimension) and whose remaining
//! components describe one frame. Frames cross the API as flat slices in
//! row-major order:
//!
//! ```
//! use ringtap_buffer::RingBuffer;
//!
//! // 6 frames of 2x2 elements
//! let mut ring = RingBuffer::<f32>::new(&[6, 2, 2]).unwrap();
//! assert_eq!(ring.frame_len(), 4);
//!
//! // One frame per 4 elements
//! ring.write(&[0.0, 0.1, 0.2, 0.3]).unwrap();
//! assert_eq!(ring.read(None).unwrap().len(), 4);
//! ```
//!
//! # Overwrite protection
//!
//! Writes are all-or-nothing. A write that would clobber frames the slowest
//! reader has not consumed is rejected with [`BufferError::Overwrite`], and
//! [`RingBuffer::is_overwriting`] probes headroom without side effects:
//!
//! ```
//! use ringtap_buffer::RingBuffer;
//!
//! let mut ring = RingBuffer::<i32>::new(&[4]).unwrap();
//! ring.write(&[1, 2, 3]).unwrap();
//!
//! assert!(ring.is_overwriting(2));
//! assert!(ring.write(&[4, 5]).is_err());
//!
//! // Consuming frames frees the slots
//! ring.read(Some(2)).unwrap();
//! ring.write(&[4, 5]).unwrap();
//! ```
//!
//! # Multiple readers
//!
//! Every buffer starts with a reader named [`DEFAULT_READER`]; more are
//! registered with [`RingBuffer::set_read_index`]. Reading through one
//! cursor never affects another:
//!
//! ```
//! use ringtap_buffer::RingBuffer;
//!
//! let mut ring = RingBuffer::<i32>::new(&[8]).unwrap();
//! ring.write(&[1, 2, 3, 4]).unwrap();
//!
//! ring.set_read_index("monitor", 0);
//! assert_eq!(ring.read(None).unwrap(), vec![1, 2, 3, 4]);
//! assert_eq!(ring.read_from("monitor", None).unwrap(), vec![1, 2, 3, 4]);
//! ```
//!
//! # Long-running sessions
//!
//! Cursors are logical `u64` frame counts that grow for as long as the
//! buffer is in use. [`RingBuffer::rebase`] shifts all cursors down by the
//! slowest reader's position (rotating storage to match) so they stay small
//! on sessions that stream for days.
//!
//! # Threading
//!
//! The buffer is synchronous and single-owner; mutating operations take
//! `&mut self`. Callers that share it across threads must provide their own
//! mutual exclusion.

mod error;
mod ring;

pub use error::BufferError;
pub use ring::{DEFAULT_READER, RingBuffer};
