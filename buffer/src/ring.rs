//! Multi-reader ring buffer implementation.

use std::collections::HashMap;

use crate::error::BufferError;

/// Name of the reader cursor that every buffer starts with.
pub const DEFAULT_READER: &str = "default";

/// A fixed-capacity circular buffer with one writer and any number of
/// named readers.
///
/// `RingBuffer<T>` stores frames of a fixed shape in a dense, pre-allocated
/// block. The leading dimension is circular: a buffer created with shape
/// `[capacity, d1, d2, ...]` holds `capacity` frames of `d1 * d2 * ...`
/// elements each, and writes wrap around the end of storage. A shape with a
/// single component holds scalar frames.
///
/// The writer and every reader keep *logical* positions: monotonically
/// increasing frame counts that are mapped to physical slots with
/// `position % capacity`. Each reader advances independently, so several
/// consumers can drain the same stream at their own pace.
///
/// Unlike a sliding-window buffer that silently drops the oldest frames,
/// this buffer protects unread data: a write that would clobber frames the
/// slowest reader has not consumed fails with [`BufferError::Overwrite`]
/// and leaves the buffer untouched.
///
/// # Semantics
///
/// - **Write**: all-or-nothing; rejected when it would overwrite unread data
/// - **Read**: returns up to the requested number of frames, never blocks
/// - **Readers**: created and repositioned with [`set_read_index`]
///
/// [`set_read_index`]: RingBuffer::set_read_index
///
/// # Example
///
/// ```
/// use ringtap_buffer::RingBuffer;
///
/// // 8 scalar frames
/// let mut ring = RingBuffer::<i32>::new(&[8]).unwrap();
/// ring.write(&[1, 2, 3]).unwrap();
///
/// // A second reader sees the stream from the position it was given
/// ring.set_read_index("monitor", 0);
///
/// assert_eq!(ring.read(None).unwrap(), vec![1, 2, 3]);
/// assert_eq!(ring.read_from("monitor", Some(2)).unwrap(), vec![1, 2]);
/// ```
///
/// # Threading
///
/// All operations take `&self` or `&mut self` and run to completion on the
/// caller's thread; there is no internal locking. Wrap the buffer in a
/// `Mutex` if it must be shared, and keep [`rebase`](RingBuffer::rebase)
/// inside the same critical section as concurrent writes and reads.
#[derive(Debug)]
pub struct RingBuffer<T> {
    storage: Vec<T>,
    capacity: usize,
    frame_shape: Vec<usize>,
    frame_len: usize,
    write_index: u64,
    read_indices: HashMap<String, u64>,
}

impl<T: Clone + Default> RingBuffer<T> {
    /// Creates a buffer from a shape: `shape[0]` is the capacity along the
    /// circular dimension, the remaining components describe one frame.
    ///
    /// Storage for `shape[0] * shape[1] * ...` elements is allocated once,
    /// filled with `T::default()`, and never resized. The buffer starts with
    /// a single reader named [`DEFAULT_READER`] at position 0.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Allocation`] when the shape is empty, any
    /// dimension is zero, the element count overflows `usize`, or the
    /// allocation itself fails.
    pub fn new(shape: &[usize]) -> Result<Self, BufferError> {
        let invalid = || BufferError::Allocation {
            shape: shape.to_vec(),
        };

        let (&capacity, frame_shape) = shape.split_first().ok_or_else(invalid)?;
        if capacity == 0 || frame_shape.contains(&0) {
            return Err(invalid());
        }

        let frame_len = frame_shape
            .iter()
            .try_fold(1usize, |len, &dim| len.checked_mul(dim))
            .ok_or_else(invalid)?;
        let total = capacity.checked_mul(frame_len).ok_or_else(invalid)?;

        let mut storage = Vec::new();
        storage.try_reserve_exact(total).map_err(|_| invalid())?;
        storage.resize(total, T::default());

        let mut read_indices = HashMap::new();
        read_indices.insert(DEFAULT_READER.to_string(), 0);

        Ok(Self {
            storage,
            capacity,
            frame_shape: frame_shape.to_vec(),
            frame_len,
            write_index: 0,
            read_indices,
        })
    }
}

impl<T> RingBuffer<T> {
    /// Returns the number of frames the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the trailing dimensions of one frame (empty for scalars).
    pub fn frame_shape(&self) -> &[usize] {
        &self.frame_shape
    }

    /// Returns the number of elements in one frame.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Returns the total number of frames ever written.
    pub fn frames_written(&self) -> u64 {
        self.write_index
    }

    /// Returns the logical position of the named reader.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::UnknownReader`] when no such reader exists.
    pub fn read_index(&self, reader: &str) -> Result<u64, BufferError> {
        self.read_indices
            .get(reader)
            .copied()
            .ok_or_else(|| BufferError::UnknownReader(reader.to_string()))
    }

    /// Returns the number of unread frames for the named reader.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::UnknownReader`] when no such reader exists.
    pub fn available(&self, reader: &str) -> Result<usize, BufferError> {
        let position = self.read_index(reader)?;
        Ok(self.write_index.saturating_sub(position) as usize)
    }

    /// Returns the names of all registered readers, in unspecified order.
    pub fn readers(&self) -> impl Iterator<Item = &str> {
        self.read_indices.keys().map(String::as_str)
    }

    /// Creates the named reader, or repositions it if it already exists.
    ///
    /// The position is a logical frame count. No bounds check is performed:
    /// the caller is responsible for choosing a value inside the window
    /// `[frames_written() - capacity(), frames_written()]`. A position
    /// outside that window makes [`available`](RingBuffer::available) and
    /// [`writable`](RingBuffer::writable) meaningless until it is corrected,
    /// and frames read through it may be stale.
    pub fn set_read_index(&mut self, reader: &str, index: u64) {
        self.read_indices.insert(reader.to_string(), index);
    }

    /// Returns whether writing `frames` frames right now would overwrite
    /// data the slowest reader has not yet consumed.
    ///
    /// Pure query; calling it any number of times changes nothing. `write`
    /// performs exactly this check before touching storage, so the
    /// predicate doubles as a headroom probe for producers.
    pub fn is_overwriting(&self, frames: usize) -> bool {
        let lag = self.write_index.saturating_sub(self.min_read_index());
        lag + frames as u64 > self.capacity as u64
    }

    /// Returns the number of frames that can be written without
    /// overwriting unread data.
    pub fn writable(&self) -> usize {
        let lag = self.write_index.saturating_sub(self.min_read_index());
        (self.capacity as u64).saturating_sub(lag) as usize
    }

    /// Shifts all logical positions down by the slowest reader's position,
    /// rotating storage so every surviving frame keeps its slot mapping.
    ///
    /// Logical positions grow without bound while the buffer is in use.
    /// Calling this periodically keeps them small on long-running sessions
    /// instead of relying on a counter wrapping around. After the call the
    /// slowest reader sits at position 0, every other position is reduced
    /// by the same amount, and all unread data is still readable.
    ///
    /// Returns the new minimum read position as a self-check value for the
    /// caller; it is expected to be 0.
    pub fn rebase(&mut self) -> u64 {
        let shift = self.min_read_index();
        if shift == 0 {
            return 0;
        }

        // Position p lives in slot p % capacity. After subtracting `shift`
        // everywhere, the slot for what is now p - shift must still hold the
        // same frame, which a left rotation by shift % capacity guarantees.
        let slots = (shift % self.capacity as u64) as usize;
        self.storage.rotate_left(slots * self.frame_len);

        self.write_index = self.write_index.saturating_sub(shift);
        for position in self.read_indices.values_mut() {
            *position -= shift;
        }
        self.min_read_index()
    }

    fn min_read_index(&self) -> u64 {
        // The map is never empty: "default" exists from construction and
        // readers cannot be removed.
        self.read_indices
            .values()
            .copied()
            .min()
            .unwrap_or(self.write_index)
    }

    /// Element offset of the physical slot for a logical frame position.
    fn slot_offset(&self, position: u64) -> usize {
        (position % self.capacity as u64) as usize * self.frame_len
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Appends whole frames to the buffer.
    ///
    /// `data` is a dense block whose length must be a multiple of
    /// [`frame_len`](RingBuffer::frame_len); it may span any number of
    /// frames, including zero. The copy wraps around the end of storage
    /// when needed.
    ///
    /// The write is all-or-nothing: if it would overwrite frames the
    /// slowest reader has not consumed, nothing is copied and no cursor
    /// moves. Because no reader can trail by more than `capacity`, a block
    /// of more than `capacity` frames is always rejected, even on a buffer
    /// whose readers are fully caught up.
    ///
    /// # Errors
    ///
    /// - [`BufferError::FrameMismatch`] when `data` does not form whole
    ///   frames; checked before the overwrite check.
    /// - [`BufferError::Overwrite`] when unread data would be clobbered.
    pub fn write(&mut self, data: &[T]) -> Result<(), BufferError> {
        if data.len() % self.frame_len != 0 {
            return Err(BufferError::FrameMismatch {
                len: data.len(),
                frame_len: self.frame_len,
            });
        }
        let frames = data.len() / self.frame_len;

        if self.is_overwriting(frames) {
            return Err(BufferError::Overwrite {
                requested: frames,
                writable: self.writable(),
            });
        }

        let start = self.slot_offset(self.write_index);
        let total = self.storage.len();
        if start + data.len() <= total {
            self.storage[start..start + data.len()].clone_from_slice(data);
        } else {
            // Split at the end of storage and wrap the rest to the front.
            let (head, tail) = data.split_at(total - start);
            self.storage[start..].clone_from_slice(head);
            self.storage[..tail.len()].clone_from_slice(tail);
        }

        self.write_index += frames as u64;
        Ok(())
    }

    /// Reads frames for the default reader.
    ///
    /// See [`read_from`](RingBuffer::read_from).
    pub fn read(&mut self, count: Option<usize>) -> Result<Vec<T>, BufferError> {
        self.read_from(DEFAULT_READER, count)
    }

    /// Reads up to `count` frames for the named reader and advances its
    /// position by the number of frames returned.
    ///
    /// With `count = None` everything available to the reader is returned.
    /// Otherwise the request is clamped to what has been written, so the
    /// result may hold fewer frames than asked for; an empty result is not
    /// an error. The returned block is always a fresh copy, since later
    /// writes may reuse the physical slots it came from; its length is the
    /// frame count times [`frame_len`](RingBuffer::frame_len).
    ///
    /// Frames come back in write order, with no gaps and no duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::UnknownReader`] when no such reader exists.
    pub fn read_from(&mut self, reader: &str, count: Option<usize>) -> Result<Vec<T>, BufferError> {
        let Some(position) = self.read_indices.get_mut(reader) else {
            return Err(BufferError::UnknownReader(reader.to_string()));
        };
        let start = *position;

        let available = self.write_index.saturating_sub(start) as usize;
        let frames = count.map_or(available, |n| n.min(available));
        *position += frames as u64;

        Ok(self.copy_frames(start, frames))
    }

    /// Copies `frames` frames starting at logical position `position` into
    /// a fresh block, splitting at the storage boundary when they wrap.
    fn copy_frames(&self, position: u64, frames: usize) -> Vec<T> {
        let start = self.slot_offset(position);
        let len = frames * self.frame_len;
        let total = self.storage.len();

        let mut out = Vec::with_capacity(len);
        let head = &self.storage[start..total.min(start + len)];
        out.extend_from_slice(head);
        if head.len() < len {
            out.extend_from_slice(&self.storage[..len - head.len()]);
        }
        out
    }
}
