//! Growable byte buffer with a read/write cursor.

use scriptbridge_core::native_value;

/// Byte buffer with a cursor, used to move bulk data in and out of GPU buffers.
///
/// Writes overwrite from the cursor and grow the buffer as needed; reads
/// stop at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorBuffer {
    buffer: Vec<u8>,
    position: usize,
}

impl VectorBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing bytes with the cursor at the start.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: bytes.into(),
            position: 0,
        }
    }

    /// Write bytes at the cursor. Returns the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let end = self.position + data.len();
        if end > self.buffer.len() {
            self.buffer.resize(end, 0);
        }
        self.buffer[self.position..end].copy_from_slice(data);
        self.position = end;
        data.len()
    }

    /// Read up to `dest.len()` bytes from the cursor. Returns the number read.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        let available = self.buffer.len() - self.position;
        let count = dest.len().min(available);
        dest[..count].copy_from_slice(&self.buffer[self.position..self.position + count]);
        self.position += count;
        count
    }

    /// Move the cursor, clamped to the size. Returns the new position.
    pub fn seek(&mut self, position: usize) -> usize {
        self.position = position.min(self.buffer.len());
        self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// The whole contents, independent of the cursor.
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Drop the contents and rewind.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.position = 0;
    }
}

native_value!(VectorBuffer, "VectorBuffer");
