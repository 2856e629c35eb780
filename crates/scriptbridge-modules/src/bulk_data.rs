//! Bulk data transfer between byte buffers and lockable GPU buffers.
//!
//! Writes check that the source holds enough bytes before native memory is
//! touched. Reads lock the whole buffer through a [`LockGuard`], so the
//! matching unlock happens on every path that acquired the lock, and only on
//! those.

use std::cell::RefMut;
use std::ops::Deref;

use scriptbridge_engine::{LockableBuffer, VectorBuffer};

/// A held lock on a buffer, released when dropped.
pub struct LockGuard<'a, B: LockableBuffer + ?Sized> {
    buffer: &'a B,
    window: Option<RefMut<'a, [u8]>>,
}

impl<'a, B: LockableBuffer + ?Sized> LockGuard<'a, B> {
    /// Lock `count` elements from `start`. `None` if the lock fails.
    pub fn lock(buffer: &'a B, start: usize, count: usize, discard: bool) -> Option<Self> {
        let window = buffer.lock(start, count, discard)?;
        Some(Self {
            buffer,
            window: Some(window),
        })
    }
}

impl<B: LockableBuffer + ?Sized> Deref for LockGuard<'_, B> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.window.as_deref().unwrap_or_default()
    }
}

impl<B: LockableBuffer + ?Sized> Drop for LockGuard<'_, B> {
    fn drop(&mut self) {
        // Give the storage back before releasing the lock.
        self.window = None;
        self.buffer.unlock();
    }
}

/// Replace the whole contents of `target` from `source`.
///
/// Returns false, leaving `target` untouched, if it has no elements or
/// `source` is shorter than `element_count * element_size` bytes.
pub fn set_bulk_data<B: LockableBuffer + ?Sized>(target: &B, source: &VectorBuffer) -> bool {
    let count = target.element_count();
    if count == 0 {
        log::warn!("can not set data on a buffer with no elements");
        return false;
    }
    let required = count * target.element_size();
    if source.size() < required {
        log::warn!(
            "buffer data needs {} bytes but {} were supplied",
            required,
            source.size()
        );
        return false;
    }
    target.set_data(&source.data()[..required])
}

/// Replace `count` elements of `target` starting at `start` from `source`.
///
/// Returns false, leaving `target` untouched, if `target` has no elements or
/// `source` is shorter than `count * element_size` bytes.
pub fn set_bulk_data_range<B: LockableBuffer + ?Sized>(
    target: &B,
    source: &VectorBuffer,
    start: usize,
    count: usize,
    discard: bool,
) -> bool {
    if target.element_count() == 0 {
        log::warn!("can not set data on a buffer with no elements");
        return false;
    }
    let required = count * target.element_size();
    if source.size() < required {
        log::warn!(
            "buffer data range needs {} bytes but {} were supplied",
            required,
            source.size()
        );
        return false;
    }
    target.set_data_range(&source.data()[..required], start, count, discard)
}

/// Copy the whole contents of `target` into a new byte buffer positioned at
/// its start.
///
/// Returns an empty buffer if the lock fails.
pub fn get_bulk_data<B: LockableBuffer + ?Sized>(target: &B) -> VectorBuffer {
    let mut result = VectorBuffer::new();
    let Some(guard) = LockGuard::lock(target, 0, target.element_count(), false) else {
        log::warn!("could not lock buffer to read its data");
        return result;
    };
    result.write(&guard);
    drop(guard);
    result.seek(0);
    result
}
