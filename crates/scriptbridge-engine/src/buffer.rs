//! Lockable element storage shared by index and vertex buffers.
//!
//! A buffer holds `element_count * element_size` bytes. Bulk access goes
//! through [`LockableBuffer::lock`], which hands out a window over a range of
//! elements, and a matching [`LockableBuffer::unlock`]. A buffer can be
//! locked once at a time.

use std::cell::{Cell, RefCell, RefMut};

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Lock state of a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum LockState {
    #[default]
    None = 0,
    Hardware = 1,
    Shadow = 2,
    Scratch = 3,
}

/// Element storage with lock bookkeeping.
#[derive(Debug, Default)]
pub struct BufferStorage {
    data: RefCell<Vec<u8>>,
    element_count: Cell<usize>,
    element_size: Cell<usize>,
    dynamic: Cell<bool>,
    lock_state: Cell<LockState>,
    lock_count: Cell<u32>,
    unlock_count: Cell<u32>,
}

impl BufferStorage {
    /// Reallocate for `count` elements of `size` bytes, zero filled.
    pub fn resize(&self, count: usize, size: usize, dynamic: bool) {
        self.release_lock();
        self.element_count.set(count);
        self.element_size.set(size);
        self.dynamic.set(dynamic);
        let mut data = self.data.borrow_mut();
        data.clear();
        data.resize(count * size, 0);
    }

    pub fn element_count(&self) -> usize {
        self.element_count.get()
    }

    pub fn element_size(&self) -> usize {
        self.element_size.get()
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic.get()
    }

    pub fn lock_state(&self) -> LockState {
        self.lock_state.get()
    }

    /// Number of successful locks so far.
    pub fn lock_count(&self) -> u32 {
        self.lock_count.get()
    }

    /// Number of unlocks of a held lock so far.
    pub fn unlock_count(&self) -> u32 {
        self.unlock_count.get()
    }

    /// Copy of the whole contents, bypassing the lock protocol.
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    fn lock(&self, start: usize, count: usize) -> Option<RefMut<'_, [u8]>> {
        if self.lock_state.get() != LockState::None {
            log::warn!("buffer already locked");
            return None;
        }
        if count == 0 || start + count > self.element_count.get() {
            log::warn!(
                "illegal range {}..{} for locking buffer of {} elements",
                start,
                start + count,
                self.element_count.get()
            );
            return None;
        }
        let size = self.element_size.get();
        let data = self.data.try_borrow_mut().ok()?;
        self.lock_state.set(LockState::Shadow);
        self.lock_count.set(self.lock_count.get() + 1);
        Some(RefMut::map(data, |d| &mut d[start * size..(start + count) * size]))
    }

    fn unlock(&self) {
        if self.release_lock() {
            self.unlock_count.set(self.unlock_count.get() + 1);
        }
    }

    fn release_lock(&self) -> bool {
        self.lock_state.replace(LockState::None) != LockState::None
    }

    fn write(&self, data: &[u8], start: usize, count: usize) -> bool {
        let size = self.element_size.get();
        if size == 0 {
            log::warn!("element size not defined, can not set buffer data");
            return false;
        }
        if start + count > self.element_count.get() {
            log::warn!("illegal range for setting new buffer data");
            return false;
        }
        let bytes = count * size;
        if data.len() < bytes {
            log::warn!(
                "{} bytes supplied where {} are needed for buffer data",
                data.len(),
                bytes
            );
            return false;
        }
        let Ok(mut storage) = self.data.try_borrow_mut() else {
            return false;
        };
        storage[start * size..start * size + bytes].copy_from_slice(&data[..bytes]);
        true
    }
}

/// A buffer of fixed-size elements supporting paired lock/unlock access.
pub trait LockableBuffer {
    /// The backing storage.
    fn storage(&self) -> &BufferStorage;

    fn element_count(&self) -> usize {
        self.storage().element_count()
    }

    fn element_size(&self) -> usize {
        self.storage().element_size()
    }

    /// Lock a range of elements for access.
    ///
    /// Fails if the buffer is already locked or the range is empty or out of
    /// bounds. A successful lock must be followed by exactly one
    /// [`unlock`](LockableBuffer::unlock).
    fn lock(&self, start: usize, count: usize, _discard: bool) -> Option<RefMut<'_, [u8]>> {
        self.storage().lock(start, count)
    }

    /// Release a held lock. Does nothing if the buffer is not locked.
    fn unlock(&self) {
        self.storage().unlock()
    }

    /// Replace the whole contents.
    fn set_data(&self, data: &[u8]) -> bool {
        let storage = self.storage();
        storage.write(data, 0, storage.element_count())
    }

    /// Replace a range of elements.
    fn set_data_range(&self, data: &[u8], start: usize, count: usize, _discard: bool) -> bool {
        let storage = self.storage();
        if start == 0 && count == storage.element_count() {
            return self.set_data(data);
        }
        if count == 0 {
            return true;
        }
        storage.write(data, start, count)
    }
}
