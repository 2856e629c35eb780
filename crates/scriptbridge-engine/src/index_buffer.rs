use std::cell::Cell;

use crate::buffer::{BufferStorage, LockableBuffer};
use crate::context::{Context, ObjectFactory};

/// Index buffer with 16-bit or 32-bit indices.
#[derive(Debug, Default)]
pub struct IndexBuffer {
    storage: BufferStorage,
    shadowed: Cell<bool>,
}

impl_object!(IndexBuffer, "IndexBuffer");

impl IndexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `index_count` indices, four bytes each if `large_indices`.
    pub fn set_size(&self, index_count: u32, large_indices: bool, dynamic: bool) -> bool {
        let index_size = if large_indices { 4 } else { 2 };
        self.storage.resize(index_count as usize, index_size, dynamic);
        true
    }

    pub fn set_shadowed(&self, enable: bool) {
        self.shadowed.set(enable);
    }

    pub fn is_shadowed(&self) -> bool {
        self.shadowed.get()
    }

    pub fn is_dynamic(&self) -> bool {
        self.storage.is_dynamic()
    }

    pub fn index_count(&self) -> u32 {
        self.storage.element_count() as u32
    }

    pub fn index_size(&self) -> u32 {
        self.storage.element_size() as u32
    }
}

impl LockableBuffer for IndexBuffer {
    fn storage(&self) -> &BufferStorage {
        &self.storage
    }
}

impl ObjectFactory for IndexBuffer {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}
