//! Generational arena of script handles.

use std::fmt;

use crate::{ObjectWrapper, TypeHash};

/// Handle to a heap slot holding a bridged native object.
///
/// The generation prevents a collected slot from being reached through an
/// old handle after the slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    /// Index into ObjectHeap.slots
    pub index: u32,
    /// Generation for use-after-collect detection
    pub generation: u32,
    /// Resolved type of the bridged object, fixed when the handle is created
    pub type_hash: TypeHash,
}

impl ObjectHandle {
    /// Create a new object handle.
    pub fn new(index: u32, generation: u32, type_hash: TypeHash) -> Self {
        Self {
            index,
            generation,
            type_hash,
        }
    }
}

/// Storage for script handles with generational indices.
///
/// Each slot owns one [`ObjectWrapper`], which in turn owns one strong
/// reference to a native object. The slot's own count tracks script-side
/// aliases; the wrapper (and with it the native reference) is dropped exactly
/// once, when that count reaches zero or the heap is torn down.
pub struct ObjectHeap {
    slots: Vec<HeapSlot>,
    free_list: Vec<u32>,
}

struct HeapSlot {
    generation: u32,
    value: Option<Box<dyn ObjectWrapper>>,
    ref_count: u32,
}

impl ObjectHeap {
    /// Create a new empty object heap.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Allocate a slot owning the given wrapper, with one script reference.
    pub fn allocate<W: ObjectWrapper + 'static>(&mut self, wrapper: W) -> ObjectHandle {
        let identity = wrapper.resolve_type();
        let boxed: Box<dyn ObjectWrapper> = Box::new(wrapper);

        let handle = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(boxed);
            slot.ref_count = 1;
            ObjectHandle::new(index, slot.generation, identity.hash)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(HeapSlot {
                generation: 0,
                value: Some(boxed),
                ref_count: 1,
            });
            ObjectHandle::new(index, 0, identity.hash)
        };

        log::debug!(
            "allocated handle {}:{} for {}",
            handle.index,
            handle.generation,
            identity.name
        );
        handle
    }

    /// Get the wrapper behind a handle.
    ///
    /// Returns None if the handle is stale.
    pub fn get(&self, handle: ObjectHandle) -> Option<&dyn ObjectWrapper> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_deref()
    }

    /// Add a script-side alias.
    pub fn add_ref(&mut self, handle: ObjectHandle) -> bool {
        if let Some(slot) = self.slots.get_mut(handle.index as usize)
            && slot.generation == handle.generation
            && slot.value.is_some()
        {
            slot.ref_count = slot.ref_count.saturating_add(1);
            return true;
        }
        false
    }

    /// Drop a script-side alias, collecting the slot when none remain.
    ///
    /// Returns true if the slot was collected.
    pub fn release(&mut self, handle: ObjectHandle) -> bool {
        if let Some(slot) = self.slots.get_mut(handle.index as usize)
            && slot.generation == handle.generation
            && slot.value.is_some()
        {
            slot.ref_count = slot.ref_count.saturating_sub(1);
            if slot.ref_count == 0 {
                Self::collect_slot(slot);
                self.free_list.push(handle.index);
                log::debug!("collected handle {}:{}", handle.index, handle.generation);
                return true;
            }
        }
        false
    }

    /// Collect a slot immediately, regardless of outstanding aliases.
    pub fn free(&mut self, handle: ObjectHandle) {
        if let Some(slot) = self.slots.get_mut(handle.index as usize)
            && slot.generation == handle.generation
            && slot.value.is_some()
        {
            Self::collect_slot(slot);
            self.free_list.push(handle.index);
        }
    }

    /// Collect every live slot. Used at runtime teardown.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.is_some() {
                Self::collect_slot(slot);
                self.free_list.push(index as u32);
            }
        }
    }

    fn collect_slot(slot: &mut HeapSlot) {
        // Dropping the wrapper releases its native reference.
        slot.value = None;
        slot.ref_count = 0;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Get the script reference count for a handle.
    pub fn ref_count(&self, handle: ObjectHandle) -> Option<u32> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation == handle.generation && slot.value.is_some() {
            Some(slot.ref_count)
        } else {
            None
        }
    }

    /// Number of live slots.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.value.is_some()).count()
    }
}

impl Default for ObjectHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHeap")
            .field("slot_count", &self.slots.len())
            .field("free_count", &self.free_list.len())
            .finish()
    }
}
