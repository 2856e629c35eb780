//! IndexBuffer bindings.

use std::rc::Rc;

use scriptbridge_engine::{Context, IndexBuffer, Object, VectorBuffer};
use scriptbridge_registry::{ClassBuilder, Module};

use crate::bulk_data::{get_bulk_data, set_bulk_data, set_bulk_data_range};

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn set_size_0(buffer: &IndexBuffer, index_count: u32, large_indices: bool) -> bool {
    buffer.set_size(index_count, large_indices, false)
}

pub fn set_size_1(
    buffer: &IndexBuffer,
    index_count: u32,
    large_indices: bool,
    dynamic: bool,
) -> bool {
    buffer.set_size(index_count, large_indices, dynamic)
}

pub fn set_data_0(buffer: &IndexBuffer, source: VectorBuffer) -> bool {
    set_bulk_data(buffer, &source)
}

pub fn set_data_1(
    buffer: &IndexBuffer,
    source: VectorBuffer,
    start: u32,
    count: u32,
    discard: bool,
) -> bool {
    set_bulk_data_range(buffer, &source, start as usize, count as usize, discard)
}

pub fn get_data(buffer: &IndexBuffer) -> VectorBuffer {
    get_bulk_data(buffer)
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let context = Rc::clone(context);
    Module::new("index_buffer").class(
        ClassBuilder::<IndexBuffer>::new()
            .base::<dyn Object>()
            .static_function("new", move || context.create::<IndexBuffer>())
            .method("SetSize", set_size_0)
            .method("SetSize", set_size_1)
            .method("SetData", set_data_0)
            .method("SetData", set_data_1)
            .method("GetData", get_data)
            .property("shadowed", IndexBuffer::is_shadowed, IndexBuffer::set_shadowed)
            .readonly_property("dynamic", IndexBuffer::is_dynamic)
            .readonly_property("indexCount", IndexBuffer::index_count)
            .readonly_property("indexSize", IndexBuffer::index_size),
    )
}
