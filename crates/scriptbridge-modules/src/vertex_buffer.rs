//! VertexBuffer bindings. Element masks and semantics cross as plain integers.

use std::rc::Rc;

use scriptbridge_engine::{
    Context, ElementMask, ElementSemantic, Object, VectorBuffer, VertexBuffer, VertexElement,
};
use scriptbridge_registry::{ClassBuilder, Module};

use crate::bulk_data::{get_bulk_data, set_bulk_data, set_bulk_data_range};

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn set_size_0(buffer: &VertexBuffer, vertex_count: u32, element_mask: u32) -> bool {
    buffer.set_size(
        vertex_count,
        ElementMask::from_bits_truncate(element_mask),
        false,
    )
}

pub fn set_size_1(
    buffer: &VertexBuffer,
    vertex_count: u32,
    element_mask: u32,
    dynamic: bool,
) -> bool {
    buffer.set_size(
        vertex_count,
        ElementMask::from_bits_truncate(element_mask),
        dynamic,
    )
}

pub fn set_data_0(buffer: &VertexBuffer, source: VectorBuffer) -> bool {
    set_bulk_data(buffer, &source)
}

pub fn set_data_1(
    buffer: &VertexBuffer,
    source: VectorBuffer,
    start: u32,
    count: u32,
    discard: bool,
) -> bool {
    set_bulk_data_range(buffer, &source, start as usize, count as usize, discard)
}

pub fn get_data(buffer: &VertexBuffer) -> VectorBuffer {
    get_bulk_data(buffer)
}

fn has_element(buffer: &VertexBuffer, element: u32) -> bool {
    buffer.has_element(ElementMask::from_bits_truncate(element))
}

pub fn get_element_0(buffer: &VertexBuffer, semantic: u32) -> Option<VertexElement> {
    get_element_1(buffer, semantic, 0)
}

/// Null for an unknown semantic or a missing element.
pub fn get_element_1(buffer: &VertexBuffer, semantic: u32, index: u8) -> Option<VertexElement> {
    buffer.element(ElementSemantic::try_from(semantic).ok()?, index)
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let context = Rc::clone(context);
    let mut module = Module::new("vertex_buffer").class(
        ClassBuilder::<VertexBuffer>::new()
            .base::<dyn Object>()
            .static_function("new", move || context.create::<VertexBuffer>())
            .method("SetSize", set_size_0)
            .method("SetSize", set_size_1)
            .method("SetData", set_data_0)
            .method("SetData", set_data_1)
            .method("GetData", get_data)
            .const_method("HasElement", has_element)
            .const_method("GetElement", get_element_0)
            .const_method("GetElement", get_element_1)
            .property("shadowed", VertexBuffer::is_shadowed, VertexBuffer::set_shadowed)
            .readonly_property("dynamic", VertexBuffer::is_dynamic)
            .readonly_property("vertexCount", VertexBuffer::vertex_count)
            .readonly_property("vertexSize", VertexBuffer::vertex_size)
            .readonly_property("elementMask", |b: &VertexBuffer| b.element_mask().bits()),
    );
    for (name, flag) in ElementMask::all().iter_names() {
        module = module.constant(&format!("MASK_{name}"), flag.bits());
    }
    for semantic in ElementSemantic::ALL {
        module = module.constant(&format!("SEM_{}", semantic.name()), u32::from(semantic));
    }
    module
        .constant("MASK_NONE", 0u32)
        .constant("MAX_VERTEX_ELEMENT_SEMANTICS", ElementSemantic::ALL.len() as u32)
        .constant("MAX_VERTEX_ELEMENTS", ElementMask::all().iter().count() as u32)
}
