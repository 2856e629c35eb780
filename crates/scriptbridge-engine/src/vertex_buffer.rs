use std::cell::Cell;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use scriptbridge_core::native_value;

use crate::buffer::{BufferStorage, LockableBuffer};
use crate::context::{Context, ObjectFactory};

bitflags! {
    /// Vertex elements present in each vertex, in layout order.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ElementMask: u32 {
        const POSITION = 0x1;
        const NORMAL = 0x2;
        const COLOR = 0x4;
        const TEXCOORD1 = 0x8;
        const TEXCOORD2 = 0x10;
        const CUBETEXCOORD1 = 0x20;
        const CUBETEXCOORD2 = 0x40;
        const TANGENT = 0x80;
        const BLENDWEIGHTS = 0x100;
        const BLENDINDICES = 0x200;
        const INSTANCEMATRIX1 = 0x400;
        const INSTANCEMATRIX2 = 0x800;
        const INSTANCEMATRIX3 = 0x1000;
        const OBJECTINDEX = 0x2000;
    }
}

impl ElementMask {
    /// Byte size of each element, indexed by bit position.
    const ELEMENT_SIZES: [usize; 14] = [12, 12, 4, 8, 8, 12, 12, 16, 16, 4, 16, 16, 16, 4];

    /// Size in bytes of one vertex with these elements.
    pub fn vertex_size(self) -> usize {
        Self::ELEMENT_SIZES
            .iter()
            .enumerate()
            .filter(|(bit, _)| self.bits() & (1 << bit) != 0)
            .map(|(_, size)| size)
            .sum()
    }

    /// Semantic, semantic index and per-instance flag of each element, by bit position.
    const ELEMENT_LAYOUT: [(ElementSemantic, u8, bool); 14] = [
        (ElementSemantic::Position, 0, false),
        (ElementSemantic::Normal, 0, false),
        (ElementSemantic::Color, 0, false),
        (ElementSemantic::TexCoord, 0, false),
        (ElementSemantic::TexCoord, 1, false),
        (ElementSemantic::TexCoord, 0, false),
        (ElementSemantic::TexCoord, 1, false),
        (ElementSemantic::Tangent, 0, false),
        (ElementSemantic::BlendWeights, 0, false),
        (ElementSemantic::BlendIndices, 0, false),
        (ElementSemantic::TexCoord, 4, true),
        (ElementSemantic::TexCoord, 5, true),
        (ElementSemantic::TexCoord, 6, true),
        (ElementSemantic::ObjectIndex, 0, false),
    ];

    /// Elements present in this mask with their byte offsets, in layout order.
    pub fn elements(self) -> Vec<VertexElement> {
        let mut offset = 0;
        let mut elements = Vec::new();
        for (bit, &size) in Self::ELEMENT_SIZES.iter().enumerate() {
            if self.bits() & (1 << bit) == 0 {
                continue;
            }
            let (semantic, index, per_instance) = Self::ELEMENT_LAYOUT[bit];
            elements.push(VertexElement {
                semantic,
                index,
                per_instance,
                offset: offset as u32,
                size: size as u32,
            });
            offset += size;
        }
        elements
    }
}

/// What a vertex element means to the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum ElementSemantic {
    Position = 0,
    Normal,
    Binormal,
    Tangent,
    TexCoord,
    Color,
    BlendWeights,
    BlendIndices,
    ObjectIndex,
}

impl ElementSemantic {
    pub const ALL: [ElementSemantic; 9] = [
        ElementSemantic::Position,
        ElementSemantic::Normal,
        ElementSemantic::Binormal,
        ElementSemantic::Tangent,
        ElementSemantic::TexCoord,
        ElementSemantic::Color,
        ElementSemantic::BlendWeights,
        ElementSemantic::BlendIndices,
        ElementSemantic::ObjectIndex,
    ];

    /// Upper-case name used for the exported constant.
    pub fn name(self) -> &'static str {
        match self {
            ElementSemantic::Position => "POSITION",
            ElementSemantic::Normal => "NORMAL",
            ElementSemantic::Binormal => "BINORMAL",
            ElementSemantic::Tangent => "TANGENT",
            ElementSemantic::TexCoord => "TEXCOORD",
            ElementSemantic::Color => "COLOR",
            ElementSemantic::BlendWeights => "BLENDWEIGHTS",
            ElementSemantic::BlendIndices => "BLENDINDICES",
            ElementSemantic::ObjectIndex => "OBJECTINDEX",
        }
    }
}

/// One element of a vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexElement {
    pub semantic: ElementSemantic,
    pub index: u8,
    pub per_instance: bool,
    /// Byte offset from the start of the vertex.
    pub offset: u32,
    pub size: u32,
}

native_value!(VertexElement, "VertexElement");

/// Vertex buffer described by an element mask.
#[derive(Debug, Default)]
pub struct VertexBuffer {
    storage: BufferStorage,
    element_mask: Cell<ElementMask>,
    shadowed: Cell<bool>,
}

impl_object!(VertexBuffer, "VertexBuffer");

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `vertex_count` vertices laid out per `mask`.
    ///
    /// Fails for an empty mask.
    pub fn set_size(&self, vertex_count: u32, mask: ElementMask, dynamic: bool) -> bool {
        if mask.is_empty() {
            log::warn!("vertex buffer needs at least one element");
            return false;
        }
        self.element_mask.set(mask);
        self.storage
            .resize(vertex_count as usize, mask.vertex_size(), dynamic);
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

    pub fn vertex_count(&self) -> u32 {
        self.storage.element_count() as u32
    }

    pub fn vertex_size(&self) -> u32 {
        self.storage.element_size() as u32
    }

    pub fn element_mask(&self) -> ElementMask {
        self.element_mask.get()
    }

    /// True if every element in `mask` is present.
    pub fn has_element(&self, mask: ElementMask) -> bool {
        self.element_mask.get().contains(mask)
    }

    /// First element with this semantic and semantic index.
    pub fn element(&self, semantic: ElementSemantic, index: u8) -> Option<VertexElement> {
        self.element_mask
            .get()
            .elements()
            .into_iter()
            .find(|e| e.semantic == semantic && e.index == index)
    }
}

impl LockableBuffer for VertexBuffer {
    fn storage(&self) -> &BufferStorage {
        &self.storage
    }
}

impl ObjectFactory for VertexBuffer {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}
