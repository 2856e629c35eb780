use std::cell::Cell;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::context::{Context, ObjectFactory};

/// How a texture is used by the GPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum TextureUsage {
    #[default]
    Static = 0,
    Dynamic = 1,
    RenderTarget = 2,
    DepthStencil = 3,
}

/// Two-dimensional texture.
#[derive(Debug, Default)]
pub struct Texture2D {
    width: Cell<i32>,
    height: Cell<i32>,
    format: Cell<u32>,
    usage: Cell<TextureUsage>,
    levels: Cell<u32>,
}

impl_object!(Texture2D, "Texture2D");

impl Texture2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set size, format and usage. Fails for non-positive dimensions.
    pub fn set_size(&self, width: i32, height: i32, format: u32, usage: TextureUsage) -> bool {
        if width <= 0 || height <= 0 {
            log::warn!("zero or negative texture dimensions {}x{}", width, height);
            return false;
        }
        self.width.set(width);
        self.height.set(height);
        self.format.set(format);
        self.usage.set(usage);
        let levels = match usage {
            TextureUsage::Static | TextureUsage::Dynamic => {
                32 - (width.max(height) as u32).leading_zeros()
            }
            TextureUsage::RenderTarget | TextureUsage::DepthStencil => 1,
        };
        self.levels.set(levels);
        true
    }

    pub fn width(&self) -> i32 {
        self.width.get()
    }

    pub fn height(&self) -> i32 {
        self.height.get()
    }

    pub fn format(&self) -> u32 {
        self.format.get()
    }

    pub fn usage(&self) -> TextureUsage {
        self.usage.get()
    }

    /// Number of mip levels.
    pub fn levels(&self) -> u32 {
        self.levels.get()
    }

    pub fn is_render_target(&self) -> bool {
        self.usage.get() == TextureUsage::RenderTarget
    }
}

impl ObjectFactory for Texture2D {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}
