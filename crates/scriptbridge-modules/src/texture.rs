//! Texture2D bindings.

use std::rc::Rc;

use scriptbridge_engine::{Context, Object, Texture2D, TextureUsage};
use scriptbridge_registry::{ClassBuilder, Module};

pub fn set_size_0(texture: &Texture2D, width: i32, height: i32, format: u32) -> bool {
    texture.set_size(width, height, format, TextureUsage::Static)
}

pub fn set_size_1(texture: &Texture2D, width: i32, height: i32, format: u32, usage: u32) -> bool {
    let Ok(usage) = TextureUsage::try_from(usage) else {
        log::warn!("invalid texture usage {}", usage);
        return false;
    };
    texture.set_size(width, height, format, usage)
}

pub fn module(context: &Rc<Context>) -> Module {
    let context = Rc::clone(context);
    Module::new("texture")
        .class(
            ClassBuilder::<Texture2D>::new()
                .base::<dyn Object>()
                .static_function("new", move || context.create::<Texture2D>())
                .method("SetSize", set_size_0)
                .method("SetSize", set_size_1)
                .readonly_property("width", Texture2D::width)
                .readonly_property("height", Texture2D::height)
                .readonly_property("format", Texture2D::format)
                .readonly_property("levels", Texture2D::levels)
                .readonly_property("usage", |t: &Texture2D| u32::from(t.usage()))
                .readonly_property("renderTarget", Texture2D::is_render_target),
        )
        .constant("TEXTURE_STATIC", u32::from(TextureUsage::Static))
        .constant("TEXTURE_DYNAMIC", u32::from(TextureUsage::Dynamic))
        .constant("TEXTURE_RENDERTARGET", u32::from(TextureUsage::RenderTarget))
        .constant("TEXTURE_DEPTHSTENCIL", u32::from(TextureUsage::DepthStencil))
}
