//! Graphics subsystem bindings and the `GetGraphics` accessor.

use std::rc::Rc;

use glam::IVec2;
use scriptbridge_engine::{Context, Graphics, Object};
use scriptbridge_registry::{ClassBuilder, Module};

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn set_mode_0(graphics: &Graphics, width: i32, height: i32) -> bool {
    graphics.set_mode(width, height)
}

#[allow(clippy::too_many_arguments)]
pub fn set_mode_1(
    graphics: &Graphics,
    width: i32,
    height: i32,
    fullscreen: bool,
    borderless: bool,
    resizable: bool,
    high_dpi: bool,
    vsync: bool,
    triple_buffer: bool,
    multi_sample: i32,
) -> bool {
    graphics.set_mode_full(
        width,
        height,
        fullscreen,
        borderless,
        resizable,
        high_dpi,
        vsync,
        triple_buffer,
        multi_sample,
    )
}

pub fn set_window_position_0(graphics: &Graphics, position: IVec2) {
    graphics.set_window_position(position);
}

pub fn set_window_position_1(graphics: &Graphics, x: i32, y: i32) {
    graphics.set_window_position(IVec2::new(x, y));
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let context = Rc::clone(context);
    Module::new("graphics")
        .class(
            ClassBuilder::<Graphics>::new()
                .base::<dyn Object>()
                .method("SetMode", set_mode_0)
                .method("SetMode", set_mode_1)
                .method("SetWindowPosition", set_window_position_0)
                .method("SetWindowPosition", set_window_position_1)
                .method("ToggleFullscreen", Graphics::toggle_fullscreen)
                .static_function("GetAlphaFormat", Graphics::alpha_format)
                .static_function("GetRGBFormat", Graphics::rgb_format)
                .static_function("GetRGBAFormat", Graphics::rgba_format)
                .static_function("GetDepthStencilFormat", Graphics::depth_stencil_format)
                .static_function("GetMaxBones", Graphics::max_bones)
                .property("windowTitle", Graphics::window_title, |g: &Graphics, title: String| {
                    g.set_window_title(&title)
                })
                .property("windowPosition", Graphics::window_position, Graphics::set_window_position)
                .property("sRGB", Graphics::srgb, Graphics::set_srgb)
                .readonly_property("width", Graphics::width)
                .readonly_property("height", Graphics::height)
                .readonly_property("fullscreen", Graphics::fullscreen)
                .readonly_property("borderless", Graphics::borderless)
                .readonly_property("resizable", Graphics::resizable)
                .readonly_property("highDPI", Graphics::high_dpi)
                .readonly_property("vsync", Graphics::vsync)
                .readonly_property("tripleBuffer", Graphics::triple_buffer)
                .readonly_property("multiSample", Graphics::multi_sample)
                .readonly_property("apiName", Graphics::api_name),
        )
        .function("GetGraphics", move || context.subsystem::<Graphics>())
}
