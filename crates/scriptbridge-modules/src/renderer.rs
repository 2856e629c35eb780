//! Renderer subsystem bindings and the `GetRenderer` accessor.

use std::rc::Rc;

use scriptbridge_core::SharedPtr;
use scriptbridge_engine::{Context, Object, Renderer, Viewport};
use scriptbridge_registry::{ClassBuilder, Module};

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn get_num_geometries_0(renderer: &Renderer) -> u32 {
    renderer.num_geometries(false)
}

pub fn get_num_geometries_1(renderer: &Renderer, all_views: bool) -> u32 {
    renderer.num_geometries(all_views)
}

pub fn get_num_lights_0(renderer: &Renderer) -> u32 {
    renderer.num_lights(false)
}

pub fn get_num_lights_1(renderer: &Renderer, all_views: bool) -> u32 {
    renderer.num_lights(all_views)
}

pub fn get_num_shadow_maps_0(renderer: &Renderer) -> u32 {
    renderer.num_shadow_maps(false)
}

pub fn get_num_shadow_maps_1(renderer: &Renderer, all_views: bool) -> u32 {
    renderer.num_shadow_maps(all_views)
}

pub fn get_num_occluders_0(renderer: &Renderer) -> u32 {
    renderer.num_occluders(false)
}

pub fn get_num_occluders_1(renderer: &Renderer, all_views: bool) -> u32 {
    renderer.num_occluders(all_views)
}

fn set_viewport(renderer: &Renderer, index: u32, viewport: Option<SharedPtr<Viewport>>) {
    renderer.set_viewport(index, viewport);
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let context = Rc::clone(context);
    Module::new("renderer")
        .class(
            ClassBuilder::<Renderer>::new()
                .base::<dyn Object>()
                .method("SetNumViewports", Renderer::set_num_viewports)
                .const_method("GetNumViewports", Renderer::num_viewports)
                .method("SetViewport", set_viewport)
                .const_method("GetViewport", Renderer::viewport)
                .method("Update", Renderer::update)
                .const_method("GetNumViews", Renderer::num_views)
                .const_method("GetNumGeometries", get_num_geometries_0)
                .const_method("GetNumGeometries", get_num_geometries_1)
                .const_method("GetNumLights", get_num_lights_0)
                .const_method("GetNumLights", get_num_lights_1)
                .const_method("GetNumShadowMaps", get_num_shadow_maps_0)
                .const_method("GetNumShadowMaps", get_num_shadow_maps_1)
                .const_method("GetNumOccluders", get_num_occluders_0)
                .const_method("GetNumOccluders", get_num_occluders_1)
                .property(
                    "defaultRenderPath",
                    Renderer::default_render_path,
                    Renderer::set_default_render_path,
                )
                .property("hdrRendering", Renderer::hdr_rendering, Renderer::set_hdr_rendering)
                .property(
                    "specularLighting",
                    Renderer::specular_lighting,
                    Renderer::set_specular_lighting,
                )
                .property("drawShadows", Renderer::draw_shadows, Renderer::set_draw_shadows)
                .property(
                    "shadowMapSize",
                    Renderer::shadow_map_size,
                    Renderer::set_shadow_map_size,
                )
                .property(
                    "materialQuality",
                    Renderer::material_quality,
                    Renderer::set_material_quality,
                )
                .property(
                    "textureAnisotropy",
                    Renderer::texture_anisotropy,
                    Renderer::set_texture_anisotropy,
                ),
        )
        .function("GetRenderer", move || context.subsystem::<Renderer>())
}
