//! Camera bindings.

use std::rc::Rc;

use glam::{Mat4, Vec2};
use scriptbridge_engine::{
    Camera, Context, DEFAULT_CAMERA_FOV, DEFAULT_FARCLIP, DEFAULT_NEARCLIP, DEFAULT_ORTHOSIZE,
    FillMode, Object, ViewOverrideFlags,
};
use scriptbridge_registry::{ClassBuilder, Module};

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn set_ortho_size_0(camera: &Camera, ortho_size: f32) {
    camera.set_ortho_size(ortho_size);
}

pub fn set_ortho_size_1(camera: &Camera, ortho_size: Vec2) {
    camera.set_ortho_size_vec(ortho_size);
}

pub fn get_projection_0(camera: &Camera) -> Mat4 {
    camera.projection()
}

pub fn get_projection_1(camera: &Camera, api_specific: bool) -> Mat4 {
    camera.projection_with(api_specific)
}

fn set_view_override_flags(camera: &Camera, flags: u32) {
    camera.set_view_override_flags(ViewOverrideFlags::from_bits_truncate(flags));
}

fn set_fill_mode(camera: &Camera, mode: u32) {
    match FillMode::try_from(mode) {
        Ok(mode) => camera.set_fill_mode(mode),
        Err(_) => log::warn!("invalid fill mode {}", mode),
    }
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let context = Rc::clone(context);
    Module::new("camera")
        .class(
            ClassBuilder::<Camera>::new()
                .base::<dyn Object>()
                .static_function("new", move || context.create::<Camera>())
                .method("SetOrthoSize", set_ortho_size_0)
                .method("SetOrthoSize", set_ortho_size_1)
                .const_method("GetProjection", get_projection_0)
                .const_method("GetProjection", get_projection_1)
                .const_method("GetHalfViewSize", Camera::half_view_size)
                .method("SetViewOverrideFlags", set_view_override_flags)
                .const_method("GetViewOverrideFlags", |c: &Camera| {
                    c.view_override_flags().bits()
                })
                .method("SetFillMode", set_fill_mode)
                .const_method("GetFillMode", |c: &Camera| u32::from(c.fill_mode()))
                .property("nearClip", Camera::near_clip, Camera::set_near_clip)
                .property("farClip", Camera::far_clip, Camera::set_far_clip)
                .property("fov", Camera::fov, Camera::set_fov)
                .property("orthoSize", Camera::ortho_size, Camera::set_ortho_size)
                .property("aspectRatio", Camera::aspect_ratio, Camera::set_aspect_ratio)
                .property("zoom", Camera::zoom, Camera::set_zoom)
                .property("lodBias", Camera::lod_bias, Camera::set_lod_bias)
                .property("viewMask", Camera::view_mask, Camera::set_view_mask)
                .property(
                    "orthographic",
                    Camera::is_orthographic,
                    Camera::set_orthographic,
                )
                .property(
                    "autoAspectRatio",
                    Camera::auto_aspect_ratio,
                    Camera::set_auto_aspect_ratio,
                )
                .property("flipVertical", Camera::flip_vertical, Camera::set_flip_vertical)
                .readonly_property("projection", get_projection_0),
        )
        .constant("DEFAULT_NEARCLIP", DEFAULT_NEARCLIP)
        .constant("DEFAULT_FARCLIP", DEFAULT_FARCLIP)
        .constant("DEFAULT_CAMERA_FOV", DEFAULT_CAMERA_FOV)
        .constant("DEFAULT_ORTHOSIZE", DEFAULT_ORTHOSIZE)
        .constant("VO_NONE", ViewOverrideFlags::NONE.bits())
        .constant(
            "VO_LOW_MATERIAL_QUALITY",
            ViewOverrideFlags::LOW_MATERIAL_QUALITY.bits(),
        )
        .constant("VO_DISABLE_SHADOWS", ViewOverrideFlags::DISABLE_SHADOWS.bits())
        .constant(
            "VO_DISABLE_OCCLUSION",
            ViewOverrideFlags::DISABLE_OCCLUSION.bits(),
        )
        .constant("FILL_SOLID", u32::from(FillMode::Solid))
        .constant("FILL_WIREFRAME", u32::from(FillMode::Wireframe))
        .constant("FILL_POINT", u32::from(FillMode::Point))
}
