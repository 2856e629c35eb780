//! DebugRenderer bindings.
//!
//! Colors cross either as a `Color` value or as a packed integer; depth
//! testing defaults to on and circles default to 64 steps.

use std::rc::Rc;

use glam::Vec3;
use scriptbridge_engine::{Color, Context, DebugRenderer, Object};
use scriptbridge_registry::{ClassBuilder, Module};

const DEFAULT_CIRCLE_STEPS: u32 = 64;

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn add_line_0(debug: &DebugRenderer, start: Vec3, end: Vec3, color: Color) {
    debug.add_line(start, end, color.to_u32(), true);
}

pub fn add_line_1(debug: &DebugRenderer, start: Vec3, end: Vec3, color: Color, depth_test: bool) {
    debug.add_line(start, end, color.to_u32(), depth_test);
}

pub fn add_line_2(debug: &DebugRenderer, start: Vec3, end: Vec3, color: u32) {
    debug.add_line(start, end, color, true);
}

pub fn add_line_3(debug: &DebugRenderer, start: Vec3, end: Vec3, color: u32, depth_test: bool) {
    debug.add_line(start, end, color, depth_test);
}

pub fn add_cross_0(debug: &DebugRenderer, center: Vec3, size: f32, color: Color) {
    debug.add_cross(center, size, color.to_u32(), true);
}

pub fn add_cross_1(debug: &DebugRenderer, center: Vec3, size: f32, color: Color, depth_test: bool) {
    debug.add_cross(center, size, color.to_u32(), depth_test);
}

pub fn add_quad_0(debug: &DebugRenderer, center: Vec3, width: f32, height: f32, color: Color) {
    debug.add_quad(center, width, height, color.to_u32(), true);
}

pub fn add_quad_1(
    debug: &DebugRenderer,
    center: Vec3,
    width: f32,
    height: f32,
    color: Color,
    depth_test: bool,
) {
    debug.add_quad(center, width, height, color.to_u32(), depth_test);
}

pub fn add_circle_0(debug: &DebugRenderer, center: Vec3, normal: Vec3, radius: f32, color: Color) {
    debug.add_circle(
        center,
        normal,
        radius,
        color.to_u32(),
        DEFAULT_CIRCLE_STEPS,
        true,
    );
}

pub fn add_circle_1(
    debug: &DebugRenderer,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    color: Color,
    steps: u32,
) {
    debug.add_circle(center, normal, radius, color.to_u32(), steps, true);
}

pub fn add_circle_2(
    debug: &DebugRenderer,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    color: Color,
    steps: u32,
    depth_test: bool,
) {
    debug.add_circle(center, normal, radius, color.to_u32(), steps, depth_test);
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let context = Rc::clone(context);
    Module::new("debug_renderer").class(
        ClassBuilder::<DebugRenderer>::new()
            .base::<dyn Object>()
            .static_function("new", move || context.create::<DebugRenderer>())
            .method("AddLine", add_line_0)
            .method("AddLine", add_line_2)
            .method("AddLine", add_line_1)
            .method("AddLine", add_line_3)
            .method("AddCross", add_cross_0)
            .method("AddCross", add_cross_1)
            .method("AddQuad", add_quad_0)
            .method("AddQuad", add_quad_1)
            .method("AddCircle", add_circle_0)
            .method("AddCircle", add_circle_1)
            .method("AddCircle", add_circle_2)
            .method("Render", DebugRenderer::render)
            .const_method("GetNumLines", DebugRenderer::num_lines),
    )
}
