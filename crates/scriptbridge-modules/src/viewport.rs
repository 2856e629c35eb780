//! Scene and Viewport bindings.
//!
//! Viewports built from a scene and camera without an explicit render path
//! get the renderer's default one, matching `Viewport.new()`.

use std::rc::Rc;

use scriptbridge_core::SharedPtr;
use scriptbridge_engine::{
    Camera, Context, IntRect, Object, RenderPath, Renderer, Scene, Viewport,
};
use scriptbridge_registry::{ClassBuilder, Module};

fn default_render_path(context: &Context) -> Option<SharedPtr<RenderPath>> {
    context
        .subsystem::<Renderer>()
        .map(|renderer| renderer.default_render_path())
}

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn new_0(context: &Context) -> SharedPtr<Viewport> {
    context.create::<Viewport>()
}

pub fn new_1(
    context: &Context,
    scene: Option<SharedPtr<Scene>>,
    camera: Option<SharedPtr<Camera>>,
) -> SharedPtr<Viewport> {
    new_4(context, scene, camera, IntRect::ZERO, None)
}

pub fn new_2(
    context: &Context,
    scene: Option<SharedPtr<Scene>>,
    camera: Option<SharedPtr<Camera>>,
    render_path: Option<SharedPtr<RenderPath>>,
) -> SharedPtr<Viewport> {
    new_4(context, scene, camera, IntRect::ZERO, render_path)
}

pub fn new_3_rect(
    context: &Context,
    scene: Option<SharedPtr<Scene>>,
    camera: Option<SharedPtr<Camera>>,
    rect: IntRect,
) -> SharedPtr<Viewport> {
    new_4(context, scene, camera, rect, None)
}

pub fn new_4(
    context: &Context,
    scene: Option<SharedPtr<Scene>>,
    camera: Option<SharedPtr<Camera>>,
    rect: IntRect,
    render_path: Option<SharedPtr<RenderPath>>,
) -> SharedPtr<Viewport> {
    let render_path = render_path.or_else(|| default_render_path(context));
    SharedPtr::new(Viewport::with_rect(scene, camera, rect, render_path))
}

/// A null path falls back to the renderer's default.
pub fn set_render_path(
    context: &Context,
    viewport: &Viewport,
    render_path: Option<SharedPtr<RenderPath>>,
) {
    viewport.set_render_path(render_path.or_else(|| default_render_path(context)));
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let scene_context = Rc::clone(context);
    let c0 = Rc::clone(context);
    let c1 = Rc::clone(context);
    let c2 = Rc::clone(context);
    let c3 = Rc::clone(context);
    let c4 = Rc::clone(context);
    let c5 = Rc::clone(context);

    Module::new("viewport")
        .class(
            ClassBuilder::<Scene>::new()
                .base::<dyn Object>()
                .static_function("new", move || scene_context.create::<Scene>())
                .property("name", Scene::name, |s: &Scene, name: String| {
                    s.set_name(&name)
                })
                .property(
                    "numDrawables",
                    Scene::num_drawables,
                    Scene::set_num_drawables,
                )
                .property("numLights", Scene::num_lights, Scene::set_num_lights)
                .property(
                    "numOccluders",
                    Scene::num_occluders,
                    Scene::set_num_occluders,
                ),
        )
        .class(
            ClassBuilder::<Viewport>::new()
                .base::<dyn Object>()
                .static_function("new", move || new_0(&c0))
                .static_function(
                    "new",
                    move |scene: Option<SharedPtr<Scene>>, camera: Option<SharedPtr<Camera>>| {
                        new_1(&c1, scene, camera)
                    },
                )
                .static_function(
                    "new",
                    move |scene: Option<SharedPtr<Scene>>,
                          camera: Option<SharedPtr<Camera>>,
                          render_path: Option<SharedPtr<RenderPath>>| {
                        new_2(&c2, scene, camera, render_path)
                    },
                )
                .static_function(
                    "new",
                    move |scene: Option<SharedPtr<Scene>>,
                          camera: Option<SharedPtr<Camera>>,
                          rect: IntRect| {
                        new_3_rect(&c3, scene, camera, rect)
                    },
                )
                .static_function(
                    "new",
                    move |scene: Option<SharedPtr<Scene>>,
                          camera: Option<SharedPtr<Camera>>,
                          rect: IntRect,
                          render_path: Option<SharedPtr<RenderPath>>| {
                        new_4(&c4, scene, camera, rect, render_path)
                    },
                )
                .method(
                    "SetRenderPath",
                    move |viewport: &Viewport, render_path: Option<SharedPtr<RenderPath>>| {
                        set_render_path(&c5, viewport, render_path)
                    },
                )
                .const_method("GetRenderPath", Viewport::render_path)
                .property("scene", Viewport::scene, Viewport::set_scene)
                .property("camera", Viewport::camera, Viewport::set_camera)
                .property("cullCamera", Viewport::cull_camera, Viewport::set_cull_camera)
                .property("rect", Viewport::rect, Viewport::set_rect)
                .property("drawDebug", Viewport::draw_debug, Viewport::set_draw_debug),
        )
}
