use std::cell::{Cell, RefCell};

use scriptbridge_core::SharedPtr;

use crate::camera::Camera;
use crate::context::{Context, ObjectFactory};
use crate::math::IntRect;
use crate::render_path::RenderPath;
use crate::renderer::Renderer;
use crate::scene::Scene;

/// A scene rendered through a camera into a screen rectangle.
///
/// A zero rectangle means the whole render target.
#[derive(Debug, Default)]
pub struct Viewport {
    scene: RefCell<Option<SharedPtr<Scene>>>,
    camera: RefCell<Option<SharedPtr<Camera>>>,
    cull_camera: RefCell<Option<SharedPtr<Camera>>>,
    rect: Cell<IntRect>,
    render_path: RefCell<Option<SharedPtr<RenderPath>>>,
    draw_debug: Cell<bool>,
}

impl_object!(Viewport, "Viewport");

impl Viewport {
    pub fn new() -> Self {
        Self {
            draw_debug: Cell::new(true),
            ..Self::default()
        }
    }

    /// Viewport over the whole render target.
    pub fn with_scene(
        scene: Option<SharedPtr<Scene>>,
        camera: Option<SharedPtr<Camera>>,
        render_path: Option<SharedPtr<RenderPath>>,
    ) -> Self {
        Self::with_rect(scene, camera, IntRect::ZERO, render_path)
    }

    pub fn with_rect(
        scene: Option<SharedPtr<Scene>>,
        camera: Option<SharedPtr<Camera>>,
        rect: IntRect,
        render_path: Option<SharedPtr<RenderPath>>,
    ) -> Self {
        let viewport = Self::new();
        viewport.set_scene(scene);
        viewport.set_camera(camera);
        viewport.set_rect(rect);
        viewport.set_render_path(render_path);
        viewport
    }

    pub fn set_scene(&self, scene: Option<SharedPtr<Scene>>) {
        *self.scene.borrow_mut() = scene;
    }

    pub fn scene(&self) -> Option<SharedPtr<Scene>> {
        self.scene.borrow().clone()
    }

    pub fn set_camera(&self, camera: Option<SharedPtr<Camera>>) {
        *self.camera.borrow_mut() = camera;
    }

    pub fn camera(&self) -> Option<SharedPtr<Camera>> {
        self.camera.borrow().clone()
    }

    pub fn set_cull_camera(&self, camera: Option<SharedPtr<Camera>>) {
        *self.cull_camera.borrow_mut() = camera;
    }

    pub fn cull_camera(&self) -> Option<SharedPtr<Camera>> {
        self.cull_camera.borrow().clone()
    }

    pub fn set_rect(&self, rect: IntRect) {
        self.rect.set(rect);
    }

    pub fn rect(&self) -> IntRect {
        self.rect.get()
    }

    pub fn set_render_path(&self, render_path: Option<SharedPtr<RenderPath>>) {
        *self.render_path.borrow_mut() = render_path;
    }

    pub fn render_path(&self) -> Option<SharedPtr<RenderPath>> {
        self.render_path.borrow().clone()
    }

    pub fn set_draw_debug(&self, enable: bool) {
        self.draw_debug.set(enable);
    }

    pub fn draw_debug(&self) -> bool {
        self.draw_debug.get()
    }
}

impl ObjectFactory for Viewport {
    /// New viewports start with the renderer's default render path.
    fn create(context: &Context) -> Self {
        let viewport = Self::new();
        if let Some(renderer) = context.subsystem::<Renderer>() {
            viewport.set_render_path(Some(renderer.default_render_path()));
        }
        viewport
    }
}
