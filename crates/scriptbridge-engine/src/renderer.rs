//! Renderer subsystem: viewports, views and global quality settings.

use std::cell::{Cell, RefCell};

use scriptbridge_core::SharedPtr;

use crate::material::{QUALITY_HIGH, QUALITY_MAX};
use crate::render_path::{RenderPath, RenderPathCommand};
use crate::viewport::Viewport;

const MIN_SHADOW_MAP_SIZE: i32 = 64;

/// A view prepared from a viewport during [`Renderer::update`].
#[derive(Debug, Clone, Copy)]
struct View {
    geometries: u32,
    lights: u32,
    shadow_maps: u32,
    occluders: u32,
}

#[derive(Debug)]
pub struct Renderer {
    viewports: RefCell<Vec<Option<SharedPtr<Viewport>>>>,
    views: RefCell<Vec<View>>,
    default_render_path: RefCell<SharedPtr<RenderPath>>,
    hdr_rendering: Cell<bool>,
    specular_lighting: Cell<bool>,
    draw_shadows: Cell<bool>,
    shadow_map_size: Cell<i32>,
    material_quality: Cell<u32>,
    texture_anisotropy: Cell<i32>,
}

impl_object!(Renderer, "Renderer");

impl Renderer {
    pub fn new() -> Self {
        let default_path = RenderPath::new();
        default_path.add_command(RenderPathCommand::new("clear"));
        default_path.add_command(RenderPathCommand::new("base"));
        default_path.add_command(RenderPathCommand::new("alpha"));
        Self {
            viewports: RefCell::new(vec![None]),
            views: RefCell::default(),
            default_render_path: RefCell::new(SharedPtr::new(default_path)),
            hdr_rendering: Cell::new(false),
            specular_lighting: Cell::new(true),
            draw_shadows: Cell::new(true),
            shadow_map_size: Cell::new(1024),
            material_quality: Cell::new(QUALITY_HIGH),
            texture_anisotropy: Cell::new(4),
        }
    }

    /// Set the number of backbuffer viewports.
    pub fn set_num_viewports(&self, num: u32) {
        self.viewports.borrow_mut().resize(num as usize, None);
    }

    pub fn num_viewports(&self) -> u32 {
        self.viewports.borrow().len() as u32
    }

    /// Set a viewport, growing the list if `index` is past its end.
    pub fn set_viewport(&self, index: u32, viewport: Option<SharedPtr<Viewport>>) {
        let mut viewports = self.viewports.borrow_mut();
        let index = index as usize;
        if index >= viewports.len() {
            viewports.resize(index + 1, None);
        }
        viewports[index] = viewport;
    }

    pub fn viewport(&self, index: u32) -> Option<SharedPtr<Viewport>> {
        self.viewports
            .borrow()
            .get(index as usize)
            .and_then(Clone::clone)
    }

    /// Replace the default render path. A null path is ignored.
    pub fn set_default_render_path(&self, render_path: Option<SharedPtr<RenderPath>>) {
        if let Some(path) = render_path {
            *self.default_render_path.borrow_mut() = path;
        }
    }

    pub fn default_render_path(&self) -> SharedPtr<RenderPath> {
        self.default_render_path.borrow().clone()
    }

    pub fn set_hdr_rendering(&self, enable: bool) {
        self.hdr_rendering.set(enable);
    }

    pub fn hdr_rendering(&self) -> bool {
        self.hdr_rendering.get()
    }

    pub fn set_specular_lighting(&self, enable: bool) {
        self.specular_lighting.set(enable);
    }

    pub fn specular_lighting(&self) -> bool {
        self.specular_lighting.get()
    }

    pub fn set_draw_shadows(&self, enable: bool) {
        self.draw_shadows.set(enable);
    }

    pub fn draw_shadows(&self) -> bool {
        self.draw_shadows.get()
    }

    /// Rounded up to a power of two, at least 64.
    pub fn set_shadow_map_size(&self, size: i32) {
        let size = (size.max(MIN_SHADOW_MAP_SIZE) as u32).next_power_of_two();
        self.shadow_map_size.set(size as i32);
    }

    pub fn shadow_map_size(&self) -> i32 {
        self.shadow_map_size.get()
    }

    pub fn set_material_quality(&self, quality: u32) {
        self.material_quality.set(quality.min(QUALITY_MAX));
    }

    pub fn material_quality(&self) -> u32 {
        self.material_quality.get()
    }

    pub fn set_texture_anisotropy(&self, level: i32) {
        self.texture_anisotropy.set(level.max(1));
    }

    pub fn texture_anisotropy(&self) -> i32 {
        self.texture_anisotropy.get()
    }

    /// Prepare one view per viewport that has both a scene and a camera.
    pub fn update(&self) {
        let views: Vec<View> = self
            .viewports
            .borrow()
            .iter()
            .flatten()
            .filter(|vp| vp.camera().is_some())
            .filter_map(|vp| vp.scene())
            .map(|scene| View {
                geometries: scene.num_drawables(),
                lights: scene.num_lights(),
                shadow_maps: if self.draw_shadows.get() {
                    scene.num_lights()
                } else {
                    0
                },
                occluders: scene.num_occluders(),
            })
            .collect();
        *self.views.borrow_mut() = views;
    }

    pub fn num_views(&self) -> u32 {
        self.views.borrow().len() as u32
    }

    fn count(&self, all_views: bool, field: impl Fn(&View) -> u32) -> u32 {
        let views = self.views.borrow();
        if all_views {
            views.iter().map(&field).sum()
        } else {
            views.first().map_or(0, field)
        }
    }

    /// Geometries rendered by the first view, or by every view.
    pub fn num_geometries(&self, all_views: bool) -> u32 {
        self.count(all_views, |v| v.geometries)
    }

    pub fn num_lights(&self, all_views: bool) -> u32 {
        self.count(all_views, |v| v.lights)
    }

    /// Zero for views prepared while shadows were off.
    pub fn num_shadow_maps(&self, all_views: bool) -> u32 {
        self.count(all_views, |v| v.shadow_maps)
    }

    pub fn num_occluders(&self, all_views: bool) -> u32 {
        self.count(all_views, |v| v.occluders)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
