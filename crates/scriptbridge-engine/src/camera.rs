//! Scene camera.

use std::cell::Cell;

use bitflags::bitflags;
use glam::{Mat4, Vec2};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::context::{Context, ObjectFactory};

pub const DEFAULT_NEARCLIP: f32 = 0.1;
pub const DEFAULT_FARCLIP: f32 = 1000.0;
pub const DEFAULT_CAMERA_FOV: f32 = 45.0;
pub const DEFAULT_ORTHOSIZE: f32 = 20.0;

const M_MIN_NEARCLIP: f32 = 0.01;
const M_MAX_FOV: f32 = 160.0;

bitflags! {
    /// Per-camera overrides of renderer settings.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ViewOverrideFlags: u32 {
        const NONE = 0x0;
        const LOW_MATERIAL_QUALITY = 0x1;
        const DISABLE_SHADOWS = 0x2;
        const DISABLE_OCCLUSION = 0x4;
    }
}

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum FillMode {
    #[default]
    Solid = 0,
    Wireframe = 1,
    Point = 2,
}

/// Perspective or orthographic camera.
#[derive(Debug)]
pub struct Camera {
    near_clip: Cell<f32>,
    far_clip: Cell<f32>,
    fov: Cell<f32>,
    ortho_size: Cell<f32>,
    aspect_ratio: Cell<f32>,
    zoom: Cell<f32>,
    lod_bias: Cell<f32>,
    view_mask: Cell<u32>,
    view_override_flags: Cell<ViewOverrideFlags>,
    fill_mode: Cell<FillMode>,
    orthographic: Cell<bool>,
    auto_aspect_ratio: Cell<bool>,
    flip_vertical: Cell<bool>,
}

impl_object!(Camera, "Camera");

impl Camera {
    pub fn new() -> Self {
        Self {
            near_clip: Cell::new(DEFAULT_NEARCLIP),
            far_clip: Cell::new(DEFAULT_FARCLIP),
            fov: Cell::new(DEFAULT_CAMERA_FOV),
            ortho_size: Cell::new(DEFAULT_ORTHOSIZE),
            aspect_ratio: Cell::new(1.0),
            zoom: Cell::new(1.0),
            lod_bias: Cell::new(1.0),
            view_mask: Cell::new(u32::MAX),
            view_override_flags: Cell::new(ViewOverrideFlags::NONE),
            fill_mode: Cell::new(FillMode::Solid),
            orthographic: Cell::new(false),
            auto_aspect_ratio: Cell::new(true),
            flip_vertical: Cell::new(false),
        }
    }

    pub fn set_near_clip(&self, near_clip: f32) {
        self.near_clip.set(near_clip.max(M_MIN_NEARCLIP));
    }

    pub fn near_clip(&self) -> f32 {
        self.near_clip.get()
    }

    pub fn set_far_clip(&self, far_clip: f32) {
        self.far_clip.set(far_clip.max(M_MIN_NEARCLIP));
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip.get()
    }

    /// Vertical field of view in degrees, clamped to `0..=160`.
    pub fn set_fov(&self, fov: f32) {
        self.fov.set(fov.clamp(0.0, M_MAX_FOV));
    }

    pub fn fov(&self) -> f32 {
        self.fov.get()
    }

    /// Orthographic view height. Resets the aspect ratio to 1.
    pub fn set_ortho_size(&self, ortho_size: f32) {
        self.ortho_size.set(ortho_size);
        self.aspect_ratio.set(1.0);
    }

    /// Orthographic view size; the aspect ratio follows `size.x / size.y`.
    pub fn set_ortho_size_vec(&self, size: Vec2) {
        self.ortho_size.set(size.y);
        self.set_aspect_ratio(size.x / size.y);
    }

    /// Orthographic view height in world units.
    pub fn ortho_size(&self) -> f32 {
        self.ortho_size.get()
    }

    /// Width over height. Clamped to a small positive value.
    pub fn set_aspect_ratio(&self, aspect_ratio: f32) {
        self.aspect_ratio.set(aspect_ratio.max(f32::EPSILON));
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio.get()
    }

    /// Zoom factor. Clamped to a small positive value.
    pub fn set_zoom(&self, zoom: f32) {
        self.zoom.set(zoom.max(f32::EPSILON));
    }

    /// Zoom factor, 1 by default.
    pub fn zoom(&self) -> f32 {
        self.zoom.get()
    }

    /// Bias applied to LOD distances. Clamped to a small positive value.
    pub fn set_lod_bias(&self, bias: f32) {
        self.lod_bias.set(bias.max(f32::EPSILON));
    }

    /// Bias applied to LOD distances.
    pub fn lod_bias(&self) -> f32 {
        self.lod_bias.get()
    }

    pub fn set_view_mask(&self, mask: u32) {
        self.view_mask.set(mask);
    }

    pub fn view_mask(&self) -> u32 {
        self.view_mask.get()
    }

    pub fn set_view_override_flags(&self, flags: ViewOverrideFlags) {
        self.view_override_flags.set(flags);
    }

    pub fn view_override_flags(&self) -> ViewOverrideFlags {
        self.view_override_flags.get()
    }

    pub fn set_fill_mode(&self, mode: FillMode) {
        self.fill_mode.set(mode);
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode.get()
    }

    pub fn set_orthographic(&self, enable: bool) {
        self.orthographic.set(enable);
    }

    pub fn is_orthographic(&self) -> bool {
        self.orthographic.get()
    }

    pub fn set_auto_aspect_ratio(&self, enable: bool) {
        self.auto_aspect_ratio.set(enable);
    }

    pub fn auto_aspect_ratio(&self) -> bool {
        self.auto_aspect_ratio.get()
    }

    pub fn set_flip_vertical(&self, enable: bool) {
        self.flip_vertical.set(enable);
    }

    pub fn flip_vertical(&self) -> bool {
        self.flip_vertical.get()
    }

    /// API-specific projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.projection_with(true)
    }

    /// Projection matrix, either in the rendering API's depth convention
    /// (left handed, depth `0..1`) or the generic one (OpenGL, depth `-1..1`).
    pub fn projection_with(&self, api_specific: bool) -> Mat4 {
        let near = self.near_clip.get();
        let far = self.far_clip.get();
        let aspect = self.aspect_ratio.get();
        let zoom = self.zoom.get();

        let mut projection = if self.orthographic.get() {
            let half_height = self.ortho_size.get() * 0.5 / zoom;
            let half_width = half_height * aspect;
            if api_specific {
                Mat4::orthographic_lh(-half_width, half_width, -half_height, half_height, near, far)
            } else {
                Mat4::orthographic_rh_gl(-half_width, half_width, -half_height, half_height, near, far)
            }
        } else {
            let half_fov = (self.fov.get() * 0.5).to_radians();
            let fov_y = 2.0 * (half_fov.tan() / zoom).atan();
            if api_specific {
                Mat4::perspective_lh(fov_y, aspect, near, far)
            } else {
                Mat4::perspective_rh_gl(fov_y, aspect, near, far)
            }
        };

        if self.flip_vertical.get() {
            projection = Mat4::from_scale(glam::Vec3::new(1.0, -1.0, 1.0)) * projection;
        }
        projection
    }

    /// Half width and height of the view at unit distance (or of the ortho box).
    pub fn half_view_size(&self) -> Vec2 {
        let zoom = self.zoom.get();
        let aspect = self.aspect_ratio.get();
        let half_height = if self.orthographic.get() {
            self.ortho_size.get() * 0.5 / zoom
        } else {
            (self.fov.get() * 0.5).to_radians().tan() / zoom
        };
        Vec2::new(half_height * aspect, half_height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectFactory for Camera {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}
