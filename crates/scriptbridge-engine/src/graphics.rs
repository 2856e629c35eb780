//! Graphics subsystem: window and screen mode state.

use std::cell::{Cell, RefCell};

use glam::IVec2;

const GL_ALPHA: u32 = 0x1906;
const GL_RGB: u32 = 0x1907;
const GL_RGBA: u32 = 0x1908;
const GL_DEPTH24_STENCIL8: u32 = 0x88f0;
const MAX_SKIN_MATRICES: u32 = 128;

#[derive(Debug)]
pub struct Graphics {
    width: Cell<i32>,
    height: Cell<i32>,
    window_title: RefCell<String>,
    window_position: Cell<IVec2>,
    fullscreen: Cell<bool>,
    borderless: Cell<bool>,
    resizable: Cell<bool>,
    high_dpi: Cell<bool>,
    vsync: Cell<bool>,
    triple_buffer: Cell<bool>,
    multi_sample: Cell<i32>,
    srgb: Cell<bool>,
}

impl_object!(Graphics, "Graphics");

impl Graphics {
    pub fn new() -> Self {
        Self {
            width: Cell::new(1024),
            height: Cell::new(768),
            window_title: RefCell::new(String::from("Untitled")),
            window_position: Cell::new(IVec2::ZERO),
            fullscreen: Cell::new(false),
            borderless: Cell::new(false),
            resizable: Cell::new(false),
            high_dpi: Cell::new(false),
            vsync: Cell::new(false),
            triple_buffer: Cell::new(false),
            multi_sample: Cell::new(1),
            srgb: Cell::new(false),
        }
    }

    /// Change only the resolution.
    pub fn set_mode(&self, width: i32, height: i32) -> bool {
        if width <= 0 || height <= 0 {
            log::warn!("invalid screen mode {}x{}", width, height);
            return false;
        }
        self.width.set(width);
        self.height.set(height);
        true
    }

    /// Change resolution and window flags together.
    #[allow(clippy::too_many_arguments)]
    pub fn set_mode_full(
        &self,
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
        if !self.set_mode(width, height) {
            return false;
        }
        self.fullscreen.set(fullscreen);
        self.borderless.set(borderless);
        self.resizable.set(resizable);
        self.high_dpi.set(high_dpi);
        self.vsync.set(vsync);
        self.triple_buffer.set(triple_buffer);
        self.multi_sample.set(multi_sample.clamp(1, 16));
        true
    }

    pub fn toggle_fullscreen(&self) -> bool {
        self.fullscreen.set(!self.fullscreen.get());
        true
    }

    pub fn width(&self) -> i32 {
        self.width.get()
    }

    pub fn height(&self) -> i32 {
        self.height.get()
    }

    pub fn set_window_title(&self, title: &str) {
        *self.window_title.borrow_mut() = title.to_string();
    }

    pub fn window_title(&self) -> String {
        self.window_title.borrow().clone()
    }

    pub fn set_window_position(&self, position: IVec2) {
        self.window_position.set(position);
    }

    pub fn window_position(&self) -> IVec2 {
        self.window_position.get()
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    pub fn borderless(&self) -> bool {
        self.borderless.get()
    }

    pub fn resizable(&self) -> bool {
        self.resizable.get()
    }

    pub fn high_dpi(&self) -> bool {
        self.high_dpi.get()
    }

    pub fn vsync(&self) -> bool {
        self.vsync.get()
    }

    pub fn triple_buffer(&self) -> bool {
        self.triple_buffer.get()
    }

    pub fn multi_sample(&self) -> i32 {
        self.multi_sample.get()
    }

    pub fn set_srgb(&self, enable: bool) {
        self.srgb.set(enable);
    }

    pub fn srgb(&self) -> bool {
        self.srgb.get()
    }

    pub fn api_name(&self) -> &'static str {
        "GL3"
    }

    pub fn alpha_format() -> u32 {
        GL_ALPHA
    }

    pub fn rgb_format() -> u32 {
        GL_RGB
    }

    pub fn rgba_format() -> u32 {
        GL_RGBA
    }

    pub fn depth_stencil_format() -> u32 {
        GL_DEPTH24_STENCIL8
    }

    /// Maximum skinning matrices per draw call.
    pub fn max_bones() -> u32 {
        MAX_SKIN_MATRICES
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}
