use std::cell::{Cell, RefCell};

use crate::context::{Context, ObjectFactory};

/// Scene root. Only tracks what the renderer needs for its per-view counts.
#[derive(Debug, Default)]
pub struct Scene {
    name: RefCell<String>,
    drawables: Cell<u32>,
    lights: Cell<u32>,
    occluders: Cell<u32>,
}

impl_object!(Scene, "Scene");

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_num_drawables(&self, count: u32) {
        self.drawables.set(count);
    }

    pub fn num_drawables(&self) -> u32 {
        self.drawables.get()
    }

    pub fn set_num_lights(&self, count: u32) {
        self.lights.set(count);
    }

    pub fn num_lights(&self) -> u32 {
        self.lights.get()
    }

    /// Drawables that also occlude. Clamped to the drawable count when read.
    pub fn set_num_occluders(&self, count: u32) {
        self.occluders.set(count);
    }

    pub fn num_occluders(&self) -> u32 {
        self.occluders.get().min(self.drawables.get())
    }
}

impl ObjectFactory for Scene {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}
