//! Materials and rendering techniques.

use std::cell::{Cell, RefCell};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use scriptbridge_core::SharedPtr;

use crate::camera::FillMode;
use crate::context::{Context, ObjectFactory};

pub const QUALITY_LOW: u32 = 0;
pub const QUALITY_MEDIUM: u32 = 1;
pub const QUALITY_HIGH: u32 = 2;
pub const QUALITY_MAX: u32 = 15;

/// Triangle culling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum CullMode {
    None = 0,
    #[default]
    Ccw = 1,
    Cw = 2,
}

/// A named set of render passes.
#[derive(Debug, Default)]
pub struct Technique {
    name: RefCell<String>,
    passes: RefCell<Vec<String>>,
    is_desktop: Cell<bool>,
}

impl_object!(Technique, "Technique");

impl Technique {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_is_desktop(&self, enable: bool) {
        self.is_desktop.set(enable);
    }

    pub fn is_desktop(&self) -> bool {
        self.is_desktop.get()
    }

    /// Add a pass by name. Returns false if it already exists.
    pub fn create_pass(&self, name: &str) -> bool {
        let mut passes = self.passes.borrow_mut();
        if passes.iter().any(|p| p.eq_ignore_ascii_case(name)) {
            return false;
        }
        passes.push(name.to_string());
        true
    }

    pub fn remove_pass(&self, name: &str) {
        self.passes
            .borrow_mut()
            .retain(|p| !p.eq_ignore_ascii_case(name));
    }

    pub fn has_pass(&self, name: &str) -> bool {
        self.passes
            .borrow()
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
    }

    pub fn num_passes(&self) -> u32 {
        self.passes.borrow().len() as u32
    }

    /// Copy with a new name; an empty name keeps the current one.
    pub fn clone_named(&self, clone_name: &str) -> SharedPtr<Technique> {
        let name = if clone_name.is_empty() {
            self.name()
        } else {
            clone_name.to_string()
        };
        SharedPtr::new(Technique {
            name: RefCell::new(name),
            passes: RefCell::new(self.passes.borrow().clone()),
            is_desktop: Cell::new(self.is_desktop.get()),
        })
    }
}

impl ObjectFactory for Technique {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}

/// One technique slot of a material.
#[derive(Debug, Clone, Default)]
pub struct TechniqueEntry {
    pub technique: Option<SharedPtr<Technique>>,
    pub quality_level: u32,
    pub lod_distance: f32,
}

/// Describes how geometry is rendered.
#[derive(Debug)]
pub struct Material {
    name: RefCell<String>,
    techniques: RefCell<Vec<TechniqueEntry>>,
    cull_mode: Cell<CullMode>,
    shadow_cull_mode: Cell<CullMode>,
    fill_mode: Cell<FillMode>,
    render_order: Cell<u8>,
}

impl_object!(Material, "Material");

impl Material {
    pub fn new() -> Self {
        Self {
            name: RefCell::default(),
            techniques: RefCell::new(vec![TechniqueEntry::default()]),
            cull_mode: Cell::new(CullMode::Ccw),
            shadow_cull_mode: Cell::new(CullMode::Ccw),
            fill_mode: Cell::new(FillMode::Solid),
            render_order: Cell::new(128),
        }
    }

    /// Rename the material.
    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
    }

    /// Material name, empty for an unnamed material.
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Resize the technique list; new slots are empty.
    pub fn set_num_techniques(&self, num: u32) {
        if num == 0 {
            return;
        }
        self.techniques
            .borrow_mut()
            .resize(num as usize, TechniqueEntry::default());
    }

    /// Number of technique slots, at least one.
    pub fn num_techniques(&self) -> u32 {
        self.techniques.borrow().len() as u32
    }

    /// Set the technique at `index`. Out-of-range indices are ignored.
    pub fn set_technique(
        &self,
        index: u32,
        technique: Option<SharedPtr<Technique>>,
        quality_level: u32,
        lod_distance: f32,
    ) {
        let mut techniques = self.techniques.borrow_mut();
        let Some(entry) = techniques.get_mut(index as usize) else {
            log::warn!("technique index {} out of range", index);
            return;
        };
        *entry = TechniqueEntry {
            technique,
            quality_level,
            lod_distance,
        };
    }

    /// Technique at `index`, or `None` for an empty or out-of-range slot.
    pub fn technique(&self, index: u32) -> Option<SharedPtr<Technique>> {
        self.techniques
            .borrow()
            .get(index as usize)
            .and_then(|e| e.technique.clone())
    }

    /// The whole slot at `index`, including quality level and LOD distance.
    pub fn technique_entry(&self, index: u32) -> Option<TechniqueEntry> {
        self.techniques.borrow().get(index as usize).cloned()
    }

    /// Face culling for normal rendering.
    pub fn set_cull_mode(&self, mode: CullMode) {
        self.cull_mode.set(mode);
    }

    /// Face culling for normal rendering. Counter-clockwise by default.
    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode.get()
    }

    /// Face culling used when rendering into shadow maps.
    pub fn set_shadow_cull_mode(&self, mode: CullMode) {
        self.shadow_cull_mode.set(mode);
    }

    /// Face culling used when rendering into shadow maps.
    pub fn shadow_cull_mode(&self) -> CullMode {
        self.shadow_cull_mode.get()
    }

    /// Polygon fill mode.
    pub fn set_fill_mode(&self, mode: FillMode) {
        self.fill_mode.set(mode);
    }

    /// Polygon fill mode. Solid by default.
    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode.get()
    }

    /// Lower orders draw first within a pass.
    pub fn set_render_order(&self, order: u8) {
        self.render_order.set(order);
    }

    /// Render order within a pass, 128 by default.
    pub fn render_order(&self) -> u8 {
        self.render_order.get()
    }

    /// Copy with a new name. Techniques are shared, not copied.
    pub fn clone_named(&self, clone_name: &str) -> SharedPtr<Material> {
        let name = if clone_name.is_empty() {
            self.name()
        } else {
            clone_name.to_string()
        };
        SharedPtr::new(Material {
            name: RefCell::new(name),
            techniques: RefCell::new(self.techniques.borrow().clone()),
            cull_mode: Cell::new(self.cull_mode.get()),
            shadow_cull_mode: Cell::new(self.shadow_cull_mode.get()),
            fill_mode: Cell::new(self.fill_mode.get()),
            render_order: Cell::new(self.render_order.get()),
        })
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectFactory for Material {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_technique_ignores_bad_index() {
        let material = Material::new();
        let technique = SharedPtr::new(Technique::new());
        material.set_technique(3, Some(technique.clone()), QUALITY_LOW, 0.0);
        assert!(material.technique(0).is_none());
        assert_eq!(SharedPtr::refs(&technique), 1);

        material.set_technique(0, Some(technique.clone()), QUALITY_HIGH, 10.0);
        let entry = material.technique_entry(0).unwrap();
        assert_eq!((entry.quality_level, entry.lod_distance), (QUALITY_HIGH, 10.0));
        assert_eq!(SharedPtr::refs(&technique), 3);
    }

    #[test]
    fn new_material_has_one_empty_slot() {
        let material = Material::new();
        assert_eq!(material.name(), "");
        assert_eq!(material.num_techniques(), 1);
        assert!(material.technique(0).is_none());
        assert!(material.technique_entry(1).is_none());
        assert_eq!(material.cull_mode(), CullMode::Ccw);
        assert_eq!(material.shadow_cull_mode(), CullMode::Ccw);
        assert_eq!(material.fill_mode(), FillMode::Solid);
        assert_eq!(material.render_order(), 128);
        material.set_num_techniques(0);
        assert_eq!(material.num_techniques(), 1);
    }

    #[test]
    fn clone_shares_techniques() {
        let material = Material::new();
        material.set_name("Stone");
        let technique = SharedPtr::new(Technique::new());
        material.set_technique(0, Some(technique.clone()), 0, 0.0);

        let same = material.clone_named("");
        assert_eq!(same.name(), "Stone");
        let renamed = material.clone_named("Brick");
        assert_eq!(renamed.name(), "Brick");
        assert!(SharedPtr::ptr_eq(&renamed.technique(0).unwrap(), &technique));
    }

    #[test]
    fn technique_passes_are_case_insensitive() {
        let technique = Technique::new();
        assert!(technique.create_pass("base"));
        assert!(!technique.create_pass("BASE"));
        assert!(technique.has_pass("Base"));
        technique.remove_pass("base");
        assert_eq!(technique.num_passes(), 0);
    }

    #[test]
    fn technique_clone_keeps_passes() {
        let technique = Technique::new();
        technique.set_name("Diff");
        technique.create_pass("alpha");
        let copy = technique.clone_named("DiffAlpha");
        assert_eq!(copy.name(), "DiffAlpha");
        assert!(copy.has_pass("alpha"));
    }
}
