//! Material and Technique bindings.

use std::rc::Rc;

use scriptbridge_core::SharedPtr;
use scriptbridge_engine::{
    Context, CullMode, Material, Object, QUALITY_HIGH, QUALITY_LOW, QUALITY_MAX, QUALITY_MEDIUM,
    Technique,
};
use scriptbridge_registry::{ClassBuilder, Module};

// =============================================================================
// CALL ADAPTERS
// =============================================================================

pub fn set_technique_0(material: &Material, index: u32, technique: Option<SharedPtr<Technique>>) {
    material.set_technique(index, technique, QUALITY_LOW, 0.0);
}

pub fn set_technique_1(
    material: &Material,
    index: u32,
    technique: Option<SharedPtr<Technique>>,
    quality_level: u32,
) {
    material.set_technique(index, technique, quality_level, 0.0);
}

pub fn set_technique_2(
    material: &Material,
    index: u32,
    technique: Option<SharedPtr<Technique>>,
    quality_level: u32,
    lod_distance: f32,
) {
    material.set_technique(index, technique, quality_level, lod_distance);
}

pub fn material_clone_0(material: &Material) -> SharedPtr<Material> {
    material.clone_named("")
}

pub fn material_clone_1(material: &Material, clone_name: String) -> SharedPtr<Material> {
    material.clone_named(&clone_name)
}

pub fn technique_clone_0(technique: &Technique) -> SharedPtr<Technique> {
    technique.clone_named("")
}

pub fn technique_clone_1(technique: &Technique, clone_name: String) -> SharedPtr<Technique> {
    technique.clone_named(&clone_name)
}

fn set_cull_mode(material: &Material, mode: u32) {
    match CullMode::try_from(mode) {
        Ok(mode) => material.set_cull_mode(mode),
        Err(_) => log::warn!("invalid cull mode {}", mode),
    }
}

fn set_shadow_cull_mode(material: &Material, mode: u32) {
    match CullMode::try_from(mode) {
        Ok(mode) => material.set_shadow_cull_mode(mode),
        Err(_) => log::warn!("invalid cull mode {}", mode),
    }
}

fn get_technique_quality(material: &Material, index: u32) -> u32 {
    material
        .technique_entry(index)
        .map_or(QUALITY_LOW, |entry| entry.quality_level)
}

// =============================================================================
// MODULE
// =============================================================================

pub fn module(context: &Rc<Context>) -> Module {
    let technique_context = Rc::clone(context);
    let material_context = Rc::clone(context);
    Module::new("material")
        .class(
            ClassBuilder::<Technique>::new()
                .base::<dyn Object>()
                .static_function("new", move || technique_context.create::<Technique>())
                .const_method("Clone", technique_clone_0)
                .const_method("Clone", technique_clone_1)
                .method("CreatePass", |t: &Technique, name: String| t.create_pass(&name))
                .method("RemovePass", |t: &Technique, name: String| t.remove_pass(&name))
                .const_method("HasPass", |t: &Technique, name: String| t.has_pass(&name))
                .property("name", Technique::name, |t: &Technique, name: String| {
                    t.set_name(&name)
                })
                .property("isDesktop", Technique::is_desktop, Technique::set_is_desktop)
                .readonly_property("numPasses", Technique::num_passes),
        )
        .class(
            ClassBuilder::<Material>::new()
                .base::<dyn Object>()
                .static_function("new", move || material_context.create::<Material>())
                .method("SetTechnique", set_technique_0)
                .method("SetTechnique", set_technique_1)
                .method("SetTechnique", set_technique_2)
                .const_method("GetTechnique", Material::technique)
                .const_method("GetTechniqueQuality", get_technique_quality)
                .const_method("Clone", material_clone_0)
                .const_method("Clone", material_clone_1)
                .method("SetCullMode", set_cull_mode)
                .method("SetShadowCullMode", set_shadow_cull_mode)
                .const_method("GetCullMode", |m: &Material| u32::from(m.cull_mode()))
                .const_method("GetShadowCullMode", |m: &Material| {
                    u32::from(m.shadow_cull_mode())
                })
                .property(
                    "numTechniques",
                    Material::num_techniques,
                    Material::set_num_techniques,
                )
                .property("renderOrder", Material::render_order, Material::set_render_order)
                .property("name", Material::name, |m: &Material, name: String| {
                    m.set_name(&name)
                }),
        )
        .constant("QUALITY_LOW", QUALITY_LOW)
        .constant("QUALITY_MEDIUM", QUALITY_MEDIUM)
        .constant("QUALITY_HIGH", QUALITY_HIGH)
        .constant("QUALITY_MAX", QUALITY_MAX)
        .constant("CULL_NONE", u32::from(CullMode::None))
        .constant("CULL_CCW", u32::from(CullMode::Ccw))
        .constant("CULL_CW", u32::from(CullMode::Cw))
}
