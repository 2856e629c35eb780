//! RenderPath bindings.
//!
//! `RenderPath` has no `Object` base; handles to it resolve to the declared
//! type.

use scriptbridge_core::SharedPtr;
use scriptbridge_engine::{RenderPath, RenderPathCommand};
use scriptbridge_registry::{ClassBuilder, Module};

pub fn remove_render_target_0(path: &RenderPath, index: u32) {
    path.remove_render_target(index);
}

pub fn remove_render_target_1(path: &RenderPath, name: String) {
    path.remove_render_target_by_name(&name);
}

fn append(path: &RenderPath, other: SharedPtr<RenderPath>) {
    path.append(&other);
}

pub fn module() -> Module {
    Module::new("render_path").class(
        ClassBuilder::<RenderPath>::new()
            .static_function("new", || SharedPtr::new(RenderPath::new()))
            .const_method("Clone", RenderPath::clone_path)
            .method("Append", append)
            .method("AddCommand", |p: &RenderPath, tag: String| {
                p.add_command(RenderPathCommand::new(&tag))
            })
            .method("SetEnabled", |p: &RenderPath, tag: String, active: bool| {
                p.set_enabled(&tag, active)
            })
            .method("ToggleEnabled", |p: &RenderPath, tag: String| {
                p.toggle_enabled(&tag)
            })
            .const_method("IsEnabled", |p: &RenderPath, tag: String| p.is_enabled(&tag))
            .method("AddRenderTarget", |p: &RenderPath, name: String| {
                p.add_render_target(&name)
            })
            .method("RemoveRenderTarget", remove_render_target_0)
            .method("RemoveRenderTarget", remove_render_target_1)
            .readonly_property("numCommands", RenderPath::num_commands)
            .readonly_property("numRenderTargets", RenderPath::num_render_targets),
    )
}
