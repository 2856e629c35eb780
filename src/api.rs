//! One-call installation of the graphics API.

use std::rc::Rc;

use scriptbridge_engine::{Context, Graphics, Renderer};

use crate::error::ScriptResult;
use crate::state::ScriptState;

/// Install every graphics module into `state` and, unless disabled in the
/// configuration, expose the `Graphics` and `Renderer` subsystems as globals.
///
/// The context must already have its factories and subsystems registered,
/// see [`scriptbridge_engine::initialize`]. A missing subsystem is exposed
/// as a null global.
pub fn register_renderer_api(state: &mut ScriptState, context: &Rc<Context>) -> ScriptResult<()> {
    for module in scriptbridge_modules::modules(context) {
        log::debug!("installing module '{}'", module.name());
        state.install(module)?;
    }

    let globals = state.config().globals.clone();
    if globals.expose_subsystems {
        let graphics = state.push(context.subsystem::<Graphics>());
        state.set_global(&globals.graphics, graphics);
        let renderer = state.push(context.subsystem::<Renderer>());
        state.set_global(&globals.renderer, renderer);
    }

    log::info!(
        "renderer API registered ({} classes)",
        state.registry().class_count()
    );
    Ok(())
}
