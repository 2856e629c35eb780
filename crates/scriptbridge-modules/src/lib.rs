//! Graphics API bindings for scriptbridge.
//!
//! One module per engine class. Overloaded and default-argument native
//! operations are bound as one free function per variant, all registered
//! under the same script-visible name with the fewest parameters first:
//!
//! - **object** - the `Object` base class and `CreateObject`
//! - **camera**, **material**, **texture**, **render_path**, **viewport**
//! - **index_buffer**, **vertex_buffer** - with bulk data access through
//!   [`bulk_data`]
//! - **renderer**, **graphics** - subsystems and their global accessors
//! - **debug_renderer**
//!
//! # Usage
//!
//! ```ignore
//! use scriptbridge_modules::modules;
//!
//! for module in modules(&context) {
//!     registry.install(module)?;
//! }
//! ```

use std::rc::Rc;

use scriptbridge_engine::Context;
use scriptbridge_registry::Module;

pub mod bulk_data;
pub mod camera;
pub mod debug_renderer;
pub mod graphics;
pub mod index_buffer;
pub mod material;
pub mod object;
pub mod render_path;
pub mod renderer;
pub mod texture;
pub mod vertex_buffer;
pub mod viewport;

pub use bulk_data::{LockGuard, get_bulk_data, set_bulk_data, set_bulk_data_range};

/// Every graphics module, base class first.
pub fn modules(context: &Rc<Context>) -> Vec<Module> {
    vec![
        object::module(context),
        camera::module(context),
        render_path::module(),
        material::module(context),
        texture::module(context),
        index_buffer::module(context),
        vertex_buffer::module(context),
        debug_renderer::module(context),
        viewport::module(context),
        renderer::module(context),
        graphics::module(context),
    ]
}
