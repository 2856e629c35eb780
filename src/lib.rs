//! # scriptbridge
//!
//! Binds a reference-counted native graphics object model into an embedded
//! scripting runtime.
//!
//! - **Ownership bridge** ([`scriptbridge_core`]): native objects cross into
//!   the runtime wrapped in a [`SharedPtrWrapper`] that holds exactly one
//!   strong reference for as long as the script value lives, and resolves
//!   the object's dynamic type through its `Object` base.
//! - **Call adapters** ([`scriptbridge_modules`]): overloaded and
//!   default-argument native operations are bound as one adapter per
//!   variant under a shared script name, resolved by arity, then argument
//!   types, then registration order.
//! - **Bulk data** ([`scriptbridge_modules::bulk_data`]): buffer contents are
//!   exchanged as [`VectorBuffer`]s under a bounds check and a paired
//!   lock/unlock.
//!
//! ## Example
//!
//! ```
//! use scriptbridge::{Context, Dynamic, ScriptState, register_renderer_api};
//!
//! let context = Context::new();
//! scriptbridge::engine::initialize(&context);
//!
//! let mut state = ScriptState::new();
//! register_renderer_api(&mut state, &context).unwrap();
//!
//! let camera = state
//!     .call_function("CreateObject", vec![Dynamic::String("Camera".into())])
//!     .unwrap();
//! let name = state.call_method(&camera, "GetTypeName", vec![]).unwrap();
//! assert_eq!(state.get::<String>(&name).unwrap(), "Camera");
//! state.release(camera);
//! ```

mod api;
mod config;
mod error;
mod state;

pub use api::register_renderer_api;
pub use config::{BridgeConfig, Config, ConfigError, GlobalsConfig};
pub use error::{ScriptError, ScriptResult};
pub use state::ScriptState;

pub use scriptbridge_core as bridge;
pub use scriptbridge_engine as engine;
pub use scriptbridge_modules as modules;
pub use scriptbridge_registry as registry;

pub use scriptbridge_core::{
    ConstPtr, Dynamic, FromDynamic, IntoDynamic, ObjectHandle, ObjectWrapper, SharedPtr,
    SharedPtrWrapper,
};
pub use scriptbridge_engine::{Context, VectorBuffer};
pub use scriptbridge_registry::{Module, SymbolRegistry, TieBreak};

pub mod prelude {
    pub use crate::{
        BridgeConfig, Context, Dynamic, ScriptError, ScriptResult, ScriptState, SharedPtr,
        register_renderer_api,
    };
    pub use scriptbridge_engine::Object;
}
