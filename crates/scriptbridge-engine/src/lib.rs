//! Reduced native graphics object model.
//!
//! Every class here is reference counted through [`SharedPtr`] and, apart
//! from [`RenderPath`], derives from [`Object`], which gives it a dynamic
//! type identity. Objects are created by factories against an explicit
//! [`Context`]; they never keep the context themselves.
//!
//! ```
//! use scriptbridge_engine::{Camera, Context, Object};
//!
//! let context = Context::new();
//! scriptbridge_engine::initialize(&context);
//!
//! let camera = context.create_object("Camera").unwrap();
//! assert_eq!(camera.object_type().name, "Camera");
//! assert!(context.create::<Camera>().fov() > 0.0);
//! ```

use scriptbridge_core::SharedPtr;

macro_rules! impl_object {
    ($ty:ty, $name:literal) => {
        scriptbridge_core::bridged!($ty, $name, dynamic);
        impl $crate::Object for $ty {}
    };
}

mod buffer;
mod camera;
mod context;
mod debug_renderer;
mod graphics;
mod index_buffer;
mod material;
mod math;
mod object;
mod render_path;
mod renderer;
mod scene;
mod texture;
mod vector_buffer;
mod vertex_buffer;
mod viewport;

pub use buffer::{BufferStorage, LockState, LockableBuffer};
pub use camera::{
    Camera, DEFAULT_CAMERA_FOV, DEFAULT_FARCLIP, DEFAULT_NEARCLIP, DEFAULT_ORTHOSIZE, FillMode,
    ViewOverrideFlags,
};
pub use context::{Context, ObjectFactory};
pub use debug_renderer::{DebugLine, DebugRenderer};
pub use graphics::Graphics;
pub use index_buffer::IndexBuffer;
pub use material::{CullMode, Material, QUALITY_HIGH, QUALITY_LOW, QUALITY_MAX, QUALITY_MEDIUM, Technique, TechniqueEntry};
pub use math::{Color, IntRect};
pub use object::{Object, downcast, into_object};
pub use render_path::{RenderPath, RenderPathCommand};
pub use renderer::Renderer;
pub use scene::Scene;
pub use texture::{Texture2D, TextureUsage};
pub use vector_buffer::VectorBuffer;
pub use vertex_buffer::{ElementMask, ElementSemantic, VertexBuffer, VertexElement};
pub use viewport::Viewport;

/// Register the factories for every graphics class and create the
/// `Graphics` and `Renderer` subsystems.
pub fn initialize(context: &Context) {
    context.register_factory::<Camera>();
    context.register_factory::<DebugRenderer>();
    context.register_factory::<IndexBuffer>();
    context.register_factory::<Material>();
    context.register_factory::<Scene>();
    context.register_factory::<Technique>();
    context.register_factory::<Texture2D>();
    context.register_factory::<VertexBuffer>();
    context.register_factory::<Viewport>();

    context.register_subsystem(SharedPtr::new(Graphics::new()));
    context.register_subsystem(SharedPtr::new(Renderer::new()));
}
