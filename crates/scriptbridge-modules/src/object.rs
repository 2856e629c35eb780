//! The `Object` base class and object creation by type name.
//!
//! `Object` is bound through the `dyn Object` base, so its methods take the
//! receiver's resolved identity from the handle rather than a concrete type.

use std::rc::Rc;

use scriptbridge_core::{CallContext, NativeError, NativeFn, ParamKind, SharedPtr, TypeHash};
use scriptbridge_engine::{Context, Object};
use scriptbridge_registry::{ClassBuilder, Module};

/// Hash of the type the receiver resolved to.
pub fn get_type(ctx: &mut CallContext) -> Result<(), NativeError> {
    let identity = ctx.this_identity()?;
    ctx.set_return(identity.hash.0);
    Ok(())
}

/// Name of the type the receiver resolved to.
pub fn get_type_name(ctx: &mut CallContext) -> Result<(), NativeError> {
    let identity = ctx.this_identity()?;
    ctx.set_return(identity.name);
    Ok(())
}

pub fn module(context: &Rc<Context>) -> Module {
    let object = TypeHash::from_name("Object");
    let context = Rc::clone(context);
    Module::new("object")
        .class(
            ClassBuilder::<dyn Object>::new()
                .raw_method(
                    "GetType",
                    vec![],
                    true,
                    NativeFn::from_fn(TypeHash::from_method(object, "GetType", &[]), get_type),
                )
                .raw_method(
                    "GetTypeName",
                    vec![],
                    true,
                    NativeFn::from_fn(
                        TypeHash::from_method(object, "GetTypeName", &[]),
                        get_type_name,
                    ),
                ),
        )
        .function(
            "CreateObject",
            move |type_name: String| -> Option<SharedPtr<dyn Object>> {
                context.create_object(&type_name)
            },
        )
        .function_raw(
            "GetTypeHash",
            vec![ParamKind::String],
            NativeFn::from_fn(TypeHash::from_function("GetTypeHash", &[]), |ctx| {
                let name: String = ctx.arg(0)?;
                ctx.set_return(TypeHash::from_name(&name).0);
                Ok(())
            }),
        )
}
