//! Typed adapter traits.
//!
//! [`IntoNativeFn`] turns a plain Rust function or closure into a
//! [`NativeFn`] that pulls its arguments out of a [`CallContext`] and pushes
//! its return value back. [`IntoNativeMethod`] does the same for functions
//! whose first parameter is the receiver.
//!
//! Implementations exist for up to nine script-visible parameters.

use std::any::Any;

use scriptbridge_core::{FromDynamic, IntoDynamic, NativeFn, ParamKind, TypeHash};

/// How a method reaches its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Observer access; callable through read-only handles
    Const,
    /// Write access; rejected for read-only handles
    Mutable,
}

impl Receiver {
    /// True for [`Receiver::Const`].
    pub fn is_const(self) -> bool {
        matches!(self, Receiver::Const)
    }
}

/// A callable that can be registered as a free or static function.
pub trait IntoNativeFn<Args, Ret> {
    /// Parameter kinds in declaration order.
    fn param_kinds() -> Vec<ParamKind>;

    /// Type-erase into a native function with the given identity.
    fn into_native_fn(self, id: TypeHash) -> NativeFn;
}

/// A callable that can be registered as a method of `T`.
pub trait IntoNativeMethod<T: ?Sized, Args, Ret> {
    /// Parameter kinds in declaration order, excluding the receiver.
    fn param_kinds() -> Vec<ParamKind>;

    /// Type-erase into a native function with the given identity.
    fn into_native_method(self, id: TypeHash, receiver: Receiver) -> NativeFn;
}

macro_rules! impl_adapters {
    ($($arg:ident $idx:tt),*) => {
        impl<F, Ret, $($arg,)*> IntoNativeFn<($($arg,)*), Ret> for F
        where
            F: Fn($($arg),*) -> Ret + 'static,
            Ret: IntoDynamic,
            $($arg: FromDynamic,)*
        {
            fn param_kinds() -> Vec<ParamKind> {
                vec![$(<$arg as FromDynamic>::param_kind()),*]
            }

            fn into_native_fn(self, id: TypeHash) -> NativeFn {
                NativeFn::from_fn(id, move |ctx| {
                    let ret = (self)($(ctx.arg::<$arg>($idx)?),*);
                    ctx.set_return(ret);
                    Ok(())
                })
            }
        }

        impl<T, F, Ret, $($arg,)*> IntoNativeMethod<T, ($($arg,)*), Ret> for F
        where
            T: Any,
            F: Fn(&T, $($arg),*) -> Ret + 'static,
            Ret: IntoDynamic,
            $($arg: FromDynamic,)*
        {
            fn param_kinds() -> Vec<ParamKind> {
                vec![$(<$arg as FromDynamic>::param_kind()),*]
            }

            fn into_native_method(self, id: TypeHash, receiver: Receiver) -> NativeFn {
                NativeFn::from_fn(id, move |ctx| {
                    let ret = {
                        let this = match receiver {
                            Receiver::Const => ctx.this::<T>()?,
                            Receiver::Mutable => ctx.this_for_write::<T>()?,
                        };
                        (self)(this, $(ctx.arg::<$arg>($idx)?),*)
                    };
                    ctx.set_return(ret);
                    Ok(())
                })
            }
        }
    };
}

impl_adapters!();
impl_adapters!(A0 0);
impl_adapters!(A0 0, A1 1);
impl_adapters!(A0 0, A1 1, A2 2);
impl_adapters!(A0 0, A1 1, A2 2, A3 3);
impl_adapters!(A0 0, A1 1, A2 2, A3 3, A4 4);
impl_adapters!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_adapters!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_adapters!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);
impl_adapters!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8);
