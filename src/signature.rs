use crate::storage::Storage;

/// A call signature a [`Function`] may be declared with.
///
/// Implemented for `dyn Fn(A, ..) -> R` and `dyn FnMut(A, ..) -> R` with up to 8 arguments.
/// `Fn` signatures are called through a shared reference,
/// `FnMut` signatures through a mutable reference (the occupant may mutate its captured state).
///
/// Arguments are plain type parameters, so signatures with higher-ranked reference arguments
/// (like `dyn Fn(&str)`) are not supported; name the lifetime (`dyn Fn(&'a str)`) or pass owned values.
///
/// This trait is sealed and cannot be implemented outside of this crate.
///
/// ```compile_fail
/// use minifunction::Signature;
///
/// struct Custom;
///
/// impl Signature for Custom {
///     type Invoker = fn();
/// }
/// ```
///
/// [`Function`]: struct.Function.html
pub trait Signature: sealed::Signature {
    /// Type-erased function pointer which applies the occupant in the storage to the arguments.
    #[doc(hidden)]
    type Invoker: Copy;
}

/// A callable which may be stored in a [`Function`] declared with the signature `S`.
///
/// Blanket-implemented for every `Clone + 'static` closure / function / function pointer
/// with a matching signature. This trait is sealed and cannot be implemented outside of this crate.
///
/// ```compile_fail
/// use minifunction::{Callable, Storage};
///
/// #[derive(Clone)]
/// struct Custom;
///
/// impl Callable<dyn Fn() -> u32> for Custom {
///     fn invoker() -> unsafe fn(&Storage) -> u32 {
///         unsafe fn invoke(_: &Storage) -> u32 {
///             7
///         }
///
///         invoke
///     }
/// }
/// ```
///
/// [`Function`]: struct.Function.html
pub trait Callable<S: ?Sized + Signature>: sealed::Callable<S> + Clone + 'static {
    /// Returns the invoker for this concrete callable type.
    #[doc(hidden)]
    fn invoker() -> S::Invoker;
}

mod sealed {
    pub trait Signature {}

    pub trait Callable<S: ?Sized> {}
}

macro_rules! signature {
    ($($arg:ident: $ty:ident),*) => {
        impl<R $(, $ty)*> sealed::Signature for dyn Fn($($ty),*) -> R {}
        impl<R $(, $ty)*> sealed::Signature for dyn FnMut($($ty),*) -> R {}

        impl<F, R $(, $ty)*> sealed::Callable<dyn Fn($($ty),*) -> R> for F
        where
            F: Fn($($ty),*) -> R + Clone + 'static,
        {}

        impl<F, R $(, $ty)*> sealed::Callable<dyn FnMut($($ty),*) -> R> for F
        where
            F: FnMut($($ty),*) -> R + Clone + 'static,
        {}

        impl<R $(, $ty)*> Signature for dyn Fn($($ty),*) -> R {
            type Invoker = unsafe fn(&Storage $(, $ty)*) -> R;
        }

        impl<R $(, $ty)*> Signature for dyn FnMut($($ty),*) -> R {
            type Invoker = unsafe fn(&mut Storage $(, $ty)*) -> R;
        }

        impl<F, R $(, $ty)*> Callable<dyn Fn($($ty),*) -> R> for F
        where
            F: Fn($($ty),*) -> R + Clone + 'static,
        {
            fn invoker() -> unsafe fn(&Storage $(, $ty)*) -> R {
                unsafe fn invoke<F, R $(, $ty)*>(storage: &Storage $(, $arg: $ty)*) -> R
                where
                    F: Fn($($ty),*) -> R,
                {
                    (storage.occupant::<F>())($($arg),*)
                }

                invoke::<F, R $(, $ty)*>
            }
        }

        impl<F, R $(, $ty)*> Callable<dyn FnMut($($ty),*) -> R> for F
        where
            F: FnMut($($ty),*) -> R + Clone + 'static,
        {
            fn invoker() -> unsafe fn(&mut Storage $(, $ty)*) -> R {
                unsafe fn invoke<F, R $(, $ty)*>(storage: &mut Storage $(, $arg: $ty)*) -> R
                where
                    F: FnMut($($ty),*) -> R,
                {
                    (storage.occupant_mut::<F>())($($arg),*)
                }

                invoke::<F, R $(, $ty)*>
            }
        }
    };
}

signature!();
signature!(a0: A0);
signature!(a0: A0, a1: A1);
signature!(a0: A0, a1: A1, a2: A2);
signature!(a0: A0, a1: A1, a2: A2, a3: A3);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);
