use {
    crate::{
        dispatch::Operations,
        error::BadFunctionCall,
        signature::{Callable, Signature},
        storage::Storage,
    },
    static_assertions::const_assert_eq,
    std::{fmt, marker::PhantomData, mem::size_of},
};

/// Type-erased callable with value semantics and the small function optimization.
///
/// Holds any `Clone + 'static` callable matching the signature `S`
/// (`dyn Fn(A, ..) -> R` or `dyn FnMut(A, ..) -> R`) and calls it through [`call`].
///
/// Callables which fit into two machine words (and whose alignment does not exceed the word alignment)
/// are stored inline, without a heap allocation. Larger callables are boxed.
/// See [`fits_inline`].
///
/// Cloning a `Function` clones the stored callable; [`take`] moves it out, leaving the source empty.
///
/// # Example
///
/// ```
/// use minifunction::{BadFunctionCall, Function};
///
/// let a = 2;
/// let mut f: Function<dyn Fn(i32) -> i32> = Function::new(move |b: i32| a + b);
/// assert_eq!(f.call(3), Ok(5));
///
/// let g = f.take();
/// assert!(f.is_none());
/// assert_eq!(f.call(3), Err(BadFunctionCall));
/// assert_eq!(g.call(3), Ok(5));
/// ```
///
/// [`call`]: #method.call
/// [`take`]: #method.take
/// [`fits_inline`]: fn.fits_inline.html
pub struct Function<S: ?Sized + Signature> {
    storage: Storage,
    /// `None` iff `invoker` is `None` iff the `Function` is empty.
    operations: Option<&'static Operations>,
    invoker: Option<S::Invoker>,
    /// Occupants need not be thread safe.
    _marker: PhantomData<*const S>,
}

// Storage + dispatch table + invoker, no tag.
const_assert_eq!(size_of::<Function<dyn Fn()>>(), size_of::<usize>() * 4);

impl<S: ?Sized + Signature> Function<S> {
    /// Creates an empty [`Function`].
    ///
    /// Calling it fails with [`BadFunctionCall`].
    ///
    /// [`Function`]: struct.Function.html
    /// [`BadFunctionCall`]: struct.BadFunctionCall.html
    pub fn empty() -> Self {
        Self {
            storage: Storage::uninit(),
            operations: None,
            invoker: None,
            _marker: PhantomData,
        }
    }

    /// Creates a [`Function`] which contains the callable `f`.
    ///
    /// `f` is stored inline if it [`fits`], otherwise it is moved to the heap.
    ///
    /// [`Function`]: struct.Function.html
    /// [`fits`]: fn.fits_inline.html
    pub fn new<F: Callable<S>>(f: F) -> Self {
        let mut result = Self::empty();

        unsafe {
            result.storage.store(f);
        }

        result.operations = Some(Operations::of::<F>());
        result.invoker = Some(<F as Callable<S>>::invoker());

        result
    }

    /// Replaces the stored callable (if any) with `f`.
    ///
    /// The new value is fully constructed before the previous callable is released.
    pub fn set<F: Callable<S>>(&mut self, f: F) -> &mut Self {
        let mut temp = Self::new(f);
        self.swap(&mut temp);
        self
        // Previous callable dropped here.
    }

    /// Replaces the stored callable (if any) with a clone of the callable in `other`.
    ///
    /// If cloning panics, `self` is left untouched.
    pub fn assign(&mut self, other: &Self) -> &mut Self {
        let mut temp = other.clone();
        self.swap(&mut temp);
        self
    }

    /// Moves the stored callable out into a new [`Function`], leaving `self` empty.
    ///
    /// Never clones or reallocates the callable.
    ///
    /// [`Function`]: struct.Function.html
    pub fn take(&mut self) -> Self {
        let mut result = Self::empty();
        result.relocate_from(self);
        result
    }

    /// Exchanges the stored callables of `self` and `other`.
    ///
    /// Either or both may be empty; the stored callable types need not match.
    pub fn swap(&mut self, other: &mut Self) {
        let mut temp = Self::empty();

        temp.relocate_from(other);
        other.relocate_from(self);
        self.relocate_from(&mut temp);
    }

    /// Drops the stored callable, if any, leaving the [`Function`] empty.
    ///
    /// [`Function`]: struct.Function.html
    pub fn clear(&mut self) {
        if let Some(operations) = self.operations.take() {
            self.invoker = None;

            unsafe {
                (operations.destroy)(&mut self.storage);
            }
        }
    }

    /// If the [`Function`] contains a callable, returns `true`; otherwise returns `false`.
    ///
    /// [`Function`]: struct.Function.html
    pub fn is_some(&self) -> bool {
        self.operations.is_some()
    }

    /// If the [`Function`] is empty, returns `true`; otherwise returns `false`.
    ///
    /// [`Function`]: struct.Function.html
    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    /// Returns `true` if the [`Function`] contains a callable stored without heap allocation.
    ///
    /// [`Function`]: struct.Function.html
    pub fn is_inline(&self) -> bool {
        self.operations.map_or(false, |operations| operations.inline)
    }

    /// Returns `true` if the [`Function`] contains a heap-allocated callable.
    ///
    /// [`Function`]: struct.Function.html
    pub fn is_boxed(&self) -> bool {
        self.operations.map_or(false, |operations| !operations.inline)
    }

    /// `self` must be empty. Leaves `src` empty.
    fn relocate_from(&mut self, src: &mut Self) {
        debug_assert!(self.is_none(), "tried to move a callable into an occupied `Function`");

        if let Some(operations) = src.operations.take() {
            unsafe {
                (operations.relocate)(&mut self.storage, &mut src.storage);
            }

            self.operations = Some(operations);
            self.invoker = src.invoker.take();
        }
    }
}

impl<S: ?Sized + Signature> Default for Function<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: ?Sized + Signature> Clone for Function<S> {
    fn clone(&self) -> Self {
        let mut result = Self::empty();

        if let Some(operations) = self.operations {
            // `result` stays empty if the callable's `clone` panics.
            unsafe {
                (operations.copy)(&mut result.storage, &self.storage);
            }

            result.operations = Some(operations);
            result.invoker = self.invoker;
        }

        result
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<S: ?Sized + Signature> Drop for Function<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<S: ?Sized + Signature> fmt::Debug for Function<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = match self.operations {
            None => "empty",
            Some(operations) if operations.inline => "inline",
            Some(_) => "boxed",
        };

        f.debug_struct("Function")
            .field("storage", &format_args!("{}", storage))
            .finish()
    }
}

macro_rules! call {
    ($($arg:ident: $ty:ident),*) => {
        impl<R $(, $ty)*> Function<dyn Fn($($ty),*) -> R> {
            /// Calls the stored callable.
            ///
            /// # Errors
            ///
            /// Returns [`BadFunctionCall`] if the `Function` is empty.
            /// Panics of the stored callable propagate to the caller.
            ///
            /// [`BadFunctionCall`]: struct.BadFunctionCall.html
            pub fn call(&self $(, $arg: $ty)*) -> Result<R, BadFunctionCall> {
                let invoker = self.invoker.ok_or(BadFunctionCall)?;
                Ok(unsafe { invoker(&self.storage $(, $arg)*) })
            }

            /// Calls the stored callable without checking whether the `Function` is empty.
            ///
            /// # Safety
            ///
            /// The caller guarantees the `Function` is not empty.
            pub unsafe fn call_unchecked(&self $(, $arg: $ty)*) -> R {
                debug_assert!(self.is_some(), "tried to call an empty `Function`");

                match self.invoker {
                    Some(invoker) => invoker(&self.storage $(, $arg)*),
                    None => std::hint::unreachable_unchecked(),
                }
            }
        }

        impl<R $(, $ty)*> Function<dyn FnMut($($ty),*) -> R> {
            /// Calls the stored callable, which may mutate its captured state.
            ///
            /// # Errors
            ///
            /// Returns [`BadFunctionCall`] if the `Function` is empty.
            /// Panics of the stored callable propagate to the caller.
            ///
            /// [`BadFunctionCall`]: struct.BadFunctionCall.html
            pub fn call(&mut self $(, $arg: $ty)*) -> Result<R, BadFunctionCall> {
                let invoker = self.invoker.ok_or(BadFunctionCall)?;
                Ok(unsafe { invoker(&mut self.storage $(, $arg)*) })
            }

            /// Calls the stored callable without checking whether the `Function` is empty.
            ///
            /// # Safety
            ///
            /// The caller guarantees the `Function` is not empty.
            pub unsafe fn call_unchecked(&mut self $(, $arg: $ty)*) -> R {
                debug_assert!(self.is_some(), "tried to call an empty `Function`");

                match self.invoker {
                    Some(invoker) => invoker(&mut self.storage $(, $arg)*),
                    None => std::hint::unreachable_unchecked(),
                }
            }
        }
    };
}

call!();
call!(a0: A0);
call!(a0: A0, a1: A1);
call!(a0: A0, a1: A1, a2: A2);
call!(a0: A0, a1: A1, a2: A2, a3: A3);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);
