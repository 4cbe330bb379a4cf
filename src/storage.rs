use {
    static_assertions::{assert_eq_align, const_assert_eq},
    std::{
        cell::UnsafeCell,
        mem::{align_of, size_of, MaybeUninit},
        ptr,
    },
};

/// Amount of memory available for inline callable storage in a [`Function`].
///
/// x86: 2 * 4b = 8b
/// x64: 2 * 8b = 16b
///
/// [`Function`]: struct.Function.html
pub const STORAGE_SIZE: usize = size_of::<Storage>();

/// Alignment of the inline callable storage in a [`Function`].
///
/// [`Function`]: struct.Function.html
pub const STORAGE_ALIGN: usize = align_of::<Storage>();

/// Raw two-word buffer holding the occupant of a [`Function`].
///
/// Either contains the bytes of the callable itself (inline mode),
/// or a single owning pointer to a heap-allocated callable (boxed mode).
/// The buffer carries no mode tag of its own; it must only ever be accessed
/// through the [`Operations`] / invoker generated for the type which populated it.
///
/// The words live in an `UnsafeCell`: an `Fn` occupant may mutate its own state
/// (e.g. a captured `Cell`) while only a shared borrow of the storage is held.
///
/// Only public because it appears in the [`Signature::Invoker`] function pointer types.
///
/// [`Function`]: struct.Function.html
/// [`Operations`]: ../dispatch/struct.Operations.html
/// [`Signature::Invoker`]: trait.Signature.html#associatedtype.Invoker
#[doc(hidden)]
#[repr(C)]
pub struct Storage {
    words: UnsafeCell<MaybeUninit<[usize; 2]>>,
}

const_assert_eq!(size_of::<Storage>(), size_of::<usize>() * 2);
const_assert_eq!(size_of::<*mut u8>(), size_of::<usize>()); // Boxed mode owning pointer fits in the first word.
assert_eq_align!(Storage, usize);

/// Compile-time storage mode selection.
///
/// Blanket-implemented for every type: a type is stored inline iff it fits into
/// [`STORAGE_SIZE`] bytes and the storage alignment is a multiple of its own.
/// Rust values are always relocatable with a bitwise copy which cannot fail,
/// so no further requirement applies.
///
/// [`STORAGE_SIZE`]: constant.STORAGE_SIZE.html
pub(crate) trait Placement: Sized {
    const INLINE: bool;
}

impl<F> Placement for F {
    const INLINE: bool = fits_inline::<F>();
}

/// Returns `true` if a callable of type `F` is stored inside a [`Function`] without heap allocation.
///
/// [`Function`]: struct.Function.html
pub const fn fits_inline<F>() -> bool {
    size_of::<F>() <= STORAGE_SIZE && STORAGE_ALIGN % align_of::<F>() == 0
}

impl Storage {
    pub(crate) const fn uninit() -> Self {
        Self {
            words: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Moves `f` into the storage, boxing it if `F` does not fit inline.
    ///
    /// # Safety
    ///
    /// The storage must not contain a live occupant (it would be leaked).
    pub(crate) unsafe fn store<F>(&mut self, f: F) {
        if <F as Placement>::INLINE {
            self.inline_mut::<F>().write(f);
        } else {
            let boxed = Box::into_raw(Box::new(f));

            #[cfg(feature = "tracing")]
            tracing::trace!(
                callable = std::any::type_name::<F>(),
                size = size_of::<F>(),
                "boxed callable allocated"
            );

            self.set_boxed::<F>(boxed);
        }
    }

    /// Returns a reference to the occupant of type `F`, in whichever mode `F` uses.
    ///
    /// # Safety
    ///
    /// The storage must contain a live occupant of type `F`.
    pub(crate) unsafe fn occupant<F>(&self) -> &F {
        if <F as Placement>::INLINE {
            &*self.inline::<F>()
        } else {
            &*self.boxed::<F>()
        }
    }

    /// Returns a mutable reference to the occupant of type `F`, in whichever mode `F` uses.
    ///
    /// # Safety
    ///
    /// The storage must contain a live occupant of type `F`.
    pub(crate) unsafe fn occupant_mut<F>(&mut self) -> &mut F {
        if <F as Placement>::INLINE {
            &mut *self.inline_mut::<F>()
        } else {
            &mut *self.boxed::<F>()
        }
    }

    /// Pointer to the inline occupant.
    pub(crate) fn inline<F>(&self) -> *const F {
        debug_assert!(<F as Placement>::INLINE);
        self.words.get() as *const F
    }

    pub(crate) fn inline_mut<F>(&mut self) -> *mut F {
        debug_assert!(<F as Placement>::INLINE);
        self.words.get_mut().as_mut_ptr() as *mut F
    }

    /// Owning pointer to the boxed occupant.
    ///
    /// # Safety
    ///
    /// The storage must hold a boxed occupant of type `F`.
    pub(crate) unsafe fn boxed<F>(&self) -> *mut F {
        debug_assert!(!<F as Placement>::INLINE);
        ptr::read(self.words.get() as *const *mut F)
    }

    pub(crate) fn set_boxed<F>(&mut self, boxed: *mut F) {
        debug_assert!(!<F as Placement>::INLINE);
        unsafe {
            ptr::write(self.words.get_mut().as_mut_ptr() as *mut *mut F, boxed);
        }
    }
}
