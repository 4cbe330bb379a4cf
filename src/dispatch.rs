use {
    crate::storage::{Placement, Storage},
    std::{marker::PhantomData, ptr},
};

/// Drops the occupant. The storage must not be read again afterwards.
type DestroyFn = unsafe fn(&mut Storage);

/// Clones the occupant of the source (second argument) into the empty destination (first argument).
type CopyFn = unsafe fn(&mut Storage, &Storage);

/// Transfers the occupant of the source (second argument) into the empty destination (first argument).
/// The source is retired and must not be read or destroyed afterwards.
type RelocateFn = unsafe fn(&mut Storage, &mut Storage);

/// Dispatch table for a concrete callable type
/// which knows
/// 1) how to drop it;
/// 2) how to clone it into another storage;
/// 3) how to move it into another storage;
/// 4) whether it is stored inline or boxed.
///
/// A static reference to this is stored in the [`Function`], shared by all holders of the same type.
///
/// [`Function`]: ../struct.Function.html
pub(crate) struct Operations {
    pub(crate) destroy: DestroyFn,
    pub(crate) copy: CopyFn,
    pub(crate) relocate: RelocateFn,
    pub(crate) inline: bool,
}

impl Operations {
    /// Returns the dispatch table for the callable type `F`.
    ///
    /// Built at compile time, so first use needs no synchronization.
    pub(crate) fn of<F: Clone>() -> &'static Operations {
        Table::<F>::OPERATIONS
    }
}

struct Table<F>(PhantomData<F>);

impl<F: Clone> Table<F> {
    const OPERATIONS: &'static Operations = &Operations {
        destroy: if <F as Placement>::INLINE {
            inline::destroy::<F>
        } else {
            boxed::destroy::<F>
        },
        copy: if <F as Placement>::INLINE {
            inline::copy::<F>
        } else {
            boxed::copy::<F>
        },
        relocate: if <F as Placement>::INLINE {
            inline::relocate::<F>
        } else {
            boxed::relocate::<F>
        },
        inline: <F as Placement>::INLINE,
    };
}

mod inline {
    use super::*;

    pub(super) unsafe fn destroy<F>(storage: &mut Storage) {
        ptr::drop_in_place(storage.inline_mut::<F>());
    }

    pub(super) unsafe fn copy<F: Clone>(dst: &mut Storage, src: &Storage) {
        let f = (*src.inline::<F>()).clone();
        dst.inline_mut::<F>().write(f);
    }

    pub(super) unsafe fn relocate<F>(dst: &mut Storage, src: &mut Storage) {
        // Bitwise move; the source bytes are dead afterwards.
        ptr::copy_nonoverlapping(src.inline::<F>(), dst.inline_mut::<F>(), 1);
    }
}

mod boxed {
    use super::*;

    pub(super) unsafe fn destroy<F>(storage: &mut Storage) {
        drop(Box::from_raw(storage.boxed::<F>()));

        #[cfg(feature = "tracing")]
        tracing::trace!(callable = std::any::type_name::<F>(), "boxed callable released");
    }

    pub(super) unsafe fn copy<F: Clone>(dst: &mut Storage, src: &Storage) {
        let f = (*src.boxed::<F>()).clone();
        dst.set_boxed::<F>(Box::into_raw(Box::new(f)));

        #[cfg(feature = "tracing")]
        tracing::trace!(callable = std::any::type_name::<F>(), "boxed callable cloned");
    }

    pub(super) unsafe fn relocate<F>(dst: &mut Storage, src: &mut Storage) {
        // Ownership of the allocation moves with the pointer.
        dst.set_boxed::<F>(src.boxed::<F>());
    }
}
