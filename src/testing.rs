use std::{cell::Cell, rc::Rc};

/// Counts live instances through a shared counter.
pub(crate) struct Tracked(Rc<Cell<isize>>);

impl Tracked {
    pub(crate) fn new(live: &Rc<Cell<isize>>) -> Self {
        live.set(live.get() + 1);
        Self(live.clone())
    }

    /// Number of instances sharing this counter which are currently alive.
    pub(crate) fn live(&self) -> isize {
        self.0.get()
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(&self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}
