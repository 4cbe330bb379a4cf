//! A type-erased, clonable callable container with the small function optimization.
//!
//! [`Function<S>`] holds any `Clone + 'static` callable matching the call signature `S`
//! (written as a trait object type, `dyn Fn(A, ..) -> R` or `dyn FnMut(A, ..) -> R`)
//! and calls it uniformly through [`call`].
//!
//! Callables which fit into [`STORAGE_SIZE`] bytes (two machine words) and
//! [`STORAGE_ALIGN`] alignment are stored inline, without heap allocation;
//! larger or over-aligned callables are boxed.
//!
//! Clone / move / drop of the type-erased callable go through a per-type static dispatch table,
//! calls go through a per-type invoker function pointer; neither is looked up at runtime.
//!
//! ```
//! use minifunction::Function;
//!
//! let text = String::from("a1");
//! let f: Function<dyn Fn(String) -> String> =
//!     Function::new(move |suffix: String| format!("{}{}", text, suffix));
//! assert!(f.is_boxed());
//!
//! let g = f.clone();
//! drop(f);
//! assert_eq!(g.call("b2".to_owned()).unwrap(), "a1b2");
//!
//! let mut total = 0;
//! let mut counter: Function<dyn FnMut(i32) -> i32> = Function::new(move |x: i32| {
//!     total += x;
//!     total
//! });
//! assert!(counter.is_inline());
//! assert_eq!(counter.call(2), Ok(2));
//! assert_eq!(counter.call(3), Ok(5));
//! ```
//!
//! Enable the `tracing` feature to emit `trace` events for heap allocations of boxed callables.
//!
//! [`Function<S>`]: struct.Function.html
//! [`call`]: struct.Function.html#method.call
//! [`STORAGE_SIZE`]: constant.STORAGE_SIZE.html
//! [`STORAGE_ALIGN`]: constant.STORAGE_ALIGN.html

mod dispatch;
mod error;
mod function;
mod signature;
mod storage;

#[cfg(test)]
mod testing;

pub use {
    error::BadFunctionCall,
    function::Function,
    signature::{Callable, Signature},
    storage::{fits_inline, STORAGE_ALIGN, STORAGE_SIZE},
};

#[doc(hidden)]
pub use storage::Storage;
