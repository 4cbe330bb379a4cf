use thiserror::Error;

/// Error returned when calling an empty [`Function`].
///
/// This is the only failure the container itself reports: failures of the stored callable
/// (panics, or its own `Result` return values) are passed through to the caller untouched.
///
/// [`Function`]: struct.Function.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("tried to call an empty `Function`")]
pub struct BadFunctionCall;
