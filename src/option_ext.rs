//! Extension methods for `Option` that turn `None` into a stack-bearing
//! error.
//!
//! `Some` values pass through untouched. `None` becomes an error whose
//! message is the given context, wrapped with a stack captured at the
//! call site.

use std::fmt;

use crate::{BoxError, carrier};

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for Option<T> {}
}

/// Extension trait converting `None` into a stack-bearing error.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use errstack::{OptionExt, has_stack};
///
/// fn user_id(users: &HashMap<String, u64>) -> errstack::Result<u64> {
///     users.get("admin").copied().context("missing user id")
/// }
///
/// let err = user_id(&HashMap::new()).unwrap_err();
/// assert_eq!(err.to_string(), "missing user id");
/// assert!(has_stack(err.as_ref()));
/// ```
pub trait OptionExt<T>: sealed::Sealed {
    /// Converts `None` into an error displaying `context`, with a stack
    /// captured here.
    #[must_use]
    fn context<C>(self, context: C) -> Result<T, BoxError>
    where
        C: fmt::Display;

    /// Like [`context`](OptionExt::context), with the message computed
    /// lazily; the closure runs only for `None`.
    #[must_use]
    fn context_with<C, F>(self, context: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> C,
        C: fmt::Display;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline(always)]
    fn context<C>(self, context: C) -> Result<T, BoxError>
    where
        C: fmt::Display,
    {
        match self {
            Some(value) => Ok(value),
            None => Err(carrier::with_stack(context.to_string())),
        }
    }

    #[inline(always)]
    fn context_with<C, F>(self, context: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> C,
        C: fmt::Display,
    {
        match self {
            Some(value) => Ok(value),
            None => Err(carrier::with_stack(context().to_string())),
        }
    }
}
