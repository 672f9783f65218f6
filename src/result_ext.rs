//! Extension methods for `Result` that route errors through the wrapping
//! operations.
//!
//! The `Ok` arm always passes through untouched; only the `Err` arm is
//! wrapped.
//!
//! # Quick Start
//!
//! ```
//! use errstack::{BoxError, ResultExt};
//!
//! fn read_config() -> Result<String, BoxError> {
//!     std::fs::read_to_string("/nonexistent/config.toml").context("loading config")
//! }
//!
//! let err = read_config().unwrap_err();
//! assert!(err.to_string().starts_with("loading config: "));
//! ```

use std::fmt;

use crate::{BoxError, carrier};

mod sealed {
    pub trait Sealed {}
    impl<T, E> Sealed for Result<T, E> {}
}

/// Extension trait wiring [`with_stack`](crate::with_stack) and
/// [`wrap`](crate::wrap) into `Result` pipelines.
///
/// Implemented for every `Result<T, E>` whose error converts into
/// [`BoxError`]. All methods are identity on `Ok`.
pub trait ResultExt<T>: sealed::Sealed {
    /// Ensures the `Err` arm carries a stack.
    ///
    /// An error whose chain already holds one passes through unchanged;
    /// otherwise the stack is captured here, at the first wrap point.
    ///
    /// # Examples
    ///
    /// ```
    /// use errstack::{ResultExt, has_stack};
    ///
    /// let result: Result<(), std::io::Error> = Err(std::io::Error::other("disk full"));
    /// let err = result.with_stack().unwrap_err();
    /// assert_eq!(err.to_string(), "disk full");
    /// assert!(has_stack(err.as_ref()));
    /// ```
    #[must_use]
    fn with_stack(self) -> Result<T, BoxError>;

    /// Prefixes the `Err` arm with `context` and ensures a stack.
    ///
    /// The resulting error displays as `"<context>: <error>"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use errstack::ResultExt;
    ///
    /// let result: Result<(), std::io::Error> = Err(std::io::Error::other("file not found"));
    /// let err = result.context("loading config").unwrap_err();
    /// assert_eq!(err.to_string(), "loading config: file not found");
    /// ```
    #[must_use]
    fn context<C>(self, context: C) -> Result<T, BoxError>
    where
        C: fmt::Display;

    /// Like [`context`](ResultExt::context), with the message computed
    /// lazily. The closure runs only on the `Err` arm, so a costly message
    /// is never built on the success path.
    ///
    /// # Examples
    ///
    /// ```
    /// use errstack::ResultExt;
    ///
    /// let result: Result<(), std::io::Error> = Err(std::io::Error::other("file not found"));
    /// let err = result
    ///     .context_with(|| format!("loading {}", "config"))
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "loading config: file not found");
    /// ```
    #[must_use]
    fn context_with<C, F>(self, context: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> C,
        C: fmt::Display;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline(always)]
    fn with_stack(self) -> Result<T, BoxError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(carrier::with_stack(error)),
        }
    }

    #[inline(always)]
    fn context<C>(self, context: C) -> Result<T, BoxError>
    where
        C: fmt::Display,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(carrier::wrap(error, context)),
        }
    }

    #[inline(always)]
    fn context_with<C, F>(self, context: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> C,
        C: fmt::Display,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(carrier::wrap(error, context())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_passes_through_untouched() {
        let result: Result<u32, std::io::Error> = Ok(7);
        assert_eq!(result.with_stack().unwrap(), 7);

        let result: Result<u32, std::io::Error> = Ok(7);
        assert_eq!(result.context("loading config").unwrap(), 7);
    }

    #[test]
    fn test_lazy_context_is_not_built_on_ok() {
        let result: Result<u32, std::io::Error> = Ok(7);
        let value = result
            .context_with(|| -> String { unreachable!("closure must not run on Ok") })
            .unwrap();
        assert_eq!(value, 7);
    }
}
