//! The stack-bearing wrapper and the wrapping operations.
//!
//! [`with_stack`] attaches a freshly captured stack to an error unless its
//! cause chain already carries one; [`wrap`] layers a context message on
//! top and then does the same. Message layering happens on every call,
//! stack capture at most once per chain: the recorded stack always
//! reflects the first point at which the error was wrapped.
//!
//! # Quick Start
//!
//! ```
//! use errstack::{stack, wrap};
//!
//! let err = wrap(std::io::Error::other("file not found"), "loading config");
//! assert_eq!(err.to_string(), "loading config: file not found");
//! assert!(!stack(err.as_ref()).is_empty());
//! ```

use std::{error::Error, fmt};

use crate::{
    BoxError,
    capture::{self, CapturedStack},
    frame::Frame,
};

/// The stack-bearing error wrapper.
///
/// Owns the wrapped error and the raw stack captured when the wrapper was
/// created. The message is the cause's message, unchanged; the cause stays
/// reachable through [`Error::source`], so chain inspection and downcasts
/// against the original error keep working. Immutable after construction
/// and safe to share across threads.
///
/// Values are created through [`with_stack`] or [`wrap`], never directly;
/// both refuse to re-wrap a chain that already carries a stack.
///
/// # Examples
///
/// ```
/// use errstack::{WithStack, with_stack};
///
/// let err = with_stack(std::io::Error::other("disk full"));
/// let carrier = err.downcast_ref::<WithStack>().unwrap();
/// assert_eq!(carrier.to_string(), "disk full");
/// assert!(!carrier.frames().is_empty());
/// ```
pub struct WithStack {
    error: BoxError,
    stack: CapturedStack,
}

impl WithStack {
    fn new(error: BoxError) -> Self {
        Self {
            error,
            stack: capture::capture(),
        }
    }

    /// Decodes and filters the captured stack.
    ///
    /// Decoding runs fresh on every call; see
    /// [`CapturedStack::frames`] for the resolution and filtering rules.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.stack.frames()
    }

    /// The raw captured stack, undecoded.
    #[must_use]
    pub fn captured(&self) -> &CapturedStack {
        &self.stack
    }
}

impl fmt::Display for WithStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl fmt::Debug for WithStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithStack")
            .field("error", &self.error)
            .field("captured", &self.stack.len())
            .finish()
    }
}

impl Error for WithStack {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.error)
    }
}

/// A context-message layer over an error.
///
/// Displays as `"<message>: <source>"` while keeping the wrapped error
/// reachable through [`Error::source`]. Created by [`wrap`] and the
/// `context` adapters; a chain may hold any number of message layers but
/// at most one [`WithStack`].
///
/// # Examples
///
/// ```
/// use std::error::Error;
///
/// use errstack::{WithMessage, wrap};
///
/// let err = wrap(std::io::Error::other("file not found"), "loading config");
/// let layer = err
///     .source()
///     .and_then(|cause| cause.downcast_ref::<WithMessage>())
///     .unwrap();
/// assert_eq!(layer.message(), "loading config");
/// ```
pub struct WithMessage {
    message: String,
    source: BoxError,
}

impl WithMessage {
    fn new(message: impl fmt::Display, source: BoxError) -> Self {
        Self {
            message: message.to_string(),
            source,
        }
    }

    /// The context message alone, without the wrapped error's text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for WithMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.source)
    }
}

impl fmt::Debug for WithMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithMessage")
            .field("message", &self.message)
            .field("source", &self.source)
            .finish()
    }
}

impl Error for WithMessage {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Attaches a captured stack to `error` unless its chain already has one.
///
/// The stack-bearing check walks the whole cause chain, so an error buried
/// under foreign wrapper layers is still recognized and passes through
/// unchanged, with no new allocation and no re-capture. Only a chain with
/// no [`WithStack`] anywhere gets wrapped, with the stack captured at this
/// call site.
///
/// `Ok` values never reach this function; the `Result` adapters in
/// [`ResultExt`](crate::ResultExt) leave them untouched.
///
/// # Examples
///
/// ```
/// use errstack::{has_stack, stack, with_stack};
///
/// let err = with_stack(std::io::Error::other("disk full"));
/// assert_eq!(err.to_string(), "disk full");
/// assert!(has_stack(err.as_ref()));
///
/// // A second wrap returns the same value: the first capture wins.
/// let err = with_stack(err);
/// assert!(err.is::<errstack::WithStack>());
/// assert!(!stack(err.as_ref()).is_empty());
/// ```
#[must_use]
pub fn with_stack<E>(error: E) -> BoxError
where
    E: Into<BoxError>,
{
    let error = error.into();
    if has_stack(&*error) {
        return error;
    }
    Box::new(WithStack::new(error))
}

/// Prefixes `error` with a context message and ensures a stack.
///
/// The result displays as `"<message>: <error>"` and keeps `error`
/// reachable through its source chain, so identity-based cause checks
/// against the original still succeed. The message layer is added on
/// every call; the stack is captured only when the chain did not already
/// carry one. Message layering and stack capture are independent.
///
/// # Examples
///
/// ```
/// use errstack::wrap;
///
/// let err = wrap(std::io::Error::other("file not found"), "loading config");
/// assert_eq!(err.to_string(), "loading config: file not found");
/// ```
#[must_use]
pub fn wrap<E>(error: E, message: impl fmt::Display) -> BoxError
where
    E: Into<BoxError>,
{
    with_stack(WithMessage::new(message, error.into()))
}

/// Decoded frames from the nearest stack-bearing link in `error`'s chain.
///
/// Walks the cause chain for a [`WithStack`] and returns its decoded
/// frames; a chain without one yields an empty vector. Never fails.
///
/// # Examples
///
/// ```
/// use errstack::{stack, with_stack};
///
/// let plain = std::io::Error::other("disk full");
/// assert!(stack(&plain).is_empty());
///
/// let wrapped = with_stack(plain);
/// assert!(!stack(wrapped.as_ref()).is_empty());
/// ```
#[must_use]
pub fn stack(error: &(dyn Error + 'static)) -> Vec<Frame> {
    match find_carrier(error) {
        Some(carrier) => carrier.frames(),
        None => Vec::new(),
    }
}

/// Returns `true` when any link in `error`'s chain carries a stack.
///
/// # Examples
///
/// ```
/// use errstack::{has_stack, with_stack};
///
/// assert!(!has_stack(&std::io::Error::other("disk full")));
/// assert!(has_stack(with_stack(std::io::Error::other("disk full")).as_ref()));
/// ```
#[must_use]
pub fn has_stack(error: &(dyn Error + 'static)) -> bool {
    find_carrier(error).is_some()
}

fn find_carrier<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a WithStack> {
    let mut current: Option<&(dyn Error + 'static)> = Some(error);
    while let Some(link) = current {
        if let Some(carrier) = link.downcast_ref::<WithStack>() {
            return Some(carrier);
        }
        current = link.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk_full() -> BoxError {
        Box::new(std::io::Error::other("disk full"))
    }

    #[test]
    fn test_display_delegates_to_cause() {
        let carrier = WithStack::new(disk_full());
        assert_eq!(carrier.to_string(), "disk full");
    }

    #[test]
    fn test_message_layer_composes_display() {
        let layer = WithMessage::new("loading config", disk_full());
        assert_eq!(layer.to_string(), "loading config: disk full");
        assert_eq!(layer.message(), "loading config");
    }

    #[test]
    fn test_source_chain_reaches_original_error() {
        let err = wrap(std::io::Error::other("file not found"), "loading config");
        let mut current: Option<&(dyn Error + 'static)> = Some(&*err);
        let mut found = false;
        while let Some(link) = current {
            if let Some(io_err) = link.downcast_ref::<std::io::Error>() {
                assert_eq!(io_err.to_string(), "file not found");
                found = true;
            }
            current = link.source();
        }
        assert!(found);
    }

    #[test]
    fn test_has_stack_probes_the_whole_chain() {
        assert!(!has_stack(&std::io::Error::other("disk full")));

        let stacked = with_stack(disk_full());
        assert!(has_stack(&*stacked));

        // Head is a message layer; the carrier sits below it.
        let buried = wrap(stacked, "saving report");
        assert!(buried.is::<WithMessage>());
        assert!(has_stack(&*buried));
    }

    #[test]
    fn test_stack_is_empty_without_a_carrier() {
        assert!(stack(&std::io::Error::other("disk full")).is_empty());
    }

    #[test]
    fn test_wrapper_types_send_sync() {
        static_assertions::assert_impl_all!(WithStack: Send, Sync, std::error::Error);
        static_assertions::assert_impl_all!(WithMessage: Send, Sync, std::error::Error);
    }
}
