#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Call-stack annotations for boxed errors.
//!
//! ## Overview
//!
//! This crate records where an error happened. Wrapping an error captures
//! the call stack at the wrap site, once; the error then travels as an
//! ordinary `Box<dyn Error + Send + Sync>` through any code that neither
//! knows nor cares about stacks. When the error is finally logged or
//! printed, the captured stack is decoded into readable frames, with the
//! runtime's and this crate's own machinery filtered out so that the
//! first frame is your code.
//!
//! Capturing is cheap because no symbol resolution happens at wrap time.
//! Decoding is where the cost lives, and it is paid only by errors that
//! actually get rendered.
//!
//! ## Quick Example
//!
//! ```
//! use errstack::prelude::*;
//!
//! fn load_config(path: &str) -> Result<String, BoxError> {
//!     std::fs::read_to_string(path).context("loading config")
//! }
//!
//! let err = load_config("/no/such/file").unwrap_err();
//! assert!(err.to_string().starts_with("loading config: "));
//! assert!(errstack::has_stack(err.as_ref()));
//! ```
//!
//! ## Core Concepts
//!
//! ### Capture once, everywhere else is free
//!
//! [`with_stack`] checks whether the error already carries a stack
//! anywhere in its `source()` chain and returns it unchanged if so. Only
//! the innermost wrap site pays for a capture, and re-wrapping at every
//! level of a call chain is safe:
//!
//! ```
//! use errstack::with_stack;
//!
//! let once = with_stack(errstack::err!("disk full"));
//! let twice = with_stack(once);
//! assert_eq!(twice.to_string(), "disk full");
//! ```
//!
//! `twice` is the same allocation as `once`; no second stack was
//! captured and no text was layered onto the message.
//!
//! [`wrap`] layers a message on top without disturbing this property:
//! wrapping an already-annotated error adds the message but keeps the
//! original capture, so the stack always points at where the error first
//! appeared.
//!
//! ### Lazy decoding
//!
//! A captured stack is a list of opaque frame pointers,
//! [`CapturedStack`]. Turning those into function names and file
//! locations requires symbol resolution, which is slow, so it happens in
//! [`CapturedStack::frames`] rather than at capture time. Errors that are
//! handled and discarded never resolve a single symbol.
//!
//! ### Frame filtering
//!
//! Decoded stacks omit frames from the language runtime and from this
//! crate itself. What remains starts at the function that called
//! [`with_stack`] (or one of the [`ResultExt`] adapters), which is the
//! frame you actually want to see in a log.
//!
//! ## Structured Logging
//!
//! [`log_value`] projects any error into a [`LogValue`], a plain
//! serializable record of its message and decoded stack, ready to hand to
//! a structured logger:
//!
//! ```
//! use errstack::{err, log_value};
//!
//! let error = err!("disk full");
//! let entry = log_value(error.as_ref());
//!
//! let json = serde_json::to_value(&entry).unwrap();
//! assert_eq!(json["message"], "disk full");
//! assert!(json["stack"].is_array());
//! ```
//!
//! # Acknowledgements
//!
//! This library draws ideas from existing error handling libraries in the
//! Rust ecosystem, including [`anyhow`] and [`error-stack`], and builds
//! on the [`backtrace`] crate for the actual stack walking.
//!
//! [`anyhow`]: https://docs.rs/anyhow
//! [`error-stack`]: https://docs.rs/error-stack
//! [`backtrace`]: https://docs.rs/backtrace

#[macro_use]
mod macros;

pub mod prelude;

mod capture;
mod carrier;
mod frame;
mod log;
mod option_ext;
mod result_ext;

pub use self::{
    capture::{CapturedStack, MAX_DEPTH},
    carrier::{WithMessage, WithStack, has_stack, stack, with_stack, wrap},
    frame::Frame,
    log::{LogValue, log_value},
    option_ext::OptionExt,
    result_ext::ResultExt,
};

/// The boxed error type this crate annotates.
///
/// Everything here produces and consumes plain
/// `Box<dyn Error + Send + Sync>` trait objects, so annotated errors can
/// flow through code that has never heard of this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A [`Result`](std::result::Result) type alias where the error defaults
/// to [`BoxError`].
///
/// # Examples
///
/// ```
/// use errstack::prelude::*;
///
/// fn might_fail() -> errstack::Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T, E = BoxError> = std::result::Result<T, E>;

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    use std::fmt;

    #[doc(hidden)]
    pub use core::{format_args, result::Result::Err};

    use crate::BoxError;

    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    pub fn format_error(args: fmt::Arguments<'_>) -> BoxError {
        if let Some(message) = args.as_str() {
            crate::with_stack(message)
        } else {
            crate::with_stack(fmt::format(args))
        }
    }
}
