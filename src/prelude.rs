//! The errstack prelude.
//!
//! Glob-importing this module brings in the extension traits and macros
//! used at most error-handling sites, together with the
//! [`BoxError`](crate::BoxError) alias they produce.
//!
//! The crate-level [`Result`](crate::Result) alias is deliberately not
//! re-exported here, so a glob import never shadows a `Result` already
//! in scope.
//!
//! # Examples
//!
//! ```
//! use errstack::prelude::*;
//!
//! fn read_port(config: &str) -> Result<u16, BoxError> {
//!     config.trim().parse::<u16>().context("reading port")
//! }
//!
//! let err = read_port("not a number").unwrap_err();
//! assert!(err.to_string().starts_with("reading port: "));
//! ```

pub use crate::{BoxError, OptionExt, ResultExt, bail, err};
