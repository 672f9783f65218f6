//! Structured-log projection of errors and their stacks.
//!
//! This crate produces a serializable record and stops there: rendering
//! (JSON, text) belongs to the logging sink. Build the record at the point
//! a log line is actually emitted; that is where decoding cost is paid,
//! never at wrap time.

use std::error::Error;

use serde::Serialize;

use crate::{carrier, carrier::WithStack, frame::Frame};

/// The structured record handed to a logging sink.
///
/// Two fields: the error's full display message (context layers included)
/// and the decoded stack from the nearest carrier in the chain. A pure
/// projection with no behavior of its own.
///
/// # Examples
///
/// ```
/// use errstack::{log_value, wrap};
///
/// let err = wrap(std::io::Error::other("file not found"), "loading config");
/// let record = log_value(err.as_ref());
/// assert_eq!(record.message, "loading config: file not found");
/// assert!(!record.stack.is_empty());
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["message"], "loading config: file not found");
/// assert!(json["stack"].as_array().is_some_and(|stack| !stack.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogValue {
    /// The error's display message.
    pub message: String,
    /// Decoded frames, closest to the error site first. Empty when the
    /// chain carries no stack.
    pub stack: Vec<Frame>,
}

/// Projects `error` into a [`LogValue`] record.
///
/// Works on any error chain: the message comes from the chain head's
/// `Display`, the stack from the nearest stack-bearing link (empty when
/// there is none). Decoding happens inside this call, so sinks that never
/// render the record never pay for symbolication.
#[must_use]
pub fn log_value(error: &(dyn Error + 'static)) -> LogValue {
    LogValue {
        message: error.to_string(),
        stack: carrier::stack(error),
    }
}

impl WithStack {
    /// Projects this carrier into a [`LogValue`] record.
    ///
    /// Equivalent to calling [`log_value`] on the carrier itself.
    #[must_use]
    pub fn log_value(&self) -> LogValue {
        log_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::{with_stack, wrap};

    #[test]
    fn test_projection_of_a_stackless_chain_is_message_only() {
        let record = log_value(&std::io::Error::other("disk full"));
        assert_eq!(record.message, "disk full");
        assert!(record.stack.is_empty());
    }

    #[test]
    fn test_projection_uses_the_head_message() {
        // The carrier may sit below a later context layer; the message
        // must still be the full composed one.
        let inner = with_stack(std::io::Error::other("file not found"));
        let outer = wrap(inner, "loading config");
        let record = log_value(&*outer);
        assert_eq!(record.message, "loading config: file not found");
        assert!(!record.stack.is_empty());
    }

    #[test]
    fn test_record_send_sync() {
        static_assertions::assert_impl_all!(LogValue: Send, Sync);
    }
}
