//! Bounded, eager capture of raw stack frames.
//!
//! Capture is the cheap half of the stack story: it clones the unwinder's
//! raw frame handles and stops. Symbolication is deliberately deferred to
//! [`CapturedStack::frames`](crate::CapturedStack::frames), which runs only
//! when a consumer actually asks for the stack.

use std::fmt;

/// Maximum number of raw frames recorded per capture.
///
/// Stacks deeper than this are truncated to the innermost `MAX_DEPTH`
/// frames, the ones closest to the wrap call site.
pub const MAX_DEPTH: usize = 32;

/// Innermost frames dropped at capture time. The unwinder reports its own
/// dispatch frame first; everything else this crate contributes is removed
/// symbolically during decoding, which stays correct across inlining
/// differences between build profiles.
const SKIP: usize = 1;

/// An undecoded call-stack snapshot.
///
/// Holds the raw frame handles recorded by [`capture`] and nothing else:
/// no symbol names, no file paths. A `CapturedStack` is created once per
/// carrier, never mutated afterwards, and is safe to share across threads.
/// An empty snapshot is a valid state meaning "no stack available".
///
/// # Examples
///
/// ```
/// use errstack::{MAX_DEPTH, WithStack, with_stack};
///
/// let err = with_stack(std::io::Error::other("disk full"));
/// let carrier = err.downcast_ref::<WithStack>().unwrap();
/// assert!(carrier.captured().len() <= MAX_DEPTH);
/// ```
pub struct CapturedStack {
    frames: Box<[backtrace::Frame]>,
}

impl CapturedStack {
    /// Number of raw frames recorded, at most [`MAX_DEPTH`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when no frames were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn raw(&self) -> &[backtrace::Frame] {
        &self.frames
    }
}

impl fmt::Debug for CapturedStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedStack")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Records the calling thread's current stack as raw frame handles.
///
/// Never inlined: the [`SKIP`] count assumes the unwinder dispatch frame is
/// the only frame below this function's own.
#[inline(never)]
pub(crate) fn capture() -> CapturedStack {
    let mut frames = Vec::with_capacity(MAX_DEPTH);
    let mut skip = SKIP;
    backtrace::trace(|frame| {
        if skip > 0 {
            skip -= 1;
            return true;
        }
        frames.push(frame.clone());
        frames.len() < MAX_DEPTH
    });
    CapturedStack {
        frames: frames.into_boxed_slice(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn recurse(depth: usize) -> CapturedStack {
        if depth == 0 {
            capture()
        } else {
            std::hint::black_box(recurse(depth - 1))
        }
    }

    #[test]
    fn test_capture_records_frames() {
        let stack = capture();
        assert!(!stack.is_empty());
        assert!(stack.len() <= MAX_DEPTH);
    }

    #[test]
    fn test_deep_stacks_truncate_to_max_depth() {
        let stack = recurse(MAX_DEPTH * 2);
        assert_eq!(stack.len(), MAX_DEPTH);
    }

    #[test]
    fn test_debug_reports_length_without_decoding() {
        let stack = capture();
        let rendered = format!("{stack:?}");
        assert!(rendered.contains("CapturedStack"));
        assert!(rendered.contains("len"));
    }

    #[test]
    fn test_captured_stack_send_sync() {
        static_assertions::assert_impl_all!(CapturedStack: Send, Sync);
    }
}
