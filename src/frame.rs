//! Decoding raw frames into symbolic stack entries.
//!
//! Decoding is the expensive half of the stack story and runs only on
//! demand, against the process's own symbol and debug information. Each
//! pass also filters: frames belonging to the language runtime, to the
//! unwinding engine, or to this crate's own wrapping machinery never show
//! up in the result, so the first visible entry is the call site that
//! triggered wrapping.

use std::sync::OnceLock;

use serde::Serialize;

use crate::{capture::CapturedStack, carrier::WithStack};

/// One decoded stack entry.
///
/// A pure projection of a raw frame: equality is field equality, there is
/// no identity beyond that. Serializes with the wire names `func` and
/// `file`.
///
/// # Examples
///
/// ```
/// use errstack::{stack, with_stack};
///
/// let err = with_stack(std::io::Error::other("disk full"));
/// let frames = stack(err.as_ref());
/// assert!(frames.iter().all(|frame| !frame.function.is_empty()));
/// assert!(frames.iter().all(|frame| frame.location.contains(':')));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Fully qualified function name, demangled, without the trailing
    /// symbol hash.
    #[serde(rename = "func")]
    pub function: String,
    /// Source path and line number, formatted as `<path>:<line>`.
    /// `"<unknown>:0"` when the symbol carries no source information.
    #[serde(rename = "file")]
    pub location: String,
}

/// Function-name prefixes owned by the language runtime and the unwinding
/// engine. Frames matching any of them are dropped during decoding.
const RUNTIME_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "__rust",
    "__libc_start",
    "_Unwind",
    "_start",
];

/// Namespace prefix of this crate's own symbols (`"errstack::"` under the
/// published name). Derived from a type path rather than written as a
/// literal, so the filter keeps working if the crate is renamed.
fn own_namespace() -> &'static str {
    static PREFIX: OnceLock<String> = OnceLock::new();
    PREFIX.get_or_init(|| {
        let type_path = std::any::type_name::<WithStack>();
        let crate_root = type_path.split("::").next().unwrap_or(type_path);
        format!("{crate_root}::")
    })
}

fn in_hidden_namespace(path: &str) -> bool {
    RUNTIME_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
        || path.starts_with(own_namespace())
}

fn is_hidden(function: &str) -> bool {
    if in_hidden_namespace(function) {
        return true;
    }
    // Trait-impl methods demangle as `<Type as Trait>::method`. Hide the
    // frame when either the implementing type or the trait lives in a
    // hidden namespace; this covers the crate's own `Result`/`Option`
    // adapters and runtime plumbing like `FnOnce::call_once`.
    if let Some(qualified) = function.strip_prefix('<') {
        if in_hidden_namespace(qualified) {
            return true;
        }
        if let Some((_, trait_path)) = qualified.split_once(" as ") {
            return in_hidden_namespace(trait_path);
        }
    }
    false
}

impl CapturedStack {
    /// Resolves the raw frames into symbolic [`Frame`]s, dropping runtime
    /// and crate-internal entries.
    ///
    /// Resolution runs fresh on every call; nothing is cached, and the
    /// result is deterministic for a given snapshot and symbol state. One
    /// raw frame may expand into several [`Frame`]s when the compiler
    /// inlined calls at the capture point; expansions keep capture order,
    /// closest to the error site first. Frames that resolve to no symbol
    /// name are omitted; a name without source information keeps its frame
    /// with the location `"<unknown>:0"`.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(self.len());
        for raw in self.raw() {
            backtrace::resolve_frame(raw, |symbol| {
                let Some(name) = symbol.name() else { return };
                let function = format!("{name:#}");
                if is_hidden(&function) {
                    return;
                }
                let location = match (symbol.filename(), symbol.lineno()) {
                    (Some(path), Some(line)) => format!("{}:{line}", path.display()),
                    (Some(path), None) => format!("{}:0", path.display()),
                    _ => String::from("<unknown>:0"),
                };
                frames.push(Frame { function, location });
            });
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_namespace_matches_this_crate() {
        assert_eq!(own_namespace(), concat!(env!("CARGO_PKG_NAME"), "::"));
    }

    #[test]
    fn test_runtime_frames_are_hidden() {
        assert!(is_hidden("std::panicking::try"));
        assert!(is_hidden("core::ops::function::FnOnce::call_once"));
        assert!(is_hidden("alloc::boxed::Box<T>::new"));
        assert!(is_hidden("backtrace::backtrace::libunwind::trace"));
        assert!(is_hidden("__rust_begin_short_backtrace"));
        assert!(is_hidden("__libc_start_main"));
        assert!(is_hidden("_Unwind_Backtrace"));
    }

    #[test]
    fn test_own_frames_are_hidden() {
        let wrapping = format!("{}carrier::with_stack", own_namespace());
        let capturing = format!("{}capture::capture", own_namespace());
        assert!(is_hidden(&wrapping));
        assert!(is_hidden(&capturing));
    }

    #[test]
    fn test_trait_impl_frames_are_hidden() {
        let adapter = format!(
            "<core::result::Result<T,E> as {}result_ext::ResultExt<T>>::context",
            own_namespace()
        );
        assert!(is_hidden(&adapter));
        assert!(is_hidden(
            "<integration_tests::run::{{closure}} as core::ops::function::FnOnce<()>>::call_once"
        ));
        assert!(is_hidden("<alloc::boxed::Box<T>>::new"));
    }

    #[test]
    fn test_user_trait_impl_frames_are_kept() {
        assert!(!is_hidden(
            "<myapp::loader::Loader as myapp::source::Source>::fetch"
        ));
    }

    #[test]
    fn test_user_frames_are_kept() {
        assert!(!is_hidden("myapp::config::load"));
        assert!(!is_hidden("integration_tests::wraps_fresh_error"));
        assert!(!is_hidden("test::run_test"));
        assert!(!is_hidden("main"));
    }

    #[test]
    fn test_frame_serializes_with_wire_names() {
        let frame = Frame {
            function: String::from("myapp::config::load"),
            location: String::from("src/config.rs:42"),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["func"], "myapp::config::load");
        assert_eq!(json["file"], "src/config.rs:42");
    }
}
