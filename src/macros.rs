/// Creates a stack-bearing [`BoxError`](crate::BoxError) from a format
/// string.
///
/// Interprets its arguments like [`format!`]; the resulting message
/// becomes the error's display, and a stack is captured at the call site.
/// A format string without arguments skips the formatting machinery and
/// uses the literal directly.
///
/// # Examples
///
/// ```
/// use errstack::{err, has_stack};
///
/// let plain = err!("disk full");
/// assert_eq!(plain.to_string(), "disk full");
/// assert!(has_stack(plain.as_ref()));
///
/// let detailed = err!("disk full: {} bytes left", 0);
/// assert_eq!(detailed.to_string(), "disk full: 0 bytes left");
/// ```
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::__private::format_error($crate::__private::format_args!($($arg)*))
    };
}

/// Returns early with a stack-bearing error built like [`err!`].
///
/// Equivalent to `return Err(err!(...).into())`, so it works in any
/// function whose error type converts from
/// [`BoxError`](crate::BoxError).
///
/// # Examples
///
/// ```
/// use errstack::bail;
///
/// fn check(value: i32) -> errstack::Result<i32> {
///     if value < 0 {
///         bail!("value must be non-negative, got {value}");
///     }
///     Ok(value)
/// }
///
/// assert_eq!(check(3).unwrap(), 3);
/// assert_eq!(
///     check(-2).unwrap_err().to_string(),
///     "value must be non-negative, got -2"
/// );
/// ```
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return $crate::__private::Err($crate::err!($($arg)*).into())
    };
}
