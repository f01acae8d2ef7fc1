//! Diagnostics.

pub use ecow::{EcoString, eco_format};

/// Early-return with a [`StrResult`].
///
/// The macro formats its arguments into an [`EcoString`] and returns it as
/// the error.
///
/// ```ignore
/// bail!("frame extent {} exceeds {}", min, max);
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __bail {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        return Err($crate::diag::error!($fmt $(, $arg)*))
    };
}

/// Construct an [`EcoString`] error message without returning it.
#[macro_export]
#[doc(hidden)]
macro_rules! __error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::diag::eco_format!($fmt $(, $arg)*)
    };
}

#[rustfmt::skip]
#[doc(inline)]
pub use {
    crate::__bail as bail,
    crate::__error as error,
};

/// A result type with a string error message.
pub type StrResult<T> = Result<T, EcoString>;

/// Convert an optional value into a [`StrResult`] with a lazily built
/// message.
pub trait OkOr<T> {
    /// Turn `None` into an error with the given message.
    fn ok_or_msg<F, S>(self, f: F) -> StrResult<T>
    where
        F: FnOnce() -> S,
        S: Into<EcoString>;
}

impl<T> OkOr<T> for Option<T> {
    fn ok_or_msg<F, S>(self, f: F) -> StrResult<T>
    where
        F: FnOnce() -> S,
        S: Into<EcoString>,
    {
        self.ok_or_else(|| f().into())
    }
}
