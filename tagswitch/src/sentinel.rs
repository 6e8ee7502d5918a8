//! Terminal branches of a dispatch.
//!
//! These functions are what the default arm of a `match` over a closed enumeration
//! should call. Neither returns: reaching one means an enumeration grew without the
//! dispatch logic following it.
use std::{
    convert::Infallible,
    fmt::{Debug, Display},
};

use log::error;

use crate::error::UnhandledVariant;

/// Abort the current operation because `discriminant` has no handler in `table`.
///
/// The panic payload is an [`UnhandledVariant`] carrying the discriminant, so it
/// can be recovered with [`std::panic::catch_unwind`] and
/// [`Any::downcast_ref`](std::any::Any::downcast_ref) by a supervisor that reports
/// defects.
#[track_caller]
pub fn unhandled<D>(table: &str, discriminant: D) -> !
where
    D: Debug + Display + Send + 'static,
{
    let failure = UnhandledVariant::new(table, discriminant);
    error!("{failure}");
    std::panic::panic_any(failure)
}

/// Statically unreachable branch.
///
/// `Infallible` has no values, so a call to this function only type-checks where
/// the compiler has proven every other case handled.
///
/// ```
/// use std::convert::Infallible;
/// use tagswitch::sentinel::absurd;
///
/// fn parse(input: Result<u8, Infallible>) -> u8 {
///     match input {
///         Ok(value) => value,
///         Err(never) => absurd(never),
///     }
/// }
///
/// assert_eq!(parse(Ok(3)), 3);
/// ```
pub fn absurd(never: Infallible) -> ! {
    match never {}
}
