//! Tagswitch: dispatch over closed enumerations that cannot silently miss a case.
//!
//! The crate is organised around three notions:
//! - a [`Discriminant`], the fieldless enum naming every case;
//! - a [`Variant`], any value that reports which case it belongs to;
//! - a [`DispatchTable`], one handler per case producing a uniform result.
//!
//! Coverage is checked as early as the construction allows. Tables written in code
//! use a `match` inside [`DispatchTable::from_fn`] and are checked by the compiler.
//! Tables assembled at run time go through [`TableBuilder::build`], which refuses any
//! gap before the first dispatch. Tables described by a
//! [`manifest::TableManifest`] go through the builder too. Deliberately incomplete
//! tables must be requested as a [`PartialTable`]. A gap reached there aborts
//! through [`sentinel::unhandled`] with an [`UnhandledVariant`] payload, rather
//! than producing a placeholder.
//!
//! Examples
//! ```
//! use enum_map::Enum;
//! use strum::{AsRefStr, Display, EnumIter};
//! use tagswitch::{DispatchError, DispatchTable, Variant};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display, Variant)]
//! #[strum(serialize_all = "snake_case")]
//! enum Coin {
//!     Heads,
//!     Tails,
//! }
//!
//! // Forgetting `Tails` is caught before anything is dispatched.
//! let incomplete = DispatchTable::<Coin, i32>::builder("payout")
//!     .on(Coin::Heads, |_| 1)
//!     .build();
//! assert!(matches!(incomplete, Err(DispatchError::IncompleteTable { .. })));
//!
//! let payout = DispatchTable::<Coin, i32>::builder("payout")
//!     .on(Coin::Heads, |_| 1)
//!     .on(Coin::Tails, |_| -1)
//!     .build()
//!     .unwrap();
//! assert_eq!(payout.dispatch(Coin::Tails), -1);
//! assert!(payout.try_dispatch_tag("edge").is_err());
//! ```
#![deny(missing_docs)]

/// Closed enumerations and the values they tag.
pub mod discriminant;
/// Construction and configuration errors, and the unhandled-variant failure.
pub mod error;
/// Constant-result tables described in TOML.
pub mod manifest;
/// Non-returning branches for unhandled and impossible cases.
pub mod sentinel;
/// Total and partial dispatch tables.
pub mod table;

pub use discriminant::{Discriminant, Variant};
pub use error::{DispatchError, DispatchResult, RawDiscriminant, UnhandledVariant};
pub use manifest::TableManifest;
pub use table::{DispatchTable, Handler, PartialTable, TableBuilder};

#[cfg(feature = "derive")]
pub use tagswitch_derive::Variant;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Discriminant` and `Variant` traits (and the derive when enabled)
    //! - Tables, their builder and the handler alias
    //! - The unhandled-variant failure and its raw discriminant
    pub use crate::discriminant::{Discriminant, Variant};
    pub use crate::error::{RawDiscriminant, UnhandledVariant};
    pub use crate::table::{DispatchTable, Handler, PartialTable, TableBuilder};

    #[cfg(feature = "derive")]
    pub use tagswitch_derive::Variant;
}
