//! Closed enumerations and the values tagged by them.
//!
//! A [`Discriminant`] is a fieldless enum whose members are known at compile time.
//! A [`Variant`] is any value that can report which member of such an enumeration it
//! belongs to. Payload-free enums are usually their own discriminant, while enums
//! carrying data (e.g. a `Shape` with `Circle { radius }`) point to a separate kind
//! enum. Both sides are normally produced by `#[derive(Variant)]`.
use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use enum_map::Enum;
use strum::IntoEnumIterator;

/// Member of a finite, closed enumeration.
///
/// The bounds are what a dispatch table needs from a tag: a dense index to store
/// handlers in an [`enum_map::EnumMap`], the list of every member to check coverage
/// against, and a stable textual form for diagnostics and manifests. They are met
/// by deriving `Enum`, `EnumIter`, `AsRefStr` and `Display`:
///
/// ```
/// use enum_map::Enum;
/// use strum::{AsRefStr, Display, EnumIter};
/// use tagswitch::Discriminant;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display)]
/// #[strum(serialize_all = "snake_case")]
/// enum Planet {
///     Mercury,
///     Venus,
/// }
///
/// assert_eq!(Planet::Venus.tag(), "venus");
/// assert_eq!(Planet::from_tag("mercury"), Some(Planet::Mercury));
/// assert_eq!(Planet::from_raw(2), None);
/// ```
pub trait Discriminant:
    Enum
    + IntoEnumIterator
    + AsRef<str>
    + Copy
    + Eq
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Number of members in the enumeration.
    const COUNT: usize = <Self as Enum>::LENGTH;

    /// Textual tag of this member.
    fn tag(&self) -> &str {
        self.as_ref()
    }

    /// Dense index of this member, in `0..Self::COUNT`.
    fn index(self) -> usize {
        self.into_usize()
    }

    /// Member at the given dense index, if any.
    fn from_raw(index: usize) -> Option<Self> {
        (index < Self::COUNT).then(|| Self::from_usize(index))
    }

    /// Member carrying the given textual tag, if any.
    fn from_tag(tag: &str) -> Option<Self> {
        Self::iter().find(|member| member.tag() == tag)
    }

    /// Every member, in declaration order.
    fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl<T> Discriminant for T where
    T: Enum
        + IntoEnumIterator
        + AsRef<str>
        + Copy
        + Eq
        + Hash
        + Debug
        + Display
        + Send
        + Sync
        + 'static
{
}

/// Value belonging to exactly one member of a closed enumeration.
///
/// The derive maps a payload enum onto a fieldless kind with one member per variant,
/// matched by name.
///
/// ```
/// use enum_map::Enum;
/// use strum::{AsRefStr, Display, EnumIter};
/// use tagswitch::Variant;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display)]
/// enum PacketKind {
///     Ping,
///     Data,
/// }
///
/// #[derive(Variant)]
/// #[variant(discriminant = PacketKind)]
/// enum Packet {
///     Ping,
///     Data(Vec<u8>),
/// }
///
/// assert_eq!(Packet::Data(vec![1, 2]).discriminant(), PacketKind::Data);
/// ```
///
/// A kind member without a variant is rejected:
///
/// ```compile_fail
/// use enum_map::Enum;
/// use strum::{AsRefStr, Display, EnumIter};
/// use tagswitch::Variant;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display)]
/// enum PacketKind {
///     Ping,
///     Data,
///     Close,
/// }
///
/// #[derive(Variant)]
/// #[variant(discriminant = PacketKind)]
/// enum Packet {
///     Ping,
///     Data(Vec<u8>),
/// }
/// ```
///
/// So is a variant without a kind member:
///
/// ```compile_fail
/// use enum_map::Enum;
/// use strum::{AsRefStr, Display, EnumIter};
/// use tagswitch::Variant;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display)]
/// enum PacketKind {
///     Ping,
/// }
///
/// #[derive(Variant)]
/// #[variant(discriminant = PacketKind)]
/// enum Packet {
///     Ping,
///     Data(Vec<u8>),
/// }
/// ```
///
/// A payload enum must name its kind:
///
/// ```compile_fail
/// use tagswitch::Variant;
///
/// #[derive(Variant)]
/// enum Packet {
///     Ping,
///     Data(Vec<u8>),
/// }
/// ```
pub trait Variant {
    /// The enumeration tagging values of this type.
    type Discriminant: Discriminant;

    /// The tag of this value.
    fn discriminant(&self) -> Self::Discriminant;
}
