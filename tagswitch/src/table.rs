//! Dispatch tables: one handler per member of a closed enumeration.
//!
//! A [`DispatchTable`] is total. It can be built in two ways, and both refuse an
//! incomplete mapping before the first dispatch:
//!
//! - [`DispatchTable::from_fn`] asks a closure for the handler of every member. The
//!   closure is meant to `match` on the member, so the compiler rejects a table that
//!   forgets one.
//! - [`DispatchTable::builder`] registers handlers one at a time and checks, in
//!   [`TableBuilder::build`], that the registered set equals the enumeration.
//!
//! A [`PartialTable`] is the explicit escape hatch for tables that are known to be
//! incomplete. Its gaps are reported when it is built and are fatal when reached.
use std::fmt;

use enum_map::{EnumArray, EnumMap};
use log::{debug, warn};

use crate::{
    discriminant::{Discriminant, Variant},
    error::{DispatchError, DispatchResult, RawDiscriminant, UnhandledVariant},
    sentinel,
};

/// Handler producing the result for one member of the enumeration.
pub type Handler<V, R> = Box<dyn Fn(V) -> R + Send + Sync>;

type Kind<V> = <V as Variant>::Discriminant;

/// Total mapping from every discriminant of `V` to a handler producing `R`.
///
/// ```
/// use enum_map::Enum;
/// use strum::{AsRefStr, Display, EnumIter};
/// use tagswitch::{DispatchTable, Handler, Variant};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display, Variant)]
/// enum Light {
///     Red,
///     Amber,
///     Green,
/// }
///
/// let durations = DispatchTable::from_fn("durations", |light| -> Handler<Light, u32> {
///     match light {
///         Light::Red => Box::new(|_| 30),
///         Light::Amber => Box::new(|_| 5),
///         Light::Green => Box::new(|_| 25),
///     }
/// });
///
/// assert_eq!(durations.dispatch(Light::Amber), 5);
/// ```
///
/// Forgetting a member is a build error rather than a runtime surprise:
///
/// ```compile_fail
/// use enum_map::Enum;
/// use strum::{AsRefStr, Display, EnumIter};
/// use tagswitch::{DispatchTable, Handler, Variant};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display, Variant)]
/// enum Light {
///     Red,
///     Amber,
///     Green,
/// }
///
/// let durations = DispatchTable::from_fn("durations", |light| -> Handler<Light, u32> {
///     match light {
///         Light::Red => Box::new(|_| 30),
///         Light::Amber => Box::new(|_| 5),
///     }
/// });
/// ```
pub struct DispatchTable<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Handler<V, R>>,
{
    name: String,
    handlers: EnumMap<Kind<V>, Handler<V, R>>,
}

impl<V, R> DispatchTable<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Handler<V, R>>,
{
    /// Build a table by asking `handler_for` for the handler of every member.
    pub fn from_fn<F>(name: impl Into<String>, handler_for: F) -> Self
    where
        F: FnMut(Kind<V>) -> Handler<V, R>,
    {
        let name = name.into();
        let handlers = EnumMap::from_fn(handler_for);
        debug!(
            "Built dispatch table `{}` covering {} discriminants.",
            name,
            <Kind<V> as Discriminant>::COUNT
        );
        Self { name, handlers }
    }

    /// Start registering handlers one discriminant at a time.
    pub fn builder(name: impl Into<String>) -> TableBuilder<V, R>
    where
        Kind<V>: EnumArray<Option<Handler<V, R>>>,
    {
        TableBuilder::new(name)
    }

    /// Route `variant` to the handler of its discriminant.
    pub fn dispatch(&self, variant: V) -> R {
        let kind = variant.discriminant();
        (self.handlers[kind])(variant)
    }

    /// Name of the table, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of handlers, which is always the size of the enumeration.
    pub fn len(&self) -> usize {
        <Kind<V> as Discriminant>::COUNT
    }

    /// Whether the enumeration has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A total table handles every member; provided for parity with [`PartialTable`].
    pub fn handles(&self, _kind: Kind<V>) -> bool {
        true
    }

    /// Discriminants with a registered handler, in declaration order.
    pub fn discriminants(&self) -> impl Iterator<Item = Kind<V>> + '_ {
        self.handlers.iter().map(|(kind, _)| kind)
    }
}

impl<K, R> DispatchTable<K, R>
where
    K: Discriminant + Variant<Discriminant = K>,
    K: EnumArray<Handler<K, R>>,
{
    /// Dispatch a dense index that has not been checked against the enumeration.
    pub fn try_dispatch_raw(&self, index: usize) -> Result<R, UnhandledVariant<RawDiscriminant>> {
        self.try_dispatch_unchecked(RawDiscriminant::Index(index))
    }

    /// Dispatch a textual tag that has not been checked against the enumeration.
    pub fn try_dispatch_tag(&self, tag: &str) -> Result<R, UnhandledVariant<RawDiscriminant>> {
        self.try_dispatch_unchecked(RawDiscriminant::from(tag))
    }

    /// Dispatch a [`RawDiscriminant`], reporting it unchanged when it has no handler.
    pub fn try_dispatch_unchecked(
        &self,
        raw: RawDiscriminant,
    ) -> Result<R, UnhandledVariant<RawDiscriminant>> {
        match raw.resolve::<K>() {
            Some(kind) => Ok(self.dispatch(kind)),
            None => Err(UnhandledVariant::new(self.name.as_str(), raw)),
        }
    }
}

impl<V, R> fmt::Debug for DispatchTable<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Handler<V, R>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("name", &self.name)
            .field(
                "handles",
                &self.discriminants().map(|kind| kind.tag().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Incremental construction of a [`DispatchTable`].
///
/// Registration never fails on its own; duplicates and gaps are reported together
/// when the table is sealed with [`TableBuilder::build`] or
/// [`TableBuilder::build_partial`].
pub struct TableBuilder<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Option<Handler<V, R>>>,
{
    name: String,
    slots: EnumMap<Kind<V>, Option<Handler<V, R>>>,
    duplicates: Vec<Kind<V>>,
}

impl<V, R> TableBuilder<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Option<Handler<V, R>>>,
{
    /// Empty builder for a table called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: EnumMap::default(),
            duplicates: Vec::new(),
        }
    }

    /// Register `handler` for `kind`.
    pub fn on<F>(self, kind: Kind<V>, handler: F) -> Self
    where
        F: Fn(V) -> R + Send + Sync + 'static,
    {
        self.on_boxed(kind, Box::new(handler))
    }

    /// Register an already boxed `handler` for `kind`.
    pub fn on_boxed(mut self, kind: Kind<V>, handler: Handler<V, R>) -> Self {
        if self.slots[kind].is_some() {
            self.duplicates.push(kind);
        }
        self.slots[kind] = Some(handler);
        self
    }

    /// Seal the table, requiring exactly one handler for every member.
    pub fn build(self) -> DispatchResult<DispatchTable<V, R>>
    where
        Kind<V>: EnumArray<Handler<V, R>>,
    {
        self.check_duplicates()?;
        let handlers = seal(&self.name, self.slots)?;
        debug!(
            "Built dispatch table `{}` covering {} discriminants.",
            self.name,
            <Kind<V> as Discriminant>::COUNT
        );
        Ok(DispatchTable {
            name: self.name,
            handlers,
        })
    }

    /// Seal the table without requiring full coverage.
    pub fn build_partial(self) -> DispatchResult<PartialTable<V, R>> {
        self.check_duplicates()?;
        let table = PartialTable {
            name: self.name,
            handlers: self.slots,
        };

        let missing = table.missing();
        if !missing.is_empty() {
            warn!(
                "Dispatch table `{}` is partial, missing handlers for: {}.",
                table.name,
                tags(&missing).join(", ")
            );
        }
        Ok(table)
    }

    fn check_duplicates(&self) -> DispatchResult<()> {
        match self.duplicates.first() {
            Some(kind) => Err(DispatchError::DuplicateHandler {
                table: self.name.clone(),
                discriminant: kind.tag().to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Mapping from some of the discriminants of `V` to handlers producing `R`.
///
/// Reaching a discriminant without a handler is a defect: [`PartialTable::dispatch`]
/// aborts through [`sentinel::unhandled`] and [`PartialTable::try_dispatch`] hands
/// the [`UnhandledVariant`] back to the caller.
pub struct PartialTable<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Option<Handler<V, R>>>,
{
    name: String,
    handlers: EnumMap<Kind<V>, Option<Handler<V, R>>>,
}

impl<V, R> PartialTable<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Option<Handler<V, R>>>,
{
    /// Route `variant` to its handler, aborting if there is none.
    #[track_caller]
    pub fn dispatch(&self, variant: V) -> R {
        let kind = variant.discriminant();
        match &self.handlers[kind] {
            Some(handler) => handler(variant),
            None => sentinel::unhandled(&self.name, kind),
        }
    }

    /// Route `variant` to its handler, or report the unhandled discriminant.
    pub fn try_dispatch(&self, variant: V) -> Result<R, UnhandledVariant<Kind<V>>> {
        let kind = variant.discriminant();
        match &self.handlers[kind] {
            Some(handler) => Ok(handler(variant)),
            None => Err(UnhandledVariant::new(self.name.as_str(), kind)),
        }
    }

    /// Name of the table, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.discriminants().count()
    }

    /// Whether no handler is registered at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `kind` has a registered handler.
    pub fn handles(&self, kind: Kind<V>) -> bool {
        self.handlers[kind].is_some()
    }

    /// Discriminants with a registered handler, in declaration order.
    pub fn discriminants(&self) -> impl Iterator<Item = Kind<V>> + '_ {
        self.handlers
            .iter()
            .filter(|(_, handler)| handler.is_some())
            .map(|(kind, _)| kind)
    }

    /// Discriminants without a handler, in declaration order.
    pub fn missing(&self) -> Vec<Kind<V>> {
        self.handlers
            .iter()
            .filter(|(_, handler)| handler.is_none())
            .map(|(kind, _)| kind)
            .collect()
    }

    /// Promote to a total table once every member is covered.
    pub fn complete(self) -> DispatchResult<DispatchTable<V, R>>
    where
        Kind<V>: EnumArray<Handler<V, R>>,
    {
        let handlers = seal(&self.name, self.handlers)?;
        Ok(DispatchTable {
            name: self.name,
            handlers,
        })
    }
}

impl<K, R> PartialTable<K, R>
where
    K: Discriminant + Variant<Discriminant = K>,
    K: EnumArray<Option<Handler<K, R>>>,
{
    /// Dispatch a dense index that has not been checked against the enumeration.
    pub fn try_dispatch_raw(&self, index: usize) -> Result<R, UnhandledVariant<RawDiscriminant>> {
        self.try_dispatch_unchecked(RawDiscriminant::Index(index))
    }

    /// Dispatch a textual tag that has not been checked against the enumeration.
    pub fn try_dispatch_tag(&self, tag: &str) -> Result<R, UnhandledVariant<RawDiscriminant>> {
        self.try_dispatch_unchecked(RawDiscriminant::from(tag))
    }

    /// Dispatch a [`RawDiscriminant`], reporting it unchanged when it has no handler.
    pub fn try_dispatch_unchecked(
        &self,
        raw: RawDiscriminant,
    ) -> Result<R, UnhandledVariant<RawDiscriminant>> {
        let resolved = raw.resolve::<K>();
        match resolved.and_then(|kind| self.handlers[kind].as_ref().map(|h| (kind, h))) {
            Some((kind, handler)) => Ok(handler(kind)),
            None => Err(UnhandledVariant::new(self.name.as_str(), raw)),
        }
    }
}

impl<V, R> From<DispatchTable<V, R>> for PartialTable<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Handler<V, R>> + EnumArray<Option<Handler<V, R>>>,
{
    fn from(table: DispatchTable<V, R>) -> Self {
        Self {
            name: table.name,
            handlers: table.handlers.map(|_, handler| Some(handler)),
        }
    }
}

impl<V, R> fmt::Debug for PartialTable<V, R>
where
    V: Variant,
    Kind<V>: EnumArray<Option<Handler<V, R>>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialTable")
            .field("name", &self.name)
            .field("handles", &tags(&self.discriminants().collect::<Vec<_>>()))
            .field("missing", &tags(&self.missing()))
            .finish()
    }
}

fn tags<K: Discriminant>(kinds: &[K]) -> Vec<String> {
    kinds.iter().map(|kind| kind.tag().to_string()).collect()
}

/// Turn optional slots into a total handler map, or list every empty slot.
fn seal<K, H>(name: &str, slots: EnumMap<K, Option<H>>) -> DispatchResult<EnumMap<K, H>>
where
    K: Discriminant + EnumArray<Option<H>> + EnumArray<H>,
{
    let missing: Vec<K> = slots
        .iter()
        .filter(|(_, slot)| slot.is_none())
        .map(|(kind, _)| kind)
        .collect();

    if !missing.is_empty() {
        return Err(DispatchError::IncompleteTable {
            table: name.to_string(),
            missing: tags(&missing),
        });
    }

    Ok(slots.map(|kind, slot| slot.unwrap_or_else(|| sentinel::unhandled(name, kind))))
}
