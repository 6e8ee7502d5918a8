use std::fmt::{self, Debug, Display};

use thiserror::Error;

use crate::discriminant::Discriminant;

/// Errors raised while assembling a dispatch table, either in code through
/// [`crate::table::TableBuilder`] or from a [`crate::manifest::TableManifest`].
///
/// Dispatch itself never produces a [`DispatchError`]; a discriminant without a
/// handler is reported as an [`UnhandledVariant`] instead.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A table was sealed while some members of its enumeration had no handler.
    #[error(
        "Dispatch table `{table}` does not cover every discriminant of its enumeration. Missing handlers for: {}.",
        .missing.join(", ")
    )]
    IncompleteTable {
        /// Name of the table.
        table: String,
        /// Tags of every member without a handler, in declaration order.
        missing: Vec<String>,
    },

    /// A member was registered more than once.
    #[error(
        "Dispatch table `{table}` registers more than one handler for discriminant `{discriminant}`."
    )]
    DuplicateHandler {
        /// Name of the table.
        table: String,
        /// Tag of the first member registered twice.
        discriminant: String,
    },

    /// A manifest lists a tag that is not a member of the enumeration.
    #[error("Dispatch table `{table}` refers to `{tag}`, which is not a member of its enumeration.")]
    UnknownTag {
        /// Name of the table.
        table: String,
        /// The unknown tag, as written in the manifest.
        tag: String,
    },

    /// A manifest is not valid TOML or does not fit the expected shape.
    #[error("Failed to parse manifest file '{file}': {source}")]
    ManifestParseError {
        /// Underlying TOML error.
        source: toml::de::Error,
        /// Path or name of the manifest text.
        file: String,
    },

    /// A manifest could not be rendered as TOML.
    #[error("Failed to serialize manifest to '{file}': {source}")]
    ManifestSerializeError {
        /// Underlying TOML error.
        source: toml::ser::Error,
        /// Path the manifest was meant for.
        file: String,
    },

    /// Reading or writing a manifest file failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result of table construction and manifest handling.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// A discriminant reached a dispatcher that holds no handler for it.
///
/// This always denotes drift between an enumeration and a table built for it, so
/// it is surfaced to the caller as is and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("Unhandled variant `{discriminant}` reached dispatch table `{table}`.")]
pub struct UnhandledVariant<D: Debug + Display> {
    /// The offending discriminant, exactly as it was supplied.
    pub discriminant: D,
    /// Name of the table that had no handler.
    pub table: String,
}

impl<D: Debug + Display> UnhandledVariant<D> {
    /// Failure of `table` on `discriminant`.
    pub fn new(table: impl Into<String>, discriminant: D) -> Self {
        Self {
            discriminant,
            table: table.into(),
        }
    }
}

/// A discriminant value that has not been checked against an enumeration.
///
/// This is the shape a tag takes before it is known to be a member of a closed
/// set, for instance an index read from storage or a string coming from config.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawDiscriminant {
    /// Dense index as produced by [`Discriminant::index`].
    Index(usize),
    /// Textual tag as produced by [`Discriminant::tag`].
    Tag(String),
}

impl RawDiscriminant {
    /// Resolve against the enumeration `K`.
    pub fn resolve<K: Discriminant>(&self) -> Option<K> {
        match self {
            RawDiscriminant::Index(index) => K::from_raw(*index),
            RawDiscriminant::Tag(tag) => K::from_tag(tag),
        }
    }
}

impl Display for RawDiscriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDiscriminant::Index(index) => write!(f, "#{index}"),
            RawDiscriminant::Tag(tag) => f.write_str(tag),
        }
    }
}

impl From<usize> for RawDiscriminant {
    fn from(index: usize) -> Self {
        RawDiscriminant::Index(index)
    }
}

impl From<&str> for RawDiscriminant {
    fn from(tag: &str) -> Self {
        RawDiscriminant::Tag(tag.to_string())
    }
}
