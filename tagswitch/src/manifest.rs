//! Constant-result dispatch tables described in TOML.
//!
//! A manifest maps every tag of an enumeration to a value:
//!
//! ```toml
//! name = "animal-sounds"
//! allow_partial = false
//!
//! [cases]
//! dog = "woof"
//! cat = "meow"
//! chicken = "cluck"
//! ```
//!
//! Loading a manifest goes through the same [`TableBuilder`] checks as code does, so
//! a manifest that lags behind its enumeration fails at load time instead of at the
//! first dispatch.
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use enum_map::EnumArray;
use log::{debug, info};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    discriminant::{Discriminant, Variant},
    error::{DispatchError, DispatchResult},
    table::{DispatchTable, Handler, PartialTable, TableBuilder},
};

/// Name of the environment variable overriding the directory manifests are looked up in.
/// If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/tagswitch` or `$HOME/.config/tagswitch`
///  (2) on Windows: `%APPDATA%\tagswitch`
pub const ENV_MANIFEST_DIR: &str = "TAGSWITCH_MANIFEST_DIR";

/// Extension of manifest files.
pub const MANIFEST_EXTENSION: &str = "toml";

/// Get the default directory manifests are looked up in.
pub fn default_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_MANIFEST_DIR) {
        return dir.into();
    }

    let mut path = PathBuf::new();

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            path.push(appdata);
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
            path.push(xdg_config_home);
        } else if let Ok(home) = std::env::var("HOME") {
            path.push(home);
            path.push(".config");
        }
    }

    path.push("tagswitch");
    path
}

/// Default location of the manifest of table `name`.
pub fn default_path(name: &str) -> PathBuf {
    default_dir().join(format!("{name}.{MANIFEST_EXTENSION}"))
}

/// Serializable description of a table whose handlers return constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableManifest<R> {
    /// Name of the table, used in diagnostics.
    pub name: String,

    /// Accept manifests that leave some members of the enumeration out.
    ///
    /// Only [`TableManifest::into_partial_table`] honours this flag;
    /// [`TableManifest::into_table`] always requires full coverage.
    #[serde(default)]
    pub allow_partial: bool,

    /// Result of every handled tag.
    pub cases: BTreeMap<String, R>,
}

impl<R: DeserializeOwned> TableManifest<R> {
    /// Parse a manifest from TOML text. `origin` names the text in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> DispatchResult<Self> {
        let manifest: Self =
            toml::from_str(text).map_err(|source| DispatchError::ManifestParseError {
                source,
                file: origin.to_string(),
            })?;
        debug!(
            "Parsed manifest of table `{}` from `{}` with {} cases.",
            manifest.name,
            origin,
            manifest.cases.len()
        );
        Ok(manifest)
    }

    /// Load a manifest from a TOML file.
    pub fn load_from_toml(path: &Path) -> DispatchResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&text, &path.display().to_string())?;
        info!(
            "Loaded manifest of table `{}` from `{}`.",
            manifest.name,
            path.display()
        );
        Ok(manifest)
    }

    /// Load the manifest of table `name` from the manifest directory.
    ///
    /// See [`default_path`].
    pub fn load_named(name: &str) -> DispatchResult<Self> {
        Self::load_from_toml(&default_path(name))
    }
}

impl<R: Serialize> TableManifest<R> {
    /// Save the manifest to a TOML file, creating parent directories as needed.
    pub fn save_to_toml(&self, path: &Path) -> DispatchResult<()> {
        let text =
            toml::to_string(self).map_err(|source| DispatchError::ManifestSerializeError {
                source,
                file: path.display().to_string(),
            })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, text)?;
        Ok(())
    }

    /// Save the manifest under its own name in the manifest directory, returning the
    /// path written.
    pub fn save_named(&self) -> DispatchResult<PathBuf> {
        let path = default_path(&self.name);
        self.save_to_toml(&path)?;
        Ok(path)
    }
}

impl<R> TableManifest<R>
where
    R: Clone + Send + Sync + 'static,
{
    /// Build a total table returning the value listed for each tag.
    pub fn into_table<K>(self) -> DispatchResult<DispatchTable<K, R>>
    where
        K: Discriminant + Variant<Discriminant = K>,
        K: EnumArray<Handler<K, R>> + EnumArray<Option<Handler<K, R>>>,
    {
        self.into_builder::<K>()?.build()
    }

    /// Build a table that may leave members out, if the manifest allows it.
    ///
    /// Without `allow_partial` the manifest must still cover the enumeration.
    pub fn into_partial_table<K>(self) -> DispatchResult<PartialTable<K, R>>
    where
        K: Discriminant + Variant<Discriminant = K>,
        K: EnumArray<Handler<K, R>> + EnumArray<Option<Handler<K, R>>>,
    {
        if self.allow_partial {
            self.into_builder::<K>()?.build_partial()
        } else {
            self.into_table::<K>().map(PartialTable::from)
        }
    }

    fn into_builder<K>(self) -> DispatchResult<TableBuilder<K, R>>
    where
        K: Discriminant + Variant<Discriminant = K>,
        K: EnumArray<Option<Handler<K, R>>>,
    {
        let mut builder = TableBuilder::new(self.name.as_str());
        for (tag, value) in self.cases {
            let Some(kind) = K::from_tag(&tag) else {
                return Err(DispatchError::UnknownTag {
                    table: self.name,
                    tag,
                });
            };
            builder = builder.on(kind, move |_| value.clone());
        }
        Ok(builder)
    }

    /// Capture a table over a payload-free enumeration as a manifest.
    pub fn from_table<K>(table: &DispatchTable<K, R>) -> Self
    where
        K: Discriminant + Variant<Discriminant = K>,
        K: EnumArray<Handler<K, R>>,
    {
        Self {
            name: table.name().to_string(),
            allow_partial: false,
            cases: K::all()
                .map(|kind| (kind.tag().to_string(), table.dispatch(kind)))
                .collect(),
        }
    }
}
