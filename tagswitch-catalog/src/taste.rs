//! The five basic tastes and a manifest describing them.
use enum_map::Enum;
use strum::{AsRefStr, Display, EnumIter};
use tagswitch::{DispatchResult, DispatchTable, TableManifest, Variant};

/// Manifest bundled with the crate, one description per taste.
pub const TASTE_MANIFEST: &str = include_str!("../manifests/tastes.toml");

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display, Variant,
)]
#[strum(serialize_all = "snake_case")]
pub enum Taste {
    Bitterness,
    Sweetness,
    Sourness,
    Saltiness,
    Umami,
}

/// Description of every taste, from the bundled manifest.
pub fn taste_table() -> DispatchResult<DispatchTable<Taste, String>> {
    TableManifest::<String>::from_toml_str(TASTE_MANIFEST, "manifests/tastes.toml")?.into_table()
}
