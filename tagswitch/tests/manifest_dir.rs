//! Manifest directory resolution. The environment is process-wide, so this file
//! holds a single test.
use enum_map::Enum;
use strum::{AsRefStr, Display, EnumIter};
use tagswitch::prelude::*;
use tagswitch::{DispatchError, TableManifest, manifest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display, Variant)]
#[strum(serialize_all = "snake_case")]
enum Shift {
    Early,
    Late,
}

fn rota() -> TableManifest<u32> {
    let table = DispatchTable::<Shift, u32>::from_fn("rota", |shift| -> Handler<Shift, u32> {
        match shift {
            Shift::Early => Box::new(|_| 6),
            Shift::Late => Box::new(|_| 14),
        }
    });
    TableManifest::from_table(&table)
}

#[test]
fn named_manifests_follow_the_manifest_directory() {
    let config = tempfile::tempdir().expect("temporary config directory");
    let overridden = tempfile::tempdir().expect("temporary manifest directory");

    // SAFETY: no other test runs in this binary.
    unsafe {
        std::env::remove_var(manifest::ENV_MANIFEST_DIR);
        std::env::set_var("XDG_CONFIG_HOME", config.path());
        std::env::set_var("APPDATA", config.path());
    }
    assert_eq!(manifest::default_dir(), config.path().join("tagswitch"));
    assert_eq!(
        manifest::default_path("rota"),
        config.path().join("tagswitch").join("rota.toml")
    );

    let written = rota().save_named().expect("fallback directory is writable");
    assert_eq!(written, config.path().join("tagswitch").join("rota.toml"));
    let loaded = TableManifest::<u32>::load_named("rota").expect("manifest was just saved");
    assert_eq!(loaded, rota());

    unsafe {
        std::env::set_var(manifest::ENV_MANIFEST_DIR, overridden.path());
    }
    assert_eq!(manifest::default_dir(), overridden.path());
    assert!(matches!(
        TableManifest::<u32>::load_named("rota"),
        Err(DispatchError::IoError(_))
    ));

    let written = rota().save_named().expect("override directory is writable");
    assert_eq!(written, overridden.path().join("rota.toml"));
    let table = TableManifest::<u32>::load_named("rota")
        .expect("manifest was just saved")
        .into_table::<Shift>()
        .expect("every shift is listed");
    assert_eq!(table.dispatch(Shift::Late), 14);
}
