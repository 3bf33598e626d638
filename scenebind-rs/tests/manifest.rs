//! Manifest loading and installers.

mod common;

use std::io::Write;

use common::{Damageable, Health, Spawner, World};
use scenebind_rs::{
    BindError, Binder, EntityRegistry, Installer, JsonAsset, Manifest, ManifestError,
    ManifestSummary, Template,
};

const MANIFEST: &str = r#"{
    "entities": [
        { "name": "Player", "tags": ["player"] },
        { "name": "Guard", "tags": ["enemy"] },
        { "name": "Archer", "tags": ["enemy"] }
    ],
    "templates": [{ "name": "Enemy", "tags": ["enemy", "spawned"] }],
    "resources": { "explosion": { "volume": 0.8 } }
}"#;

#[test]
fn manifest_seeds_scene_and_catalog() {
    let world = World::new();
    let manifest = Manifest::from_json_str(MANIFEST).unwrap();
    let summary = manifest.apply(&world.scene, &world.catalog);
    assert_eq!(
        summary,
        ManifestSummary {
            entities: 3,
            templates: 1,
            resources: 1
        }
    );
    let guard = world.scene.find_by_name("Guard").unwrap();
    assert_eq!(world.scene.find_by_tag("enemy").first(), Some(&guard));
    assert_eq!(world.catalog.template_names(), vec!["Enemy".to_string()]);

    let mut binder = world.binder();
    binder.bind_resource::<JsonAsset>("explosion").unwrap();
    assert_eq!(binder.resolve::<JsonAsset>().unwrap().0["volume"], 0.8);
}

#[test]
fn manifest_defaults_and_unknown_fields() {
    let empty = Manifest::from_json_str("{}").unwrap();
    assert_eq!(empty, Manifest::default());
    let err = Manifest::from_json_str(r#"{ "entites": [] }"#).unwrap_err();
    assert!(matches!(err, ManifestError::Json(_)));
}

#[test]
fn manifest_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();
    let manifest = Manifest::from_path(file.path()).unwrap();
    assert_eq!(manifest.entities.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let err = Manifest::from_path(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }));
}

struct EnemyInstaller {
    template: &'static str,
}

impl Installer for EnemyInstaller {
    fn install(&mut self, binder: &mut Binder) -> Result<(), BindError> {
        binder
            .bind_self::<Spawner>()
            .from_template_instance(self.template)
            .transient()?;
        binder
            .bind::<dyn Damageable>()
            .to::<Health>()
            .from_tag("player")
            .singleton()?;
        Ok(())
    }
}

#[test]
fn installer_commits_its_bindings() {
    let world = World::new();
    Manifest::from_json_str(MANIFEST)
        .unwrap()
        .apply(&world.scene, &world.catalog);
    let mut binder = world.binder();
    binder
        .install(&mut EnemyInstaller { template: "Enemy" })
        .unwrap();
    assert_eq!(binder.container().len(), 2);
    let spawner = binder.resolve::<Spawner>().unwrap();
    assert_eq!(world.scene.name_of(spawner.0).as_deref(), Some("Enemy"));
    assert_eq!(binder.resolve::<dyn Damageable>().unwrap().hp(), 0);
}

#[test]
fn installer_stops_at_first_failure() {
    let world = World::new();
    let mut binder = world.binder();
    // No player entity: the transient binding registers, the singleton aborts.
    world.catalog.insert_template(Template::new("Enemy"));
    let err = binder
        .install(&mut EnemyInstaller { template: "Enemy" })
        .unwrap_err();
    assert!(matches!(err, BindError::TargetMissing(_)));
    assert_eq!(binder.container().len(), 1);
}

#[test]
fn closure_installer_folds_host_errors() {
    let world = World::new();
    let mut binder = world.binder();
    let mut installer = |_: &mut Binder| -> Result<(), BindError> {
        let n: u32 = "not a number".parse().map_err(BindError::installer)?;
        let _ = n;
        Ok(())
    };
    let err = binder.install(&mut installer).unwrap_err();
    assert!(matches!(err, BindError::Installer(_)));
}
