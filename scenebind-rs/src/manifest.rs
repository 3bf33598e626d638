//! Manifest: JSON description of the entities, templates and resources to seed a scene and catalog with.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::binding::{Asset, Classified, ConcreteType};
use crate::catalog::{MemoryCatalog, Template};
use crate::scene::Scene;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Entity (or template) seed: name plus tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub entities: Vec<Seed>,
    #[serde(default)]
    pub templates: Vec<Seed>,
    /// Resource name -> JSON body, loaded as `JsonAsset`.
    #[serde(default)]
    pub resources: BTreeMap<String, Value>,
}

/// What `Manifest::apply` added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    pub entities: usize,
    pub templates: usize,
    pub resources: usize,
}

/// Catalog resource holding a JSON value from a manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonAsset(pub Value);

impl Classified for JsonAsset {
    fn concrete_type() -> ConcreteType {
        ConcreteType::asset::<Self>()
    }
}

impl Asset for JsonAsset {}

impl Manifest {
    pub fn from_json_str(s: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Spawn entities in manifest order (so tag lookups follow it) and fill the catalog.
    pub fn apply(&self, scene: &Scene, catalog: &MemoryCatalog) -> ManifestSummary {
        for seed in &self.entities {
            let tags: Vec<&str> = seed.tags.iter().map(String::as_str).collect();
            scene.spawn(&seed.name, &tags);
        }
        for seed in &self.templates {
            let template = seed
                .tags
                .iter()
                .fold(Template::new(seed.name.clone()), |t, tag| t.with_tag(tag.clone()));
            catalog.insert_template(template);
        }
        for (name, body) in &self.resources {
            catalog.insert_resource(name.clone(), JsonAsset(body.clone()));
        }
        let summary = ManifestSummary {
            entities: self.entities.len(),
            templates: self.templates.len(),
            resources: self.resources.len(),
        };
        debug!(?summary, "manifest applied");
        summary
    }
}
