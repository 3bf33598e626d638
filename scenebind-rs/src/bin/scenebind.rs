//! CLI for scenebind: load a manifest and see what the locator finds.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use scenebind_rs::{EntityRegistry, LocationSpec, Locator, Manifest, MemoryCatalog, Scene, Target};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scenebind")]
#[command(about = "scenebind diagnostics: validate manifests and run locator queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a manifest and apply it to an empty scene and catalog.
    Check {
        /// Path to the manifest (JSON)
        manifest: PathBuf,
    },
    /// Run one locator query against a manifest.
    Locate {
        /// Path to the manifest (JSON)
        manifest: PathBuf,
        #[command(flatten)]
        query: Query,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Query {
    /// Entity with this exact name
    #[arg(long)]
    name: Option<String>,
    /// First entity carrying this tag
    #[arg(long)]
    tag: Option<String>,
    /// Template by name, not instantiated
    #[arg(long)]
    template: Option<String>,
    /// Template by name, instantiated into the scene
    #[arg(long)]
    instantiate: Option<String>,
}

impl Query {
    fn into_location(self) -> Option<LocationSpec> {
        if let Some(name) = self.name {
            return Some(LocationSpec::ByName(name));
        }
        if let Some(tag) = self.tag {
            return Some(LocationSpec::ByTag(tag));
        }
        if let Some(name) = self.template {
            return Some(LocationSpec::TemplateByName(name));
        }
        self.instantiate.map(LocationSpec::TemplateInstantiate)
    }
}

fn load(path: &Path) -> Result<(Scene, MemoryCatalog), Box<dyn std::error::Error + Send + Sync>> {
    let manifest = Manifest::from_path(path)?;
    let scene = Scene::new();
    let catalog = MemoryCatalog::new();
    let summary = manifest.apply(&scene, &catalog);
    println!(
        "{}: {} entities, {} templates, {} resources",
        path.display(),
        summary.entities,
        summary.templates,
        summary.resources
    );
    Ok((scene, catalog))
}

fn run_locate(path: &Path, query: Query) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let location = query
        .into_location()
        .ok_or("one of --name, --tag, --template, --instantiate is required")?;
    let (scene, catalog) = load(path)?;
    let target = Locator::new(&scene, &catalog).locate(&location, "scenebind")?;
    match target {
        Target::Entity(entity) => println!(
            "{}: entity {} {:?} tags [{}]",
            location,
            entity,
            scene.name_of(entity).unwrap_or_default(),
            scene.tags_of(entity).join(", ")
        ),
        Target::Template(template) => println!(
            "{}: template {:?} tags [{}]",
            location,
            template.name(),
            template.tags().join(", ")
        ),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SCENEBIND_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { manifest } => load(&manifest).map(|_| ()),
        Commands::Locate { manifest, query } => run_locate(&manifest, query),
    }
}
