//! Bind a player behavior as a singleton and enemies as transients, then resolve them.
//! Run: cargo run --example arena

use std::sync::Arc;

use scenebind_rs::{
    Behavior, Binder, BindError, EntityRef, EntityRegistry, MemoryCatalog, Scene, Template,
};

trait Damageable: Send + Sync {
    fn hp(&self) -> u32;
}

#[derive(Default, Behavior)]
struct Health {
    hp: u32,
}

impl Damageable for Health {
    fn hp(&self) -> u32 {
        self.hp
    }
}

#[derive(scenebind_rs::Entity)]
struct Enemy(EntityRef);

fn main() -> Result<(), BindError> {
    let scene = Arc::new(Scene::new());
    let catalog = Arc::new(MemoryCatalog::new());
    scene.spawn("Player", &["player"]);
    catalog.insert_template(Template::new("Goblin").with_tag("enemy").with_behavior(|| Health { hp: 12 }));

    let mut binder = Binder::new(scene.clone(), catalog.clone());
    binder
        .types_mut()
        .implements::<Health, dyn Damageable>(|h| h as Arc<dyn Damageable>);
    binder
        .bind::<dyn Damageable>()
        .to::<Health>()
        .from_name("Player")
        .singleton()?;
    binder.bind_self::<Enemy>().from_template_instance("Goblin").transient()?;

    println!("player hp: {}", binder.resolve::<dyn Damageable>()?.hp());
    for _ in 0..3 {
        let enemy = binder.resolve::<Enemy>()?;
        println!("spawned {} ({:?})", enemy.0, scene.name_of(enemy.0));
    }
    println!("enemies alive: {}", scene.find_by_tag("enemy").len());
    Ok(())
}
