//! Asset catalog: prefabs and audio clips registered by name.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use glam::Vec3;

use hoverstrike_core::components::Collider;
use hoverstrike_core::config::{AssetManifest, AudioClip, Prefab, ProjectileTuning};
use hoverstrike_core::constants::{DRONE_PREFAB, FLOOR_PREFAB, MISSILE_PREFAB};
use hoverstrike_core::enums::Layer;

use crate::interfaces::AssetProvider;

/// Name-indexed templates and clips. The first registration of a name wins.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    prefabs: HashMap<String, Prefab>,
    sounds: HashMap<String, AudioClip>,
    music: HashMap<String, AudioClip>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the stock missile, drone and floor prefabs.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register_prefab(Prefab {
            name: MISSILE_PREFAB.to_string(),
            layer: Layer::Projectile,
            collider: Some(Collider::Sphere { radius: 0.2 }),
            health: None,
            projectile: Some(ProjectileTuning::default()),
            floor: false,
            enemy: false,
        });
        catalog.register_prefab(Prefab {
            name: DRONE_PREFAB.to_string(),
            layer: Layer::Enemy,
            collider: Some(Collider::Sphere { radius: 1.0 }),
            health: Some(50),
            projectile: None,
            floor: false,
            enemy: true,
        });
        catalog.register_prefab(Prefab {
            name: FLOOR_PREFAB.to_string(),
            layer: Layer::Environment,
            collider: Some(Collider::Box {
                half_extents: Vec3::new(200.0, 0.5, 200.0),
            }),
            health: None,
            projectile: None,
            floor: true,
            enemy: false,
        });
        catalog
    }

    /// Register everything in a manifest. Duplicates are logged and skipped.
    pub fn load_manifest(&mut self, manifest: AssetManifest) {
        for prefab in manifest.prefabs {
            self.register_prefab(prefab);
        }
        for sound in manifest.sounds {
            register(&mut self.sounds, "sound", sound.name.clone(), sound);
        }
        for song in manifest.music {
            register(&mut self.music, "song", song.name.clone(), song);
        }
        tracing::info!(
            prefabs = self.prefabs.len(),
            sounds = self.sounds.len(),
            music = self.music.len(),
            "asset manifest loaded"
        );
    }

    /// Returns false if the name was already taken.
    pub fn register_prefab(&mut self, prefab: Prefab) -> bool {
        register(&mut self.prefabs, "prefab", prefab.name.clone(), prefab)
    }

    pub fn get_sound(&self, name: &str) -> Option<&AudioClip> {
        self.sounds.get(name)
    }

    pub fn get_song(&self, name: &str) -> Option<&AudioClip> {
        self.music.get(name)
    }

    pub fn prefab_names(&self) -> impl Iterator<Item = &str> {
        self.prefabs.keys().map(String::as_str)
    }
}

impl AssetProvider for AssetCatalog {
    fn get_prefab(&self, name: &str) -> Option<&Prefab> {
        self.prefabs.get(name)
    }
}

fn register<T>(map: &mut HashMap<String, T>, kind: &str, name: String, value: T) -> bool {
    match map.entry(name) {
        Entry::Occupied(entry) => {
            tracing::error!(kind, name = %entry.key(), "duplicate asset found, keeping the first");
            false
        }
        Entry::Vacant(entry) => {
            entry.insert(value);
            true
        }
    }
}
